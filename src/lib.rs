pub mod constants;
pub mod diffusion;
pub mod error;
pub mod force;
pub mod particle;
pub mod random_walk;
pub mod sampling;
pub mod si_units;
pub mod sim;
pub mod stats;
