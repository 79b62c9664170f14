pub mod control;
pub mod simulation;

pub use control::{SimControl, SimState};
pub use simulation::{Simulation, SimulationOptions, SimulationOutput};
