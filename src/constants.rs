// Physical constants used by the diffusion models

/// Boltzmann constant in J/K
pub const BOLTZMANN_CONSTANT_J_PER_K: f64 = 1.38064852e-23;

/// Geometry factor of the Einstein–Stokes drag term (6π for a sphere in
/// laminar flow)
pub const STOKES_DRAG_FACTOR: f64 = 6.0 * std::f64::consts::PI;
