use thiserror::Error;

/// Everything that can go wrong while building or running a simulation.
///
/// All variants are fatal at the point raised; none are retried.
/// Construction errors abort object creation synchronously, run-time errors
/// abort the in-flight `run()` and leave history as accumulated through the
/// last committed step.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid {axis} coordinate: {value} (coordinates must be finite)")]
    InvalidCoordinate { axis: char, value: f64 },

    #[error("invalid mass: {0} (mass must be finite and greater than zero)")]
    InvalidMass(f64),

    #[error("particles disagree on the z axis: all particles in a run must define z, or none")]
    AxisMismatch,

    #[error("Einstein-Stokes diffusion requires a finite {0}")]
    MissingPhysicalParameter(&'static str),

    #[error("invalid step config: {0}")]
    InvalidStepConfig(String),

    #[error("simulation is already running")]
    AlreadyRunning,
}

pub type SimResult<T> = Result<T, SimError>;
