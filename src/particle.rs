// Particle records, creation parameters, and the factory that validates them

use crate::diffusion::DiffusionCoefficient;
use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

/// A live, mutable particle inside a simulation.
///
/// The controller rewrites `x`/`y`/`z`, `velocity`, `distance_moved` and
/// `total_distance_moved` every step. History never aliases these records;
/// each committed step stores an owned [`ParticleState`] copy.
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Present only for 3D particles. All particles in one run must agree.
    pub z: Option<f64>,
    /// Instantaneous speed, `distance_moved / step_size`, updated each step
    pub velocity: f64,
    pub diffusion_coefficient: DiffusionCoefficient,
    pub mass: f64,
    /// Hydrodynamic radius, required only for Einstein–Stokes
    pub radius: Option<f64>,
    /// Monotone accumulator of every step's displacement magnitude
    pub total_distance_moved: f64,
    /// Displacement magnitude of the most recent step
    pub distance_moved: f64,
}

/// Parameters for building a particle at its initial state.
#[derive(Debug, Clone)]
pub struct ParticleParams {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
    pub diffusion_coefficient: DiffusionCoefficient,
    pub mass: f64,
    pub radius: Option<f64>,
}

impl Default for ParticleParams {
    fn default() -> Self {
        ParticleParams {
            x: 0.0,
            y: 0.0,
            z: None,
            diffusion_coefficient: DiffusionCoefficient::Constant(0.0),
            mass: 1.0,
            radius: None,
        }
    }
}

/// Plain-data snapshot of one particle at one committed step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleState {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub z: Option<f64>,
    pub velocity: f64,
    pub mass: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub radius: Option<f64>,
    pub distance_moved: f64,
    pub total_distance_moved: f64,
}

impl Particle {
    /// Owned immutable copy of the current state, safe to push into history
    pub fn state(&self) -> ParticleState {
        ParticleState {
            x: self.x,
            y: self.y,
            z: self.z,
            velocity: self.velocity,
            mass: self.mass,
            radius: self.radius,
            distance_moved: self.distance_moved,
            total_distance_moved: self.total_distance_moved,
        }
    }
}

fn check_coordinate(axis: char, value: f64) -> SimResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::InvalidCoordinate { axis, value })
    }
}

/// Build a particle at its initial state.
///
/// Coordinates must be finite and `mass` must be finite and positive;
/// derived fields start at zero.
pub fn create_particle(params: &ParticleParams) -> SimResult<Particle> {
    let x = check_coordinate('x', params.x)?;
    let y = check_coordinate('y', params.y)?;
    let z = match params.z {
        Some(value) => Some(check_coordinate('z', value)?),
        None => None,
    };
    if !params.mass.is_finite() || params.mass <= 0.0 {
        return Err(SimError::InvalidMass(params.mass));
    }

    Ok(Particle {
        x,
        y,
        z,
        velocity: 0.0,
        diffusion_coefficient: params.diffusion_coefficient.clone(),
        mass: params.mass,
        radius: params.radius,
        total_distance_moved: 0.0,
        distance_moved: 0.0,
    })
}

/// Create `quantity` independently validated clones of the same initial state.
pub fn create_multiple_particles(
    params: &ParticleParams,
    quantity: usize,
) -> SimResult<Vec<Particle>> {
    (0..quantity).map(|_| create_particle(params)).collect()
}
