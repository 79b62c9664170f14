// Per-step diffusion-coefficient resolution
//
// The coefficient controlling displacement variance is one of three
// variants: a plain number, a callback of (particle, time), or a named
// physical equation. Resolution happens exactly once per particle per step.

use crate::constants::{BOLTZMANN_CONSTANT_J_PER_K, STOKES_DRAG_FACTOR};
use crate::error::{SimError, SimResult};
use crate::particle::Particle;
use crate::sim::SimulationOptions;
use std::fmt;
use std::sync::Arc;

/// Callback form of a diffusion coefficient: `(particle, elapsed time) -> D`
pub type DiffusionFn = Arc<dyn Fn(&Particle, f64) -> f64 + Send + Sync>;

/// The three ways a diffusion coefficient can be specified.
#[derive(Clone)]
pub enum DiffusionCoefficient {
    /// Fixed scalar, returned as-is
    Constant(f64),
    /// Evaluated against the particle and the current simulation time
    Function(DiffusionFn),
    /// Dispatched to a named physical formula
    Equation(DiffusionEquation),
}

impl fmt::Debug for DiffusionCoefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffusionCoefficient::Constant(d) => write!(f, "Constant({d})"),
            DiffusionCoefficient::Function(_) => write!(f, "Function(..)"),
            DiffusionCoefficient::Equation(eq) => write!(f, "Equation({})", eq.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DiffusionEquation {
    EinsteinStokes,
}

impl DiffusionEquation {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffusionEquation::EinsteinStokes => "einstein-stokes",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "einstein-stokes" => Some(DiffusionEquation::EinsteinStokes),
            _ => None,
        }
    }
}

/// Resolve the scalar diffusion coefficient for one particle at one time.
///
/// A `global_diffusion_coefficient` on the options takes priority over the
/// particle's own coefficient.
pub fn resolve(particle: &Particle, time: f64, options: &SimulationOptions) -> SimResult<f64> {
    let coefficient = options
        .global_diffusion_coefficient
        .as_ref()
        .unwrap_or(&particle.diffusion_coefficient);

    match coefficient {
        DiffusionCoefficient::Constant(d) => Ok(*d),
        DiffusionCoefficient::Function(f) => Ok(f(particle, time)),
        DiffusionCoefficient::Equation(DiffusionEquation::EinsteinStokes) => {
            einstein_stokes(particle, options)
        }
    }
}

/// Einstein–Stokes relation: `D = k_B T / (6π η r)`.
///
/// Needs a radius on the particle and temperature and viscosity on the
/// options; a missing or non-finite value is fatal.
fn einstein_stokes(particle: &Particle, options: &SimulationOptions) -> SimResult<f64> {
    let radius = require_finite(particle.radius, "radius")?;
    let temperature = require_finite(options.temperature, "temperature")?;
    let viscosity = require_finite(options.viscosity, "viscosity")?;

    Ok(BOLTZMANN_CONSTANT_J_PER_K * temperature / (STOKES_DRAG_FACTOR * viscosity * radius))
}

fn require_finite(value: Option<f64>, name: &'static str) -> SimResult<f64> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(SimError::MissingPhysicalParameter(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::{ParticleParams, create_particle};
    use approx::assert_relative_eq;

    fn test_particle(coefficient: DiffusionCoefficient, radius: Option<f64>) -> Particle {
        create_particle(&ParticleParams {
            diffusion_coefficient: coefficient,
            radius,
            ..ParticleParams::default()
        })
        .unwrap()
    }

    #[test]
    fn constant_is_returned_as_is() {
        let particle = test_particle(DiffusionCoefficient::Constant(0.042), None);
        let options = SimulationOptions::default();
        assert_eq!(resolve(&particle, 0.0, &options).unwrap(), 0.042);
    }

    #[test]
    fn function_receives_particle_and_time() {
        let particle = test_particle(
            DiffusionCoefficient::Function(Arc::new(|p, t| p.mass * t)),
            None,
        );
        let options = SimulationOptions::default();
        assert_eq!(resolve(&particle, 3.0, &options).unwrap(), 3.0);
    }

    #[test]
    fn global_coefficient_overrides_particle() {
        let particle = test_particle(DiffusionCoefficient::Constant(1.0), None);
        let options = SimulationOptions {
            global_diffusion_coefficient: Some(DiffusionCoefficient::Constant(7.0)),
            ..SimulationOptions::default()
        };
        assert_eq!(resolve(&particle, 0.0, &options).unwrap(), 7.0);
    }

    #[test]
    fn einstein_stokes_matches_closed_form() {
        // Water at 298 K: η = 8.9e-4 Pa·s, r = 1 µm
        let particle = test_particle(
            DiffusionCoefficient::Equation(DiffusionEquation::EinsteinStokes),
            Some(1.0e-6),
        );
        let options = SimulationOptions {
            temperature: Some(298.0),
            viscosity: Some(8.9e-4),
            ..SimulationOptions::default()
        };

        let d = resolve(&particle, 0.0, &options).unwrap();
        let expected = 1.38064852e-23 * 298.0 / (6.0 * std::f64::consts::PI * 8.9e-4 * 1.0e-6);
        assert_relative_eq!(d, expected, max_relative = 1e-12);
        // ~2.45e-13 m²/s for a micron bead in water
        assert_relative_eq!(d, 2.4529e-13, max_relative = 1e-3);
    }

    #[test]
    fn einstein_stokes_reports_the_missing_parameter() {
        let options_full = SimulationOptions {
            temperature: Some(298.0),
            viscosity: Some(8.9e-4),
            ..SimulationOptions::default()
        };
        let equation = DiffusionCoefficient::Equation(DiffusionEquation::EinsteinStokes);

        let no_radius = test_particle(equation.clone(), None);
        assert_eq!(
            resolve(&no_radius, 0.0, &options_full).unwrap_err(),
            SimError::MissingPhysicalParameter("radius")
        );

        let particle = test_particle(equation.clone(), Some(1.0e-6));
        let no_temp = SimulationOptions {
            viscosity: Some(8.9e-4),
            ..SimulationOptions::default()
        };
        assert_eq!(
            resolve(&particle, 0.0, &no_temp).unwrap_err(),
            SimError::MissingPhysicalParameter("temperature")
        );

        let no_viscosity = SimulationOptions {
            temperature: Some(298.0),
            ..SimulationOptions::default()
        };
        assert_eq!(
            resolve(&particle, 0.0, &no_viscosity).unwrap_err(),
            SimError::MissingPhysicalParameter("viscosity")
        );

        let nan_viscosity = SimulationOptions {
            temperature: Some(298.0),
            viscosity: Some(f64::NAN),
            ..SimulationOptions::default()
        };
        assert_eq!(
            resolve(&particle, 0.0, &nan_viscosity).unwrap_err(),
            SimError::MissingPhysicalParameter("viscosity")
        );
    }

    #[test]
    fn equation_name_round_trips() {
        let eq = DiffusionEquation::EinsteinStokes;
        assert_eq!(DiffusionEquation::from_str(eq.as_str()), Some(eq));
        assert_eq!(DiffusionEquation::from_str("perrin"), None);
    }
}
