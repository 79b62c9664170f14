// Deterministic force integration
//
// Gravity adds a constant, mass-scaled term to each coordinate before the
// stochastic displacement is applied. It never scales the noise variance.

use crate::particle::Particle;
use serde::{Deserialize, Serialize};

/// Constant gravitational acceleration acting on every particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gravity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Gravity {
    pub const ZERO: Gravity = Gravity {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

/// Per-axis additive displacement `g_axis * mass` for one step.
///
/// The z component is dropped for particles without a z coordinate; with no
/// gravity configured the term is zero on every axis.
pub fn gravity_term(gravity: Option<Gravity>, particle: &Particle) -> (f64, f64, f64) {
    match gravity {
        None => (0.0, 0.0, 0.0),
        Some(g) => (
            g.x * particle.mass,
            g.y * particle.mass,
            if particle.z.is_some() {
                g.z * particle.mass
            } else {
                0.0
            },
        ),
    }
}
