// Stochastic displacement sampling via the Box–Muller transform

use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use std::f64::consts::PI;

/// Draws independent, zero-mean, given-variance normal samples, one per
/// spatial axis per step.
///
/// Backed by a ChaCha stream cipher: cryptographically strong when seeded
/// from the OS, bit-reproducible when seeded explicitly.
#[derive(Debug)]
pub struct DisplacementSampler {
    rng: ChaChaRng,
}

impl DisplacementSampler {
    /// Sampler seeded from OS entropy
    pub fn from_entropy() -> Self {
        DisplacementSampler {
            rng: ChaChaRng::from_os_rng(),
        }
    }

    /// Deterministic sampler for reproducible runs
    pub fn from_seed(seed: u64) -> Self {
        DisplacementSampler {
            rng: ChaChaRng::seed_from_u64(seed),
        }
    }

    /// One N(0, variance) sample via Box–Muller:
    /// `sqrt(variance) * sqrt(-2 ln u) * cos(2π v)` with `u, v` uniform in (0, 1).
    pub fn sample(&mut self, variance: f64) -> f64 {
        let u = self.uniform_open();
        let v = self.uniform_open();
        variance.sqrt() * (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
    }

    // Uniform in (0, 1); a zero draw is resampled so ln(u) stays finite
    fn uniform_open(&mut self) -> f64 {
        loop {
            let u: f64 = self.rng.random();
            if u > 0.0 {
                return u;
            }
        }
    }
}
