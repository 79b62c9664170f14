// Minimal unit-step random walk
//
// The simplest trajectory generator in the crate: every step moves one unit
// of distance in a uniformly random direction. For diffusion-scaled motion,
// gravity, or pause/resume control use `sim::Simulation` instead.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use std::f64::consts::TAU;

#[derive(Debug, Clone)]
pub struct RandomWalkOptions {
    pub start_x: f64,
    pub start_y: f64,
    /// Number of recorded positions, including the starting point
    pub steps: usize,
    /// Deterministic walk when set
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RandomWalkOutput {
    /// `[x, y]` positions, starting position first
    pub path: Vec<[f64; 2]>,
    /// Sum of step lengths along the path
    pub total_distance: f64,
}

/// Generate a unit-step random-walk path.
pub fn random_walk(options: &RandomWalkOptions) -> RandomWalkOutput {
    let mut rng = match options.seed {
        Some(seed) => ChaChaRng::seed_from_u64(seed),
        None => ChaChaRng::from_os_rng(),
    };

    let mut x = options.start_x;
    let mut y = options.start_y;
    let mut path = Vec::with_capacity(options.steps);
    path.push([x, y]);

    for _ in 1..options.steps {
        let theta = rng.random_range(0.0..TAU);
        x += theta.cos();
        y += theta.sin();
        path.push([x, y]);
    }

    let total_distance = path.len().saturating_sub(1) as f64;
    RandomWalkOutput {
        path,
        total_distance,
    }
}
