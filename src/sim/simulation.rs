// The simulation controller: owns the particle set, drives the step loop,
// and accumulates the per-step trajectory history.

use super::control::{RunAdmission, SimControl, SimState};
use crate::diffusion::{self, DiffusionCoefficient};
use crate::error::{SimError, SimResult};
use crate::force::{self, Gravity};
use crate::particle::{Particle, ParticleParams, ParticleState, create_particle};
use crate::sampling::DisplacementSampler;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Configuration for one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationOptions {
    /// Number of steps to take (> 0)
    pub steps: usize,
    /// Simulated time interval between steps (> 0)
    pub step_size: f64,
    /// Particles created at construction
    pub particles: Vec<ParticleParams>,
    /// Overrides every particle's own coefficient when set
    pub global_diffusion_coefficient: Option<DiffusionCoefficient>,
    pub gravity: Option<Gravity>,
    /// Medium temperature in Kelvin, required for Einstein–Stokes
    pub temperature: Option<f64>,
    /// Medium dynamic viscosity in Pa·s, required for Einstein–Stokes
    pub viscosity: Option<f64>,
    /// Deterministic displacement sampling when set
    pub seed: Option<u64>,
    /// Print a run report after each `run()` returns
    pub debug: bool,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        SimulationOptions {
            steps: 1,
            step_size: 1.0,
            particles: Vec::new(),
            global_diffusion_coefficient: None,
            gravity: None,
            temperature: None,
            viscosity: None,
            seed: None,
            debug: false,
        }
    }
}

/// Accumulated trajectory history: one snapshot of every particle per
/// committed step, plus the elapsed simulation time of each step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub path: Vec<Vec<ParticleState>>,
    pub times: Vec<f64>,
}

impl SimulationOutput {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A Brownian-motion integrator over a set of particles.
///
/// Owns its particles and history exclusively. Driving it:
/// [`run`](Simulation::run) steps until completion or [`stop`], a
/// [`SimControl`] handle pauses/resumes/stops from another thread, and the
/// accumulated [`SimulationOutput`] comes back from `run`/`stop`.
///
/// [`stop`]: Simulation::stop
#[derive(Debug)]
pub struct Simulation {
    options: SimulationOptions,
    particles: Vec<Particle>,
    sampler: DisplacementSampler,
    control: SimControl,
    /// Index of the next step to process; everything before it is committed
    next_step: usize,
    output: SimulationOutput,
}

impl Simulation {
    /// Validate the step config and build the initial particle set.
    pub fn new(options: SimulationOptions) -> SimResult<Simulation> {
        if options.steps == 0 {
            return Err(SimError::InvalidStepConfig(
                "steps must be greater than zero".to_string(),
            ));
        }
        if !options.step_size.is_finite() || options.step_size <= 0.0 {
            return Err(SimError::InvalidStepConfig(format!(
                "step_size must be finite and greater than zero, got {}",
                options.step_size
            )));
        }

        let particles = options
            .particles
            .iter()
            .map(create_particle)
            .collect::<SimResult<Vec<_>>>()?;

        let sampler = match options.seed {
            Some(seed) => DisplacementSampler::from_seed(seed),
            None => DisplacementSampler::from_entropy(),
        };

        Ok(Simulation {
            options,
            particles,
            sampler,
            control: SimControl::new(),
            next_step: 0,
            output: SimulationOutput::default(),
        })
    }

    /// Validate and append a particle. Insertion order is snapshot order.
    pub fn add_particle(&mut self, params: &ParticleParams) -> SimResult<()> {
        self.particles.push(create_particle(params)?);
        Ok(())
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn state(&self) -> SimState {
        self.control.state()
    }

    /// Cloneable cross-thread pause/resume/stop handle
    pub fn control(&self) -> SimControl {
        self.control.clone()
    }

    pub fn pause(&self) {
        self.control.pause();
    }

    pub fn resume(&self) {
        self.control.resume();
    }

    /// Terminal stop; returns the history accumulated so far.
    pub fn stop(&self) -> SimulationOutput {
        self.control.stop();
        self.output.clone()
    }

    /// History accumulated so far
    pub fn output(&self) -> SimulationOutput {
        self.output.clone()
    }

    /// Drive the step loop from the step after the last committed one.
    ///
    /// Returns when all steps are processed or the simulation is stopped;
    /// blocks while paused. On a stopped simulation this returns the
    /// finalized output without processing further steps.
    pub fn run(&mut self) -> SimResult<SimulationOutput> {
        match self.control.begin_run()? {
            RunAdmission::AlreadyFinalized => return Ok(self.output.clone()),
            RunAdmission::Proceed => {}
        }

        if let Err(err) = self.check_axis_consistency() {
            self.control.finish();
            return Err(err);
        }

        let started = Instant::now();

        while self.next_step < self.options.steps {
            // Cooperative checkpoint: parks while paused, exits on stop
            if !self.control.checkpoint() {
                break;
            }

            let time = self.next_step as f64 * self.options.step_size;
            let snapshot = match self.advance_step(time) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    // The failed step commits nothing; history keeps every
                    // step committed before it
                    self.control.finish();
                    return Err(err);
                }
            };

            self.output.times.push(time);
            self.output.path.push(snapshot);
            self.next_step += 1;

            // Scheduling point between steps
            std::thread::yield_now();
        }

        self.control.finish();

        if self.options.debug {
            self.print_run_report(started);
        }

        Ok(self.output.clone())
    }

    /// Process one step across all particles, in insertion order.
    ///
    /// Updates are computed into fresh copies and committed only when the
    /// whole step succeeded, so a mid-step error leaves both the live
    /// particles and the history untouched.
    fn advance_step(&mut self, time: f64) -> SimResult<Vec<ParticleState>> {
        let step_size = self.options.step_size;
        let mut updated = Vec::with_capacity(self.particles.len());
        let mut snapshot = Vec::with_capacity(self.particles.len());

        for particle in &self.particles {
            let d = diffusion::resolve(particle, time, &self.options)?;
            let variance = 2.0 * d * step_size;
            let (gx, gy, gz) = force::gravity_term(self.options.gravity, particle);

            let dx = gx + self.sampler.sample(variance);
            let dy = gy + self.sampler.sample(variance);
            let dz = particle.z.map(|_| gz + self.sampler.sample(variance));

            let mut next = particle.clone();
            next.x += dx;
            next.y += dy;
            if let (Some(z), Some(dz)) = (next.z.as_mut(), dz) {
                *z += dz;
            }

            let distance_moved = (dx * dx + dy * dy + dz.map_or(0.0, |v| v * v)).sqrt();
            next.distance_moved = distance_moved;
            next.total_distance_moved += distance_moved;
            next.velocity = distance_moved / step_size;

            snapshot.push(next.state());
            updated.push(next);
        }

        self.particles = updated;
        Ok(snapshot)
    }

    // Within one run either all particles carry z or none do
    fn check_axis_consistency(&self) -> SimResult<()> {
        let mut iter = self.particles.iter();
        if let Some(first) = iter.next() {
            let has_z = first.z.is_some();
            if iter.any(|p| p.z.is_some() != has_z) {
                return Err(SimError::AxisMismatch);
            }
        }
        Ok(())
    }

    fn print_run_report(&self, started: Instant) {
        let elapsed = started.elapsed();
        println!("\n{}", "=== BROWNIAN RUN REPORT ===".bold());
        println!(
            "  steps committed: {} / {}",
            self.next_step, self.options.steps
        );
        println!("  particles: {}", self.particles.len());
        println!("  wall time: {:.2}ms", elapsed.as_secs_f64() * 1000.0);
        for (i, particle) in self.particles.iter().enumerate() {
            println!(
                "  {} travelled {:.6} (last step {:.6})",
                format!("particle {i}").cyan(),
                particle.total_distance_moved,
                particle.distance_moved
            );
        }
        println!("{}\n", "=== END RUN REPORT ===".bold());
    }
}
