// Statistical calibration of the displacement distribution
//
// These tests run long trajectories and check the sampled moments against
// the diffusion theory they implement: per-axis steps are N(0, 2*D*dt),
// gravity adds a constant mass-scaled drift and leaves the spread alone.

use brownian_sim::assert_deviation;
use brownian_sim::diffusion::{DiffusionCoefficient, DiffusionEquation};
use brownian_sim::force::Gravity;
use brownian_sim::particle::ParticleParams;
use brownian_sim::sim::{Simulation, SimulationOptions, SimulationOutput};
use brownian_sim::stats::{mean, sample_variance};

/// Per-axis displacement series recovered from a single-particle trajectory
fn axis_displacements(output: &SimulationOutput, start: (f64, f64)) -> (Vec<f64>, Vec<f64>) {
    let mut dx = Vec::with_capacity(output.path.len());
    let mut dy = Vec::with_capacity(output.path.len());
    let (mut prev_x, mut prev_y) = start;
    for step in &output.path {
        dx.push(step[0].x - prev_x);
        dy.push(step[0].y - prev_y);
        prev_x = step[0].x;
        prev_y = step[0].y;
    }
    (dx, dy)
}

#[test]
fn per_axis_displacement_matches_diffusion_theory() {
    let d = 0.01;
    let step_size = 0.1;
    let steps = 20_000;

    let mut sim = Simulation::new(SimulationOptions {
        steps,
        step_size,
        particles: vec![ParticleParams {
            diffusion_coefficient: DiffusionCoefficient::Constant(d),
            ..ParticleParams::default()
        }],
        seed: Some(1701),
        ..SimulationOptions::default()
    })
    .unwrap();

    let output = sim.run().unwrap();
    let (dx, dy) = axis_displacements(&output, (0.0, 0.0));

    let expected_variance = 2.0 * d * step_size;
    println!("📐 expected per-axis variance: {expected_variance:.6}");

    for (axis, series) in [("x", &dx), ("y", &dy)] {
        let m = mean(series);
        let v = sample_variance(series);
        println!("   axis {axis}: mean {m:+.6}, variance {v:.6}");

        // mean of n samples has standard error sqrt(variance / n)
        let tolerance = 4.0 * (expected_variance / steps as f64).sqrt();
        assert!(
            m.abs() < tolerance,
            "axis {axis} mean {m} outside ±{tolerance}"
        );
        assert_deviation!(v, expected_variance, 5.0, "axis {} variance", axis);
    }
}

#[test]
fn zero_gravity_is_indistinguishable_from_no_gravity() {
    let options = |gravity: Option<Gravity>| SimulationOptions {
        steps: 2_000,
        step_size: 0.1,
        particles: vec![ParticleParams {
            diffusion_coefficient: DiffusionCoefficient::Constant(0.01),
            ..ParticleParams::default()
        }],
        gravity,
        seed: Some(4242),
        ..SimulationOptions::default()
    };

    let without = Simulation::new(options(None)).unwrap().run().unwrap();
    let with_zero = Simulation::new(options(Some(Gravity::ZERO)))
        .unwrap()
        .run()
        .unwrap();

    // same seed, zero drift term: trajectories are bit-identical
    assert_eq!(without, with_zero);
}

#[test]
fn gravity_shifts_the_mean_and_leaves_the_spread() {
    let d = 0.01;
    let step_size = 0.1;
    let steps = 20_000;
    let mass = 2.0;
    let gx = 0.5;

    let mut sim = Simulation::new(SimulationOptions {
        steps,
        step_size,
        particles: vec![ParticleParams {
            mass,
            diffusion_coefficient: DiffusionCoefficient::Constant(d),
            ..ParticleParams::default()
        }],
        gravity: Some(Gravity {
            x: gx,
            y: 0.0,
            z: 0.0,
        }),
        seed: Some(90210),
        ..SimulationOptions::default()
    })
    .unwrap();

    let output = sim.run().unwrap();
    let (dx, dy) = axis_displacements(&output, (0.0, 0.0));

    let drift = gx * mass;
    let expected_variance = 2.0 * d * step_size;
    println!("🧲 expected drift {drift:.3}, per-axis variance {expected_variance:.6}");
    println!(
        "   observed: x mean {:+.6}, x variance {:.6}, y mean {:+.6}",
        mean(&dx),
        sample_variance(&dx),
        mean(&dy)
    );

    assert_deviation!(mean(&dx), drift, 1.0, "drifted axis mean");
    assert_deviation!(sample_variance(&dx), expected_variance, 5.0);
    let tolerance = 4.0 * (expected_variance / steps as f64).sqrt();
    assert!(mean(&dy).abs() < tolerance, "undrifted axis should stay centered");
}

#[test]
fn einstein_stokes_coefficient_drives_the_spread() {
    // micron bead in water at 298 K
    let temperature = 298.0;
    let viscosity = 8.9e-4;
    let radius = 1.0e-6;
    let step_size = 0.1;
    let steps = 20_000;

    let mut sim = Simulation::new(SimulationOptions {
        steps,
        step_size,
        particles: vec![ParticleParams {
            diffusion_coefficient: DiffusionCoefficient::Equation(
                DiffusionEquation::EinsteinStokes,
            ),
            radius: Some(radius),
            ..ParticleParams::default()
        }],
        temperature: Some(temperature),
        viscosity: Some(viscosity),
        seed: Some(777),
        ..SimulationOptions::default()
    })
    .unwrap();

    let output = sim.run().unwrap();
    let (dx, dy) = axis_displacements(&output, (0.0, 0.0));

    let d = 1.38064852e-23 * temperature / (6.0 * std::f64::consts::PI * viscosity * radius);
    let expected_variance = 2.0 * d * step_size;
    println!("🔬 Einstein-Stokes D = {d:.4e}, expected variance {expected_variance:.4e}");
    println!(
        "   observed variances: x {:.4e}, y {:.4e}",
        sample_variance(&dx),
        sample_variance(&dy)
    );

    assert_deviation!(sample_variance(&dx), expected_variance, 5.0);
    assert_deviation!(sample_variance(&dy), expected_variance, 5.0);
}

#[test]
fn total_distance_accumulates_every_step() {
    let mut sim = Simulation::new(SimulationOptions {
        steps: 500,
        step_size: 0.1,
        particles: vec![ParticleParams {
            diffusion_coefficient: DiffusionCoefficient::Constant(0.01),
            ..ParticleParams::default()
        }],
        seed: Some(8),
        ..SimulationOptions::default()
    })
    .unwrap();

    let output = sim.run().unwrap();

    let summed: f64 = output.path.iter().map(|step| step[0].distance_moved).sum();
    let last = &output.path[output.path.len() - 1][0];
    assert_deviation!(last.total_distance_moved, summed, 1e-6);

    // velocity is the last step's distance over the step size
    for step in &output.path {
        assert_deviation!(step[0].velocity, step[0].distance_moved / 0.1, 1e-6);
    }
}
