//! Example: Two-Body Earth–Moon orbit - Euler vs RK4 vs adaptive
//!
//! Integrates the Earth–Moon pair over 60 days with the three solvers and
//! compares energy conservation, orbit closure and run time.
//!
//! **Physical System**:
//! - Earth and Moon as point masses
//! - Circular start about the barycentre with the sidereal month
//!
//! Also shows the "fast Moon" experiment: the same system with the Moon
//! launched 1.3× faster moves onto a wide elliptical orbit.

use tides_rs::{
    models::{TwoBody, tidal::VY_M},
    physics::{PhysicalConstants, PhysicalModel, SECONDS_PER_DAY},
    simulation::{Body, Simulation},
    solver::{AdaptiveSolver, EulerSolver, RK4Solver, Solver, TimeBoundaries},
};

use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Two-Body Earth–Moon - Solver Comparison");
    println!("═══════════════════════════════════════════════════════\n");

    let constants = PhysicalConstants::default();
    let boundaries = TimeBoundaries::default_window(150);

    println!("Simulation:");
    println!("  Window      : {}", boundaries);
    println!("  Moon period : {:.3} days\n", constants.moon_period / SECONDS_PER_DAY);

    // ====== Solvers ======

    let solvers: Vec<Box<dyn Solver>> = vec![
        Box::new(EulerSolver::new()),
        Box::new(RK4Solver::new()),
        Box::new(AdaptiveSolver::radau()),
    ];

    println!("{:<22} {:>14} {:>16} {:>10}", "Solver", "Energy drift", "Min distance (km)", "Time");
    for solver in solvers {
        let name = solver.name().to_string();
        let mut simulation = Simulation::new(Box::new(TwoBody::new(constants)), boundaries, solver);

        let start = Instant::now();
        simulation.solve()?;
        let elapsed = start.elapsed();

        let derived = simulation.derived()?;
        let energy = derived.mechanical_energy()?;
        let drift = (energy[energy.len() - 1] - energy[0]).abs() / energy[0].abs();
        let min_distance = derived
            .earth_moon_distance()?
            .into_iter()
            .fold(f64::INFINITY, f64::min);

        println!(
            "{:<22} {:>14.3e} {:>16.1} {:>10.2?}",
            name,
            drift,
            min_distance / 1e3,
            elapsed
        );
    }

    // ====== Fast Moon ======

    println!("\nFast Moon (1.3× orbital velocity):");

    let model = TwoBody::new(constants);
    let mut initial = model.setup_initial_state();
    initial[VY_M] *= 1.3;
    let fast = model.with_initial_conditions(initial);

    let mut simulation = Simulation::new(
        Box::new(fast),
        TimeBoundaries::new(0.0, 120.0 * SECONDS_PER_DAY, 2000),
        Box::new(RK4Solver::new()),
    );
    simulation.solve()?;

    let radius = simulation.derived()?.orbital_radius(Body::Moon)?;
    let max_radius = radius.iter().copied().fold(0.0, f64::max);
    println!(
        "  Moon orbital radius: {:.0} km → max {:.0} km",
        radius[0] / 1e3,
        max_radius / 1e3
    );

    Ok(())
}
