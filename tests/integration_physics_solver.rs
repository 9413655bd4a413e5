//! Integration tests: models + solvers + simulation
//!
//! These tests verify that the Earth–Moon models, the solvers and the
//! simulation facade work correctly together.

use nalgebra::DVector;
use tides_rs::models::{FourBodyComplex, FourBodySimple, NBody, TwoBody};
use tides_rs::physics::{PhysicalConstants, PhysicalModel, SECONDS_PER_DAY};
use tides_rs::simulation::{Body, Simulation};
use tides_rs::solver::{
    AdaptiveSolver, EulerSolver, IntegrationMethod, IvpIntegrator, RK4Solver, Scenario, Solver,
    TimeBoundaries,
};

mod common;
use common::{ConstantGrowth, ExponentialDecay, assert_vectors_close, create_scenario};
use common::test_helpers::relative_error;

fn simulate(model: Box<dyn PhysicalModel>, solver: Box<dyn Solver>, points: usize) -> Simulation {
    let mut simulation = Simulation::new(model, TimeBoundaries::default_window(points), solver);
    simulation.solve().unwrap();
    simulation
}

/// Relative change of the mechanical energy between first and last sample
fn energy_drift(simulation: &Simulation) -> f64 {
    let energy = simulation.derived().unwrap().mechanical_energy().unwrap();
    relative_error(energy[energy.len() - 1], energy[0])
}

// =================================================================================================
// Basic Integration Tests
// =================================================================================================

#[test]
fn test_euler_with_exponential_decay() {
    let scenario = create_scenario(Box::new(ExponentialDecay::new(5, 0.1)), 0.0, 10.0, 1000);
    let result = EulerSolver::new().solve(&scenario).unwrap();

    // Half-open grid: 1000 samples, the last one at 10 - dt
    assert_eq!(result.time_points.len(), 1000);
    assert!(result.time_points[0].abs() < 1e-10);
    assert!((result.time_points[999] - 9.99).abs() < 1e-10);

    let final_value = result.final_state().unwrap()[0];
    let expected = (-0.1 * 9.99f64).exp();

    // Euler with dt=0.01 should have ~1% error
    let error = relative_error(final_value, expected);
    assert!(error < 0.02, "Error {} too large", error);
}

#[test]
fn test_euler_is_exact_for_constant_growth() {
    let scenario = create_scenario(Box::new(ConstantGrowth::new(3, 2.0)), 0.0, 5.0, 10);
    let result = EulerSolver::new().solve(&scenario).unwrap();

    // y(4.5) = 0 + 2*4.5
    let final_value = result.final_state().unwrap()[0];
    assert!((final_value - 9.0).abs() < 1e-10);
}

#[test]
fn test_single_data_point_returns_initial_state() {
    for solver in [
        Box::new(EulerSolver::new()) as Box<dyn Solver>,
        Box::new(RK4Solver::new()),
        Box::new(AdaptiveSolver::radau()),
    ] {
        let model = TwoBody::default();
        let initial = model.setup_initial_state();
        let scenario = Scenario::new(Box::new(model), TimeBoundaries::default_window(1));

        let result = solver.solve(&scenario).unwrap();
        assert_eq!(result.time_points, vec![0.0], "{}", solver.name());
        assert_eq!(result.state_at(0), initial, "{}", solver.name());
    }
}

// =================================================================================================
// Conservation
// =================================================================================================

#[test]
fn test_two_body_energy_conservation() {
    let rk4 = simulate(Box::new(TwoBody::default()), Box::new(RK4Solver::new()), 150);
    let euler = simulate(Box::new(TwoBody::default()), Box::new(EulerSolver::new()), 150);

    let rk4_drift = energy_drift(&rk4);
    let euler_drift = energy_drift(&euler);
    println!("Energy drift: RK4 {rk4_drift:.3e}, Euler {euler_drift:.3e}");

    assert!(rk4_drift < 0.01, "RK4 energy drift {rk4_drift}");
    assert!(euler_drift > rk4_drift);
}

#[test]
fn test_two_body_orbit_closes_after_one_period() {
    let simulation = simulate(Box::new(TwoBody::default()), Box::new(RK4Solver::new()), 150);
    let solution = simulation.solution().unwrap();

    let period = PhysicalConstants::default().moon_period;
    let t = solution.t();
    let k = (0..t.len())
        .min_by(|&a, &b| (t[a] - period).abs().total_cmp(&(t[b] - period).abs()))
        .unwrap();

    let x_e = solution.get("x_E").unwrap();
    let radius = simulation.derived().unwrap().orbital_radius(Body::Earth).unwrap()[0];

    assert!(
        (x_e[k] - x_e[0]).abs() < 0.05 * radius,
        "x_E moved by {} after one period (radius {})",
        (x_e[k] - x_e[0]).abs(),
        radius
    );
}

#[test]
fn test_centre_of_mass_stays_put() {
    let simulation = simulate(Box::new(TwoBody::default()), Box::new(RK4Solver::new()), 150);
    let com = simulation.derived().unwrap().center_of_mass().unwrap();

    // Initial momentum is zero and the barycentre is at the origin
    let distance = PhysicalConstants::default().moon_distance;
    for (x, y) in com.x.iter().zip(&com.y) {
        assert!(x.hypot(*y) < 1e-6 * distance);
    }
}

// =================================================================================================
// Solutions of every model
// =================================================================================================

#[test]
fn test_every_model_has_consistent_lengths() {
    let models: Vec<Box<dyn PhysicalModel>> = vec![
        Box::new(TwoBody::default()),
        Box::new(FourBodySimple::default()),
        Box::new(FourBodyComplex::default()),
        Box::new(NBody::default()),
    ];

    for model in models {
        let name = model.name().to_string();
        let dimension = model.dimension();
        let simulation = simulate(model, Box::new(RK4Solver::new()), 120);
        let solution = simulation.solution().unwrap();

        assert_eq!(solution.len(), 120, "{name}");
        assert_eq!(solution.field_names().len(), dimension, "{name}");
        for (field, series) in solution.iter() {
            assert_eq!(series.len(), 120, "{name}: {field}");
            assert!(series.iter().all(|v| v.is_finite()), "{name}: {field}");
        }
    }
}

#[test]
fn test_four_body_complex_fields() {
    let simulation = simulate(
        Box::new(FourBodyComplex::default()),
        Box::new(RK4Solver::new()),
        60,
    );
    let solution = simulation.solution().unwrap();

    for key in [
        "x_E", "vx_E", "y_E", "vy_E", "x_M", "vx_M", "y_M", "vy_M", "phi1", "vphi1", "phi2",
        "vphi2", "phi_E", "vphi_E",
    ] {
        let series = solution.get(key).unwrap_or_else(|| panic!("missing {key}"));
        assert!(!series.is_empty(), "{key}");
    }
}

#[test]
fn test_solve_is_idempotent() {
    let scenario = Scenario::new(
        Box::new(FourBodyComplex::default()),
        TimeBoundaries::default_window(80),
    );

    for solver in [
        Box::new(EulerSolver::new()) as Box<dyn Solver>,
        Box::new(RK4Solver::new()),
    ] {
        let first = solver.solve(&scenario).unwrap();
        let second = solver.solve(&scenario).unwrap();
        assert_eq!(first, second, "{}", solver.name());
    }
}

#[test]
fn test_tides_stay_on_earth_surface() {
    let simulation = simulate(
        Box::new(NBody::new(PhysicalConstants::default(), 4)),
        Box::new(RK4Solver::new()),
        50,
    );
    let derived = simulation.derived().unwrap();
    let radius = PhysicalConstants::default().earth_radius;

    for i in 1..=4 {
        let distance = derived.tide_distance_to_earth(i).unwrap();
        assert!(distance.iter().all(|d| relative_error(*d, radius) < 1e-9), "tide {i}");
    }
    assert!(derived.position(Body::Tide(5)).is_err());
}

#[test]
fn test_friction_lengthens_the_day() {
    let constants = PhysicalConstants::default();
    let mut simulation = Simulation::new(
        Box::new(FourBodyComplex::new(constants)),
        TimeBoundaries::new(0.0, 30.0 * SECONDS_PER_DAY, 2000),
        Box::new(RK4Solver::new()),
    );
    simulation.solve().unwrap();

    let day = simulation.derived().unwrap().day_length().unwrap();
    assert!(day[day.len() - 1] > day[0]);
}

// =================================================================================================
// Adaptive solver
// =================================================================================================

#[test]
fn test_adaptive_matches_rk4_on_two_body() {
    let boundaries = TimeBoundaries::new(0.0, 10.0 * SECONDS_PER_DAY, 11);
    let scenario = Scenario::new(Box::new(TwoBody::default()), boundaries);

    let integrator = IvpIntegrator::new(IntegrationMethod::Dop853).with_tolerances(1e-10, 1e-6);
    let adaptive = AdaptiveSolver::new(integrator).solve(&scenario).unwrap();
    assert_eq!(adaptive.time_points, boundaries.evaluation_grid());
    assert_eq!(adaptive.time_points[10], 10.0 * SECONDS_PER_DAY);

    // Fine RK4 run ending at the same time
    let fine = TimeBoundaries::new(0.0, 10.0 * SECONDS_PER_DAY + 864.0, 1001);
    let rk4 = RK4Solver::new()
        .solve(&Scenario::new(Box::new(TwoBody::default()), fine))
        .unwrap();
    assert!((rk4.time_points[1000] - 10.0 * SECONDS_PER_DAY).abs() < 1e-6);

    let adaptive_final: DVector<f64> = adaptive.final_state().unwrap();
    let rk4_final = rk4.final_state().unwrap();

    // Positions agree to within a kilometre
    let positions = |state: &DVector<f64>| {
        DVector::from_vec(vec![state[0], state[2], state[4], state[6]])
    };
    assert_vectors_close(&positions(&adaptive_final), &positions(&rk4_final), 1.0e3, "positions");
}
