//! Helper functions for integration tests

use nalgebra::DVector;
use tides_rs::physics::PhysicalModel;
use tides_rs::solver::{Scenario, SimulationResult, TimeBoundaries};

/// Assert that two state vectors are close (within tolerance)
pub fn assert_vectors_close(
    vector1: &DVector<f64>,
    vector2: &DVector<f64>,
    tolerance: f64,
    message: &str,
) {
    assert_eq!(vector1.len(), vector2.len(), "{}: Dimension mismatch", message);

    for (i, (&v1, &v2)) in vector1.iter().zip(vector2.iter()).enumerate() {
        let diff = (v1 - v2).abs();
        assert!(
            diff < tolerance,
            "{}: Element {} differs by {} (tolerance {})",
            message,
            i,
            diff,
            tolerance
        );
    }
}

/// Create a scenario over `[start, end]` with `data_points` samples
pub fn create_scenario(
    model: Box<dyn PhysicalModel>,
    start: f64,
    end: f64,
    data_points: usize,
) -> Scenario {
    Scenario::new(model, TimeBoundaries::new(start, end, data_points))
}

/// Time and state of the last sample
pub fn final_time_and_state(result: &SimulationResult) -> (f64, DVector<f64>) {
    let time = *result.time_points.last().expect("result has no samples");
    let state = result.final_state().expect("result has no samples");
    (time, state)
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.0, 1.0) - 0.0).abs() < 1e-10);
        assert!((relative_error(1.1, 1.0) - 0.1).abs() < 1e-10);
        assert!((relative_error(0.9, 1.0) - 0.1).abs() < 1e-10);
    }
}
