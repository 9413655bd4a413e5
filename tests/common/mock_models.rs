//! Mock physical models for testing
//!
//! These models have known analytical solutions, making them
//! ideal for validating numerical solver accuracy.

use nalgebra::DVector;
use tides_rs::physics::PhysicalModel;

// =================================================================================================
// Exponential Decay: dy/dt = -k*y
// =================================================================================================

/// Exponential decay model: dy/dt = -k*y
///
/// Analytical solution: y(t) = y₀ * exp(-k*t)
///
/// Useful for testing solver accuracy since we know the exact solution.
pub struct ExponentialDecay {
    pub dimension: usize,
    pub decay_rate: f64, // k in dy/dt = -k*y
}

impl ExponentialDecay {
    pub fn new(dimension: usize, decay_rate: f64) -> Self {
        Self {
            dimension,
            decay_rate,
        }
    }

    /// Compute analytical solution at time t
    pub fn analytical_solution(&self, t: f64, y0: f64) -> f64 {
        y0 * (-self.decay_rate * t).exp()
    }
}

impl PhysicalModel for ExponentialDecay {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn compute_physics(&self, _t: f64, state: &DVector<f64>) -> DVector<f64> {
        state * -self.decay_rate
    }

    fn setup_initial_state(&self) -> DVector<f64> {
        DVector::from_element(self.dimension, 1.0)
    }

    fn name(&self) -> &str {
        "Exponential Decay"
    }
}

// =================================================================================================
// Constant Growth: dy/dt = c
// =================================================================================================

/// Constant growth model: dy/dt = c
///
/// Analytical solution: y(t) = y₀ + c*t
///
/// Euler is exact for this problem, RK4 should also be exact.
pub struct ConstantGrowth {
    pub dimension: usize,
    pub growth_rate: f64,
}

impl ConstantGrowth {
    pub fn new(dimension: usize, growth_rate: f64) -> Self {
        Self {
            dimension,
            growth_rate,
        }
    }

    /// Compute analytical solution at time t
    pub fn analytical_solution(&self, t: f64, y0: f64) -> f64 {
        y0 + self.growth_rate * t
    }
}

impl PhysicalModel for ConstantGrowth {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn compute_physics(&self, _t: f64, _state: &DVector<f64>) -> DVector<f64> {
        DVector::from_element(self.dimension, self.growth_rate)
    }

    fn setup_initial_state(&self) -> DVector<f64> {
        DVector::zeros(self.dimension)
    }

    fn name(&self) -> &str {
        "Constant Growth"
    }
}

// =================================================================================================
// Harmonic Oscillator: x'' = -ω² x
// =================================================================================================

/// Harmonic oscillator as a first-order system `[x, v]`
///
/// Analytical solution from x(0) = 1, v(0) = 0: x(t) = cos(ωt)
///
/// Conserves E = ½v² + ½ω²x², the smallest stand-in for an orbit.
pub struct HarmonicOscillator {
    pub omega: f64,
}

impl HarmonicOscillator {
    pub fn new(omega: f64) -> Self {
        Self { omega }
    }

    /// Position at time t
    pub fn analytical_solution(&self, t: f64) -> f64 {
        (self.omega * t).cos()
    }

    /// Energy of a state
    pub fn energy(&self, state: &DVector<f64>) -> f64 {
        0.5 * state[1] * state[1] + 0.5 * self.omega * self.omega * state[0] * state[0]
    }
}

impl PhysicalModel for HarmonicOscillator {
    fn dimension(&self) -> usize {
        2
    }

    fn compute_physics(&self, _t: f64, state: &DVector<f64>) -> DVector<f64> {
        DVector::from_vec(vec![state[1], -self.omega * self.omega * state[0]])
    }

    fn setup_initial_state(&self) -> DVector<f64> {
        DVector::from_vec(vec![1.0, 0.0])
    }

    fn field_names(&self) -> Vec<String> {
        vec!["x".to_string(), "v".to_string()]
    }

    fn name(&self) -> &str {
        "Harmonic Oscillator"
    }
}

// =================================================================================================
// Tests for Mock Models
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_decay_analytical() {
        let model = ExponentialDecay::new(5, 0.5);

        // y(0) = 1.0
        assert!((model.analytical_solution(0.0, 1.0) - 1.0).abs() < 1e-10);

        // y(1) = exp(-0.5) ≈ 0.6065
        let y1 = model.analytical_solution(1.0, 1.0);
        assert!((y1 - 0.6065306597).abs() < 1e-6);
    }

    #[test]
    fn test_constant_growth_analytical() {
        let model = ConstantGrowth::new(5, 2.0);

        // y(5) = 0 + 2*5 = 10.0
        assert!((model.analytical_solution(5.0, 0.0) - 10.0).abs() < 1e-10);
    }
}
