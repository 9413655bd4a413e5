//! Error types for tides-rs
//!
//! Every fallible operation returns one of the enums below. Each enum covers
//! one layer of the crate:
//!
//! - [`SolverError`]: time integration (grid setup, divergence, adaptive control)
//! - [`ConfigError`]: loading and validating physical constants
//! - [`ParameterError`]: tuning a model parameter at runtime
//! - [`SimulationError`]: running a simulation and reading its solution
//! - [`FitError`]: the ocean mass fitting loop
//!
//! Contract violations (a state vector of the wrong width handed to a model,
//! a solver returning a trajectory that does not match the model layout) are
//! programming errors and panic instead.

use thiserror::Error;

// =================================================================================================
// Solver errors
// =================================================================================================

/// Failure while integrating a scenario
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// The time interval is empty, reversed or non-finite
    #[error("invalid time boundaries: start {start} must be finite and strictly before end {end}")]
    InvalidTimeBoundaries { start: f64, end: f64 },

    /// Zero data points were requested
    #[error("at least one data point is required")]
    NoDataPoints,

    /// The integrated state left the finite domain (NaN or infinity)
    ///
    /// For the tidal models this is typically a collision: a body passing
    /// through another makes the inverse-cube term blow up.
    #[error(
        "non-finite state component {component} at step {step} (t = {time:.6e} s); \
         bodies may have collided or the step size is too large"
    )]
    NonFiniteState {
        step: usize,
        time: f64,
        component: usize,
    },

    /// Tolerances handed to an adaptive integrator are unusable
    #[error("invalid tolerance: {message}")]
    InvalidTolerance { message: String },

    /// The adaptive integrator gave up before reaching the last evaluation time
    #[error("{method} integration failed: {message}")]
    IntegrationFailed { method: String, message: String },
}

// =================================================================================================
// Configuration errors
// =================================================================================================

/// Invalid physical constants
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A quantity that must be strictly positive is not
    #[error("constant `{name}` must be strictly positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    /// A quantity is NaN or infinite
    #[error("constant `{name}` must be finite")]
    NonFinite { name: &'static str },

    /// The YAML document could not be parsed
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

// =================================================================================================
// Parameter errors
// =================================================================================================

/// Failure while setting a tunable model parameter
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// The model does not expose this parameter
    #[error("model `{model}` has no tunable parameter `{parameter}`")]
    Unsupported { model: String, parameter: String },

    /// The value is outside the parameter's physical range
    #[error("invalid value {value} for parameter `{parameter}`")]
    InvalidValue { parameter: String, value: f64 },
}

// =================================================================================================
// Simulation errors
// =================================================================================================

/// Failure while running a simulation or querying its solution
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Integration failed
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// A derived quantity was requested before `solve()` succeeded
    #[error("simulation has not been solved yet")]
    NotSolved,

    /// The solution has no field with this name
    #[error("unknown field `{0}`")]
    UnknownField(String),

    /// Derived quantities need masses the model does not describe
    #[error("model `{model}` does not describe a mass distribution")]
    NoMassDistribution { model: String },

    /// The model has no body with this label (e.g. tide 3 in a two-tide model)
    #[error("model `{model}` has no body `{body}`")]
    UnknownBody { model: String, body: String },
}

// =================================================================================================
// Fitting errors
// =================================================================================================

/// Failure of the ocean mass fitting loop
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    /// The inner simulation failed
    #[error("simulation failed during fitting: {0}")]
    Simulation(#[from] SimulationError),

    /// The model rejected the parameter update
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// The loop ran out of iterations before reaching the tolerance
    #[error(
        "ocean mass fit did not converge after {iterations} iterations \
         (last ratio {ratio:.6}, ocean mass {ocean_mass:.6e} kg)"
    )]
    NonConvergence {
        iterations: usize,
        ratio: f64,
        ocean_mass: f64,
    },

    /// The model produces no Earth spin series to fit against
    #[error("model `{model}` does not expose field `{field}` required for fitting")]
    MissingObservable { model: String, field: &'static str },

    /// Too few samples after the settling period to estimate a drift rate
    #[error("need at least {required} samples to estimate the spin drift, got {available}")]
    InsufficientData { required: usize, available: usize },

    /// The achieved day-length increase cannot drive a proportional update
    #[error("achieved day-length increase {tau:.6e} s is not a positive finite number")]
    DegenerateObservable { tau: f64 },

    /// Fit settings are out of range
    #[error("invalid fit configuration: {message}")]
    InvalidConfiguration { message: String },
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_message_names_step() {
        let error = SolverError::NonFiniteState {
            step: 42,
            time: 3600.0,
            component: 4,
        };
        let message = error.to_string();
        assert!(message.contains("step 42"));
        assert!(message.contains("component 4"));
    }

    #[test]
    fn test_integration_failure_names_method() {
        let error = SolverError::IntegrationFailed {
            method: "Radau".to_string(),
            message: "step size too small".to_string(),
        };
        assert_eq!(error.to_string(), "Radau integration failed: step size too small");
    }

    #[test]
    fn test_solver_error_converts_into_fit_error() {
        let fit: FitError = SimulationError::from(SolverError::NoDataPoints).into();
        assert!(matches!(
            fit,
            FitError::Simulation(SimulationError::Solver(SolverError::NoDataPoints))
        ));
    }

    #[test]
    fn test_yaml_error_converts_into_config_error() {
        let yaml = serde_yaml::from_str::<serde_yaml::Value>("a: [1, 2");
        let error: ConfigError = yaml.unwrap_err().into();
        assert!(error.to_string().starts_with("YAML parsing error"));
    }
}
