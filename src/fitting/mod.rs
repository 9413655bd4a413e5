//! Ocean mass fitting
//!
//! The friction between the tides and the spinning Earth slows the Earth
//! down. How fast depends on the ocean mass carried by the tide particles,
//! which the models cannot derive from first principles. The
//! [`OceanMassFitter`] tunes it until the simulated day-length increase
//! matches the observed one.
//!
//! # Algorithm
//!
//! Each iteration:
//!
//! 1. Solve the simulation with the current ocean mass `m`.
//! 2. Drop the first `settling_fraction` of the samples (transient tide motion).
//! 3. Fit `vphi_E(t)` with a straight line by least squares.
//! 4. Extrapolate the fitted spin `ω₀` over the horizon `H`:
//!    `ω₁ = ω₀ + slope·H` and `τ = 2π (1/ω₁ − 1/ω₀)`.
//! 5. Stop if `|1 − τ/τ_target| ≤ tolerance`, otherwise set
//!    `m ← m · τ_target/τ` and go again.
//!
//! The update is a proportional correction, not a root finder. The
//! iteration count is capped and running out of iterations is reported as
//! [`FitError::NonConvergence`].
//!
//! # Example
//!
//! ```rust,no_run
//! use tides_rs::fitting::{FitConfig, OceanMassFitter};
//! use tides_rs::models::FourBodyComplex;
//! use tides_rs::physics::SECONDS_PER_YEAR;
//! use tides_rs::solver::{RK4Solver, TimeBoundaries};
//!
//! let mut fitter = OceanMassFitter::new(
//!     Box::new(FourBodyComplex::default()),
//!     TimeBoundaries::new(0.0, 2.0 * SECONDS_PER_YEAR, 5000),
//!     Box::new(RK4Solver::new()),
//!     FitConfig::default(),
//! );
//!
//! let report = fitter.fit().unwrap();
//! println!("ocean mass: {:.3e} Gt", report.ocean_mass_gigatonnes());
//! ```

use crate::error::{FitError, ParameterError};
use crate::physics::{PhysicalConstants, PhysicalModel, SECONDS_PER_YEAR, TunableParameter};
use crate::simulation::Simulation;
use crate::solver::{Solver, TimeBoundaries};

/// Field the observable is computed from
pub const SPIN_FIELD: &str = "vphi_E";

/// Samples needed to fit a line
const MIN_REGRESSION_SAMPLES: usize = 2;

// =================================================================================================
// Configuration
// =================================================================================================

/// Settings of the fitting loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitConfig {
    /// Target day-length increase over the horizon (s)
    pub target_tau: f64,

    /// Accepted relative deviation of τ from the target
    pub tolerance: f64,

    /// Maximum number of simulations
    pub max_iterations: usize,

    /// Share of the samples discarded as transient, in [0, 1)
    pub settling_fraction: f64,

    /// Horizon the drift is extrapolated over (s)
    pub extrapolation_horizon: f64,
}

impl FitConfig {
    /// Default settings targeting the observed lengthening in `constants`
    pub fn from_constants(constants: &PhysicalConstants) -> Self {
        Self {
            target_tau: constants.day_lengthening_per_century,
            tolerance: 0.01,
            max_iterations: 20,
            settling_fraction: 0.5,
            extrapolation_horizon: 100.0 * SECONDS_PER_YEAR,
        }
    }

    /// Check every setting is in range
    pub fn validate(&self) -> Result<(), FitError> {
        let invalid = |message: String| Err(FitError::InvalidConfiguration { message });

        if !(self.target_tau.is_finite() && self.target_tau > 0.0) {
            return invalid(format!(
                "target_tau must be positive and finite, got {}",
                self.target_tau
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return invalid(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            ));
        }
        if self.max_iterations == 0 {
            return invalid("max_iterations must be at least 1".to_string());
        }
        if !(0.0..1.0).contains(&self.settling_fraction) {
            return invalid(format!(
                "settling_fraction must be in [0, 1), got {}",
                self.settling_fraction
            ));
        }
        if !(self.extrapolation_horizon.is_finite() && self.extrapolation_horizon > 0.0) {
            return invalid(format!(
                "extrapolation_horizon must be positive and finite, got {}",
                self.extrapolation_horizon
            ));
        }
        Ok(())
    }
}

impl Default for FitConfig {
    fn default() -> Self {
        Self::from_constants(&PhysicalConstants::default())
    }
}

// =================================================================================================
// Progress and report
// =================================================================================================

/// State of the loop after one simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitProgress {
    /// 1-based iteration
    pub iteration: usize,

    /// Ocean mass the simulation ran with (kg)
    pub ocean_mass: f64,

    /// Achieved day-length increase (s)
    pub tau: f64,

    /// τ / τ_target
    pub ratio: f64,
}

/// Result of a converged fit
#[derive(Debug, Clone, PartialEq)]
pub struct FitReport {
    /// Fitted ocean mass (kg)
    pub ocean_mass: f64,

    /// Ocean mass the fit started from (kg)
    pub initial_ocean_mass: f64,

    /// Day-length increase achieved with the fitted mass (s)
    pub tau: f64,

    /// τ / τ_target at the fitted mass
    pub ratio: f64,

    /// Number of simulations run
    pub iterations: usize,

    /// Every iteration, in order
    pub history: Vec<FitProgress>,
}

impl FitReport {
    /// Fitted mass relative to the starting mass
    pub fn ocean_mass_ratio(&self) -> f64 {
        self.ocean_mass / self.initial_ocean_mass
    }

    /// Fitted mass in gigatonnes (10¹² kg)
    pub fn ocean_mass_gigatonnes(&self) -> f64 {
        self.ocean_mass / 1.0e12
    }
}

// =================================================================================================
// Observable
// =================================================================================================

/// Day-length increase over `config.extrapolation_horizon` from a spin series
///
/// Regresses `omega` against `t` over the samples left after the settling
/// fraction. The sign follows the day length: positive when the Earth slows
/// down.
pub fn day_length_increase(t: &[f64], omega: &[f64], config: &FitConfig) -> Result<f64, FitError> {
    assert_eq!(t.len(), omega.len(), "time and spin series must have the same length");

    let first = (t.len() as f64 * config.settling_fraction).floor() as usize;
    let (t, omega) = (&t[first..], &omega[first..]);
    if t.len() < MIN_REGRESSION_SAMPLES {
        return Err(FitError::InsufficientData {
            required: MIN_REGRESSION_SAMPLES,
            available: t.len(),
        });
    }

    let (slope, intercept_at_start) = linear_regression(t, omega);

    let omega0 = intercept_at_start;
    let omega1 = omega0 + slope * config.extrapolation_horizon;

    // 2π (1/ω₁ − 1/ω₀) without cancelling the two large periods
    Ok(-2.0 * std::f64::consts::PI * slope * config.extrapolation_horizon / (omega0 * omega1))
}

/// Least-squares line through `(x, y)`
///
/// Returns the slope and the fitted value at `x[0]`. Works on centred data:
/// the spin varies by parts per million around its mean.
fn linear_regression(x: &[f64], y: &[f64]) -> (f64, f64) {
    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let (covariance, variance) = x.iter().zip(y).fold((0.0, 0.0), |(cov, var), (xi, yi)| {
        let dx = xi - x_mean;
        (cov + dx * (yi - y_mean), var + dx * dx)
    });

    let slope = covariance / variance;
    (slope, y_mean + slope * (x[0] - x_mean))
}

// =================================================================================================
// Fitter
// =================================================================================================

/// Tunes the ocean mass of a model until the day-length drift matches a target
///
/// Owns its [`Simulation`]: the model's ocean mass is updated in place for
/// the duration of the fit and keeps the fitted value afterwards.
#[derive(Debug)]
pub struct OceanMassFitter {
    simulation: Simulation,
    config: FitConfig,
}

impl OceanMassFitter {
    /// Create a fitter around a new simulation
    pub fn new(
        model: Box<dyn PhysicalModel>,
        boundaries: TimeBoundaries,
        solver: Box<dyn Solver>,
        config: FitConfig,
    ) -> Self {
        Self::from_simulation(Simulation::new(model, boundaries, solver), config)
    }

    /// Create a fitter around an existing simulation
    pub fn from_simulation(simulation: Simulation, config: FitConfig) -> Self {
        Self { simulation, config }
    }

    /// Fit settings
    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Simulation being fitted (holds the last solution)
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Give the simulation back
    pub fn into_simulation(self) -> Simulation {
        self.simulation
    }

    /// Run the fit
    pub fn fit(&mut self) -> Result<FitReport, FitError> {
        self.fit_with_observer(|_| {})
    }

    /// Run the fit, handing every iteration to `observer`
    pub fn fit_with_observer<F>(&mut self, mut observer: F) -> Result<FitReport, FitError>
    where
        F: FnMut(&FitProgress),
    {
        self.config.validate()?;

        // ====== Step 1: Check the model can be fitted ======
        let model = self.simulation.model();
        let model_name = model.name().to_string();

        let initial_ocean_mass = model
            .parameter(TunableParameter::OceanMass)
            .ok_or_else(|| ParameterError::Unsupported {
                model: model_name.clone(),
                parameter: TunableParameter::OceanMass.to_string(),
            })?;

        if !model.field_names().iter().any(|name| name == SPIN_FIELD) {
            return Err(FitError::MissingObservable {
                model: model_name,
                field: SPIN_FIELD,
            });
        }

        log::info!(
            "Fitting ocean mass of `{}`: start {:.6e} kg, target τ = {:.6e} s",
            model_name,
            initial_ocean_mass,
            self.config.target_tau
        );

        // ====== Step 2: Proportional correction loop ======
        let mut ocean_mass = initial_ocean_mass;
        let mut history = Vec::with_capacity(self.config.max_iterations);

        for iteration in 1..=self.config.max_iterations {
            let solution = self.simulation.solve()?;
            let tau = day_length_increase(solution.t(), solution.field(SPIN_FIELD)?, &self.config)?;

            if !(tau.is_finite() && tau > 0.0) {
                return Err(FitError::DegenerateObservable { tau });
            }

            let ratio = tau / self.config.target_tau;
            let progress = FitProgress {
                iteration,
                ocean_mass,
                tau,
                ratio,
            };
            history.push(progress);
            observer(&progress);

            log::info!(
                "Iteration {}: ocean mass {:.6e} kg, τ = {:.6e} s, ratio {:.6}",
                iteration,
                ocean_mass,
                tau,
                ratio
            );

            if (1.0 - ratio).abs() <= self.config.tolerance {
                log::info!(
                    "Ocean mass converged after {} iterations: {:.6e} kg ({:.4} × start)",
                    iteration,
                    ocean_mass,
                    ocean_mass / initial_ocean_mass
                );
                return Ok(FitReport {
                    ocean_mass,
                    initial_ocean_mass,
                    tau,
                    ratio,
                    iterations: iteration,
                    history,
                });
            }

            if iteration == self.config.max_iterations {
                break;
            }

            ocean_mass /= ratio;
            self.simulation
                .model_mut()
                .set_parameter(TunableParameter::OceanMass, ocean_mass)?;
        }

        // ====== Step 3: Out of iterations ======
        let ratio = history.last().map_or(f64::NAN, |progress| progress.ratio);
        log::warn!(
            "Ocean mass fit did not converge after {} iterations (ratio {:.6})",
            self.config.max_iterations,
            ratio
        );

        Err(FitError::NonConvergence {
            iterations: self.config.max_iterations,
            ratio,
            ocean_mass,
        })
    }
}

// =================================================================================================
// Tests
// =================================================================================================
