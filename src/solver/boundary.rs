//! Time boundaries of an integration
//!
//! # Design Philosophy
//!
//! The Earth–Moon models are pure initial value problems: the only boundary
//! is the time interval and how densely it is sampled. `TimeBoundaries`
//! carries `(start, end, data_points)` and knows the two sampling grids the
//! solvers use:
//!
//! - **fixed-step grid** (Euler, RK4): `t_k = start + k·h` for
//!   `k = 0..data_points` with `h = (end − start) / data_points`. The grid is
//!   half-open, so `end` itself is never reached.
//! - **evaluation grid** (adaptive solvers): `data_points` points evenly
//!   spaced over the closed interval, first = `start`, last = `end`.

use std::fmt;

use crate::error::SolverError;
use crate::physics::DEFAULT_TIME_BOUNDARIES;

// =================================================================================================
// Time Boundaries
// =================================================================================================

/// Integration interval and sampling density
///
/// # Examples
///
/// ```rust
/// use tides_rs::solver::TimeBoundaries;
///
/// let boundaries = TimeBoundaries::new(0.0, 10.0, 5);
/// assert_eq!(boundaries.step_size(), 2.0);
/// assert_eq!(boundaries.fixed_step_grid(), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
/// assert_eq!(boundaries.evaluation_grid(), vec![0.0, 2.5, 5.0, 7.5, 10.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeBoundaries {
    /// Start time t₀ (s)
    pub start: f64,

    /// End time t₁ (s)
    pub end: f64,

    /// Number of sampled time points
    pub data_points: usize,
}

impl TimeBoundaries {
    /// Create boundaries (not validated, see [`validate`](Self::validate))
    pub fn new(start: f64, end: f64, data_points: usize) -> Self {
        Self {
            start,
            end,
            data_points,
        }
    }

    /// Default 60-day window with `data_points` samples
    pub fn default_window(data_points: usize) -> Self {
        let (start, end) = DEFAULT_TIME_BOUNDARIES;
        Self::new(start, end, data_points)
    }

    /// Check `start < end` (both finite) and `data_points ≥ 1`
    pub fn validate(&self) -> Result<(), SolverError> {
        if !(self.start.is_finite() && self.end.is_finite() && self.start < self.end) {
            return Err(SolverError::InvalidTimeBoundaries {
                start: self.start,
                end: self.end,
            });
        }
        if self.data_points == 0 {
            return Err(SolverError::NoDataPoints);
        }
        Ok(())
    }

    /// Length of the interval t₁ − t₀
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Fixed step h = (t₁ − t₀) / data_points
    pub fn step_size(&self) -> f64 {
        self.duration() / self.data_points as f64
    }

    /// Time of fixed-step sample `k`
    ///
    /// Computed from the index rather than by accumulating `h`, so rounding
    /// errors do not build up along the trajectory.
    pub fn fixed_step_time(&self, k: usize) -> f64 {
        self.start + k as f64 * self.step_size()
    }

    /// Half-open fixed-step grid `t_k = t₀ + k·h`, `k = 0..data_points`
    pub fn fixed_step_grid(&self) -> Vec<f64> {
        (0..self.data_points).map(|k| self.fixed_step_time(k)).collect()
    }

    /// Closed, evenly spaced grid over `[t₀, t₁]`
    ///
    /// A single data point yields `[t₀]`. The last point is exactly `t₁`.
    pub fn evaluation_grid(&self) -> Vec<f64> {
        match self.data_points {
            0 => Vec::new(),
            1 => vec![self.start],
            n => {
                let spacing = self.duration() / (n - 1) as f64;
                (0..n)
                    .map(|k| {
                        if k == n - 1 {
                            self.end
                        } else {
                            self.start + k as f64 * spacing
                        }
                    })
                    .collect()
            }
        }
    }
}

impl Default for TimeBoundaries {
    fn default() -> Self {
        Self::default_window(1000)
    }
}

impl fmt::Display for TimeBoundaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.6e} s, {:.6e} s] with {} points",
            self.start, self.end, self.data_points
        )
    }
}

// =================================================================================================
// Tests
// =================================================================================================
