//! Quantities derived from a solved Earth–Moon simulation
//!
//! Everything here is computed from the [`Solution`] columns and the model's
//! [`MassDistribution`]; nothing is integrated again.
//!
//! Tide particle `i` (1-based, matching the `phi{i}` fields) sits at
//!
//! ```text
//! x_Fi  = x_E + r_E cos φᵢ          y_Fi  = y_E + r_E sin φᵢ
//! vx_Fi = vx_E − r_E sin φᵢ · φ̇ᵢ     vy_Fi = vy_E + r_E cos φᵢ · φ̇ᵢ
//! ```

use std::f64::consts::PI;
use std::fmt;

use crate::error::SimulationError;
use crate::physics::MassDistribution;
use crate::simulation::Solution;

// =================================================================================================
// Bodies and planar series
// =================================================================================================

/// A body whose trajectory can be derived from a solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Earth,
    Moon,
    /// Tide particle, 1-based
    Tide(usize),
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Earth => write!(f, "Earth"),
            Body::Moon => write!(f, "Moon"),
            Body::Tide(i) => write!(f, "tide {i}"),
        }
    }
}

/// Time series of a planar vector
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl PlanarSeries {
    /// Euclidean norm at every sample
    pub fn norm(&self) -> Vec<f64> {
        self.x.iter().zip(&self.y).map(|(x, y)| x.hypot(*y)).collect()
    }

    /// Distance to another series at every sample
    pub fn distance_to(&self, other: &PlanarSeries) -> Vec<f64> {
        self.x
            .iter()
            .zip(&self.y)
            .zip(other.x.iter().zip(&other.y))
            .map(|((x1, y1), (x2, y2))| (x1 - x2).hypot(y1 - y2))
            .collect()
    }
}

// =================================================================================================
// Derived quantities
// =================================================================================================

/// Read-only view computing physical quantities from a solution
#[derive(Debug, Clone)]
pub struct DerivedQuantities<'a> {
    solution: &'a Solution,
    masses: MassDistribution,
    model: String,
}

impl<'a> DerivedQuantities<'a> {
    /// Build the view
    pub fn new(solution: &'a Solution, masses: MassDistribution, model: &str) -> Self {
        Self {
            solution,
            masses,
            model: model.to_string(),
        }
    }

    /// Masses the quantities are computed with
    pub fn masses(&self) -> &MassDistribution {
        &self.masses
    }

    fn column(&self, name: &str) -> Result<&'a [f64], SimulationError> {
        self.solution.field(name)
    }

    fn tide_columns(&self, i: usize) -> Result<(&'a [f64], &'a [f64]), SimulationError> {
        let unknown = || SimulationError::UnknownBody {
            model: self.model.clone(),
            body: Body::Tide(i).to_string(),
        };
        let phi = self.solution.get(&format!("phi{i}")).ok_or_else(unknown)?;
        let vphi = self.solution.get(&format!("vphi{i}")).ok_or_else(unknown)?;
        Ok((phi, vphi))
    }

    /// Position of a body at every sample
    pub fn position(&self, body: Body) -> Result<PlanarSeries, SimulationError> {
        match body {
            Body::Earth => Ok(PlanarSeries {
                x: self.column("x_E")?.to_vec(),
                y: self.column("y_E")?.to_vec(),
            }),
            Body::Moon => Ok(PlanarSeries {
                x: self.column("x_M")?.to_vec(),
                y: self.column("y_M")?.to_vec(),
            }),
            Body::Tide(i) => {
                let (phi, _) = self.tide_columns(i)?;
                let (x_e, y_e) = (self.column("x_E")?, self.column("y_E")?);
                let r = self.masses.earth_radius;

                Ok(PlanarSeries {
                    x: phi.iter().zip(x_e).map(|(p, x)| x + r * p.cos()).collect(),
                    y: phi.iter().zip(y_e).map(|(p, y)| y + r * p.sin()).collect(),
                })
            }
        }
    }

    /// Velocity of a body at every sample
    pub fn velocity(&self, body: Body) -> Result<PlanarSeries, SimulationError> {
        match body {
            Body::Earth => Ok(PlanarSeries {
                x: self.column("vx_E")?.to_vec(),
                y: self.column("vy_E")?.to_vec(),
            }),
            Body::Moon => Ok(PlanarSeries {
                x: self.column("vx_M")?.to_vec(),
                y: self.column("vy_M")?.to_vec(),
            }),
            Body::Tide(i) => {
                let (phi, vphi) = self.tide_columns(i)?;
                let (vx_e, vy_e) = (self.column("vx_E")?, self.column("vy_E")?);
                let r = self.masses.earth_radius;

                let x = phi
                    .iter()
                    .zip(vphi)
                    .zip(vx_e)
                    .map(|((p, w), vx)| vx - r * p.sin() * w)
                    .collect();
                let y = phi
                    .iter()
                    .zip(vphi)
                    .zip(vy_e)
                    .map(|((p, w), vy)| vy + r * p.cos() * w)
                    .collect();

                Ok(PlanarSeries { x, y })
            }
        }
    }

    /// Speed of a body at every sample
    pub fn speed(&self, body: Body) -> Result<Vec<f64>, SimulationError> {
        Ok(self.velocity(body)?.norm())
    }

    /// Centre of mass of Earth, Moon and tide particles
    pub fn center_of_mass(&self) -> Result<PlanarSeries, SimulationError> {
        let masses = &self.masses;
        let earth = self.position(Body::Earth)?;
        let moon = self.position(Body::Moon)?;

        let mut x: Vec<f64> = earth
            .x
            .iter()
            .zip(&moon.x)
            .map(|(e, m)| masses.earth_mass * e + masses.moon_mass * m)
            .collect();
        let mut y: Vec<f64> = earth
            .y
            .iter()
            .zip(&moon.y)
            .map(|(e, m)| masses.earth_mass * e + masses.moon_mass * m)
            .collect();

        let tide_mass = masses.tide_mass();
        for i in 1..=masses.tide_particles {
            let tide = self.position(Body::Tide(i))?;
            for k in 0..x.len() {
                x[k] += tide_mass * tide.x[k];
                y[k] += tide_mass * tide.y[k];
            }
        }

        let total = masses.total_mass();
        x.iter_mut().for_each(|v| *v /= total);
        y.iter_mut().for_each(|v| *v /= total);

        Ok(PlanarSeries { x, y })
    }

    /// Distance of a body to the instantaneous centre of mass
    pub fn orbital_radius(&self, body: Body) -> Result<Vec<f64>, SimulationError> {
        Ok(self.position(body)?.distance_to(&self.center_of_mass()?))
    }

    /// Earth–Moon distance at every sample
    pub fn earth_moon_distance(&self) -> Result<Vec<f64>, SimulationError> {
        Ok(self
            .position(Body::Earth)?
            .distance_to(&self.position(Body::Moon)?))
    }

    /// Distance between tide `i` and the Earth's centre (r_E by construction)
    pub fn tide_distance_to_earth(&self, i: usize) -> Result<Vec<f64>, SimulationError> {
        Ok(self
            .position(Body::Tide(i))?
            .distance_to(&self.position(Body::Earth)?))
    }

    /// Length of the day 2π / φ̇_E (s), for models with Earth spin
    pub fn day_length(&self) -> Result<Vec<f64>, SimulationError> {
        Ok(self
            .column("vphi_E")?
            .iter()
            .map(|omega| 2.0 * PI / omega)
            .collect())
    }

    /// Kinetic plus gravitational energy of the Earth–Moon pair (J)
    ///
    /// Tide particles are left out: they are part of the Earth's mass budget
    /// in the orbital equations.
    pub fn mechanical_energy(&self) -> Result<Vec<f64>, SimulationError> {
        let masses = &self.masses;
        let earth_speed = self.speed(Body::Earth)?;
        let moon_speed = self.speed(Body::Moon)?;
        let distance = self.earth_moon_distance()?;

        Ok(earth_speed
            .iter()
            .zip(&moon_speed)
            .zip(&distance)
            .map(|((v_e, v_m), d)| {
                0.5 * masses.earth_mass * v_e * v_e + 0.5 * masses.moon_mass * v_m * v_m
                    - masses.gravitational_constant * masses.earth_mass * masses.moon_mass / d
            })
            .collect())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::SimulationResult;
    use nalgebra::DMatrix;

    const FIELDS: [&str; 12] = [
        "x_E", "vx_E", "y_E", "vy_E", "x_M", "vx_M", "y_M", "vy_M", "phi1", "vphi1", "phi2",
        "vphi2",
    ];

    fn masses() -> MassDistribution {
        MassDistribution {
            gravitational_constant: 1.0,
            earth_mass: 8.0,
            moon_mass: 1.0,
            ocean_mass: 1.0,
            tide_particles: 2,
            earth_radius: 0.5,
        }
    }

    /// One sample: Earth at origin moving +y, Moon at (9, 0), tides on the x axis
    fn solution() -> Solution {
        let row = [
            0.0, 0.0, 0.0, 1.0, 9.0, 0.0, 0.0, 2.0, 0.0, 2.0, PI, 0.0,
        ];
        let result = SimulationResult::new(vec![0.0], DMatrix::from_row_slice(1, 12, &row));
        Solution::from_result(&result, FIELDS.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_tide_position_and_velocity() {
        let solution = solution();
        let derived = DerivedQuantities::new(&solution, masses(), "Test");

        let tide1 = derived.position(Body::Tide(1)).unwrap();
        assert!((tide1.x[0] - 0.5).abs() < 1e-15);
        assert!(tide1.y[0].abs() < 1e-15);

        // vy = vy_E + r_E cos φ · φ̇ = 1 + 0.5 · 2
        let velocity = derived.velocity(Body::Tide(1)).unwrap();
        assert!(velocity.x[0].abs() < 1e-15);
        assert!((velocity.y[0] - 2.0).abs() < 1e-15);

        let distance = derived.tide_distance_to_earth(2).unwrap();
        assert!((distance[0] - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_center_of_mass_includes_tides() {
        let solution = solution();
        let derived = DerivedQuantities::new(&solution, masses(), "Test");

        // (8·0 + 1·9 + 0.5·0.5 + 0.5·(−0.5)) / 10
        let com = derived.center_of_mass().unwrap();
        assert!((com.x[0] - 0.9).abs() < 1e-15);
        assert!(com.y[0].abs() < 1e-15);

        let radius = derived.orbital_radius(Body::Moon).unwrap();
        assert!((radius[0] - 8.1).abs() < 1e-14);
    }

    #[test]
    fn test_energy() {
        let solution = solution();
        let derived = DerivedQuantities::new(&solution, masses(), "Test");

        // ½·8·1 + ½·1·4 − 8/9
        let energy = derived.mechanical_energy().unwrap();
        assert!((energy[0] - (6.0 - 8.0 / 9.0)).abs() < 1e-14);
        assert_eq!(derived.earth_moon_distance().unwrap(), vec![9.0]);
    }

    #[test]
    fn test_unknown_tide() {
        let solution = solution();
        let derived = DerivedQuantities::new(&solution, masses(), "Test");

        assert_eq!(
            derived.position(Body::Tide(3)),
            Err(SimulationError::UnknownBody {
                model: "Test".to_string(),
                body: "tide 3".to_string(),
            })
        );
    }

    #[test]
    fn test_day_length_needs_spin() {
        let solution = solution();
        let derived = DerivedQuantities::new(&solution, masses(), "Test");
        assert_eq!(
            derived.day_length(),
            Err(SimulationError::UnknownField("vphi_E".to_string()))
        );
    }
}
