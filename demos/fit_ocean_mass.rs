//! Example: Ocean mass fit
//!
//! Tunes the ocean mass of the four-body friction model so the simulated
//! Earth day grows by the observed 2.1 ms per century.
//!
//! **Setup**:
//! - Model: FourBodyComplex (two tides with friction, spinning Earth)
//! - Solver: RK4, 5000 samples over 2 years
//! - Observable: linear drift of the Earth's spin over the second year
//!
//! An optional argument points to a YAML file overriding the physical
//! constants:
//!
//! ```bash
//! cargo run --release --example fit_ocean_mass -- constants.yml
//! ```

use tides_rs::{
    fitting::{FitConfig, OceanMassFitter},
    models::FourBodyComplex,
    physics::{PhysicalConstants, SECONDS_PER_YEAR},
    solver::{RK4Solver, TimeBoundaries},
};

use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Ocean Mass Fit - Four-Body Model with Friction");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Physical constants ======

    let constants = match std::env::args().nth(1) {
        Some(path) => PhysicalConstants::from_yaml_str(&std::fs::read_to_string(path)?)?,
        None => PhysicalConstants::default(),
    };

    println!("Constants:");
    println!("  Ocean mass (nominal) : {:.4e} kg", constants.ocean_mass);
    println!("  Friction coefficient : {:.3e}", constants.friction_coefficient);
    println!("  Target τ             : {} s per century\n", constants.day_lengthening_per_century);

    // ====== Fit ======

    let mut fitter = OceanMassFitter::new(
        Box::new(FourBodyComplex::new(constants)),
        TimeBoundaries::new(0.0, 2.0 * SECONDS_PER_YEAR, 5000),
        Box::new(RK4Solver::new()),
        FitConfig::from_constants(&constants),
    );

    let start = Instant::now();
    let report = fitter.fit_with_observer(|progress| {
        println!(
            "  Iteration {:>2}: m_O = {:.4e} kg, τ = {:.4e} s, ratio = {:.5}",
            progress.iteration, progress.ocean_mass, progress.tau, progress.ratio
        );
    })?;

    println!("\nResult ({:.2?}):", start.elapsed());
    println!("  Ocean mass     : {:.4e} kg", report.ocean_mass);
    println!("                 : {:.4e} Gt", report.ocean_mass_gigatonnes());
    println!("  Nominal ratio  : {:.4e}", report.ocean_mass_ratio());
    println!("  Achieved τ     : {:.4e} s per century", report.tau);

    Ok(())
}
