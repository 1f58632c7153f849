//! Example: Gaseous reduction of hematite pellets
//!
//! Three pellet sizes sit in a CO-rich furnace atmosphere at 900 °C. Each
//! pellet starts almost fully oxidised: a thin iron skin over thin wüstite and
//! magnetite shells around a hematite core.
//!
//! **Physical System**:
//! - Ore: hematite (Fe₂O₃ → Fe₃O₄ → FeO → Fe)
//! - Gas: 90 % CO at 1 atm, 1173.15 K
//! - Pellet radii: 0.5, 1 and 2 mm, porosity 0.3 in every shell
//! - Coupling interval: 0.5 s, 2000 passes
//!
//! Run with `RUST_LOG=debug` to see per-pass summaries.

use shrinkcore_rs::prelude::*;

use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("═══════════════════════════════════════════════════════");
    println!("  Hematite Reduction - Shrinking-Core Pellets");
    println!("═══════════════════════════════════════════════════════\n");

    let passes = 2000;
    let config = CouplingConfiguration::iron_ore(ReducingGas::CarbonMonoxide)
        .with_timestep(0.5)
        .with_coupling_every(0);
    let mut core = ShrinkCore::new(config, vec![MaterialTable::hematite_ore()], 0)?;

    let gas = GasCoupling {
        temperature: 1173.15,
        molecular_diffusivity: 2e-4,
        kinematic_viscosity: 1.5e-4,
        reynolds: 10.0,
        bulk_mole_fraction: 0.9,
        partial_pressure: 101_325.0,
    };

    let mut particles = Vec::new();
    for radius in [5e-4, 1e-3, 2e-3] {
        let chemistry = core.initialize_particle(
            radius,
            LayerVector::new(1.0, 0.998, 0.995, 0.99),
            LayerVector::from_element(0.3),
            0,
        )?;
        particles.push(Particle::new(chemistry, gas));
    }
    let initial_mass: Vec<f64> = particles.iter().map(|p| p.chemistry.mass()).collect();

    println!("Setup:");
    println!("  Reducing gas     : {}", core.config().reactant);
    println!("  Coupling interval: {} s", core.config().coupling_interval());
    println!("  Gate opens at    : timestep {}", core.gate().opens_at());
    println!();

    // ====== Passes ======

    let start = Instant::now();
    let first = core.gate().opens_at();
    let mut retired = 0;

    for timestep in 0..first + passes {
        let summary = core.step(timestep, &mut particles)?;
        retired += summary.retired_layers;

        if summary.established && (timestep - first) % 500 == 0 {
            println!("Pass {:>5}:", timestep - first);
            for p in &particles {
                let f = p.chemistry.conversion();
                println!(
                    "  r = {:.3} mm  layers {}  f = ({:.4}, {:.4}, {:.4})",
                    p.chemistry.physical_radius() * 1e3,
                    p.chemistry.active_layers(),
                    f[0],
                    f[1],
                    f[2]
                );
            }
        }
    }

    let elapsed = start.elapsed();

    // ====== Results ======

    println!("\n═══════════════════════════════════════════════════════");
    println!("  Results after {} s", passes as f64 * core.config().coupling_interval());
    println!("═══════════════════════════════════════════════════════\n");

    println!("  {:>8} │ {:>12} │ {:>12} │ {:>12}", "r [mm]", "mass lost", "CO [kg]", "CO₂ [kg]");
    println!("  ─────────┼──────────────┼──────────────┼─────────────");
    for (p, m0) in particles.iter().zip(&initial_mass) {
        println!(
            "  {:>8.2} │ {:>11.3} % │ {:>12.4e} │ {:>12.4e}",
            p.chemistry.radius() * 1e3,
            100.0 * (m0 - p.chemistry.mass()) / m0,
            p.sources.reactant,
            p.sources.product
        );
    }

    println!();
    println!("  Layers retired: {retired}");
    println!("  Wall time     : {:.2?}", elapsed);

    Ok(())
}
