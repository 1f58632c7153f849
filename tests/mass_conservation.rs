//! Integration tests: solid mass lost equals gas mass gained
//!
//! With molar masses that balance the oxygen transfer, the aggregate particle
//! mass plus the net gas-phase source must stay constant over every pass.

use approx::assert_relative_eq;
use shrinkcore_rs::physics::LayerVector;
use shrinkcore_rs::solver::{Particle, ShrinkCore};

mod common;
use common::{
    balanced_config,
    balanced_ore,
    furnace_gas,
    layered_particle,
    solid_plus_gas_mass,
    ConstantEquilibrium,
    UniformResistance,
};

fn solid_mass(particles: &[Particle]) -> f64 {
    particles.iter().map(|p| p.chemistry.mass()).sum()
}

fn net_gas(particles: &[Particle]) -> f64 {
    particles.iter().map(|p| p.sources.net()).sum()
}

fn batch(core: &ShrinkCore) -> Vec<Particle> {
    let layouts = [
        LayerVector::new(1.0, 0.998, 0.995, 0.99),
        LayerVector::new(1.0, 0.95, 0.9, 0.85),
        LayerVector::new(1.0, 0.8, 0.6, 0.4),
        LayerVector::new(1.0, 0.99, 0.5, 0.45),
    ];

    layouts
        .iter()
        .enumerate()
        .flat_map(|(i, rr)| {
            [0.75, 0.95].map(|x| layered_particle(core, 1e-3 * (1.0 + i as f64), *rr, furnace_gas(x)))
        })
        .collect()
}

// =================================================================================================
// Full pipeline
// =================================================================================================

#[test]
fn test_mass_conserved_every_pass() {
    let mut core = ShrinkCore::new(balanced_config(), vec![balanced_ore()], 0).unwrap();
    let mut particles = batch(&core);

    let opens_at = core.gate().opens_at();
    for timestep in opens_at..opens_at + 200 {
        let solid_before = solid_mass(&particles);
        let gas_before = net_gas(&particles);

        let summary = core.step(timestep, &mut particles).unwrap();
        assert_eq!(summary.retired_layers, 0);

        let solid_lost = solid_before - solid_mass(&particles);
        let gas_gained = net_gas(&particles) - gas_before;

        assert!(solid_lost > 0.0, "step {timestep}: solid mass must decrease");
        assert_relative_eq!(solid_lost, gas_gained, max_relative = 1e-6);
    }
}

#[test]
fn test_summary_matches_accumulated_sources() {
    let mut core = ShrinkCore::new(balanced_config(), vec![balanced_ore()], 0).unwrap();
    let mut particles = batch(&core);

    let mut consumed = 0.0;
    let mut released = 0.0;
    let opens_at = core.gate().opens_at();
    for timestep in opens_at..opens_at + 20 {
        let summary = core.step(timestep, &mut particles).unwrap();
        consumed += summary.reactant_consumed;
        released += summary.product_released;
    }

    let reactant: f64 = particles.iter().map(|p| p.sources.reactant).sum();
    let product: f64 = particles.iter().map(|p| p.sources.product).sum();

    assert_relative_eq!(consumed, -reactant, max_relative = 1e-10);
    assert_relative_eq!(released, product, max_relative = 1e-10);
    assert_relative_eq!(released / consumed, 0.044 / 0.028, max_relative = 1e-10);
}

// =================================================================================================
// Stub models
// =================================================================================================

#[test]
fn test_mass_conserved_with_stub_models() {
    let mut core = ShrinkCore::with_models(
        balanced_config(),
        vec![balanced_ore()],
        0,
        Box::new(ConstantEquilibrium::new(0.2)),
        Box::new(UniformResistance::new(500.0)),
    ).unwrap();
    let mut particles = batch(&core);

    let initial = solid_plus_gas_mass(&particles);
    let opens_at = core.gate().opens_at();
    for timestep in opens_at..opens_at + 100 {
        core.step(timestep, &mut particles).unwrap();
    }

    assert!(net_gas(&particles) > 0.0);
    assert_relative_eq!(solid_plus_gas_mass(&particles), initial, max_relative = 1e-12);
}

// =================================================================================================
// Coarse graining
// =================================================================================================

#[test]
fn test_coarse_grained_parcel_scales_solid_but_not_sources() {
    let cg = 2.0;
    let config = balanced_config().with_coarse_graining(cg);
    let mut core = ShrinkCore::new(config, vec![balanced_ore()], 0).unwrap();

    // Parcel of radius 2 mm standing for 8 particles of 1 mm
    let mut particles = vec![layered_particle(
        &core,
        2e-3,
        LayerVector::new(1.0, 0.95, 0.9, 0.85),
        furnace_gas(0.9),
    )];

    let solid_before = solid_mass(&particles);
    core.step(core.gate().opens_at(), &mut particles).unwrap();

    let solid_lost = solid_before - solid_mass(&particles);
    let gas_gained = net_gas(&particles);

    assert_relative_eq!(solid_lost, cg * cg * cg * gas_gained, max_relative = 1e-6);
}
