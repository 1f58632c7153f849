//! Helper functions for integration tests

use shrinkcore_rs::models::ReducingGas;
use shrinkcore_rs::physics::{GasCoupling, LayerVector, MaterialTable};
use shrinkcore_rs::solver::{CouplingConfiguration, Particle, ShrinkCore};

/// Hematite ore with rounded molar masses
///
/// Every interface releases exactly 0.016 kg of oxygen per mole of reactant,
/// which equals M(CO₂) − M(CO) of [`balanced_config`]. Solid mass lost and
/// gas mass gained then agree to round-off.
pub fn balanced_ore() -> MaterialTable {
    MaterialTable {
        name: "balanced hematite".to_string(),
        molar_mass: LayerVector::new(0.056, 0.072, 0.232, 0.160),
        ..MaterialTable::hematite_ore()
    }
}

/// CO configuration with molar masses consistent with [`balanced_ore`]
pub fn balanced_config() -> CouplingConfiguration {
    CouplingConfiguration::iron_ore(ReducingGas::CarbonMonoxide)
        .with_molar_masses(0.028, 0.044)
        .with_timestep(1e-3)
        .with_coupling_every(0)
}

/// CO-rich furnace gas at 900 °C
pub fn furnace_gas(bulk_mole_fraction: f64) -> GasCoupling {
    GasCoupling {
        temperature: 1173.15,
        molecular_diffusivity: 2e-4,
        kinematic_viscosity: 1.5e-4,
        reynolds: 10.0,
        bulk_mole_fraction,
        partial_pressure: 101_325.0,
    }
}

/// Particle of material 0 with porosity 0.3 in every shell
pub fn layered_particle(core: &ShrinkCore, radius: f64, relative_radius: LayerVector, gas: GasCoupling) -> Particle {
    let chemistry = core
        .initialize_particle(radius, relative_radius, LayerVector::from_element(0.3), 0)
        .expect("valid particle layout");
    Particle::new(chemistry, gas)
}

/// Aggregate solid mass plus net gas-phase source of all particles \[kg\]
pub fn solid_plus_gas_mass(particles: &[Particle]) -> f64 {
    particles
        .iter()
        .map(|p| p.chemistry.mass() + p.sources.net())
        .sum()
}

/// Compute relative error
pub fn relative_error(computed: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-15 {
        computed.abs()
    } else {
        ((computed - expected) / expected).abs()
    }
}
