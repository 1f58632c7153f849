//! Stub models for testing
//!
//! These models replace the correlations with constants, so the rates of the
//! flux balance have simple closed forms.

use shrinkcore_rs::physics::{
    EquilibriumModel,
    GasCoupling,
    MaterialTable,
    ParticleChemistry,
    ResistanceModel,
    Resistances,
};

// =================================================================================================
// Constant equilibrium: x_eq[j] = x
// =================================================================================================

/// Same equilibrium mole fraction at every interface and temperature
pub struct ConstantEquilibrium {
    pub mole_fraction: f64,
}

impl ConstantEquilibrium {
    pub fn new(mole_fraction: f64) -> Self {
        Self { mole_fraction }
    }
}

impl EquilibriumModel for ConstantEquilibrium {
    fn equilibrium_constant(&self, _interface: usize, _temperature: f64) -> f64 {
        // x = 1/(1 + K) for unit content
        1.0 / self.mole_fraction - 1.0
    }

    fn equilibrium_mole_fraction(&self, _interface: usize, _temperature: f64) -> f64 {
        self.mole_fraction
    }

    fn name(&self) -> &str {
        "Constant equilibrium"
    }
}

// =================================================================================================
// Uniform resistance: A = B = M = value
// =================================================================================================

/// Every active resistance equal to `value` \[s/m\]
pub struct UniformResistance {
    pub value: f64,
}

impl UniformResistance {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl ResistanceModel for UniformResistance {
    fn resistances(
        &self,
        chemistry: &ParticleChemistry,
        _gas: &GasCoupling,
        _material: &MaterialTable,
        _equilibrium: &dyn EquilibriumModel,
    ) -> Resistances {
        Resistances::uniform(chemistry.active_layers(), self.value)
    }

    fn name(&self) -> &str {
        "Uniform resistance"
    }
}
