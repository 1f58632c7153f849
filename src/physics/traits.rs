//! Model traits of the shrinking-core pipeline
//!
//! Two seams separate the correlations from the numerics:
//!
//! - [`EquilibriumModel`]: equilibrium constant and mole fraction at each interface
//! - [`ResistanceModel`]: reaction, diffusion and film resistances of one particle
//!
//! The solver only sees these traits, so a correlation can be swapped (or
//! stubbed in tests) without touching the flux balance.

use crate::physics::constants::MAX_LAYERS;
use crate::physics::data::{GasCoupling, InterfaceVector, ParticleChemistry};
use crate::physics::material::MaterialTable;

// =================================================================================================
// Equilibrium
// =================================================================================================

/// Gas-solid equilibrium at the reaction fronts
///
/// A model is built for one reactant species; asking for an unsupported
/// species is a construction error, never a runtime fallback.
pub trait EquilibriumModel: Send + Sync {
    /// Equilibrium constant K of `interface` at `temperature` \[K\]
    fn equilibrium_constant(&self, interface: usize, temperature: f64) -> f64;

    /// Equilibrium mole fraction of the reactant at `interface`
    fn equilibrium_mole_fraction(&self, interface: usize, temperature: f64) -> f64;

    /// Equilibrium mole fractions of the first `active` interfaces, zero beyond
    fn equilibrium_fractions(&self, active: usize, temperature: f64) -> InterfaceVector {
        InterfaceVector::from_fn(|j, _| {
            if j < active.min(MAX_LAYERS) {
                self.equilibrium_mole_fraction(j, temperature)
            } else {
                0.0
            }
        })
    }

    /// Name of the model (used in logs)
    fn name(&self) -> &str;
}

// =================================================================================================
// Resistances
// =================================================================================================

/// Resistance terms of one particle \[s/m\]
///
/// Interfaces at index ≥ `active_layers` hold zero in every vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resistances {
    /// Chemical reaction resistance A per interface
    pub reaction: InterfaceVector,

    /// Pore diffusion resistance B per product shell
    pub diffusion: InterfaceVector,

    /// External film mass transfer resistance M
    pub mass_transfer: f64,

    /// Effective diffusivity per product shell \[m²/s\]
    pub effective_diffusivity: InterfaceVector,
}

impl Resistances {
    /// Every active interface gets `value` for both A and B, and M = `value`
    ///
    /// ```
    /// use shrinkcore_rs::physics::Resistances;
    ///
    /// let r = Resistances::uniform(2, 1.0);
    /// assert_eq!(r.reaction[1], 1.0);
    /// assert_eq!(r.reaction[2], 0.0);
    /// ```
    pub fn uniform(active: usize, value: f64) -> Self {
        let per_interface = InterfaceVector::from_fn(|j, _| if j < active { value } else { 0.0 });
        Self {
            reaction: per_interface,
            diffusion: per_interface,
            mass_transfer: value,
            effective_diffusivity: InterfaceVector::zeros(),
        }
    }

    /// Terms of the first `active` interfaces (and M, if any is active) are
    /// finite and positive, the remaining ones finite and non-negative
    pub fn is_well_formed(&self, active: usize) -> bool {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let unused = |v: f64| v.is_finite() && v >= 0.0;
        let check = |j: usize, v: f64| if j < active { positive(v) } else { unused(v) };

        (if active > 0 { positive(self.mass_transfer) } else { unused(self.mass_transfer) })
            && self.reaction.iter().enumerate().all(|(j, &v)| check(j, v))
            && self.diffusion.iter().enumerate().all(|(j, &v)| check(j, v))
    }
}

/// Resistance network of a layered particle
pub trait ResistanceModel: Send + Sync {
    /// Compute A, B and M for the current particle state
    ///
    /// # Arguments
    ///
    /// * `chemistry` - Shell state (active count, relative radii, porosities)
    /// * `gas` - Local gas state, already clamped to physical ranges
    /// * `material` - Constants of the particle's material type
    /// * `equilibrium` - Supplies K for the reversibility factor of A
    fn resistances(
        &self,
        chemistry: &ParticleChemistry,
        gas: &GasCoupling,
        material: &MaterialTable,
        equilibrium: &dyn EquilibriumModel,
    ) -> Resistances;

    /// Name of the model (used in logs)
    fn name(&self) -> &str;
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Flat;

    impl EquilibriumModel for Flat {
        fn equilibrium_constant(&self, _interface: usize, _temperature: f64) -> f64 {
            1.0
        }

        fn equilibrium_mole_fraction(&self, interface: usize, _temperature: f64) -> f64 {
            0.1 * (interface + 1) as f64
        }

        fn name(&self) -> &str {
            "flat"
        }
    }

    #[test]
    fn test_equilibrium_fractions_zero_beyond_active() {
        let x = Flat.equilibrium_fractions(2, 1000.0);
        assert_eq!(x[0], 0.1);
        assert_eq!(x[1], 0.2);
        assert_eq!(x[2], 0.0);

        assert_eq!(Flat.equilibrium_fractions(0, 1000.0), InterfaceVector::zeros());
    }

    #[test]
    fn test_uniform_resistances() {
        let r = Resistances::uniform(3, 2.0);
        assert_eq!(r.reaction, InterfaceVector::from_element(2.0));
        assert_eq!(r.mass_transfer, 2.0);
        assert!(r.is_well_formed(3));

        let r = Resistances::uniform(1, 2.0);
        assert_eq!(r.diffusion, InterfaceVector::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_negative_resistance_is_not_well_formed() {
        let mut r = Resistances::uniform(3, 1.0);
        r.diffusion[1] = -1.0;
        assert!(!r.is_well_formed(3));
    }

    #[test]
    fn test_zero_active_resistance_is_not_well_formed() {
        let mut r = Resistances::uniform(2, 1.0);
        assert!(r.is_well_formed(2));

        r.diffusion[1] = 0.0;
        assert!(!r.is_well_formed(2));
        // Zero is fine once the interface is retired
        assert!(r.is_well_formed(1));

        assert!(Resistances::uniform(0, 0.0).is_well_formed(0));
        assert!(!Resistances::uniform(1, 0.0).is_well_formed(1));
    }
}
