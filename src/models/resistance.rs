//! Resistance network of a layered shrinking-core particle
//!
//! # Mathematical Background
//!
//! Reactant gas travels from the bulk through a boundary film (**M**), then
//! through the porous product shells (**B**) to the reaction fronts (**A**).
//! All three are expressed as resistances in s/m so that rates follow from a
//! driving force in mole fraction divided by a sum of resistances.
//!
//! ## Conversion
//!
//! ```text
//! f[j] = max(1 − rr[j+1]³, ε)
//! ```
//!
//! ## Chemical reaction
//!
//! ```text
//! A[j] = 1 / ( k₀[j]·exp(−Eₐ[j]/(R·T)) · (1 − f[j])^(2/3) · (1 + 1/K[j]) )
//! ```
//!
//! ## Pore diffusion
//!
//! Binary and Knudsen diffusivities of shell j are combined in series:
//!
//! ```text
//! D_bin = D·φ/τ + ε
//! D_kn  = (d_pore/6)·sqrt(8·R·T/(π·M_A))·φ/τ + ε
//! D_eff = D_bin·D_kn/(D_bin + D_kn) + ε
//! ```
//!
//! With `g[j] = max((1 − f[j])^(1/3), ε)`:
//!
//! ```text
//! B[0] = (1 − g[0])/g[0] · r/D_eff[0]
//! B[j] = (g[j−1] − g[j])/(g[j−1]·g[j]) · r/D_eff[j]      j ≥ 1
//! ```
//!
//! ## External film
//!
//! Ranz-Marshall correlation:
//!
//! ```text
//! Sc = ν/D              (ε when D < ε)
//! Sh = 2 + 0.6·Re^(1/2)·Sc^(1/3)
//! M  = 1 / (Sh·D/(2r) + ε)
//! ```
//!
//! Every division is floored by ε, so the network never produces NaN or a
//! negative resistance for physical gas input.

use std::f64::consts::PI;

use crate::error::{require_positive, ConfigError};
use crate::physics::constants::{GAS_CONSTANT, MAX_LAYERS, SMALL};
use crate::physics::data::{GasCoupling, InterfaceVector, ParticleChemistry};
use crate::physics::material::MaterialTable;
use crate::physics::traits::{EquilibriumModel, ResistanceModel, Resistances};

/// Shrinking-core resistance network
///
/// # Example
///
/// ```rust
/// use shrinkcore_rs::models::{ReducingGas, ResistanceNetwork, ValipourEquilibrium};
/// use shrinkcore_rs::physics::{GasCoupling, LayerVector, MaterialTable, ParticleChemistry, ResistanceModel};
///
/// let ore = MaterialTable::hematite_ore();
/// let particle = ParticleChemistry::new(
///     1e-3, LayerVector::new(1.0, 0.9, 0.8, 0.7), LayerVector::from_element(0.3),
///     &ore.bulk_density, 1.0, 0,
/// ).unwrap();
/// let gas = GasCoupling {
///     temperature: 1173.15, molecular_diffusivity: 2e-4, kinematic_viscosity: 1.5e-4,
///     reynolds: 10.0, bulk_mole_fraction: 0.4, partial_pressure: 101_325.0,
/// };
///
/// let network = ResistanceNetwork::new(ReducingGas::CarbonMonoxide.molar_mass()).unwrap();
/// let equilibrium = ValipourEquilibrium::new(ReducingGas::CarbonMonoxide, 1.0).unwrap();
/// let r = network.resistances(&particle, &gas, &ore, &equilibrium);
///
/// assert!(r.is_well_formed(3));
/// assert!(r.reaction[2] > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ResistanceNetwork {
    reactant_molar_mass: f64,
}

impl ResistanceNetwork {
    /// Build the network for a reactant of molar mass `reactant_molar_mass` \[kg/mol\]
    pub fn new(reactant_molar_mass: f64) -> Result<Self, ConfigError> {
        require_positive("resistance network", "reactant_molar_mass", reactant_molar_mass)?;
        Ok(Self { reactant_molar_mass })
    }

    /// Reaction resistance A of each active interface
    pub fn reaction_resistance(
        &self,
        conversion: &InterfaceVector,
        active: usize,
        temperature: f64,
        material: &MaterialTable,
        equilibrium: &dyn EquilibriumModel,
    ) -> InterfaceVector {
        let mut a = InterfaceVector::zeros();

        for j in 0..active {
            let rate = material.pre_exponential[j]
                * (-material.activation_energy[j] / (GAS_CONSTANT * temperature)).exp();
            let unreacted = (1.0 - conversion[j]).max(0.0);
            let surface = (unreacted * unreacted).cbrt();
            let reversibility = 1.0 + 1.0 / equilibrium.equilibrium_constant(j, temperature).max(SMALL);

            a[j] = 1.0 / (rate * surface * reversibility).max(SMALL);
        }

        a
    }

    /// Effective diffusivity of each active product shell \[m²/s\]
    pub fn effective_diffusivity(
        &self,
        chemistry: &ParticleChemistry,
        gas: &GasCoupling,
        material: &MaterialTable,
    ) -> InterfaceVector {
        let mut d_eff = InterfaceVector::zeros();

        let thermal_speed = (8.0 * GAS_CONSTANT * gas.temperature / (PI * self.reactant_molar_mass)).sqrt();

        for j in 0..chemistry.active_layers() {
            let pore_factor = chemistry.porosity()[j] / material.tortuosity;
            let d_bin = gas.molecular_diffusivity * pore_factor + SMALL;
            let d_kn = material.pore_diameter / 6.0 * thermal_speed * pore_factor + SMALL;

            d_eff[j] = d_bin * d_kn / (d_bin + d_kn) + SMALL;
        }

        d_eff
    }

    /// Diffusion resistance B of each active product shell
    pub fn diffusion_resistance(
        &self,
        conversion: &InterfaceVector,
        effective_diffusivity: &InterfaceVector,
        active: usize,
        radius: f64,
    ) -> InterfaceVector {
        let mut b = InterfaceVector::zeros();
        let g = conversion.map(|f| (1.0 - f).max(0.0).cbrt().max(SMALL));

        for j in 0..active {
            let geometry = if j == 0 {
                (1.0 - g[0]) / g[0]
            } else {
                (g[j - 1] - g[j]) / (g[j - 1] * g[j])
            };
            b[j] = (geometry * radius / effective_diffusivity[j]).max(SMALL);
        }

        b
    }

    /// External film resistance M
    pub fn mass_transfer_resistance(&self, gas: &GasCoupling, radius: f64) -> f64 {
        let diffusivity = gas.molecular_diffusivity;
        let schmidt = if diffusivity < SMALL {
            SMALL
        } else {
            gas.kinematic_viscosity / diffusivity
        };
        let sherwood = 2.0 + 0.6 * gas.reynolds.sqrt() * schmidt.cbrt();

        1.0 / (sherwood * diffusivity / (2.0 * radius) + SMALL)
    }
}

impl ResistanceModel for ResistanceNetwork {
    fn resistances(
        &self,
        chemistry: &ParticleChemistry,
        gas: &GasCoupling,
        material: &MaterialTable,
        equilibrium: &dyn EquilibriumModel,
    ) -> Resistances {
        let active = chemistry.active_layers().min(MAX_LAYERS);
        let radius = chemistry.physical_radius();
        let conversion = chemistry.conversion();
        let effective_diffusivity = self.effective_diffusivity(chemistry, gas, material);

        Resistances {
            reaction: self.reaction_resistance(&conversion, active, gas.temperature, material, equilibrium),
            diffusion: self.diffusion_resistance(&conversion, &effective_diffusivity, active, radius),
            mass_transfer: self.mass_transfer_resistance(gas, radius),
            effective_diffusivity,
        }
    }

    fn name(&self) -> &str {
        "shrinking-core resistance network"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::equilibrium::{ReducingGas, ValipourEquilibrium};
    use crate::physics::data::LayerVector;
    use approx::assert_relative_eq;

    const M_CO: f64 = 0.028_010;

    fn particle(rr: LayerVector) -> ParticleChemistry {
        ParticleChemistry::new(
            2e-3,
            rr,
            LayerVector::new(0.2, 0.25, 0.3, 0.35),
            &MaterialTable::hematite_ore().bulk_density,
            1.0,
            0,
        ).unwrap()
    }

    fn gas() -> GasCoupling {
        GasCoupling {
            temperature: 1173.15,
            molecular_diffusivity: 2e-4,
            kinematic_viscosity: 1.5e-4,
            reynolds: 25.0,
            bulk_mole_fraction: 0.4,
            partial_pressure: 101_325.0,
        }
    }

    fn co() -> ValipourEquilibrium {
        ValipourEquilibrium::new(ReducingGas::CarbonMonoxide, 1.0).unwrap()
    }

    #[test]
    fn test_reaction_resistance_matches_formula() {
        let p = particle(LayerVector::new(1.0, 0.9, 0.8, 0.7));
        let ore = MaterialTable::hematite_ore();
        let eq = co();
        let network = ResistanceNetwork::new(M_CO).unwrap();
        let r = network.resistances(&p, &gas(), &ore, &eq);

        let t = gas().temperature;
        for j in 0..3 {
            let rr: f64 = p.relative_radius()[j + 1];
            let f = 1.0 - rr.powi(3);
            let k = eq.equilibrium_constant(j, t);
            let expected = 1.0
                / (ore.pre_exponential[j]
                    * (-ore.activation_energy[j] / (GAS_CONSTANT * t)).exp()
                    * (1.0 - f).powf(2.0 / 3.0)
                    * (1.0 + 1.0 / k));
            assert_relative_eq!(r.reaction[j], expected, max_relative = 1e-10);
        }
    }

    #[test]
    fn test_diffusion_resistance_matches_formula() {
        let p = particle(LayerVector::new(1.0, 0.9, 0.8, 0.7));
        let ore = MaterialTable::hematite_ore();
        let network = ResistanceNetwork::new(M_CO).unwrap();
        let r = network.resistances(&p, &gas(), &ore, &co());

        let radius = 2e-3;
        // g[j] = (1 - f[j])^(1/3) = rr[j+1]
        let g = [0.9, 0.8, 0.7];
        assert_relative_eq!(r.diffusion[0], (1.0 - g[0]) / g[0] * radius / r.effective_diffusivity[0], max_relative = 1e-10);
        assert_relative_eq!(r.diffusion[1], (g[0] - g[1]) / (g[0] * g[1]) * radius / r.effective_diffusivity[1], max_relative = 1e-10);
        assert_relative_eq!(r.diffusion[2], (g[1] - g[2]) / (g[1] * g[2]) * radius / r.effective_diffusivity[2], max_relative = 1e-10);
    }

    #[test]
    fn test_effective_diffusivity_series_combination() {
        let p = particle(LayerVector::new(1.0, 0.9, 0.8, 0.7));
        let ore = MaterialTable::hematite_ore();
        let network = ResistanceNetwork::new(M_CO).unwrap();
        let gas = gas();
        let d_eff = network.effective_diffusivity(&p, &gas, &ore);

        let pore = 0.25 / ore.tortuosity;
        let d_bin = gas.molecular_diffusivity * pore + SMALL;
        let d_kn = ore.pore_diameter / 6.0 * (8.0 * GAS_CONSTANT * gas.temperature / (PI * M_CO)).sqrt() * pore + SMALL;
        assert_relative_eq!(d_eff[1], d_bin * d_kn / (d_bin + d_kn) + SMALL, max_relative = 1e-12);

        // Series combination is bounded by the smaller mechanism
        assert!(d_eff[1] < d_bin.min(d_kn) + 2.0 * SMALL);
    }

    #[test]
    fn test_mass_transfer_ranz_marshall() {
        let network = ResistanceNetwork::new(M_CO).unwrap();
        let gas = gas();
        let radius = 2e-3;

        let sc: f64 = gas.kinematic_viscosity / gas.molecular_diffusivity;
        let sh = 2.0 + 0.6 * gas.reynolds.sqrt() * sc.cbrt();
        let expected = 1.0 / (sh * gas.molecular_diffusivity / (2.0 * radius) + SMALL);

        assert_relative_eq!(network.mass_transfer_resistance(&gas, radius), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_vanishing_diffusivity_stays_finite() {
        let network = ResistanceNetwork::new(M_CO).unwrap();
        let mut gas = gas();
        gas.molecular_diffusivity = 0.0;

        let m = network.mass_transfer_resistance(&gas, 2e-3);
        assert!(m.is_finite() && m > 0.0);
        assert_relative_eq!(m, 1.0 / SMALL, max_relative = 1e-12);

        let p = particle(LayerVector::new(1.0, 0.9, 0.8, 0.7));
        let r = network.resistances(&p, &gas, &MaterialTable::hematite_ore(), &co());
        assert!(r.is_well_formed(p.active_layers()));
    }

    #[test]
    fn test_unconverted_interface_is_floored() {
        // rr[1] = 1 → f[0] = ε, g[0] ≈ 1, B[0] ≈ 0 but finite
        let p = particle(LayerVector::new(1.0, 1.0, 0.8, 0.7));
        let network = ResistanceNetwork::new(M_CO).unwrap();
        let r = network.resistances(&p, &gas(), &MaterialTable::hematite_ore(), &co());

        assert!(r.is_well_formed(p.active_layers()));
        assert!(r.diffusion[0] >= SMALL && r.diffusion[0] < 1e-3);
    }

    #[test]
    fn test_coincident_fronts_keep_positive_diffusion_resistance() {
        // rr[1] = rr[2] → the FeO shell has zero thickness
        let p = particle(LayerVector::new(1.0, 0.9, 0.9, 0.8));
        let network = ResistanceNetwork::new(M_CO).unwrap();
        let r = network.resistances(&p, &gas(), &MaterialTable::hematite_ore(), &co());

        assert_eq!(r.diffusion[1], SMALL);
        assert!(r.diffusion[0] > SMALL && r.diffusion[2] > SMALL);
        assert!(r.is_well_formed(p.active_layers()));
    }

    #[test]
    fn test_fully_converted_interface_is_floored() {
        let p = particle(LayerVector::new(1.0, 0.5, 0.2, 0.0));
        let network = ResistanceNetwork::new(M_CO).unwrap();
        let r = network.resistances(&p, &gas(), &MaterialTable::hematite_ore(), &co());

        assert!(r.is_well_formed(p.active_layers()));
        assert!(r.reaction[2] > 0.0);
    }

    #[test]
    fn test_inactive_interfaces_are_zero() {
        let mut p = particle(LayerVector::new(1.0, 0.9, 0.8, 0.7));
        p.retire_core();

        let network = ResistanceNetwork::new(M_CO).unwrap();
        let r = network.resistances(&p, &gas(), &MaterialTable::hematite_ore(), &co());

        assert_eq!(r.reaction[2], 0.0);
        assert_eq!(r.diffusion[2], 0.0);
        assert!(r.reaction[1] > 0.0);
    }

    #[test]
    fn test_coarse_grained_particle_uses_physical_radius() {
        let ore = MaterialTable::hematite_ore();
        let fine = particle(LayerVector::new(1.0, 0.9, 0.8, 0.7));
        let coarse = ParticleChemistry::new(
            6e-3,
            LayerVector::new(1.0, 0.9, 0.8, 0.7),
            LayerVector::new(0.2, 0.25, 0.3, 0.35),
            &ore.bulk_density,
            3.0,
            0,
        ).unwrap();

        let network = ResistanceNetwork::new(M_CO).unwrap();
        let a = network.resistances(&fine, &gas(), &ore, &co());
        let b = network.resistances(&coarse, &gas(), &ore, &co());

        assert_relative_eq!(a.mass_transfer, b.mass_transfer, max_relative = 1e-12);
        assert_relative_eq!(a.diffusion[1], b.diffusion[1], max_relative = 1e-12);
    }

    #[test]
    fn test_rejects_bad_molar_mass() {
        assert!(ResistanceNetwork::new(0.0).is_err());
    }
}
