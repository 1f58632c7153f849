//! Shell mass, radius and gas source update
//!
//! Turns the reactant mass consumed at each interface into new shell masses,
//! shell radii, particle aggregates and gas-phase sources.
//!
//! # Layer mass flow
//!
//! With ν_r / ν_p the moles of inner / outer shell consumed / formed per mole
//! of reactant gas, and `n = active_layers`:
//!
//! ```text
//! dmL[0] = −dmA[0]·ν_p[0]·M_L[0]/M_A
//! dmL[l] = −dmA[l]·ν_p[l]·M_L[l]/M_A + dmA[l−1]·ν_r[l−1]·M_L[l]/M_A     0 < l < n
//! dmL[n] =                             dmA[n−1]·ν_r[n−1]·M_L[n]/M_A
//! ```
//!
//! Positive `dmL` means the shell loses mass.
//!
//! # Mass floor
//!
//! No shell may be drained below `mass_floor` within one update. Before any
//! mass moves, every interface flow is capped by the mass its consumed shell
//! holds above the floor, counting what the neighbouring interface forms or
//! takes from that shell in the same update. Forward flows are capped from
//! the core outward, reverse (re-oxidising) flows from the surface inward. A
//! shell whose cap binds ends exactly at the floor, which is what retires a
//! drained core on the next pass. The gas sources are computed from the capped
//! flows, so solid mass lost and gas mass gained always agree.
//!
//! # Radii
//!
//! Rebuilt from the core outward so that every shell keeps its effective
//! density:
//!
//! ```text
//! r[n]³ = 3/(4π) · m[n]/ρ_eff[n]
//! r[l]³ = 3/(4π) · m[l]/ρ_eff[l] + r[l+1]³
//! ```

use crate::physics::constants::{sphere_radius, sphere_volume, N_SHELLS};
use crate::physics::data::{GasSources, InterfaceVector, LayerVector, ParticleChemistry};
use crate::physics::material::Stoichiometry;

/// Applies interface mass flows to a particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateUpdater {
    reactant_molar_mass: f64,
    product_molar_mass: f64,
    stoichiometry: Stoichiometry,
    mass_floor: f64,
}

impl StateUpdater {
    pub fn new(
        reactant_molar_mass: f64,
        product_molar_mass: f64,
        stoichiometry: Stoichiometry,
        mass_floor: f64,
    ) -> Self {
        Self {
            reactant_molar_mass,
            product_molar_mass,
            stoichiometry,
            mass_floor,
        }
    }

    /// Mass \[kg\] lost by each shell, zero beyond the core
    pub fn layer_mass_flow(
        &self,
        reactant_flow: &InterfaceVector,
        active: usize,
        molar_mass: &LayerVector,
    ) -> LayerVector {
        let mut flow = LayerVector::zeros();
        if active == 0 {
            return flow;
        }

        let nu_r = &self.stoichiometry.reactant;
        let nu_p = &self.stoichiometry.product;
        let m_a = self.reactant_molar_mass;

        for layer in 0..=active {
            let formed = if layer < active {
                reactant_flow[layer] * nu_p[layer] * molar_mass[layer] / m_a
            } else {
                0.0
            };
            let consumed = if layer > 0 {
                reactant_flow[layer - 1] * nu_r[layer - 1] * molar_mass[layer] / m_a
            } else {
                0.0
            };
            flow[layer] = consumed - formed;
        }

        flow
    }

    /// Gas-phase source increments for the consumed reactant
    pub fn gas_sources(&self, reactant_flow: &InterfaceVector) -> GasSources {
        let consumed = reactant_flow.sum();
        GasSources {
            reactant: -consumed,
            product: consumed * self.product_molar_mass / self.reactant_molar_mass,
        }
    }

    /// Reactant flows capped so that no shell is drained below the mass floor
    ///
    /// Flows that leave every shell above the floor are returned unchanged, and
    /// capping forward flows that were already capped changes nothing.
    pub fn limit_reactant_flow(
        &self,
        chemistry: &ParticleChemistry,
        reactant_flow: &InterfaceVector,
        molar_mass: &LayerVector,
    ) -> InterfaceVector {
        self.limit(chemistry, reactant_flow, molar_mass).0
    }

    /// Capped flows plus the shells whose cap was binding
    fn limit(
        &self,
        chemistry: &ParticleChemistry,
        reactant_flow: &InterfaceVector,
        molar_mass: &LayerVector,
    ) -> (InterfaceVector, [bool; N_SHELLS]) {
        let active = chemistry.active_layers;
        let mut flow = *reactant_flow;
        let mut drained = [false; N_SHELLS];

        let nu_r = &self.stoichiometry.reactant;
        let nu_p = &self.stoichiometry.product;
        let m_a = self.reactant_molar_mass;
        let mass = &chemistry.layer_mass;

        // Shell `j` per unit reactant: formed by a forward flow of interface j,
        // taken by a forward flow of interface j−1
        let formed = |j: usize| nu_p[j] * molar_mass[j] / m_a;
        let taken = |j: usize| nu_r[j - 1] * molar_mass[j] / m_a;

        // Forward flows consume shell j+1, inner interfaces first
        for j in (0..active).rev() {
            if flow[j] <= 0.0 {
                continue;
            }
            let shell = j + 1;
            let mut available = mass[shell] - self.mass_floor;
            if shell < active {
                // Formed by a forward flow, taken by a reverse one
                available += flow[shell] * formed(shell);
            }
            if available <= 0.0 {
                flow[j] = 0.0;
                continue;
            }
            let cap = available / taken(shell);
            if flow[j] >= cap {
                flow[j] = cap;
                drained[shell] = true;
            }
        }

        // Reverse flows consume shell j, outer interfaces first
        for j in 0..active {
            if flow[j] >= 0.0 {
                continue;
            }
            let shell = j;
            let mut available = mass[shell] - self.mass_floor;
            if shell > 0 {
                // Taken by a forward flow, formed by a reverse one
                available -= flow[shell - 1] * taken(shell);
            }
            if available <= 0.0 {
                flow[j] = 0.0;
                continue;
            }
            let cap = available / formed(shell);
            if -flow[j] >= cap {
                flow[j] = -cap;
                drained[shell] = true;
            }
        }

        (flow, drained)
    }

    /// Update shell masses, radii and aggregates of `chemistry`
    ///
    /// `reactant_flow` is capped by [`limit_reactant_flow`](Self::limit_reactant_flow)
    /// first. Returns the gas source increments of the capped flows. An inert
    /// particle is left untouched.
    pub fn apply(
        &self,
        chemistry: &mut ParticleChemistry,
        reactant_flow: &InterfaceVector,
        molar_mass: &LayerVector,
    ) -> GasSources {
        let active = chemistry.active_layers;
        if active == 0 {
            return GasSources::default();
        }

        let (reactant_flow, drained) = self.limit(chemistry, reactant_flow, molar_mass);
        let flow = self.layer_mass_flow(&reactant_flow, active, molar_mass);
        for layer in 0..=active {
            chemistry.layer_mass[layer] = if drained[layer] {
                self.mass_floor
            } else {
                (chemistry.layer_mass[layer] - flow[layer]).max(0.0)
            };
        }

        let mut radius = [0.0; N_SHELLS];
        radius[active] = sphere_radius(chemistry.layer_mass[active] / chemistry.effective_density[active]);
        for layer in (0..active).rev() {
            let shell_volume = chemistry.layer_mass[layer] / chemistry.effective_density[layer];
            radius[layer] = sphere_radius(shell_volume + sphere_volume(radius[layer + 1]));
        }

        let outer = radius[0];
        if outer > 0.0 {
            for layer in 0..=active {
                chemistry.relative_radius[layer] = radius[layer] / outer;
            }
            chemistry.radius = outer * chemistry.coarse_graining;
        }
        chemistry.refresh_aggregates();

        self.gas_sources(&reactant_flow)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
