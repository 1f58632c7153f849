//! Coupling configuration
//!
//! Everything the pipeline needs to know about the reacting gas and the time
//! stepping, supplied once at construction. Material constants live in
//! [`MaterialTable`](crate::physics::MaterialTable) instead, one per material type.

use crate::error::{require_non_negative, require_positive, ConfigError};
use crate::models::ReducingGas;
use crate::physics::constants::{DEFAULT_MASS_FLOOR, DEFAULT_MIN_LAYER_RADIUS};
use crate::physics::material::Stoichiometry;

/// Configuration of the shrinking-core coupling
///
/// # Examples
///
/// ```rust
/// use shrinkcore_rs::models::ReducingGas;
/// use shrinkcore_rs::solver::CouplingConfiguration;
///
/// let config = CouplingConfiguration::iron_ore(ReducingGas::CarbonMonoxide)
///     .with_timestep(1e-4)
///     .with_substeps(10)
///     .with_coupling_every(100);
///
/// assert!(config.validate().is_ok());
/// assert!((config.coupling_interval() - 1e-3).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CouplingConfiguration {
    /// Reducing gas species
    pub reactant: ReducingGas,

    /// Molar mass of the reactant M_A \[kg/mol\]
    pub reactant_molar_mass: f64,

    /// Molar mass of the gaseous product M_C \[kg/mol\]
    pub product_molar_mass: f64,

    /// Reducing-gas content of the feed, in (0, 1]
    pub reducing_gas_content: f64,

    /// Engine time step Δt \[s\]
    pub timestep: f64,

    /// Engine steps represented by one coupling call
    pub substeps: u32,

    /// Engine steps between two fluid coupling exchanges
    pub coupling_every: u64,

    /// Coarse-graining factor assigned to new particles
    pub coarse_graining: f64,

    /// Absolute radius \[m\] below which the innermost shell is retired
    pub min_layer_radius: f64,

    /// Smallest mass \[kg\] an active shell may hold
    pub mass_floor: f64,

    /// Stoichiometric coefficients of the three reactions
    pub stoichiometry: Stoichiometry,
}

impl CouplingConfiguration {
    /// Iron ore reduced by `gas`, molar masses taken from the species
    pub fn iron_ore(gas: ReducingGas) -> Self {
        Self {
            reactant: gas,
            reactant_molar_mass: gas.molar_mass(),
            product_molar_mass: gas.product_molar_mass(),
            reducing_gas_content: 1.0,
            timestep: 1e-4,
            substeps: 1,
            coupling_every: 1,
            coarse_graining: 1.0,
            min_layer_radius: DEFAULT_MIN_LAYER_RADIUS,
            mass_floor: DEFAULT_MASS_FLOOR,
            stoichiometry: Stoichiometry::iron_oxide(),
        }
    }

    // ========================================= Builders =========================================

    pub fn with_molar_masses(mut self, reactant: f64, product: f64) -> Self {
        self.reactant_molar_mass = reactant;
        self.product_molar_mass = product;
        self
    }

    pub fn with_reducing_gas_content(mut self, content: f64) -> Self {
        self.reducing_gas_content = content;
        self
    }

    pub fn with_timestep(mut self, timestep: f64) -> Self {
        self.timestep = timestep;
        self
    }

    pub fn with_substeps(mut self, substeps: u32) -> Self {
        self.substeps = substeps;
        self
    }

    pub fn with_coupling_every(mut self, coupling_every: u64) -> Self {
        self.coupling_every = coupling_every;
        self
    }

    pub fn with_coarse_graining(mut self, coarse_graining: f64) -> Self {
        self.coarse_graining = coarse_graining;
        self
    }

    pub fn with_min_layer_radius(mut self, min_layer_radius: f64) -> Self {
        self.min_layer_radius = min_layer_radius;
        self
    }

    pub fn with_mass_floor(mut self, mass_floor: f64) -> Self {
        self.mass_floor = mass_floor;
        self
    }

    pub fn with_stoichiometry(mut self, stoichiometry: Stoichiometry) -> Self {
        self.stoichiometry = stoichiometry;
        self
    }

    // ========================================== Queries ==========================================

    /// Physical time covered by one coupling call, `Δt × substeps` \[s\]
    pub fn coupling_interval(&self) -> f64 {
        self.timestep * f64::from(self.substeps)
    }

    /// Product to reactant molar mass ratio M_C / M_A
    pub fn product_mass_ratio(&self) -> f64 {
        self.product_molar_mass / self.reactant_molar_mass
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        const CONTEXT: &str = "coupling configuration";

        require_positive(CONTEXT, "reactant_molar_mass", self.reactant_molar_mass)?;
        require_positive(CONTEXT, "product_molar_mass", self.product_molar_mass)?;
        require_positive(CONTEXT, "timestep", self.timestep)?;
        require_positive(CONTEXT, "coarse_graining", self.coarse_graining)?;
        require_non_negative(CONTEXT, "min_layer_radius", self.min_layer_radius)?;
        require_non_negative(CONTEXT, "mass_floor", self.mass_floor)?;

        if !(self.reducing_gas_content > 0.0 && self.reducing_gas_content <= 1.0) {
            return Err(ConfigError::invalid(
                CONTEXT,
                "reducing_gas_content",
                format!("must be in (0, 1], got {}", self.reducing_gas_content),
            ));
        }

        if self.substeps == 0 {
            return Err(ConfigError::invalid(CONTEXT, "substeps", "must be at least 1"));
        }

        self.stoichiometry.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_is_valid() {
        for gas in [ReducingGas::CarbonMonoxide, ReducingGas::Hydrogen] {
            let config = CouplingConfiguration::iron_ore(gas);
            assert!(config.validate().is_ok());
            assert_eq!(config.reactant, gas);
        }
    }

    #[test]
    fn test_coupling_interval() {
        let config = CouplingConfiguration::iron_ore(ReducingGas::Hydrogen)
            .with_timestep(2e-5)
            .with_substeps(50);
        assert!((config.coupling_interval() - 1e-3).abs() < 1e-15);
    }

    #[test]
    fn test_product_mass_ratio() {
        let config = CouplingConfiguration::iron_ore(ReducingGas::CarbonMonoxide)
            .with_molar_masses(0.028, 0.044);
        assert!((config.product_mass_ratio() - 0.044 / 0.028).abs() < 1e-15);
    }

    #[test]
    fn test_zero_substeps_rejected() {
        let err = CouplingConfiguration::iron_ore(ReducingGas::CarbonMonoxide)
            .with_substeps(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("substeps"));
    }

    #[test]
    fn test_negative_timestep_rejected() {
        assert!(CouplingConfiguration::iron_ore(ReducingGas::CarbonMonoxide)
            .with_timestep(-1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_non_physical_molar_mass_rejected() {
        assert!(CouplingConfiguration::iron_ore(ReducingGas::CarbonMonoxide)
            .with_molar_masses(f64::NAN, 0.044)
            .validate()
            .is_err());
    }

    #[test]
    fn test_gas_content_range() {
        let config = CouplingConfiguration::iron_ore(ReducingGas::CarbonMonoxide);
        assert!(config.clone().with_reducing_gas_content(0.0).validate().is_err());
        assert!(config.clone().with_reducing_gas_content(1.2).validate().is_err());
        assert!(config.with_reducing_gas_content(0.6).validate().is_ok());
    }

    #[test]
    fn test_zero_floors_are_allowed() {
        let config = CouplingConfiguration::iron_ore(ReducingGas::CarbonMonoxide)
            .with_min_layer_radius(0.0)
            .with_mass_floor(0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_stoichiometry_propagates() {
        let mut nu = Stoichiometry::iron_oxide();
        nu.reactant[0] = -1.0;
        assert!(CouplingConfiguration::iron_ore(ReducingGas::CarbonMonoxide)
            .with_stoichiometry(nu)
            .validate()
            .is_err());
    }
}
