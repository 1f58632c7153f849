//! Gas-solid equilibrium of the stepwise iron oxide reduction
//!
//! # Mathematical Background
//!
//! Each interface j reduces one oxide by one mole of reducing gas. Its
//! equilibrium constant follows an Arrhenius-type fit:
//!
//! ```text
//! K[j](T) = exp(a[j]/T + b[j])
//! ```
//!
//! The reactant mole fraction at which interface j stops reacting is:
//!
//! ```text
//! x_eq[j] = c / (1 + K[j])
//! ```
//!
//! where **c** is the reducing-gas content of the feed (1 for a pure binary
//! CO/CO₂ or H₂/H₂O mixture).
//!
//! # Coefficients
//!
//! | species | j = 0 (FeO → Fe)     | j = 1 (Fe₃O₄ → FeO) | j = 2 (Fe₂O₃ → Fe₃O₄) |
//! |---------|----------------------|---------------------|-----------------------|
//! | CO      | 2744.63/T − 2.946    | −3585.64/T + 8.98   | 3968.37/T + 3.94      |
//! | H₂      | −1586.9/T + 0.9317   | −7916.6/T + 8.46    | −362.6/T + 10.334     |
//!
//! # References
//!
//! Valipour, M. S. et al., isothermal modelling of iron ore pellet reduction
//! with H₂/H₂O/CO/CO₂ mixtures (equilibrium constants of the three reduction
//! steps).

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::physics::constants::MAX_LAYERS;
use crate::physics::traits::EquilibriumModel;

// =================================================================================================
// Reducing gas species
// =================================================================================================

/// Supported reactant species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReducingGas {
    /// CO, oxidised to CO₂
    CarbonMonoxide,

    /// H₂, oxidised to H₂O
    Hydrogen,
}

impl ReducingGas {
    /// Chemical formula of the reactant
    pub fn formula(&self) -> &'static str {
        match self {
            ReducingGas::CarbonMonoxide => "CO",
            ReducingGas::Hydrogen => "H2",
        }
    }

    /// Chemical formula of the gaseous product
    pub fn product_formula(&self) -> &'static str {
        match self {
            ReducingGas::CarbonMonoxide => "CO2",
            ReducingGas::Hydrogen => "H2O",
        }
    }

    /// Molar mass of the reactant \[kg/mol\]
    pub fn molar_mass(&self) -> f64 {
        match self {
            ReducingGas::CarbonMonoxide => 0.028_010,
            ReducingGas::Hydrogen => 0.002_016,
        }
    }

    /// Molar mass of the product \[kg/mol\]
    pub fn product_molar_mass(&self) -> f64 {
        match self {
            ReducingGas::CarbonMonoxide => 0.044_010,
            ReducingGas::Hydrogen => 0.018_015,
        }
    }

    /// `(a[j], b[j])` of `K[j] = exp(a[j]/T + b[j])`
    pub fn equilibrium_coefficients(&self) -> [(f64, f64); MAX_LAYERS] {
        match self {
            ReducingGas::CarbonMonoxide => [
                (2744.63, -2.946),
                (-3585.64, 8.98),
                (3968.37, 3.94),
            ],
            ReducingGas::Hydrogen => [
                (-1586.9, 0.9317),
                (-7916.6, 8.46),
                (-362.6, 10.334),
            ],
        }
    }
}

impl fmt::Display for ReducingGas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.formula())
    }
}

impl FromStr for ReducingGas {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "CO" => Ok(ReducingGas::CarbonMonoxide),
            "H2" => Ok(ReducingGas::Hydrogen),
            other => Err(ConfigError::UnsupportedSpecies(other.to_string())),
        }
    }
}

// =================================================================================================
// Valipour correlation
// =================================================================================================

/// Equilibrium model of the three reduction steps for one reducing gas
///
/// # Example
///
/// ```rust
/// use shrinkcore_rs::models::{ReducingGas, ValipourEquilibrium};
/// use shrinkcore_rs::physics::EquilibriumModel;
///
/// let co = ValipourEquilibrium::new(ReducingGas::CarbonMonoxide, 1.0).unwrap();
/// let x = co.equilibrium_mole_fraction(0, 1173.15);
/// assert!(x > 0.0 && x < 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValipourEquilibrium {
    gas: ReducingGas,
    coefficients: [(f64, f64); MAX_LAYERS],
    content: f64,
}

impl ValipourEquilibrium {
    /// Build the model for `gas` with reducing-gas content `content`
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidParameter`] unless `0 < content ≤ 1`.
    pub fn new(gas: ReducingGas, content: f64) -> Result<Self, ConfigError> {
        if !(content.is_finite() && content > 0.0 && content <= 1.0) {
            return Err(ConfigError::invalid(
                "equilibrium",
                "reducing_gas_content",
                format!("must be in (0, 1], got {content}"),
            ));
        }

        Ok(Self {
            gas,
            coefficients: gas.equilibrium_coefficients(),
            content,
        })
    }

    /// Build the model from a species formula such as `"CO"` or `"H2"`
    pub fn from_formula(formula: &str, content: f64) -> Result<Self, ConfigError> {
        Self::new(formula.parse()?, content)
    }

    /// Reducing gas the model was built for
    pub fn gas(&self) -> ReducingGas {
        self.gas
    }

    /// Reducing-gas content of the feed
    pub fn content(&self) -> f64 {
        self.content
    }
}

impl EquilibriumModel for ValipourEquilibrium {
    fn equilibrium_constant(&self, interface: usize, temperature: f64) -> f64 {
        let (a, b) = self.coefficients[interface];
        (a / temperature + b).exp()
    }

    fn equilibrium_mole_fraction(&self, interface: usize, temperature: f64) -> f64 {
        self.content / (1.0 + self.equilibrium_constant(interface, temperature))
    }

    fn name(&self) -> &str {
        match self.gas {
            ReducingGas::CarbonMonoxide => "Valipour (CO)",
            ReducingGas::Hydrogen => "Valipour (H2)",
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_species() {
        assert_eq!("CO".parse::<ReducingGas>().unwrap(), ReducingGas::CarbonMonoxide);
        assert_eq!(" H2 ".parse::<ReducingGas>().unwrap(), ReducingGas::Hydrogen);
    }

    #[test]
    fn test_unsupported_species_is_config_error() {
        let err = ValipourEquilibrium::from_formula("CH4", 1.0).unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedSpecies("CH4".to_string()));
    }

    #[test]
    fn test_from_formula_keeps_gas_and_content() {
        let eq = ValipourEquilibrium::from_formula("H2", 0.6).unwrap();
        assert_eq!(eq.gas(), ReducingGas::Hydrogen);
        assert_eq!(eq.content(), 0.6);
    }

    #[test]
    fn test_products() {
        assert_eq!(ReducingGas::CarbonMonoxide.product_formula(), "CO2");
        assert_eq!(ReducingGas::Hydrogen.product_formula(), "H2O");
        assert_eq!(ReducingGas::Hydrogen.to_string(), "H2");
    }

    #[test]
    fn test_co_equilibrium_constants() {
        let co = ValipourEquilibrium::new(ReducingGas::CarbonMonoxide, 1.0).unwrap();
        let t = 1000.0;

        assert_relative_eq!(co.equilibrium_constant(0, t), (2.74463 - 2.946_f64).exp(), max_relative = 1e-12);
        assert_relative_eq!(co.equilibrium_constant(1, t), (-3.58564 + 8.98_f64).exp(), max_relative = 1e-12);
        assert_relative_eq!(co.equilibrium_constant(2, t), (3.96837 + 3.94_f64).exp(), max_relative = 1e-12);
    }

    #[test]
    fn test_h2_mole_fraction() {
        let h2 = ValipourEquilibrium::new(ReducingGas::Hydrogen, 1.0).unwrap();
        let t = 1200.0;
        let k = (-1586.9 / t + 0.9317_f64).exp();
        assert_relative_eq!(h2.equilibrium_mole_fraction(0, t), 1.0 / (1.0 + k), max_relative = 1e-12);
    }

    #[test]
    fn test_content_scales_mole_fraction() {
        let full = ValipourEquilibrium::new(ReducingGas::CarbonMonoxide, 1.0).unwrap();
        let half = ValipourEquilibrium::new(ReducingGas::CarbonMonoxide, 0.5).unwrap();

        for j in 0..MAX_LAYERS {
            assert_relative_eq!(
                half.equilibrium_mole_fraction(j, 1100.0),
                0.5 * full.equilibrium_mole_fraction(j, 1100.0),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_fractions_are_ordered_for_co() {
        // Hematite is the easiest to reduce, wüstite the hardest
        let co = ValipourEquilibrium::new(ReducingGas::CarbonMonoxide, 1.0).unwrap();
        let x = co.equilibrium_fractions(3, 1173.15);
        assert!(x[2] < x[1] && x[1] < x[0]);
        assert!(x.iter().all(|&v| v > 0.0 && v < 1.0));
    }

    #[test]
    fn test_rejects_bad_content() {
        assert!(ValipourEquilibrium::new(ReducingGas::Hydrogen, 0.0).is_err());
        assert!(ValipourEquilibrium::new(ReducingGas::Hydrogen, 1.5).is_err());
        assert!(ValipourEquilibrium::new(ReducingGas::Hydrogen, f64::NAN).is_err());
    }
}
