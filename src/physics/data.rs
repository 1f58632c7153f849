//! Per-particle state containers
//!
//! Everything the core reads or writes for one particle lives in three plain
//! structures:
//!
//! - [`ParticleChemistry`]: shell masses, radii and aggregates (owned, mutated)
//! - [`GasCoupling`]: local gas state from the fluid side (read-only)
//! - [`GasSources`]: gas-phase mass source accumulators (mutated, drained externally)
//!
//! Shell data is stored in fixed-size `nalgebra` vectors together with an
//! explicit active-layer count, so a particle update never allocates.

use nalgebra::{SVector, Vector3};

use crate::error::{require_positive, ConfigError};
use crate::physics::constants::{sphere_volume, MAX_LAYERS, N_SHELLS, SMALL};

/// One value per shell, outermost first
pub type LayerVector = SVector<f64, N_SHELLS>;

/// One value per reacting interface, outermost first
pub type InterfaceVector = Vector3<f64>;

// =================================================================================================
// Particle chemistry
// =================================================================================================

/// Shell state of one particle
///
/// # Layout
///
/// ```text
///  shell 0   shell 1   shell 2   shell 3 (core)
/// |  Fe   |   FeO   |  Fe₃O₄  |  Fe₂O₃ ...
/// rr[0]=1   rr[1]     rr[2]     rr[3]
///        ^ interface 0 at rr[1]
/// ```
///
/// `active_layers` counts the reacting interfaces. Shell `active_layers` is
/// the current core; shells beyond it have been retired and hold zero mass.
///
/// # Invariants
///
/// - `1.0 = rr[0] ≥ rr[1] ≥ … ≥ rr[active_layers] ≥ 0`
/// - `active_layers` never increases
/// - `mass = Σ layer_mass · cg³`, `density = mass / (4/3 π radius³)`
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleChemistry {
    pub(crate) active_layers: usize,
    pub(crate) layer_mass: LayerVector,
    pub(crate) relative_radius: LayerVector,
    pub(crate) porosity: LayerVector,
    pub(crate) effective_density: LayerVector,
    pub(crate) radius: f64,
    pub(crate) mass: f64,
    pub(crate) density: f64,
    pub(crate) coarse_graining: f64,
    pub(crate) material_type: usize,
}

impl ParticleChemistry {
    /// Build the initial shell state of a freshly created particle
    ///
    /// Shell masses are derived from the relative radii, the porosities and the
    /// bulk densities of the material; all three interfaces start active.
    ///
    /// # Arguments
    ///
    /// * `radius` - Particle radius as stored by the host engine \[m\]
    /// * `relative_radius` - Shell boundaries normalised by `radius`, `rr[0]` must be 1
    /// * `porosity` - Porosity per shell, in `[0, 1)`
    /// * `bulk_density` - Non-porous density per shell \[kg/m³\]
    /// * `coarse_graining` - Coarse-graining factor (1 for resolved particles)
    /// * `material_type` - Index into the material registry
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidLayout`] when the radii are not ordered or a
    /// porosity leaves no solid.
    pub fn new(
        radius: f64,
        relative_radius: LayerVector,
        porosity: LayerVector,
        bulk_density: &LayerVector,
        coarse_graining: f64,
        material_type: usize,
    ) -> Result<Self, ConfigError> {
        require_positive("particle", "radius", radius)?;
        require_positive("particle", "coarse_graining", coarse_graining)?;

        if (relative_radius[0] - 1.0).abs() > 1e-12 {
            return Err(ConfigError::InvalidLayout(format!(
                "outer relative radius must be 1.0, got {}",
                relative_radius[0]
            )));
        }

        for layer in 1..N_SHELLS {
            let (outer, inner) = (relative_radius[layer - 1], relative_radius[layer]);
            if !(inner >= 0.0 && inner <= outer) {
                return Err(ConfigError::InvalidLayout(format!(
                    "relative radii must be non-increasing and >= 0, got rr[{}]={outer} rr[{layer}]={inner}",
                    layer - 1
                )));
            }
        }

        for (layer, &phi) in porosity.iter().enumerate() {
            if !(0.0..1.0).contains(&phi) {
                return Err(ConfigError::InvalidLayout(format!(
                    "porosity of shell {layer} must be in [0, 1), got {phi}"
                )));
            }
        }

        let effective_density = porosity.zip_map(bulk_density, |phi, rho| (1.0 - phi) * rho);

        let mut chemistry = Self {
            active_layers: MAX_LAYERS,
            layer_mass: LayerVector::zeros(),
            relative_radius,
            porosity,
            effective_density,
            radius,
            mass: 0.0,
            density: 0.0,
            coarse_graining,
            material_type,
        };
        chemistry.recompute_layer_masses();

        Ok(chemistry)
    }

    // ========================================== Queries ==========================================

    /// Number of interfaces still reacting
    pub fn active_layers(&self) -> usize {
        self.active_layers
    }

    /// True once every interface has been retired
    pub fn is_inert(&self) -> bool {
        self.active_layers == 0
    }

    /// Shell masses \[kg\] of one physical (not coarse-grained) particle
    pub fn layer_mass(&self) -> &LayerVector {
        &self.layer_mass
    }

    /// Shell boundaries normalised by the particle radius
    pub fn relative_radius(&self) -> &LayerVector {
        &self.relative_radius
    }

    /// Porosity per shell
    pub fn porosity(&self) -> &LayerVector {
        &self.porosity
    }

    /// `(1 - porosity) × bulk density` per shell
    pub fn effective_density(&self) -> &LayerVector {
        &self.effective_density
    }

    /// Particle radius as seen by the host engine \[m\]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Radius of one physical particle, `radius / cg` \[m\]
    pub fn physical_radius(&self) -> f64 {
        self.radius / self.coarse_graining
    }

    /// Aggregate particle mass \[kg\]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Aggregate particle density \[kg/m³\]
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Coarse-graining factor
    pub fn coarse_graining(&self) -> f64 {
        self.coarse_graining
    }

    /// Material type index
    pub fn material_type(&self) -> usize {
        self.material_type
    }

    /// Sum of the masses of every non-retired shell \[kg\]
    pub fn total_layer_mass(&self) -> f64 {
        self.layer_mass.rows(0, self.active_layers + 1).sum()
    }

    /// Fractional conversion of each active interface
    ///
    /// `f[j] = 1 - rr[j+1]³`, floored at [`SMALL`]. Retired interfaces read 0.
    pub fn conversion(&self) -> InterfaceVector {
        InterfaceVector::from_fn(|j, _| {
            if j < self.active_layers {
                let rr = self.relative_radius[j + 1];
                (1.0 - rr * rr * rr).max(SMALL)
            } else {
                0.0
            }
        })
    }

    /// Innermost shell boundary in absolute units \[m\]
    pub fn core_radius(&self) -> f64 {
        self.relative_radius[self.active_layers] * self.physical_radius()
    }

    // ======================================== Mutations ========================================

    /// Rebuild shell masses from the current radii and effective densities
    ///
    /// The core is a full sphere; every other active shell is the difference
    /// of two spheres. Shells beyond the core are zeroed.
    pub(crate) fn recompute_layer_masses(&mut self) {
        let r = self.physical_radius();
        let core = self.active_layers;

        for layer in 0..N_SHELLS {
            self.layer_mass[layer] = if layer < core {
                let outer = r * self.relative_radius[layer];
                let inner = r * self.relative_radius[layer + 1];
                (sphere_volume(outer) - sphere_volume(inner)) * self.effective_density[layer]
            } else if layer == core {
                sphere_volume(r * self.relative_radius[layer]) * self.effective_density[layer]
            } else {
                0.0
            };
        }

        self.refresh_aggregates();
    }

    /// Derive aggregate mass and density from the shell masses
    pub(crate) fn refresh_aggregates(&mut self) {
        let cg = self.coarse_graining;
        self.mass = self.total_layer_mass() * cg * cg * cg;
        self.density = self.mass / sphere_volume(self.radius);
    }

    /// Permanently drop the innermost interface
    ///
    /// The old core's volume is absorbed by the new core shell at that shell's
    /// effective density.
    pub(crate) fn retire_core(&mut self) {
        debug_assert!(self.active_layers > 0, "cannot retire a layer of an inert particle");
        let retired = self.active_layers;
        self.active_layers -= 1;
        self.relative_radius[retired] = 0.0;
        self.recompute_layer_masses();
    }
}

// =================================================================================================
// Gas coupling
// =================================================================================================

/// Local gas state at the particle position, refreshed by the fluid side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasCoupling {
    /// Gas temperature T \[K\]
    pub temperature: f64,

    /// Molecular diffusivity of the reactant in the gas D \[m²/s\]
    pub molecular_diffusivity: f64,

    /// Kinematic viscosity of the gas ν \[m²/s\]
    pub kinematic_viscosity: f64,

    /// Particle Reynolds number Re \[-\]
    pub reynolds: f64,

    /// Bulk mole fraction of the reactant X₀ \[-\]
    pub bulk_mole_fraction: f64,

    /// Gas pressure p \[Pa\]
    pub partial_pressure: f64,
}

impl GasCoupling {
    /// True when every field is finite and in its physical range
    pub fn is_physical(&self) -> bool {
        self.temperature.is_finite() && self.temperature > 0.0
            && self.molecular_diffusivity.is_finite() && self.molecular_diffusivity >= 0.0
            && self.kinematic_viscosity.is_finite() && self.kinematic_viscosity >= 0.0
            && self.reynolds.is_finite() && self.reynolds >= 0.0
            && self.bulk_mole_fraction.is_finite()
            && self.partial_pressure.is_finite() && self.partial_pressure >= 0.0
    }

    /// Copy with every field forced into its physical range
    ///
    /// Temperature is floored at [`SMALL`], the other non-negative fields at 0.
    /// Non-finite values are replaced by the floor.
    pub fn clamped(&self) -> Self {
        let floor = |value: f64, min: f64| if value.is_finite() { value.max(min) } else { min };
        Self {
            temperature: floor(self.temperature, SMALL),
            molecular_diffusivity: floor(self.molecular_diffusivity, 0.0),
            kinematic_viscosity: floor(self.kinematic_viscosity, 0.0),
            reynolds: floor(self.reynolds, 0.0),
            bulk_mole_fraction: if self.bulk_mole_fraction.is_finite() { self.bulk_mole_fraction } else { 0.0 },
            partial_pressure: floor(self.partial_pressure, 0.0),
        }
    }
}

// =================================================================================================
// Gas-phase sources
// =================================================================================================

/// Gas-phase mass source accumulators \[kg\]
///
/// The core adds to them once per coupling interval; the transport side reads
/// and resets them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GasSources {
    /// Net mass change of the reactant species (negative when consumed)
    pub reactant: f64,

    /// Net mass change of the product species
    pub product: f64,
}

impl GasSources {
    /// Zero both accumulators
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Net gas mass change
    pub fn net(&self) -> f64 {
        self.reactant + self.product
    }
}

impl std::ops::AddAssign for GasSources {
    fn add_assign(&mut self, rhs: Self) {
        self.reactant += rhs.reactant;
        self.product += rhs.product;
    }
}

impl std::ops::Add for GasSources {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

// =================================================================================================
// Tests
// =================================================================================================
