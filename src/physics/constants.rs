//! Physical constants and shell geometry helpers

use std::f64::consts::PI;

/// Maximum number of reacting interfaces (hematite → magnetite → wüstite → iron)
pub const MAX_LAYERS: usize = 3;

/// Number of concentric shells, including the unreacted core
pub const N_SHELLS: usize = MAX_LAYERS + 1;

/// Universal gas constant R \[J/(mol·K)\]
pub const GAS_CONSTANT: f64 = 8.3144;

/// Floor applied to every vanishing denominator or conversion term
pub const SMALL: f64 = 1e-10;

/// Absolute radius \[m\] below which the innermost shell is retired
pub const DEFAULT_MIN_LAYER_RADIUS: f64 = 1e-8;

/// Smallest mass \[kg\] a still-active shell may hold; a core drained to it is retired
pub const DEFAULT_MASS_FLOOR: f64 = SMALL;

/// Volume of a sphere of radius `r`
#[inline]
pub fn sphere_volume(radius: f64) -> f64 {
    4.0 / 3.0 * PI * radius * radius * radius
}

/// Radius of a sphere of volume `v`
#[inline]
pub fn sphere_radius(volume: f64) -> f64 {
    (0.75 * volume / PI).cbrt()
}
