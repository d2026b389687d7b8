//! Two-body orbital mechanics for an educational orbit playground.
//!
//! The numerical engine lives in small workspace crates re-exported here: orbital elements,
//! Kepler's equation, state vectors and characteristics in [`orbits`], impulsive transfers in
//! [`impulsive`], time propagation in [`propagation`]. This crate adds the glue a front-end
//! needs: catalog-backed presets, typed parameter edits and logging setup.

pub mod logging;
pub mod params;
pub mod presets;

pub use astro_config as config;
pub use astro_core as common;
pub use astro_export as export;
pub use astro_impulsive as impulsive;
pub use astro_orbits as orbits;
pub use astro_propagation as propagation;
