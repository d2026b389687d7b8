//! Catalog-backed central bodies and orbit presets.

use std::path::Path;

use astro_config::{BodyConfig, ConfigError, PresetConfig, load_bodies, load_presets};
use astro_orbits::elements::j2000;
use astro_orbits::{CentralBody, OrbitError, OrbitalElements};
use thiserror::Error;

pub const DEFAULT_BODY_PATH: &str = "configs/bodies/earth.toml";
pub const DEFAULT_PRESETS_PATH: &str = "configs/presets.yaml";

#[derive(Debug, Error)]
pub enum PresetError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("'{0}' not found in catalog")]
    NotFound(String),
    #[error("catalog at {0} is empty")]
    EmptyCatalog(String),
    #[error("preset '{name}' does not describe a valid orbit: {source}")]
    InvalidOrbit {
        name: String,
        #[source]
        source: OrbitError,
    },
}

/// A named starting orbit.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub description: Option<String>,
    pub elements: OrbitalElements,
}

/// Load the first body of a catalog (a single TOML file, YAML list or directory).
pub fn load_body<P: AsRef<Path>>(path: P) -> Result<CentralBody, PresetError> {
    let path = path.as_ref();
    load_bodies(path)?
        .first()
        .map(BodyConfig::to_body)
        .ok_or_else(|| PresetError::EmptyCatalog(path.display().to_string()))
}

/// Look up a body by name, case-insensitively.
pub fn find_body(bodies: &[BodyConfig], name: &str) -> Result<CentralBody, PresetError> {
    let upper = name.to_uppercase();
    bodies
        .iter()
        .find(|b| b.name.to_uppercase() == upper)
        .map(BodyConfig::to_body)
        .ok_or_else(|| PresetError::NotFound(name.to_string()))
}

/// Convert a preset record into validated elements about `body`.
pub fn preset_from_config(
    config: &PresetConfig,
    body: &CentralBody,
) -> Result<Preset, PresetError> {
    let elements = OrbitalElements {
        semi_major_axis_km: config.semi_major_axis_km(body.radius_km)?,
        eccentricity: config.eccentricity,
        inclination_deg: config.inclination_deg,
        raan_deg: config.raan_deg,
        arg_periapsis_deg: config.arg_periapsis_deg,
        true_anomaly_deg: config.true_anomaly_deg,
        epoch: config.epoch.unwrap_or_else(j2000),
    };
    elements
        .validate(body)
        .map_err(|source| PresetError::InvalidOrbit {
            name: config.name.clone(),
            source,
        })?;

    Ok(Preset {
        name: config.name.clone(),
        description: config.description.clone(),
        elements,
    })
}

/// Load every preset in a catalog, resolving altitudes against `body`.
pub fn load_preset_catalog<P: AsRef<Path>>(
    path: P,
    body: &CentralBody,
) -> Result<Vec<Preset>, PresetError> {
    load_presets(path)?
        .iter()
        .map(|config| preset_from_config(config, body))
        .collect()
}

/// Look up a preset by name, case-insensitively.
pub fn find_preset<'a>(presets: &'a [Preset], name: &str) -> Result<&'a Preset, PresetError> {
    let upper = name.to_uppercase();
    presets
        .iter()
        .find(|p| p.name.to_uppercase() == upper)
        .ok_or_else(|| PresetError::NotFound(name.to_string()))
}
