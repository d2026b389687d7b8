//! Configuration models and loaders for the Astrodynamics Playground.

use std::fs::File;
use std::path::{Path, PathBuf};

use astro_core::CentralBody;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Central body definition parsed from the body catalog.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub radius_km: f64,
    pub mu_km3_s2: f64,
}

impl BodyConfig {
    pub fn to_body(&self) -> CentralBody {
        CentralBody::new(self.name.clone(), self.radius_km, self.mu_km3_s2)
    }
}

/// Orbit preset parsed from the preset catalog. Angles are in degrees.
///
/// Exactly one of `semi_major_axis_km` and `altitude_km` must be given.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PresetConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub semi_major_axis_km: Option<f64>,
    #[serde(default)]
    pub altitude_km: Option<f64>,
    #[serde(default)]
    pub eccentricity: f64,
    #[serde(default)]
    pub inclination_deg: f64,
    #[serde(default)]
    pub raan_deg: f64,
    #[serde(default)]
    pub arg_periapsis_deg: f64,
    #[serde(default)]
    pub true_anomaly_deg: f64,
    /// RFC 3339 timestamp; loaders fall back to J2000 when absent.
    #[serde(default)]
    pub epoch: Option<DateTime<Utc>>,
}

impl PresetConfig {
    /// Resolve the semi-major axis, converting an altitude with the given body radius.
    pub fn semi_major_axis_km(&self, body_radius_km: f64) -> Result<f64, ConfigError> {
        match (self.semi_major_axis_km, self.altitude_km) {
            (Some(a), None) => Ok(a),
            (None, Some(altitude)) => Ok(body_radius_km + altitude),
            (Some(_), Some(_)) => Err(ConfigError::InvalidPreset {
                name: self.name.clone(),
                reason: "both semi_major_axis_km and altitude_km are set",
            }),
            (None, None) => Err(ConfigError::InvalidPreset {
                name: self.name.clone(),
                reason: "one of semi_major_axis_km or altitude_km is required",
            }),
        }
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("preset '{name}' is invalid: {reason}")]
    InvalidPreset { name: String, reason: &'static str },
}

/// Load central bodies from a TOML file, a YAML list, or a directory of TOML files.
pub fn load_bodies<P: AsRef<Path>>(path: P) -> Result<Vec<BodyConfig>, ConfigError> {
    load_records(path)
}

/// Load orbit presets from a YAML list or a directory of TOML files.
pub fn load_presets<P: AsRef<Path>>(path: P) -> Result<Vec<PresetConfig>, ConfigError> {
    load_records(path)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_requires_exactly_one_size_field() {
        let yaml = "- name: both\n  semi_major_axis_km: 7000.0\n  altitude_km: 600.0\n\
                    - name: none\n";
        let presets: Vec<PresetConfig> = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            presets[0].semi_major_axis_km(6378.137),
            Err(ConfigError::InvalidPreset { .. })
        ));
        assert!(matches!(
            presets[1].semi_major_axis_km(6378.137),
            Err(ConfigError::InvalidPreset { .. })
        ));
    }

    #[test]
    fn altitude_is_converted_with_body_radius() {
        let preset: PresetConfig =
            toml::from_str("name = \"LEO\"\naltitude_km = 500.0\nepoch = \"2024-01-01T00:00:00Z\"")
                .unwrap();
        assert_eq!(preset.semi_major_axis_km(6378.0).unwrap(), 6878.0);
        assert!(preset.epoch.is_some());
        assert_eq!(preset.eccentricity, 0.0);
    }
}
