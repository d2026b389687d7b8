//! Typed edits of individual orbital elements, as issued by sliders or `--set name=value` flags.

use std::fmt;
use std::str::FromStr;

use astro_orbits::{CentralBody, OrbitError, OrbitalElements};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("unknown orbital parameter '{0}'")]
    UnknownParameter(String),
    #[error("expected NAME=VALUE, got '{0}'")]
    MalformedAssignment(String),
    #[error("value '{value}' for {parameter} is not a number")]
    InvalidNumber {
        parameter: ElementParameter,
        value: String,
    },
    #[error("setting {parameter} to {value} produces an invalid orbit: {source}")]
    InvalidOrbit {
        parameter: ElementParameter,
        value: f64,
        #[source]
        source: OrbitError,
    },
}

/// An editable orbital element. Angles are in degrees, lengths in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementParameter {
    SemiMajorAxis,
    /// Mean altitude above the surface; sets the semi-major axis.
    Altitude,
    Eccentricity,
    Inclination,
    Raan,
    ArgumentOfPeriapsis,
    TrueAnomaly,
}

impl ElementParameter {
    pub const ALL: [ElementParameter; 7] = [
        ElementParameter::SemiMajorAxis,
        ElementParameter::Altitude,
        ElementParameter::Eccentricity,
        ElementParameter::Inclination,
        ElementParameter::Raan,
        ElementParameter::ArgumentOfPeriapsis,
        ElementParameter::TrueAnomaly,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ElementParameter::SemiMajorAxis => "semi-major-axis",
            ElementParameter::Altitude => "altitude",
            ElementParameter::Eccentricity => "eccentricity",
            ElementParameter::Inclination => "inclination",
            ElementParameter::Raan => "raan",
            ElementParameter::ArgumentOfPeriapsis => "arg-periapsis",
            ElementParameter::TrueAnomaly => "true-anomaly",
        }
    }

    /// Current value of this parameter in `elements`.
    pub fn get(&self, elements: &OrbitalElements, body: &CentralBody) -> f64 {
        match self {
            ElementParameter::SemiMajorAxis => elements.semi_major_axis_km,
            ElementParameter::Altitude => body.altitude_at_radius(elements.semi_major_axis_km),
            ElementParameter::Eccentricity => elements.eccentricity,
            ElementParameter::Inclination => elements.inclination_deg,
            ElementParameter::Raan => elements.raan_deg,
            ElementParameter::ArgumentOfPeriapsis => elements.arg_periapsis_deg,
            ElementParameter::TrueAnomaly => elements.true_anomaly_deg,
        }
    }

    /// Return a copy of `elements` with this parameter set, rejecting edits that break the orbit.
    pub fn apply(
        &self,
        elements: &OrbitalElements,
        body: &CentralBody,
        value: f64,
    ) -> Result<OrbitalElements, ParameterError> {
        let mut edited = *elements;
        match self {
            ElementParameter::SemiMajorAxis => edited.semi_major_axis_km = value,
            ElementParameter::Altitude => {
                edited.semi_major_axis_km = body.radius_at_altitude(value)
            }
            ElementParameter::Eccentricity => edited.eccentricity = value,
            ElementParameter::Inclination => edited.inclination_deg = value,
            ElementParameter::Raan => edited.raan_deg = value,
            ElementParameter::ArgumentOfPeriapsis => edited.arg_periapsis_deg = value,
            ElementParameter::TrueAnomaly => edited.true_anomaly_deg = value,
        }
        edited
            .validate(body)
            .map_err(|source| ParameterError::InvalidOrbit {
                parameter: *self,
                value,
                source,
            })?;
        Ok(edited)
    }
}

impl fmt::Display for ElementParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementParameter {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        let parameter = match key.as_str() {
            "semi-major-axis" | "sma" | "a" => ElementParameter::SemiMajorAxis,
            "altitude" | "alt" => ElementParameter::Altitude,
            "eccentricity" | "ecc" | "e" => ElementParameter::Eccentricity,
            "inclination" | "inc" | "i" => ElementParameter::Inclination,
            "raan" | "node" => ElementParameter::Raan,
            "arg-periapsis" | "argument-of-periapsis" | "argp" | "aop" => {
                ElementParameter::ArgumentOfPeriapsis
            }
            "true-anomaly" | "nu" | "ta" => ElementParameter::TrueAnomaly,
            _ => return Err(ParameterError::UnknownParameter(s.to_string())),
        };
        Ok(parameter)
    }
}

/// A parsed `NAME=VALUE` edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterAssignment {
    pub parameter: ElementParameter,
    pub value: f64,
}

impl ParameterAssignment {
    pub fn apply(
        &self,
        elements: &OrbitalElements,
        body: &CentralBody,
    ) -> Result<OrbitalElements, ParameterError> {
        self.parameter.apply(elements, body, self.value)
    }
}

impl FromStr for ParameterAssignment {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, raw) = s
            .split_once('=')
            .ok_or_else(|| ParameterError::MalformedAssignment(s.to_string()))?;
        let parameter: ElementParameter = name.parse()?;
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ParameterError::InvalidNumber {
                parameter,
                value: raw.to_string(),
            })?;
        Ok(Self { parameter, value })
    }
}

/// Apply edits in order; the first rejected edit aborts the chain.
pub fn apply_all(
    elements: &OrbitalElements,
    body: &CentralBody,
    assignments: &[ParameterAssignment],
) -> Result<OrbitalElements, ParameterError> {
    assignments
        .iter()
        .try_fold(*elements, |current, assignment| {
            assignment.apply(&current, body)
        })
}
