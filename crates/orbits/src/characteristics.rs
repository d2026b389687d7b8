//! Scalar descriptions of an orbit: altitude, period, speeds, apsides, energy and class.

use std::f64::consts::TAU;
use std::fmt;

use astro_core::CentralBody;
use astro_core::constants::{
    GEOSTATIONARY_ALTITUDE_KM, SECONDS_PER_DAY, SUN_SYNCHRONOUS_INCLINATION_DEG,
};
use serde::Serialize;

use crate::elements::OrbitalElements;
use crate::error::OrbitError;
use crate::state::elements_to_state_vector;

const GEOSTATIONARY_ALTITUDE_BAND_KM: f64 = 500.0;
const GEOSTATIONARY_MAX_INCLINATION_DEG: f64 = 5.0;
const POLAR_BAND_DEG: f64 = 5.0;
const SUN_SYNCHRONOUS_BAND_DEG: f64 = 2.5;
const HIGHLY_ELLIPTICAL_MIN_ECCENTRICITY: f64 = 0.25;
const LOW_ORBIT_CEILING_KM: f64 = 2_000.0;

/// Coarse orbit label. Rules are checked in declaration order and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrbitClass {
    Geostationary,
    Polar,
    SunSynchronous,
    HighlyElliptical,
    LowEarth,
    MediumEarth,
    HighEarth,
}

impl OrbitClass {
    /// Classify from the mean altitude (a − R), the inclination and the eccentricity.
    pub fn classify(mean_altitude_km: f64, inclination_deg: f64, eccentricity: f64) -> Self {
        if (mean_altitude_km - GEOSTATIONARY_ALTITUDE_KM).abs() <= GEOSTATIONARY_ALTITUDE_BAND_KM
            && inclination_deg.abs() <= GEOSTATIONARY_MAX_INCLINATION_DEG
        {
            OrbitClass::Geostationary
        } else if (inclination_deg - 90.0).abs() <= POLAR_BAND_DEG {
            OrbitClass::Polar
        } else if (inclination_deg - SUN_SYNCHRONOUS_INCLINATION_DEG).abs()
            <= SUN_SYNCHRONOUS_BAND_DEG
        {
            OrbitClass::SunSynchronous
        } else if eccentricity >= HIGHLY_ELLIPTICAL_MIN_ECCENTRICITY {
            OrbitClass::HighlyElliptical
        } else if mean_altitude_km < LOW_ORBIT_CEILING_KM {
            OrbitClass::LowEarth
        } else if mean_altitude_km < GEOSTATIONARY_ALTITUDE_KM - GEOSTATIONARY_ALTITUDE_BAND_KM {
            OrbitClass::MediumEarth
        } else {
            OrbitClass::HighEarth
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrbitClass::Geostationary => "geostationary",
            OrbitClass::Polar => "polar",
            OrbitClass::SunSynchronous => "sun-synchronous",
            OrbitClass::HighlyElliptical => "highly-elliptical",
            OrbitClass::LowEarth => "low-earth",
            OrbitClass::MediumEarth => "medium-earth",
            OrbitClass::HighEarth => "high-earth",
        }
    }
}

impl fmt::Display for OrbitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Derived, display-ready description of an orbit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitalCharacteristics {
    /// Altitude above the surface at the current true anomaly.
    pub altitude_km: f64,
    pub period_s: f64,
    /// Instantaneous speed at the current true anomaly.
    pub speed_km_s: f64,
    pub apogee_altitude_km: f64,
    pub perigee_altitude_km: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub specific_energy_km2_s2: f64,
    pub semi_major_axis_km: f64,
    /// Escape speed at the current radius.
    pub escape_velocity_km_s: f64,
    /// Circular-orbit speed at the current radius.
    pub circular_velocity_km_s: f64,
    pub mean_motion_deg_s: f64,
    pub mean_motion_rev_per_day: f64,
    pub perigee_velocity_km_s: f64,
    pub apogee_velocity_km_s: f64,
    pub orbit_class: OrbitClass,
}

/// Vis-viva speed at radius `r_km` on an orbit with semi-major axis `a_km`.
pub fn orbital_velocity(r_km: f64, a_km: f64, mu_km3_s2: f64) -> f64 {
    (mu_km3_s2 * (2.0 / r_km - 1.0 / a_km)).sqrt()
}

pub fn circular_velocity(r_km: f64, mu_km3_s2: f64) -> f64 {
    (mu_km3_s2 / r_km).sqrt()
}

pub fn escape_velocity(r_km: f64, mu_km3_s2: f64) -> f64 {
    (2.0 * mu_km3_s2 / r_km).sqrt()
}

/// Kepler's third law, T = 2π√(a³/μ), in seconds.
pub fn orbital_period(a_km: f64, mu_km3_s2: f64) -> f64 {
    TAU * (a_km.powi(3) / mu_km3_s2).sqrt()
}

/// Mean motion √(μ/a³) in rad/s.
pub fn mean_motion(a_km: f64, mu_km3_s2: f64) -> f64 {
    (mu_km3_s2 / a_km.powi(3)).sqrt()
}

/// ε = −μ/(2a).
pub fn specific_energy(a_km: f64, mu_km3_s2: f64) -> f64 {
    -mu_km3_s2 / (2.0 * a_km)
}

/// Compute the full characteristics record for `elements`, rejecting invalid orbits.
pub fn calculate_characteristics(
    elements: &OrbitalElements,
    body: &CentralBody,
) -> Result<OrbitalCharacteristics, OrbitError> {
    elements.validate(body)?;

    let mu = body.mu_km3_s2;
    let a = elements.semi_major_axis_km;
    let state = elements_to_state_vector(elements, body)?;
    let r = state.radius_km();

    let perigee_radius = elements.periapsis_radius_km();
    let apogee_radius = elements.apoapsis_radius_km();
    let n = mean_motion(a, mu);

    let characteristics = OrbitalCharacteristics {
        altitude_km: body.altitude_at_radius(r),
        period_s: orbital_period(a, mu),
        speed_km_s: state.speed_km_s(),
        apogee_altitude_km: body.altitude_at_radius(apogee_radius),
        perigee_altitude_km: body.altitude_at_radius(perigee_radius),
        eccentricity: elements.eccentricity,
        inclination_deg: elements.inclination_deg,
        specific_energy_km2_s2: specific_energy(a, mu),
        semi_major_axis_km: a,
        escape_velocity_km_s: escape_velocity(r, mu),
        circular_velocity_km_s: circular_velocity(r, mu),
        mean_motion_deg_s: n.to_degrees(),
        mean_motion_rev_per_day: n * SECONDS_PER_DAY / TAU,
        perigee_velocity_km_s: orbital_velocity(perigee_radius, a, mu),
        apogee_velocity_km_s: orbital_velocity(apogee_radius, a, mu),
        orbit_class: OrbitClass::classify(
            body.altitude_at_radius(a),
            elements.inclination_deg,
            elements.eccentricity,
        ),
    };

    tracing::debug!(
        semi_major_axis_km = a,
        eccentricity = elements.eccentricity,
        class = %characteristics.orbit_class,
        "computed orbital characteristics"
    );

    Ok(characteristics)
}
