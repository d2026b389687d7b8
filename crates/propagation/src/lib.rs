//! Simplified Keplerian propagation of orbital elements.
//!
//! Semi-major axis, eccentricity, inclination, RAAN and argument of periapsis are held
//! fixed; only the true anomaly and the epoch advance. By default the true anomaly is
//! advanced by the mean-anomaly increment directly, which is accurate only for
//! near-circular orbits. [`AnomalyUpdate::Kepler`] solves Kepler's equation instead.

use astro_core::CentralBody;
use astro_core::units::wrap_degrees;
use astro_orbits::characteristics::mean_motion;
use astro_orbits::kepler::{mean_to_true, true_to_mean};
use astro_orbits::{OrbitError, OrbitalElements};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// How sample times are spread over the requested duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sampling {
    /// Sample `i` sits at `duration × i`, so the last sample lands at `duration × (steps − 1)`.
    /// Existing validation data was produced this way.
    #[default]
    StepIndex,
    /// Sample `i` sits at `duration × i / (steps − 1)`; the last sample lands at `duration`.
    Subdivided,
}

impl Sampling {
    pub fn elapsed_seconds(self, duration_s: f64, index: usize, steps: usize) -> f64 {
        match self {
            Sampling::StepIndex => duration_s * index as f64,
            Sampling::Subdivided if steps > 1 => duration_s * index as f64 / (steps - 1) as f64,
            Sampling::Subdivided => 0.0,
        }
    }
}

/// How the true anomaly is advanced for a given elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnomalyUpdate {
    /// Δν ≈ ΔM = n·t.
    #[default]
    MeanMotion,
    /// ν → M, M += n·t, M → ν through Kepler's equation.
    Kepler,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PropagationOptions {
    pub sampling: Sampling,
    pub anomaly: AnomalyUpdate,
}

/// Upper bound on the samples reserved up front; longer runs grow the buffer as they go.
const MAX_PREALLOCATED_SAMPLES: usize = 1 << 16;

fn initial_capacity(steps: usize) -> usize {
    steps.min(MAX_PREALLOCATED_SAMPLES)
}

fn advance_epoch(epoch: DateTime<Utc>, seconds: f64) -> DateTime<Utc> {
    TimeDelta::try_milliseconds((seconds * 1_000.0).round() as i64)
        .and_then(|delta| epoch.checked_add_signed(delta))
        .unwrap_or(if seconds >= 0.0 {
            DateTime::<Utc>::MAX_UTC
        } else {
            DateTime::<Utc>::MIN_UTC
        })
}

/// Advance `elements` by `elapsed_s` seconds. The caller is responsible for validation.
fn advance(
    elements: &OrbitalElements,
    mean_motion_rad_s: f64,
    elapsed_s: f64,
    anomaly: AnomalyUpdate,
) -> Result<OrbitalElements, OrbitError> {
    let delta_m = mean_motion_rad_s * elapsed_s;
    let true_anomaly_deg = match anomaly {
        AnomalyUpdate::MeanMotion => elements.true_anomaly_deg + delta_m.to_degrees(),
        AnomalyUpdate::Kepler => {
            let e = elements.eccentricity;
            let m0 = true_to_mean(elements.true_anomaly_deg.to_radians(), e)?;
            mean_to_true(m0 + delta_m, e)?.to_degrees()
        }
    };

    Ok(OrbitalElements {
        true_anomaly_deg: wrap_degrees(true_anomaly_deg),
        epoch: advance_epoch(elements.epoch, elapsed_s),
        ..*elements
    })
}

/// Propagate with the default options (step-index sampling, mean-motion anomaly update).
pub fn propagate_orbit(
    elements: &OrbitalElements,
    body: &CentralBody,
    duration_s: f64,
    steps: usize,
) -> Result<Vec<OrbitalElements>, OrbitError> {
    propagate_orbit_with(
        elements,
        body,
        duration_s,
        steps,
        &PropagationOptions::default(),
    )
}

/// Return `steps` element sets sampled according to `options`, starting with the initial state.
///
/// Only the initial elements are validated; once they pass, no individual step can fail.
pub fn propagate_orbit_with(
    elements: &OrbitalElements,
    body: &CentralBody,
    duration_s: f64,
    steps: usize,
    options: &PropagationOptions,
) -> Result<Vec<OrbitalElements>, OrbitError> {
    elements.validate(body)?;
    if !duration_s.is_finite() {
        return Err(OrbitError::NonFinite {
            quantity: "propagation duration",
            value: duration_s,
        });
    }

    let n = mean_motion(elements.semi_major_axis_km, body.mu_km3_s2);
    let mut samples = Vec::with_capacity(initial_capacity(steps));
    for i in 0..steps {
        let elapsed = options.sampling.elapsed_seconds(duration_s, i, steps);
        samples.push(advance(elements, n, elapsed, options.anomaly)?);
    }

    tracing::debug!(
        duration_s,
        steps,
        sampling = ?options.sampling,
        anomaly = ?options.anomaly,
        "propagated orbit"
    );

    Ok(samples)
}
