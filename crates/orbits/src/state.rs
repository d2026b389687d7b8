//! Conversion from orbital elements to inertial Cartesian state, and trajectory sampling.

use astro_core::CentralBody;
use astro_core::vector::{self, Matrix3, Vector3};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::elements::OrbitalElements;
use crate::error::OrbitError;

/// Inertial position and velocity at an epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StateVector {
    pub position_km: Vector3,
    pub velocity_km_s: Vector3,
    pub epoch: DateTime<Utc>,
}

impl StateVector {
    pub fn radius_km(&self) -> f64 {
        vector::norm(&self.position_km)
    }

    pub fn speed_km_s(&self) -> f64 {
        vector::norm(&self.velocity_km_s)
    }
}

/// A sampled point on the orbit path, used for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    pub position_km: Vector3,
    pub true_anomaly_deg: f64,
}

/// Perifocal-to-inertial rotation for the 3-1-3 sequence (Ω, i, ω).
fn perifocal_to_inertial(raan: f64, inclination: f64, arg_periapsis: f64) -> Matrix3 {
    let (sin_o, cos_o) = raan.sin_cos();
    let (sin_i, cos_i) = inclination.sin_cos();
    let (sin_w, cos_w) = arg_periapsis.sin_cos();

    [
        [
            cos_o * cos_w - sin_o * sin_w * cos_i,
            -cos_o * sin_w - sin_o * cos_w * cos_i,
            sin_o * sin_i,
        ],
        [
            sin_o * cos_w + cos_o * sin_w * cos_i,
            -sin_o * sin_w + cos_o * cos_w * cos_i,
            -cos_o * sin_i,
        ],
        [sin_w * sin_i, cos_w * sin_i, cos_i],
    ]
}

/// Convert classical elements to an inertial state vector about `body`.
pub fn elements_to_state_vector(
    elements: &OrbitalElements,
    body: &CentralBody,
) -> Result<StateVector, OrbitError> {
    elements.validate(body)?;

    let mu = body.mu_km3_s2;
    let a = elements.semi_major_axis_km;
    let e = elements.eccentricity;
    let nu = elements.true_anomaly_deg.to_radians();
    let (sin_nu, cos_nu) = nu.sin_cos();

    let r = a * (1.0 - e * e) / (1.0 + e * cos_nu);
    if !r.is_finite() || r <= 0.0 {
        return Err(OrbitError::Degenerate("orbital radius"));
    }

    let h = (mu * a * (1.0 - e * e)).sqrt();
    let position_pqw = [r * cos_nu, r * sin_nu, 0.0];
    let velocity_pqw = [-(mu / h) * sin_nu, (mu / h) * (e + cos_nu), 0.0];

    let rotation = perifocal_to_inertial(
        elements.raan_deg.to_radians(),
        elements.inclination_deg.to_radians(),
        elements.arg_periapsis_deg.to_radians(),
    );
    let position_km = vector::mat_mul_vec(&rotation, &position_pqw);
    let velocity_km_s = vector::mat_mul_vec(&rotation, &velocity_pqw);

    if !vector::is_finite(&position_km) {
        return Err(OrbitError::Degenerate("position"));
    }
    if !vector::is_finite(&velocity_km_s) {
        return Err(OrbitError::Degenerate("velocity"));
    }

    Ok(StateVector {
        position_km,
        velocity_km_s,
        epoch: elements.epoch,
    })
}

/// Sample `num_points` positions with true anomaly spaced uniformly over [0°, 360°).
///
/// Points whose conversion fails are dropped, so an invalid orbit yields an empty path.
pub fn generate_trajectory(
    elements: &OrbitalElements,
    body: &CentralBody,
    num_points: usize,
) -> Vec<TrajectoryPoint> {
    let mut points = Vec::with_capacity(num_points);
    for k in 0..num_points {
        let true_anomaly_deg = 360.0 * k as f64 / num_points as f64;
        match elements_to_state_vector(&elements.with_true_anomaly(true_anomaly_deg), body) {
            Ok(state) => points.push(TrajectoryPoint {
                position_km: state.position_km,
                true_anomaly_deg,
            }),
            Err(err) => {
                tracing::debug!(true_anomaly_deg, %err, "skipping trajectory sample");
            }
        }
    }
    points
}
