//! Classical orbital elements, the canonical description of an orbit at an epoch.

use astro_core::CentralBody;
use astro_core::units::wrap_degrees;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::OrbitError;

/// Classical Keplerian elements. Angles are in degrees.
///
/// Only the semi-major axis and the eccentricity are checked (see [`OrbitalElements::validate`]);
/// angles outside their conventional ranges are accepted and wrap through trigonometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    /// Right ascension of the ascending node.
    pub raan_deg: f64,
    pub arg_periapsis_deg: f64,
    pub true_anomaly_deg: f64,
    pub epoch: DateTime<Utc>,
}

/// The J2000 reference epoch, 2000-01-01 12:00:00 UTC.
pub fn j2000() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

impl OrbitalElements {
    /// A circular orbit at the given altitude with all node/periapsis angles at zero.
    pub fn circular(
        body: &CentralBody,
        altitude_km: f64,
        inclination_deg: f64,
        epoch: DateTime<Utc>,
    ) -> Self {
        Self {
            semi_major_axis_km: body.radius_at_altitude(altitude_km),
            eccentricity: 0.0,
            inclination_deg,
            raan_deg: 0.0,
            arg_periapsis_deg: 0.0,
            true_anomaly_deg: 0.0,
            epoch,
        }
    }

    /// Check the two enforced invariants: the orbit clears the body and is a bound ellipse.
    pub fn validate(&self, body: &CentralBody) -> Result<(), OrbitError> {
        // Written as negated comparisons so NaN fails them too.
        if !(self.semi_major_axis_km > body.radius_km) || self.semi_major_axis_km.is_infinite() {
            return Err(OrbitError::SemiMajorAxisInsideBody {
                semi_major_axis_km: self.semi_major_axis_km,
                body_radius_km: body.radius_km,
            });
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(OrbitError::EccentricityOutOfRange(self.eccentricity));
        }
        Ok(())
    }

    pub fn with_true_anomaly(self, true_anomaly_deg: f64) -> Self {
        Self {
            true_anomaly_deg,
            ..self
        }
    }

    /// Copy with the true anomaly wrapped into [0, 360).
    pub fn normalized(self) -> Self {
        self.with_true_anomaly(wrap_degrees(self.true_anomaly_deg))
    }

    /// p = a(1 − e²).
    pub fn semi_latus_rectum_km(&self) -> f64 {
        self.semi_major_axis_km * (1.0 - self.eccentricity * self.eccentricity)
    }

    pub fn periapsis_radius_km(&self) -> f64 {
        self.semi_major_axis_km * (1.0 - self.eccentricity)
    }

    pub fn apoapsis_radius_km(&self) -> f64 {
        self.semi_major_axis_km * (1.0 + self.eccentricity)
    }

    /// Conic radius at the current true anomaly.
    pub fn radius_km(&self) -> f64 {
        let nu = self.true_anomaly_deg.to_radians();
        self.semi_latus_rectum_km() / (1.0 + self.eccentricity * nu.cos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leo() -> OrbitalElements {
        OrbitalElements::circular(&CentralBody::earth(), 500.0, 28.5, j2000())
    }

    #[test]
    fn rejects_semi_major_axis_inside_body() {
        let body = CentralBody::earth();
        let elements = OrbitalElements {
            semi_major_axis_km: body.radius_km - 1.0,
            ..leo()
        };
        assert!(matches!(
            elements.validate(&body),
            Err(OrbitError::SemiMajorAxisInsideBody { .. })
        ));
    }

    #[test]
    fn rejects_unbound_and_nan_eccentricity() {
        let body = CentralBody::earth();
        for e in [1.0, 1.5, -0.1, f64::NAN] {
            let elements = OrbitalElements {
                eccentricity: e,
                ..leo()
            };
            assert!(matches!(
                elements.validate(&body),
                Err(OrbitError::EccentricityOutOfRange(_))
            ));
        }
    }

    #[test]
    fn out_of_range_angles_are_accepted() {
        let elements = OrbitalElements {
            inclination_deg: 270.0,
            raan_deg: -45.0,
            true_anomaly_deg: 1_000.0,
            ..leo()
        };
        assert!(elements.validate(&CentralBody::earth()).is_ok());
        assert!((elements.normalized().true_anomaly_deg - 280.0).abs() < 1e-9);
    }
}
