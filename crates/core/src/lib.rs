//! Central-body constants, unit conversions and small vector helpers shared across the
//! Astrodynamics Playground workspace.
//!
//! The engine works internally in kilometres, seconds and kilometres per second. Angles
//! cross the public API in degrees and are converted to radians at the formula boundary.

/// Physical constants expressed in engine units (km, s) unless stated otherwise.
pub mod constants {
    /// Mean equatorial radius of the Earth (km, WGS-84).
    pub const EARTH_RADIUS_KM: f64 = 6_378.137;
    /// Standard gravitational parameter of the Earth (km³/s²).
    pub const EARTH_MU_KM3_S2: f64 = 398_600.441_8;
    /// Altitude of the geostationary belt above the equator (km).
    pub const GEOSTATIONARY_ALTITUDE_KM: f64 = 35_786.0;
    /// Inclination typical of sun-synchronous low orbits (degrees).
    pub const SUN_SYNCHRONOUS_INCLINATION_DEG: f64 = 98.7;
    /// Seconds per mean solar day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
}

/// A spherical central body described by its radius and gravitational parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralBody {
    pub name: String,
    pub radius_km: f64,
    pub mu_km3_s2: f64,
}

impl CentralBody {
    /// The Earth, using WGS-84 radius and the standard gravitational parameter.
    pub fn earth() -> Self {
        Self {
            name: "EARTH".to_string(),
            radius_km: constants::EARTH_RADIUS_KM,
            mu_km3_s2: constants::EARTH_MU_KM3_S2,
        }
    }

    pub fn new(name: impl Into<String>, radius_km: f64, mu_km3_s2: f64) -> Self {
        Self {
            name: name.into(),
            radius_km,
            mu_km3_s2,
        }
    }

    /// Radius measured from the body centre for a given altitude above the surface.
    #[inline]
    pub fn radius_at_altitude(&self, altitude_km: f64) -> f64 {
        self.radius_km + altitude_km
    }

    /// Altitude above the surface for a radius measured from the body centre.
    #[inline]
    pub fn altitude_at_radius(&self, radius_km: f64) -> f64 {
        radius_km - self.radius_km
    }
}

impl Default for CentralBody {
    fn default() -> Self {
        Self::earth()
    }
}

/// Basic unit conversion helpers.
pub mod units {
    use std::f64::consts::TAU;

    /// Convert kilometres per second to metres per second.
    #[inline]
    pub fn kms_to_ms(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Wrap an angle in degrees into [0, 360).
    pub fn wrap_degrees(angle_deg: f64) -> f64 {
        let wrapped = angle_deg.rem_euclid(360.0);
        // rem_euclid can round up to the modulus for tiny negative inputs
        if wrapped >= 360.0 { 0.0 } else { wrapped }
    }

    /// Wrap an angle in radians into [0, 2π).
    pub fn wrap_radians(angle_rad: f64) -> f64 {
        let wrapped = angle_rad.rem_euclid(TAU);
        if wrapped >= TAU { 0.0 } else { wrapped }
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::SECONDS_PER_DAY;

    /// Convert days to seconds.
    #[inline]
    pub fn days_to_seconds(days: f64) -> f64 {
        days * SECONDS_PER_DAY
    }

    #[inline]
    pub fn seconds_to_minutes(seconds: f64) -> f64 {
        seconds / 60.0
    }

    /// Split a non-negative duration into whole (days, hours, minutes).
    pub fn split_duration(seconds: f64) -> (i64, i64, i64) {
        let total_seconds = seconds.max(0.0);
        let days = (total_seconds / SECONDS_PER_DAY).floor() as i64;
        let remaining = total_seconds - (days as f64 * SECONDS_PER_DAY);
        let hours = (remaining / 3_600.0).floor() as i64;
        let minutes = ((remaining - hours as f64 * 3_600.0) / 60.0).floor() as i64;
        (days, hours, minutes)
    }

    /// Human-readable duration, e.g. `5 h 17 min` or `2 d 3 h 0 min`.
    pub fn format_duration(seconds: f64) -> String {
        let (d, h, m) = split_duration(seconds);
        if d > 0 {
            format!("{d} d {h} h {m} min")
        } else if h > 0 {
            format!("{h} h {m} min")
        } else {
            let secs = seconds.max(0.0) - (m as f64) * 60.0;
            format!("{m} min {secs:.0} s")
        }
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in kilometres or km/s depending on context.
    pub type Vector3 = [f64; 3];

    /// Row-major 3×3 matrix.
    pub type Matrix3 = [[f64; 3]; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Cross product of two vectors.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Matrix-vector product.
    #[inline]
    pub fn mat_mul_vec(m: &Matrix3, v: &Vector3) -> Vector3 {
        [dot(&m[0], v), dot(&m[1], v), dot(&m[2], v)]
    }

    /// True when every component is finite.
    #[inline]
    pub fn is_finite(v: &Vector3) -> bool {
        v.iter().all(|c| c.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_degrees_handles_negative_and_overflow() {
        assert_eq!(units::wrap_degrees(-90.0), 270.0);
        assert_eq!(units::wrap_degrees(720.0), 0.0);
        assert!((units::wrap_degrees(361.5) - 1.5).abs() < 1e-12);
        assert!(units::wrap_degrees(-1e-18) < 360.0);
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(time::format_duration(5.0 * 3_600.0 + 17.0 * 60.0), "5 h 17 min");
        assert_eq!(time::format_duration(86_400.0 + 60.0), "1 d 0 h 1 min");
        assert_eq!(time::format_duration(90.0), "1 min 30 s");
    }

    #[test]
    fn cross_product_of_basis_vectors() {
        assert_eq!(vector::cross(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
    }
}
