//! Kepler's equation and conversions between mean, eccentric and true anomaly.
//!
//! All angles in this module are in radians.

use astro_core::units::wrap_radians;
use serde::Serialize;

use crate::error::OrbitError;

/// Below this derivative magnitude a Newton step is not attempted.
const MIN_DERIVATIVE: f64 = 1e-12;

/// Stopping criteria for [`solve_kepler`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerOptions {
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl Default for KeplerOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 50,
        }
    }
}

/// Outcome of a Kepler solve. Exiting on the iteration cap is not an error; check `converged`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeplerSolution {
    pub eccentric_anomaly: f64,
    pub iterations: u32,
    /// Magnitude of the last Newton correction.
    pub error: f64,
    pub converged: bool,
}

fn check_eccentricity(eccentricity: f64) -> Result<(), OrbitError> {
    if (0.0..1.0).contains(&eccentricity) {
        Ok(())
    } else {
        Err(OrbitError::EccentricityOutOfRange(eccentricity))
    }
}

/// Solve E − e·sin(E) = M for the eccentric anomaly using safeguarded Newton-Raphson.
///
/// The mean anomaly is first wrapped into [0, 2π). The root always lies in [M − e, M + e];
/// that bracket shrinks every iteration, and a Newton step that would leave it, or that is
/// not shorter than the previous step, is replaced by bisection. The returned anomaly
/// therefore stays inside the bracket even when the cap is hit. A circular orbit (e = 0)
/// returns E = M after a single iteration.
pub fn solve_kepler(
    mean_anomaly: f64,
    eccentricity: f64,
    options: &KeplerOptions,
) -> Result<KeplerSolution, OrbitError> {
    check_eccentricity(eccentricity)?;
    if !mean_anomaly.is_finite() {
        return Err(OrbitError::NonFinite {
            quantity: "mean anomaly",
            value: mean_anomaly,
        });
    }

    let m = wrap_radians(mean_anomaly);
    let mut lo = m - eccentricity;
    let mut hi = m + eccentricity;
    let mut e_anom = m + eccentricity * m.sin();
    let mut last_step = f64::INFINITY;
    let mut iterations = 0;
    let mut error = f64::INFINITY;

    while iterations < options.max_iterations {
        let f = e_anom - eccentricity * e_anom.sin() - m;
        if f < 0.0 {
            lo = e_anom;
        } else {
            hi = e_anom;
        }

        let f_prime = 1.0 - eccentricity * e_anom.cos();
        let newton = (f_prime.abs() >= MIN_DERIVATIVE)
            .then(|| e_anom - f / f_prime)
            .filter(|next| (lo..=hi).contains(next) && (next - e_anom).abs() < last_step);
        let next = newton.unwrap_or_else(|| 0.5 * (lo + hi));

        let step = (next - e_anom).abs();
        e_anom = next;
        iterations += 1;
        error = step;
        last_step = step;
        if error <= options.tolerance {
            break;
        }
    }

    let converged = error <= options.tolerance;
    if !converged {
        tracing::warn!(
            mean_anomaly = m,
            eccentricity,
            iterations,
            error,
            "kepler solver stopped without converging"
        );
    }

    Ok(KeplerSolution {
        eccentric_anomaly: e_anom,
        iterations,
        error,
        converged,
    })
}

/// [`solve_kepler`] with the default tolerance (1e-8) and iteration cap (50).
pub fn solve_kepler_default(
    mean_anomaly: f64,
    eccentricity: f64,
) -> Result<KeplerSolution, OrbitError> {
    solve_kepler(mean_anomaly, eccentricity, &KeplerOptions::default())
}

fn half_angle_factor(eccentricity: f64) -> f64 {
    ((1.0 + eccentricity) / (1.0 - eccentricity)).sqrt()
}

/// tan(ν/2) = √((1+e)/(1−e))·tan(E/2). The result stays on the same revolution as `E`.
pub fn eccentric_to_true(eccentric_anomaly: f64, eccentricity: f64) -> Result<f64, OrbitError> {
    check_eccentricity(eccentricity)?;
    let half = eccentric_anomaly / 2.0;
    // atan2 of the scaled half-angle keeps the quadrant that plain atan(tan) would lose
    let nu_half = (half_angle_factor(eccentricity) * half.sin()).atan2(half.cos());
    Ok(2.0 * nu_half)
}

pub fn mean_to_true(mean_anomaly: f64, eccentricity: f64) -> Result<f64, OrbitError> {
    let solution = solve_kepler_default(mean_anomaly, eccentricity)?;
    eccentric_to_true(solution.eccentric_anomaly, eccentricity)
}

pub fn true_to_eccentric(true_anomaly: f64, eccentricity: f64) -> Result<f64, OrbitError> {
    check_eccentricity(eccentricity)?;
    let half = true_anomaly / 2.0;
    Ok(2.0 * half.sin().atan2(half_angle_factor(eccentricity) * half.cos()))
}

/// M = E − e·sin(E).
pub fn eccentric_to_mean(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    eccentric_anomaly - eccentricity * eccentric_anomaly.sin()
}

pub fn true_to_mean(true_anomaly: f64, eccentricity: f64) -> Result<f64, OrbitError> {
    let e_anom = true_to_eccentric(true_anomaly, eccentricity)?;
    Ok(eccentric_to_mean(e_anom, eccentricity))
}
