//! Analytic estimators for impulsive transfers in the coplanar, circular limit.
//!
//! Radii are measured from the centre of the central body in kilometres. The velocity
//! arithmetic is done in km/s and burns are reported in m/s.

use std::f64::consts::PI;

use astro_core::CentralBody;
use astro_core::time::format_duration;
use astro_core::units::kms_to_ms;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use thiserror::Error;

/// Radii closer than this are treated as the same orbit.
const SAME_ORBIT_TOLERANCE_KM: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransferError {
    #[error("{which} radius must be finite (got {value})")]
    NonFinite { which: &'static str, value: f64 },
    #[error(
        "{which} radius {radius_km} km must exceed the central body radius {body_radius_km} km"
    )]
    RadiusInsideBody {
        which: &'static str,
        radius_km: f64,
        body_radius_km: f64,
    },
    #[error(
        "intermediate radius {intermediate_km} km must exceed both the initial ({initial_km} km) \
         and final ({final_km} km) radii"
    )]
    IntermediateRadiusTooLow {
        intermediate_km: f64,
        initial_km: f64,
        final_km: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TransferKind {
    Hohmann,
    BiElliptic { intermediate_radius_km: f64 },
}

/// Manoeuvre plan between two circular orbits. Burns are magnitudes in m/s.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferResult {
    pub kind: TransferKind,
    pub initial_radius_km: f64,
    pub target_radius_km: f64,
    pub first_burn_m_s: f64,
    /// For bi-elliptic transfers this combines both burns made at the intermediate radius.
    pub second_burn_m_s: f64,
    /// Circularisation at the target radius of a bi-elliptic transfer.
    pub third_burn_m_s: Option<f64>,
    pub total_delta_v_m_s: f64,
    pub transfer_time_s: f64,
    /// Approximate lead of the target at departure: 180·(1 − t_transfer / T_target).
    pub phase_angle_deg: f64,
    pub first_burn_at: DateTime<Utc>,
    pub second_burn_at: DateTime<Utc>,
    pub third_burn_at: Option<DateTime<Utc>>,
    pub description: String,
}

/// Half of a transfer ellipse joining circular orbits at `r_from` and `r_to`.
#[derive(Debug, Clone, Copy)]
struct HalfEllipse {
    /// Signed: negative for a retrograde burn when moving inward.
    depart_dv_km_s: f64,
    arrive_dv_km_s: f64,
    coast_s: f64,
}

fn half_ellipse(r_from: f64, r_to: f64, mu: f64) -> HalfEllipse {
    let v_from = (mu / r_from).sqrt();
    let v_to = (mu / r_to).sqrt();
    let a_t = 0.5 * (r_from + r_to);

    // Transfer-orbit speeds at both ends (vis-viva)
    let v_t_from = (mu * (2.0 / r_from - 1.0 / a_t)).sqrt();
    let v_t_to = (mu * (2.0 / r_to - 1.0 / a_t)).sqrt();

    HalfEllipse {
        depart_dv_km_s: v_t_from - v_from,
        arrive_dv_km_s: v_to - v_t_to,
        coast_s: PI * (a_t.powi(3) / mu).sqrt(),
    }
}

fn check_radius(
    which: &'static str,
    radius_km: f64,
    body: &CentralBody,
) -> Result<(), TransferError> {
    if !radius_km.is_finite() {
        return Err(TransferError::NonFinite {
            which,
            value: radius_km,
        });
    }
    if radius_km <= body.radius_km {
        return Err(TransferError::RadiusInsideBody {
            which,
            radius_km,
            body_radius_km: body.radius_km,
        });
    }
    Ok(())
}

fn phase_angle_deg(transfer_time_s: f64, target_radius_km: f64, mu: f64) -> f64 {
    let target_period = 2.0 * PI * (target_radius_km.powi(3) / mu).sqrt();
    180.0 * (1.0 - transfer_time_s / target_period)
}

fn after(departure: DateTime<Utc>, seconds: f64) -> DateTime<Utc> {
    TimeDelta::try_milliseconds((seconds * 1_000.0).round() as i64)
        .and_then(|delta| departure.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn direction(dv_km_s: f64) -> &'static str {
    if dv_km_s >= 0.0 { "prograde" } else { "retrograde" }
}

/// Two-burn Hohmann transfer from a circular orbit at `r1_km` to one at `r2_km`.
///
/// Radii within 0.1 km of each other yield a zero-cost, zero-duration plan.
pub fn hohmann_transfer(
    body: &CentralBody,
    r1_km: f64,
    r2_km: f64,
    departure: DateTime<Utc>,
) -> Result<TransferResult, TransferError> {
    check_radius("initial", r1_km, body)?;
    check_radius("target", r2_km, body)?;

    if (r1_km - r2_km).abs() < SAME_ORBIT_TOLERANCE_KM {
        return Ok(TransferResult {
            kind: TransferKind::Hohmann,
            initial_radius_km: r1_km,
            target_radius_km: r2_km,
            first_burn_m_s: 0.0,
            second_burn_m_s: 0.0,
            third_burn_m_s: None,
            total_delta_v_m_s: 0.0,
            transfer_time_s: 0.0,
            phase_angle_deg: 0.0,
            first_burn_at: departure,
            second_burn_at: departure,
            third_burn_at: None,
            description: format!(
                "Initial and target orbits are the same ({r1_km:.1} km): no transfer is needed. \
                 Burn 1: 0.0 m/s, burn 2: 0.0 m/s, transfer time 0 s."
            ),
        });
    }

    let mu = body.mu_km3_s2;
    let leg = half_ellipse(r1_km, r2_km, mu);
    let first = kms_to_ms(leg.depart_dv_km_s.abs());
    let second = kms_to_ms(leg.arrive_dv_km_s.abs());
    let total = first + second;
    let phase = phase_angle_deg(leg.coast_s, r2_km, mu);
    let coast = format_duration(leg.coast_s);

    let description = format!(
        "Hohmann transfer from {r1_km:.0} km to {r2_km:.0} km. \
         Burn 1: {first:.1} m/s {} to enter the transfer ellipse. \
         Coast {coast} ({:.0} s) to the opposite apsis. \
         Burn 2: {second:.1} m/s {} to circularize. \
         Total delta-v {total:.1} m/s, total transfer time {coast}; \
         start when the target leads by about {phase:.1} deg.",
        direction(leg.depart_dv_km_s),
        leg.coast_s,
        direction(leg.arrive_dv_km_s),
    );

    tracing::debug!(r1_km, r2_km, total_delta_v_m_s = total, "computed hohmann transfer");

    Ok(TransferResult {
        kind: TransferKind::Hohmann,
        initial_radius_km: r1_km,
        target_radius_km: r2_km,
        first_burn_m_s: first,
        second_burn_m_s: second,
        third_burn_m_s: None,
        total_delta_v_m_s: total,
        transfer_time_s: leg.coast_s,
        phase_angle_deg: phase,
        first_burn_at: departure,
        second_burn_at: after(departure, leg.coast_s),
        third_burn_at: None,
        description,
    })
}

/// [`hohmann_transfer`] departing at the current wall-clock time.
pub fn hohmann_transfer_now(
    body: &CentralBody,
    r1_km: f64,
    r2_km: f64,
) -> Result<TransferResult, TransferError> {
    hohmann_transfer(body, r1_km, r2_km, Utc::now())
}

/// Bi-elliptic transfer via an intermediate circular radius `rb_km`.
///
/// The plan chains two half ellipses (r1 → rb, rb → r2). The two burns at `rb_km` are
/// reported together as the second burn and the circularisation at `r2_km` as the third.
pub fn bi_elliptic_transfer(
    body: &CentralBody,
    r1_km: f64,
    r2_km: f64,
    rb_km: f64,
    departure: DateTime<Utc>,
) -> Result<TransferResult, TransferError> {
    check_radius("initial", r1_km, body)?;
    check_radius("target", r2_km, body)?;
    check_radius("intermediate", rb_km, body)?;
    if rb_km <= r1_km || rb_km <= r2_km {
        return Err(TransferError::IntermediateRadiusTooLow {
            intermediate_km: rb_km,
            initial_km: r1_km,
            final_km: r2_km,
        });
    }

    let mu = body.mu_km3_s2;
    let outbound = half_ellipse(r1_km, rb_km, mu);
    let inbound = half_ellipse(rb_km, r2_km, mu);

    let first = kms_to_ms(outbound.depart_dv_km_s.abs());
    let second = kms_to_ms(outbound.arrive_dv_km_s.abs() + inbound.depart_dv_km_s.abs());
    let third = kms_to_ms(inbound.arrive_dv_km_s.abs());
    let total = first + second + third;
    let transfer_time = outbound.coast_s + inbound.coast_s;
    let phase = phase_angle_deg(transfer_time, r2_km, mu);

    let description = format!(
        "Bi-elliptic transfer from {r1_km:.0} km to {r2_km:.0} km via {rb_km:.0} km. \
         Burn 1: {first:.1} m/s prograde to raise apoapsis to the intermediate radius. \
         Coast {}. \
         Burn 2: {second:.1} m/s combined at the intermediate radius to set up the descent. \
         Coast {}. \
         Burn 3: {third:.1} m/s retrograde to circularize. \
         Total delta-v {total:.1} m/s, total transfer time {} ({transfer_time:.0} s).",
        format_duration(outbound.coast_s),
        format_duration(inbound.coast_s),
        format_duration(transfer_time),
    );

    tracing::debug!(
        r1_km,
        r2_km,
        rb_km,
        total_delta_v_m_s = total,
        "computed bi-elliptic transfer"
    );

    Ok(TransferResult {
        kind: TransferKind::BiElliptic {
            intermediate_radius_km: rb_km,
        },
        initial_radius_km: r1_km,
        target_radius_km: r2_km,
        first_burn_m_s: first,
        second_burn_m_s: second,
        third_burn_m_s: Some(third),
        total_delta_v_m_s: total,
        transfer_time_s: transfer_time,
        phase_angle_deg: phase,
        first_burn_at: departure,
        second_burn_at: after(departure, outbound.coast_s),
        third_burn_at: Some(after(departure, transfer_time)),
        description,
    })
}

/// [`bi_elliptic_transfer`] departing at the current wall-clock time.
pub fn bi_elliptic_transfer_now(
    body: &CentralBody,
    r1_km: f64,
    r2_km: f64,
    rb_km: f64,
) -> Result<TransferResult, TransferError> {
    bi_elliptic_transfer(body, r1_km, r2_km, rb_km, Utc::now())
}
