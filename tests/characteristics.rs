use astro_playground::common::CentralBody;
use astro_playground::common::time::seconds_to_minutes;
use astro_playground::orbits::characteristics::{
    circular_velocity, escape_velocity, orbital_period, orbital_velocity,
};
use astro_playground::orbits::elements::j2000;
use astro_playground::orbits::{OrbitClass, OrbitError, OrbitalElements, calculate_characteristics};

fn circular(altitude_km: f64, inclination_deg: f64) -> OrbitalElements {
    OrbitalElements::circular(&CentralBody::earth(), altitude_km, inclination_deg, j2000())
}

fn assert_relative(actual: f64, expected: f64, tolerance: f64, what: &str) {
    let rel = (actual - expected).abs() / expected.abs();
    assert!(
        rel <= tolerance,
        "{what}: got {actual}, expected {expected} (relative error {rel:.2e})"
    );
}

#[test]
fn reference_periods() {
    let body = CentralBody::earth();
    let iss = calculate_characteristics(&circular(420.0, 51.6), &body).unwrap();
    assert_relative(seconds_to_minutes(iss.period_s), 92.68, 5e-3, "ISS period");

    let gps = calculate_characteristics(&circular(20_200.0, 55.0), &body).unwrap();
    assert_relative(seconds_to_minutes(gps.period_s), 718.0, 1e-3, "GPS period");

    let geo = calculate_characteristics(&circular(35_786.0, 0.0), &body).unwrap();
    assert_relative(seconds_to_minutes(geo.period_s), 1436.0, 1e-4, "GEO period");
}

#[test]
fn speeds_follow_vis_viva() {
    let body = CentralBody::earth();
    let elements = OrbitalElements {
        semi_major_axis_km: 12_000.0,
        eccentricity: 0.3,
        inclination_deg: 30.0,
        raan_deg: 10.0,
        arg_periapsis_deg: 20.0,
        true_anomaly_deg: 75.0,
        epoch: j2000(),
    };
    let c = calculate_characteristics(&elements, &body).unwrap();
    let r = elements.radius_km();

    assert_relative(
        c.speed_km_s,
        orbital_velocity(r, 12_000.0, body.mu_km3_s2),
        1e-5,
        "instantaneous speed",
    );
    assert_relative(
        c.perigee_velocity_km_s,
        orbital_velocity(8_400.0, 12_000.0, body.mu_km3_s2),
        1e-9,
        "perigee speed",
    );
    assert_relative(
        c.circular_velocity_km_s,
        circular_velocity(r, body.mu_km3_s2),
        1e-9,
        "circular",
    );
    assert_relative(c.escape_velocity_km_s, escape_velocity(r, body.mu_km3_s2), 1e-9, "escape");
    assert_relative(
        c.escape_velocity_km_s / c.circular_velocity_km_s,
        2f64.sqrt(),
        1e-12,
        "escape/circular ratio",
    );
    assert_relative(
        c.specific_energy_km2_s2,
        c.speed_km_s.powi(2) / 2.0 - body.mu_km3_s2 / r,
        1e-6,
        "specific energy",
    );
}

#[test]
fn apsides_are_ordered() {
    let body = CentralBody::earth();
    for e in [0.0, 0.01, 0.3, 0.7] {
        let elements = OrbitalElements {
            eccentricity: e,
            ..circular(8_000.0, 45.0)
        };
        let c = calculate_characteristics(&elements, &body).unwrap();
        assert!(c.perigee_altitude_km <= c.altitude_km + 1e-6, "e = {e}");
        assert!(c.altitude_km <= c.apogee_altitude_km + 1e-6, "e = {e}");
        assert!(c.apogee_velocity_km_s <= c.perigee_velocity_km_s, "e = {e}");
    }
}

#[test]
fn mean_motion_units_agree() {
    let body = CentralBody::earth();
    let c = calculate_characteristics(&circular(35_786.0, 0.0), &body).unwrap();
    assert_relative(c.mean_motion_rev_per_day, 86_400.0 / c.period_s, 1e-12, "rev/day");
    assert_relative(c.mean_motion_deg_s * c.period_s, 360.0, 1e-12, "deg per period");
    assert_relative(
        orbital_period(c.semi_major_axis_km, body.mu_km3_s2),
        c.period_s,
        0.0,
        "period",
    );
}

#[test]
fn invalid_inputs_are_rejected() {
    let body = CentralBody::earth();
    let buried = OrbitalElements {
        semi_major_axis_km: 6_000.0,
        ..circular(500.0, 0.0)
    };
    let err = calculate_characteristics(&buried, &body).unwrap_err();
    assert!(matches!(err, OrbitError::SemiMajorAxisInsideBody { .. }));
    assert!(err.is_invalid_input());

    for e in [-0.01, 1.0, 2.0, f64::NAN] {
        let bad = OrbitalElements {
            eccentricity: e,
            ..circular(500.0, 0.0)
        };
        assert!(matches!(
            calculate_characteristics(&bad, &body),
            Err(OrbitError::EccentricityOutOfRange(_))
        ));
    }

    let nan_axis = OrbitalElements {
        semi_major_axis_km: f64::NAN,
        ..circular(500.0, 0.0)
    };
    assert!(calculate_characteristics(&nan_axis, &body).is_err());
}

#[test]
fn classification_rules_apply_in_order() {
    assert_eq!(OrbitClass::classify(35_786.0, 0.0, 0.0), OrbitClass::Geostationary);
    // Off the geostationary inclination band falls through to altitude.
    assert_eq!(OrbitClass::classify(35_786.0, 20.0, 0.0), OrbitClass::HighEarth);
    assert_eq!(OrbitClass::classify(800.0, 90.0, 0.0), OrbitClass::Polar);
    assert_eq!(OrbitClass::classify(786.0, 98.6, 0.001), OrbitClass::SunSynchronous);
    // Polar takes precedence over eccentricity.
    assert_eq!(OrbitClass::classify(20_000.0, 88.0, 0.7), OrbitClass::Polar);
    assert_eq!(OrbitClass::classify(20_222.0, 63.4, 0.74), OrbitClass::HighlyElliptical);
    assert_eq!(OrbitClass::classify(420.0, 51.6, 0.0005), OrbitClass::LowEarth);
    assert_eq!(OrbitClass::classify(20_200.0, 55.0, 0.01), OrbitClass::MediumEarth);
    assert_eq!(OrbitClass::classify(100_000.0, 10.0, 0.1), OrbitClass::HighEarth);
    assert_eq!(OrbitClass::SunSynchronous.to_string(), "sun-synchronous");
}
