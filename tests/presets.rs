use std::fs;

use astro_playground::config::load_bodies;
use astro_playground::orbits::{OrbitClass, calculate_characteristics};
use astro_playground::params::{ElementParameter, ParameterAssignment, ParameterError, apply_all};
use astro_playground::presets::{
    DEFAULT_BODY_PATH, DEFAULT_PRESETS_PATH, PresetError, find_body, find_preset, load_body,
    load_preset_catalog,
};

#[test]
fn earth_catalog_matches_engine_constants() {
    let earth = load_body(DEFAULT_BODY_PATH).expect("earth body");
    assert_eq!(earth.name, "EARTH");
    assert_eq!(earth.radius_km, 6_378.137);
    assert_eq!(earth.mu_km3_s2, 398_600.441_8);
}

#[test]
fn body_directory_loads_every_body() {
    let bodies = load_bodies("configs/bodies").expect("body directory");
    assert!(bodies.len() >= 3);
    let moon = find_body(&bodies, "moon").expect("moon");
    assert!(moon.radius_km < 2_000.0);
    assert!(matches!(
        find_body(&bodies, "Pluto"),
        Err(PresetError::NotFound(_))
    ));
}

#[test]
fn preset_catalog_classifies_canonical_orbits() {
    let earth = load_body(DEFAULT_BODY_PATH).unwrap();
    let presets = load_preset_catalog(DEFAULT_PRESETS_PATH, &earth).expect("preset catalog");
    assert_eq!(presets.len(), 5);

    let expected = [
        ("ISS", OrbitClass::LowEarth),
        ("GPS", OrbitClass::MediumEarth),
        ("GEO", OrbitClass::Geostationary),
        ("Molniya", OrbitClass::HighlyElliptical),
        ("Sun-sync", OrbitClass::SunSynchronous),
    ];
    for (name, class) in expected {
        let preset = find_preset(&presets, name).expect(name);
        let c = calculate_characteristics(&preset.elements, &earth).unwrap();
        assert_eq!(c.orbit_class, class, "{name}");
    }

    let iss = find_preset(&presets, "iss").unwrap();
    assert!((iss.elements.semi_major_axis_km - 6_798.137).abs() < 1e-9);
    assert_eq!(iss.elements.epoch.to_rfc3339(), "2024-01-01T00:00:00+00:00");
}

#[test]
fn preset_with_both_sizes_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.yaml");
    fs::write(
        &path,
        "- name: Confused\n  semi_major_axis_km: 7000.0\n  altitude_km: 600.0\n",
    )
    .unwrap();

    let earth = load_body(DEFAULT_BODY_PATH).unwrap();
    let err = load_preset_catalog(&path, &earth).unwrap_err();
    assert!(err.to_string().contains("Confused"), "{err}");
}

#[test]
fn preset_inside_body_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("low.yaml");
    fs::write(&path, "- name: Buried\n  altitude_km: -100.0\n").unwrap();

    let earth = load_body(DEFAULT_BODY_PATH).unwrap();
    assert!(matches!(
        load_preset_catalog(&path, &earth),
        Err(PresetError::InvalidOrbit { .. })
    ));
}

#[test]
fn assignments_parse_aliases() {
    let a: ParameterAssignment = "inc=98.7".parse().unwrap();
    assert_eq!(a.parameter, ElementParameter::Inclination);
    assert_eq!(a.value, 98.7);

    let b: ParameterAssignment = " Arg_Periapsis = 270 ".parse().unwrap();
    assert_eq!(b.parameter, ElementParameter::ArgumentOfPeriapsis);

    assert!(matches!(
        "warp=9".parse::<ParameterAssignment>(),
        Err(ParameterError::UnknownParameter(_))
    ));
    assert!(matches!(
        "ecc".parse::<ParameterAssignment>(),
        Err(ParameterError::MalformedAssignment(_))
    ));
    assert!(matches!(
        "ecc=lots".parse::<ParameterAssignment>(),
        Err(ParameterError::InvalidNumber { .. })
    ));
}

#[test]
fn edits_apply_in_order_and_stop_at_invalid_orbit() {
    let earth = load_body(DEFAULT_BODY_PATH).unwrap();
    let presets = load_preset_catalog(DEFAULT_PRESETS_PATH, &earth).unwrap();
    let iss = find_preset(&presets, "ISS").unwrap();

    let edits: Vec<ParameterAssignment> = ["alt=786", "inc=98.7"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let edited = apply_all(&iss.elements, &earth, &edits).unwrap();
    assert!((ElementParameter::Altitude.get(&edited, &earth) - 786.0).abs() < 1e-9);
    let c = calculate_characteristics(&edited, &earth).unwrap();
    assert_eq!(c.orbit_class, OrbitClass::SunSynchronous);

    let bad: Vec<ParameterAssignment> = ["inc=10", "e=1.0"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let err = apply_all(&iss.elements, &earth, &bad).unwrap_err();
    assert!(matches!(
        err,
        ParameterError::InvalidOrbit {
            parameter: ElementParameter::Eccentricity,
            ..
        }
    ));
}
