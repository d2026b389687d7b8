use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn orbit() -> Command {
    Command::cargo_bin("orbit").expect("orbit bin")
}

#[test]
fn presets_are_listed_with_their_class() {
    orbit()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Presets (EARTH) ==="))
        .stdout(predicate::str::contains("Molniya"))
        .stdout(predicate::str::contains("[geostationary]"));
}

#[test]
fn characteristics_report_for_preset() {
    orbit()
        .args(["characteristics", "--preset", "gps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Orbit: GPS (medium-earth) ==="))
        .stdout(predicate::str::contains("Period"));
}

#[test]
fn overrides_change_the_orbit() {
    orbit()
        .args(["characteristics", "--preset", "ISS", "--set", "inc=90"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ISS (edited) (polar)"));

    orbit()
        .args(["characteristics", "--set", "ecc=1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("eccentricity"));
}

#[test]
fn characteristics_json_to_stdout() {
    let output = orbit()
        .args(["characteristics", "--preset", "GEO", "--json", "-"])
        .output()
        .expect("run orbit");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.trim_start().starts_with('{'), "{text}");
    assert!(text.contains("\"orbit_class\": \"geostationary\""));
    assert!(!text.contains("==="));
}

#[test]
fn kepler_solution_is_printed() {
    orbit()
        .args(["kepler", "--mean-anomaly", "-90", "--eccentricity", "0.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("converged = true"));
}

#[test]
fn hohmann_plan_and_invalid_radius() {
    orbit()
        .args([
            "hohmann",
            "--from",
            "400",
            "--to",
            "35786",
            "--depart",
            "2024-01-01T00:00:00Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Transfer Plan ==="))
        .stdout(predicate::str::contains("2024-01-01T05:17"));

    orbit()
        .args(["hohmann", "--from=-1000", "--to", "400"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must exceed the central body radius"));
}

#[test]
fn bi_elliptic_prints_three_burns() {
    orbit()
        .args([
            "bi-elliptic",
            "--from",
            "400",
            "--to",
            "35786",
            "--via",
            "100000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Burn 3"));
}

#[test]
fn trajectory_and_propagation_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path_csv = dir.path().join("path.csv");
    let prop_csv = dir.path().join("nested/prop.csv");

    orbit()
        .args([
            "trajectory",
            "--preset",
            "Molniya",
            "--points",
            "12",
            "--output",
            path_csv.to_str().unwrap(),
        ])
        .assert()
        .success();
    let mut reader = csv::Reader::from_path(&path_csv).expect("trajectory csv");
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, ["true_anomaly_deg", "x_km", "y_km", "z_km"]);
    let rows: Vec<Vec<f64>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(|v| v.parse().unwrap()).collect())
        .collect();
    assert_eq!(rows.len(), 12);
    // Molniya perigee: a(1 - e) = 26600 × 0.26 km.
    let perigee = (rows[0][1].powi(2) + rows[0][2].powi(2) + rows[0][3].powi(2)).sqrt();
    assert!((perigee - 6_916.0).abs() < 1e-3, "perigee = {perigee}");

    orbit()
        .args([
            "propagate",
            "--days",
            "1",
            "--steps",
            "3",
            "--subdivide",
            "--output",
            prop_csv.to_str().unwrap(),
        ])
        .assert()
        .success();
    let text = fs::read_to_string(&prop_csv).expect("propagation csv");
    let last = text.lines().last().unwrap();
    assert_eq!(last.split(',').nth(1), Some("86400.000"));
}
