#![cfg(feature = "plot")]

use assert_cmd::Command;
use std::fs;

#[test]
fn orbit_plot_renders_png_from_trajectory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("path.csv");
    let png_path = dir.path().join("orbit.png");

    Command::cargo_bin("orbit")
        .expect("orbit bin")
        .args([
            "trajectory",
            "--preset",
            "Molniya",
            "--points",
            "90",
            "--output",
            csv_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    Command::cargo_bin("orbit_plot")
        .expect("orbit_plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
            "--width",
            "600",
            "--height",
            "300",
        ])
        .assert()
        .success();

    let metadata = fs::metadata(png_path).expect("png metadata");
    assert!(metadata.len() > 0, "PNG output should not be empty");
}

#[test]
fn orbit_plot_rejects_csv_without_positions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("bad.csv");
    fs::write(&csv_path, "a,b\n1,2\n").unwrap();

    Command::cargo_bin("orbit_plot")
        .expect("orbit_plot bin")
        .args(["--input", csv_path.to_str().unwrap()])
        .assert()
        .failure();
}
