//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod trajectory {
    use std::io::{self, Write};

    use astro_orbits::TrajectoryPoint;

    pub const HEADER: &str = "true_anomaly_deg,x_km,y_km,z_km";

    /// Write sampled path points as CSV, one row per point.
    pub fn write_csv(writer: &mut dyn Write, points: &[TrajectoryPoint]) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)?;
        for point in points {
            writeln!(
                writer,
                "{:.6},{:.6},{:.6},{:.6}",
                point.true_anomaly_deg,
                point.position_km[0],
                point.position_km[1],
                point.position_km[2],
            )?;
        }
        writer.flush()
    }
}

pub mod propagation {
    use std::io::{self, Write};

    use astro_orbits::OrbitalElements;

    pub const HEADER: &str = "epoch,elapsed_s,semi_major_axis_km,eccentricity,inclination_deg,\
                              raan_deg,arg_periapsis_deg,true_anomaly_deg";

    /// Write a propagated element sequence as CSV. Elapsed time is measured from the first row.
    pub fn write_csv(writer: &mut dyn Write, samples: &[OrbitalElements]) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)?;
        let Some(first) = samples.first() else {
            return writer.flush();
        };
        for sample in samples {
            let elapsed = (sample.epoch - first.epoch).num_milliseconds() as f64 / 1_000.0;
            writeln!(
                writer,
                "{},{:.3},{:.6},{:.8},{:.6},{:.6},{:.6},{:.6}",
                sample.epoch.to_rfc3339(),
                elapsed,
                sample.semi_major_axis_km,
                sample.eccentricity,
                sample.inclination_deg,
                sample.raan_deg,
                sample.arg_periapsis_deg,
                sample.true_anomaly_deg,
            )?;
        }
        writer.flush()
    }
}

pub mod summary {
    use std::io::{self, Write};

    use astro_impulsive::TransferResult;
    use astro_orbits::{OrbitalCharacteristics, OrbitalElements, StateVector};
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    /// JSON envelope describing one orbit: its elements, state and characteristics.
    #[derive(Serialize)]
    struct OrbitSidecar<'a> {
        label: &'a str,
        body: &'a str,
        elements: &'a OrbitalElements,
        state: &'a StateVector,
        characteristics: &'a OrbitalCharacteristics,
    }

    #[derive(Serialize)]
    struct TransferSidecar<'a> {
        body: &'a str,
        transfer: &'a TransferResult,
    }

    pub fn write_orbit_json(
        writer: &mut dyn Write,
        label: &str,
        body: &str,
        elements: &OrbitalElements,
        state: &StateVector,
        characteristics: &OrbitalCharacteristics,
    ) -> io::Result<()> {
        let sidecar = OrbitSidecar {
            label,
            body,
            elements,
            state,
            characteristics,
        };
        to_writer_pretty(&mut *writer, &sidecar)?;
        writeln!(writer)?;
        writer.flush()
    }

    pub fn write_transfer_json(
        writer: &mut dyn Write,
        body: &str,
        transfer: &TransferResult,
    ) -> io::Result<()> {
        to_writer_pretty(&mut *writer, &TransferSidecar { body, transfer })?;
        writeln!(writer)?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astro_orbits::elements::j2000;
    use astro_orbits::{CentralBody, OrbitalElements, generate_trajectory};

    #[test]
    fn trajectory_csv_has_header_and_one_row_per_point() {
        let body = CentralBody::earth();
        let elements = OrbitalElements::circular(&body, 500.0, 45.0, j2000());
        let points = generate_trajectory(&elements, &body, 8);

        let mut buf = Vec::new();
        trajectory::write_csv(&mut buf, &points).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(trajectory::HEADER));
        assert_eq!(lines.count(), 8);
    }

    #[test]
    fn propagation_csv_reports_elapsed_from_first_row() {
        let body = CentralBody::earth();
        let start = OrbitalElements::circular(&body, 500.0, 45.0, j2000());
        let later = OrbitalElements {
            epoch: start.epoch + chrono::TimeDelta::seconds(90),
            ..start
        };

        let mut buf = Vec::new();
        propagation::write_csv(&mut buf, &[start, later]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let last = text.lines().last().unwrap();
        assert_eq!(last.split(',').nth(1), Some("90.000"));
    }
}
