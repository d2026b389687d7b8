use std::path::PathBuf;

use anyhow::Context;
use astro_playground::common::CentralBody;
use astro_playground::common::time::{format_duration, seconds_to_minutes};
use astro_playground::export::{self, writer_for_path};
use astro_playground::impulsive::{
    TransferResult, bi_elliptic_transfer, bi_elliptic_transfer_now, hohmann_transfer,
    hohmann_transfer_now,
};
use astro_playground::orbits::kepler::{self, KeplerOptions};
use astro_playground::orbits::{
    OrbitalElements, calculate_characteristics, elements_to_state_vector, generate_trajectory,
};
use astro_playground::params::{self, ElementParameter, ParameterAssignment};
use astro_playground::presets::{
    DEFAULT_BODY_PATH, DEFAULT_PRESETS_PATH, find_preset, load_body, load_preset_catalog,
};
use astro_playground::propagation::{
    AnomalyUpdate, PropagationOptions, Sampling, propagate_orbit_with,
};
use astro_playground::{logging, orbits};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Two-body orbit playground: elements, state vectors, transfers and propagation"
)]
struct Cli {
    /// Central body catalog (TOML file, YAML list or directory; first entry is used)
    #[arg(long, global = true, default_value = DEFAULT_BODY_PATH)]
    body: PathBuf,

    /// Orbit preset catalog
    #[arg(long, global = true, default_value = DEFAULT_PRESETS_PATH)]
    presets: PathBuf,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the presets in the catalog
    Presets,
    /// Solve Kepler's equation for the eccentric and true anomaly
    Kepler {
        /// Mean anomaly in degrees
        #[arg(long, allow_hyphen_values = true)]
        mean_anomaly: f64,
        #[arg(long)]
        eccentricity: f64,
        #[arg(long, default_value_t = 1e-8)]
        tolerance: f64,
        #[arg(long, default_value_t = 50)]
        max_iterations: u32,
    },
    /// Print the inertial state vector of an orbit
    State(ElementArgs),
    /// Print derived characteristics (altitude, period, speeds, class)
    Characteristics {
        #[command(flatten)]
        elements: ElementArgs,
        /// Write a JSON summary to this path (`-` for stdout)
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Plan a Hohmann transfer between two circular orbits
    Hohmann {
        #[command(flatten)]
        transfer: TransferArgs,
    },
    /// Plan a bi-elliptic transfer via an intermediate circular orbit
    BiElliptic {
        #[command(flatten)]
        transfer: TransferArgs,
        /// Intermediate altitude (or radius with --radii) in km
        #[arg(long)]
        via: f64,
    },
    /// Propagate an orbit forward in time
    Propagate {
        #[command(flatten)]
        elements: ElementArgs,
        /// Duration in seconds; see --subdivide for how samples are spaced
        #[arg(long, conflicts_with = "days")]
        duration: Option<f64>,
        /// Duration in days
        #[arg(long)]
        days: Option<f64>,
        #[arg(long, default_value_t = 10)]
        steps: usize,
        /// Spread samples evenly over the duration instead of duration × step index
        #[arg(long, default_value_t = false)]
        subdivide: bool,
        /// Solve Kepler's equation for each sample instead of the mean-motion approximation
        #[arg(long, default_value_t = false)]
        kepler: bool,
        /// CSV output path (`-` for stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Sample the orbit path for plotting
    Trajectory {
        #[command(flatten)]
        elements: ElementArgs,
        #[arg(long, default_value_t = 360)]
        points: usize,
        /// CSV output path (`-` for stdout)
        #[arg(long, default_value = "-")]
        output: PathBuf,
    },
}

#[derive(Args)]
struct ElementArgs {
    /// Preset to start from (case-insensitive)
    #[arg(long, default_value = "ISS")]
    preset: String,

    /// Override an element, e.g. `--set inclination=98.7` (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE")]
    overrides: Vec<ParameterAssignment>,
}

#[derive(Args)]
struct TransferArgs {
    /// Initial altitude (or radius with --radii) in km
    #[arg(long)]
    from: f64,
    /// Target altitude (or radius with --radii) in km
    #[arg(long)]
    to: f64,
    /// Interpret values as radii from the body centre instead of altitudes
    #[arg(long, default_value_t = false)]
    radii: bool,
    /// Departure epoch (RFC 3339); defaults to now
    #[arg(long)]
    depart: Option<DateTime<Utc>>,
    /// Write a JSON summary to this path (`-` for stdout)
    #[arg(long)]
    json: Option<PathBuf>,
}

impl TransferArgs {
    fn radius(&self, body: &CentralBody, value: f64) -> f64 {
        if self.radii {
            value
        } else {
            body.radius_at_altitude(value)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let body = load_body(&cli.body)
        .with_context(|| format!("loading central body from {}", cli.body.display()))?;
    tracing::info!(body = %body.name, radius_km = body.radius_km, "central body loaded");

    match &cli.command {
        Command::Presets => list_presets(&cli, &body),
        Command::Kepler {
            mean_anomaly,
            eccentricity,
            tolerance,
            max_iterations,
        } => solve(*mean_anomaly, *eccentricity, *tolerance, *max_iterations),
        Command::State(args) => {
            let (label, elements) = resolve_elements(&cli, &body, args)?;
            print_state(&label, &elements, &body)
        }
        Command::Characteristics { elements, json } => {
            let (label, elements) = resolve_elements(&cli, &body, elements)?;
            print_characteristics(&label, &elements, &body, json.as_ref())
        }
        Command::Hohmann { transfer } => {
            let from = transfer.radius(&body, transfer.from);
            let to = transfer.radius(&body, transfer.to);
            let plan = match transfer.depart {
                Some(departure) => hohmann_transfer(&body, from, to, departure)?,
                None => hohmann_transfer_now(&body, from, to)?,
            };
            print_transfer(&plan, &body, transfer.json.as_ref())
        }
        Command::BiElliptic { transfer, via } => {
            let from = transfer.radius(&body, transfer.from);
            let to = transfer.radius(&body, transfer.to);
            let via = transfer.radius(&body, *via);
            let plan = match transfer.depart {
                Some(departure) => bi_elliptic_transfer(&body, from, to, via, departure)?,
                None => bi_elliptic_transfer_now(&body, from, to, via)?,
            };
            print_transfer(&plan, &body, transfer.json.as_ref())
        }
        Command::Propagate {
            elements,
            duration,
            days,
            steps,
            subdivide,
            kepler,
            output,
        } => {
            let (label, elements) = resolve_elements(&cli, &body, elements)?;
            let duration_s = match (duration, days) {
                (Some(seconds), _) => *seconds,
                (None, Some(days)) => astro_playground::common::time::days_to_seconds(*days),
                (None, None) => orbits::characteristics::orbital_period(
                    elements.semi_major_axis_km,
                    body.mu_km3_s2,
                ),
            };
            let options = PropagationOptions {
                sampling: if *subdivide {
                    Sampling::Subdivided
                } else {
                    Sampling::StepIndex
                },
                anomaly: if *kepler {
                    AnomalyUpdate::Kepler
                } else {
                    AnomalyUpdate::MeanMotion
                },
            };
            let samples = propagate_orbit_with(&elements, &body, duration_s, *steps, &options)?;
            match output {
                Some(path) => {
                    let mut writer = writer_for_path(path)?;
                    export::propagation::write_csv(&mut writer, &samples)?;
                }
                None => print_propagation(&label, &samples),
            }
            Ok(())
        }
        Command::Trajectory {
            elements,
            points,
            output,
        } => {
            let (_, elements) = resolve_elements(&cli, &body, elements)?;
            let path = generate_trajectory(&elements, &body, *points);
            if path.len() < *points {
                eprintln!(
                    "[warn] {} of {} trajectory points could not be computed",
                    points - path.len(),
                    points
                );
            }
            let mut writer = writer_for_path(output)?;
            export::trajectory::write_csv(&mut writer, &path)?;
            Ok(())
        }
    }
}

fn resolve_elements(
    cli: &Cli,
    body: &CentralBody,
    args: &ElementArgs,
) -> anyhow::Result<(String, OrbitalElements)> {
    let catalog = load_preset_catalog(&cli.presets, body)
        .with_context(|| format!("loading presets from {}", cli.presets.display()))?;
    let preset = find_preset(&catalog, &args.preset)?;
    let elements = params::apply_all(&preset.elements, body, &args.overrides)?;
    let label = if args.overrides.is_empty() {
        preset.name.clone()
    } else {
        format!("{} (edited)", preset.name)
    };
    Ok((label, elements))
}

fn list_presets(cli: &Cli, body: &CentralBody) -> anyhow::Result<()> {
    let catalog = load_preset_catalog(&cli.presets, body)?;
    println!("=== Presets ({}) ===", body.name);
    for preset in &catalog {
        let characteristics = calculate_characteristics(&preset.elements, body)?;
        println!(
            "{:<10} a = {:>9.1} km  e = {:.4}  i = {:>6.2} deg  T = {:>7.1} min  [{}]  {}",
            preset.name,
            preset.elements.semi_major_axis_km,
            preset.elements.eccentricity,
            preset.elements.inclination_deg,
            seconds_to_minutes(characteristics.period_s),
            characteristics.orbit_class,
            preset.description.as_deref().unwrap_or(""),
        );
    }
    Ok(())
}

fn solve(
    mean_anomaly_deg: f64,
    eccentricity: f64,
    tolerance: f64,
    max_iterations: u32,
) -> anyhow::Result<()> {
    let options = KeplerOptions {
        tolerance,
        max_iterations,
    };
    let solution = kepler::solve_kepler(mean_anomaly_deg.to_radians(), eccentricity, &options)?;
    let true_anomaly = kepler::eccentric_to_true(solution.eccentric_anomaly, eccentricity)?;

    println!("=== Kepler's Equation ===");
    println!("Mean anomaly      : {:.6} deg", mean_anomaly_deg);
    println!("Eccentricity      : {:.6}", eccentricity);
    println!(
        "Eccentric anomaly : {:.6} deg",
        solution.eccentric_anomaly.to_degrees()
    );
    println!(
        "True anomaly      : {:.6} deg",
        astro_playground::common::units::wrap_degrees(true_anomaly.to_degrees())
    );
    println!(
        "Iterations        : {} (last correction {:.3e}, converged = {})",
        solution.iterations, solution.error, solution.converged
    );
    Ok(())
}

fn print_state(label: &str, elements: &OrbitalElements, body: &CentralBody) -> anyhow::Result<()> {
    let state = elements_to_state_vector(elements, body)?;
    println!("=== State Vector: {} ===", label);
    println!("Epoch    : {}", state.epoch.to_rfc3339());
    println!(
        "Position : [{:>12.3}, {:>12.3}, {:>12.3}] km  (|r| = {:.3} km)",
        state.position_km[0],
        state.position_km[1],
        state.position_km[2],
        state.radius_km()
    );
    println!(
        "Velocity : [{:>12.6}, {:>12.6}, {:>12.6}] km/s (|v| = {:.6} km/s)",
        state.velocity_km_s[0],
        state.velocity_km_s[1],
        state.velocity_km_s[2],
        state.speed_km_s()
    );
    Ok(())
}

fn print_characteristics(
    label: &str,
    elements: &OrbitalElements,
    body: &CentralBody,
    json: Option<&PathBuf>,
) -> anyhow::Result<()> {
    let c = calculate_characteristics(elements, body)?;

    if let Some(path) = json {
        let state = elements_to_state_vector(elements, body)?;
        let mut writer = writer_for_path(path)?;
        export::summary::write_orbit_json(&mut writer, label, &body.name, elements, &state, &c)?;
        if path.as_os_str() == "-" {
            return Ok(());
        }
    }

    println!("=== Orbit: {} ({}) ===", label, c.orbit_class);
    for parameter in ElementParameter::ALL {
        println!(
            "{:<16}: {:.4}",
            parameter.name(),
            parameter.get(elements, body)
        );
    }
    println!("Altitude        : {:.1} km", c.altitude_km);
    println!(
        "Perigee/Apogee  : {:.1} km / {:.1} km",
        c.perigee_altitude_km, c.apogee_altitude_km
    );
    println!(
        "Period          : {:.2} min ({})",
        seconds_to_minutes(c.period_s),
        format_duration(c.period_s)
    );
    println!("Speed           : {:.4} km/s", c.speed_km_s);
    println!(
        "Perigee/Apogee v: {:.4} km/s / {:.4} km/s",
        c.perigee_velocity_km_s, c.apogee_velocity_km_s
    );
    println!("Circular speed  : {:.4} km/s", c.circular_velocity_km_s);
    println!("Escape speed    : {:.4} km/s", c.escape_velocity_km_s);
    println!("Specific energy : {:.4} km^2/s^2", c.specific_energy_km2_s2);
    println!(
        "Mean motion     : {:.6e} deg/s ({:.4} rev/day)",
        c.mean_motion_deg_s, c.mean_motion_rev_per_day
    );
    Ok(())
}

fn print_transfer(
    plan: &TransferResult,
    body: &CentralBody,
    json: Option<&PathBuf>,
) -> anyhow::Result<()> {
    if let Some(path) = json {
        let mut writer = writer_for_path(path)?;
        export::summary::write_transfer_json(&mut writer, &body.name, plan)?;
        if path.as_os_str() == "-" {
            return Ok(());
        }
    }

    println!("=== Transfer Plan ===");
    println!(
        "Burn 1  : {:>9.1} m/s at {}",
        plan.first_burn_m_s,
        plan.first_burn_at.to_rfc3339()
    );
    println!(
        "Burn 2  : {:>9.1} m/s at {}",
        plan.second_burn_m_s,
        plan.second_burn_at.to_rfc3339()
    );
    if let (Some(dv), Some(at)) = (plan.third_burn_m_s, plan.third_burn_at) {
        println!("Burn 3  : {:>9.1} m/s at {}", dv, at.to_rfc3339());
    }
    println!("Total Δv: {:>9.1} m/s", plan.total_delta_v_m_s);
    println!(
        "TOF     : {} ({:.0} s), phase angle {:.1} deg",
        format_duration(plan.transfer_time_s),
        plan.transfer_time_s,
        plan.phase_angle_deg
    );
    println!();
    println!("{}", plan.description);
    Ok(())
}

fn print_propagation(label: &str, samples: &[OrbitalElements]) {
    println!("=== Propagation: {} ===", label);
    let Some(first) = samples.first() else {
        println!("(no samples)");
        return;
    };
    for (i, sample) in samples.iter().enumerate() {
        let elapsed = (sample.epoch - first.epoch).num_milliseconds() as f64 / 1_000.0;
        println!(
            "{:>4}  {}  t = {:>12.1} s  nu = {:>8.3} deg",
            i,
            sample.epoch.to_rfc3339(),
            elapsed,
            sample.true_anomaly_deg
        );
    }
}
