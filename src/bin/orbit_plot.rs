use std::fs;
use std::path::{Path, PathBuf};

use astro_playground::presets::{DEFAULT_BODY_PATH, load_body};
use clap::Parser;
use csv::ReaderBuilder;
use plotters::prelude::*;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render XY and XZ projections of a trajectory CSV (from `orbit trajectory`)"
)]
struct Cli {
    #[arg(long)]
    input: PathBuf,
    #[arg(long, default_value = "artifacts/orbit.png")]
    output: PathBuf,
    /// Central body catalog, used to draw the body disc
    #[arg(long, default_value = DEFAULT_BODY_PATH)]
    body: PathBuf,
    #[arg(long, default_value_t = 1200)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
}

/// Projection plane: which two position components go on the axes.
#[derive(Clone, Copy)]
struct Plane {
    title: &'static str,
    x_axis: usize,
    y_axis: usize,
}

const PLANES: [Plane; 2] = [
    Plane {
        title: "X-Y projection",
        x_axis: 0,
        y_axis: 1,
    },
    Plane {
        title: "X-Z projection",
        x_axis: 0,
        y_axis: 2,
    },
];

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    astro_playground::logging::init(0);

    let body = load_body(&cli.body)?;
    let points = read_points(&cli.input)?;
    if points.is_empty() {
        return Err(anyhow::anyhow!(
            "No trajectory points in {}",
            cli.input.display()
        ));
    }

    let extent = points
        .iter()
        .flat_map(|p| p.iter().map(|c| c.abs()))
        .fold(body.radius_km, f64::max)
        * 1.1;

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 22.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 14.0, FontStyle::Normal);

    let (left, right) = root.split_horizontally(cli.width / 2);
    for (area, plane) in [left, right].iter().zip(PLANES) {
        let mut chart = ChartBuilder::on(area)
            .margin(20)
            .caption(plane.title, caption_font.clone())
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(-extent..extent, -extent..extent)?;

        chart
            .configure_mesh()
            .x_desc("km")
            .y_desc("km")
            .label_style(label_font.clone())
            .x_labels(5)
            .y_labels(5)
            .x_label_formatter(&|v| format!("{v:.0}"))
            .y_label_formatter(&|v| format!("{v:.0}"))
            .draw()?;

        let disc: Vec<(f64, f64)> = (0..=120)
            .map(|k| {
                let angle = std::f64::consts::TAU * k as f64 / 120.0;
                (body.radius_km * angle.cos(), body.radius_km * angle.sin())
            })
            .collect();
        chart.draw_series(std::iter::once(Polygon::new(
            disc,
            RGBColor(70, 130, 180).mix(0.4).filled(),
        )))?;

        let mut path: Vec<(f64, f64)> = points
            .iter()
            .map(|p| (p[plane.x_axis], p[plane.y_axis]))
            .collect();
        if let Some(&first) = path.first() {
            path.push(first);
        }
        chart.draw_series(LineSeries::new(
            path,
            ShapeStyle::from(&RGBColor(210, 100, 20)).stroke_width(2),
        ))?;
    }

    root.present()?;
    println!("Wrote {}", cli.output.display());
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn read_points(path: &Path) -> anyhow::Result<Vec<[f64; 3]>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("CSV missing '{}' column", name))
    };
    let indices = [column("x_km")?, column("y_km")?, column("z_km")?];

    let mut points = Vec::new();
    for rec in rdr.records() {
        let r = rec?;
        let mut point = [f64::NAN; 3];
        for (slot, &idx) in point.iter_mut().zip(&indices) {
            *slot = r.get(idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        }
        if point.iter().all(|c| c.is_finite()) {
            points.push(point);
        }
    }
    Ok(points)
}
