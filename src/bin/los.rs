//! Line-of-sight absorption and Doppler study over a synthetic eclipse
//! scenario.
//!
//! Sweeps a fan of elevation angles through a Chapman ionosphere whose peak
//! density follows an obscuration ramp, evaluates the four
//! (theory, collision model) combinations per ray, reduces each time step to
//! median totals and estimates the Doppler shift between adjacent steps.

use std::path::PathBuf;

use clap::Parser;
use hifitime::{Duration, Epoch};
use log::info;
use ndarray::Array1;
use serde::Serialize;

use raid::batch::{compute_batch, integrate_totals, Combination};
use raid::doppler;
use raid::models::synthetic::{BulkCollisions, ChapmanLayer, ExponentialAtmosphere, UniformField};
use raid::models::ElectronDensityModel;
use raid::plot::{timeseries, FigureStyle, RayFigure};
use raid::{Bearing, CollisionModel, DopplerShift, Mode, RayPath, Theory};

#[derive(Debug, Parser)]
#[command(
    name = "raid-los",
    about = "Synthetic eclipse line-of-sight absorption and Doppler sweep"
)]
struct Cli {
    /// Operating frequency (MHz)
    #[arg(long, default_value_t = 10.0)]
    freq_mhz: f64,

    /// Number of time steps to simulate
    #[arg(long, default_value_t = 12)]
    steps: usize,

    /// Seconds between time steps
    #[arg(long, default_value_t = 300.0)]
    step_seconds: f64,

    /// Peak eclipse obscuration, 0 to 1
    #[arg(long, default_value_t = 0.9)]
    max_obscuration: f64,

    /// Lowest launch elevation (deg)
    #[arg(long, default_value_t = 5.0)]
    min_elevation: f64,

    /// Highest launch elevation (deg)
    #[arg(long, default_value_t = 40.0)]
    max_elevation: f64,

    /// Elevation step (deg)
    #[arg(long, default_value_t = 5.0)]
    elevation_step: f64,

    /// Worker threads (rayon picks when omitted)
    #[arg(long)]
    threads: Option<usize>,

    /// Output directory for figures and the JSON summary
    #[arg(long, default_value = "figures")]
    output: PathBuf,

    /// Skip per-step ray figures
    #[arg(long)]
    no_figures: bool,
}

#[derive(Debug, Serialize)]
struct StepSummary {
    minutes: f64,
    obscuration: f64,
    median_absorption_db: Vec<f64>,
    median_phase_rad: Vec<f64>,
    doppler: Option<DopplerShift>,
}

#[derive(Debug, Serialize)]
struct Summary {
    freq_mhz: f64,
    step_seconds: f64,
    combinations: Vec<String>,
    steps: Vec<StepSummary>,
}

/// A single-hop parabolic ray through the given layer.
///
/// Stands in for an external ray tracer: the trajectory is a parabola whose
/// apex rises with elevation, and the phase/group paths accumulate a local
/// refractive index from the layer's density.
fn synthetic_ray(
    elevation: f64,
    layer: &ChapmanLayer,
    time: Epoch,
    freq_hz: f64,
) -> Result<RayPath, raid::RaidError> {
    const SAMPLES: usize = 121;

    let apex = (90.0 + 3.5 * elevation).min(260.0);
    let span = 2.0 * apex / elevation.to_radians().tan();

    let mut ground = Vec::with_capacity(SAMPLES);
    let mut height = Vec::with_capacity(SAMPLES);
    let mut group = Vec::with_capacity(SAMPLES);
    let mut phase = Vec::with_capacity(SAMPLES);
    let mut geometric = Vec::with_capacity(SAMPLES);
    let mut edens = Vec::with_capacity(SAMPLES);
    let mut ref_index = Vec::with_capacity(SAMPLES);

    for i in 0..SAMPLES {
        let s = i as f64 / (SAMPLES - 1) as f64;
        let g = s * span;
        let h = 4.0 * apex * s * (1.0 - s);
        let ne = layer.electron_density(time, 0.0, 0.0, h);
        // X = (fp/f)², fp² = 80.6·Ne
        let x = 80.6 * ne / (freq_hz * freq_hz);
        let n_local = (1.0 - x).max(0.09).sqrt();

        if i == 0 {
            group.push(0.0);
            phase.push(0.0);
            geometric.push(0.0);
        } else {
            let dg: f64 = g - ground[i - 1];
            let dh: f64 = h - height[i - 1];
            let ds = (dg * dg + dh * dh).sqrt();
            geometric.push(geometric[i - 1] + ds);
            phase.push(phase[i - 1] + n_local * ds);
            group.push(group[i - 1] + ds / n_local);
        }
        ground.push(g);
        height.push(h);
        edens.push(ne);
        ref_index.push(n_local);
    }

    RayPath::new(
        elevation,
        Array1::from_vec(ground),
        Array1::from_vec(height),
        Array1::from_vec(group),
        Array1::from_vec(phase),
        Array1::from_vec(geometric),
        Array1::from_vec(edens),
        Array1::from_vec(ref_index),
    )
}

fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    values[values.len() / 2]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .init();
    let cli = Cli::parse();

    // wwv-to-east-coast style geometry
    let bearing = Bearing {
        rb: 100.8,
        olat: 40.0150,
        olon: -105.2705,
        freq_mhz: cli.freq_mhz,
    };
    let freq_hz = bearing.freq_hz();
    let combos = Combination::swept();
    let combo_names: Vec<String> = combos.iter().map(|c| c.to_string()).collect();
    info!("sweeping {} at {} MHz", combo_names.join(", "), cli.freq_mhz);

    let field = UniformField::default();
    let collisions = BulkCollisions {
        atmosphere: ExponentialAtmosphere::default(),
    };
    let start = Epoch::from_gregorian_utc(2024, 4, 8, 17, 0, 0, 0);

    let mut elevations = Vec::new();
    let mut e = cli.min_elevation;
    while e <= cli.max_elevation + 1e-9 {
        elevations.push(e);
        e += cli.elevation_step;
    }

    let mut summary = Summary {
        freq_mhz: cli.freq_mhz,
        step_seconds: cli.step_seconds,
        combinations: combo_names.clone(),
        steps: Vec::with_capacity(cli.steps),
    };
    let mut previous_paths: Option<Vec<raid::path::ObliquePath>> = None;

    for step in 0..cli.steps {
        let elapsed = step as f64 * cli.step_seconds;
        let time = start + Duration::from_seconds(elapsed);
        let ramp = if cli.steps > 1 {
            (std::f64::consts::PI * step as f64 / (cli.steps - 1) as f64).sin()
        } else {
            1.0
        };
        let layer = ChapmanLayer {
            obscuration: cli.max_obscuration * ramp,
            ..ChapmanLayer::default()
        };
        info!(
            "step {step}: +{:.0} s, obscuration {:.2}",
            elapsed, layer.obscuration
        );

        let rays = elevations
            .iter()
            .map(|&e| synthetic_ray(e, &layer, time, freq_hz))
            .collect::<Result<Vec<_>, _>>()?;
        let paths = compute_batch(time, rays, &bearing, &field, &collisions, cli.threads)?;
        let totals = integrate_totals(&paths, &combos)?;

        let median_absorption_db: Vec<f64> = (0..combos.len())
            .map(|c| median(totals.iter().map(|t| t.absorption_db[c]).collect()))
            .collect();
        let median_phase_rad: Vec<f64> = (0..combos.len())
            .map(|c| median(totals.iter().map(|t| t.phase_rad[c]).collect()))
            .collect();

        // Doppler between this step and the previous one, for the mid-fan
        // elevation, AH over the Schunk-Nagy profile, O mode
        let mid = paths.len() / 2;
        let dop = match &previous_paths {
            Some(prev) => Some(doppler::between_paths(
                &prev[mid],
                &paths[mid],
                cli.step_seconds,
                Theory::AppletonHartree,
                CollisionModel::Sn,
                Mode::O,
            )?),
            None => None,
        };
        if let Some(d) = &dop {
            info!("step {step}: df {:.3e} Hz, dv {:.3e} m/s", d.df, d.dv);
        }

        if !cli.no_figures {
            let mut fig = RayFigure::new(
                &format!("O-mode absorption, +{:.0} min", elapsed / 60.0),
                FigureStyle::absorption(),
            );
            for path in &paths {
                let beta = &path
                    .results
                    .profile(Theory::AppletonHartree, CollisionModel::Sn, Mode::O)?
                    .beta;
                fig.add_ray(&path.ray, beta);
            }
            fig.save(&cli.output.join(format!("{step:04}.html")))?;
        }

        summary.steps.push(StepSummary {
            minutes: elapsed / 60.0,
            obscuration: layer.obscuration,
            median_absorption_db,
            median_phase_rad,
            doppler: dop,
        });
        previous_paths = Some(paths);
    }

    let minutes: Vec<f64> = summary.steps.iter().map(|s| s.minutes).collect();
    let absorption_series: Vec<(String, Vec<f64>)> = combo_names
        .iter()
        .enumerate()
        .map(|(c, name)| {
            (
                name.clone(),
                summary
                    .steps
                    .iter()
                    .map(|s| s.median_absorption_db[c])
                    .collect(),
            )
        })
        .collect();
    timeseries(
        "Median O-mode absorption",
        "Absorption [dB]",
        &minutes,
        &absorption_series,
        &cli.output.join("ts_absorption.html"),
    )?;

    let doppler_series = vec![(
        "ah:sn:O".to_string(),
        summary
            .steps
            .iter()
            .map(|s| s.doppler.map(|d| d.dv).unwrap_or(f64::NAN))
            .collect(),
    )];
    timeseries(
        "Doppler velocity",
        "dv [m/s]",
        &minutes,
        &doppler_series,
        &cli.output.join("ts_doppler.html"),
    )?;

    let summary_path = cli.output.join("summary.json");
    std::fs::create_dir_all(&cli.output)?;
    std::fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)?;
    info!("wrote {}", summary_path.display());

    Ok(())
}
