//! Figure output for evaluated rays and batch time series.
//!
//! All styling flows through an explicit [`FigureStyle`] passed at call
//! time; there is no process-wide plotting state. Figures are written as
//! self-contained HTML documents at caller-specified paths, creating parent
//! directories as needed.

use std::path::Path;

use log::info;
use ndarray::Array1;
use plotly::color::{NamedColor, Rgb};
use plotly::common::{DashType, Line, Marker, Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Plot, Scatter};

use crate::error::RaidError;
use crate::path::RayPath;

/// Colormap used to shade ray samples.
#[derive(Debug, Clone, Copy)]
pub enum ColorMap {
    /// Perceptually uniform, for densities and phase
    Plasma,
    /// High-contrast rainbow
    Turbo,
    /// Sequential red, for absorption
    Reds,
}

impl ColorMap {
    fn eval(self, t: f64) -> Rgb {
        let gradient = match self {
            ColorMap::Plasma => colorous::PLASMA,
            ColorMap::Turbo => colorous::TURBO,
            ColorMap::Reds => colorous::REDS,
        };
        let c = gradient.eval_continuous(t.clamp(0.0, 1.0));
        Rgb::new(c.r, c.g, c.b)
    }
}

/// Explicit styling for one figure.
#[derive(Debug, Clone, Copy)]
pub struct FigureStyle {
    /// Figure width in pixels
    pub width: usize,
    /// Figure height in pixels
    pub height: usize,
    /// Ground-range axis limits (km)
    pub x_range: Option<(f64, f64)>,
    /// Height axis limits (km)
    pub y_range: Option<(f64, f64)>,
    /// Colormap for per-sample values
    pub colormap: ColorMap,
    /// Value range mapped onto the colormap
    pub norm: (f64, f64),
}

impl FigureStyle {
    /// Style for absorption-coefficient shading (dB/km).
    pub fn absorption() -> Self {
        Self {
            width: 900,
            height: 450,
            x_range: Some((0.0, 2000.0)),
            y_range: Some((0.0, 400.0)),
            colormap: ColorMap::Reds,
            norm: (0.0, 1e-2),
        }
    }

    /// Style for phase-coefficient shading (rad/km).
    pub fn phase() -> Self {
        Self {
            colormap: ColorMap::Plasma,
            norm: (0.0, 250.0),
            ..Self::absorption()
        }
    }

    /// Style for electron-density shading (m⁻³).
    pub fn electron_density() -> Self {
        Self {
            colormap: ColorMap::Plasma,
            norm: (1e10, 1e12),
            ..Self::absorption()
        }
    }

    /// Style for refractive-index shading.
    pub fn refractive_index() -> Self {
        Self {
            colormap: ColorMap::Plasma,
            norm: (0.9, 1.0),
            ..Self::absorption()
        }
    }
}

/// A ground-range/height figure accumulating one trace per ray.
pub struct RayFigure {
    plot: Plot,
    style: FigureStyle,
}

impl std::fmt::Debug for RayFigure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RayFigure")
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl RayFigure {
    /// Start an empty figure.
    pub fn new(title: &str, style: FigureStyle) -> Self {
        let mut x_axis = Axis::new()
            .title(Title::new("Ground range [km]"))
            .zero_line(false);
        if let Some((lo, hi)) = style.x_range {
            x_axis = x_axis.range(vec![lo, hi]);
        }
        let mut y_axis = Axis::new()
            .title(Title::new("Height [km]"))
            .zero_line(false);
        if let Some((lo, hi)) = style.y_range {
            y_axis = y_axis.range(vec![lo, hi]);
        }
        let layout = Layout::new()
            .title(Title::new(title))
            .x_axis(x_axis)
            .y_axis(y_axis)
            .width(style.width)
            .height(style.height)
            .show_legend(false);
        let mut plot = Plot::new();
        plot.set_layout(layout);
        Self { plot, style }
    }

    /// Lay one ray, shaded by its per-sample `values`.
    ///
    /// NaN values render at the bottom of the colormap.
    pub fn add_ray(&mut self, ray: &RayPath, values: &Array1<f64>) {
        let (lo, hi) = self.style.norm;
        let span = if hi > lo { hi - lo } else { 1.0 };
        let colors: Vec<Rgb> = values
            .iter()
            .map(|&v| {
                let t = if v.is_nan() { 0.0 } else { (v - lo) / span };
                self.style.colormap.eval(t)
            })
            .collect();
        let name = format!("{:.1} deg", ray.elevation);
        let trace = Scatter::new(ray.ground_range.to_vec(), ray.height.to_vec())
            .mode(Mode::Markers)
            .marker(Marker::new().size(3).color_array(colors))
            .name(name.as_str());
        self.plot.add_trace(trace);
    }

    /// Mark a target ground range with a vertical dashed line.
    pub fn tag_distance(&mut self, distance_km: f64) {
        let trace = Scatter::new(vec![distance_km, distance_km], vec![0.0, 100.0])
            .mode(Mode::Lines)
            .line(Line::new().dash(DashType::Dash).color(NamedColor::Magenta))
            .name("target range");
        self.plot.add_trace(trace);
    }

    /// Write the figure to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), RaidError> {
        save_plot(&self.plot, path)
    }
}

/// Line palette for time-series traces, cycled in order.
const SERIES_COLORS: [NamedColor; 4] = [
    NamedColor::Red,
    NamedColor::Green,
    NamedColor::Blue,
    NamedColor::Black,
];

/// Write a labelled multi-series time plot.
pub fn timeseries(
    title: &str,
    y_label: &str,
    minutes: &[f64],
    series: &[(String, Vec<f64>)],
    path: &Path,
) -> Result<(), RaidError> {
    let layout = Layout::new()
        .title(Title::new(title))
        .x_axis(Axis::new().title(Title::new("Minutes since start")))
        .y_axis(Axis::new().title(Title::new(y_label)))
        .show_legend(true);
    let mut plot = Plot::new();
    plot.set_layout(layout);
    for (i, (name, values)) in series.iter().enumerate() {
        let trace = Scatter::new(minutes.to_vec(), values.clone())
            .mode(Mode::LinesMarkers)
            .line(Line::new().color(SERIES_COLORS[i % SERIES_COLORS.len()]))
            .name(name.as_str());
        plot.add_trace(trace);
    }
    save_plot(&plot, path)
}

fn save_plot(plot: &Plot, path: &Path) -> Result<(), RaidError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    plot.write_html(path);
    info!("saved figure {}", path.display());
    Ok(())
}
