//! Call contracts for the external geophysical models.
//!
//! IRI-class electron density, IGRF-class geomagnetic field and MSIS-class
//! neutral atmosphere are external oracles: each is a per-point call taking
//! `(time, lat, lon, alt)` and returning physical parameters. The traits
//! here pin those contracts so the toolkit can walk a ray and fill aligned
//! per-sample arrays from whatever implementation the caller wires in.

pub mod synthetic;

use hifitime::Epoch;
use ndarray::Array1;

/// One geomagnetic field sample.
#[derive(Debug, Clone, Copy)]
pub struct FieldSample {
    /// Northward component (nT)
    pub north: f64,
    /// Eastward component (nT)
    pub east: f64,
    /// Downward component (nT)
    pub down: f64,
    /// Total field magnitude (nT)
    pub total: f64,
    /// Inclination (deg)
    pub inclination: f64,
    /// Declination (deg)
    pub declination: f64,
}

/// One neutral-atmosphere sample.
#[derive(Debug, Clone, Copy)]
pub struct NeutralSample {
    /// Total neutral number density (m⁻³)
    pub number_density: f64,
    /// Neutral temperature (K)
    pub temperature: f64,
}

/// Electron density oracle (IRI-class).
pub trait ElectronDensityModel {
    /// Electron density (m⁻³) at one point.
    fn electron_density(&self, time: Epoch, lat: f64, lon: f64, alt_km: f64) -> f64;
}

/// Geomagnetic field oracle (IGRF-class).
pub trait GeomagneticModel {
    /// Field components and angles at one point.
    fn field(&self, time: Epoch, lat: f64, lon: f64, alt_km: f64) -> FieldSample;
}

/// Neutral atmosphere oracle (MSIS-class).
pub trait NeutralAtmosphereModel {
    /// Neutral density and temperature at one point.
    fn neutral_atmosphere(&self, time: Epoch, lat: f64, lon: f64, alt_km: f64) -> NeutralSample;
}

/// Total field magnitude (nT) at every sample of a ray's ground track.
pub fn field_along_path(
    model: &(impl GeomagneticModel + ?Sized),
    time: Epoch,
    lats: &Array1<f64>,
    lons: &Array1<f64>,
    alts_km: &Array1<f64>,
) -> Array1<f64> {
    let mut total = Array1::zeros(alts_km.len());
    for i in 0..alts_km.len() {
        total[i] = model.field(time, lats[i], lons[i], alts_km[i]).total;
    }
    total
}

/// Electron density (m⁻³) at every sample of a ray's ground track.
pub fn density_along_path(
    model: &(impl ElectronDensityModel + ?Sized),
    time: Epoch,
    lats: &Array1<f64>,
    lons: &Array1<f64>,
    alts_km: &Array1<f64>,
) -> Array1<f64> {
    let mut ne = Array1::zeros(alts_km.len());
    for i in 0..alts_km.len() {
        ne[i] = model.electron_density(time, lats[i], lons[i], alts_km[i]);
    }
    ne
}
