//! Synthetic stand-ins for the external model oracles.
//!
//! These are not IRI/IGRF/MSIS: they are closed-form reference models for
//! tests and scenario studies where the shape of the response matters more
//! than geophysical accuracy, e.g. scanning an eclipse-style density
//! depletion without running the full model chain.

use hifitime::Epoch;
use ndarray::Array1;

use super::{ElectronDensityModel, FieldSample, GeomagneticModel, NeutralAtmosphereModel, NeutralSample};
use crate::collision::{CollisionProfiles, CollisionProvider};

/// Chapman-layer electron density profile.
///
/// `ne(h) = nmax·(1−obscuration)·exp(0.5·(1 − z − e^{−z}))` with
/// `z = (h − hmax)/scale`. The obscuration factor models an eclipse-driven
/// depletion of the layer: 0 is the undisturbed layer, 1 removes it.
#[derive(Debug, Clone, Copy)]
pub struct ChapmanLayer {
    /// Peak electron density (m⁻³)
    pub nmax: f64,
    /// Peak height (km)
    pub hmax_km: f64,
    /// Scale height (km)
    pub scale_km: f64,
    /// Eclipse obscuration in [0, 1]
    pub obscuration: f64,
}

impl Default for ChapmanLayer {
    fn default() -> Self {
        // daytime mid-latitude F-layer numbers
        Self {
            nmax: 2.5e11,
            hmax_km: 250.0,
            scale_km: 45.0,
            obscuration: 0.0,
        }
    }
}

impl ElectronDensityModel for ChapmanLayer {
    fn electron_density(&self, _time: Epoch, _lat: f64, _lon: f64, alt_km: f64) -> f64 {
        let z = (alt_km - self.hmax_km) / self.scale_km;
        self.nmax * (1.0 - self.obscuration) * (0.5 * (1.0 - z - (-z).exp())).exp()
    }
}

/// Geomagnetic field of uniform magnitude and orientation.
#[derive(Debug, Clone, Copy)]
pub struct UniformField {
    /// Total field magnitude (nT)
    pub total_nt: f64,
    /// Inclination (deg, positive downward)
    pub inclination: f64,
    /// Declination (deg, positive eastward)
    pub declination: f64,
}

impl Default for UniformField {
    fn default() -> Self {
        Self {
            total_nt: 5.0e4,
            inclination: 65.0,
            declination: -5.0,
        }
    }
}

impl GeomagneticModel for UniformField {
    fn field(&self, _time: Epoch, _lat: f64, _lon: f64, _alt_km: f64) -> FieldSample {
        let incl = self.inclination.to_radians();
        let decl = self.declination.to_radians();
        let horizontal = self.total_nt * incl.cos();
        FieldSample {
            north: horizontal * decl.cos(),
            east: horizontal * decl.sin(),
            down: self.total_nt * incl.sin(),
            total: self.total_nt,
            inclination: self.inclination,
            declination: self.declination,
        }
    }
}

/// Exponential neutral atmosphere with a single scale height.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialAtmosphere {
    /// Surface number density (m⁻³)
    pub n0: f64,
    /// Scale height (km)
    pub scale_km: f64,
    /// Isothermal neutral temperature (K)
    pub temperature: f64,
}

impl Default for ExponentialAtmosphere {
    fn default() -> Self {
        Self {
            n0: 2.5e25,
            scale_km: 7.5,
            temperature: 300.0,
        }
    }
}

impl NeutralAtmosphereModel for ExponentialAtmosphere {
    fn neutral_atmosphere(&self, _time: Epoch, _lat: f64, _lon: f64, alt_km: f64) -> NeutralSample {
        NeutralSample {
            number_density: self.n0 * (-alt_km / self.scale_km).exp(),
            temperature: self.temperature,
        }
    }
}

/// Bulk electron-neutral collision provider over a neutral atmosphere.
///
/// The monoenergetic estimate `ν = 5.4·10⁻¹⁶·n_n·√T` fills the `ft` and
/// `sn` arrays; the averaged models are scaled from it, with the 5/2 factor
/// for the Maxwellian effective collision frequency. Real studies replace
/// this with a provider backed by the full species sums.
#[derive(Debug, Clone, Copy)]
pub struct BulkCollisions<A> {
    /// Neutral atmosphere the bulk formula samples
    pub atmosphere: A,
}

impl<A: NeutralAtmosphereModel> CollisionProvider for BulkCollisions<A> {
    fn profiles(
        &self,
        time: Epoch,
        lats: &Array1<f64>,
        lons: &Array1<f64>,
        alts_km: &Array1<f64>,
    ) -> CollisionProfiles {
        let n = alts_km.len();
        let mut nu = Array1::zeros(n);
        for i in 0..n {
            let neutral = self
                .atmosphere
                .neutral_atmosphere(time, lats[i], lons[i], alts_km[i]);
            nu[i] = 5.4e-16 * neutral.number_density * neutral.temperature.sqrt();
        }
        let av_cc = nu.mapv(|v| 1.5 * v);
        let av_mb = nu.mapv(|v| 2.5 * v);
        CollisionProfiles::new(nu.clone(), nu, av_cc, av_mb)
            .expect("bulk arrays share one length")
    }
}
