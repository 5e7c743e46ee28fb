//! Doppler shift estimation from time-adjacent phase snapshots.

use log::info;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::absorption::{Mode, Theory};
use crate::collision::CollisionModel;
use crate::constants::SPEED_LIGHT;
use crate::error::RaidError;
use crate::path::ObliquePath;

/// Doppler estimate from two integrated phase totals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DopplerShift {
    /// Phase rate `(p0−p1)/Δt` (rad/s)
    pub dp: f64,
    /// Frequency shift `(p0−p1)/(Δt·4π)` (Hz)
    pub df: f64,
    /// Line-of-sight velocity `df·c/(2f₀)` (m/s)
    pub dv: f64,
}

/// Pointwise Doppler estimate from two resampled phase profiles.
#[derive(Debug, Clone)]
pub struct DopplerProfile {
    /// Frequency shift per resampled point (Hz)
    pub df: Array1<f64>,
    /// Line-of-sight velocity per resampled point (m/s)
    pub dv: Array1<f64>,
}

/// Doppler from two already-integrated phase totals `Δt` seconds apart.
pub fn phase_difference(p0: f64, p1: f64, del_t: f64, freq_hz: f64) -> DopplerShift {
    let dp = (p0 - p1) / del_t;
    let df = (p0 - p1) / (del_t * 4.0 * std::f64::consts::PI);
    let dv = df * SPEED_LIGHT / (2.0 * freq_hz);
    DopplerShift { dp, df, dv }
}

/// Doppler between two evaluated rays for one (theory, model, mode) tuple.
///
/// Each ray's phase coefficient is integrated against its own phase-path
/// column, then the totals are differenced.
pub fn between_paths(
    pt0: &ObliquePath,
    pt1: &ObliquePath,
    del_t: f64,
    theory: Theory,
    model: CollisionModel,
    mode: Mode,
) -> Result<DopplerShift, RaidError> {
    info!("solving Doppler for {theory}:{model} mode {mode}");
    let p0 = pt0.total_phase(None, theory, model, mode)?;
    let p1 = pt1.total_phase(None, theory, model, mode)?;
    Ok(phase_difference(p0, p1, del_t, pt0.freq_hz))
}

/// Pointwise Doppler from two equal-length, aligned phase profiles.
///
/// Rays from two time steps rarely share a sample grid; use
/// [`profile_difference`] unless the alignment is already guaranteed.
pub fn pointwise_difference(
    phi0: &Array1<f64>,
    phi1: &Array1<f64>,
    del_t: f64,
    freq_hz: f64,
) -> Result<DopplerProfile, RaidError> {
    if phi0.len() != phi1.len() {
        return Err(RaidError::ShapeMismatch);
    }
    let df = (phi0 - phi1) / (del_t * 4.0 * std::f64::consts::PI);
    let dv = df.mapv(|df| df * SPEED_LIGHT / (2.0 * freq_hz));
    Ok(DopplerProfile { df, dv })
}

/// Pointwise Doppler from two profiles on differing sample grids.
///
/// Both profiles are linearly resampled to `samples` points over their own
/// phase-path span before differencing, which tolerates rays whose sample
/// counts changed between the two time steps.
pub fn profile_difference(
    phi0: &Array1<f64>,
    path0: &Array1<f64>,
    phi1: &Array1<f64>,
    path1: &Array1<f64>,
    del_t: f64,
    freq_hz: f64,
    samples: usize,
) -> Result<DopplerProfile, RaidError> {
    let r0 = resample(phi0, path0, samples)?;
    let r1 = resample(phi1, path1, samples)?;
    pointwise_difference(&r0, &r1, del_t, freq_hz)
}

/// Linear resampling of `values` onto `n` evenly spaced points of the
/// `path` coordinate's span.
pub fn resample(
    values: &Array1<f64>,
    path: &Array1<f64>,
    n: usize,
) -> Result<Array1<f64>, RaidError> {
    if values.len() != path.len() {
        return Err(RaidError::ShapeMismatch);
    }
    if values.is_empty() || n == 0 {
        return Err(RaidError::EmptyProfile);
    }
    if values.len() == 1 || n == 1 {
        return Ok(Array1::from_elem(n, values[0]));
    }

    let (lo, hi) = (path[0], path[path.len() - 1]);
    let mut out = Array1::zeros(n);
    let mut j = 0;
    for i in 0..n {
        let s = lo + (hi - lo) * i as f64 / (n - 1) as f64;
        while j + 2 < path.len() && path[j + 1] < s {
            j += 1;
        }
        let (x0, x1) = (path[j], path[j + 1]);
        let (y0, y1) = (values[j], values[j + 1]);
        out[i] = if x1 > x0 {
            y0 + (y1 - y0) * ((s - x0) / (x1 - x0)).clamp(0.0, 1.0)
        } else {
            y0
        };
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn phase_difference_formula_chain() {
        // p0 = 10 rad, p1 = 9 rad, 300 s apart at 10 MHz
        let dop = phase_difference(10.0, 9.0, 300.0, 10e6);
        assert_relative_eq!(dop.dp, 1.0 / 300.0, max_relative = 1e-12);
        assert_relative_eq!(
            dop.df,
            1.0 / (300.0 * 4.0 * std::f64::consts::PI),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            dop.dv,
            dop.df * SPEED_LIGHT / (2.0 * 10e6),
            max_relative = 1e-12
        );
        // magnitudes from the formula chain
        assert_relative_eq!(dop.dp, 3.333_333e-3, max_relative = 1e-4);
        assert_relative_eq!(dop.df, 2.652_582e-4, max_relative = 1e-4);
    }

    #[test]
    fn phase_difference_is_antisymmetric() {
        let fwd = phase_difference(12.5, 9.25, 120.0, 14e6);
        let rev = phase_difference(9.25, 12.5, 120.0, 14e6);
        assert_relative_eq!(fwd.dp, -rev.dp, max_relative = 1e-12);
        assert_relative_eq!(fwd.df, -rev.df, max_relative = 1e-12);
        assert_relative_eq!(fwd.dv, -rev.dv, max_relative = 1e-12);
    }

    #[test]
    fn pointwise_requires_aligned_profiles() {
        let a = Array1::from(vec![1.0, 2.0, 3.0]);
        let b = Array1::from(vec![1.0, 2.0]);
        assert!(matches!(
            pointwise_difference(&a, &b, 300.0, 10e6),
            Err(RaidError::ShapeMismatch)
        ));
    }

    #[test]
    fn resample_preserves_linear_profiles() {
        // values linear in the path coordinate survive resampling exactly
        let path = Array1::from(vec![0.0, 1.0, 3.0, 4.0]);
        let values = path.mapv(|s| 2.0 * s + 1.0);
        let out = resample(&values, &path, 9).unwrap();
        for (i, v) in out.iter().enumerate() {
            let s = 4.0 * i as f64 / 8.0;
            assert_relative_eq!(*v, 2.0 * s + 1.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn resample_endpoints_match() {
        let path = Array1::from(vec![10.0, 11.0, 15.0, 18.0]);
        let values = Array1::from(vec![5.0, -1.0, 2.0, 7.0]);
        let out = resample(&values, &path, 33).unwrap();
        assert_relative_eq!(out[0], 5.0, max_relative = 1e-12);
        assert_relative_eq!(out[32], 7.0, max_relative = 1e-12);
    }

    #[test]
    fn profile_difference_of_identical_rays_is_zero() {
        let path0 = Array1::from(vec![0.0, 1.0, 2.0, 3.0]);
        let phi0 = Array1::from(vec![0.0, 2.0, 4.0, 6.0]);
        // same linear phase, different grid
        let path1 = Array1::from(vec![0.0, 1.5, 3.0]);
        let phi1 = Array1::from(vec![0.0, 3.0, 6.0]);
        let dop = profile_difference(&phi0, &path0, &phi1, &path1, 300.0, 10e6, 11).unwrap();
        for v in dop.df.iter() {
            assert_relative_eq!(*v, 0.0, epsilon = 1e-12);
        }
    }
}
