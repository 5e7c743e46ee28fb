//! Ray profiles and integration along the phase-path coordinate.

use hifitime::Epoch;
use log::debug;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::absorption::{AbsorptionResults, Mode, Theory};
use crate::collision::{CollisionModel, CollisionProfiles, CollisionProvider};
use crate::error::RaidError;
use crate::geo;
use crate::models::{field_along_path, GeomagneticModel};

/// Scalar metadata of the upstream bearing/geometry file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bearing {
    /// Receiver bearing, degrees clockwise from north
    pub rb: f64,
    /// Origin latitude (deg)
    pub olat: f64,
    /// Origin longitude (deg)
    pub olon: f64,
    /// Operating frequency (MHz)
    pub freq_mhz: f64,
}

impl Bearing {
    /// Operating frequency in Hz.
    pub fn freq_hz(&self) -> f64 {
        self.freq_mhz * 1e6
    }
}

/// One ray-tracer output table: aligned per-sample columns plus the launch
/// elevation that keys the ray.
///
/// Index `i` refers to the same physical point along the ray in every
/// column; construction rejects anything that would break that invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RayPath {
    /// Launch elevation (deg)
    pub elevation: f64,
    /// Ground range (km)
    pub ground_range: Array1<f64>,
    /// Height (km)
    pub height: Array1<f64>,
    /// Group range (km)
    pub group_range: Array1<f64>,
    /// Phase path (km), monotonically non-decreasing
    pub phase_path: Array1<f64>,
    /// Geometric distance travelled (km)
    pub geometric_distance: Array1<f64>,
    /// Electron density (m⁻³)
    pub electron_density: Array1<f64>,
    /// Real refractive index from the ray tracer
    pub refractive_index: Array1<f64>,
}

impl RayPath {
    /// Bundle the ray columns, validating alignment and the phase path.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        elevation: f64,
        ground_range: Array1<f64>,
        height: Array1<f64>,
        group_range: Array1<f64>,
        phase_path: Array1<f64>,
        geometric_distance: Array1<f64>,
        electron_density: Array1<f64>,
        refractive_index: Array1<f64>,
    ) -> Result<Self, RaidError> {
        let n = ground_range.len();
        if n == 0 {
            return Err(RaidError::EmptyProfile);
        }
        let lens = [
            height.len(),
            group_range.len(),
            phase_path.len(),
            geometric_distance.len(),
            electron_density.len(),
            refractive_index.len(),
        ];
        if lens.iter().any(|&l| l != n) {
            return Err(RaidError::ShapeMismatch);
        }
        for (a, b) in phase_path.iter().zip(phase_path.iter().skip(1)) {
            if !(b >= a) {
                return Err(RaidError::NonMonotonicPath);
            }
        }
        Ok(Self {
            elevation,
            ground_range,
            height,
            group_range,
            phase_path,
            geometric_distance,
            electron_density,
            refractive_index,
        })
    }

    /// Number of samples along the ray.
    pub fn len(&self) -> usize {
        self.ground_range.len()
    }

    /// Whether the ray carries no samples.
    pub fn is_empty(&self) -> bool {
        self.ground_range.is_empty()
    }
}

/// Trapezoidal integral of `profile` against the `path` coordinate.
///
/// NaN profile entries contribute nothing: they are replaced by zero before
/// integrating, so invalid samples never poison the total. Fewer than two
/// samples integrate to zero; mismatched lengths are a hard error.
pub fn trapz(profile: &Array1<f64>, path: &Array1<f64>) -> Result<f64, RaidError> {
    if profile.len() != path.len() {
        return Err(RaidError::ShapeMismatch);
    }
    let fill = |v: f64| if v.is_nan() { 0.0 } else { v };
    let mut total = 0.0;
    for i in 1..profile.len() {
        total += 0.5 * (fill(profile[i - 1]) + fill(profile[i])) * (path[i] - path[i - 1]);
    }
    Ok(total)
}

/// A ray joined with the model samples along it and the evaluated
/// absorption/phase profiles.
///
/// This is the per-elevation unit of work: everything is computed once at
/// construction and consumed read-only afterwards.
#[derive(Debug, Clone)]
pub struct ObliquePath {
    /// The upstream ray table
    pub ray: RayPath,
    /// Latitude samples along the ground track (deg)
    pub lats: Array1<f64>,
    /// Longitude samples along the ground track (deg)
    pub lons: Array1<f64>,
    /// Total geomagnetic field along the ray (nT)
    pub field_total: Array1<f64>,
    /// Collision frequency profiles along the ray
    pub collisions: CollisionProfiles,
    /// Operating frequency (Hz)
    pub freq_hz: f64,
    /// Absorption and phase profiles per (theory, model, mode)
    pub results: AbsorptionResults,
}

impl ObliquePath {
    /// Sample the external models along a ray and evaluate both theories.
    ///
    /// Electron density comes from the ray table itself (the tracer already
    /// carries it); field and collision frequencies come from the supplied
    /// providers, queried at the ray's geographic samples.
    pub fn sample(
        time: Epoch,
        ray: RayPath,
        bearing: &Bearing,
        field: &(impl GeomagneticModel + ?Sized),
        collisions: &(impl CollisionProvider + ?Sized),
    ) -> Result<Self, RaidError> {
        debug!(
            "sampling models along elevation {:.1} deg ({} points)",
            ray.elevation,
            ray.len()
        );
        let (lats, lons) =
            geo::latlon_along_bearing(bearing.olat, bearing.olon, bearing.rb, &ray.ground_range);
        let field_total = field_along_path(field, time, &lats, &lons, &ray.height);
        let collisions = collisions.profiles(time, &lats, &lons, &ray.height);
        let freq_hz = bearing.freq_hz();
        let results =
            AbsorptionResults::compute(&ray.electron_density, &field_total, &collisions, freq_hz)?;
        Ok(Self {
            ray,
            lats,
            lons,
            field_total,
            collisions,
            freq_hz,
            results,
        })
    }

    /// Build from already-sampled model arrays, without touching providers.
    pub fn from_parts(
        ray: RayPath,
        lats: Array1<f64>,
        lons: Array1<f64>,
        field_total: Array1<f64>,
        collisions: CollisionProfiles,
        freq_hz: f64,
    ) -> Result<Self, RaidError> {
        if lats.len() != ray.len() || lons.len() != ray.len() || field_total.len() != ray.len() {
            return Err(RaidError::ShapeMismatch);
        }
        let results =
            AbsorptionResults::compute(&ray.electron_density, &field_total, &collisions, freq_hz)?;
        Ok(Self {
            ray,
            lats,
            lons,
            field_total,
            collisions,
            freq_hz,
            results,
        })
    }

    /// Total one-way absorption (dB) along the ray.
    ///
    /// Integrates the selected mode's absorption coefficient against
    /// `path`, or against the ray's own phase-path column when `path` is
    /// `None`.
    pub fn total_absorption(
        &self,
        path: Option<&Array1<f64>>,
        theory: Theory,
        model: CollisionModel,
        mode: Mode,
    ) -> Result<f64, RaidError> {
        let profile = self.results.profile(theory, model, mode)?;
        trapz(&profile.beta, path.unwrap_or(&self.ray.phase_path))
    }

    /// Total accumulated phase (rad) along the ray.
    ///
    /// Same integration as [`Self::total_absorption`], over the phase
    /// coefficient instead.
    pub fn total_phase(
        &self,
        path: Option<&Array1<f64>>,
        theory: Theory,
        model: CollisionModel,
        mode: Mode,
    ) -> Result<f64, RaidError> {
        let profile = self.results.profile(theory, model, mode)?;
        trapz(&profile.phi, path.unwrap_or(&self.ray.phase_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp(n: usize) -> Array1<f64> {
        Array1::from_iter((0..n).map(|i| i as f64))
    }

    fn ray(n: usize) -> RayPath {
        RayPath::new(
            15.0,
            ramp(n),
            ramp(n),
            ramp(n),
            ramp(n),
            ramp(n),
            Array1::from_elem(n, 1.0e9),
            Array1::from_elem(n, 1.0),
        )
        .unwrap()
    }

    #[test]
    fn ray_validation() {
        let r = ray(5);
        assert_eq!(r.len(), 5);

        let bad = RayPath::new(
            15.0,
            ramp(5),
            ramp(4),
            ramp(5),
            ramp(5),
            ramp(5),
            ramp(5),
            ramp(5),
        );
        assert!(matches!(bad, Err(RaidError::ShapeMismatch)));

        let decreasing = Array1::from(vec![0.0, 2.0, 1.0]);
        let bad = RayPath::new(
            15.0,
            ramp(3),
            ramp(3),
            ramp(3),
            decreasing,
            ramp(3),
            ramp(3),
            ramp(3),
        );
        assert!(matches!(bad, Err(RaidError::NonMonotonicPath)));
    }

    #[test]
    fn trapz_of_constant_profile() {
        // 2 dB/km over a 4 km phase path is 8 dB
        let beta = Array1::from_elem(5, 2.0);
        let path = Array1::from(vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_relative_eq!(trapz(&beta, &path).unwrap(), 8.0, max_relative = 1e-12);
    }

    #[test]
    fn trapz_nan_fill_is_equivalent_to_zero_fill() {
        let path = Array1::from(vec![0.0, 0.5, 1.5, 2.0, 4.0]);
        let with_nan = Array1::from(vec![1.0, f64::NAN, 3.0, f64::NAN, 2.0]);
        let with_zero = Array1::from(vec![1.0, 0.0, 3.0, 0.0, 2.0]);
        assert_eq!(
            trapz(&with_nan, &path).unwrap(),
            trapz(&with_zero, &path).unwrap()
        );
    }

    #[test]
    fn trapz_is_linear() {
        let path = Array1::from(vec![0.0, 1.0, 2.5, 3.0]);
        let a = Array1::from(vec![1.0, -2.0, 0.5, 4.0]);
        let b = Array1::from(vec![0.25, 3.0, -1.0, 2.0]);
        let sum = &a + &b;
        assert_relative_eq!(
            trapz(&sum, &path).unwrap(),
            trapz(&a, &path).unwrap() + trapz(&b, &path).unwrap(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn trapz_edge_shapes() {
        let one = Array1::from(vec![3.0]);
        assert_eq!(trapz(&one, &one).unwrap(), 0.0);
        let short = Array1::from(vec![1.0, 2.0]);
        assert!(matches!(
            trapz(&one, &short),
            Err(RaidError::ShapeMismatch)
        ));
    }

    #[test]
    fn from_parts_validates_alignment() {
        let r = ray(4);
        let coll = {
            let arr = || Array1::from_elem(4, 1.0e5);
            CollisionProfiles::new(arr(), arr(), arr(), arr()).unwrap()
        };
        let bad = ObliquePath::from_parts(
            r.clone(),
            Array1::zeros(3),
            Array1::zeros(4),
            Array1::from_elem(4, 5.0e4),
            coll.clone(),
            10e6,
        );
        assert!(matches!(bad, Err(RaidError::ShapeMismatch)));

        let ok = ObliquePath::from_parts(
            r,
            Array1::zeros(4),
            Array1::zeros(4),
            Array1::from_elem(4, 5.0e4),
            coll,
            10e6,
        )
        .unwrap();
        let total = ok
            .total_absorption(None, Theory::AppletonHartree, CollisionModel::Sn, Mode::O)
            .unwrap();
        assert!(total.is_finite() && total >= 0.0);
    }
}
