//! Parallel fan-out over independent rays.
//!
//! One task per elevation angle on a caller-sized worker pool. Tasks share
//! nothing; results come back in submission order. Error handling is
//! all-or-nothing: the first ray that fails aborts the whole batch with no
//! partial results and no retry.

use std::sync::atomic::{AtomicUsize, Ordering};

use hifitime::Epoch;
use log::{debug, info};
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::absorption::{Mode, Theory};
use crate::collision::{CollisionModel, CollisionProvider};
use crate::error::RaidError;
use crate::models::GeomagneticModel;
use crate::path::{Bearing, ObliquePath, RayPath};

/// One (theory, collision model, mode) tuple to integrate per ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combination {
    /// Dispersion theory
    pub theory: Theory,
    /// Collision-frequency model
    pub model: CollisionModel,
    /// Propagation mode
    pub mode: Mode,
}

impl Combination {
    /// The four combinations the eclipse studies sweep, O mode throughout.
    pub fn swept() -> [Combination; 4] {
        let o = |theory, model| Combination {
            theory,
            model,
            mode: Mode::O,
        };
        [
            o(Theory::AppletonHartree, CollisionModel::Sn),
            o(Theory::AppletonHartree, CollisionModel::AvCc),
            o(Theory::AppletonHartree, CollisionModel::AvMb),
            o(Theory::SenWyller, CollisionModel::Ft),
        ]
    }
}

impl std::fmt::Display for Combination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.theory, self.model, self.mode)
    }
}

/// Path-integrated totals for one ray, one entry per requested combination.
#[derive(Debug, Clone)]
pub struct RayTotals {
    /// Launch elevation (deg)
    pub elevation: f64,
    /// Total one-way absorption (dB) per combination
    pub absorption_db: SmallVec<[f64; 8]>,
    /// Total accumulated phase (rad) per combination
    pub phase_rad: SmallVec<[f64; 8]>,
}

/// Evaluate every ray of a batch in parallel.
///
/// The pool size is `num_threads`, or rayon's default when `None`. Results
/// are collected in the order the rays were submitted.
pub fn compute_batch<F, P>(
    time: Epoch,
    rays: Vec<RayPath>,
    bearing: &Bearing,
    field: &F,
    collisions: &P,
    num_threads: Option<usize>,
) -> Result<Vec<ObliquePath>, RaidError>
where
    F: GeomagneticModel + Sync,
    P: CollisionProvider + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads.unwrap_or(0))
        .build()
        .map_err(RaidError::ThreadPool)?;

    let num_rays = rays.len();
    let num_completed = AtomicUsize::new(0);
    info!("processing absorption for {num_rays} rays");

    pool.install(|| {
        rays.into_par_iter()
            .map(|ray| ObliquePath::sample(time, ray, bearing, field, collisions))
            .inspect(|_| {
                let done = num_completed.fetch_add(1, Ordering::Relaxed) + 1;
                debug!("completed {done}/{num_rays} rays");
            })
            .collect()
    })
}

/// Reduce evaluated rays to per-combination totals.
pub fn integrate_totals(
    paths: &[ObliquePath],
    combinations: &[Combination],
) -> Result<Vec<RayTotals>, RaidError> {
    paths
        .iter()
        .map(|path| {
            let mut absorption_db = SmallVec::new();
            let mut phase_rad = SmallVec::new();
            for combo in combinations {
                absorption_db.push(path.total_absorption(
                    None,
                    combo.theory,
                    combo.model,
                    combo.mode,
                )?);
                phase_rad.push(path.total_phase(None, combo.theory, combo.model, combo.mode)?);
            }
            Ok(RayTotals {
                elevation: path.ray.elevation,
                absorption_db,
                phase_rad,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::density_along_path;
    use crate::models::synthetic::{BulkCollisions, ChapmanLayer, ExponentialAtmosphere, UniformField};
    use ndarray::Array1;

    fn epoch() -> Epoch {
        Epoch::from_gregorian_utc(2024, 4, 8, 18, 0, 0, 0)
    }

    fn bearing() -> Bearing {
        Bearing {
            rb: 100.0,
            olat: 40.0,
            olon: -105.0,
            freq_mhz: 10.0,
        }
    }

    fn synthetic_ray(elevation: f64, n: usize) -> RayPath {
        let layer = ChapmanLayer::default();
        let grange = Array1::from_iter((0..n).map(|i| 10.0 * i as f64));
        let height = grange.mapv(|g| 80.0 + 0.4 * g);
        let edens = density_along_path(
            &layer,
            epoch(),
            &Array1::zeros(n),
            &Array1::zeros(n),
            &height,
        );
        RayPath::new(
            elevation,
            grange.clone(),
            height,
            grange.clone(),
            grange.clone(),
            grange,
            edens,
            Array1::from_elem(n, 1.0),
        )
        .unwrap()
    }

    #[test]
    fn batch_preserves_submission_order() {
        let rays: Vec<_> = [5.0, 10.0, 15.0, 20.0, 25.0]
            .iter()
            .map(|&e| synthetic_ray(e, 40))
            .collect();
        let field = UniformField::default();
        let coll = BulkCollisions {
            atmosphere: ExponentialAtmosphere::default(),
        };
        let paths = compute_batch(epoch(), rays, &bearing(), &field, &coll, Some(3)).unwrap();
        let elevations: Vec<_> = paths.iter().map(|p| p.ray.elevation).collect();
        assert_eq!(elevations, vec![5.0, 10.0, 15.0, 20.0, 25.0]);
    }

    #[test]
    fn batch_aborts_on_first_error() {
        // one empty ray poisons the whole batch
        let mut rays = vec![synthetic_ray(5.0, 20)];
        rays.push(RayPath {
            elevation: 10.0,
            ground_range: Array1::from(vec![]),
            height: Array1::from(vec![]),
            group_range: Array1::from(vec![]),
            phase_path: Array1::from(vec![]),
            geometric_distance: Array1::from(vec![]),
            electron_density: Array1::from(vec![]),
            refractive_index: Array1::from(vec![]),
        });
        let field = UniformField::default();
        let coll = BulkCollisions {
            atmosphere: ExponentialAtmosphere::default(),
        };
        let out = compute_batch(epoch(), rays, &bearing(), &field, &coll, Some(2));
        assert!(matches!(out, Err(RaidError::EmptyProfile)));
    }

    #[test]
    fn totals_follow_combination_order() {
        let rays = vec![synthetic_ray(12.0, 30)];
        let field = UniformField::default();
        let coll = BulkCollisions {
            atmosphere: ExponentialAtmosphere::default(),
        };
        let paths = compute_batch(epoch(), rays, &bearing(), &field, &coll, Some(1)).unwrap();
        let totals = integrate_totals(&paths, &Combination::swept()).unwrap();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].absorption_db.len(), 4);
        assert_eq!(totals[0].phase_rad.len(), 4);
        assert!(totals[0].absorption_db.iter().all(|v| v.is_finite()));
    }
}
