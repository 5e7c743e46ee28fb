//! Electron-neutral collision frequency profiles.
//!
//! The physics that derives collision frequencies from neutral composition
//! and temperature lives in external providers; this module only fixes the
//! output contract the absorption calculator consumes: one aligned array per
//! reference model.

use hifitime::Epoch;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::RaidError;

/// The reference collision-frequency formulations carried per profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionModel {
    /// Friedrich-Torkar empirical model
    Ft,
    /// Schunk-Nagy species-sum model
    Sn,
    /// Averaged model, Chapman-Cowling form
    AvCc,
    /// Averaged model, Maxwell-Boltzmann form
    AvMb,
}

impl CollisionModel {
    /// All models, in the order batch totals are reported.
    pub const ALL: [CollisionModel; 4] = [
        CollisionModel::Ft,
        CollisionModel::Sn,
        CollisionModel::AvCc,
        CollisionModel::AvMb,
    ];
}

impl std::fmt::Display for CollisionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollisionModel::Ft => write!(f, "ft"),
            CollisionModel::Sn => write!(f, "sn"),
            CollisionModel::AvCc => write!(f, "av_cc"),
            CollisionModel::AvMb => write!(f, "av_mb"),
        }
    }
}

/// Per-sample collision frequencies (s⁻¹) under each reference model.
///
/// All four arrays are aligned with the ray profile that produced them:
/// index `i` refers to the same point along the ray in every array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionProfiles {
    ft: Array1<f64>,
    sn: Array1<f64>,
    av_cc: Array1<f64>,
    av_mb: Array1<f64>,
}

impl CollisionProfiles {
    /// Bundle the four model arrays, rejecting inconsistent lengths.
    pub fn new(
        ft: Array1<f64>,
        sn: Array1<f64>,
        av_cc: Array1<f64>,
        av_mb: Array1<f64>,
    ) -> Result<Self, RaidError> {
        let n = ft.len();
        if sn.len() != n || av_cc.len() != n || av_mb.len() != n {
            return Err(RaidError::ShapeMismatch);
        }
        Ok(Self { ft, sn, av_cc, av_mb })
    }

    /// Number of samples per model array.
    pub fn len(&self) -> usize {
        self.ft.len()
    }

    /// Whether the profiles carry no samples.
    pub fn is_empty(&self) -> bool {
        self.ft.is_empty()
    }

    /// The collision frequency array for one model.
    pub fn get(&self, model: CollisionModel) -> &Array1<f64> {
        match model {
            CollisionModel::Ft => &self.ft,
            CollisionModel::Sn => &self.sn,
            CollisionModel::AvCc => &self.av_cc,
            CollisionModel::AvMb => &self.av_mb,
        }
    }
}

/// Call contract for an external collision-frequency provider.
///
/// Given the geographic samples of one ray, a provider returns the four
/// model arrays aligned with those samples.
pub trait CollisionProvider {
    /// Collision frequency profiles along `(lats, lons, alts_km)`.
    fn profiles(
        &self,
        time: Epoch,
        lats: &Array1<f64>,
        lons: &Array1<f64>,
        alts_km: &Array1<f64>,
    ) -> CollisionProfiles;
}
