//! Magnetoionic absorption and phase coefficients along a ray profile.
//!
//! Given aligned per-sample electron density, geomagnetic field magnitude
//! and collision frequency arrays, this module evaluates complex refractive
//! indices under the Appleton-Hartree and Sen-Wyller dispersion relations
//! and reduces them to per-sample absorption (dB/km) and phase (rad/km)
//! coefficients for the characteristic propagation modes.

mod appleton_hartree;
mod sen_wyller;
mod special;

#[cfg(test)]
mod tests;

pub use sen_wyller::{calculate_sw_ox_abs, calculate_sw_rl_abs};

use ndarray::Array1;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::collision::{CollisionModel, CollisionProfiles};
use crate::error::RaidError;

/// Magnetoionic dispersion theory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theory {
    /// Classical cold-plasma closed form
    AppletonHartree,
    /// Maxwellian-collision refinement
    SenWyller,
}

impl std::fmt::Display for Theory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theory::AppletonHartree => write!(f, "ah"),
            Theory::SenWyller => write!(f, "sw"),
        }
    }
}

/// Characteristic propagation mode through the magnetized plasma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// No-field approximation
    NoField,
    /// Ordinary
    O,
    /// Extraordinary
    X,
    /// Right-hand circular
    R,
    /// Left-hand circular
    L,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::NoField => write!(f, "no"),
            Mode::O => write!(f, "O"),
            Mode::X => write!(f, "X"),
            Mode::R => write!(f, "R"),
            Mode::L => write!(f, "L"),
        }
    }
}

/// Per-sample absorption and phase coefficients for one mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeProfile {
    /// Absorption coefficient `|8.68·k·10³·Im(n)|` (dB/km)
    pub beta: Array1<f64>,
    /// Phase coefficient `k·10³·Re(n)` (rad/km)
    pub phi: Array1<f64>,
}

impl ModeProfile {
    fn from_indices(n: &[Complex64], k: f64) -> Self {
        let beta = n.iter().map(|n| (8.68 * k * 1e3 * n.im).abs()).collect();
        let phi = n.iter().map(|n| k * 1e3 * n.re).collect();
        Self {
            beta: Array1::from_vec(beta),
            phi: Array1::from_vec(phi),
        }
    }

    fn zeros(len: usize) -> Self {
        Self {
            beta: Array1::zeros(len),
            phi: Array1::zeros(len),
        }
    }
}

/// The five mode profiles produced for one (theory, collision model) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeSet {
    /// No-field approximation
    pub no: ModeProfile,
    /// Ordinary mode
    pub o: ModeProfile,
    /// Extraordinary mode
    pub x: ModeProfile,
    /// Right-hand circular mode
    pub r: ModeProfile,
    /// Left-hand circular mode
    pub l: ModeProfile,
}

impl ModeSet {
    /// The profile for one mode.
    pub fn mode(&self, mode: Mode) -> &ModeProfile {
        match mode {
            Mode::NoField => &self.no,
            Mode::O => &self.o,
            Mode::X => &self.x,
            Mode::R => &self.r,
            Mode::L => &self.l,
        }
    }
}

/// Every evaluated (theory, collision model) combination for one ray.
///
/// Appleton-Hartree is evaluated for all four collision models; Sen-Wyller
/// only for `ft`. Lookups of any other pairing fail fast with
/// [`RaidError::InvalidCombination`] instead of handing back a stale array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsorptionResults {
    freq_hz: f64,
    ah_ft: ModeSet,
    ah_sn: ModeSet,
    ah_av_cc: ModeSet,
    ah_av_mb: ModeSet,
    sw_ft: ModeSet,
}

impl AbsorptionResults {
    /// Evaluate both dispersion theories over an aligned ray profile.
    ///
    /// `ne` in m⁻³, `bo_nt` in nT, collision frequencies in s⁻¹, operating
    /// frequency in Hz. Samples with non-positive or NaN inputs yield NaN
    /// coefficients; mismatched array lengths abort with `ShapeMismatch`.
    pub fn compute(
        ne: &Array1<f64>,
        bo_nt: &Array1<f64>,
        collisions: &CollisionProfiles,
        freq_hz: f64,
    ) -> Result<Self, RaidError> {
        let n = ne.len();
        if bo_nt.len() != n || collisions.len() != n {
            return Err(RaidError::ShapeMismatch);
        }
        if n == 0 {
            return Err(RaidError::EmptyProfile);
        }

        let ah = |model: CollisionModel| {
            appleton_hartree::mode_set(ne, bo_nt, collisions.get(model), freq_hz)
        };
        Ok(Self {
            freq_hz,
            ah_ft: ah(CollisionModel::Ft),
            ah_sn: ah(CollisionModel::Sn),
            ah_av_cc: ah(CollisionModel::AvCc),
            ah_av_mb: ah(CollisionModel::AvMb),
            sw_ft: sen_wyller::mode_set(ne, bo_nt, collisions.get(CollisionModel::Ft), freq_hz),
        })
    }

    /// Operating frequency the profiles were evaluated at (Hz).
    pub fn freq_hz(&self) -> f64 {
        self.freq_hz
    }

    /// The mode set for one (theory, collision model) pair.
    pub fn mode_set(
        &self,
        theory: Theory,
        model: CollisionModel,
    ) -> Result<&ModeSet, RaidError> {
        match (theory, model) {
            (Theory::AppletonHartree, CollisionModel::Ft) => Ok(&self.ah_ft),
            (Theory::AppletonHartree, CollisionModel::Sn) => Ok(&self.ah_sn),
            (Theory::AppletonHartree, CollisionModel::AvCc) => Ok(&self.ah_av_cc),
            (Theory::AppletonHartree, CollisionModel::AvMb) => Ok(&self.ah_av_mb),
            (Theory::SenWyller, CollisionModel::Ft) => Ok(&self.sw_ft),
            (Theory::SenWyller, model) => {
                Err(RaidError::InvalidCombination(theory, model, Mode::O))
            }
        }
    }

    /// The per-sample profile for one (theory, collision model, mode) tuple.
    pub fn profile(
        &self,
        theory: Theory,
        model: CollisionModel,
        mode: Mode,
    ) -> Result<&ModeProfile, RaidError> {
        self.mode_set(theory, model)
            .map_err(|_| RaidError::InvalidCombination(theory, model, mode))
            .map(|set| set.mode(mode))
    }
}

/// Whether a sample's physical inputs allow a refractive-index evaluation.
///
/// The comparisons are written so NaN in any input also fails the guard.
fn valid_sample(ne: f64, bo: f64, nu: f64) -> bool {
    ne > 0.0 && bo > 0.0 && nu > 0.0
}
