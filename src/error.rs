use crate::absorption::{Mode, Theory};
use crate::collision::CollisionModel;

/// Possible toolkit errors.
///
/// Domain-invalid samples (non-positive or NaN density, field or collision
/// frequency) are not errors: they become NaN in the affected sample and the
/// path integral treats them as zero. The variants here are the fatal
/// configuration/shape problems that abort a computation.
#[derive(Debug)]
pub enum RaidError {
    /// Per-sample arrays for one ray don't share the same length
    ShapeMismatch,
    /// The phase-path coordinate decreases somewhere along the ray
    NonMonotonicPath,
    /// A ray carries no samples at all
    EmptyProfile,
    /// The requested (theory, collision model, mode) tuple is not evaluated
    InvalidCombination(Theory, CollisionModel, Mode),
    /// The rayon worker pool could not be constructed
    ThreadPool(rayon::ThreadPoolBuildError),
    /// Figure or summary output could not be written
    Io(std::io::Error),
}

impl std::fmt::Display for RaidError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RaidError::ShapeMismatch => {
                write!(f, "per-sample arrays have inconsistent lengths")
            }
            RaidError::NonMonotonicPath => {
                write!(f, "phase path coordinate is not monotonically non-decreasing")
            }
            RaidError::EmptyProfile => write!(f, "ray carries no samples"),
            RaidError::InvalidCombination(theory, model, mode) => {
                write!(f, "no {theory}:{model} profile for mode {mode}")
            }
            RaidError::ThreadPool(e) => write!(f, "worker pool: {e}"),
            RaidError::Io(e) => write!(f, "output: {e}"),
        }
    }
}

impl std::error::Error for RaidError {}

impl From<std::io::Error> for RaidError {
    fn from(e: std::io::Error) -> Self {
        RaidError::Io(e)
    }
}
