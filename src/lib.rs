//! HF radio wave absorption and Doppler shift along ray-traced ionospheric
//! paths.
//!
//! The crate takes the output of an external ray tracer (per-elevation
//! tables of ground range, height, phase path and electron density) together
//! with externally provided geomagnetic field and collision-frequency
//! profiles, evaluates complex refractive indices under the Appleton-Hartree
//! and Sen-Wyller magnetoionic dispersion relations, and reduces them to
//! per-ray absorption (dB) and phase (rad) totals by trapezoidal integration
//! against the phase-path coordinate. Doppler frequency and velocity shifts
//! come from differencing phase totals of time-adjacent rays.
//!
//! The external geophysical models (IRI-class density, IGRF-class field,
//! MSIS-class neutral atmosphere) are consumed through the per-point traits
//! in [`models`]; [`models::synthetic`] carries closed-form stand-ins for
//! scenario studies and tests.

pub mod absorption;
pub mod batch;
pub mod collision;
pub mod constants;
pub mod doppler;
pub mod error;
pub mod geo;
pub mod models;
pub mod path;
pub mod plot;

pub use absorption::{AbsorptionResults, Mode, ModeProfile, ModeSet, Theory};
pub use collision::{CollisionModel, CollisionProfiles, CollisionProvider};
pub use doppler::{DopplerProfile, DopplerShift};
pub use error::RaidError;
pub use path::{trapz, Bearing, ObliquePath, RayPath};
