//! Physical constants shared by the magnetoionic formulas.

#![allow(clippy::excessive_precision)]

/// Elementary charge (C)
pub const Q_E: f64 = 1.602_176_634e-19;

/// Electron rest mass (kg)
pub const M_E: f64 = 9.109_383_701_5e-31;

/// Vacuum permittivity (F/m)
pub const EPS_0: f64 = 8.854_187_812_8e-12;

/// Speed of light in vacuum (m/s)
pub const SPEED_LIGHT: f64 = 2.997_924_58e8;

/// Mean radius of the Earth (m)
pub const R_EARTH: f64 = 6371e3;

/// Angular wavenumber `ω/c` (rad/m) for an operating frequency in Hz.
pub fn wavenumber(freq_hz: f64) -> f64 {
    angular_frequency(freq_hz) / SPEED_LIGHT
}

/// Angular frequency `2πf` (rad/s) for an operating frequency in Hz.
pub fn angular_frequency(freq_hz: f64) -> f64 {
    2.0 * std::f64::consts::PI * freq_hz
}

/// Electron gyrofrequency `qB/mₑ` (rad/s) for a field magnitude in nT.
///
/// Field magnitudes travel through the toolkit in nT, the unit the
/// geomagnetic model contract produces; the tesla conversion lives here.
pub fn gyrofrequency(b_nt: f64) -> f64 {
    Q_E * b_nt * 1e-9 / M_E
}
