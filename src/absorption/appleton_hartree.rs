//! Closed-form Appleton-Hartree dispersion relation.

use ndarray::Array1;
use num_complex::Complex64;

use super::{valid_sample, ModeProfile, ModeSet};
use crate::constants::{angular_frequency, gyrofrequency, wavenumber, EPS_0, M_E, Q_E};

/// Complex refractive indices `[no, O, X, R, L]` for one sample.
///
/// `x` is the plasma-frequency-squared ratio `X`, `z` the collision
/// parameter `Z = ν/ω` and `y` the gyrofrequency ratio. The X mode takes
/// `y` transversally (quasi-longitudinal, `Y_L = 0`); R and L take it
/// longitudinally (`Y_T = 0`).
pub(super) fn refractive_indices(x: f64, z: f64, y: f64) -> [Complex64; 5] {
    let one_m_jz = Complex64::new(1.0, -z);

    let n_no = (Complex64::from(1.0) - x / one_m_jz).sqrt();
    let n_o = n_no;

    // 1 - X - jZ
    let a = Complex64::new(1.0 - x, -z);
    let n_x = (Complex64::from(1.0)
        - (2.0 * x * a) / (2.0 * a * one_m_jz - Complex64::from(2.0 * y * y)))
    .sqrt();

    let n_r = (Complex64::from(1.0) - x / (one_m_jz - y)).sqrt();
    let n_l = (Complex64::from(1.0) - x / (one_m_jz + y)).sqrt();

    [n_no, n_o, n_x, n_r, n_l]
}

/// Evaluate all five modes over an aligned profile for one collision model.
pub(super) fn mode_set(
    ne: &Array1<f64>,
    bo_nt: &Array1<f64>,
    nu: &Array1<f64>,
    freq_hz: f64,
) -> ModeSet {
    let w = angular_frequency(freq_hz);
    let k = wavenumber(freq_hz);

    let len = ne.len();
    let mut modes: [Vec<Complex64>; 5] = std::array::from_fn(|_| Vec::with_capacity(len));
    for i in 0..len {
        let sample = if valid_sample(ne[i], bo_nt[i], nu[i]) {
            let x = ne[i] * Q_E * Q_E / (EPS_0 * M_E * w * w);
            let z = nu[i] / w;
            let y = gyrofrequency(bo_nt[i]) / w;
            refractive_indices(x, z, y)
        } else {
            [Complex64::new(f64::NAN, f64::NAN); 5]
        };
        for (series, n) in modes.iter_mut().zip(sample) {
            series.push(n);
        }
    }

    let [no, o, x, r, l] = modes;
    ModeSet {
        no: ModeProfile::from_indices(&no, k),
        o: ModeProfile::from_indices(&o, k),
        x: ModeProfile::from_indices(&x, k),
        r: ModeProfile::from_indices(&r, k),
        l: ModeProfile::from_indices(&l, k),
    }
}
