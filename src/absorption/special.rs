//! Special function for the Sen-Wyller dispersion relation.
//!
//! Sen, H. K., and Wyller, A. A. (1960), On the generalization of the
//! Appleton-Hartree magnetoionic formulas, J. Geophys. Res. 65(12),
//! 3931-3950, doi:10.1029/JZ065i012p03931.

/// Upper limit standing in for the semi-infinite integration interval; the
/// `e^{-t}` factor has underflowed to zero well before this point.
const T_UPPER: f64 = 700.0;

/// Absolute error target handed to the quadrature routine.
const TARGET: f64 = 1e-10;

/// `C(p, y) = (1/Γ*) ∫₀^∞ tᵖ e⁻ᵗ / (t² + y²) dt`
///
/// `Γ*` is the gamma-factorial normalization of [`gamma_factorial`]. For
/// `|y| > 1` the integrand is evaluated as `tᵖ e⁻ᵗ / (1 + (t/y)²)` scaled by
/// `1/y²` so the quadrature's absolute error target tracks the magnitude of
/// the result.
pub(super) fn c_special(p: f64, y: f64) -> f64 {
    let cy = if y * y > 1.0 {
        let y2 = y * y;
        let out = quadrature::double_exponential::integrate(
            |t| t.powf(p) * (-t).exp() / (1.0 + t * t / y2),
            0.0,
            T_UPPER,
            TARGET,
        );
        out.integral / y2
    } else {
        let out = quadrature::double_exponential::integrate(
            |t| t.powf(p) * (-t).exp() / (t * t + y * y),
            0.0,
            T_UPPER,
            TARGET,
        );
        out.integral
    };
    cy / gamma_factorial(p)
}

/// Gamma-factorial of a possibly fractional exponent.
///
/// For `p = n + f` with integer `n` and remainder `f`, this is `n!·Γ(f)`
/// when `f > 0` and `n!` otherwise. Note this is not `Γ(p)` for fractional
/// `p`; the published formulation normalizes with exactly this product.
fn gamma_factorial(p: f64) -> f64 {
    let n = p.trunc() as u64;
    let f = p - p.trunc();
    let mut fact = 1.0;
    for k in 2..=n {
        fact *= k as f64;
    }
    if f > 0.0 {
        fact * libm::tgamma(f)
    } else {
        fact
    }
}
