use approx::{assert_abs_diff_eq, assert_relative_eq};
use ndarray::Array1;

use super::appleton_hartree::refractive_indices;
use super::*;
use crate::collision::CollisionProfiles;

fn uniform_collisions(nu: f64, len: usize) -> CollisionProfiles {
    let arr = || Array1::from_elem(len, nu);
    CollisionProfiles::new(arr(), arr(), arr(), arr()).unwrap()
}

#[test]
fn no_field_limit_collapses_all_modes() {
    // with the gyrofrequency terms forced to zero every magnetized mode
    // reduces to the no-field index
    let (x, z) = (0.3, 0.05);
    let [n_no, n_o, n_x, n_r, n_l] = refractive_indices(x, z, 0.0);
    assert_abs_diff_eq!(n_o.re, n_no.re, epsilon = 1e-15);
    assert_abs_diff_eq!(n_o.im, n_no.im, epsilon = 1e-15);
    assert_abs_diff_eq!(n_x.re, n_no.re, epsilon = 1e-12);
    assert_abs_diff_eq!(n_x.im, n_no.im, epsilon = 1e-12);
    assert_abs_diff_eq!(n_r.re, n_no.re, epsilon = 1e-15);
    assert_abs_diff_eq!(n_l.im, n_no.im, epsilon = 1e-15);
}

#[test]
fn collisionless_plasma_is_transparent() {
    let [n_no, ..] = refractive_indices(0.5, 0.0, 0.0);
    assert_abs_diff_eq!(n_no.im, 0.0, epsilon = 1e-15);
    assert_relative_eq!(n_no.re, 0.5_f64.sqrt(), max_relative = 1e-12);
}

#[test]
fn sw_guard_returns_nan_pairs() {
    let fo = 30e6;
    for (bo, ne, nu) in [
        (5.0e4, -1.0, 1.0e5),
        (5.0e4, 0.0, 1.0e5),
        (0.0, 1.0e11, 1.0e5),
        (-3.0e4, 1.0e11, 1.0e5),
        (5.0e4, 1.0e11, 0.0),
        (5.0e4, f64::NAN, 1.0e5),
        (f64::NAN, 1.0e11, 1.0e5),
        (5.0e4, 1.0e11, f64::NAN),
    ] {
        let (o, x) = calculate_sw_ox_abs(bo, ne, nu, fo);
        assert!(o.is_nan() && x.is_nan(), "OX guard missed ({bo}, {ne}, {nu})");
        let (r, l) = calculate_sw_rl_abs(bo, ne, nu, fo);
        assert!(r.is_nan() && l.is_nan(), "RL guard missed ({bo}, {ne}, {nu})");
    }
}

#[test]
fn sw_valid_sample_is_finite() {
    // D-region-like numbers at 30 MHz
    let (o, x) = calculate_sw_ox_abs(5.0e4, 1.0e9, 1.0e5, 30e6);
    assert!(o.is_finite() && x.is_finite());
    assert!(o >= 0.0 && x >= 0.0);
    let (r, l) = calculate_sw_rl_abs(5.0e4, 1.0e9, 1.0e5, 30e6);
    assert!(r.is_finite() && l.is_finite());
}

#[test]
fn invalid_samples_become_nan_not_errors() {
    let ne = Array1::from(vec![1.0e9, -1.0, 2.0e9, f64::NAN]);
    let bo = Array1::from_elem(4, 5.0e4);
    let coll = uniform_collisions(1.0e5, 4);
    let results = AbsorptionResults::compute(&ne, &bo, &coll, 10e6).unwrap();

    let beta = &results
        .profile(Theory::AppletonHartree, CollisionModel::Sn, Mode::O)
        .unwrap()
        .beta;
    assert!(beta[0].is_finite());
    assert!(beta[1].is_nan());
    assert!(beta[2].is_finite());
    assert!(beta[3].is_nan());

    let sw = &results
        .profile(Theory::SenWyller, CollisionModel::Ft, Mode::X)
        .unwrap()
        .beta;
    assert!(sw[0].is_finite());
    assert!(sw[1].is_nan());
}

#[test]
fn sen_wyller_no_field_profile_stays_zero() {
    let ne = Array1::from_elem(3, 1.0e9);
    let bo = Array1::from_elem(3, 5.0e4);
    let coll = uniform_collisions(1.0e5, 3);
    let results = AbsorptionResults::compute(&ne, &bo, &coll, 10e6).unwrap();
    let no = results
        .profile(Theory::SenWyller, CollisionModel::Ft, Mode::NoField)
        .unwrap();
    assert!(no.beta.iter().all(|&v| v == 0.0));
    assert!(no.phi.iter().all(|&v| v == 0.0));
}

#[test]
fn shape_mismatch_fails_fast() {
    let ne = Array1::from_elem(3, 1.0e9);
    let bo = Array1::from_elem(2, 5.0e4);
    let coll = uniform_collisions(1.0e5, 3);
    assert!(matches!(
        AbsorptionResults::compute(&ne, &bo, &coll, 10e6),
        Err(RaidError::ShapeMismatch)
    ));

    let empty = Array1::from(vec![]);
    let coll0 = uniform_collisions(1.0e5, 0);
    assert!(matches!(
        AbsorptionResults::compute(&empty, &Array1::from(vec![]), &coll0, 10e6),
        Err(RaidError::EmptyProfile)
    ));
}

#[test]
fn appleton_hartree_covers_every_collision_model() {
    let ne = Array1::from_elem(2, 1.0e9);
    let bo = Array1::from_elem(2, 5.0e4);
    let coll = uniform_collisions(1.0e5, 2);
    let results = AbsorptionResults::compute(&ne, &bo, &coll, 10e6).unwrap();
    for model in CollisionModel::ALL {
        let set = results.mode_set(Theory::AppletonHartree, model).unwrap();
        for mode in [Mode::NoField, Mode::O, Mode::X, Mode::R, Mode::L] {
            assert_eq!(set.mode(mode).beta.len(), 2);
        }
    }
}

#[test]
fn sen_wyller_rejects_unevaluated_collision_models() {
    let ne = Array1::from_elem(2, 1.0e9);
    let bo = Array1::from_elem(2, 5.0e4);
    let coll = uniform_collisions(1.0e5, 2);
    let results = AbsorptionResults::compute(&ne, &bo, &coll, 10e6).unwrap();

    for model in [CollisionModel::Sn, CollisionModel::AvCc, CollisionModel::AvMb] {
        assert!(matches!(
            results.profile(Theory::SenWyller, model, Mode::O),
            Err(RaidError::InvalidCombination(Theory::SenWyller, m, Mode::O)) if m == model
        ));
    }
    assert!(results
        .profile(Theory::AppletonHartree, CollisionModel::AvMb, Mode::L)
        .is_ok());
}

#[test]
fn collisional_plasma_absorbs() {
    // a collisional sample must show non-zero ordinary-mode absorption,
    // and more collisions (at fixed everything else) means more absorption
    // in the weakly collisional regime
    let ne = Array1::from_elem(1, 1.0e10);
    let bo = Array1::from_elem(1, 5.0e4);
    let weak = uniform_collisions(1.0e4, 1);
    let strong = uniform_collisions(1.0e5, 1);

    let b_weak = AbsorptionResults::compute(&ne, &bo, &weak, 10e6)
        .unwrap()
        .profile(Theory::AppletonHartree, CollisionModel::Ft, Mode::O)
        .unwrap()
        .beta[0];
    let b_strong = AbsorptionResults::compute(&ne, &bo, &strong, 10e6)
        .unwrap()
        .profile(Theory::AppletonHartree, CollisionModel::Ft, Mode::O)
        .unwrap()
        .beta[0];
    assert!(b_weak > 0.0);
    assert!(b_strong > b_weak);
}
