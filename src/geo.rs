//! Great-circle geometry along a ray's ground track.

use ndarray::Array1;

use crate::constants::R_EARTH;

/// Latitude/longitude samples along a fixed bearing.
///
/// For an origin in decimal degrees, a forward bearing in degrees clockwise
/// from north and per-sample ground ranges in km, compute the geographic
/// coordinates of every sample on the spherical Earth. This is what turns
/// ray-tracer ground ranges into model-query coordinates.
pub fn latlon_along_bearing(
    origin_lat: f64,
    origin_lon: f64,
    bearing: f64,
    ground_range_km: &Array1<f64>,
) -> (Array1<f64>, Array1<f64>) {
    let phi1 = origin_lat.to_radians();
    let lambda1 = origin_lon.to_radians();
    let theta = bearing.to_radians();

    let mut lats = Array1::zeros(ground_range_km.len());
    let mut lons = Array1::zeros(ground_range_km.len());
    for (i, d) in ground_range_km.iter().enumerate() {
        let delta = d * 1e3 / R_EARTH;
        let phi2 =
            (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).asin();
        let lambda2 = lambda1
            + (theta.sin() * delta.sin() * phi1.cos())
                .atan2(delta.cos() - phi1.sin() * phi2.sin());
        lats[i] = phi2.to_degrees();
        // wrap to [-180, 180)
        lons[i] = (lambda2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
    }
    (lats, lons)
}
