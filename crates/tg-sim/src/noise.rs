//! GPS receiver noise.

use std::f64::consts::TAU;

use tg_core::SimRng;

use crate::TrajectoryPoint;

/// Metres per degree of latitude (and of longitude at the equator).
const METRES_PER_DEGREE: f64 = 111_111.0;

/// Copy of `points` with each fix displaced by up to `radius_m` metres.
///
/// The bearing is uniform in `[0, 2π)` and the distance uniform in
/// `[0, radius_m]`.  Timestamps and phases are kept.
pub fn add_gps_noise(points: &[TrajectoryPoint], radius_m: f64, rng: &mut SimRng) -> Vec<TrajectoryPoint> {
    let radius_m = radius_m.max(0.0);
    points
        .iter()
        .map(|p| {
            let bearing: f64 = rng.gen_range(0.0..TAU);
            let offset: f64 = rng.gen_range(0.0..=radius_m);
            let per_deg_lon = METRES_PER_DEGREE * p.pos.lat.to_radians().cos();
            let d_lat = offset / METRES_PER_DEGREE * bearing.cos();
            let d_lon = offset / per_deg_lon * bearing.sin();
            TrajectoryPoint { pos: p.pos.offset_deg(d_lat, d_lon), ..*p }
        })
        .collect()
}
