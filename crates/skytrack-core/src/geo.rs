//! Great-circle math for polar projection around a reference point.

use crate::models::{GeoPoint, PolarSample, ReferencePoint};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate great-circle distance between two points using the haversine formula.
///
/// # Arguments
/// * `from`, `to` - Coordinates in decimal degrees
///
/// # Returns
/// Distance in kilometers, never negative. Coincident points give 0.
pub fn distance_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let dphi = (to.lat - from.lat).to_radians();
    let dlambda = (to.lon - from.lon).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for near-antipodal points.
    let a = a.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Calculate initial bearing (forward azimuth) from `from` to `to`.
/// Returns degrees clockwise from north in [0, 360); 0 for coincident points.
///
/// Not symmetric: `initial_bearing_deg(a, b)` is generally not the reverse
/// of `initial_bearing_deg(b, a)`.
pub fn initial_bearing_deg(from: GeoPoint, to: GeoPoint) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let delta_lambda = (to.lon - from.lon).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    // atan2 is in [-180, 180], so the shifted value is in [180, 540] and
    // the remainder cannot round up to 360.
    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Project a position onto polar coordinates around `reference`.
pub fn polar_sample(reference: &ReferencePoint, position: GeoPoint) -> PolarSample {
    let origin = reference.point();
    PolarSample {
        angle: initial_bearing_deg(origin, position),
        amplitude: distance_km(origin, position),
    }
}
