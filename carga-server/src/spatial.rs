//! Great-circle distance utilities.
//!
//! Everything geometric in the crate goes through these two functions:
//! corridor matching, nearest-station queries, and the cross-source
//! station dedup. Haversine on a spherical earth is accurate to well
//! under 1% at in-country distances, which is all this domain needs.

use geo::{Distance, Haversine, Point};

/// Two stations closer than this are treated as the same physical site
/// when merging data sources.
pub const DUPLICATE_THRESHOLD_M: f64 = 80.0;

/// Haversine distance between two points in meters.
pub fn distance_m(a: Point<f64>, b: Point<f64>) -> f64 {
    Haversine.distance(a, b)
}

/// Haversine distance between two points in kilometers.
pub fn distance_km(a: Point<f64>, b: Point<f64>) -> f64 {
    distance_m(a, b) / 1000.0
}

/// Whether two coordinates refer to the same physical site, per the
/// cross-source dedup threshold.
pub fn same_site(a: Point<f64>, b: Point<f64>) -> bool {
    distance_m(a, b) <= DUPLICATE_THRESHOLD_M
}
