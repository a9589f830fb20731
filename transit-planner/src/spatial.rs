//! Nearest-stop lookup.
//!
//! Answers "which stops are physically closest to this point". The network
//! is hundreds of stops, so a linear Haversine scan is the right tool; the
//! contract (ordering, metric, radius semantics) would be unchanged by a
//! grid or k-d tree.

use crate::domain::StopId;
use crate::geo::Point;
use crate::network::TransitNetwork;

/// A stop within range of a query point.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyStop {
    /// The stop id.
    pub id: StopId,
    /// Great-circle distance from the query point, metres.
    pub distance_m: f64,
}

/// Returns up to `k` stops within `max_radius_m` of `point`, ascending by
/// great-circle distance, ties broken by stop id.
///
/// An empty result is the normal "no nearby service" outcome, not an error.
pub fn nearest_stops(
    network: &TransitNetwork,
    point: Point,
    k: usize,
    max_radius_m: f64,
) -> Vec<NearbyStop> {
    let mut within: Vec<NearbyStop> = network
        .stops()
        .map(|stop| NearbyStop {
            id: stop.id.clone(),
            distance_m: point.distance_m(stop.location),
        })
        .filter(|nearby| nearby.distance_m <= max_radius_m)
        .collect();

    within.sort_by(|a, b| {
        a.distance_m
            .total_cmp(&b.distance_m)
            .then_with(|| a.id.cmp(&b.id))
    });
    within.truncate(k);
    within
}
