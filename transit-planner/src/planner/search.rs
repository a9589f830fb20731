//! Path search over the route network.
//!
//! Given candidate boarding stops (near the origin) and candidate alighting
//! stops (near the destination), finds the best way to connect one to the
//! other: a single route if any exists, otherwise exactly one transfer
//! between two routes sharing a stop. The transfer pass is a fallback for
//! "no direct route exists", never an independently optimized alternative.

use chrono::NaiveDateTime;
use tracing::{debug, trace};

use crate::cost::CostModel;
use crate::domain::{RouteName, StopId};
use crate::network::TransitNetwork;
use crate::spatial::NearbyStop;

/// The chosen way to connect a boarding stop to an alighting stop.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPlan {
    /// Where to board.
    pub boarding: StopId,
    /// Where to alight.
    pub alighting: StopId,
    /// The interchange stop, present iff two routes are used.
    pub transfer: Option<StopId>,
    /// Routes used in travel order (length 1 or 2).
    pub routes: Vec<RouteName>,
    /// Walk from the origin to the boarding stop, metres.
    pub walk_to_board_m: f64,
    /// Walk from the alighting stop to the destination, metres.
    pub walk_from_alight_m: f64,
    /// Along-route bus distance, metres.
    pub bus_distance_m: f64,
}

impl PathPlan {
    /// Total ground distance: walk + ride + walk, metres.
    pub fn ground_distance_m(&self) -> f64 {
        self.walk_to_board_m + self.bus_distance_m + self.walk_from_alight_m
    }

    /// Number of transfers (0 or 1).
    pub fn transfer_count(&self) -> usize {
        usize::from(self.transfer.is_some())
    }
}

/// Finds the best path connecting any boarding candidate to any alighting
/// candidate, or `None` when no route (direct or one-transfer) connects
/// any pair.
///
/// Direct paths always win over transfer paths; the costing model is
/// consulted only to break distance ties deterministically.
pub fn find_path(
    network: &TransitNetwork,
    boarding: &[NearbyStop],
    alighting: &[NearbyStop],
    cost: &CostModel,
    departure: NaiveDateTime,
) -> Option<PathPlan> {
    let direct = direct_candidates(network, boarding, alighting);
    debug!(candidates = direct.len(), "direct search complete");
    if !direct.is_empty() {
        return select_best(direct, cost, departure);
    }

    let transfers = transfer_candidates(network, boarding, alighting);
    debug!(candidates = transfers.len(), "transfer search complete");
    select_best(transfers, cost, departure)
}

/// Every (boarding, alighting, route) triple where a single route serves
/// both stops. Pairs where boarding and alighting coincide are rejected:
/// a journey must board and alight at different stops.
fn direct_candidates(
    network: &TransitNetwork,
    boarding: &[NearbyStop],
    alighting: &[NearbyStop],
) -> Vec<PathPlan> {
    let mut candidates = Vec::new();

    for board in boarding {
        let Some(board_stop) = network.stop(&board.id) else {
            continue;
        };
        for alight in alighting {
            if board.id == alight.id {
                continue;
            }
            for route_name in &board_stop.routes {
                let Some(bus_distance_m) =
                    network.segment_distance_m(route_name, &board.id, &alight.id)
                else {
                    continue;
                };
                trace!(route = %route_name, board = %board.id, alight = %alight.id, "direct candidate");
                candidates.push(PathPlan {
                    boarding: board.id.clone(),
                    alighting: alight.id.clone(),
                    transfer: None,
                    routes: vec![route_name.clone()],
                    walk_to_board_m: board.distance_m,
                    walk_from_alight_m: alight.distance_m,
                    bus_distance_m,
                });
            }
        }
    }

    candidates
}

/// Every (boarding, alighting, route pair) combination where the first
/// route serves the boarding stop, the second serves the alighting stop,
/// and the two share at least one stop usable as the interchange. For each
/// combination the shared stop minimizing total bus distance is chosen.
fn transfer_candidates(
    network: &TransitNetwork,
    boarding: &[NearbyStop],
    alighting: &[NearbyStop],
) -> Vec<PathPlan> {
    let mut candidates = Vec::new();

    for board in boarding {
        let Some(board_stop) = network.stop(&board.id) else {
            continue;
        };
        for alight in alighting {
            if board.id == alight.id {
                continue;
            }
            let Some(alight_stop) = network.stop(&alight.id) else {
                continue;
            };

            for first in &board_stop.routes {
                for second in &alight_stop.routes {
                    // Same route is a direct trip, covered by the direct pass.
                    if first == second {
                        continue;
                    }
                    if let Some(plan) =
                        best_interchange(network, board, alight, first, second)
                    {
                        trace!(
                            first = %first,
                            second = %second,
                            transfer = %plan.transfer.as_ref().map(|s| s.as_str()).unwrap_or(""),
                            "transfer candidate"
                        );
                        candidates.push(plan);
                    }
                }
            }
        }
    }

    candidates
}

/// Picks the shared stop of two routes that minimizes the combined bus
/// distance, excluding the endpoints themselves (an interchange at an
/// endpoint degenerates into a single-route trip).
fn best_interchange(
    network: &TransitNetwork,
    board: &NearbyStop,
    alight: &NearbyStop,
    first: &RouteName,
    second: &RouteName,
) -> Option<PathPlan> {
    let first_route = network.route(first)?;
    let second_route = network.route(second)?;

    let mut best: Option<(StopId, f64)> = None;
    for shared in first_route.stops() {
        if !second_route.contains(shared) {
            continue;
        }
        if *shared == board.id || *shared == alight.id {
            continue;
        }
        let leg1 = network.segment_distance_m(first, &board.id, shared)?;
        let leg2 = network.segment_distance_m(second, shared, &alight.id)?;
        let total = leg1 + leg2;

        let better = match &best {
            None => true,
            Some((best_stop, best_total)) => {
                total < *best_total || (total == *best_total && shared < best_stop)
            }
        };
        if better {
            best = Some((shared.clone(), total));
        }
    }

    let (transfer, bus_distance_m) = best?;
    Some(PathPlan {
        boarding: board.id.clone(),
        alighting: alight.id.clone(),
        transfer: Some(transfer),
        routes: vec![first.clone(), second.clone()],
        walk_to_board_m: board.distance_m,
        walk_from_alight_m: alight.distance_m,
        bus_distance_m,
    })
}

/// Selects the candidate minimizing total ground distance. Ties break by
/// estimated total duration, then fewer transfers, then lexical route
/// names, keeping output reproducible.
fn select_best(
    candidates: Vec<PathPlan>,
    cost: &CostModel,
    departure: NaiveDateTime,
) -> Option<PathPlan> {
    candidates.into_iter().min_by(|a, b| {
        let dist_cmp = a.ground_distance_m().total_cmp(&b.ground_distance_m());
        if dist_cmp != std::cmp::Ordering::Equal {
            return dist_cmp;
        }

        let dur_cmp = plan_duration(a, cost, departure).total_cmp(&plan_duration(b, cost, departure));
        if dur_cmp != std::cmp::Ordering::Equal {
            return dur_cmp;
        }

        let transfer_cmp = a.transfer_count().cmp(&b.transfer_count());
        if transfer_cmp != std::cmp::Ordering::Equal {
            return transfer_cmp;
        }

        a.routes.cmp(&b.routes)
    })
}

/// Estimated door-to-door duration of a candidate, for tie-breaking.
fn plan_duration(plan: &PathPlan, cost: &CostModel, departure: NaiveDateTime) -> f64 {
    use crate::cost::Mode;

    cost.estimate_duration(plan.walk_to_board_m, Mode::Walking, departure)
        + cost.bus_leg_duration(plan.bus_distance_m, departure, plan.transfer.is_some())
        + cost.estimate_duration(plan.walk_from_alight_m, Mode::Walking, departure)
}
