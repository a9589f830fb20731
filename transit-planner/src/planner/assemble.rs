//! Journey assembly.
//!
//! [`JourneyPlanner`] is the single entry point: it validates coordinates,
//! gathers candidate stops around each endpoint, runs the path search, and
//! costs the chosen path into a [`Journey`]. Planning is a pure function of
//! its inputs plus the immutable network snapshot; "no journey" outcomes are
//! values, never errors or panics.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::cost::{CostEstimate, CostModel, Mode};
use crate::domain::{DomainError, Journey, JourneyCosts};
use crate::geo::{InvalidCoordinate, Point};
use crate::network::TransitNetwork;
use crate::spatial::nearest_stops;

use super::config::PlannerConfig;
use super::search::find_path;

/// Error from a planning request.
///
/// Expected "no journey" outcomes are not errors; see [`NoJourneyReason`].
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// A coordinate was outside valid latitude/longitude bounds
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),

    /// The found path violated a journey invariant; indicates a planner bug
    #[error("journey assembly failed: {0}")]
    Assembly(#[from] DomainError),
}

/// Why no journey could be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoJourneyReason {
    /// No stop lies within the search radius of the origin or destination.
    OutOfServiceArea,
    /// Stops exist near both endpoints, but no direct or one-transfer path
    /// connects any candidate pair.
    NoRouteFound,
}

/// The outcome of a planning request.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// A journey was found.
    Journey(Journey),
    /// No journey exists; the reason distinguishes "nowhere to board" from
    /// "no connecting route", for diagnostics.
    NoJourney(NoJourneyReason),
}

impl PlanOutcome {
    /// Returns the journey, if one was found.
    pub fn journey(&self) -> Option<&Journey> {
        match self {
            PlanOutcome::Journey(journey) => Some(journey),
            PlanOutcome::NoJourney(_) => None,
        }
    }

    /// Consumes the outcome, returning the journey if one was found.
    pub fn into_journey(self) -> Option<Journey> {
        match self {
            PlanOutcome::Journey(journey) => Some(journey),
            PlanOutcome::NoJourney(_) => None,
        }
    }
}

/// The journey planner: spatial lookup, path search, and costing over one
/// network snapshot.
///
/// Holds an `Arc` snapshot, so planning keeps working unchanged across
/// repository reloads and needs no locking.
#[derive(Debug, Clone)]
pub struct JourneyPlanner {
    network: Arc<TransitNetwork>,
    cost: CostModel,
    config: PlannerConfig,
}

impl JourneyPlanner {
    /// Creates a planner over a network snapshot.
    pub fn new(network: Arc<TransitNetwork>, cost: CostModel, config: PlannerConfig) -> Self {
        Self {
            network,
            cost,
            config,
        }
    }

    /// Returns the costing model, for callers costing their own legs.
    pub fn cost_model(&self) -> &CostModel {
        &self.cost
    }

    /// Plans a journey departing now.
    ///
    /// Coordinates are `(latitude, longitude)` in WGS84 decimal degrees.
    pub fn plan_journey(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
    ) -> Result<PlanOutcome, PlanError> {
        self.plan_journey_at(origin, destination, chrono::Local::now().naive_local())
    }

    /// Plans a journey for an explicit departure time.
    ///
    /// Fully deterministic: the same origin, destination, and departure
    /// always produce the same outcome.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidCoordinate`] if either coordinate is out
    /// of bounds. "No journey" outcomes are reported in [`PlanOutcome`],
    /// not as errors.
    pub fn plan_journey_at(
        &self,
        origin: (f64, f64),
        destination: (f64, f64),
        departure: NaiveDateTime,
    ) -> Result<PlanOutcome, PlanError> {
        let origin = Point::new(origin.0, origin.1)?;
        let destination = Point::new(destination.0, destination.1)?;

        let boarding = nearest_stops(
            &self.network,
            origin,
            self.config.max_candidates,
            self.config.max_walk_radius_m,
        );
        let alighting = nearest_stops(
            &self.network,
            destination,
            self.config.max_candidates,
            self.config.max_walk_radius_m,
        );
        debug!(
            boarding = boarding.len(),
            alighting = alighting.len(),
            "gathered candidate stops"
        );

        if boarding.is_empty() || alighting.is_empty() {
            return Ok(PlanOutcome::NoJourney(NoJourneyReason::OutOfServiceArea));
        }

        let Some(plan) = find_path(&self.network, &boarding, &alighting, &self.cost, departure)
        else {
            return Ok(PlanOutcome::NoJourney(NoJourneyReason::NoRouteFound));
        };

        let costs = JourneyCosts {
            walk_to_board_m: plan.walk_to_board_m,
            walk_from_alight_m: plan.walk_from_alight_m,
            walk_to_board_mins: self.cost.estimate_duration(
                plan.walk_to_board_m,
                Mode::Walking,
                departure,
            ),
            walk_from_alight_mins: self.cost.estimate_duration(
                plan.walk_from_alight_m,
                Mode::Walking,
                departure,
            ),
            bus_distance_m: plan.bus_distance_m,
            bus_duration_mins: self.cost.bus_leg_duration(
                plan.bus_distance_m,
                departure,
                plan.transfer.is_some(),
            ),
        };

        let journey = Journey::new(
            plan.boarding,
            plan.alighting,
            plan.transfer,
            plan.routes,
            costs,
        )?;

        Ok(PlanOutcome::Journey(journey))
    }

    /// Costs a last-mile leg of the given straight-line distance with the
    /// advisory mode for that distance.
    pub fn last_mile_estimate(&self, distance_m: f64, departure: NaiveDateTime) -> CostEstimate {
        let mode = self.cost.suggest_mode(distance_m);
        self.cost.estimate(distance_m, mode, departure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{NetworkData, RouteRecord, StopRecord, TransitNetwork};
    use chrono::NaiveDate;

    fn depart() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    /// Builds a consistent network; stop route lists are derived from the
    /// route sequences.
    fn network(stops: &[(&str, f64, f64)], routes: &[(&str, &[&str])]) -> Arc<TransitNetwork> {
        let stop_records = stops
            .iter()
            .map(|(id, lat, lon)| StopRecord {
                id: id.to_string(),
                name: id.to_uppercase(),
                lat: *lat,
                lon: *lon,
                routes: routes
                    .iter()
                    .filter(|(_, seq)| seq.contains(id))
                    .map(|(name, _)| name.to_string())
                    .collect(),
            })
            .collect();
        let route_records = routes
            .iter()
            .map(|(name, seq)| RouteRecord {
                name: name.to_string(),
                stops: seq.iter().map(|s| s.to_string()).collect(),
            })
            .collect();

        Arc::new(
            TransitNetwork::from_data(NetworkData {
                stops: stop_records,
                routes: route_records,
            })
            .unwrap(),
        )
    }

    fn planner(network: Arc<TransitNetwork>) -> JourneyPlanner {
        JourneyPlanner::new(network, CostModel::default(), PlannerConfig::default())
    }

    fn single_route_network() -> Arc<TransitNetwork> {
        network(
            &[("a", 0.0, 0.0), ("b", 0.0, 0.01), ("c", 0.0, 0.02)],
            &[("R1", &["a", "b", "c"])],
        )
    }

    #[test]
    fn direct_journey_on_single_route() {
        let planner = planner(single_route_network());

        let outcome = planner
            .plan_journey_at((0.0, 0.0), (0.0, 0.02), depart())
            .unwrap();

        let journey = outcome.journey().expect("journey expected");
        assert!(journey.is_direct());
        assert_eq!(journey.boarding().as_str(), "a");
        assert_eq!(journey.alighting().as_str(), "c");
        assert_eq!(journey.routes()[0].as_str(), "R1");
        assert!(journey.transfer_stop().is_none());
    }

    #[test]
    fn transfer_journey_via_shared_stop() {
        // R1 = [a, b], R2 = [b, c]; only a transfer at b connects a to c.
        // Stops are ~3.3 km apart so each endpoint sees exactly one
        // candidate within the walk radius.
        let net = network(
            &[("a", 0.0, 0.0), ("b", 0.0, 0.03), ("c", 0.0, 0.06)],
            &[("R1", &["a", "b"]), ("R2", &["b", "c"])],
        );
        let planner = planner(net);

        let outcome = planner
            .plan_journey_at((0.0, 0.0), (0.0, 0.06), depart())
            .unwrap();

        let journey = outcome.journey().expect("journey expected");
        assert!(journey.requires_transfer());
        assert_eq!(journey.transfer_stop().unwrap().as_str(), "b");
        let routes: Vec<&str> = journey.routes().iter().map(|r| r.as_str()).collect();
        assert_eq!(routes, vec!["R1", "R2"]);
    }

    #[test]
    fn far_origin_is_out_of_service_area() {
        let planner = planner(single_route_network());

        // ~50 km north of every stop.
        let outcome = planner
            .plan_journey_at((0.45, 0.0), (0.0, 0.02), depart())
            .unwrap();

        assert_eq!(
            outcome,
            PlanOutcome::NoJourney(NoJourneyReason::OutOfServiceArea)
        );
        assert!(outcome.journey().is_none());
    }

    #[test]
    fn disconnected_routes_give_no_route_found() {
        // Two routes with no shared stop.
        let net = network(
            &[
                ("a", 0.0, 0.0),
                ("b", 0.0, 0.01),
                ("x", 0.1, 0.0),
                ("y", 0.1, 0.01),
            ],
            &[("R1", &["a", "b"]), ("R2", &["x", "y"])],
        );
        let planner = planner(net);

        let outcome = planner
            .plan_journey_at((0.0, 0.0), (0.1, 0.01), depart())
            .unwrap();

        assert_eq!(
            outcome,
            PlanOutcome::NoJourney(NoJourneyReason::NoRouteFound)
        );
    }

    #[test]
    fn invalid_coordinates_rejected_before_search() {
        let planner = planner(single_route_network());

        let result = planner.plan_journey_at((120.0, 0.0), (0.0, 0.02), depart());
        assert!(matches!(result, Err(PlanError::InvalidCoordinate(_))));

        let result = planner.plan_journey_at((0.0, 0.0), (0.0, 200.0), depart());
        assert!(matches!(result, Err(PlanError::InvalidCoordinate(_))));
    }

    #[test]
    fn planning_is_deterministic() {
        let planner = planner(single_route_network());

        let first = planner
            .plan_journey_at((0.0001, 0.0), (0.0, 0.0199), depart())
            .unwrap();
        let second = planner
            .plan_journey_at((0.0001, 0.0), (0.0, 0.0199), depart())
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn journey_totals_add_up() {
        let planner = planner(single_route_network());

        let outcome = planner
            .plan_journey_at((0.0005, 0.0), (0.0005, 0.02), depart())
            .unwrap();
        let journey = outcome.into_journey().expect("journey expected");

        let expected_distance = journey.walk_to_board_m()
            + journey.bus_distance_m()
            + journey.walk_from_alight_m();
        assert!((journey.total_distance_m() - expected_distance).abs() < 1e-9);
        assert!(journey.total_duration_mins() > journey.bus_duration_mins());
    }

    #[test]
    fn peak_departure_slows_the_bus_leg() {
        let planner = planner(single_route_network());
        let origin = (0.0, 0.0);
        let dest = (0.0, 0.02);

        let off_peak = planner
            .plan_journey_at(origin, dest, depart())
            .unwrap()
            .into_journey()
            .unwrap();
        let peak_time = NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let peak = planner
            .plan_journey_at(origin, dest, peak_time)
            .unwrap()
            .into_journey()
            .unwrap();

        assert!(peak.bus_duration_mins() > off_peak.bus_duration_mins());
        assert_eq!(peak.bus_distance_m(), off_peak.bus_distance_m());
    }

    #[test]
    fn empty_network_is_out_of_service_area() {
        let planner = planner(Arc::new(TransitNetwork::empty()));

        let outcome = planner
            .plan_journey_at((0.0, 0.0), (0.0, 0.02), depart())
            .unwrap();
        assert_eq!(
            outcome,
            PlanOutcome::NoJourney(NoJourneyReason::OutOfServiceArea)
        );
    }

    #[test]
    fn last_mile_estimate_uses_suggested_mode() {
        let planner = planner(single_route_network());

        let walk = planner.last_mile_estimate(300.0, depart());
        assert_eq!(walk.mode, Mode::Walking);
        assert!(walk.fare.is_none());

        let rickshaw = planner.last_mile_estimate(1_500.0, depart());
        assert_eq!(rickshaw.mode, Mode::Rickshaw);
        assert!(rickshaw.fare.is_some());
    }
}
