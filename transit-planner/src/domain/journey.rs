//! Journey result type.
//!
//! A `Journey` is the immutable result of one planning request: board here,
//! ride these routes (changing at most once), alight there, with distance and
//! duration figures for every leg. It refers to stops and routes by id and
//! owns no other resources.

use super::{DomainError, RouteName, StopId};

/// Distance and duration figures for the legs of a journey.
///
/// Walking distances are straight-line (Haversine); the bus distance is the
/// along-route path length. Durations come from the costing model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JourneyCosts {
    /// Walk from the origin to the boarding stop, metres.
    pub walk_to_board_m: f64,
    /// Walk from the alighting stop to the destination, metres.
    pub walk_from_alight_m: f64,
    /// Walk duration for the access leg, minutes.
    pub walk_to_board_mins: f64,
    /// Walk duration for the egress leg, minutes.
    pub walk_from_alight_mins: f64,
    /// Aggregate bus-leg distance, metres.
    pub bus_distance_m: f64,
    /// Aggregate bus-leg duration (including any interchange wait), minutes.
    pub bus_duration_mins: f64,
}

/// A complete journey from origin to destination.
///
/// # Invariants
///
/// - Boarding and alighting stops differ
/// - A transfer stop is present iff exactly two routes are used, and it
///   differs from both endpoints
/// - Without a transfer, exactly one route is used
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    boarding: StopId,
    alighting: StopId,
    transfer: Option<StopId>,
    routes: Vec<RouteName>,
    costs: JourneyCosts,
}

impl Journey {
    /// Constructs a journey, validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns `Err` if boarding equals alighting, if the number of routes
    /// does not match the presence of a transfer stop, or if the transfer
    /// stop coincides with an endpoint.
    pub fn new(
        boarding: StopId,
        alighting: StopId,
        transfer: Option<StopId>,
        routes: Vec<RouteName>,
        costs: JourneyCosts,
    ) -> Result<Self, DomainError> {
        if boarding == alighting {
            return Err(DomainError::SameBoardingAndAlighting(boarding));
        }

        let expected_routes = if transfer.is_some() { 2 } else { 1 };
        if routes.len() != expected_routes {
            return Err(DomainError::TransferRouteMismatch {
                routes: routes.len(),
                has_transfer: transfer.is_some(),
            });
        }

        if let Some(t) = &transfer {
            if *t == boarding || *t == alighting {
                return Err(DomainError::TransferAtEndpoint(t.clone()));
            }
        }

        Ok(Journey {
            boarding,
            alighting,
            transfer,
            routes,
            costs,
        })
    }

    /// Returns the boarding stop id.
    pub fn boarding(&self) -> &StopId {
        &self.boarding
    }

    /// Returns the alighting stop id.
    pub fn alighting(&self) -> &StopId {
        &self.alighting
    }

    /// Returns the transfer stop id, if the journey changes routes.
    pub fn transfer_stop(&self) -> Option<&StopId> {
        self.transfer.as_ref()
    }

    /// Returns the routes used, in travel order (length 1 or 2).
    pub fn routes(&self) -> &[RouteName] {
        &self.routes
    }

    /// Returns true if the journey switches between two routes.
    pub fn requires_transfer(&self) -> bool {
        self.transfer.is_some()
    }

    /// Returns true if the journey uses a single route.
    pub fn is_direct(&self) -> bool {
        !self.requires_transfer()
    }

    /// Walk distance from the origin to the boarding stop, metres.
    pub fn walk_to_board_m(&self) -> f64 {
        self.costs.walk_to_board_m
    }

    /// Walk distance from the alighting stop to the destination, metres.
    pub fn walk_from_alight_m(&self) -> f64 {
        self.costs.walk_from_alight_m
    }

    /// Aggregate bus-leg distance, metres.
    pub fn bus_distance_m(&self) -> f64 {
        self.costs.bus_distance_m
    }

    /// Aggregate bus-leg duration, minutes.
    pub fn bus_duration_mins(&self) -> f64 {
        self.costs.bus_duration_mins
    }

    /// Total distance across all legs, metres.
    pub fn total_distance_m(&self) -> f64 {
        self.costs.walk_to_board_m + self.costs.bus_distance_m + self.costs.walk_from_alight_m
    }

    /// Total duration across all legs, minutes.
    pub fn total_duration_mins(&self) -> f64 {
        self.costs.walk_to_board_mins
            + self.costs.bus_duration_mins
            + self.costs.walk_from_alight_mins
    }
}
