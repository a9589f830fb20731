//! Domain error types.
//!
//! These errors represent construction-time invariant violations in the
//! domain layer. They are distinct from load/IO errors.

use super::{RouteName, StopId};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// A route must visit at least two stops
    #[error("route {0} has fewer than 2 stops")]
    RouteTooShort(RouteName),

    /// A stop appears more than once on a route
    #[error("route {0} visits stop {1} more than once")]
    DuplicateStopOnRoute(RouteName, StopId),

    /// A journey must board and alight at different stops
    #[error("journey boards and alights at the same stop {0}")]
    SameBoardingAndAlighting(StopId),

    /// Transfer stop presence must match the number of routes used
    #[error("journey uses {routes} route(s) with transfer stop present = {has_transfer}")]
    TransferRouteMismatch {
        /// Number of routes in the journey.
        routes: usize,
        /// Whether a transfer stop was supplied.
        has_transfer: bool,
    },

    /// A transfer stop cannot coincide with the boarding or alighting stop
    #[error("transfer stop {0} coincides with a journey endpoint")]
    TransferAtEndpoint(StopId),
}
