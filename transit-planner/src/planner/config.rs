//! Planner configuration.

/// Configuration parameters for journey planning.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Maximum number of candidate stops considered around each endpoint.
    pub max_candidates: usize,

    /// Maximum search radius around each endpoint, metres.
    /// Beyond this the endpoint is out of the service area.
    pub max_walk_radius_m: f64,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_candidates: usize, max_walk_radius_m: f64) -> Self {
        Self {
            max_candidates,
            max_walk_radius_m,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_candidates: 5,
            max_walk_radius_m: 3_000.0,
        }
    }
}
