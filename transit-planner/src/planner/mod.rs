//! Journey planning.
//!
//! This module implements the planning pipeline that answers: "I'm here,
//! I want to be there — which bus do I take, and what will it cost?"
//!
//! Candidate stops come from the spatial index, the path search connects
//! them with at most one transfer, and the assembler costs the chosen path
//! into a [`crate::domain::Journey`].

mod assemble;
mod config;
mod search;

pub use assemble::{JourneyPlanner, NoJourneyReason, PlanError, PlanOutcome};
pub use config::PlannerConfig;
pub use search::{PathPlan, find_path};
