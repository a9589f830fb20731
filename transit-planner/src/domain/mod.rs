//! Domain types for the bus journey planner.
//!
//! This module contains the core domain model types that represent validated
//! network and planning data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod error;
mod journey;
mod route;
mod stop;

pub use error::DomainError;
pub use journey::{Journey, JourneyCosts};
pub use route::{InvalidRouteName, Route, RouteName};
pub use stop::{InvalidStopId, Stop, StopId};
