//! Bus journey planner.
//!
//! Given a rider's coordinates and a destination, picks the best way across
//! a fixed network of bus routes — direct where possible, one transfer where
//! necessary — and costs every leg of the trip (walking, rickshaw,
//! motorbike-taxi, bus).

pub mod cost;
pub mod domain;
pub mod geo;
pub mod network;
pub mod planner;
pub mod spatial;
