//! Stop identity and record types.

use std::fmt;

use crate::geo::Point;

use super::RouteName;

/// Error returned when parsing an invalid stop id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// A validated stop identifier.
///
/// Stop ids are short, non-empty tokens with no whitespace. This type
/// guarantees that any `StopId` value is valid by construction.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::StopId;
///
/// let id = StopId::parse("farmgate").unwrap();
/// assert_eq!(id.as_str(), "farmgate");
///
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse("has space").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(String);

impl StopId {
    /// Maximum accepted id length; ids are keys, not display text.
    const MAX_LEN: usize = 64;

    /// Parse a stop id from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        if s.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }
        if s.len() > Self::MAX_LEN {
            return Err(InvalidStopId {
                reason: "must be at most 64 bytes",
            });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(InvalidStopId {
                reason: "must not contain whitespace",
            });
        }
        Ok(StopId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fixed boarding location on the bus network.
///
/// Stops are owned by the network; routes and journeys refer to them by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Unique identifier.
    pub id: StopId,
    /// Human-readable display name.
    pub name: String,
    /// Physical location.
    pub location: Point,
    /// Names of the routes serving this stop, in load order.
    pub routes: Vec<RouteName>,
}
