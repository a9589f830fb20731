//! Route name and route sequence types.

use std::fmt;

use super::{DomainError, StopId};

/// Error returned when parsing an invalid route name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route name: {reason}")]
pub struct InvalidRouteName {
    reason: &'static str,
}

/// A validated route name.
///
/// Route names are non-empty, trimmed display strings ("Route 7",
/// "Airport Express"). Lexical `Ord` is derived; [`RouteName::sort_key`]
/// provides the human ordering used for listing routes.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteName(String);

impl RouteName {
    /// Parse a route name from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidRouteName> {
        if s.is_empty() {
            return Err(InvalidRouteName {
                reason: "must not be empty",
            });
        }
        if s.trim() != s {
            return Err(InvalidRouteName {
                reason: "must not have leading or trailing whitespace",
            });
        }
        Ok(RouteName(s.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key for stable human-meaningful ordering: the non-numeric prefix
    /// compared lexically, then a trailing route number compared numerically,
    /// so "Route 2" sorts before "Route 10".
    pub fn sort_key(&self) -> (&str, Option<u64>) {
        let trimmed = self.0.trim_end_matches(|c: char| c.is_ascii_digit());
        let digits = &self.0[trimmed.len()..];
        (trimmed, digits.parse().ok())
    }
}

impl fmt::Debug for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteName({})", self.0)
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, ordered sequence of stops a bus physically traverses.
///
/// Routes are treated as bidirectional: a segment between two stops is
/// traversable either way, and its length is the along-sequence path length
/// regardless of direction.
///
/// # Invariants
///
/// - At least 2 stops
/// - No stop appears twice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    name: RouteName,
    stops: Vec<StopId>,
}

impl Route {
    /// Constructs a route, validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the route has fewer than 2 stops or contains a
    /// duplicate stop.
    pub fn new(name: RouteName, stops: Vec<StopId>) -> Result<Self, DomainError> {
        if stops.len() < 2 {
            return Err(DomainError::RouteTooShort(name));
        }
        for (i, stop) in stops.iter().enumerate() {
            if stops[..i].contains(stop) {
                return Err(DomainError::DuplicateStopOnRoute(name, stop.clone()));
            }
        }
        Ok(Route { name, stops })
    }

    /// Returns the route name.
    pub fn name(&self) -> &RouteName {
        &self.name
    }

    /// Returns the ordered stop sequence.
    pub fn stops(&self) -> &[StopId] {
        &self.stops
    }

    /// Returns the index of a stop on this route, if present.
    pub fn position(&self, stop: &StopId) -> Option<usize> {
        self.stops.iter().position(|s| s == stop)
    }

    /// Returns true if the route serves the given stop.
    pub fn contains(&self, stop: &StopId) -> bool {
        self.stops.contains(stop)
    }

    /// Returns the stop ids strictly between and including two stops on this
    /// route, in sequence order (lowest index first).
    ///
    /// Returns `None` if either stop is not on the route.
    pub fn segment(&self, a: &StopId, b: &StopId) -> Option<&[StopId]> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
        Some(&self.stops[lo..=hi])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn name(s: &str) -> RouteName {
        RouteName::parse(s).unwrap()
    }

    #[test]
    fn parse_route_name() {
        assert!(RouteName::parse("Route 7").is_ok());
        assert!(RouteName::parse("").is_err());
        assert!(RouteName::parse(" Route 7").is_err());
        assert!(RouteName::parse("Route 7 ").is_err());
    }

    #[test]
    fn sort_key_numeric_suffix() {
        let r2 = name("Route 2");
        let r10 = name("Route 10");
        assert!(r2.sort_key() < r10.sort_key());
        // Plain lexical Ord gets this wrong, which is why sort_key exists.
        assert!(r10 < r2);
    }

    #[test]
    fn sort_key_no_suffix() {
        let express = name("Airport Express");
        assert_eq!(express.sort_key(), ("Airport Express", None));
    }

    #[test]
    fn route_requires_two_stops() {
        let err = Route::new(name("R1"), vec![stop("a")]);
        assert!(matches!(err, Err(DomainError::RouteTooShort(_))));

        let ok = Route::new(name("R1"), vec![stop("a"), stop("b")]);
        assert!(ok.is_ok());
    }

    #[test]
    fn route_rejects_duplicate_stop() {
        let err = Route::new(name("R1"), vec![stop("a"), stop("b"), stop("a")]);
        assert!(matches!(
            err,
            Err(DomainError::DuplicateStopOnRoute(_, _))
        ));
    }

    #[test]
    fn position_and_contains() {
        let route = Route::new(name("R1"), vec![stop("a"), stop("b"), stop("c")]).unwrap();

        assert_eq!(route.position(&stop("a")), Some(0));
        assert_eq!(route.position(&stop("c")), Some(2));
        assert_eq!(route.position(&stop("x")), None);
        assert!(route.contains(&stop("b")));
        assert!(!route.contains(&stop("x")));
    }

    #[test]
    fn segment_is_direction_agnostic() {
        let route =
            Route::new(name("R1"), vec![stop("a"), stop("b"), stop("c"), stop("d")]).unwrap();

        let forward = route.segment(&stop("b"), &stop("d")).unwrap();
        let backward = route.segment(&stop("d"), &stop("b")).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward, &[stop("b"), stop("c"), stop("d")][..]);
    }

    #[test]
    fn segment_missing_stop() {
        let route = Route::new(name("R1"), vec![stop("a"), stop("b")]).unwrap();
        assert!(route.segment(&stop("a"), &stop("x")).is_none());
    }
}
