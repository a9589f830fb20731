//! Transit network repository.
//!
//! [`TransitNetwork`] is an immutable, fully validated snapshot of the stop
//! and route collections. [`NetworkRepository`] owns the current snapshot and
//! installs replacements atomically: a failed load leaves the previous
//! network untouched, and concurrent planners never observe a half-populated
//! network.

mod source;

pub use source::{
    JsonFileSource, JsonStringSource, LoadError, NetworkData, NetworkSource, RouteRecord,
    StopRecord,
};

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::info;

use crate::domain::{Route, RouteName, Stop, StopId};
use crate::geo::Point;

/// An immutable, validated snapshot of the stop and route collections.
#[derive(Debug, Default)]
pub struct TransitNetwork {
    stops: HashMap<StopId, Stop>,
    routes: HashMap<RouteName, Route>,
    /// Route names in stable human order (prefix lexical, trailing number
    /// numeric).
    route_names: Vec<RouteName>,
}

impl TransitNetwork {
    /// An empty network. Planning against it yields "out of service area".
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validates raw records and builds a network snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Malformed`] for any structural problem: invalid
    /// or duplicate ids, out-of-range coordinates, a route with fewer than
    /// two stops or a repeated stop, or a dangling reference in either
    /// direction (route → unknown stop, stop → unknown route).
    pub fn from_data(data: NetworkData) -> Result<Self, LoadError> {
        let mut stops = HashMap::with_capacity(data.stops.len());
        for record in data.stops {
            let id = StopId::parse(&record.id)
                .map_err(|e| LoadError::Malformed(format!("stop {:?}: {e}", record.id)))?;
            let location = Point::new(record.lat, record.lon)
                .map_err(|e| LoadError::Malformed(format!("stop {id}: {e}")))?;
            let routes = record
                .routes
                .iter()
                .map(|name| {
                    RouteName::parse(name)
                        .map_err(|e| LoadError::Malformed(format!("stop {id}: {e}")))
                })
                .collect::<Result<Vec<_>, _>>()?;

            let stop = Stop {
                id: id.clone(),
                name: record.name,
                location,
                routes,
            };
            if stops.insert(id.clone(), stop).is_some() {
                return Err(LoadError::Malformed(format!("duplicate stop id {id}")));
            }
        }

        let mut routes = HashMap::with_capacity(data.routes.len());
        for record in data.routes {
            let name = RouteName::parse(&record.name)
                .map_err(|e| LoadError::Malformed(format!("route {:?}: {e}", record.name)))?;
            let stop_ids = record
                .stops
                .iter()
                .map(|id| {
                    StopId::parse(id)
                        .map_err(|e| LoadError::Malformed(format!("route {name}: {e}")))
                })
                .collect::<Result<Vec<_>, _>>()?;

            for stop_id in &stop_ids {
                if !stops.contains_key(stop_id) {
                    return Err(LoadError::Malformed(format!(
                        "route {name} references unknown stop {stop_id}"
                    )));
                }
            }

            let route = Route::new(name.clone(), stop_ids)
                .map_err(|e| LoadError::Malformed(e.to_string()))?;
            if routes.insert(name.clone(), route).is_some() {
                return Err(LoadError::Malformed(format!("duplicate route name {name}")));
            }
        }

        // Membership must agree in both directions: the search trusts a
        // stop's route list when generating candidates.
        for stop in stops.values() {
            for route_name in &stop.routes {
                match routes.get(route_name) {
                    None => {
                        return Err(LoadError::Malformed(format!(
                            "stop {} references unknown route {route_name}",
                            stop.id
                        )));
                    }
                    Some(route) if !route.contains(&stop.id) => {
                        return Err(LoadError::Malformed(format!(
                            "stop {} lists route {route_name}, which does not serve it",
                            stop.id
                        )));
                    }
                    Some(_) => {}
                }
            }
        }
        for route in routes.values() {
            for stop_id in route.stops() {
                let stop = &stops[stop_id];
                if !stop.routes.contains(route.name()) {
                    return Err(LoadError::Malformed(format!(
                        "route {} serves stop {stop_id}, which does not list it",
                        route.name()
                    )));
                }
            }
        }

        let mut route_names: Vec<RouteName> = routes.keys().cloned().collect();
        route_names.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()).then_with(|| a.cmp(b)));

        Ok(TransitNetwork {
            stops,
            routes,
            route_names,
        })
    }

    /// Returns the stop with the given id, if known.
    pub fn stop(&self, id: &StopId) -> Option<&Stop> {
        self.stops.get(id)
    }

    /// Iterates over all stops in no particular order.
    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.values()
    }

    /// Returns the number of stops.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Returns the route with the given name, if known.
    pub fn route(&self, name: &RouteName) -> Option<&Route> {
        self.routes.get(name)
    }

    /// Iterates over all routes in no particular order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    /// Returns all route names in stable human order.
    pub fn route_names(&self) -> &[RouteName] {
        &self.route_names
    }

    /// Returns the number of routes.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Along-route path length between two stops on a route, in metres:
    /// the sum of consecutive stop-to-stop Haversine distances between the
    /// two stop indices, regardless of which stop comes first.
    ///
    /// Returns `None` if the route is unknown or either stop is not on it.
    pub fn segment_distance_m(
        &self,
        route: &RouteName,
        a: &StopId,
        b: &StopId,
    ) -> Option<f64> {
        let route = self.routes.get(route)?;
        let segment = route.segment(a, b)?;
        let mut total = 0.0;
        for pair in segment.windows(2) {
            // Stops on a validated route always resolve.
            let from = self.stops.get(&pair[0])?;
            let to = self.stops.get(&pair[1])?;
            total += from.location.distance_m(to.location);
        }
        Some(total)
    }
}

/// Thread-safe owner of the current network snapshot.
///
/// Loading builds the whole snapshot first and installs it in one swap, so
/// readers see either the previous network or the new one in full. On load
/// failure the existing snapshot is preserved and the error is returned.
#[derive(Debug)]
pub struct NetworkRepository {
    inner: RwLock<Arc<TransitNetwork>>,
}

impl NetworkRepository {
    /// Creates a repository holding an empty network.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Arc::new(TransitNetwork::empty())),
        }
    }

    /// Loads (or reloads) the network from a source, installing the new
    /// snapshot atomically on success.
    ///
    /// Returns the number of stops loaded.
    pub fn load(&self, source: &dyn NetworkSource) -> Result<usize, LoadError> {
        let data = source.load()?;
        let network = TransitNetwork::from_data(data)?;
        let count = network.stop_count();
        info!(
            stops = count,
            routes = network.route_count(),
            "installed transit network"
        );

        let mut guard = self.inner.write().expect("network lock poisoned");
        *guard = Arc::new(network);

        Ok(count)
    }

    /// Returns the current snapshot.
    ///
    /// The returned `Arc` stays valid across reloads; planning over it is
    /// lock-free.
    pub fn snapshot(&self) -> Arc<TransitNetwork> {
        self.inner.read().expect("network lock poisoned").clone()
    }
}

impl Default for NetworkRepository {
    fn default() -> Self {
        Self::new()
    }
}
