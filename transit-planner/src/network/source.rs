//! Network data sources.
//!
//! The repository is decoupled from any particular storage: a
//! [`NetworkSource`] yields raw [`NetworkData`] records, and the repository
//! validates and indexes them. The JSON format round-trips every field of
//! the in-memory model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Error from loading a network description.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source was readable but structurally invalid
    #[error("malformed network data: {0}")]
    Malformed(String),

    /// The source could not be read
    #[error("failed to read network source: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Malformed(e.to_string())
    }
}

/// Raw stop record as it appears in the network description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    /// Unique stop id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Latitude, WGS84 decimal degrees.
    pub lat: f64,
    /// Longitude, WGS84 decimal degrees.
    pub lon: f64,
    /// Names of the routes serving this stop.
    pub routes: Vec<String>,
}

/// Raw route record as it appears in the network description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    /// Unique route name.
    pub name: String,
    /// Ordered stop ids along the physical path.
    pub stops: Vec<String>,
}

/// The complete raw network description, before validation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkData {
    /// All stops.
    pub stops: Vec<StopRecord>,
    /// All routes.
    pub routes: Vec<RouteRecord>,
}

/// A source of network data.
///
/// This abstraction lets the repository load from a file in production and
/// from an in-memory string in tests, with identical validation.
pub trait NetworkSource {
    /// Load the raw network description.
    fn load(&self) -> Result<NetworkData, LoadError>;
}

/// Loads network data from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a source reading the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl NetworkSource for JsonFileSource {
    fn load(&self) -> Result<NetworkData, LoadError> {
        let text = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Loads network data from an in-memory JSON string.
///
/// Useful for tests and for data bundled into the binary.
#[derive(Debug, Clone)]
pub struct JsonStringSource {
    json: String,
}

impl JsonStringSource {
    /// Creates a source parsing the given JSON text.
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

impl NetworkSource for JsonStringSource {
    fn load(&self) -> Result<NetworkData, LoadError> {
        Ok(serde_json::from_str(&self.json)?)
    }
}
