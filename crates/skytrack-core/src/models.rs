//! Core data models for single-aircraft tracking.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

/// Fixed origin for the polar projection.
///
/// Validated once at startup and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferencePoint(GeoPoint);

impl ReferencePoint {
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::Latitude(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::Longitude(lon));
        }
        Ok(Self(GeoPoint::new(lat, lon)))
    }

    pub fn point(&self) -> GeoPoint {
        self.0
    }

    pub fn lat(&self) -> f64 {
        self.0.lat
    }

    pub fn lon(&self) -> f64 {
        self.0.lon
    }
}

/// Snapshot of one aircraft as reported by the state provider.
///
/// Produced fresh on every poll and dropped after the cycle. Every field
/// except the identifier may be missing in upstream data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftState {
    /// ICAO 24-bit transponder address, lowercase hex.
    pub icao24: String,
    #[serde(default)]
    pub callsign: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Geometric altitude in meters
    #[serde(default)]
    pub geo_altitude: Option<f64>,
    /// Ground speed in m/s
    #[serde(default)]
    pub velocity: Option<f64>,
    #[serde(default)]
    pub on_ground: bool,
}

impl AircraftState {
    /// Reported position, if both coordinates are present.
    pub fn position(&self) -> Option<GeoPoint> {
        Some(GeoPoint::new(self.latitude?, self.longitude?))
    }
}

/// Position of the aircraft relative to the reference point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarSample {
    /// Initial bearing in degrees, clockwise from north, in [0, 360).
    pub angle: f64,
    /// Great-circle distance in kilometers.
    pub amplitude: f64,
}
