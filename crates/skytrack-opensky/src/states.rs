//! Decoding of the `/states/all` payload.
//!
//! OpenSky encodes every state vector as a positional JSON array rather
//! than an object, and any field except the ICAO24 address may be null.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use skytrack_core::AircraftState;

/// Indices into a state vector row.
mod idx {
    pub const ICAO24: usize = 0;
    pub const CALLSIGN: usize = 1;
    pub const ORIGIN_COUNTRY: usize = 2;
    pub const TIME_POSITION: usize = 3;
    pub const LAST_CONTACT: usize = 4;
    pub const LONGITUDE: usize = 5;
    pub const LATITUDE: usize = 6;
    pub const BARO_ALTITUDE: usize = 7;
    pub const ON_GROUND: usize = 8;
    pub const VELOCITY: usize = 9;
    pub const TRUE_TRACK: usize = 10;
    pub const VERTICAL_RATE: usize = 11;
    pub const SENSORS: usize = 12;
    pub const GEO_ALTITUDE: usize = 13;
    pub const SQUAWK: usize = 14;
    pub const SPI: usize = 15;
    pub const POSITION_SOURCE: usize = 16;
}

/// One aircraft as reported by OpenSky.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateVector {
    pub icao24: String,
    pub callsign: Option<String>,
    pub origin_country: Option<String>,
    /// Unix seconds of the last position update
    pub time_position: Option<i64>,
    /// Unix seconds of the last message of any kind
    pub last_contact: Option<i64>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub baro_altitude: Option<f64>,
    pub on_ground: bool,
    pub velocity: Option<f64>,
    pub true_track: Option<f64>,
    pub vertical_rate: Option<f64>,
    pub sensors: Option<Vec<i64>>,
    pub geo_altitude: Option<f64>,
    pub squawk: Option<String>,
    pub spi: bool,
    pub position_source: Option<i64>,
}

impl StateVector {
    /// Decode a positional row. Returns `None` for rows without an ICAO24 address.
    pub fn from_row(row: &[Value]) -> Option<Self> {
        let icao24 = string_at(row, idx::ICAO24)?;
        if icao24.is_empty() {
            return None;
        }

        Some(Self {
            icao24,
            callsign: string_at(row, idx::CALLSIGN).filter(|s| !s.is_empty()),
            origin_country: string_at(row, idx::ORIGIN_COUNTRY),
            time_position: int_at(row, idx::TIME_POSITION),
            last_contact: int_at(row, idx::LAST_CONTACT),
            longitude: float_at(row, idx::LONGITUDE),
            latitude: float_at(row, idx::LATITUDE),
            baro_altitude: float_at(row, idx::BARO_ALTITUDE),
            on_ground: bool_at(row, idx::ON_GROUND),
            velocity: float_at(row, idx::VELOCITY),
            true_track: float_at(row, idx::TRUE_TRACK),
            vertical_rate: float_at(row, idx::VERTICAL_RATE),
            sensors: row
                .get(idx::SENSORS)
                .and_then(|v| v.as_array())
                .map(|ids| ids.iter().filter_map(|id| id.as_i64()).collect()),
            geo_altitude: float_at(row, idx::GEO_ALTITUDE),
            squawk: string_at(row, idx::SQUAWK),
            spi: bool_at(row, idx::SPI),
            position_source: int_at(row, idx::POSITION_SOURCE),
        })
    }
}

impl From<StateVector> for AircraftState {
    fn from(state: StateVector) -> Self {
        Self {
            icao24: state.icao24,
            callsign: state.callsign,
            latitude: state.latitude,
            longitude: state.longitude,
            geo_altitude: state.geo_altitude,
            velocity: state.velocity,
            on_ground: state.on_ground,
        }
    }
}

/// All state vectors from one `/states/all` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateSnapshot {
    /// Unix seconds the snapshot is valid for
    pub time: i64,
    pub states: Vec<StateVector>,
}

impl StateSnapshot {
    /// Decode a response body. A `null` state list is an empty snapshot;
    /// malformed rows are skipped.
    pub fn from_json(payload: &Value) -> Result<Self> {
        let object = payload
            .as_object()
            .context("OpenSky states payload is not a JSON object")?;

        let time = object.get("time").and_then(|v| v.as_i64()).unwrap_or(0);

        let states = match object.get("states") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(rows)) => rows
                .iter()
                .filter_map(|row| row.as_array())
                .filter_map(|row| StateVector::from_row(row))
                .collect(),
            Some(other) => {
                return Err(anyhow::anyhow!(
                    "OpenSky states field has unexpected type: {}",
                    other
                ))
            }
        };

        Ok(Self { time, states })
    }

    pub fn into_aircraft_states(self) -> Vec<AircraftState> {
        self.states.into_iter().map(AircraftState::from).collect()
    }
}

fn string_at(row: &[Value], index: usize) -> Option<String> {
    row.get(index)
        .and_then(|v| v.as_str())
        .map(|text| text.trim().to_string())
}

fn float_at(row: &[Value], index: usize) -> Option<f64> {
    row.get(index).and_then(|v| v.as_f64())
}

fn int_at(row: &[Value], index: usize) -> Option<i64> {
    let value = row.get(index)?;
    value.as_i64().or_else(|| value.as_f64().map(|num| num as i64))
}

fn bool_at(row: &[Value], index: usize) -> bool {
    row.get(index).and_then(|v| v.as_bool()).unwrap_or(false)
}
