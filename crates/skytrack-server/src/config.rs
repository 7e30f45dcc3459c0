//! Tracker configuration from environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use skytrack_core::{CoordinateError, ReferencePoint};
use skytrack_opensky::DEFAULT_BASE_URL;

use crate::retry::RetryPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// ICAO24 address of the tracked aircraft, lowercase hex
    pub target_icao24: String,
    pub reference_lat: f64,
    pub reference_lon: f64,
    pub poll_interval: Duration,
    pub retry_interval: Duration,
    pub altitude_gauge_max: f64,
    pub velocity_gauge_max: f64,
    /// Ask OpenSky to return only the target instead of every aircraft.
    pub filter_target: bool,
    pub opensky_url: String,
    pub opensky_username: Option<String>,
    pub opensky_password: Option<String>,
    pub opensky_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            target_icao24: "4601f5".to_string(),
            // Helsinki Airport
            reference_lat: 60.317199707031,
            reference_lon: 24.963300704956,
            poll_interval: Duration::from_secs(5),
            retry_interval: Duration::from_secs(5),
            altitude_gauge_max: 15_000.0,
            velocity_gauge_max: 500.0,
            filter_target: false,
            opensky_url: DEFAULT_BASE_URL.to_string(),
            opensky_username: None,
            opensky_password: None,
            opensky_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SKYTRACK_PORT").unwrap_or(defaults.server_port),
            target_icao24: env::var("SKYTRACK_TARGET_ICAO24")
                .ok()
                .map(|value| value.trim().to_ascii_lowercase())
                .filter(|value| !value.is_empty())
                .unwrap_or(defaults.target_icao24),
            reference_lat: parse_var("SKYTRACK_REF_LAT").unwrap_or(defaults.reference_lat),
            reference_lon: parse_var("SKYTRACK_REF_LON").unwrap_or(defaults.reference_lon),
            poll_interval: parse_var("SKYTRACK_POLL_INTERVAL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.poll_interval),
            retry_interval: parse_var("SKYTRACK_RETRY_INTERVAL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.retry_interval),
            altitude_gauge_max: parse_var("SKYTRACK_ALTITUDE_GAUGE_MAX")
                .unwrap_or(defaults.altitude_gauge_max),
            velocity_gauge_max: parse_var("SKYTRACK_VELOCITY_GAUGE_MAX")
                .unwrap_or(defaults.velocity_gauge_max),
            filter_target: parse_var("SKYTRACK_FILTER_TARGET").unwrap_or(defaults.filter_target),
            opensky_url: env::var("OPENSKY_URL").unwrap_or(defaults.opensky_url),
            opensky_username: non_empty_var("OPENSKY_USERNAME"),
            opensky_password: non_empty_var("OPENSKY_PASSWORD"),
            opensky_timeout: parse_var("OPENSKY_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.opensky_timeout),
        }
    }

    pub fn reference_point(&self) -> Result<ReferencePoint, CoordinateError> {
        ReferencePoint::new(self.reference_lat, self.reference_lon)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.poll_interval, self.retry_interval)
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|raw| parse_value(key, &raw))
}

/// Parse a setting; unparseable values are reported and fall back to the default.
fn parse_value<T: FromStr>(key: &str, raw: &str) -> Option<T> {
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}, using default", key, raw);
            None
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
