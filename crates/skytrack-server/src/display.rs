//! Sink for visual updates produced by each poll cycle.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use skytrack_core::PolarSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gauge {
    Altitude,
    Velocity,
}

impl Gauge {
    pub fn name(&self) -> &'static str {
        match self {
            Gauge::Altitude => "altitude",
            Gauge::Velocity => "velocity",
        }
    }
}

/// Capability: render path, series and gauge updates.
///
/// Calls arrive at irregular intervals. A `None` gauge value must leave
/// the gauge showing its previous value.
pub trait DisplaySink {
    /// Replace the whole traced path.
    fn set_path_points(&mut self, points: &[PolarSample]) -> Result<()>;

    fn append_altitude_point(&mut self, timestamp_ms: i64, altitude_m: f64) -> Result<()>;

    fn set_gauge_value(&mut self, gauge: Gauge, value: Option<f64>) -> Result<()>;
}
