//! In-memory dashboard state shared between the poll loop and the HTTP feed.

use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use skytrack_core::PolarSample;
use tokio::sync::broadcast;

use crate::config::Config;
use crate::display::{DisplaySink, Gauge};

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltitudePoint {
    pub timestamp_ms: i64,
    pub altitude_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeState {
    pub gauge: Gauge,
    pub title: String,
    pub min: f64,
    pub max: f64,
    /// Last reported value; `None` until the first report.
    pub value: Option<f64>,
}

impl GaugeState {
    fn new(gauge: Gauge, title: &str, max: f64) -> Self {
        Self {
            gauge,
            title: title.to_string(),
            min: 0.0,
            max,
            value: None,
        }
    }
}

/// Everything a dashboard needs to render from scratch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub path: Vec<PolarSample>,
    pub altitude_series: Vec<AltitudePoint>,
    pub gauges: Vec<GaugeState>,
}

/// Incremental change pushed to live subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayEvent {
    Path { points: Vec<PolarSample> },
    AltitudePoint(AltitudePoint),
    Gauge { gauge: Gauge, value: f64 },
}

/// Application state - latest dashboard contents plus the live event channel.
pub struct DashboardStore {
    dashboard: RwLock<DashboardSnapshot>,
    tx: broadcast::Sender<String>,
}

impl DashboardStore {
    pub fn new(altitude_gauge_max: f64, velocity_gauge_max: f64) -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            dashboard: RwLock::new(DashboardSnapshot {
                path: Vec::new(),
                altitude_series: Vec::new(),
                gauges: vec![
                    GaugeState::new(Gauge::Altitude, "Current Altitude (m)", altitude_gauge_max),
                    GaugeState::new(Gauge::Velocity, "Current Velocity (m/s)", velocity_gauge_max),
                ],
            }),
            tx,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.altitude_gauge_max, config.velocity_gauge_max)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.dashboard
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Receive every change applied from now on, as JSON text.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    pub fn set_path(&self, points: &[PolarSample]) -> Result<()> {
        self.write().path = points.to_vec();
        self.publish(&DisplayEvent::Path {
            points: points.to_vec(),
        })
    }

    pub fn append_altitude(&self, point: AltitudePoint) -> Result<()> {
        self.write().altitude_series.push(point);
        self.publish(&DisplayEvent::AltitudePoint(point))
    }

    /// Update a gauge. `None` keeps the previous value and publishes nothing.
    pub fn set_gauge(&self, gauge: Gauge, value: Option<f64>) -> Result<()> {
        let Some(value) = value else {
            return Ok(());
        };
        {
            let mut dashboard = self.write();
            if let Some(state) = dashboard.gauges.iter_mut().find(|g| g.gauge == gauge) {
                state.value = Some(value);
            }
        }
        self.publish(&DisplayEvent::Gauge { gauge, value })
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, DashboardSnapshot> {
        self.dashboard
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, event: &DisplayEvent) -> Result<()> {
        let payload = serde_json::to_string(event).context("Failed to encode display event")?;
        // No subscribers is fine; the snapshot still holds the change.
        let _ = self.tx.send(payload);
        Ok(())
    }
}

/// [`DisplaySink`] that writes into a shared [`DashboardStore`].
#[derive(Clone)]
pub struct DashboardSink {
    store: Arc<DashboardStore>,
}

impl DashboardSink {
    pub fn new(store: Arc<DashboardStore>) -> Self {
        Self { store }
    }
}

impl DisplaySink for DashboardSink {
    fn set_path_points(&mut self, points: &[PolarSample]) -> Result<()> {
        self.store.set_path(points)
    }

    fn append_altitude_point(&mut self, timestamp_ms: i64, altitude_m: f64) -> Result<()> {
        self.store.append_altitude(AltitudePoint {
            timestamp_ms,
            altitude_m,
        })
    }

    fn set_gauge_value(&mut self, gauge: Gauge, value: Option<f64>) -> Result<()> {
        self.store.set_gauge(gauge, value)
    }
}
