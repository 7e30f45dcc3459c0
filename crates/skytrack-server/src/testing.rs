//! Fakes for the provider, sink and time seams.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use skytrack_core::{AircraftState, PolarSample};

use crate::clock::{Clock, Sleeper};
use crate::display::{DisplaySink, Gauge};
use crate::provider::StateProvider;

pub fn aircraft(icao24: &str, lat: f64, lon: f64) -> AircraftState {
    AircraftState {
        icao24: icao24.to_string(),
        callsign: Some("FIN7".to_string()),
        latitude: Some(lat),
        longitude: Some(lon),
        geo_altitude: Some(11_000.0),
        velocity: Some(240.0),
        on_ground: false,
    }
}

/// Replays scripted fetch results, then returns empty snapshots.
#[derive(Default)]
pub struct FakeProvider {
    responses: Mutex<VecDeque<Result<Option<Vec<AircraftState>>>>>,
    fetches: Mutex<usize>,
}

impl FakeProvider {
    pub fn push(&self, response: Result<Option<Vec<AircraftState>>>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn fetches(&self) -> usize {
        *self.fetches.lock().unwrap()
    }
}

impl StateProvider for FakeProvider {
    async fn fetch_states(&self) -> Result<Option<Vec<AircraftState>>> {
        *self.fetches.lock().unwrap() += 1;
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Some(Vec::new())))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    Path(Vec<PolarSample>),
    Altitude(i64, f64),
    Gauge(Gauge, Option<f64>),
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<SinkCall>,
    fail_gauge: Option<Gauge>,
}

impl RecordingSink {
    pub fn failing_on_gauge(gauge: Gauge) -> Self {
        Self {
            calls: Vec::new(),
            fail_gauge: Some(gauge),
        }
    }
}

impl DisplaySink for RecordingSink {
    fn set_path_points(&mut self, points: &[PolarSample]) -> Result<()> {
        self.calls.push(SinkCall::Path(points.to_vec()));
        Ok(())
    }

    fn append_altitude_point(&mut self, timestamp_ms: i64, altitude_m: f64) -> Result<()> {
        self.calls.push(SinkCall::Altitude(timestamp_ms, altitude_m));
        Ok(())
    }

    fn set_gauge_value(&mut self, gauge: Gauge, value: Option<f64>) -> Result<()> {
        if self.fail_gauge == Some(gauge) {
            anyhow::bail!("{} gauge is gone", gauge.name());
        }
        self.calls.push(SinkCall::Gauge(gauge, value));
        Ok(())
    }
}

pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Records requested sleeps and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    slept: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }

    pub fn total(&self) -> Duration {
        self.slept().iter().sum()
    }

    pub fn clear(&self) {
        self.slept.lock().unwrap().clear();
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}
