//! One fetch-compute-update iteration for the tracked aircraft.

use anyhow::{Context, Result};
use skytrack_core::{polar_sample, AircraftState, FlightPathBuffer, ReferencePoint};

use crate::clock::Clock;
use crate::display::{DisplaySink, Gauge};
use crate::provider::StateProvider;

/// How a single poll cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Provider signalled unavailability; nothing was touched.
    FetchUnavailable,
    /// Fetch succeeded but the target is not in the snapshot.
    TargetAbsent,
    /// Target found and displays updated.
    Updated { path_appended: bool },
}

/// Owns the flight path and the collaborators one cycle talks to.
pub struct PollCycle<P, D, C> {
    provider: P,
    sink: D,
    clock: C,
    target_icao24: String,
    reference: ReferencePoint,
    path: FlightPathBuffer,
}

impl<P, D, C> PollCycle<P, D, C>
where
    P: StateProvider,
    D: DisplaySink,
    C: Clock,
{
    pub fn new(
        provider: P,
        sink: D,
        clock: C,
        target_icao24: impl Into<String>,
        reference: ReferencePoint,
    ) -> Self {
        Self {
            provider,
            sink,
            clock,
            target_icao24: target_icao24.into(),
            reference,
            path: FlightPathBuffer::new(),
        }
    }

    /// Run one cycle.
    ///
    /// Errors are returned as soon as they happen. Updates applied before
    /// the failing step stay applied.
    pub async fn run_once(&mut self) -> Result<CycleOutcome> {
        let Some(states) = self.provider.fetch_states().await? else {
            return Ok(CycleOutcome::FetchUnavailable);
        };

        let Some(state) = states.iter().find(|s| s.icao24 == self.target_icao24) else {
            return Ok(CycleOutcome::TargetAbsent);
        };

        self.apply(state)
    }

    fn apply(&mut self, state: &AircraftState) -> Result<CycleOutcome> {
        tracing::info!(
            "Tracking {}: Lat {:?}, Lon {:?}, Alt {:?}, Vel {:?}, On Ground: {}",
            state.callsign.as_deref().unwrap_or(&state.icao24),
            state.latitude,
            state.longitude,
            state.geo_altitude,
            state.velocity,
            state.on_ground
        );

        let position = state
            .position()
            .with_context(|| format!("State for {} has no position", state.icao24))?;
        let sample = polar_sample(&self.reference, position);

        let path_appended = self.path.push_if_distinct(sample);
        if path_appended {
            tracing::debug!("Path point {:?}", self.path.last());
            self.sink
                .set_path_points(self.path.samples())
                .context("Failed to update flight path")?;
        } else {
            tracing::debug!("Position unchanged, path not redrawn");
        }

        for (gauge, value) in [
            (Gauge::Altitude, state.geo_altitude),
            (Gauge::Velocity, state.velocity),
        ] {
            self.sink
                .set_gauge_value(gauge, value)
                .with_context(|| format!("Failed to update {} gauge", gauge.name()))?;
        }

        if let Some(altitude) = state.geo_altitude {
            self.sink
                .append_altitude_point(self.clock.now_millis(), altitude)
                .context("Failed to append altitude point")?;
        }

        Ok(CycleOutcome::Updated { path_appended })
    }

    pub fn path(&self) -> &FlightPathBuffer {
        &self.path
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn target_icao24(&self) -> &str {
        &self.target_icao24
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{aircraft, FakeProvider, FixedClock, RecordingSink, SinkCall};

    fn helsinki() -> ReferencePoint {
        ReferencePoint::new(60.3172, 24.9633).unwrap()
    }

    fn cycle(provider: FakeProvider) -> PollCycle<FakeProvider, RecordingSink, FixedClock> {
        PollCycle::new(
            provider,
            RecordingSink::default(),
            FixedClock(1_700_000_000_000),
            "4601f5",
            helsinki(),
        )
    }

    #[tokio::test]
    async fn aircraft_at_reference_is_origin() {
        let provider = FakeProvider::default();
        provider.push(Ok(Some(vec![aircraft("4601f5", 60.3172, 24.9633)])));
        let mut cycle = cycle(provider);

        let outcome = cycle.run_once().await.unwrap();

        assert_eq!(outcome, CycleOutcome::Updated { path_appended: true });
        let sample = cycle.path().last().copied().unwrap();
        assert_eq!(sample.amplitude, 0.0);
        assert_eq!(sample.angle, 0.0);
    }

    #[tokio::test]
    async fn one_degree_north() {
        let provider = FakeProvider::default();
        provider.push(Ok(Some(vec![aircraft("4601f5", 61.3172, 24.9633)])));
        let mut cycle = cycle(provider);

        cycle.run_once().await.unwrap();

        let sample = cycle.path().last().copied().unwrap();
        assert!((sample.amplitude - 111.2).abs() < 0.1);
        assert!(sample.angle.abs() < 1e-9);
    }

    #[tokio::test]
    async fn fetch_failure_touches_nothing() {
        let provider = FakeProvider::default();
        provider.push(Ok(None));
        let mut cycle = cycle(provider);

        let outcome = cycle.run_once().await.unwrap();

        assert_eq!(outcome, CycleOutcome::FetchUnavailable);
        assert!(cycle.path().is_empty());
        assert!(cycle.sink().calls.is_empty());
    }

    #[tokio::test]
    async fn target_absent_touches_nothing() {
        let provider = FakeProvider::default();
        provider.push(Ok(Some(vec![
            aircraft("abc123", 60.0, 25.0),
            aircraft("def456", 61.0, 25.0),
        ])));
        let mut cycle = cycle(provider);

        let outcome = cycle.run_once().await.unwrap();

        assert_eq!(outcome, CycleOutcome::TargetAbsent);
        assert!(cycle.path().is_empty());
        assert!(cycle.sink().calls.is_empty());
    }

    #[tokio::test]
    async fn updates_in_order_path_gauges_series() {
        let provider = FakeProvider::default();
        let mut state = aircraft("4601f5", 61.3172, 24.9633);
        state.geo_altitude = Some(10_000.0);
        state.velocity = Some(230.0);
        provider.push(Ok(Some(vec![aircraft("abc123", 0.0, 0.0), state])));
        let mut cycle = cycle(provider);

        cycle.run_once().await.unwrap();

        let calls = &cycle.sink().calls;
        assert_eq!(calls.len(), 4);
        assert!(matches!(&calls[0], SinkCall::Path(points) if points.len() == 1));
        assert_eq!(calls[1], SinkCall::Gauge(Gauge::Altitude, Some(10_000.0)));
        assert_eq!(calls[2], SinkCall::Gauge(Gauge::Velocity, Some(230.0)));
        assert_eq!(calls[3], SinkCall::Altitude(1_700_000_000_000, 10_000.0));
    }

    #[tokio::test]
    async fn missing_altitude_skips_series_but_not_gauge() {
        let provider = FakeProvider::default();
        let mut state = aircraft("4601f5", 61.0, 25.0);
        state.geo_altitude = None;
        state.velocity = Some(12.0);
        provider.push(Ok(Some(vec![state])));
        let mut cycle = cycle(provider);

        cycle.run_once().await.unwrap();

        let calls = &cycle.sink().calls;
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1], SinkCall::Gauge(Gauge::Altitude, None));
        assert!(!calls.iter().any(|c| matches!(c, SinkCall::Altitude(..))));
    }

    #[tokio::test]
    async fn repeated_position_redraws_path_once() {
        let provider = FakeProvider::default();
        for _ in 0..2 {
            provider.push(Ok(Some(vec![aircraft("4601f5", 61.0, 25.0)])));
        }
        let mut cycle = cycle(provider);

        let first = cycle.run_once().await.unwrap();
        let second = cycle.run_once().await.unwrap();

        assert_eq!(first, CycleOutcome::Updated { path_appended: true });
        assert_eq!(second, CycleOutcome::Updated { path_appended: false });
        assert_eq!(cycle.path().len(), 1);

        let calls = &cycle.sink().calls;
        let path_calls = calls.iter().filter(|c| matches!(c, SinkCall::Path(_))).count();
        let gauge_calls = calls.iter().filter(|c| matches!(c, SinkCall::Gauge(..))).count();
        let series_calls = calls.iter().filter(|c| matches!(c, SinkCall::Altitude(..))).count();
        assert_eq!(path_calls, 1);
        assert_eq!(gauge_calls, 4);
        assert_eq!(series_calls, 2);
    }

    #[tokio::test]
    async fn path_sink_receives_full_buffer() {
        let provider = FakeProvider::default();
        provider.push(Ok(Some(vec![aircraft("4601f5", 61.0, 25.0)])));
        provider.push(Ok(Some(vec![aircraft("4601f5", 61.1, 25.0)])));
        let mut cycle = cycle(provider);

        cycle.run_once().await.unwrap();
        cycle.run_once().await.unwrap();

        let last_path = cycle
            .sink()
            .calls
            .iter()
            .rev()
            .find_map(|c| match c {
                SinkCall::Path(points) => Some(points.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(last_path, cycle.path().samples());
        assert_eq!(last_path.len(), 2);
    }

    #[tokio::test]
    async fn missing_position_is_error() {
        let provider = FakeProvider::default();
        let mut state = aircraft("4601f5", 0.0, 0.0);
        state.latitude = None;
        provider.push(Ok(Some(vec![state])));
        let mut cycle = cycle(provider);

        let err = cycle.run_once().await.unwrap_err();

        assert!(err.to_string().contains("no position"));
        assert!(cycle.path().is_empty());
        assert!(cycle.sink().calls.is_empty());
    }

    #[tokio::test]
    async fn provider_error_propagates() {
        let provider = FakeProvider::default();
        provider.push(Err(anyhow::anyhow!("connection reset")));
        let mut cycle = cycle(provider);

        let err = cycle.run_once().await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn sink_failure_keeps_earlier_updates() {
        let provider = FakeProvider::default();
        provider.push(Ok(Some(vec![aircraft("4601f5", 61.0, 25.0)])));
        let mut cycle = PollCycle::new(
            provider,
            RecordingSink::failing_on_gauge(Gauge::Velocity),
            FixedClock(0),
            "4601f5",
            helsinki(),
        );

        let err = cycle.run_once().await.unwrap_err();

        assert!(format!("{err:#}").contains("velocity gauge"));
        assert_eq!(cycle.path().len(), 1);
        let calls = &cycle.sink().calls;
        assert!(matches!(calls[0], SinkCall::Path(_)));
        assert!(matches!(calls[1], SinkCall::Gauge(Gauge::Altitude, _)));
        assert_eq!(calls.len(), 2);
    }

    #[tokio::test]
    async fn altitude_gauge_failure_names_gauge() {
        let provider = FakeProvider::default();
        provider.push(Ok(Some(vec![aircraft("4601f5", 61.0, 25.0)])));
        let mut cycle = PollCycle::new(
            provider,
            RecordingSink::failing_on_gauge(Gauge::Altitude),
            FixedClock(0),
            "4601f5",
            helsinki(),
        );

        let err = cycle.run_once().await.unwrap_err();

        assert!(err.to_string().contains("Failed to update altitude gauge"));
        assert_eq!(cycle.sink().calls.len(), 1);
    }
}
