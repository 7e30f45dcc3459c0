//! Source of aircraft state snapshots.

use std::future::Future;

use anyhow::Result;
use skytrack_core::AircraftState;
use skytrack_opensky::OpenSkyClient;

/// Capability: fetch the latest aircraft states.
pub trait StateProvider {
    /// `Ok(None)` signals that the provider is temporarily unavailable.
    fn fetch_states(&self) -> impl Future<Output = Result<Option<Vec<AircraftState>>>> + Send;
}

/// [`StateProvider`] backed by the OpenSky REST API.
#[derive(Debug, Clone)]
pub struct OpenSkyProvider {
    client: OpenSkyClient,
    icao24_filter: Option<String>,
}

impl OpenSkyProvider {
    pub fn new(client: OpenSkyClient) -> Self {
        Self {
            client,
            icao24_filter: None,
        }
    }

    /// Restrict every request to one aircraft.
    pub fn with_icao24_filter(mut self, icao24: impl Into<String>) -> Self {
        self.icao24_filter = Some(icao24.into());
        self
    }
}

impl StateProvider for OpenSkyProvider {
    async fn fetch_states(&self) -> Result<Option<Vec<AircraftState>>> {
        let snapshot = self
            .client
            .fetch_states(self.icao24_filter.as_deref())
            .await?;
        Ok(snapshot.map(|snapshot| snapshot.into_aircraft_states()))
    }
}
