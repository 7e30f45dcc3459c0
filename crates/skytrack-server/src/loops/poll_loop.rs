//! Tracking loop.
//!
//! Runs one poll cycle at a time, forever. No cycle result is fatal: fetch
//! outages and faults are logged and the next attempt follows the retry
//! policy.

use anyhow::Result;

use crate::clock::{Clock, Sleeper};
use crate::cycle::{CycleOutcome, PollCycle};
use crate::display::DisplaySink;
use crate::provider::StateProvider;
use crate::retry::RetryPolicy;

pub struct PollLoop<P, D, C, S> {
    cycle: PollCycle<P, D, C>,
    policy: RetryPolicy,
    sleeper: S,
}

impl<P, D, C, S> PollLoop<P, D, C, S>
where
    P: StateProvider,
    D: DisplaySink,
    C: Clock,
    S: Sleeper,
{
    pub fn new(cycle: PollCycle<P, D, C>, policy: RetryPolicy, sleeper: S) -> Self {
        Self {
            cycle,
            policy,
            sleeper,
        }
    }

    /// Run one cycle, report how it went and wait out the policy delays.
    pub async fn tick(&mut self) -> Result<CycleOutcome> {
        let result = self.cycle.run_once().await;

        match &result {
            Ok(CycleOutcome::FetchUnavailable) => {
                tracing::warn!("Failed to fetch aircraft states, retrying");
            }
            Ok(CycleOutcome::TargetAbsent) => {
                tracing::debug!("Aircraft {} not in current states", self.cycle.target_icao24());
            }
            Ok(CycleOutcome::Updated { path_appended }) => {
                tracing::debug!(
                    "Displays updated (path points: {}, appended: {})",
                    self.cycle.path().len(),
                    path_appended
                );
            }
            Err(err) => {
                tracing::error!("Poll cycle failed: {:#}", err);
            }
        }

        for delay in self.policy.delays(&result) {
            self.sleeper.sleep(delay).await;
        }

        result
    }

    /// Track until the process is terminated.
    pub async fn run(&mut self) {
        tracing::info!(
            "Tracking aircraft {} every {:?}",
            self.cycle.target_icao24(),
            self.policy.idle()
        );
        loop {
            // Outcome is already logged by tick.
            let _ = self.tick().await;
        }
    }

    pub fn cycle(&self) -> &PollCycle<P, D, C> {
        &self.cycle
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }
}
