//! Shared library surface for the tracker server and its tests.

pub mod api;
pub mod clock;
pub mod config;
pub mod cycle;
pub mod display;
pub mod loops;
pub mod provider;
pub mod retry;
pub mod state;

#[cfg(test)]
mod testing;

pub use cycle::{CycleOutcome, PollCycle};
pub use loops::PollLoop;
