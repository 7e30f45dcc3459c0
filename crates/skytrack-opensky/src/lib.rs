//! SkyTrack OpenSky - OpenSky Network API client
//!
//! Fetches live state vectors and maps them onto the core aircraft model.

pub mod client;
pub mod states;

pub use client::{OpenSkyClient, DEFAULT_BASE_URL};
pub use states::{StateSnapshot, StateVector};
