pub mod geo;
pub mod models;
pub mod path;

pub use geo::{distance_km, initial_bearing_deg, polar_sample, EARTH_RADIUS_KM};
pub use models::{AircraftState, CoordinateError, GeoPoint, PolarSample, ReferencePoint};
pub use path::FlightPathBuffer;
