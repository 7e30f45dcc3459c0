pub mod store;

pub use store::{
    AltitudePoint, DashboardSink, DashboardSnapshot, DashboardStore, DisplayEvent, GaugeState,
};
