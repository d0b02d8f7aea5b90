//! Staff station-overview flows

pub mod service;

pub use service::{PortOverview, SlotEdit, StationOverviewService};
