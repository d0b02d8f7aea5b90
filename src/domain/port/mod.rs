//! Port aggregate
//!
//! A port is a physical charging connector unit at a station, with
//! electrical characteristics and an ordered collection of slots.

pub mod model;

pub use model::{ChargeSpeed, Port, PortKind, PortStatus};
