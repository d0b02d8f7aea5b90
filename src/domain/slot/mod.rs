//! Slot aggregate
//!
//! A slot is a bookable occupancy unit within a charging port.

pub mod model;

pub use model::{Slot, SlotStatus};
