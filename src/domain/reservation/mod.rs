//! Reservation aggregate
//!
//! A reservation is a customer booking referencing one or more slots,
//! each with an end-of-window timestamp.

pub mod model;

pub use model::{Reservation, ReservationItem, ReservationStatus};
