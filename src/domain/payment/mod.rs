//! Payment confirmation types
//!
//! The gateway callback itself is an external protocol; only the
//! confirmation outcome exchanged with the backend is modeled here.

pub mod model;

pub use model::{PaymentOutcome, PaymentStatus};
