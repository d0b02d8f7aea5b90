pub mod availability;
pub mod payment;
pub mod port;
pub mod reservation;
pub mod slot;
pub mod station;

// Re-export commonly used types
pub use availability::{
    check_slot_deletable, port_display_status, reconcile, DisplaySlot, OverrideMap,
    PortDisplayStatus,
};
pub use payment::{PaymentOutcome, PaymentStatus};
pub use port::{ChargeSpeed, Port, PortKind, PortStatus};
pub use reservation::{Reservation, ReservationItem, ReservationStatus};
pub use slot::{Slot, SlotStatus};
pub use station::Station;

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
