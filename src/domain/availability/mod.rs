//! Slot availability read-model
//!
//! Merges the persisted slot records for one port with the live
//! reservation set into per-slot display statuses, plus the display
//! policies derived from that merge (port full/available, deletion guard).

pub mod display;
pub mod reconciler;

pub use display::{check_slot_deletable, port_display_status, DisplaySlot, PortDisplayStatus};
pub use reconciler::{reconcile, OverrideMap};
