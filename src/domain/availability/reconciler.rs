//! Availability reconciliation
//!
//! The slot records for a port and the reservation listing are fetched
//! independently and can disagree: a slot whose persisted status still
//! says `available` may already be held by a confirmed reservation, and
//! a reservation the backend still returns may have run out its window.
//! This merge resolves both directions and additionally honors a
//! transient override map so a just-submitted staff edit shows
//! immediately instead of waiting for the reservation index to catch up.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::domain::slot::{Slot, SlotStatus};

use super::display::DisplaySlot;

/// Transient slot-id → forced-status map. Scoped to a single merge pass
/// (the one immediately following a staff edit) and discarded afterwards.
pub type OverrideMap = HashMap<String, SlotStatus>;

/// Merge persisted slots with the live reservation set into display slots.
///
/// * Reservations with no item ending after `now` are dropped entirely;
///   the server-side status filter is advisory and expiry is re-checked
///   here so a stale booking can never block a slot.
/// * A live reservation with status confirmed/active resolves the slot to
///   `in_use`; pending resolves it to `booked`; otherwise the slot keeps
///   its own persisted status.
/// * An override replaces whatever the merge computed for that slot and
///   clears the attached reservation.
///
/// Output order equals input order. Inputs are not mutated; the result is
/// rebuilt from scratch on every call.
pub fn reconcile(
    slots: &[Slot],
    reservations: &[Reservation],
    overrides: &OverrideMap,
    now: DateTime<Utc>,
) -> Vec<DisplaySlot> {
    // First live reservation seen per slot wins; later ones are ignored.
    // An artifact of iteration order kept for determinism, not a business
    // rule: two live reservations on one slot should not happen, but the
    // data model does not preclude it.
    let mut by_slot: HashMap<&str, &Reservation> = HashMap::new();
    for reservation in reservations.iter().filter(|r| r.is_live(now)) {
        for item in &reservation.items {
            by_slot.entry(item.slot_id.as_str()).or_insert(reservation);
        }
    }

    slots
        .iter()
        .map(|slot| {
            let (mut actual_status, mut reservation) =
                match by_slot.get(slot.id.as_str()).copied() {
                    Some(r)
                        if matches!(
                            r.status,
                            ReservationStatus::Confirmed | ReservationStatus::Active
                        ) =>
                    {
                        (SlotStatus::InUse, Some(r.clone()))
                    }
                    Some(r) if r.status == ReservationStatus::Pending => {
                        (SlotStatus::Booked, Some(r.clone()))
                    }
                    // Live reservation in some other state, or none at all:
                    // the slot's own persisted status stands.
                    _ => (slot.status.clone(), None),
                };

            let mut slot = slot.clone();
            if let Some(forced) = overrides.get(&slot.id) {
                actual_status = forced.clone();
                slot.status = forced.clone();
                reservation = None;
            }

            DisplaySlot {
                slot,
                actual_status,
                reservation,
            }
        })
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────
