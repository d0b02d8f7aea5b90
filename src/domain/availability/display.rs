//! Computed display state derived from a reconciliation pass

use crate::domain::port::PortStatus;
use crate::domain::reservation::Reservation;
use crate::domain::slot::{Slot, SlotStatus};
use crate::shared::errors::DomainError;

/// Ephemeral view-model for one slot: the persisted record plus the
/// status the staff screen should actually show.
///
/// Rebuilt from scratch on every fetch/merge cycle; never persisted.
#[derive(Debug, Clone)]
pub struct DisplaySlot {
    /// The slot as fetched, status normalized (and overwritten when an
    /// override applied, so downstream decisions see the forced value)
    pub slot: Slot,
    /// What the staff screen shows for this slot
    pub actual_status: SlotStatus,
    /// The reservation that caused `actual_status`, when one did.
    /// Cleared when an override forced the status.
    pub reservation: Option<Reservation>,
}

/// Display status for a whole port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDisplayStatus {
    Available,
    /// Every slot is booked or in use
    Full,
    /// The port itself is switched off; slot availability is irrelevant
    Inactive,
}

impl std::fmt::Display for PortDisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Full => write!(f, "full"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

/// A port is full when it has at least one slot and every slot resolved
/// to booked/in_use. The port's own `inactive` status takes precedence
/// over anything derived from slots.
pub fn port_display_status(port_status: &PortStatus, slots: &[DisplaySlot]) -> PortDisplayStatus {
    if *port_status == PortStatus::Inactive {
        return PortDisplayStatus::Inactive;
    }
    if !slots.is_empty() && slots.iter().all(|s| s.actual_status.is_taken()) {
        PortDisplayStatus::Full
    } else {
        PortDisplayStatus::Available
    }
}

/// Deletion guard: a slot whose reconciled status is `in_use` may not be
/// deleted, even when its persisted status still says otherwise. Runs
/// locally, before any network call.
pub fn check_slot_deletable(slot: &DisplaySlot) -> Result<(), DomainError> {
    if slot.actual_status == SlotStatus::InUse {
        return Err(DomainError::SlotInUse(slot.slot.id.clone()));
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn display_slot(id: &str, actual: SlotStatus) -> DisplaySlot {
        DisplaySlot {
            slot: Slot::new(id, "p-01", 1, actual.clone()),
            actual_status: actual,
            reservation: None,
        }
    }

    #[test]
    fn port_with_all_slots_taken_is_full() {
        let slots = vec![
            display_slot("s-01", SlotStatus::Booked),
            display_slot("s-02", SlotStatus::InUse),
            display_slot("s-03", SlotStatus::InUse),
        ];
        assert_eq!(
            port_display_status(&PortStatus::Active, &slots),
            PortDisplayStatus::Full
        );
    }

    #[test]
    fn one_free_slot_keeps_the_port_available() {
        let slots = vec![
            display_slot("s-01", SlotStatus::Booked),
            display_slot("s-02", SlotStatus::InUse),
            display_slot("s-03", SlotStatus::Available),
        ];
        assert_eq!(
            port_display_status(&PortStatus::Active, &slots),
            PortDisplayStatus::Available
        );
    }

    #[test]
    fn port_without_slots_is_not_full() {
        assert_eq!(
            port_display_status(&PortStatus::Active, &[]),
            PortDisplayStatus::Available
        );
    }

    #[test]
    fn inactive_port_wins_over_slot_state() {
        let slots = vec![display_slot("s-01", SlotStatus::InUse)];
        assert_eq!(
            port_display_status(&PortStatus::Inactive, &slots),
            PortDisplayStatus::Inactive
        );
    }

    #[test]
    fn in_use_slot_is_not_deletable() {
        let err = check_slot_deletable(&display_slot("s-01", SlotStatus::InUse)).unwrap_err();
        assert!(matches!(err, DomainError::SlotInUse(id) if id == "s-01"));
    }

    #[test]
    fn booked_and_available_slots_are_deletable() {
        assert!(check_slot_deletable(&display_slot("s-01", SlotStatus::Booked)).is_ok());
        assert!(check_slot_deletable(&display_slot("s-02", SlotStatus::Available)).is_ok());
    }

    #[test]
    fn guard_uses_the_reconciled_status_not_the_persisted_one() {
        // Persisted says available, but a live session resolved it to in_use.
        let slot = DisplaySlot {
            slot: Slot::new("s-01", "p-01", 1, SlotStatus::Available),
            actual_status: SlotStatus::InUse,
            reservation: None,
        };
        assert!(check_slot_deletable(&slot).is_err());
    }
}
