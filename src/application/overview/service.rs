//! Port overview orchestration
//!
//! Fetches the two collections feeding a reconciliation pass (slots for
//! the port, live reservations), applies the merge and derives the port
//! display status. Reservation data is an enrichment: when its fetch
//! fails the overview degrades to persisted slot statuses instead of
//! failing the screen. A failed slot fetch, in contrast, is a real
//! error: "no data" must stay distinguishable from "zero slots".

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};
use validator::Validate;

use crate::application::gateway::{NetworkGateway, SlotWrite};
use crate::domain::availability::{
    check_slot_deletable, port_display_status, reconcile, DisplaySlot, OverrideMap,
    PortDisplayStatus,
};
use crate::domain::port::Port;
use crate::domain::reservation::ReservationStatus;
use crate::domain::slot::SlotStatus;
use crate::shared::errors::{AppError, DomainError};
use crate::shared::validations::describe_validation_errors;

/// Reservation states the backend is asked to return for a merge pass.
const LIVE_STATUSES: [ReservationStatus; 3] = [
    ReservationStatus::Pending,
    ReservationStatus::Confirmed,
    ReservationStatus::Active,
];

/// Reconciled view of one port, ready for rendering
#[derive(Debug, Clone)]
pub struct PortOverview {
    pub port: Port,
    pub display_status: PortDisplayStatus,
    pub slots: Vec<DisplaySlot>,
}

/// Staff edit of a slot. Validated client-side before it produces a
/// write payload; the backend enum/range constraints are mirrored here
/// so an invalid edit never leaves the console.
#[derive(Debug, Clone, Validate)]
pub struct SlotEdit {
    #[validate(range(min = 1, message = "order must be a positive integer"))]
    pub order: u32,
    pub status: SlotStatus,
}

impl SlotEdit {
    pub fn into_write(self) -> Result<SlotWrite, DomainError> {
        self.validate()
            .map_err(|e| DomainError::Validation(describe_validation_errors(&e)))?;
        if !self.status.is_canonical() {
            return Err(DomainError::Validation(format!(
                "status '{}' is not accepted by the slot endpoint (expected available, booked or in_use)",
                self.status
            )));
        }
        Ok(SlotWrite {
            order: self.order,
            status: self.status,
        })
    }
}

/// Orchestrates fetch + reconcile + mutation flows for the staff
/// station-overview screen.
pub struct StationOverviewService {
    gateway: Arc<dyn NetworkGateway>,
}

impl StationOverviewService {
    pub fn new(gateway: Arc<dyn NetworkGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch and reconcile one port's slot availability.
    ///
    /// `overrides` carries a just-submitted staff edit for exactly one
    /// merge cycle; pass an empty map for an organic refresh.
    pub async fn port_overview(
        &self,
        port: &Port,
        overrides: &OverrideMap,
    ) -> Result<PortOverview, AppError> {
        let (slots, reservations) = tokio::join!(
            self.gateway.list_slots(&port.id),
            self.gateway.list_reservations(&LIVE_STATUSES),
        );

        let slots = slots?;

        let reservations = match reservations {
            Ok(reservations) => reservations,
            Err(e) => {
                warn!(
                    port_id = %port.id,
                    error = %e,
                    "Reservation fetch failed, rendering slots without live bookings"
                );
                Vec::new()
            }
        };

        debug!(
            port_id = %port.id,
            slots = slots.len(),
            reservations = reservations.len(),
            overrides = overrides.len(),
            "Reconciling port availability"
        );

        let display = reconcile(&slots, &reservations, overrides, Utc::now());
        let display_status = port_display_status(&port.status, &display);

        Ok(PortOverview {
            port: port.clone(),
            display_status,
            slots: display,
        })
    }

    /// Update a slot, then re-reconcile with a one-cycle override so the
    /// edit shows immediately even though the reservation index may still
    /// return stale data for this slot.
    pub async fn edit_slot(
        &self,
        port: &Port,
        slot_id: &str,
        edit: SlotEdit,
    ) -> Result<PortOverview, AppError> {
        let write = edit.into_write()?;
        self.gateway.update_slot(slot_id, &write).await?;

        let mut overrides = OverrideMap::new();
        overrides.insert(slot_id.to_string(), write.status);
        self.port_overview(port, &overrides).await
    }

    /// Create a slot on the port and return the refreshed overview.
    pub async fn add_slot(&self, port: &Port, edit: SlotEdit) -> Result<PortOverview, AppError> {
        let write = edit.into_write()?;
        let created = self.gateway.create_slot(&port.id, &write).await?;
        debug!(port_id = %port.id, slot_id = %created.id, "Slot created");
        self.port_overview(port, &OverrideMap::new()).await
    }

    /// Delete a slot, guarded on its *reconciled* status: a slot a live
    /// reservation currently occupies is rejected locally, without a
    /// network call, even when its persisted status has not caught up.
    pub async fn remove_slot(&self, port: &Port, slot_id: &str) -> Result<PortOverview, AppError> {
        let view = self.port_overview(port, &OverrideMap::new()).await?;
        let display = view
            .slots
            .iter()
            .find(|d| d.slot.id == slot_id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "slot",
                id: slot_id.to_string(),
            })?;

        check_slot_deletable(display)?;

        self.gateway.delete_slot(slot_id).await?;
        self.port_overview(port, &OverrideMap::new()).await
    }
}

// ── Tests ──────────────────────────────────────────────────────
