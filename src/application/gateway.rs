//! Outbound port to the network backend
//!
//! Everything this console knows about the world arrives through this
//! trait. Production wires it to the REST client; tests use the
//! in-memory gateway.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::payment::PaymentStatus;
use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::domain::slot::{Slot, SlotStatus};
use crate::domain::station::Station;
use crate::shared::errors::ApiError;

/// Write payload for the slot endpoints. The contract is exactly
/// `{ order, status }` with a canonical status; callers validate before
/// constructing one.
#[derive(Debug, Clone)]
pub struct SlotWrite {
    pub order: u32,
    pub status: SlotStatus,
}

/// Payment-return exchange payload: the gateway callback parameters
/// lifted from the return URL, plus the pending-transaction identity the
/// caller carried through the redirect context.
#[derive(Debug, Clone)]
pub struct PaymentConfirmation {
    pub pending_transaction_id: String,
    /// Callback query parameters, forwarded verbatim
    pub gateway_params: BTreeMap<String, String>,
}

#[async_trait]
pub trait NetworkGateway: Send + Sync {
    /// Station listing with embedded ports (without slots).
    async fn list_stations(&self) -> Result<Vec<Station>, ApiError>;

    /// Slots for one port, in backend order.
    async fn list_slots(&self, port_id: &str) -> Result<Vec<Slot>, ApiError>;

    /// Reservations filtered by a comma-joined status set. The filter is
    /// advisory and callers must not trust it for expiry.
    async fn list_reservations(
        &self,
        statuses: &[ReservationStatus],
    ) -> Result<Vec<Reservation>, ApiError>;

    async fn create_slot(&self, port_id: &str, write: &SlotWrite) -> Result<Slot, ApiError>;

    async fn update_slot(&self, slot_id: &str, write: &SlotWrite) -> Result<Slot, ApiError>;

    async fn delete_slot(&self, slot_id: &str) -> Result<(), ApiError>;

    /// Rewrite a station, ports included. This is how port mutations are
    /// expressed; the backend has no per-port update endpoint.
    async fn update_station(&self, station: &Station) -> Result<Station, ApiError>;

    /// Exchange gateway-return parameters for a payment status.
    async fn confirm_payment(
        &self,
        confirmation: &PaymentConfirmation,
    ) -> Result<PaymentStatus, ApiError>;
}
