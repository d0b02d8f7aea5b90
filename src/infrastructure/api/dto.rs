//! Wire DTOs for the backend REST surface
//!
//! The backend serves camelCase JSON with a few legacy quirks that are
//! absorbed here, at the boundary: Mongo-style `_id` keys, the old
//! `slotNumber` name for a slot's display index, and reservation items
//! that reference their slot either as a bare id or as an embedded
//! object. Domain types never see any of it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::gateway::{PaymentConfirmation, SlotWrite};
use crate::domain::payment::PaymentStatus;
use crate::domain::port::{ChargeSpeed, Port, PortKind, PortStatus};
use crate::domain::reservation::{Reservation, ReservationItem, ReservationStatus};
use crate::domain::slot::{Slot, SlotStatus};
use crate::domain::station::Station;

// ── Read side ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub ports: Vec<PortDto>,
}

impl StationDto {
    pub fn into_domain(self) -> Station {
        Station {
            id: self.id,
            name: self.name,
            address: self.address,
            ports: self.ports.into_iter().map(PortDto::into_domain).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortDto {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub status: Option<String>,
    pub power_kw: Decimal,
    pub price: Decimal,
    #[serde(default)]
    pub speed: Option<String>,
    #[serde(default)]
    pub slots: Vec<SlotDto>,
}

impl PortDto {
    pub fn into_domain(self) -> Port {
        let port_id = self.id.clone();
        Port {
            id: self.id,
            kind: PortKind::parse(&self.kind),
            status: self
                .status
                .as_deref()
                .map(PortStatus::parse)
                .unwrap_or(PortStatus::Available),
            power_kw: self.power_kw,
            price_per_kwh: self.price,
            speed: self
                .speed
                .as_deref()
                .map(ChargeSpeed::parse)
                .unwrap_or(ChargeSpeed::Slow),
            slots: self
                .slots
                .into_iter()
                .map(|s| s.into_domain(&port_id))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDto {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub port_id: Option<String>,
    /// Display index; older records still call this `slotNumber`
    #[serde(default, alias = "slotNumber")]
    pub order: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

impl SlotDto {
    /// `fallback_port_id`: the port whose listing produced this record,
    /// used when the payload does not carry the parent id itself.
    pub fn into_domain(self, fallback_port_id: &str) -> Slot {
        Slot {
            id: self.id,
            port_id: self
                .port_id
                .unwrap_or_else(|| fallback_port_id.to_string()),
            order: self.order.unwrap_or_default(),
            // Absent status reads as available
            status: self
                .status
                .as_deref()
                .map(SlotStatus::normalize)
                .unwrap_or(SlotStatus::Available),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDto {
    #[serde(alias = "_id")]
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub items: Vec<ReservationItemDto>,
}

impl ReservationDto {
    pub fn into_domain(self) -> Reservation {
        Reservation {
            id: self.id,
            status: ReservationStatus::parse(&self.status),
            items: self
                .items
                .into_iter()
                .map(|item| ReservationItem {
                    slot_id: item.slot.into_id(),
                    end_at: item.end_at,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationItemDto {
    #[serde(alias = "slotId")]
    pub slot: SlotRefDto,
    pub end_at: DateTime<Utc>,
}

/// Slot reference inside a reservation item: bare id or embedded object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SlotRefDto {
    Id(String),
    Embedded(EmbeddedSlotRef),
}

#[derive(Debug, Deserialize)]
pub struct EmbeddedSlotRef {
    #[serde(alias = "_id")]
    pub id: String,
}

impl SlotRefDto {
    pub fn into_id(self) -> String {
        match self {
            Self::Id(id) => id,
            Self::Embedded(embedded) => embedded.id,
        }
    }
}

/// Error payload the backend attaches to rejected requests
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(alias = "error")]
    pub message: Option<String>,
}

// ── Write side ─────────────────────────────────────────────────

/// Exactly the payload the slot endpoints accept: `{ order, status }`
#[derive(Debug, Serialize)]
pub struct SlotWriteDto {
    pub order: u32,
    pub status: String,
}

impl From<&SlotWrite> for SlotWriteDto {
    fn from(write: &SlotWrite) -> Self {
        Self {
            order: write.order,
            status: write.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationWriteDto {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub ports: Vec<PortWriteDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortWriteDto {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub power_kw: Decimal,
    pub price: Decimal,
    pub speed: String,
}

impl StationWriteDto {
    pub fn from_domain(station: &Station) -> Self {
        Self {
            name: station.name.clone(),
            address: station.address.clone(),
            ports: station
                .ports
                .iter()
                .map(|port| PortWriteDto {
                    id: port.id.clone(),
                    kind: port.kind.as_str().to_string(),
                    status: port.status.as_str().to_string(),
                    power_kw: port.power_kw,
                    price: port.price_per_kwh,
                    speed: port.speed.as_str().to_string(),
                })
                .collect(),
        }
    }
}

/// Payment-return exchange body: the pending-transaction id plus every
/// gateway parameter, flattened to the top level as the backend expects
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmDto {
    pub pending_transaction_id: String,
    #[serde(flatten)]
    pub gateway_params: BTreeMap<String, String>,
}

impl From<&PaymentConfirmation> for PaymentConfirmDto {
    fn from(confirmation: &PaymentConfirmation) -> Self {
        Self {
            pending_transaction_id: confirmation.pending_transaction_id.clone(),
            gateway_params: confirmation.gateway_params.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusDto {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

impl PaymentStatusDto {
    pub fn into_domain(self) -> PaymentStatus {
        PaymentStatus::from_raw(&self.status, self.message, self.transaction_id)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_accepts_modern_and_legacy_order_field() {
        let modern: SlotDto =
            serde_json::from_str(r#"{"id": "s-1", "order": 2, "status": "available"}"#).unwrap();
        assert_eq!(modern.into_domain("p-1").order, 2);

        let legacy: SlotDto =
            serde_json::from_str(r#"{"_id": "s-1", "slotNumber": 3, "status": "occupied"}"#)
                .unwrap();
        let slot = legacy.into_domain("p-1");
        assert_eq!(slot.order, 3);
        // Legacy status synonym normalized on ingest
        assert_eq!(slot.status, SlotStatus::InUse);
    }

    #[test]
    fn slot_without_status_reads_as_available() {
        let dto: SlotDto = serde_json::from_str(r#"{"id": "s-1", "order": 1}"#).unwrap();
        assert_eq!(dto.into_domain("p-1").status, SlotStatus::Available);
    }

    #[test]
    fn slot_parent_falls_back_to_the_listing_port() {
        let dto: SlotDto = serde_json::from_str(r#"{"id": "s-1", "order": 1}"#).unwrap();
        assert_eq!(dto.into_domain("p-7").port_id, "p-7");

        let dto: SlotDto =
            serde_json::from_str(r#"{"id": "s-1", "portId": "p-2", "order": 1}"#).unwrap();
        assert_eq!(dto.into_domain("p-7").port_id, "p-2");
    }

    #[test]
    fn port_parses_type_key_and_embedded_slots() {
        let dto: PortDto = serde_json::from_str(
            r#"{
                "_id": "p-1",
                "type": "DC_ULTRA",
                "status": "active",
                "powerKw": 150,
                "price": 4200.5,
                "speed": "ultra",
                "slots": [{"id": "s-1", "order": 1}]
            }"#,
        )
        .unwrap();
        let port = dto.into_domain();
        assert_eq!(port.kind, PortKind::DcUltra);
        assert_eq!(port.speed, ChargeSpeed::Ultra);
        assert_eq!(port.slots.len(), 1);
        assert_eq!(port.slots[0].port_id, "p-1");
    }

    #[test]
    fn reservation_item_accepts_bare_and_embedded_slot_refs() {
        let dto: ReservationDto = serde_json::from_str(
            r#"{
                "id": "r-1",
                "status": "confirmed",
                "items": [
                    {"slot": "s-1", "endAt": "2025-06-15T13:00:00Z"},
                    {"slot": {"_id": "s-2", "order": 2}, "endAt": "2025-06-15T14:00:00Z"}
                ]
            }"#,
        )
        .unwrap();
        let reservation = dto.into_domain();
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(reservation.items[0].slot_id, "s-1");
        assert_eq!(reservation.items[1].slot_id, "s-2");
    }

    #[test]
    fn slot_write_serializes_to_the_exact_contract() {
        let write = SlotWrite {
            order: 2,
            status: SlotStatus::Booked,
        };
        let json = serde_json::to_value(SlotWriteDto::from(&write)).unwrap();
        assert_eq!(json, serde_json::json!({"order": 2, "status": "booked"}));
    }

    #[test]
    fn payment_confirm_flattens_gateway_params() {
        let mut params = BTreeMap::new();
        params.insert("vnp_ResponseCode".to_string(), "00".to_string());
        params.insert("vnp_TxnRef".to_string(), "ORD-7".to_string());
        let confirmation = PaymentConfirmation {
            pending_transaction_id: "pend-1".to_string(),
            gateway_params: params,
        };

        let json = serde_json::to_value(PaymentConfirmDto::from(&confirmation)).unwrap();
        assert_eq!(json["pendingTransactionId"], "pend-1");
        assert_eq!(json["vnp_ResponseCode"], "00");
        assert_eq!(json["vnp_TxnRef"], "ORD-7");
    }

    #[test]
    fn error_body_accepts_message_or_error_key() {
        let body: ErrorBody = serde_json::from_str(r#"{"message": "nope"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("nope"));
        let body: ErrorBody = serde_json::from_str(r#"{"error": "denied"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("denied"));
        let body: ErrorBody = serde_json::from_str(r#"{}"#).unwrap();
        assert!(body.message.is_none());
    }
}
