//! In-memory gateway implementation
//!
//! Backend stand-in for tests and offline development. Mutations land in
//! the maps immediately; the failure toggles simulate the two fetch
//! outages the overview flow must handle differently.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::application::gateway::{NetworkGateway, PaymentConfirmation, SlotWrite};
use crate::domain::payment::PaymentStatus;
use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::domain::slot::Slot;
use crate::domain::station::Station;
use crate::shared::errors::ApiError;

#[derive(Default)]
pub struct InMemoryGateway {
    stations: DashMap<String, Station>,
    /// Slot lists keyed by port id
    slots: DashMap<String, Vec<Slot>>,
    /// Kept as a list: reservation iteration order is meaningful to the
    /// reconciler's first-wins rule
    reservations: Mutex<Vec<Reservation>>,
    payment_status: Mutex<Option<PaymentStatus>>,
    last_confirmation: Mutex<Option<PaymentConfirmation>>,
    fail_slots: AtomicBool,
    fail_reservations: AtomicBool,
    slot_counter: AtomicU32,
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    station_updates: AtomicUsize,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_station(&self, station: Station) {
        self.stations.insert(station.id.clone(), station);
    }

    pub fn seed_slots(&self, port_id: &str, slots: Vec<Slot>) {
        self.slots.insert(port_id.to_string(), slots);
    }

    pub fn seed_reservations(&self, reservations: Vec<Reservation>) {
        *self.reservations.lock().unwrap() = reservations;
    }

    pub fn set_payment_status(&self, status: PaymentStatus) {
        *self.payment_status.lock().unwrap() = Some(status);
    }

    /// Make every slot listing fail, simulating a backend outage.
    pub fn fail_slot_listing(&self, fail: bool) {
        self.fail_slots.store(fail, Ordering::SeqCst);
    }

    /// Make every reservation listing fail.
    pub fn fail_reservation_listing(&self, fail: bool) {
        self.fail_reservations.store(fail, Ordering::SeqCst);
    }

    pub fn update_call_count(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn delete_call_count(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn station_update_count(&self) -> usize {
        self.station_updates.load(Ordering::SeqCst)
    }

    pub fn last_payment_confirmation(&self) -> Option<PaymentConfirmation> {
        self.last_confirmation.lock().unwrap().clone()
    }
}

#[async_trait]
impl NetworkGateway for InMemoryGateway {
    async fn list_stations(&self) -> Result<Vec<Station>, ApiError> {
        let mut stations: Vec<Station> =
            self.stations.iter().map(|e| e.value().clone()).collect();
        stations.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(stations)
    }

    async fn list_slots(&self, port_id: &str) -> Result<Vec<Slot>, ApiError> {
        if self.fail_slots.load(Ordering::SeqCst) {
            return Err(ApiError::Unavailable("slot listing disabled".into()));
        }
        Ok(self
            .slots
            .get(port_id)
            .map(|e| e.value().clone())
            .unwrap_or_default())
    }

    async fn list_reservations(
        &self,
        statuses: &[ReservationStatus],
    ) -> Result<Vec<Reservation>, ApiError> {
        if self.fail_reservations.load(Ordering::SeqCst) {
            return Err(ApiError::Unavailable("reservation listing disabled".into()));
        }
        Ok(self
            .reservations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| statuses.contains(&r.status))
            .cloned()
            .collect())
    }

    async fn create_slot(&self, port_id: &str, write: &SlotWrite) -> Result<Slot, ApiError> {
        let id = format!("s-gen-{}", self.slot_counter.fetch_add(1, Ordering::SeqCst) + 1);
        let slot = Slot::new(id, port_id, write.order, write.status.clone());
        self.slots
            .entry(port_id.to_string())
            .or_default()
            .push(slot.clone());
        Ok(slot)
    }

    async fn update_slot(&self, slot_id: &str, write: &SlotWrite) -> Result<Slot, ApiError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        for mut entry in self.slots.iter_mut() {
            if let Some(slot) = entry.value_mut().iter_mut().find(|s| s.id == slot_id) {
                slot.order = write.order;
                slot.status = write.status.clone();
                return Ok(slot.clone());
            }
        }
        Err(ApiError::NotFound {
            entity: "slot",
            id: slot_id.to_string(),
        })
    }

    async fn delete_slot(&self, slot_id: &str) -> Result<(), ApiError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        for mut entry in self.slots.iter_mut() {
            let slots = entry.value_mut();
            let before = slots.len();
            slots.retain(|s| s.id != slot_id);
            if slots.len() != before {
                return Ok(());
            }
        }
        Err(ApiError::NotFound {
            entity: "slot",
            id: slot_id.to_string(),
        })
    }

    async fn update_station(&self, station: &Station) -> Result<Station, ApiError> {
        self.station_updates.fetch_add(1, Ordering::SeqCst);
        if !self.stations.contains_key(&station.id) {
            return Err(ApiError::NotFound {
                entity: "station",
                id: station.id.clone(),
            });
        }
        self.stations.insert(station.id.clone(), station.clone());
        Ok(station.clone())
    }

    async fn confirm_payment(
        &self,
        confirmation: &PaymentConfirmation,
    ) -> Result<PaymentStatus, ApiError> {
        *self.last_confirmation.lock().unwrap() = Some(confirmation.clone());
        self.payment_status
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ApiError::Unavailable("no payment status configured".into()))
    }
}
