//! Station listing and port mutations
//!
//! Port create/update/delete have no endpoints of their own: the
//! backend only accepts a rewrite of the parent station's port
//! collection, so every port mutation here goes through
//! [`NetworkGateway::update_station`].

use std::sync::Arc;

use tracing::debug;

use crate::application::gateway::NetworkGateway;
use crate::domain::port::Port;
use crate::domain::station::Station;
use crate::shared::errors::{AppError, DomainError};

pub struct StationDirectory {
    gateway: Arc<dyn NetworkGateway>,
}

impl StationDirectory {
    pub fn new(gateway: Arc<dyn NetworkGateway>) -> Self {
        Self { gateway }
    }

    pub async fn list_stations(&self) -> Result<Vec<Station>, AppError> {
        Ok(self.gateway.list_stations().await?)
    }

    /// Find a port across all stations, returning it with its parent.
    pub async fn locate_port(&self, port_id: &str) -> Result<(Station, Port), AppError> {
        let stations = self.gateway.list_stations().await?;
        for station in stations {
            if let Some(port) = station.find_port(port_id) {
                let port = port.clone();
                return Ok((station, port));
            }
        }
        Err(DomainError::NotFound {
            entity: "port",
            id: port_id.to_string(),
        }
        .into())
    }

    /// Create or update a port by rewriting the parent station's port
    /// collection. Power and price are validated before the call.
    pub async fn upsert_port(&self, station: &Station, port: Port) -> Result<Station, AppError> {
        port.validate()?;

        let mut station = station.clone();
        station.upsert_port(port);
        debug!(station_id = %station.id, ports = station.ports.len(), "Rewriting station ports");
        Ok(self.gateway.update_station(&station).await?)
    }

    /// Remove a port by rewriting the parent station without it.
    pub async fn remove_port(&self, station: &Station, port_id: &str) -> Result<Station, AppError> {
        let mut station = station.clone();
        if !station.remove_port(port_id) {
            return Err(DomainError::NotFound {
                entity: "port",
                id: port_id.to_string(),
            }
            .into());
        }
        Ok(self.gateway.update_station(&station).await?)
    }
}

// ── Tests ──────────────────────────────────────────────────────
