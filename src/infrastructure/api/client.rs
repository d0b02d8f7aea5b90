//! REST API client
//!
//! The only place that talks HTTP. Response-shape tolerance lives in the
//! envelope types, identity/field quirks in the DTOs, so everything the
//! client hands out is a clean domain value.
//!
//! GET requests are retried on transport-level errors (connection reset,
//! timeout); mutations are never retried, since the backend does not promise
//! idempotency for them.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::application::gateway::{NetworkGateway, PaymentConfirmation, SlotWrite};
use crate::config::BackendConfig;
use crate::domain::payment::PaymentStatus;
use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::domain::slot::Slot;
use crate::domain::station::Station;
use crate::shared::errors::ApiError;

use super::dto::{
    ErrorBody, PaymentConfirmDto, PaymentStatusDto, ReservationDto, SlotDto, SlotWriteDto,
    StationDto, StationWriteDto,
};
use super::envelope::{ItemEnvelope, ListEnvelope};

/// HTTP client for the network backend
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            client,
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, ApiError> {
        let client = Self::new(
            &config.base_url,
            config.api_token.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(client.with_retry_config(
            config.max_retries,
            Duration::from_millis(config.retry_delay_ms),
        ))
    }

    pub fn with_retry_config(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries.max(1);
        self.retry_delay = retry_delay;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Retry a request on transport errors with exponential backoff.
    /// HTTP error statuses are not retried; they are mapped by the caller.
    async fn retry_request<F, Fut>(&self, mut request_fn: F) -> Result<Response, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Response, reqwest::Error>>,
    {
        let mut attempt = 0;
        let mut delay = self.retry_delay;

        loop {
            attempt += 1;
            match request_fn().await {
                Ok(response) => return Ok(response),
                Err(e) if attempt >= self.max_retries => return Err(ApiError::Transport(e)),
                Err(e) => {
                    warn!(
                        attempt,
                        max_attempts = self.max_retries,
                        error = %e,
                        "Transient request failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }

    /// Map a non-success response to the error taxonomy, surfacing the
    /// backend's own message when the body carries one.
    async fn reject(response: Response, entity: &'static str, id: &str) -> ApiError {
        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => ApiError::NotFound {
                entity,
                id: id.to_string(),
            },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
            _ => {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ErrorBody>(&body)
                    .ok()
                    .and_then(|b| b.message)
                    .unwrap_or_else(|| {
                        if body.is_empty() {
                            "request rejected".to_string()
                        } else {
                            body.clone()
                        }
                    });
                ApiError::Rejected {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }

    async fn decode<T: DeserializeOwned>(
        response: Response,
        entity: &'static str,
        id: &str,
    ) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(Self::reject(response, entity, id).await);
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        entity: &'static str,
    ) -> Result<Vec<T>, ApiError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self
            .retry_request(|| async { self.authorized(self.client.get(&url)).send().await })
            .await?;
        let envelope: ListEnvelope<T> = Self::decode(response, entity, path).await?;
        Ok(envelope.into_items())
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        body: &B,
        entity: &'static str,
        id: &str,
    ) -> Result<T, ApiError> {
        let response = self.authorized(builder).json(body).send().await?;
        let envelope: ItemEnvelope<T> = Self::decode(response, entity, id).await?;
        Ok(envelope.into_item())
    }
}

#[async_trait]
impl NetworkGateway for ApiClient {
    async fn list_stations(&self) -> Result<Vec<Station>, ApiError> {
        let stations: Vec<StationDto> = self.get_list("/stations?embed=ports", "station").await?;
        Ok(stations.into_iter().map(StationDto::into_domain).collect())
    }

    async fn list_slots(&self, port_id: &str) -> Result<Vec<Slot>, ApiError> {
        let path = format!("/ports/{}/slots", port_id);
        let slots: Vec<SlotDto> = self.get_list(&path, "slot").await?;
        Ok(slots
            .into_iter()
            .map(|dto| dto.into_domain(port_id))
            .collect())
    }

    async fn list_reservations(
        &self,
        statuses: &[ReservationStatus],
    ) -> Result<Vec<Reservation>, ApiError> {
        let filter = statuses
            .iter()
            .map(ReservationStatus::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let path = format!("/reservations?status={}", filter);
        let reservations: Vec<ReservationDto> = self.get_list(&path, "reservation").await?;
        Ok(reservations
            .into_iter()
            .map(ReservationDto::into_domain)
            .collect())
    }

    async fn create_slot(&self, port_id: &str, write: &SlotWrite) -> Result<Slot, ApiError> {
        let url = self.url(&format!("/ports/{}/slots", port_id));
        let dto: SlotDto = self
            .send_json(self.client.post(&url), &SlotWriteDto::from(write), "port", port_id)
            .await?;
        Ok(dto.into_domain(port_id))
    }

    async fn update_slot(&self, slot_id: &str, write: &SlotWrite) -> Result<Slot, ApiError> {
        let url = self.url(&format!("/slots/{}", slot_id));
        let dto: SlotDto = self
            .send_json(self.client.put(&url), &SlotWriteDto::from(write), "slot", slot_id)
            .await?;
        // Not every endpoint echoes the parent port id
        Ok(dto.into_domain(""))
    }

    async fn delete_slot(&self, slot_id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/slots/{}", slot_id));
        let response = self.authorized(self.client.delete(&url)).send().await?;
        if !response.status().is_success() {
            return Err(Self::reject(response, "slot", slot_id).await);
        }
        Ok(())
    }

    async fn update_station(&self, station: &Station) -> Result<Station, ApiError> {
        let url = self.url(&format!("/stations/{}", station.id));
        let dto: StationDto = self
            .send_json(
                self.client.put(&url),
                &StationWriteDto::from_domain(station),
                "station",
                &station.id,
            )
            .await?;
        Ok(dto.into_domain())
    }

    async fn confirm_payment(
        &self,
        confirmation: &PaymentConfirmation,
    ) -> Result<PaymentStatus, ApiError> {
        let url = self.url("/payments/vnpay/confirm");
        let dto: PaymentStatusDto = self
            .send_json(
                self.client.post(&url),
                &PaymentConfirmDto::from(confirmation),
                "payment",
                &confirmation.pending_transaction_id,
            )
            .await?;
        Ok(dto.into_domain())
    }
}

// ── Tests ──────────────────────────────────────────────────────
