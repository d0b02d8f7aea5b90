//! # EVNet Staff Console
//!
//! Headless staff console for an EV-charging network. The network's
//! backend is an external collaborator reached only through its REST
//! API; this crate fetches, reconciles and mutates what that API owns.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core entities and the availability reconciliation logic
//! - **application**: Use-case services and the outbound gateway trait
//! - **infrastructure**: REST client and the in-memory gateway
//! - **config**: TOML configuration
//! - **shared**: Error taxonomy and validation helpers
//!
//! The centerpiece is the availability reconciler
//! ([`domain::availability::reconcile`]): slot records and live
//! reservations are fetched independently and can disagree, and a staff
//! edit must show up before the backend's reservation index has caught
//! up. The reconciler merges all three inputs into the per-slot statuses
//! the station overview screen renders.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export the main service surface for easy access
pub use application::{
    PaymentReturnService, PortOverview, SlotEdit, StationDirectory, StationOverviewService,
};
pub use domain::{reconcile, DisplaySlot, OverrideMap, PortDisplayStatus};
pub use infrastructure::{ApiClient, InMemoryGateway};
pub use shared::{ApiError, AppError, DomainError};
