//! Port domain entity

use rust_decimal::Decimal;

use crate::domain::slot::Slot;
use crate::shared::errors::DomainError;

/// Electrical connector type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    Ac,
    Dc,
    DcUltra,
}

impl PortKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ac => "AC",
            Self::Dc => "DC",
            Self::DcUltra => "DC_ULTRA",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "DC" => Self::Dc,
            "DC_ULTRA" => Self::DcUltra,
            _ => Self::Ac,
        }
    }
}

impl std::fmt::Display for PortKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Port status as persisted by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortStatus {
    Available,
    InUse,
    Inactive,
    Active,
    /// Unrecognized raw value, passed through
    Other(String),
}

impl PortStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "available" => Self::Available,
            "in_use" => Self::InUse,
            "inactive" => Self::Inactive,
            "active" => Self::Active,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => "available",
            Self::InUse => "in_use",
            Self::Inactive => "inactive",
            Self::Active => "active",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl std::fmt::Display for PortStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Charging speed class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeSpeed {
    Slow,
    Fast,
    Ultra,
}

impl ChargeSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Fast => "fast",
            Self::Ultra => "ultra",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "fast" => Self::Fast,
            "ultra" => Self::Ultra,
            _ => Self::Slow,
        }
    }
}

impl std::fmt::Display for ChargeSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Physical charging connector unit at a station
#[derive(Debug, Clone)]
pub struct Port {
    pub id: String,
    pub kind: PortKind,
    pub status: PortStatus,
    /// Rated power in kW, must be positive
    pub power_kw: Decimal,
    /// Price per kWh in the network currency, must be positive
    pub price_per_kwh: Decimal,
    pub speed: ChargeSpeed,
    /// Ordered slot collection. Empty until the per-port slot listing has
    /// been fetched (the station listing embeds ports without slots).
    pub slots: Vec<Slot>,
}

impl Port {
    pub fn new(
        id: impl Into<String>,
        kind: PortKind,
        status: PortStatus,
        power_kw: Decimal,
        price_per_kwh: Decimal,
        speed: ChargeSpeed,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            status,
            power_kw,
            price_per_kwh,
            speed,
            slots: Vec::new(),
        }
    }

    /// Client-side check mirroring the backend's range constraints.
    /// Runs before any mutation call so an invalid port never reaches
    /// the network.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.power_kw <= Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "power_kw must be positive (got {})",
                self.power_kw
            )));
        }
        if self.price_per_kwh <= Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "price_per_kwh must be positive (got {})",
                self.price_per_kwh
            )));
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
