//! Payment confirmation outcome

/// Backend verdict on a payment-return exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Succeeded,
    Failed,
    /// The backend answered with a status this client does not know
    Unknown(String),
}

impl std::fmt::Display for PaymentOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
            Self::Unknown(raw) => write!(f, "unknown ({})", raw),
        }
    }
}

/// Result of confirming a gateway return with the backend
#[derive(Debug, Clone)]
pub struct PaymentStatus {
    pub outcome: PaymentOutcome,
    /// Backend-provided detail, when present
    pub message: Option<String>,
    /// Backend transaction identity, when present
    pub transaction_id: Option<String>,
}

impl PaymentStatus {
    /// Map the backend's raw status string to an outcome.
    pub fn from_raw(
        status: &str,
        message: Option<String>,
        transaction_id: Option<String>,
    ) -> Self {
        let outcome = match status.to_ascii_lowercase().as_str() {
            "success" | "succeeded" | "paid" => PaymentOutcome::Succeeded,
            "failed" | "failure" => PaymentOutcome::Failed,
            other => PaymentOutcome::Unknown(other.to_string()),
        };
        Self {
            outcome,
            message,
            transaction_id,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
