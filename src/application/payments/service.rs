//! Payment-return exchange
//!
//! The return page only proves what the gateway redirected back; the
//! backend owns the secure-hash verification and the pending
//! transaction record. The pending-transaction id is an explicit
//! parameter carried through the redirect context, never read from
//! ambient storage.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::gateway::{NetworkGateway, PaymentConfirmation};
use crate::domain::payment::PaymentStatus;
use crate::shared::errors::AppError;

use super::vnpay::VnpayReturn;

pub struct PaymentReturnService {
    gateway: Arc<dyn NetworkGateway>,
}

impl PaymentReturnService {
    pub fn new(gateway: Arc<dyn NetworkGateway>) -> Self {
        Self { gateway }
    }

    /// Exchange a gateway return URL plus the pending-transaction id for
    /// the backend's payment verdict.
    pub async fn confirm(
        &self,
        return_url: &str,
        pending_transaction_id: &str,
    ) -> Result<PaymentStatus, AppError> {
        let gateway_return = VnpayReturn::parse(return_url)?;

        if !gateway_return.gateway_approved() {
            // Still exchanged with the backend: only it can tell a
            // declined card from a tampered callback.
            warn!(
                response_code = %gateway_return.response_code,
                txn_ref = %gateway_return.txn_ref,
                "Gateway reported a non-approved response code"
            );
        }

        let confirmation = PaymentConfirmation {
            pending_transaction_id: pending_transaction_id.to_string(),
            gateway_params: gateway_return.params,
        };

        let status = self.gateway.confirm_payment(&confirmation).await?;
        info!(
            txn_ref = %gateway_return.txn_ref,
            outcome = %status.outcome,
            "Payment return confirmed"
        );
        Ok(status)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentOutcome;
    use crate::infrastructure::memory::InMemoryGateway;
    use crate::shared::errors::DomainError;

    const RETURN_URL: &str = "https://portal.example/payment/return\
        ?vnp_ResponseCode=00&vnp_TxnRef=ORD-7&vnp_Amount=1200000";

    #[tokio::test]
    async fn confirms_with_the_backend_and_returns_its_verdict() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.set_payment_status(PaymentStatus::from_raw(
            "success",
            Some("paid".into()),
            Some("tx-99".into()),
        ));

        let service = PaymentReturnService::new(gateway.clone());
        let status = service.confirm(RETURN_URL, "pend-123").await.unwrap();

        assert_eq!(status.outcome, PaymentOutcome::Succeeded);
        assert_eq!(status.transaction_id.as_deref(), Some("tx-99"));

        let confirmation = gateway.last_payment_confirmation().unwrap();
        assert_eq!(confirmation.pending_transaction_id, "pend-123");
        assert_eq!(
            confirmation.gateway_params.get("vnp_TxnRef").map(String::as_str),
            Some("ORD-7")
        );
    }

    #[tokio::test]
    async fn invalid_return_url_never_reaches_the_backend() {
        let gateway = Arc::new(InMemoryGateway::new());
        let service = PaymentReturnService::new(gateway.clone());

        let result = service
            .confirm("https://portal.example/payment/return?foo=1", "pend-123")
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::Validation(_)))
        ));
        assert!(gateway.last_payment_confirmation().is_none());
    }

    #[tokio::test]
    async fn declined_gateway_code_is_still_exchanged() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.set_payment_status(PaymentStatus::from_raw("failed", None, None));

        let url = RETURN_URL.replace("vnp_ResponseCode=00", "vnp_ResponseCode=24");
        let service = PaymentReturnService::new(gateway.clone());
        let status = service.confirm(&url, "pend-123").await.unwrap();

        assert_eq!(status.outcome, PaymentOutcome::Failed);
        assert!(gateway.last_payment_confirmation().is_some());
    }
}
