//! VNPay return-URL parsing
//!
//! After checkout the gateway redirects the customer back with the
//! transaction outcome encoded as `vnp_*` query parameters. The
//! parameters are consumed as-is and forwarded to the backend for
//! verification. The secure-hash check is the backend's job, not this
//! client's.

use std::collections::BTreeMap;

use url::Url;

use crate::shared::errors::DomainError;

/// Response code VNPay uses for an approved transaction.
const APPROVED_CODE: &str = "00";

/// Parsed gateway callback parameters from a return URL
#[derive(Debug, Clone)]
pub struct VnpayReturn {
    pub response_code: String,
    pub txn_ref: String,
    /// Every `vnp_*` parameter as received, response code and txn ref
    /// included, ready to be forwarded verbatim
    pub params: BTreeMap<String, String>,
}

impl VnpayReturn {
    /// Lift the `vnp_*` parameters off a return URL.
    ///
    /// A missing `vnp_ResponseCode` or `vnp_TxnRef` is a validation
    /// error raised before any network call.
    pub fn parse(return_url: &str) -> Result<Self, DomainError> {
        let url = Url::parse(return_url)
            .map_err(|e| DomainError::Validation(format!("invalid return URL: {}", e)))?;

        let params: BTreeMap<String, String> = url
            .query_pairs()
            .filter(|(key, _)| key.starts_with("vnp_"))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let response_code = params
            .get("vnp_ResponseCode")
            .cloned()
            .ok_or_else(|| DomainError::Validation("return URL has no vnp_ResponseCode".into()))?;
        let txn_ref = params
            .get("vnp_TxnRef")
            .cloned()
            .ok_or_else(|| DomainError::Validation("return URL has no vnp_TxnRef".into()))?;

        Ok(Self {
            response_code,
            txn_ref,
            params,
        })
    }

    /// Whether the gateway itself declared the transaction approved.
    /// Informational only; the backend confirmation is authoritative.
    pub fn gateway_approved(&self) -> bool {
        self.response_code == APPROVED_CODE
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const RETURN_URL: &str = "https://portal.example/payment/return\
        ?vnp_Amount=35000000\
        &vnp_ResponseCode=00\
        &vnp_TxnRef=ORD-2025-061\
        &vnp_TransactionNo=14422574\
        &vnp_OrderInfo=Thanh%20toan%20don%20hang";

    #[test]
    fn parses_all_vnp_parameters() {
        let ret = VnpayReturn::parse(RETURN_URL).unwrap();
        assert_eq!(ret.response_code, "00");
        assert_eq!(ret.txn_ref, "ORD-2025-061");
        assert_eq!(ret.params.len(), 5);
        assert_eq!(
            ret.params.get("vnp_OrderInfo").map(String::as_str),
            Some("Thanh toan don hang")
        );
    }

    #[test]
    fn non_vnp_parameters_are_dropped() {
        let url = format!("{}&utm_source=email&session=abc", RETURN_URL);
        let ret = VnpayReturn::parse(&url).unwrap();
        assert!(!ret.params.contains_key("utm_source"));
        assert!(!ret.params.contains_key("session"));
    }

    #[test]
    fn missing_response_code_is_rejected() {
        let err = VnpayReturn::parse("https://portal.example/payment/return?vnp_TxnRef=x")
            .unwrap_err();
        assert!(err.to_string().contains("vnp_ResponseCode"));
    }

    #[test]
    fn missing_txn_ref_is_rejected() {
        let err = VnpayReturn::parse("https://portal.example/payment/return?vnp_ResponseCode=00")
            .unwrap_err();
        assert!(err.to_string().contains("vnp_TxnRef"));
    }

    #[test]
    fn unparsable_url_is_rejected() {
        assert!(VnpayReturn::parse("not a url").is_err());
    }

    #[test]
    fn gateway_approval_is_code_00() {
        let ret = VnpayReturn::parse(RETURN_URL).unwrap();
        assert!(ret.gateway_approved());

        let declined = RETURN_URL.replace("vnp_ResponseCode=00", "vnp_ResponseCode=24");
        let ret = VnpayReturn::parse(&declined).unwrap();
        assert!(!ret.gateway_approved());
    }
}
