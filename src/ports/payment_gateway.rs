//! Payment gateway port for authoritative payment lookups.
//!
//! Defines the contract for fetching payment state from the payment
//! provider's API (e.g., Mercado Pago). Webhook bodies only carry a
//! payment ID hint; the record returned here is what reconciliation
//! decisions are made from.
//!
//! # Design
//!
//! - **Read-only**: Reconciliation never mutates gateway state
//! - **Authoritative**: Fields in the fetched record override anything
//!   claimed in a webhook body
//! - **Retry-aware**: Errors report whether a retried delivery of the
//!   same webhook could plausibly succeed

use crate::domain::payment::PaymentRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from payment gateway lookups.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Request never produced an HTTP response (DNS, connect, timeout).
    #[error("Gateway request failed: {0}")]
    Network(String),

    /// Gateway answered with a non-success status code.
    #[error("Gateway returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Gateway answered 2xx but the body was not a decodable payment.
    #[error("Gateway response could not be decoded: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Whether a later redelivery of the same webhook could succeed.
    ///
    /// Network failures and gateway-side 5xx responses are transient.
    /// 4xx responses and decode failures will repeat identically.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Network(_) => true,
            GatewayError::Api { status, .. } => *status >= 500,
            GatewayError::Decode(_) => false,
        }
    }
}

/// Gateway port for fetching payments by provider ID.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Fetch the current state of a payment from the gateway.
    ///
    /// `payment_id` is the provider's payment identifier as it appeared
    /// in the webhook notification (already normalized to a string).
    ///
    /// # Errors
    ///
    /// - `Network` if no response was received
    /// - `Api` on non-2xx responses, including 404 for unknown payments
    /// - `Decode` if the response body is not a valid payment
    async fn fetch_payment(&self, payment_id: &str) -> Result<PaymentRecord, GatewayError>;
}
