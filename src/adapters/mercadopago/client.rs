//! Mercado Pago payment gateway adapter.
//!
//! Implements the `PaymentGateway` trait against the Mercado Pago REST API.
//! Only the payment lookup endpoint is used; webhook bodies carry nothing
//! trustworthy beyond the payment ID, so every reconciliation decision is
//! made from the record fetched here.
//!
//! # Configuration
//!
//! ```ignore
//! let config = MercadoPagoConfig::new(access_token);
//! let gateway = MercadoPagoClient::new(config);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::domain::payment::PaymentRecord;
use crate::ports::{GatewayError, PaymentGateway};

use super::types::PaymentResponse;

/// Per-request timeout for payment lookups. Kept well under the server's
/// request timeout so a slow gateway fails the lookup, not the delivery.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Mercado Pago API configuration.
#[derive(Clone)]
pub struct MercadoPagoConfig {
    /// Access token (APP_USR-... or TEST-...).
    access_token: SecretString,

    /// Base URL for the API (default: https://api.mercadopago.com).
    api_base_url: String,
}

impl MercadoPagoConfig {
    /// Create a new Mercado Pago configuration.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::new(access_token.into()),
            api_base_url: "https://api.mercadopago.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Mercado Pago payment gateway adapter.
///
/// Implements `PaymentGateway` for the Mercado Pago payments API.
pub struct MercadoPagoClient {
    config: MercadoPagoConfig,
    http_client: reqwest::Client,
}

impl MercadoPagoClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MercadoPagoConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }
}

#[async_trait]
impl PaymentGateway for MercadoPagoClient {
    async fn fetch_payment(&self, payment_id: &str) -> Result<PaymentRecord, GatewayError> {
        let url = format!("{}/v1/payments/{}", self.config.api_base_url, payment_id);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(self.config.access_token.expose_secret())
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(
                payment_id = %payment_id,
                status = status.as_u16(),
                error = %error_text,
                "Mercado Pago payment lookup failed"
            );
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let payment: PaymentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        Ok(payment.into_record())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_production_api() {
        let config = MercadoPagoConfig::new("TEST-1234567890");
        assert_eq!(config.api_base_url, "https://api.mercadopago.com");
    }

    #[test]
    fn config_base_url_can_be_overridden() {
        let config =
            MercadoPagoConfig::new("TEST-1234567890").with_base_url("http://localhost:9090");
        assert_eq!(config.api_base_url, "http://localhost:9090");
    }

    #[test]
    fn config_does_not_leak_token_in_debug() {
        let config = MercadoPagoConfig::new("APP_USR-secret-token");
        let debug = format!("{:?}", config.access_token);
        assert!(!debug.contains("secret-token"));
    }
}
