//! Payment gateway configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment gateway configuration (Mercado Pago)
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Mercado Pago access token
    pub access_token: String,

    /// Webhook signing secret; verification is skipped when unset
    pub webhook_secret: Option<String>,

    /// Base URL of the Mercado Pago API
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl GatewayConfig {
    /// Check if using a Mercado Pago test credential
    pub fn is_test_mode(&self) -> bool {
        self.access_token.starts_with("TEST-")
    }

    /// Check if signature verification is enabled
    pub fn verifies_signatures(&self) -> bool {
        self.webhook_secret.is_some()
    }

    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.access_token.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_ACCESS_TOKEN"));
        }

        // Verify token prefix for safety
        if !self.access_token.starts_with("APP_USR-") && !self.access_token.starts_with("TEST-") {
            return Err(ValidationError::InvalidAccessToken);
        }

        if let Some(secret) = &self.webhook_secret {
            if secret.is_empty() {
                return Err(ValidationError::MissingRequired("GATEWAY_WEBHOOK_SECRET"));
            }
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidGatewayUrl);
        }

        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            webhook_secret: None,
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.mercadopago.com".to_string()
}
