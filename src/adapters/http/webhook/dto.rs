//! Data transfer objects for webhook HTTP endpoints.

use axum::extract::Query;
use axum::http::Uri;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// Request DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// Query parameters on a webhook delivery.
///
/// The gateway appends the signed resource id as a literal `data.id`
/// query key. Parsed pair by pair rather than through a derived
/// extractor: a duplicated or malformed key must not reject the
/// delivery before it can be acknowledged.
#[derive(Debug, Clone, Default)]
pub struct WebhookQuery {
    /// Resource id the signature manifest is built over.
    pub data_id: Option<String>,
}

impl WebhookQuery {
    /// Read the query string of a delivery URI, tolerating anything a
    /// sender may have put there. Unparsable queries degrade to empty.
    pub fn from_uri(uri: &Uri) -> Self {
        Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map(|Query(pairs)| Self::from_pairs(pairs))
            .unwrap_or_default()
    }

    /// Fold decoded query pairs. The first `data.id` wins so a repeated
    /// key cannot displace the value the gateway signed.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            if key == "data.id" && query.data_id.is_none() {
                query.data_id = Some(value);
            }
        }
        query
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Response DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// Acknowledgment body for accepted deliveries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    /// Always true; the gateway only checks the status code.
    pub received: bool,
}

impl WebhookAck {
    pub fn ok() -> Self {
        Self { received: true }
    }
}

/// Error body for refused deliveries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookErrorResponse {
    /// Fixed message; rejection detail stays in the server logs.
    pub error: String,
}

impl WebhookErrorResponse {
    pub fn invalid_signature() -> Self {
        Self {
            error: "Invalid signature".to_string(),
        }
    }
}

/// Health probe response for webhook endpoint configuration checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Echo of the gateway path segment the probe hit.
    pub gateway: String,
    /// Current server time, RFC 3339.
    pub timestamp: String,
}
