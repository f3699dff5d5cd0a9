//! HTTP handlers for webhook endpoints.
//!
//! These handlers connect Axum routes to the application layer. They do
//! nothing beyond extraction and response mapping; every decision about
//! a delivery is made in `ProcessNotificationHandler`.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::webhook::{
    NotificationDisposition, ProcessNotificationCommand, ProcessNotificationHandler,
};
use crate::domain::foundation::Timestamp;
use crate::domain::webhook::WebhookSignatureVerifier;
use crate::ports::{PaymentGateway, VoucherMailer, VoucherStore};

use super::dto::{HealthResponse, WebhookAck, WebhookErrorResponse, WebhookQuery};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all webhook dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped
/// dependencies for efficient sharing across handlers.
#[derive(Clone)]
pub struct WebhookAppState {
    pub verifier: Arc<WebhookSignatureVerifier>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub store: Arc<dyn VoucherStore>,
    pub mailer: Arc<dyn VoucherMailer>,
}

impl WebhookAppState {
    /// Create the notification handler on demand from the shared state.
    pub fn process_notification_handler(&self) -> ProcessNotificationHandler {
        ProcessNotificationHandler::new(
            self.verifier.clone(),
            self.gateway.clone(),
            self.store.clone(),
            self.mailer.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /webhooks/:gateway - Receive one payment notification delivery.
///
/// Answers 200 for everything the pipeline absorbed and 401 only when
/// signature verification refused the delivery. The error body carries
/// a fixed message; rejection detail stays in the logs. The query string
/// is read leniently off the URI; a derived extractor would turn an
/// odd query into a 400 before this handler could acknowledge it.
pub async fn receive_webhook(
    State(state): State<WebhookAppState>,
    Path(gateway): Path<String>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    tracing::debug!(
        gateway = %gateway,
        bytes = body.len(),
        "Webhook delivery received"
    );

    let query = WebhookQuery::from_uri(&uri);

    let cmd = ProcessNotificationCommand {
        body: body.to_vec(),
        signature_header: header_str(&headers, "x-signature"),
        request_id: header_str(&headers, "x-request-id"),
        query_resource_id: query.data_id,
    };

    let handler = state.process_notification_handler();
    match handler.handle(cmd).await {
        NotificationDisposition::Rejected { .. } => (
            StatusCode::UNAUTHORIZED,
            Json(WebhookErrorResponse::invalid_signature()),
        )
            .into_response(),
        _ => (StatusCode::OK, Json(WebhookAck::ok())).into_response(),
    }
}

/// GET /webhooks/:gateway - Health probe for endpoint configuration.
///
/// Lets the gateway dashboard (and deploy checks) confirm the webhook
/// URL is routable without sending a real notification.
pub async fn webhook_health(Path(gateway): Path<String>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        gateway,
        timestamp: Timestamp::now().as_datetime().to_rfc3339(),
    })
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn header_str_reads_present_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("req-1"));

        assert_eq!(header_str(&headers, "x-request-id").as_deref(), Some("req-1"));
    }

    #[test]
    fn header_str_ignores_missing_and_non_utf8_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-signature", HeaderValue::from_bytes(b"\xff\xfe").unwrap());

        assert!(header_str(&headers, "x-request-id").is_none());
        assert!(header_str(&headers, "x-signature").is_none());
    }
}
