//! Axum router configuration for webhook endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{receive_webhook, webhook_health, WebhookAppState};

/// Create the webhook routes.
///
/// # Routes
///
/// - `POST /:gateway` - Receive a payment notification delivery
/// - `GET /:gateway` - Health probe for endpoint configuration
pub fn webhook_routes() -> Router<WebhookAppState> {
    Router::new().route("/:gateway", post(receive_webhook).get(webhook_health))
}

/// Create the complete webhook module router.
///
/// Suitable for mounting at `/webhooks`.
pub fn webhook_router() -> Router<WebhookAppState> {
    webhook_routes()
}
