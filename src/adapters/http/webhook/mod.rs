//! Webhook HTTP adapter - gateway-facing notification endpoint.
//!
//! Exposes the payment webhook pipeline via REST:
//! - `POST /webhooks/:gateway` - Receive a payment notification
//! - `GET /webhooks/:gateway` - Health probe

pub mod dto;
pub mod handlers;
pub mod routes;

// Export DTOs for external use
pub use dto::*;

// Export handlers state and router
pub use handlers::WebhookAppState;
pub use routes::webhook_router;
