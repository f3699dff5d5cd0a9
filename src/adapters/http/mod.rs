//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod webhook;

// Re-export key types for convenience
pub use webhook::webhook_router;
pub use webhook::WebhookAppState;
