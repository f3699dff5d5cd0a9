//! Mercado Pago adapters - Payment gateway API integration.
//!
//! Implements the `PaymentGateway` port against the Mercado Pago REST API:
//! - `MercadoPagoClient` - Authoritative payment lookups with bearer auth
//! - `PaymentResponse` - API payload mapped into domain payment records

mod client;
mod types;

pub use client::{MercadoPagoClient, MercadoPagoConfig};
pub use types::{FeeDetailResponse, PaymentResponse};
