//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Voucher persistence over sqlx
//! - `mercadopago` - Payment gateway REST client
//! - `email` - Confirmation email delivery (Resend, or disabled)
//! - `http` - Axum endpoints exposed to the gateway

pub mod email;
pub mod http;
pub mod mercadopago;
pub mod postgres;

pub use email::{DisabledMailer, ResendConfig, ResendMailer};
pub use mercadopago::{MercadoPagoClient, MercadoPagoConfig};
pub use postgres::PostgresVoucherStore;
