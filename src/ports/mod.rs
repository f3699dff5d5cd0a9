//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `VoucherStore` - Voucher lookup and compare-and-set payment transitions
//!
//! ## Integration Ports
//!
//! - `PaymentGateway` - Authoritative payment lookups at the provider API
//! - `VoucherMailer` - Best-effort confirmation email dispatch

mod payment_gateway;
mod voucher_mailer;
mod voucher_store;

pub use payment_gateway::{GatewayError, PaymentGateway};
pub use voucher_mailer::{
    DeliveryReport, DeliveryStatus, GiftCardEmail, VoucherMailer,
};
pub use voucher_store::{StoreError, VoucherStore};
