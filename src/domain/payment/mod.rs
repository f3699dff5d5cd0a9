//! Payment domain module.
//!
//! Models the authoritative payment data fetched from the gateway API.
//!
//! # Module Structure
//!
//! - `payment_record` - PaymentRecord snapshot, status enum, fee math

mod payment_record;

pub use payment_record::{FeeDetail, GatewayPaymentStatus, PaymentRecord};
