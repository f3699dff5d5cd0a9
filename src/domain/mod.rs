//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps)
//! - `voucher` - Gift voucher aggregate, statuses, display derivation
//! - `payment` - Authoritative gateway payment model and fee math
//! - `webhook` - Notification envelope and signature verification

pub mod foundation;
pub mod payment;
pub mod voucher;
pub mod webhook;
