//! Voucher domain module.
//!
//! Handles the gift voucher lifecycle, payment outcome tracking, and
//! customer-facing display derivation.
//!
//! # Module Structure
//!
//! - `voucher` - Voucher aggregate entity and activation record
//! - `status` - VoucherStatus and PaymentStatus enums
//! - `display` - Presentation derivation (titles, colors, formatted amounts)

mod display;
mod status;
mod voucher;

pub use display::{format_amount_cents, template_style, TemplateStyle, VoucherPresentation};
pub use status::{PaymentStatus, VoucherStatus};
pub use voucher::{ActivationRecord, Voucher};
