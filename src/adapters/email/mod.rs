//! Email adapters - Confirmation email delivery.
//!
//! Implements the `VoucherMailer` port:
//! - `ResendMailer` - Delivery via the Resend HTTP API
//! - `DisabledMailer` - No-op fallback when email is not configured

mod disabled_mailer;
mod resend_mailer;

pub use disabled_mailer::DisabledMailer;
pub use resend_mailer::{ResendConfig, ResendMailer};
