//! Voucher mailer port for confirmation email dispatch.
//!
//! Defines the contract for sending the post-activation email pair:
//! a receipt to the purchaser and the gift card itself to the recipient.
//!
//! # Design
//!
//! - **Best-effort**: Delivery failures are reported per recipient in the
//!   returned report, never raised as errors. A lost email must not undo
//!   or retry an activation
//! - **Pre-rendered content**: The mailer receives display-ready strings;
//!   all derivation from voucher state happens in the domain layer
//! - **Self-gift aware**: When both addresses match, implementations send
//!   once and report that delivery for both slots

use crate::domain::foundation::VoucherId;
use crate::domain::voucher::{Voucher, VoucherPresentation};
use async_trait::async_trait;

/// Everything needed to render and address the confirmation emails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftCardEmail {
    /// Voucher the emails are about, for logging and redemption links.
    pub voucher_id: VoucherId,

    /// Purchaser name for the receipt salutation.
    pub purchaser_name: String,

    /// Address the receipt is sent to.
    pub purchaser_email: String,

    /// Recipient name for the gift card salutation.
    pub recipient_name: String,

    /// Address the gift card is sent to.
    pub recipient_email: String,

    /// Optional personal message from the purchaser, shown on the card.
    pub personal_message: Option<String>,

    /// Card title, custom or template default.
    pub title: String,

    /// Template accent color, e.g. "#db2777".
    pub color_hex: String,

    /// Face value as display text, e.g. "EUR 50.00".
    pub amount_display: String,

    /// Expiry date as display text, e.g. "2026-12-31".
    pub expires_display: String,

    /// Whole days of validity left.
    pub valid_days: i64,
}

impl GiftCardEmail {
    /// Build the email content for a voucher as of now.
    pub fn from_voucher(voucher: &Voucher) -> Self {
        let view = VoucherPresentation::from_voucher(voucher);
        Self {
            voucher_id: voucher.id,
            purchaser_name: voucher.purchaser_name.clone(),
            purchaser_email: voucher.purchaser_email.clone(),
            recipient_name: voucher.recipient_name.clone(),
            recipient_email: voucher.recipient_email.clone(),
            personal_message: voucher.personal_message.clone(),
            title: view.title,
            color_hex: view.color_hex,
            amount_display: view.amount_display,
            expires_display: view.expires_display,
            valid_days: view.valid_days,
        }
    }

    /// Whether purchaser and recipient are the same inbox.
    ///
    /// Addresses compare case-insensitively.
    pub fn is_self_gift(&self) -> bool {
        self.purchaser_email
            .eq_ignore_ascii_case(&self.recipient_email)
    }
}

/// Outcome of one email delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// The mail provider accepted the message.
    Sent,

    /// Delivery failed; the message describes why.
    Failed(String),
}

impl DeliveryStatus {
    /// Check if delivery succeeded.
    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryStatus::Sent)
    }
}

/// Per-recipient outcome of a confirmation dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Outcome of the receipt to the purchaser.
    pub purchaser: DeliveryStatus,

    /// Outcome of the gift card to the recipient.
    pub recipient: DeliveryStatus,
}

impl DeliveryReport {
    /// Report for a self-gift, where one send covers both slots.
    pub fn single(status: DeliveryStatus) -> Self {
        Self {
            purchaser: status.clone(),
            recipient: status,
        }
    }

    /// Check if both deliveries succeeded.
    pub fn all_sent(&self) -> bool {
        self.purchaser.is_sent() && self.recipient.is_sent()
    }
}

/// Mailer port for the activation confirmation email pair.
#[async_trait]
pub trait VoucherMailer: Send + Sync {
    /// Send the receipt and the gift card for an activated voucher.
    ///
    /// Infallible by contract: implementations fold every failure mode
    /// into the returned report.
    async fn send_gift_card_emails(&self, email: &GiftCardEmail) -> DeliveryReport;
}
