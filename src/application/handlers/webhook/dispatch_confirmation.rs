//! DispatchConfirmationHandler - Sends the confirmation email pair after activation.

use std::sync::Arc;

use crate::domain::foundation::VoucherId;
use crate::ports::{DeliveryReport, DeliveryStatus, GiftCardEmail, VoucherMailer, VoucherStore};

/// Handler that dispatches the post-activation emails.
///
/// Loads a fresh voucher snapshot (activation has already stamped payment
/// fields onto it), derives the display content, and hands delivery to the
/// mailer. Nothing in here can fail the activation: every problem is
/// logged and swallowed.
#[derive(Clone)]
pub struct DispatchConfirmationHandler {
    store: Arc<dyn VoucherStore>,
    mailer: Arc<dyn VoucherMailer>,
}

impl DispatchConfirmationHandler {
    pub fn new(store: Arc<dyn VoucherStore>, mailer: Arc<dyn VoucherMailer>) -> Self {
        Self { store, mailer }
    }

    /// Send both confirmation emails for an activated voucher.
    ///
    /// Returns `None` when the voucher could not be loaded; otherwise the
    /// per-recipient delivery report, already logged.
    pub async fn handle(&self, voucher_id: VoucherId) -> Option<DeliveryReport> {
        let voucher = match self.store.find_by_id(&voucher_id).await {
            Ok(Some(voucher)) => voucher,
            Ok(None) => {
                tracing::warn!(
                    voucher_id = %voucher_id,
                    "Voucher disappeared before email dispatch"
                );
                return None;
            }
            Err(e) => {
                tracing::warn!(
                    voucher_id = %voucher_id,
                    error = %e,
                    "Could not load voucher for email dispatch"
                );
                return None;
            }
        };

        let email = GiftCardEmail::from_voucher(&voucher);
        let report = self.mailer.send_gift_card_emails(&email).await;

        log_delivery(&voucher_id, "purchaser", &email.purchaser_email, &report.purchaser);
        log_delivery(&voucher_id, "recipient", &email.recipient_email, &report.recipient);

        Some(report)
    }
}

fn log_delivery(voucher_id: &VoucherId, slot: &str, address: &str, status: &DeliveryStatus) {
    match status {
        DeliveryStatus::Sent => {
            tracing::info!(
                voucher_id = %voucher_id,
                slot = slot,
                address = %address,
                "Confirmation email sent"
            );
        }
        DeliveryStatus::Failed(reason) => {
            tracing::warn!(
                voucher_id = %voucher_id,
                slot = slot,
                address = %address,
                reason = %reason,
                "Confirmation email failed"
            );
        }
    }
}
