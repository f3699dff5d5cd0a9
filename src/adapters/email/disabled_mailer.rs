//! No-op mailer for deployments without email configured.

use async_trait::async_trait;

use crate::ports::{DeliveryReport, DeliveryStatus, GiftCardEmail, VoucherMailer};

/// Mailer that drops every email and reports success.
///
/// Used when email dispatch is disabled by configuration, so activation
/// still works in environments without a Resend key (local development,
/// integration environments).
pub struct DisabledMailer;

#[async_trait]
impl VoucherMailer for DisabledMailer {
    async fn send_gift_card_emails(&self, email: &GiftCardEmail) -> DeliveryReport {
        tracing::info!(
            voucher_id = %email.voucher_id,
            "Email dispatch disabled; skipping confirmation emails"
        );
        DeliveryReport::single(DeliveryStatus::Sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::VoucherId;

    #[tokio::test]
    async fn disabled_mailer_reports_success() {
        let email = GiftCardEmail {
            voucher_id: VoucherId::new(),
            purchaser_name: "Ana".to_string(),
            purchaser_email: "ana@example.com".to_string(),
            recipient_name: "Luis".to_string(),
            recipient_email: "luis@example.com".to_string(),
            personal_message: None,
            title: "Gift Voucher".to_string(),
            color_hex: "#1f2937".to_string(),
            amount_display: "EUR 25.00".to_string(),
            expires_display: "2027-08-24".to_string(),
            valid_days: 365,
        };

        let report = DisabledMailer.send_gift_card_emails(&email).await;
        assert!(report.all_sent());
    }
}
