//! Voucher aggregate entity.
//!
//! The Voucher aggregate represents a purchased gift card from checkout
//! through activation to redemption or expiry.
//!
//! # Design Decisions
//!
//! - **Money in cents**: All monetary values stored as i64 cents (not floats)
//! - **Activation via the store**: The aggregate carries no transition methods;
//!   the compare-and-set update in the voucher store is the single place a
//!   voucher becomes active, which is what makes webhook redelivery safe
//! - **External reference**: The voucher id is handed to the gateway as
//!   `external_reference` at checkout and comes back on every payment

use crate::domain::foundation::{Timestamp, VoucherId};
use crate::domain::payment::PaymentRecord;
use serde::{Deserialize, Serialize};

use super::{PaymentStatus, VoucherStatus};

/// Voucher aggregate - a single purchased gift card.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `activated_at` is set if and only if the voucher left `Pending`
///   through payment approval
/// - `payment_fee_cents` is only present once a payment settled with a
///   non-zero gateway fee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    /// Unique identifier, also used as the gateway external reference.
    pub id: VoucherId,

    /// Current lifecycle status.
    pub status: VoucherStatus,

    /// Gateway payment outcome recorded for this voucher.
    pub payment_status: PaymentStatus,

    /// Gateway-side payment id, recorded at activation.
    pub payment_provider_id: Option<String>,

    /// Total gateway fee in cents, recorded at activation when non-zero.
    pub payment_fee_cents: Option<i64>,

    /// Face value of the voucher in cents.
    pub amount_cents: i64,

    /// ISO 4217 currency code, e.g. "ARS" or "EUR".
    pub currency: String,

    /// Visual template the purchaser picked at checkout.
    pub template_name: String,

    /// Optional custom title overriding the template's default.
    pub custom_title: Option<String>,

    /// Name of the person who paid.
    pub purchaser_name: String,

    /// Email of the person who paid.
    pub purchaser_email: String,

    /// Name of the gift recipient.
    pub recipient_name: String,

    /// Email of the gift recipient.
    pub recipient_email: String,

    /// Optional personal message printed on the voucher.
    pub personal_message: Option<String>,

    /// Date after which the voucher can no longer be redeemed.
    pub expires_at: Timestamp,

    /// When the voucher was activated (payment approved).
    pub activated_at: Option<Timestamp>,

    /// When the gateway reported the payment settled.
    pub payment_completed_at: Option<Timestamp>,

    /// When the voucher was created at checkout.
    pub created_at: Timestamp,

    /// When the voucher row was last updated.
    pub updated_at: Timestamp,
}

impl Voucher {
    /// Check if this voucher is still waiting for its payment to settle.
    pub fn is_awaiting_payment(&self) -> bool {
        self.status.is_pending() && !self.payment_status.is_completed()
    }

    /// Check if the redemption window has closed as of `now`.
    pub fn is_expired_at(&self, now: &Timestamp) -> bool {
        self.expires_at.is_before(now)
    }
}

/// Values written onto a voucher row by a successful activation.
///
/// Built from the authoritative payment fetched from the gateway, never
/// from webhook payload fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationRecord {
    /// Gateway payment id that settled this voucher.
    pub payment_id: String,

    /// Total gateway fee in cents; `None` when the fee sums to zero.
    pub fee_cents: Option<i64>,

    /// Instant recorded as both activation and payment completion time.
    pub completed_at: Timestamp,
}

impl ActivationRecord {
    /// Create an activation record, normalizing a zero fee to `None`.
    pub fn new(payment_id: impl Into<String>, fee_cents: i64) -> Self {
        Self {
            payment_id: payment_id.into(),
            fee_cents: (fee_cents != 0).then_some(fee_cents),
            completed_at: Timestamp::now(),
        }
    }

    /// Build the record from an authoritative gateway payment.
    pub fn from_payment(payment: &PaymentRecord) -> Self {
        Self::new(payment.id.clone(), payment.fee_total_cents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{FeeDetail, GatewayPaymentStatus};

    fn pending_voucher() -> Voucher {
        let now = Timestamp::now();
        Voucher {
            id: VoucherId::new(),
            status: VoucherStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_provider_id: None,
            payment_fee_cents: None,
            amount_cents: 5000,
            currency: "EUR".to_string(),
            template_name: "birthday".to_string(),
            custom_title: None,
            purchaser_name: "Ana".to_string(),
            purchaser_email: "ana@example.com".to_string(),
            recipient_name: "Luis".to_string(),
            recipient_email: "luis@example.com".to_string(),
            personal_message: Some("Feliz cumple!".to_string()),
            expires_at: now.add_days(365),
            activated_at: None,
            payment_completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn pending_voucher_is_awaiting_payment() {
        let voucher = pending_voucher();
        assert!(voucher.is_awaiting_payment());
    }

    #[test]
    fn active_voucher_is_not_awaiting_payment() {
        let mut voucher = pending_voucher();
        voucher.status = VoucherStatus::Active;
        voucher.payment_status = PaymentStatus::Completed;
        assert!(!voucher.is_awaiting_payment());
    }

    #[test]
    fn expiry_check_uses_given_instant() {
        let voucher = pending_voucher();
        let now = Timestamp::now();
        assert!(!voucher.is_expired_at(&now));
        assert!(voucher.is_expired_at(&now.add_days(400)));
    }

    #[test]
    fn activation_record_keeps_nonzero_fee() {
        let record = ActivationRecord::new("12345", 125);
        assert_eq!(record.payment_id, "12345");
        assert_eq!(record.fee_cents, Some(125));
    }

    #[test]
    fn activation_record_normalizes_zero_fee_to_none() {
        let record = ActivationRecord::new("12345", 0);
        assert_eq!(record.fee_cents, None);
    }

    #[test]
    fn activation_record_from_payment_sums_fees() {
        let payment = PaymentRecord {
            id: "987654321".to_string(),
            status: GatewayPaymentStatus::Approved,
            status_detail: None,
            external_reference: Some(VoucherId::new().to_string()),
            transaction_amount: Some(50.0),
            fee_details: vec![
                FeeDetail {
                    fee_type: Some("mercadopago_fee".to_string()),
                    amount: 1.23,
                },
                FeeDetail {
                    fee_type: Some("financing_fee".to_string()),
                    amount: 0.02,
                },
            ],
        };

        let record = ActivationRecord::from_payment(&payment);
        assert_eq!(record.payment_id, "987654321");
        assert_eq!(record.fee_cents, Some(125));
    }
}
