//! Voucher lifecycle and payment status enums.
//!
//! Transitions between these states are enforced by the voucher store's
//! conditional updates, not in memory: activation only ever moves a
//! voucher out of `Pending`, and the database row is the arbiter of
//! which concurrent writer wins.

use serde::{Deserialize, Serialize};

/// Gift voucher lifecycle status.
///
/// Represents where a voucher sits between purchase and redemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherStatus {
    /// Created at checkout, payment not yet confirmed.
    /// Not redeemable and not emailed to anyone.
    Pending,

    /// Payment confirmed. The voucher is live and redeemable
    /// until its expiry date.
    Active,

    /// Validity window elapsed without redemption.
    Expired,

    /// Withdrawn before activation (refund, abuse, manual action).
    Cancelled,
}

impl VoucherStatus {
    /// Returns true if the voucher is still waiting on payment.
    pub fn is_pending(&self) -> bool {
        matches!(self, VoucherStatus::Pending)
    }

    /// Returns true if the voucher can currently be redeemed.
    pub fn is_active(&self) -> bool {
        matches!(self, VoucherStatus::Active)
    }
}

/// Payment progress recorded alongside the voucher.
///
/// Tracks the gateway outcome separately from the voucher lifecycle:
/// a failed payment marks the payment as failed while the voucher
/// itself stays pending, so a later retry can still activate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// No settled gateway outcome yet.
    Pending,

    /// Gateway approved the payment; the voucher was activated.
    Completed,

    /// Gateway rejected or cancelled the payment attempt.
    Failed,
}

impl PaymentStatus {
    /// Returns true if the gateway approved the payment.
    pub fn is_completed(&self) -> bool {
        matches!(self, PaymentStatus::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_voucher_is_not_active() {
        let status = VoucherStatus::Pending;
        assert!(status.is_pending());
        assert!(!status.is_active());
    }

    #[test]
    fn active_voucher_is_not_pending() {
        let status = VoucherStatus::Active;
        assert!(status.is_active());
        assert!(!status.is_pending());
    }

    #[test]
    fn expired_and_cancelled_are_neither_pending_nor_active() {
        for status in [VoucherStatus::Expired, VoucherStatus::Cancelled] {
            assert!(!status.is_pending());
            assert!(!status.is_active());
        }
    }

    #[test]
    fn voucher_status_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&VoucherStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&VoucherStatus::Active).unwrap(),
            "\"active\""
        );
    }

    #[test]
    fn voucher_status_deserializes_from_snake_case() {
        let status: VoucherStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, VoucherStatus::Cancelled);
    }

    #[test]
    fn payment_status_completed_check() {
        assert!(PaymentStatus::Completed.is_completed());
        assert!(!PaymentStatus::Pending.is_completed());
        assert!(!PaymentStatus::Failed.is_completed());
    }

    #[test]
    fn payment_status_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Completed).unwrap(),
            "\"completed\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Failed).unwrap(),
            "\"failed\""
        );
    }
}
