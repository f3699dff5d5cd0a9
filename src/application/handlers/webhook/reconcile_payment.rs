//! ReconcilePaymentHandler - Applies an authoritative payment record to its voucher.

use std::sync::Arc;

use crate::domain::foundation::VoucherId;
use crate::domain::payment::PaymentRecord;
use crate::domain::voucher::ActivationRecord;
use crate::ports::{StoreError, VoucherStore};

/// Why a payment produced no voucher transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Payment carries no external reference.
    MissingReference,

    /// External reference does not name a voucher ID.
    UnparsableReference(String),

    /// No voucher with the referenced ID exists.
    UnknownVoucher(VoucherId),

    /// Payment status requires no transition (pending, refunded, ...).
    NotActionable(String),
}

/// Outcome of applying one payment to the voucher it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// This call won the activation; confirmation emails should follow.
    Activated { voucher_id: VoucherId },

    /// The voucher had already left pending; nothing changed.
    AlreadySettled { voucher_id: VoucherId },

    /// Payment failure recorded; the voucher itself stays pending.
    MarkedFailed { voucher_id: VoucherId },

    /// Payment could not be tied to an actionable voucher.
    Ignored(IgnoreReason),
}

/// Handler that reconciles gateway payment state into voucher state.
///
/// Works exclusively from the fetched payment record, never from webhook
/// payload claims. All writes go through the store's conditional updates,
/// so redelivered and concurrent notifications settle to one winner.
pub struct ReconcilePaymentHandler {
    store: Arc<dyn VoucherStore>,
}

impl ReconcilePaymentHandler {
    pub fn new(store: Arc<dyn VoucherStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, payment: &PaymentRecord) -> Result<TransitionOutcome, StoreError> {
        // 1. Resolve the voucher from the payment's external reference
        let Some(reference) = payment.external_reference.as_deref() else {
            tracing::info!(
                payment_id = %payment.id,
                "Payment carries no external reference; nothing to reconcile"
            );
            return Ok(TransitionOutcome::Ignored(IgnoreReason::MissingReference));
        };

        let voucher_id: VoucherId = match reference.parse() {
            Ok(id) => id,
            Err(_) => {
                tracing::warn!(
                    payment_id = %payment.id,
                    reference = %reference,
                    "External reference is not a voucher ID; ignoring"
                );
                return Ok(TransitionOutcome::Ignored(IgnoreReason::UnparsableReference(
                    reference.to_string(),
                )));
            }
        };

        if self.store.find_by_id(&voucher_id).await?.is_none() {
            tracing::warn!(
                payment_id = %payment.id,
                voucher_id = %voucher_id,
                "Payment references an unknown voucher; ignoring orphaned notification"
            );
            return Ok(TransitionOutcome::Ignored(IgnoreReason::UnknownVoucher(
                voucher_id,
            )));
        }

        // 2. Approved payments activate; exactly one delivery wins the guard
        if payment.status.is_approved() {
            let record = ActivationRecord::from_payment(payment);
            let activated = self.store.activate_if_pending(&voucher_id, &record).await?;

            if activated {
                tracing::info!(
                    voucher_id = %voucher_id,
                    payment_id = %payment.id,
                    fee_cents = ?record.fee_cents,
                    "Voucher activated"
                );
                return Ok(TransitionOutcome::Activated { voucher_id });
            }

            tracing::info!(
                voucher_id = %voucher_id,
                payment_id = %payment.id,
                "Voucher already settled; duplicate delivery absorbed"
            );
            return Ok(TransitionOutcome::AlreadySettled { voucher_id });
        }

        // 3. Definitive failures mark the payment failed, voucher stays pending
        if payment.status.is_failure() {
            let marked = self
                .store
                .mark_payment_failed_if_pending(&voucher_id)
                .await?;

            if marked {
                tracing::info!(
                    voucher_id = %voucher_id,
                    payment_id = %payment.id,
                    status = payment.status.as_str(),
                    status_detail = ?payment.status_detail,
                    "Payment failed; voucher remains pending for retry"
                );
                return Ok(TransitionOutcome::MarkedFailed { voucher_id });
            }
            return Ok(TransitionOutcome::AlreadySettled { voucher_id });
        }

        // 4. Everything else (pending, in_process, refunds) is not an
        //    activation-relevant event
        tracing::debug!(
            voucher_id = %voucher_id,
            payment_id = %payment.id,
            status = payment.status.as_str(),
            "Payment status requires no voucher transition"
        );
        Ok(TransitionOutcome::Ignored(IgnoreReason::NotActionable(
            payment.status.as_str().to_string(),
        )))
    }
}
