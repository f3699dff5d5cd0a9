//! Voucher store port (payment reconciliation side).
//!
//! Defines the contract for loading vouchers and applying payment-driven
//! state transitions. Implementations handle the actual database operations.
//!
//! # Design
//!
//! - **Conditional writes**: Both transitions are compare-and-set on the
//!   stored status, so concurrent callers race safely
//! - **Boolean outcomes**: `false` from a transition means another caller
//!   (or an earlier delivery of the same webhook) won the race
//! - **No in-memory state machine**: The store's `WHERE status = 'pending'`
//!   guard is the single source of truth for who may transition
//!
//! # Example
//!
//! ```ignore
//! async fn settle(
//!     store: &dyn VoucherStore,
//!     id: &VoucherId,
//!     record: &ActivationRecord,
//! ) -> Result<bool, StoreError> {
//!     // Exactly one of N concurrent calls observes `true`.
//!     store.activate_if_pending(id, record).await
//! }
//! ```

use crate::domain::foundation::VoucherId;
use crate::domain::voucher::{ActivationRecord, Voucher};
use async_trait::async_trait;
use thiserror::Error;

/// Errors from voucher store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying database rejected or failed the operation.
    #[error("Database error: {0}")]
    Database(String),

    /// A stored row could not be mapped back into a domain voucher.
    #[error("Invalid voucher record: {0}")]
    InvalidRecord(String),
}

/// Store port for voucher persistence during payment reconciliation.
///
/// Implementations must ensure:
/// - Transitions only fire while the voucher is still `pending`
/// - Concurrent transition attempts resolve to exactly one winner
#[async_trait]
pub trait VoucherStore: Send + Sync {
    /// Find a voucher by its ID.
    ///
    /// Returns `None` if no voucher with that ID exists.
    ///
    /// # Errors
    ///
    /// - `Database` on connection or query failure
    /// - `InvalidRecord` if the stored row cannot be decoded
    async fn find_by_id(&self, id: &VoucherId) -> Result<Option<Voucher>, StoreError>;

    /// Activate a pending voucher, recording the payment that settled it.
    ///
    /// Sets status to `active`, payment status to `completed`, and stamps
    /// the activation details from `record`. Returns `true` if this call
    /// performed the transition, `false` if the voucher was not pending
    /// (already activated, cancelled, or missing).
    ///
    /// # Errors
    ///
    /// - `Database` on connection or query failure
    async fn activate_if_pending(
        &self,
        id: &VoucherId,
        record: &ActivationRecord,
    ) -> Result<bool, StoreError>;

    /// Record a failed payment against a pending voucher.
    ///
    /// Sets payment status to `failed` while leaving the voucher itself
    /// `pending`, so a later retried payment can still activate it.
    /// Returns `true` if this call performed the update, `false` if the
    /// voucher was not pending.
    ///
    /// # Errors
    ///
    /// - `Database` on connection or query failure
    async fn mark_payment_failed_if_pending(&self, id: &VoucherId) -> Result<bool, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn voucher_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn VoucherStore) {}
    }

    #[test]
    fn store_error_display() {
        let err = StoreError::Database("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));

        let err = StoreError::InvalidRecord("bad status 'actve'".to_string());
        assert!(err.to_string().contains("Invalid voucher record"));
    }
}
