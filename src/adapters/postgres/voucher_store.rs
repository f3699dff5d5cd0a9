//! PostgreSQL implementation of VoucherStore.
//!
//! Provides persistent voucher storage and the conditional status
//! transitions that make webhook reconciliation idempotent. Both
//! transitions guard on `status = 'pending'` in the UPDATE itself, so
//! the database decides every race.

use crate::domain::foundation::{Timestamp, VoucherId};
use crate::domain::voucher::{ActivationRecord, PaymentStatus, Voucher, VoucherStatus};
use crate::ports::{StoreError, VoucherStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the VoucherStore port.
///
/// Uses sqlx for type-safe database operations with connection pooling.
pub struct PostgresVoucherStore {
    pool: PgPool,
}

impl PostgresVoucherStore {
    /// Creates a new PostgresVoucherStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a voucher.
#[derive(Debug, sqlx::FromRow)]
struct VoucherRow {
    id: Uuid,
    status: String,
    payment_status: String,
    payment_provider_id: Option<String>,
    payment_fee_cents: Option<i64>,
    amount_cents: i64,
    currency: String,
    template_name: String,
    custom_title: Option<String>,
    purchaser_name: String,
    purchaser_email: String,
    recipient_name: String,
    recipient_email: String,
    personal_message: Option<String>,
    expires_at: DateTime<Utc>,
    activated_at: Option<DateTime<Utc>>,
    payment_completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<VoucherRow> for Voucher {
    type Error = StoreError;

    fn try_from(row: VoucherRow) -> Result<Self, Self::Error> {
        let status = parse_voucher_status(&row.status)?;
        let payment_status = parse_payment_status(&row.payment_status)?;

        Ok(Voucher {
            id: VoucherId::from_uuid(row.id),
            status,
            payment_status,
            payment_provider_id: row.payment_provider_id,
            payment_fee_cents: row.payment_fee_cents,
            amount_cents: row.amount_cents,
            currency: row.currency,
            template_name: row.template_name,
            custom_title: row.custom_title,
            purchaser_name: row.purchaser_name,
            purchaser_email: row.purchaser_email,
            recipient_name: row.recipient_name,
            recipient_email: row.recipient_email,
            personal_message: row.personal_message,
            expires_at: Timestamp::from_datetime(row.expires_at),
            activated_at: row.activated_at.map(Timestamp::from_datetime),
            payment_completed_at: row.payment_completed_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_voucher_status(s: &str) -> Result<VoucherStatus, StoreError> {
    match s.to_lowercase().as_str() {
        "pending" => Ok(VoucherStatus::Pending),
        "active" => Ok(VoucherStatus::Active),
        "expired" => Ok(VoucherStatus::Expired),
        "cancelled" => Ok(VoucherStatus::Cancelled),
        _ => Err(StoreError::InvalidRecord(format!(
            "Invalid voucher status value: {}",
            s
        ))),
    }
}

fn parse_payment_status(s: &str) -> Result<PaymentStatus, StoreError> {
    match s.to_lowercase().as_str() {
        "pending" => Ok(PaymentStatus::Pending),
        "completed" => Ok(PaymentStatus::Completed),
        "failed" => Ok(PaymentStatus::Failed),
        _ => Err(StoreError::InvalidRecord(format!(
            "Invalid payment status value: {}",
            s
        ))),
    }
}

fn voucher_status_to_string(status: &VoucherStatus) -> &'static str {
    match status {
        VoucherStatus::Pending => "pending",
        VoucherStatus::Active => "active",
        VoucherStatus::Expired => "expired",
        VoucherStatus::Cancelled => "cancelled",
    }
}

fn payment_status_to_string(status: &PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Pending => "pending",
        PaymentStatus::Completed => "completed",
        PaymentStatus::Failed => "failed",
    }
}

const VOUCHER_COLUMNS: &str = r#"
    id, status, payment_status, payment_provider_id, payment_fee_cents,
    amount_cents, currency, template_name, custom_title,
    purchaser_name, purchaser_email, recipient_name, recipient_email,
    personal_message, expires_at, activated_at, payment_completed_at,
    created_at, updated_at
"#;

#[async_trait]
impl VoucherStore for PostgresVoucherStore {
    async fn find_by_id(&self, id: &VoucherId) -> Result<Option<Voucher>, StoreError> {
        let query = format!("SELECT {} FROM vouchers WHERE id = $1", VOUCHER_COLUMNS);

        let row: Option<VoucherRow> = sqlx::query_as(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to find voucher: {}", e)))?;

        row.map(Voucher::try_from).transpose()
    }

    async fn activate_if_pending(
        &self,
        id: &VoucherId,
        record: &ActivationRecord,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE vouchers SET
                status = $2,
                payment_status = $3,
                payment_provider_id = $4,
                payment_fee_cents = $5,
                activated_at = $6,
                payment_completed_at = $6,
                updated_at = now()
            WHERE id = $1 AND status = $7
            "#,
        )
        .bind(id.as_uuid())
        .bind(voucher_status_to_string(&VoucherStatus::Active))
        .bind(payment_status_to_string(&PaymentStatus::Completed))
        .bind(&record.payment_id)
        .bind(record.fee_cents)
        .bind(record.completed_at.as_datetime())
        .bind(voucher_status_to_string(&VoucherStatus::Pending))
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to activate voucher: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_payment_failed_if_pending(&self, id: &VoucherId) -> Result<bool, StoreError> {
        // The voucher stays pending so a retried payment can still settle it.
        let result = sqlx::query(
            r#"
            UPDATE vouchers SET
                payment_status = $2,
                updated_at = now()
            WHERE id = $1 AND status = $3
            "#,
        )
        .bind(id.as_uuid())
        .bind(payment_status_to_string(&PaymentStatus::Failed))
        .bind(voucher_status_to_string(&VoucherStatus::Pending))
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Failed to mark payment failed: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_voucher_status_works_for_all_values() {
        assert_eq!(parse_voucher_status("pending").unwrap(), VoucherStatus::Pending);
        assert_eq!(parse_voucher_status("active").unwrap(), VoucherStatus::Active);
        assert_eq!(parse_voucher_status("expired").unwrap(), VoucherStatus::Expired);
        assert_eq!(parse_voucher_status("cancelled").unwrap(), VoucherStatus::Cancelled);
        assert_eq!(parse_voucher_status("ACTIVE").unwrap(), VoucherStatus::Active);
        assert_eq!(parse_voucher_status("Pending").unwrap(), VoucherStatus::Pending);
    }

    #[test]
    fn parse_voucher_status_rejects_invalid_values() {
        assert!(parse_voucher_status("redeemed").is_err());
        assert!(parse_voucher_status("").is_err());
    }

    #[test]
    fn parse_payment_status_works_for_all_values() {
        assert_eq!(parse_payment_status("pending").unwrap(), PaymentStatus::Pending);
        assert_eq!(parse_payment_status("completed").unwrap(), PaymentStatus::Completed);
        assert_eq!(parse_payment_status("failed").unwrap(), PaymentStatus::Failed);
    }

    #[test]
    fn parse_payment_status_rejects_invalid_values() {
        assert!(parse_payment_status("approved").is_err());
        assert!(parse_payment_status("").is_err());
    }

    #[test]
    fn roundtrip_voucher_status_conversion() {
        for status in [
            VoucherStatus::Pending,
            VoucherStatus::Active,
            VoucherStatus::Expired,
            VoucherStatus::Cancelled,
        ] {
            let s = voucher_status_to_string(&status);
            let parsed = parse_voucher_status(s).unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn roundtrip_payment_status_conversion() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Completed,
            PaymentStatus::Failed,
        ] {
            let s = payment_status_to_string(&status);
            let parsed = parse_payment_status(s).unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn row_conversion_maps_all_fields() {
        let now = Utc::now();
        let row = VoucherRow {
            id: Uuid::new_v4(),
            status: "pending".to_string(),
            payment_status: "pending".to_string(),
            payment_provider_id: None,
            payment_fee_cents: None,
            amount_cents: 2500,
            currency: "ARS".to_string(),
            template_name: "birthday".to_string(),
            custom_title: Some("Feliz cumple".to_string()),
            purchaser_name: "Ana".to_string(),
            purchaser_email: "ana@example.com".to_string(),
            recipient_name: "Luis".to_string(),
            recipient_email: "luis@example.com".to_string(),
            personal_message: None,
            expires_at: now,
            activated_at: None,
            payment_completed_at: None,
            created_at: now,
            updated_at: now,
        };

        let voucher = Voucher::try_from(row).unwrap();
        assert_eq!(voucher.status, VoucherStatus::Pending);
        assert_eq!(voucher.payment_status, PaymentStatus::Pending);
        assert_eq!(voucher.amount_cents, 2500);
        assert_eq!(voucher.custom_title.as_deref(), Some("Feliz cumple"));
        assert!(voucher.activated_at.is_none());
    }

    #[test]
    fn row_conversion_rejects_unknown_status() {
        let now = Utc::now();
        let row = VoucherRow {
            id: Uuid::new_v4(),
            status: "actve".to_string(),
            payment_status: "pending".to_string(),
            payment_provider_id: None,
            payment_fee_cents: None,
            amount_cents: 2500,
            currency: "ARS".to_string(),
            template_name: "classic".to_string(),
            custom_title: None,
            purchaser_name: "Ana".to_string(),
            purchaser_email: "ana@example.com".to_string(),
            recipient_name: "Luis".to_string(),
            recipient_email: "luis@example.com".to_string(),
            personal_message: None,
            expires_at: now,
            activated_at: None,
            payment_completed_at: None,
            created_at: now,
            updated_at: now,
        };

        let err = Voucher::try_from(row).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord(_)));
    }
}
