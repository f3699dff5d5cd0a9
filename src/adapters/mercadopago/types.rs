//! Mercado Pago API types.
//!
//! These types represent payment objects as returned by the
//! `GET /v1/payments/{id}` endpoint, reduced to the fields that
//! reconciliation reads. Everything beyond `id` and `status` is
//! optional because sandbox and production payloads differ.

use serde::Deserialize;

use crate::domain::payment::{FeeDetail, GatewayPaymentStatus, PaymentRecord};

/// Payment object as returned by the Mercado Pago payments API.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentResponse {
    /// Numeric payment identifier.
    pub id: i64,

    /// Payment status string, e.g. "approved".
    pub status: String,

    /// Finer-grained status reason, e.g. "accredited".
    #[serde(default)]
    pub status_detail: Option<String>,

    /// Merchant-assigned reference; carries the voucher ID for shop payments.
    #[serde(default)]
    pub external_reference: Option<String>,

    /// Amount charged, in major currency units.
    #[serde(default)]
    pub transaction_amount: Option<f64>,

    /// Fees the gateway deducted from the transaction.
    #[serde(default)]
    pub fee_details: Option<Vec<FeeDetailResponse>>,
}

/// One fee entry within a payment.
#[derive(Debug, Clone, Deserialize)]
pub struct FeeDetailResponse {
    /// Fee category, e.g. "mercadopago_fee".
    #[serde(rename = "type", default)]
    pub fee_type: Option<String>,

    /// Fee amount in major currency units.
    pub amount: f64,
}

impl PaymentResponse {
    /// Convert the API shape into the domain payment record.
    pub fn into_record(self) -> PaymentRecord {
        PaymentRecord {
            id: self.id.to_string(),
            status: GatewayPaymentStatus::from_api_status(&self.status),
            status_detail: self.status_detail,
            external_reference: self.external_reference,
            transaction_amount: self.transaction_amount,
            fee_details: self
                .fee_details
                .unwrap_or_default()
                .into_iter()
                .map(|fee| FeeDetail {
                    fee_type: fee.fee_type,
                    amount: fee.amount,
                })
                .collect(),
        }
    }
}
