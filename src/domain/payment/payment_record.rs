//! Authoritative payment data re-fetched from the gateway.
//!
//! Webhook payloads only carry a payment id; every decision about a
//! voucher is made against this record, fetched fresh from the Mercado
//! Pago API with the shop's own credentials.

/// Payment status values reported by Mercado Pago.
///
/// Only `Approved` activates a voucher. `Rejected` and `Cancelled` mark
/// the payment as failed. Everything else leaves the voucher untouched
/// until a later notification settles the payment. Parsing goes through
/// `from_api_status` rather than serde so unrecognized status strings
/// survive as `Unknown` instead of failing the decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayPaymentStatus {
    /// Payment settled successfully.
    Approved,
    /// Payment created but not yet processed.
    Pending,
    /// Payment is being processed (e.g. bank transfer in flight).
    InProcess,
    /// Payment was declined.
    Rejected,
    /// Payment was cancelled before settling.
    Cancelled,
    /// Payment was refunded after settling.
    Refunded,
    /// Payment was disputed and charged back.
    ChargedBack,
    /// Status string this build does not know; carried for logging.
    Unknown(String),
}

impl GatewayPaymentStatus {
    /// Map a gateway status string. Never fails; unrecognized values
    /// are preserved in `Unknown`.
    pub fn from_api_status(s: &str) -> Self {
        match s {
            "approved" => Self::Approved,
            "pending" => Self::Pending,
            "in_process" => Self::InProcess,
            "rejected" => Self::Rejected,
            "cancelled" => Self::Cancelled,
            "refunded" => Self::Refunded,
            "charged_back" => Self::ChargedBack,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Convert back to the gateway's status string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::InProcess => "in_process",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
            Self::ChargedBack => "charged_back",
            Self::Unknown(s) => s,
        }
    }

    /// Returns true if this status activates the voucher.
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Returns true if this status marks the payment attempt as failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled)
    }
}

/// One fee line on a gateway payment.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeDetail {
    /// Fee category, e.g. "mercadopago_fee".
    pub fee_type: Option<String>,

    /// Fee amount in major currency units, as the gateway reports it.
    pub amount: f64,
}

/// Authoritative payment snapshot from the gateway API.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    /// Gateway payment id.
    pub id: String,

    /// Current payment status.
    pub status: GatewayPaymentStatus,

    /// Finer-grained status reason, e.g. "cc_rejected_insufficient_amount"
    /// on a declined card. Logged when a payment fails.
    pub status_detail: Option<String>,

    /// The voucher id this payment was created for, if any.
    pub external_reference: Option<String>,

    /// Amount paid in major currency units.
    pub transaction_amount: Option<f64>,

    /// Fee lines charged by the gateway.
    pub fee_details: Vec<FeeDetail>,
}

impl PaymentRecord {
    /// Total gateway fee in cents.
    ///
    /// The gateway reports fees as floats in major units. They are summed
    /// first and converted to cents with a single rounding step, so the
    /// cent total matches what the gateway actually charged.
    pub fn fee_total_cents(&self) -> i64 {
        let total: f64 = self.fee_details.iter().map(|fee| fee.amount).sum();
        (total * 100.0).round() as i64
    }
}
