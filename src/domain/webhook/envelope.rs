//! Webhook notification envelope.
//!
//! Mercado Pago notification bodies carry very little: an event type, an
//! action, and the id of the resource that changed. The id is the only
//! field acted on; everything about the payment itself is re-fetched
//! from the API. Parsing is deliberately lenient because a malformed
//! body must be acknowledged, not bounced back for endless redelivery.

use serde::Deserialize;

/// Event kind that triggers payment reconciliation.
const PAYMENT_EVENT: &str = "payment";

/// Parsed webhook notification body.
///
/// Newer deliveries use `type`, legacy IPN-style deliveries use `topic`.
/// All fields are optional; absence is handled by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationEnvelope {
    /// Event kind, e.g. "payment".
    #[serde(rename = "type")]
    pub event_type: Option<String>,

    /// Legacy event kind field.
    pub topic: Option<String>,

    /// Fine-grained action, e.g. "payment.updated". Informational only.
    pub action: Option<String>,

    /// Container for the changed resource's id.
    pub data: Option<NotificationData>,
}

/// The `data` object of a notification.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationData {
    /// Resource id; the gateway sends this as a string or a number
    /// depending on delivery mode.
    pub id: Option<serde_json::Value>,
}

impl NotificationEnvelope {
    /// Parses a notification body. Returns `None` for anything that is
    /// not a JSON object of the expected shape.
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    /// The event kind, preferring `type` over the legacy `topic`.
    pub fn event_kind(&self) -> Option<&str> {
        self.event_type.as_deref().or(self.topic.as_deref())
    }

    /// Returns true if this notification is about a payment.
    pub fn is_payment_event(&self) -> bool {
        self.event_kind() == Some(PAYMENT_EVENT)
    }

    /// The resource id, normalized to a string.
    pub fn resource_id(&self) -> Option<String> {
        match self.data.as_ref()?.id.as_ref()? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
