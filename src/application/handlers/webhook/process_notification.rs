//! ProcessNotificationHandler - Orchestrates one webhook delivery end to end.

use std::sync::Arc;

use crate::domain::webhook::{NotificationEnvelope, WebhookSignatureVerifier};
use crate::ports::{PaymentGateway, VoucherMailer, VoucherStore};

use super::{DispatchConfirmationHandler, ReconcilePaymentHandler, TransitionOutcome};

/// Command carrying the raw material of one webhook delivery.
#[derive(Debug, Clone)]
pub struct ProcessNotificationCommand {
    /// Raw request body, parsed leniently.
    pub body: Vec<u8>,
    /// `x-signature` header, when present.
    pub signature_header: Option<String>,
    /// `x-request-id` header, when present.
    pub request_id: Option<String>,
    /// `data.id` query parameter. This is the value the gateway signs,
    /// and the fallback resource id when the body omits one.
    pub query_resource_id: Option<String>,
}

/// How a webhook delivery was answered.
///
/// Everything except a signature rejection acknowledges the delivery:
/// the gateway retries aggressively on non-2xx, and redelivery is
/// already harmless thanks to the conditional activation guard, so an
/// internal failure is never surfaced as an HTTP error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationDisposition {
    /// Signature verification failed; the delivery must be refused.
    Rejected { reason: String },

    /// Body was not a notification we understand; acknowledged so the
    /// gateway stops redelivering it.
    AcknowledgedMalformed,

    /// Event kind is not about payments; acknowledged untouched.
    AcknowledgedNonPayment,

    /// Notification named no payment resource; nothing to fetch.
    AcknowledgedNoResource,

    /// Gateway fetch or store access failed; acknowledged with voucher
    /// state untouched, awaiting the gateway's redelivery.
    AcknowledgedAfterError,

    /// Payment fetched and reconciled; carries the resulting transition.
    AcknowledgedReconciled(TransitionOutcome),
}

impl NotificationDisposition {
    /// Returns true if the delivery must be answered with an auth failure.
    pub fn is_rejected(&self) -> bool {
        matches!(self, NotificationDisposition::Rejected { .. })
    }
}

/// Handler that walks one notification through verification, payment
/// fetch, reconciliation, and email dispatch hand-off.
///
/// The notification body is treated as untrusted input end to end: it
/// contributes only the payment id, and even that is cross-checked
/// against the signed query parameter. All payment facts come from the
/// gateway fetch.
pub struct ProcessNotificationHandler {
    verifier: Arc<WebhookSignatureVerifier>,
    gateway: Arc<dyn PaymentGateway>,
    reconciler: ReconcilePaymentHandler,
    dispatcher: DispatchConfirmationHandler,
}

impl ProcessNotificationHandler {
    pub fn new(
        verifier: Arc<WebhookSignatureVerifier>,
        gateway: Arc<dyn PaymentGateway>,
        store: Arc<dyn VoucherStore>,
        mailer: Arc<dyn VoucherMailer>,
    ) -> Self {
        Self {
            verifier,
            gateway,
            reconciler: ReconcilePaymentHandler::new(store.clone()),
            dispatcher: DispatchConfirmationHandler::new(store, mailer),
        }
    }

    #[tracing::instrument(
        name = "webhook_notification",
        skip_all,
        fields(payment_id = tracing::field::Empty)
    )]
    pub async fn handle(&self, cmd: ProcessNotificationCommand) -> NotificationDisposition {
        // 1. Authenticate the delivery before reading anything else.
        //    The manifest is built from the query `data.id`, which is the
        //    value the gateway signed.
        let verdict = self.verifier.verify(
            cmd.signature_header.as_deref(),
            cmd.request_id.as_deref(),
            cmd.query_resource_id.as_deref(),
        );
        if let crate::domain::webhook::SignatureVerdict::Rejected(reason) = verdict {
            tracing::warn!(reason = %reason, "Webhook signature rejected");
            return NotificationDisposition::Rejected { reason };
        }

        // 2. Parse the envelope leniently; garbage gets acknowledged.
        let Some(envelope) = NotificationEnvelope::parse(&cmd.body) else {
            tracing::info!("Unparsable webhook body; acknowledging without action");
            return NotificationDisposition::AcknowledgedMalformed;
        };

        // 3. Only payment events trigger a gateway fetch.
        if !envelope.is_payment_event() {
            tracing::debug!(
                event_kind = envelope.event_kind().unwrap_or("<none>"),
                "Non-payment notification acknowledged"
            );
            return NotificationDisposition::AcknowledgedNonPayment;
        }

        // 4. Resolve the payment id: body first, signed query id as fallback.
        let body_id = envelope.resource_id();
        if let (Some(body_id), Some(query_id)) = (body_id.as_deref(), cmd.query_resource_id.as_deref())
        {
            if body_id != query_id {
                tracing::warn!(
                    body_id = %body_id,
                    query_id = %query_id,
                    "Webhook body and query disagree on payment id; using body id"
                );
            }
        }
        let Some(payment_id) = body_id.or(cmd.query_resource_id.clone()) else {
            tracing::info!("Payment notification without a resource id; acknowledging");
            return NotificationDisposition::AcknowledgedNoResource;
        };
        tracing::Span::current().record("payment_id", tracing::field::display(&payment_id));

        // 5. Fetch the authoritative payment record.
        let payment = match self.gateway.fetch_payment(&payment_id).await {
            Ok(payment) => payment,
            Err(e) => {
                tracing::warn!(
                    payment_id = %payment_id,
                    error = %e,
                    retryable = e.is_retryable(),
                    "Payment fetch failed; acknowledging and waiting for redelivery"
                );
                return NotificationDisposition::AcknowledgedAfterError;
            }
        };

        // 6. Reconcile voucher state from the fetched record.
        let outcome = match self.reconciler.handle(&payment).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(
                    payment_id = %payment_id,
                    error = %e,
                    "Reconciliation failed; acknowledging and waiting for redelivery"
                );
                return NotificationDisposition::AcknowledgedAfterError;
            }
        };

        // 7. The activation winner hands email dispatch to a background
        //    task so the gateway response never waits on the mailer.
        if let TransitionOutcome::Activated { voucher_id } = outcome {
            let dispatcher = self.dispatcher.clone();
            tokio::spawn(async move {
                dispatcher.handle(voucher_id).await;
            });
        }

        NotificationDisposition::AcknowledgedReconciled(outcome)
    }
}
