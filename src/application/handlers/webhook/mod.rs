//! Webhook handlers.
//!
//! Command handlers for the payment webhook pipeline:
//!
//! - Processing one raw notification delivery end to end
//! - Reconciling a fetched payment into voucher state
//! - Dispatching confirmation emails after an activation

mod dispatch_confirmation;
mod process_notification;
mod reconcile_payment;

pub use dispatch_confirmation::DispatchConfirmationHandler;
pub use process_notification::{
    NotificationDisposition, ProcessNotificationCommand, ProcessNotificationHandler,
};
pub use reconcile_payment::{IgnoreReason, ReconcilePaymentHandler, TransitionOutcome};
