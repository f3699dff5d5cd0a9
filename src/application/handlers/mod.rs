//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod webhook;

pub use webhook::{
    // Handlers
    DispatchConfirmationHandler,
    ProcessNotificationHandler,
    ReconcilePaymentHandler,
    // Commands and Results
    IgnoreReason,
    NotificationDisposition,
    ProcessNotificationCommand,
    TransitionOutcome,
};
