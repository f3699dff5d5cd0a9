//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers hold the ports they need behind `Arc<dyn ...>` and carry no
//! request state of their own.

pub mod handlers;

pub use handlers::{
    DispatchConfirmationHandler, NotificationDisposition, ProcessNotificationCommand,
    ProcessNotificationHandler, ReconcilePaymentHandler, TransitionOutcome,
};
