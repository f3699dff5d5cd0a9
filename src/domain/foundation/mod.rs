//! Foundation module - Shared domain primitives.
//!
//! Contains the identifier and timestamp value objects that form the
//! vocabulary of the Regalo domain.

mod ids;
mod timestamp;

pub use ids::VoucherId;
pub use timestamp::Timestamp;
