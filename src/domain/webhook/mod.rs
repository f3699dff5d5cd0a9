//! Webhook domain module.
//!
//! Models the inbound notification protocol: signature scheme and the
//! notification envelope.
//!
//! # Module Structure
//!
//! - `signature` - x-signature parsing, canonical manifest, HMAC verification
//! - `envelope` - Lenient notification body parsing

mod envelope;
mod signature;

pub use envelope::{NotificationData, NotificationEnvelope};
pub use signature::{
    canonical_manifest, SignatureHeader, SignatureParseError, SignatureVerdict,
    WebhookSignatureVerifier,
};

#[cfg(test)]
pub use signature::compute_test_signature;
