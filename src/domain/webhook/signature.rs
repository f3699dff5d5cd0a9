//! Mercado Pago webhook signature verification.
//!
//! Implements verification of the `x-signature` header using HMAC-SHA256
//! over a canonical manifest. Unlike schemes that sign the request body,
//! Mercado Pago signs a manifest assembled from the resource id (query
//! string `data.id`), the `x-request-id` header, and the `ts` value
//! carried inside the signature header itself.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Errors raised while parsing the `x-signature` header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureParseError {
    #[error("invalid signature header format")]
    InvalidFormat,

    #[error("invalid v1 signature hex")]
    InvalidHex,

    #[error("missing ts field")]
    MissingTimestamp,

    #[error("missing v1 field")]
    MissingSignature,
}

/// Parsed components from the x-signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Raw `ts` value as received; it is interpolated into the manifest
    /// verbatim, so it is never parsed into a number.
    pub timestamp: String,
    /// Decoded v1 signature (HMAC-SHA256).
    pub v1_signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parses an x-signature header string.
    ///
    /// Format: `ts=<timestamp>,v1=<hex signature>`
    ///
    /// # Errors
    ///
    /// Returns `SignatureParseError` if the header format is invalid or
    /// either required field is absent.
    pub fn parse(header: &str) -> Result<Self, SignatureParseError> {
        let mut timestamp: Option<String> = None;
        let mut v1_signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or(SignatureParseError::InvalidFormat)?;

            match key.trim() {
                "ts" => {
                    timestamp = Some(value.trim().to_string());
                }
                "v1" => {
                    v1_signature = Some(
                        hex::decode(value.trim()).map_err(|_| SignatureParseError::InvalidHex)?,
                    );
                }
                _ => {
                    // Ignore unknown fields for forward compatibility
                }
            }
        }

        let timestamp = timestamp.ok_or(SignatureParseError::MissingTimestamp)?;
        let v1_signature = v1_signature.ok_or(SignatureParseError::MissingSignature)?;

        Ok(SignatureHeader {
            timestamp,
            v1_signature,
        })
    }
}

/// Outcome of verifying one webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureVerdict {
    /// No signing secret is configured; the delivery is accepted
    /// without verification.
    SkippedNoSecret,

    /// The v1 signature matched the canonical manifest.
    Verified,

    /// Signature material was missing, malformed, or did not match.
    /// The delivery must be refused.
    Rejected(String),
}

impl SignatureVerdict {
    /// Returns true if the delivery must be refused.
    pub fn is_rejected(&self) -> bool {
        matches!(self, SignatureVerdict::Rejected(_))
    }
}

/// Verifier for Mercado Pago webhook signatures.
///
/// Holds the optional signing secret from the gateway dashboard. When no
/// secret is configured the verifier waves deliveries through, which is
/// how sandbox environments without signing enabled are supported.
pub struct WebhookSignatureVerifier {
    secret: Option<SecretString>,
}

impl WebhookSignatureVerifier {
    /// Creates a verifier; `None` disables verification.
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.map(SecretString::new),
        }
    }

    /// Verifies the signature material of one webhook delivery.
    ///
    /// # Verification Steps
    ///
    /// 1. Require header, request id, and resource id when a secret is set
    /// 2. Parse the x-signature header
    /// 3. Assemble the canonical manifest
    /// 4. Compute the expected HMAC-SHA256 signature
    /// 5. Compare signatures using constant-time comparison
    ///
    /// The resource id must come from the query string `data.id`
    /// parameter, which is the value the gateway signed.
    pub fn verify(
        &self,
        signature_header: Option<&str>,
        request_id: Option<&str>,
        resource_id: Option<&str>,
    ) -> SignatureVerdict {
        let Some(secret) = &self.secret else {
            return SignatureVerdict::SkippedNoSecret;
        };

        // 1. All signature material must be present once a secret is set
        let Some(signature_header) = signature_header else {
            return SignatureVerdict::Rejected("missing x-signature header".to_string());
        };
        let Some(request_id) = request_id else {
            return SignatureVerdict::Rejected("missing x-request-id header".to_string());
        };
        let Some(resource_id) = resource_id else {
            return SignatureVerdict::Rejected("missing data.id query parameter".to_string());
        };

        // 2. Parse signature header
        let header = match SignatureHeader::parse(signature_header) {
            Ok(header) => header,
            Err(err) => return SignatureVerdict::Rejected(err.to_string()),
        };

        // 3. Assemble canonical manifest
        let manifest = canonical_manifest(resource_id, request_id, &header.timestamp);

        // 4. Compute expected signature
        let expected = compute_signature(secret.expose_secret(), &manifest);

        // 5. Compare signatures (constant-time)
        if !constant_time_compare(&expected, &header.v1_signature) {
            return SignatureVerdict::Rejected("signature mismatch".to_string());
        }

        SignatureVerdict::Verified
    }
}

/// Builds the canonical manifest the gateway signs.
///
/// Format: `id:<resource-id>;request-id:<request-id>;ts:<ts>;`
pub fn canonical_manifest(resource_id: &str, request_id: &str, ts: &str) -> String {
    format!(
        "id:{};request-id:{};ts:{};",
        canonicalize_resource_id(resource_id),
        request_id,
        ts
    )
}

/// Resource ids containing letters are signed lowercase; purely numeric
/// ids are signed exactly as received.
fn canonicalize_resource_id(id: &str) -> String {
    if id.chars().any(|c| c.is_ascii_alphabetic()) {
        id.to_lowercase()
    } else {
        id.to_string()
    }
}

/// Computes the HMAC-SHA256 signature over a manifest.
fn compute_signature(secret: &str, manifest: &str) -> Vec<u8> {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(manifest.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

/// Performs constant-time comparison of two byte slices.
///
/// This prevents timing attacks that could leak information about the expected signature.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes a valid v1 signature hex string for test fixtures.
#[cfg(test)]
pub fn compute_test_signature(
    secret: &str,
    resource_id: &str,
    request_id: &str,
    ts: &str,
) -> String {
    let manifest = canonical_manifest(resource_id, request_id, ts);
    hex::encode(compute_signature(secret, &manifest))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "2f4dd1b3e7c89a06b5d41c73987aa1f0";
    const RESOURCE_ID: &str = "12345678901";
    const REQUEST_ID: &str = "5d13bcfe-09f4-4a04-a702-ba72b7b8b7e3";
    const TS: &str = "1704908010";

    fn verifier_with_secret() -> WebhookSignatureVerifier {
        WebhookSignatureVerifier::new(Some(TEST_SECRET.to_string()))
    }

    fn valid_header() -> String {
        let signature = compute_test_signature(TEST_SECRET, RESOURCE_ID, REQUEST_ID, TS);
        format!("ts={},v1={}", TS, signature)
    }

    // ══════════════════════════════════════════════════════════════
    // SignatureHeader Parsing Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn parse_header_with_ts_and_v1() {
        let signature = "a".repeat(64); // Valid hex
        let header_str = format!("ts=1704908010,v1={}", signature);

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.timestamp, "1704908010");
        assert_eq!(header.v1_signature.len(), 32); // 64 hex chars = 32 bytes
    }

    #[test]
    fn parse_header_tolerates_whitespace_around_fields() {
        let signature = "a".repeat(64);
        let header_str = format!("ts=1704908010, v1={}", signature);

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.timestamp, "1704908010");
    }

    #[test]
    fn parse_header_ignores_unknown_fields() {
        let signature = "a".repeat(64);
        let header_str = format!("ts=1704908010,v1={},v2=future,alg=hmac", signature);

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.timestamp, "1704908010");
        assert_eq!(header.v1_signature.len(), 32);
    }

    #[test]
    fn parse_header_missing_ts_fails() {
        let signature = "a".repeat(64);
        let header_str = format!("v1={}", signature);

        let result = SignatureHeader::parse(&header_str);

        assert_eq!(result, Err(SignatureParseError::MissingTimestamp));
    }

    #[test]
    fn parse_header_missing_v1_fails() {
        let result = SignatureHeader::parse("ts=1704908010");

        assert_eq!(result, Err(SignatureParseError::MissingSignature));
    }

    #[test]
    fn parse_header_invalid_hex_fails() {
        let result = SignatureHeader::parse("ts=1704908010,v1=not_valid_hex");

        assert_eq!(result, Err(SignatureParseError::InvalidHex));
    }

    #[test]
    fn parse_header_no_equals_fails() {
        let result = SignatureHeader::parse("ts1704908010");

        assert_eq!(result, Err(SignatureParseError::InvalidFormat));
    }

    // ══════════════════════════════════════════════════════════════
    // Canonical Manifest Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn manifest_has_exact_wire_format() {
        let manifest = canonical_manifest("12345", "req-1", "1704908010");
        assert_eq!(manifest, "id:12345;request-id:req-1;ts:1704908010;");
    }

    #[test]
    fn manifest_keeps_numeric_id_unchanged() {
        let manifest = canonical_manifest("12345678901", REQUEST_ID, TS);
        assert!(manifest.starts_with("id:12345678901;"));
    }

    #[test]
    fn manifest_lowercases_alphanumeric_id() {
        let manifest = canonical_manifest("PAY-9F3B", REQUEST_ID, TS);
        assert!(manifest.starts_with("id:pay-9f3b;"));
    }

    // ══════════════════════════════════════════════════════════════
    // Signature Verification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_valid_signature() {
        let verifier = verifier_with_secret();
        let header = valid_header();

        let verdict = verifier.verify(Some(&header), Some(REQUEST_ID), Some(RESOURCE_ID));

        assert_eq!(verdict, SignatureVerdict::Verified);
    }

    #[test]
    fn verify_accepts_uppercase_resource_id_signed_lowercase() {
        let verifier = verifier_with_secret();
        let signature = compute_test_signature(TEST_SECRET, "pay-9f3b", REQUEST_ID, TS);
        let header = format!("ts={},v1={}", TS, signature);

        let verdict = verifier.verify(Some(&header), Some(REQUEST_ID), Some("PAY-9F3B"));

        assert_eq!(verdict, SignatureVerdict::Verified);
    }

    #[test]
    fn verify_flipped_signature_fails() {
        let verifier = verifier_with_secret();
        let mut signature = compute_test_signature(TEST_SECRET, RESOURCE_ID, REQUEST_ID, TS);
        // Flip the last hex digit
        let flipped = if signature.ends_with('0') { "1" } else { "0" };
        signature.truncate(signature.len() - 1);
        signature.push_str(flipped);
        let header = format!("ts={},v1={}", TS, signature);

        let verdict = verifier.verify(Some(&header), Some(REQUEST_ID), Some(RESOURCE_ID));

        assert!(verdict.is_rejected());
    }

    #[test]
    fn verify_wrong_secret_fails() {
        let verifier = WebhookSignatureVerifier::new(Some("wrong_secret".to_string()));
        let header = valid_header();

        let verdict = verifier.verify(Some(&header), Some(REQUEST_ID), Some(RESOURCE_ID));

        assert!(verdict.is_rejected());
    }

    #[test]
    fn verify_different_request_id_fails() {
        let verifier = verifier_with_secret();
        let header = valid_header();

        let verdict = verifier.verify(Some(&header), Some("other-request"), Some(RESOURCE_ID));

        assert!(verdict.is_rejected());
    }

    #[test]
    fn verify_different_resource_id_fails() {
        let verifier = verifier_with_secret();
        let header = valid_header();

        let verdict = verifier.verify(Some(&header), Some(REQUEST_ID), Some("99999999999"));

        assert!(verdict.is_rejected());
    }

    #[test]
    fn verify_tampered_ts_fails() {
        let verifier = verifier_with_secret();
        let signature = compute_test_signature(TEST_SECRET, RESOURCE_ID, REQUEST_ID, TS);
        let header = format!("ts=1704900000,v1={}", signature);

        let verdict = verifier.verify(Some(&header), Some(REQUEST_ID), Some(RESOURCE_ID));

        assert!(verdict.is_rejected());
    }

    // ══════════════════════════════════════════════════════════════
    // Missing Material Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_missing_header_fails_when_secret_configured() {
        let verifier = verifier_with_secret();

        let verdict = verifier.verify(None, Some(REQUEST_ID), Some(RESOURCE_ID));

        assert!(verdict.is_rejected());
    }

    #[test]
    fn verify_missing_request_id_fails_when_secret_configured() {
        let verifier = verifier_with_secret();
        let header = valid_header();

        let verdict = verifier.verify(Some(&header), None, Some(RESOURCE_ID));

        assert!(verdict.is_rejected());
    }

    #[test]
    fn verify_missing_resource_id_fails_when_secret_configured() {
        let verifier = verifier_with_secret();
        let header = valid_header();

        let verdict = verifier.verify(Some(&header), Some(REQUEST_ID), None);

        assert!(verdict.is_rejected());
    }

    #[test]
    fn verify_without_secret_skips_verification() {
        let verifier = WebhookSignatureVerifier::new(None);

        let verdict = verifier.verify(None, None, None);

        assert_eq!(verdict, SignatureVerdict::SkippedNoSecret);
    }

    #[test]
    fn verify_without_secret_ignores_garbage_header() {
        let verifier = WebhookSignatureVerifier::new(None);

        let verdict = verifier.verify(Some("complete garbage"), Some(REQUEST_ID), Some(RESOURCE_ID));

        assert_eq!(verdict, SignatureVerdict::SkippedNoSecret);
    }

    // ══════════════════════════════════════════════════════════════
    // Constant Time Comparison Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn constant_time_compare_equal_values() {
        let a = vec![1, 2, 3, 4, 5];
        let b = vec![1, 2, 3, 4, 5];
        assert!(constant_time_compare(&a, &b));
    }

    #[test]
    fn constant_time_compare_different_values() {
        let a = vec![1, 2, 3, 4, 5];
        let b = vec![1, 2, 3, 4, 6];
        assert!(!constant_time_compare(&a, &b));
    }

    #[test]
    fn constant_time_compare_different_lengths() {
        let a = vec![1, 2, 3];
        let b = vec![1, 2, 3, 4];
        assert!(!constant_time_compare(&a, &b));
    }

    #[test]
    fn constant_time_compare_empty_slices() {
        let a: Vec<u8> = vec![];
        let b: Vec<u8> = vec![];
        assert!(constant_time_compare(&a, &b));
    }
}
