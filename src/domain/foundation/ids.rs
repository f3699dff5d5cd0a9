//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a gift voucher.
///
/// This value doubles as the `external_reference` attached to gateway
/// payments, which is how inbound webhooks are correlated back to the
/// voucher they pay for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoucherId(Uuid);

impl VoucherId {
    /// Creates a new random VoucherId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a VoucherId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for VoucherId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VoucherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VoucherId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voucher_id_generates_unique_values() {
        let id1 = VoucherId::new();
        let id2 = VoucherId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn voucher_id_parses_from_valid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: VoucherId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn voucher_id_rejects_garbage() {
        let result = "not-a-voucher".parse::<VoucherId>();
        assert!(result.is_err());
    }

    #[test]
    fn voucher_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = VoucherId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn voucher_id_serializes_to_json() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: VoucherId = uuid_str.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid_str));
    }
}
