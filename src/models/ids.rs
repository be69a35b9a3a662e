//! Newtype wrapper for booking identifiers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a booking (UUID string).
///
/// Stored as a plain string so that identifiers written by other tools
/// round-trip unchanged even if they are not UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    /// Creates a new identifier from the given string.
    #[inline]
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Generates a fresh random (v4 UUID) identifier.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns a reference to the inner string.
    #[inline]
    #[must_use]
    pub fn as_inner(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for BookingId {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<String> for BookingId {
    #[inline]
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for BookingId {
    #[inline]
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_id_serde_is_plain_string() {
        let id = BookingId::new("550e8400-e29b-41d4-a716-446655440000".to_owned());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""550e8400-e29b-41d4-a716-446655440000""#);
        let deserialized: BookingId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    fn generated_ids_are_uuids_and_distinct() {
        let first = BookingId::generate();
        let second = BookingId::generate();
        assert_ne!(first, second);
        assert!(Uuid::parse_str(first.as_inner()).is_ok());
    }

    #[test]
    fn id_display_and_conversions() {
        let id: BookingId = "abc-123".into();
        assert_eq!(id.to_string(), "abc-123");
        assert_eq!(id.as_inner(), "abc-123");
    }
}
