//! Email - validated lookup key for single-record operations
//!
//! The store enforces uniqueness; this type only guards construction
//! against values that could never be an address. Comparison is exact
//! and case-preserving, matching the store's unique index.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Validated email address.
///
/// Serializes as a bare string for JSON compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Validate and wrap an address.
    ///
    /// Rejects empty input and input without an `@`. Anything else is
    /// accepted; deliverability is not this layer's concern.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }

        if !s.contains('@') {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "missing '@'",
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get inner string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_addresses() {
        assert!(Email::parse("alice@email.com").is_ok());
        assert!(Email::parse("a@b").is_ok());
    }

    #[test]
    fn empty_rejected() {
        let err = Email::parse("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));

        let err = Email::parse("   ").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn missing_at_rejected() {
        let err = Email::parse("alice.email.com").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn case_preserved() {
        let email = Email::parse("Alice@Email.com").unwrap();
        assert_eq!(email.as_str(), "Alice@Email.com");
    }

    #[test]
    fn serialization_roundtrip() {
        let email = Email::parse("alice@email.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"alice@email.com\"");

        let parsed: Email = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, email);
    }
}
