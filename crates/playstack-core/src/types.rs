//! Common AWS identifier types shared across the synthesizer.

use std::fmt;

/// Sentinel value used when an expected environment variable is absent.
///
/// The registry deliberately degrades to this literal instead of failing so
/// that a synth run on a machine without deployment credentials still
/// produces inspectable templates.
pub const UNDEFINED: &str = "undefined";

/// AWS account identifier.
///
/// Unlike a provisioning-side account id this is not validated to twelve
/// digits: the registry's fallback path stores the literal `undefined`
/// sentinel here, and the provisioning engine owns final validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create a new account id from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the account id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this account id is the `undefined` fallback sentinel.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.0 == UNDEFINED
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// AWS region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AwsRegion(String);

impl AwsRegion {
    /// Create a new region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_create_account_id() {
        let id = AccountId::new("123456789012");
        assert_eq!(id.as_str(), "123456789012");
        assert!(!id.is_placeholder());
    }

    #[test]
    fn test_should_detect_placeholder_account_id() {
        let id = AccountId::new(UNDEFINED);
        assert!(id.is_placeholder());
    }

    #[test]
    fn test_should_create_region() {
        let region = AwsRegion::new("us-west-2");
        assert_eq!(region.as_str(), "us-west-2");
        assert_eq!(region.to_string(), "us-west-2");
    }
}
