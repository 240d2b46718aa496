// file: src/credential.rs
// version: 1.0.0
// guid: 8a41e7d2-0b93-4c6f-a5d8-17e2f94c3b06

//! Civo API token handling

use crate::error::ClusterError;
use crate::Result;
use std::fmt;

/// Name of the variable the Civo CLI reads its API token from
pub const CREDENTIAL_ENV_VAR: &str = "CIVO_TOKEN";

/// Opaque Civo API token.
///
/// The value is only ever handed to a child process environment. It is
/// redacted from `Debug` and `Display` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token supplied by the caller
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Read a token from the named host environment variable
    pub fn from_env(var_name: &str) -> Result<Self> {
        match std::env::var(var_name) {
            Ok(value) if !value.trim().is_empty() => Ok(Self(value)),
            Ok(_) => Err(ClusterError::CredentialError(format!(
                "Environment variable {} is empty",
                var_name
            ))),
            Err(_) => Err(ClusterError::CredentialError(format!(
                "Environment variable {} is not set",
                var_name
            ))),
        }
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_is_redacted() {
        let credential = Credential::new("very-secret-token");

        assert_eq!(format!("{:?}", credential), "Credential(***)");
        assert_eq!(credential.to_string(), "***");
        assert_eq!(credential.expose(), "very-secret-token");
    }

    #[test]
    fn test_from_env_missing_variable() {
        let result = Credential::from_env("CIVO_CLUSTER_TEST_DEFINITELY_UNSET");

        let err = result.unwrap_err();
        assert!(matches!(err, ClusterError::CredentialError(_)));
        assert!(err.to_string().contains("CIVO_CLUSTER_TEST_DEFINITELY_UNSET"));
    }

    #[test]
    fn test_from_env_present_variable() {
        std::env::set_var("CIVO_CLUSTER_TEST_TOKEN_PRESENT", "abc123");

        let credential = Credential::from_env("CIVO_CLUSTER_TEST_TOKEN_PRESENT").unwrap();
        assert_eq!(credential.expose(), "abc123");

        std::env::remove_var("CIVO_CLUSTER_TEST_TOKEN_PRESENT");
    }
}
