//! Error types for the Beacon operator

use thiserror::Error;

/// Main error type for Beacon operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Kubernetes API error
    #[error("kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    /// Operator configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Validation error for Beacon resources
    #[error("validation error: {0}")]
    Validation(String),

    /// A version transformation rejected the resource
    #[error("upgrade error: {0}")]
    Upgrade(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a configuration error with the given message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error with the given message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an upgrade error with the given message
    pub fn upgrade(msg: impl Into<String>) -> Self {
        Self::Upgrade(msg.into())
    }

    /// Create a serialization error with the given message
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Returns true if this is a permission-scope failure from the API server
    /// (RBAC forbids the request at the attempted scope).
    ///
    /// The lister uses this to decide whether a failed cluster-wide list may
    /// be retried namespace-scoped. Only an API-level 403 qualifies; transport
    /// errors and other API failures are not retryable this way.
    pub fn is_scope_error(&self) -> bool {
        matches!(self, Error::Kube(kube::Error::Api(resp)) if resp.code == 403)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::ErrorResponse;

    fn api_error(code: u16, reason: &str) -> Error {
        Error::Kube(kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: format!("request rejected: {reason}"),
            reason: reason.to_string(),
            code,
        }))
    }

    #[test]
    fn test_forbidden_is_a_scope_error() {
        assert!(api_error(403, "Forbidden").is_scope_error());
    }

    #[test]
    fn test_other_api_failures_are_not_scope_errors() {
        assert!(!api_error(500, "InternalError").is_scope_error());
        assert!(!api_error(404, "NotFound").is_scope_error());
        assert!(!api_error(409, "Conflict").is_scope_error());
    }

    #[test]
    fn test_non_kube_errors_are_not_scope_errors() {
        assert!(!Error::config("watch namespace missing").is_scope_error());
        assert!(!Error::upgrade("transform rejected resource").is_scope_error());
    }

    #[test]
    fn test_constructors_accept_str_and_string() {
        let err = Error::config(format!("identity {} is empty", "operator-a"));
        assert!(err.to_string().contains("configuration error"));
        assert!(err.to_string().contains("operator-a"));

        match Error::upgrade("bad migration") {
            Error::Upgrade(msg) => assert_eq!(msg, "bad migration"),
            _ => panic!("expected Upgrade variant"),
        }
    }
}
