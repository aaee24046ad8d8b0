//! Operator runtime configuration
//!
//! The upgrade engine never reads process-global state: identity, permission
//! flags, and the watch namespace are carried in an [`OperatorConfig`] built
//! once at startup and passed down explicitly.

use crate::Error;

/// Identity and permission configuration for one operator instance.
///
/// `identity` is the value matched against the ownership label on managed
/// resources; it is stable for the process lifetime.
#[derive(Clone, Debug)]
pub struct OperatorConfig {
    /// This operator's identity, matched against the ownership label
    pub identity: String,

    /// Whether this deployment holds cluster-wide list permission.
    ///
    /// Tri-state: `None` (unset) is treated as `true`, so the default is to
    /// attempt a cluster-wide list and fall back on a scope error. An
    /// explicit `false` skips the cluster-wide attempt entirely.
    pub has_cluster_permission: Option<bool>,

    /// Namespace used for namespace-scoped listing when cluster-wide
    /// permission is absent or denied
    pub watch_namespace: Option<String>,
}

impl OperatorConfig {
    /// Create a config for the given identity with defaults: cluster
    /// permission unset, no watch namespace.
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            has_cluster_permission: None,
            watch_namespace: None,
        }
    }

    /// Set the cluster-permission flag
    pub fn with_cluster_permission(mut self, has_permission: bool) -> Self {
        self.has_cluster_permission = Some(has_permission);
        self
    }

    /// Set the watch namespace
    pub fn with_watch_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.watch_namespace = Some(namespace.into());
        self
    }

    /// Whether a cluster-wide list should be attempted (unset counts as yes)
    pub fn cluster_scoped(&self) -> bool {
        self.has_cluster_permission.unwrap_or(true)
    }

    /// The watch namespace, or a configuration error when it is needed but
    /// was never supplied
    pub fn require_watch_namespace(&self) -> Result<&str, Error> {
        self.watch_namespace
            .as_deref()
            .ok_or_else(|| Error::config("watch namespace is not set"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_permission_defaults_to_cluster_scoped() {
        let config = OperatorConfig::new("operator-a");
        assert!(config.cluster_scoped());
    }

    #[test]
    fn test_explicit_permission_flag_is_honored() {
        let config = OperatorConfig::new("operator-a").with_cluster_permission(false);
        assert!(!config.cluster_scoped());

        let config = OperatorConfig::new("operator-a").with_cluster_permission(true);
        assert!(config.cluster_scoped());
    }

    #[test]
    fn test_missing_watch_namespace_is_a_config_error() {
        let config = OperatorConfig::new("operator-a");
        assert!(matches!(
            config.require_watch_namespace(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_watch_namespace_round_trip() {
        let config = OperatorConfig::new("operator-a").with_watch_namespace("observability");
        assert_eq!(config.require_watch_namespace().unwrap(), "observability");
    }
}
