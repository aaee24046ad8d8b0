//! Ownership-scoped discovery of managed instances
//!
//! The operator may run with cluster-wide list permission or namespaced-only
//! permission depending on how it was installed. The same binary handles
//! both: attempt a cluster-wide list (unless configured otherwise) and, when
//! the API server denies it at that scope, retry exactly once restricted to
//! the configured watch namespace. Any other list failure is fatal for the
//! pass.

use tracing::{info, instrument, warn};

use crate::config::OperatorConfig;
use crate::crd::{Beacon, LABEL_OPERATED_BY};
use crate::Error;

use super::store::{BeaconStore, ListScope};

/// List the Beacon instances owned by this operator identity.
#[instrument(skip(store, config), fields(identity = %config.identity))]
pub async fn list_owned(
    store: &dyn BeaconStore,
    config: &OperatorConfig,
) -> Result<Vec<Beacon>, Error> {
    let selector = format!("{LABEL_OPERATED_BY}={}", config.identity);

    if !config.cluster_scoped() {
        // Explicitly installed without cluster permission: go straight to
        // the namespaced list.
        let namespace = config.require_watch_namespace()?;
        return store
            .list(ListScope::Namespaced(namespace.to_string()), &selector)
            .await;
    }

    match store.list(ListScope::Cluster, &selector).await {
        Ok(items) => Ok(items),
        Err(err) if err.is_scope_error() => {
            warn!(error = %err, "cluster-wide list denied at this scope");
            let namespace = config.require_watch_namespace()?;
            info!(namespace = %namespace, "retrying with namespaced scope");
            store
                .list(ListScope::Namespaced(namespace.to_string()), &selector)
                .await
        }
        Err(err) => Err(err),
    }
}
