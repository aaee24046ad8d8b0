//! Kubernetes access for the upgrade engine
//!
//! All list/update traffic goes through the [`BeaconStore`] trait so the
//! engine can be tested against mocks while production uses the real API
//! server through kube.

use async_trait::async_trait;
use kube::api::{Api, ListParams, PostParams};
use kube::{Client, ResourceExt};

#[cfg(test)]
use mockall::automock;

use crate::crd::Beacon;
use crate::Error;

/// Scope of a list request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListScope {
    /// List across the whole cluster
    Cluster,
    /// List within one namespace
    Namespaced(String),
}

/// Trait abstracting Beacon list/update operations.
///
/// The list capability must surface a permission-scope failure as a
/// distinguishable error ([`Error::is_scope_error`]); the lister's fallback
/// depends on it.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BeaconStore: Send + Sync {
    /// List Beacon instances matching a label selector at the given scope
    async fn list(&self, scope: ListScope, selector: &str) -> Result<Vec<Beacon>, Error>;

    /// Persist a full Beacon representation. Last write wins; no
    /// optimistic-concurrency retry is attempted here.
    async fn update(&self, beacon: &Beacon) -> Result<(), Error>;
}

/// Real store implementation backed by the Kubernetes API
pub struct KubeBeaconStore {
    client: Client,
}

impl KubeBeaconStore {
    /// Create a store using the given Kubernetes client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, scope: &ListScope) -> Api<Beacon> {
        match scope {
            ListScope::Cluster => Api::all(self.client.clone()),
            ListScope::Namespaced(ns) => Api::namespaced(self.client.clone(), ns),
        }
    }
}

#[async_trait]
impl BeaconStore for KubeBeaconStore {
    async fn list(&self, scope: ListScope, selector: &str) -> Result<Vec<Beacon>, Error> {
        let params = ListParams::default().labels(selector);
        let list = self.api(&scope).list(&params).await?;
        Ok(list.items)
    }

    async fn update(&self, beacon: &Beacon) -> Result<(), Error> {
        let name = beacon.name_any();
        let namespace = beacon
            .namespace()
            .ok_or_else(|| Error::validation(format!("beacon {name} has no namespace")))?;
        let api: Api<Beacon> = Api::namespaced(self.client.clone(), &namespace);

        // The version tag lives in the status subresource; a plain replace
        // only persists spec and metadata, so write both.
        let replaced = api.replace(&name, &PostParams::default(), beacon).await?;

        let mut stamped = replaced;
        stamped.status = beacon.status.clone();
        let data =
            serde_json::to_vec(&stamped).map_err(|e| Error::serialization(e.to_string()))?;
        api.replace_status(&name, &PostParams::default(), data)
            .await?;

        Ok(())
    }
}
