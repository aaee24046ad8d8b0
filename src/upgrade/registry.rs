//! Version registry: the ordered chain of known configuration versions
//!
//! The chain is built once at process start from a static ordered list and
//! never mutated, so it is shared read-only across concurrent passes. It is
//! stored as an ordered vector plus a version-to-index map: looking up where
//! an instance sits is O(1), and the steps still ahead of it are a plain
//! slice of the vector.

use std::collections::HashMap;

use crate::crd::Beacon;
use crate::Error;

/// A version transformation: rewrites a resource from the previous version's
/// conventions to this version's. Pure resource-to-resource, no I/O.
pub type UpgradeFn = fn(Beacon) -> Result<Beacon, Error>;

/// One known version and the transformation that produces it
#[derive(Clone)]
pub struct VersionStep {
    version: String,
    apply: UpgradeFn,
}

impl VersionStep {
    /// Create a step for `version` reached by applying `apply`
    pub fn new(version: impl Into<String>, apply: UpgradeFn) -> Self {
        Self {
            version: version.into(),
            apply,
        }
    }

    /// The version this step upgrades a resource to
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Run this step's transformation
    pub fn apply(&self, beacon: Beacon) -> Result<Beacon, Error> {
        (self.apply)(beacon)
    }
}

impl std::fmt::Debug for VersionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionStep")
            .field("version", &self.version)
            .finish()
    }
}

/// The full ordered chain of known versions
#[derive(Debug)]
pub struct VersionRegistry {
    steps: Vec<VersionStep>,
    index: HashMap<String, usize>,
}

impl VersionRegistry {
    /// Build a registry from steps in strictly increasing version order.
    ///
    /// # Panics
    ///
    /// Panics when the same version identifier appears twice. The chain is
    /// assembled from a static list at startup, so a duplicate is a
    /// programmer error, not a runtime condition.
    pub fn new(steps: Vec<VersionStep>) -> Self {
        let mut index = HashMap::with_capacity(steps.len());
        for (i, step) in steps.iter().enumerate() {
            let previous = index.insert(step.version.clone(), i);
            assert!(
                previous.is_none(),
                "duplicate version {:?} in upgrade chain",
                step.version
            );
        }
        Self { steps, index }
    }

    /// Position of `version` in the chain, if it is a known version
    pub fn position(&self, version: &str) -> Option<usize> {
        self.index.get(version).copied()
    }

    /// The steps that come after `version` in the chain, in order.
    ///
    /// Returns `None` when the version is unknown; an empty slice when the
    /// version is already the latest. The matched version's own step is
    /// never included: a transform targets current to next, never current
    /// to current.
    pub fn steps_after(&self, version: &str) -> Option<&[VersionStep]> {
        self.position(version).map(|i| &self.steps[i + 1..])
    }

    /// The latest known version, or `None` for an empty registry
    pub fn latest(&self) -> Option<&str> {
        self.steps.last().map(|s| s.version())
    }

    /// Number of known versions
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when the registry holds no versions
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
