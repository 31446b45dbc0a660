//! Injected handle to the target system's package manager.
//!
//! The real handle is a process-wide singleton owned by the embedding
//! installer; this module only defines the surface the registration
//! workflow consumes. Lifecycle calls report failure as a plain `false`,
//! mirroring the target API's own contract; the callers in this crate map
//! that to typed errors.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Kind of resolvable entity to query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvableKind {
    Product,
    Package,
    Pattern,
    Patch,
}

/// Status of a resolvable as reported by the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvableStatus {
    /// Present on the running system.
    Installed,
    /// Marked for installation, not yet committed.
    Selected,
    /// Known from a repository, not installed.
    Available,
    /// Marked for removal.
    Removed,
}

/// One resolvable record of kind product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resolvable {
    pub name: String,
    pub arch: String,
    pub version: String,
    pub status: ResolvableStatus,
    /// Product type ("base", "addon", ...). Unset during installation, the
    /// target only fills it in for committed products.
    pub product_type: Option<String>,
    /// Index of the repository the resolvable originates from; 0 is the
    /// first repository added to the target, -1 means the resolvable does
    /// not come from a repository.
    pub source: i32,
}

/// General metadata of one repository, as reported by the target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepoInfo {
    pub alias: String,
    pub name: String,
    pub url: String,
    pub enabled: bool,
    pub autorefresh: bool,
    /// Alias of the service that owns this repository, if any.
    pub service: Option<String>,
}

/// Operations the registration workflow needs from the package manager.
///
/// Implementations are expected to be non-reentrant across simultaneous
/// registration passes; callers hold the handle exclusively for the
/// duration of a pass.
pub trait PkgTarget {
    /// Initializes the target against an installation root.
    fn initialize(&self, root: &Path) -> bool;

    /// Loads the package database. Must follow [`PkgTarget::initialize`].
    fn load(&self) -> bool;

    /// All resolvables of the given kind currently known to the target.
    fn resolvables(&self, kind: ResolvableKind) -> Vec<Resolvable>;

    /// Persists all loaded repositories to stable storage.
    fn save_all_sources(&self) -> bool;

    /// Ids of the currently loaded repositories, in load order.
    fn current_sources(&self, include_removed: bool) -> Vec<u32>;

    /// General metadata for one repository id.
    fn source_general_data(&self, src_id: u32) -> Option<RepoInfo>;

    /// Registers a service endpoint under the given name.
    fn add_service(&self, name: &str, url: &str) -> bool;

    /// Persists a previously added service.
    fn save_service(&self, name: &str) -> bool;

    /// Refreshes a saved service, loading the repositories it provides.
    fn refresh_service(&self, name: &str) -> bool;
}
