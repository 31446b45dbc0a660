//! Service registration and repository reconciliation for zypp-style
//! package management targets.
//!
//! This crate drives the package-manager side of registering a system
//! against a registration server during installation, upgrade or on a
//! running system:
//!
//! - discover the base product to register ([`product::ProductDiscovery`])
//! - make the target configuration writable when the installer runs from a
//!   read-only medium ([`overlay::ConfigOverlay`])
//! - add, save and refresh the granted repository services
//!   ([`service::ServiceRegistrar`])
//! - collect the repositories those services provide
//!   ([`repos::RepositoryCollector`])
//! - migrate credential files from a previous installation
//!   ([`credentials::CredentialMigrator`])
//!
//! The package manager itself stays behind the [`target::PkgTarget`] trait;
//! nothing here persists state beyond what the target persists.

pub mod bridge;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod overlay;
pub mod phase;
pub mod product;
pub mod repos;
pub mod service;
pub mod target;

#[cfg(test)]
pub mod test_utils;

pub use bridge::Bridge;
pub use credentials::{credentials_file_from_url, CredentialMigrator, Credentials};
pub use error::{BridgeError, BridgeResult, ErrorContext};
pub use overlay::ConfigOverlay;
pub use phase::InstallPhase;
pub use product::{Product, ProductDiscovery};
pub use repos::{RepositoryCollector, ServiceRepo};
pub use service::{ProductService, Service, ServiceRegistrar};
pub use target::{PkgTarget, RepoInfo, Resolvable, ResolvableKind, ResolvableStatus};
