//! The composed registration workflow over one target handle.

use std::path::Path;

use tracing::debug;

use crate::{
    credentials::{CredentialMigrator, Credentials},
    error::{BridgeError, BridgeResult},
    phase::InstallPhase,
    product::{Product, ProductDiscovery},
    repos::{RepositoryCollector, ServiceRepo},
    service::{ProductService, ServiceRegistrar},
    target::PkgTarget,
};

/// Owns the target handle for the duration of a registration pass and
/// exposes the workflow steps in the order an installer drives them:
/// [`Bridge::init`] once, then product discovery, service registration and
/// repository collection as the registration protocol proceeds.
pub struct Bridge<T: PkgTarget> {
    target: T,
    phase: InstallPhase,
}

impl<T: PkgTarget> Bridge<T> {
    pub fn new(target: T, phase: InstallPhase) -> Self {
        Self { target, phase }
    }

    /// Initializes the target against `root` and loads the package
    /// database. Must run before any other operation.
    pub fn init(&self, root: &Path) -> BridgeResult<()> {
        debug!(root = %root.display(), "initializing package management target");

        if !self.target.initialize(root) || !self.target.load() {
            return Err(BridgeError::TargetInit);
        }

        Ok(())
    }

    /// The base products to register. See [`ProductDiscovery`].
    pub fn base_products(&self) -> Vec<Product> {
        ProductDiscovery::new(&self.target, self.phase).base_products()
    }

    /// Registers the granted services. See [`ServiceRegistrar`].
    pub fn add_services(
        &self,
        product_services: &[ProductService],
        credentials: &Credentials,
    ) -> BridgeResult<()> {
        ServiceRegistrar::new(&self.target).add_services(product_services, credentials)
    }

    /// The repositories the registered services provide. See
    /// [`RepositoryCollector`].
    pub fn service_repos(&self, product_services: &[ProductService]) -> Vec<ServiceRepo> {
        RepositoryCollector::new(&self.target).service_repos(product_services)
    }

    /// Migrates credential files from the previous installation mounted at
    /// `target_dir`. See [`CredentialMigrator`].
    pub fn copy_old_credentials(&self, target_dir: &Path) -> BridgeResult<()> {
        CredentialMigrator::default().copy_old_credentials(target_dir)
    }

    pub fn phase(&self) -> InstallPhase {
        self.phase
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}
