//! Registering repository services with the package management target.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::{
    constants::CREDENTIALS_DIR,
    credentials::{credentials_file_from_url, Credentials},
    error::{BridgeError, BridgeResult},
    target::PkgTarget,
};

/// One remote repository-service endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub url: Url,
}

impl Service {
    pub fn new(name: impl Into<String>, url: Url) -> Self {
        Self {
            name: name.into(),
            url,
        }
    }
}

/// The registration services granted for one base product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductService {
    pub services: Vec<Service>,
}

impl ProductService {
    pub fn new(services: Vec<Service>) -> Self {
        Self { services }
    }
}

/// Flattens the services of all products into registration order.
pub(crate) fn flatten_services(product_services: &[ProductService]) -> impl Iterator<Item = &Service> {
    product_services
        .iter()
        .flat_map(|product| product.services.iter())
}

/// Persists all sources when dropped, on every exit path.
///
/// An interrupted pass must still leave the target's on-disk view
/// consistent with its in-memory view, so this runs on success and on
/// error alike. A failure here is logged; there is no further fallback.
struct SourceSaveGuard<'a, T: PkgTarget> {
    target: &'a T,
}

impl<T: PkgTarget> Drop for SourceSaveGuard<'_, T> {
    fn drop(&mut self) {
        if !self.target.save_all_sources() {
            warn!("saving repository configuration on exit failed");
        }
    }
}

pub struct ServiceRegistrar<'a, T: PkgTarget> {
    target: &'a T,
    credentials_dir: PathBuf,
}

impl<'a, T: PkgTarget> ServiceRegistrar<'a, T> {
    pub fn new(target: &'a T) -> Self {
        Self::with_credentials_dir(target, Path::new("/").join(CREDENTIALS_DIR))
    }

    pub fn with_credentials_dir(target: &'a T, credentials_dir: impl Into<PathBuf>) -> Self {
        Self {
            target,
            credentials_dir: credentials_dir.into(),
        }
    }

    /// Adds, saves and refreshes every service of every product, in
    /// encounter order.
    ///
    /// All loaded repositories are saved before the first service mutation:
    /// refreshing a service makes the target treat not-yet-saved
    /// repositories as removed and unload them. They are saved again when
    /// this function returns, whether it succeeds or fails.
    ///
    /// The shared credential payload is written once per service whose URL
    /// names a credential file; the target then finds the file when it
    /// refreshes the service.
    ///
    /// # Errors
    ///
    /// * [`BridgeError::SourceSaveFailed`] if the up-front repository save
    ///   is rejected; no service has been touched at that point.
    /// * [`BridgeError::ServiceAdd`] / [`BridgeError::ServiceSave`] /
    ///   [`BridgeError::ServiceRefresh`] naming the failing service; the
    ///   remaining services are not processed.
    pub fn add_services(
        &self,
        product_services: &[ProductService],
        credentials: &Credentials,
    ) -> BridgeResult<()> {
        let _save_on_exit = SourceSaveGuard {
            target: self.target,
        };

        if !self.target.save_all_sources() {
            return Err(BridgeError::SourceSaveFailed);
        }

        for service in flatten_services(product_services) {
            info!(name = %service.name, url = %service.url, "adding service");

            if let Some(file_name) = credentials_file_from_url(&service.url) {
                credentials.write_to(&self.credentials_dir.join(file_name))?;
            }

            if !self.target.add_service(&service.name, service.url.as_str()) {
                return Err(BridgeError::ServiceAdd(service.name.clone()));
            }

            if !self.target.save_service(&service.name) {
                return Err(BridgeError::ServiceSave(service.name.clone()));
            }

            // refresh works only for saved services
            if !self.target.refresh_service(&service.name) {
                return Err(BridgeError::ServiceRefresh(service.name.clone()));
            }
        }

        Ok(())
    }
}
