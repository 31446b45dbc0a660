//! Registration credentials and their migration across installations.

use std::{
    io::Write,
    os::unix::fs::OpenOptionsExt,
    path::{Path, PathBuf},
};

use regbridge_utils::fs::{self, FileSystemProvider, StandardFileSystemProvider};
use tracing::{debug, info};
use url::Url;

use crate::{
    constants::{
        CREDENTIALS_DIR, CREDENTIALS_URL_PARAM, NCC_CREDENTIALS_FILE, SCC_CREDENTIALS_FILE,
    },
    error::{BridgeResult, ErrorContext},
};

/// One credential payload for the registration server.
///
/// The payload itself carries no file name; the same payload may be written
/// under several distinct file names, one per registered service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Persists the payload at `path` in the registration client's
    /// two-line format, creating missing parent directories.
    ///
    /// The file carries the secret, so it is created with mode 0600.
    pub fn write_to(&self, path: &Path) -> BridgeResult<()> {
        if let Some(parent) = path.parent() {
            fs::ensure_dir_exists(parent)?;
        }

        debug!(path = %path.display(), "writing credentials file");

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .with_context(|| format!("creating credentials file {}", path.display()))?;

        file.write_all(format!("username={}\npassword={}\n", self.username, self.password).as_bytes())
            .with_context(|| format!("writing credentials file {}", path.display()))?;

        Ok(())
    }
}

/// File name for per-service credentials, resolved from the service URL.
///
/// Registration servers hand out service URLs carrying a `credentials=`
/// query parameter naming the file the package manager will look for.
/// Returns `None` when the URL carries no such parameter.
pub fn credentials_file_from_url(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == CREDENTIALS_URL_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Migrates credential files left behind by a previous installation.
pub struct CredentialMigrator {
    root: PathBuf,
}

impl Default for CredentialMigrator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl CredentialMigrator {
    /// `root` is the filesystem root the new credential store lives under.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Copies legacy credential files from the previous installation
    /// mounted at `target_dir` into the new credential store.
    ///
    /// Checks for the NCC file first and the SCC file second; when both
    /// exist the SCC copy overwrites the NCC copy. Neither file existing is
    /// fine, there is simply nothing to migrate.
    pub fn copy_old_credentials(&self, target_dir: &Path) -> BridgeResult<()> {
        let old_dir = target_dir.join(CREDENTIALS_DIR);
        let new_dir = self.root.join(CREDENTIALS_DIR);
        let new_file = new_dir.join(SCC_CREDENTIALS_FILE);

        let ncc_file = old_dir.join(NCC_CREDENTIALS_FILE);
        let scc_file = old_dir.join(SCC_CREDENTIALS_FILE);

        if !ncc_file.exists() && !scc_file.exists() {
            debug!("no previous credentials found under {}", old_dir.display());
            return Ok(());
        }

        fs::ensure_dir_exists(&new_dir)?;

        let provider = StandardFileSystemProvider;

        if ncc_file.exists() {
            info!("Copying the old NCC credentials from previous installation");
            debug!("Copying {} to {}", ncc_file.display(), new_file.display());
            provider.copy_file(&ncc_file, &new_file)?;
        }

        if scc_file.exists() {
            info!("Copying the old SCC credentials from previous installation");
            debug!("Copying {} to {}", scc_file.display(), new_file.display());
            provider.copy_file(&scc_file, &new_file)?;
        }

        Ok(())
    }
}
