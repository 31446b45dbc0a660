//! Writable overlay for a read-only package manager configuration.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use regbridge_utils::{fs::FileSystemProvider, mount::MountProvider};
use tracing::info;

use crate::{
    constants::ZYPP_CONFIG_DIR,
    error::{BridgeResult, ErrorContext},
    phase::InstallPhase,
};

/// Makes the package manager configuration directory writable during an
/// upgrade.
///
/// During installation the configuration directory lives on a read-only
/// filesystem. The workaround is to copy the whole directory structure into
/// a writable temporary directory and bind-mount that copy over the
/// original location; all subsequent writes then land in the copy. The
/// mount is left in place for the rest of the process, unmounting is out of
/// scope here.
pub struct ConfigOverlay<F, M> {
    config_dir: PathBuf,
    fs: F,
    mount: M,
}

impl<F: FileSystemProvider, M: MountProvider> ConfigOverlay<F, M> {
    pub fn new(fs: F, mount: M) -> Self {
        Self::with_config_dir(fs, mount, ZYPP_CONFIG_DIR)
    }

    pub fn with_config_dir(fs: F, mount: M, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            fs,
            mount,
        }
    }

    /// Overlays the configuration directory with a writable copy if needed.
    ///
    /// Does nothing unless the run is an installation that upgrades an
    /// existing system and the configuration directory is not writable.
    /// Copy or mount failures are hard errors: carrying on would let later
    /// registration writes fail against the read-only tree.
    pub fn ensure_writable(&self, phase: InstallPhase) -> BridgeResult<()> {
        if !phase.is_installation() || !phase.is_upgrade() || self.fs.is_dir_writable(&self.config_dir)
        {
            return Ok(());
        }

        info!("Copying the package manager configuration to a writable place");

        let tmpdir = tempfile::Builder::new()
            .prefix("regbridge-config-")
            .tempdir()
            .with_context(|| "creating a temporary configuration directory".to_string())?
            .keep();

        let subdir = self.config_dir.file_name().unwrap_or(OsStr::new("config"));
        let writable_copy = tmpdir.join(subdir);

        info!(
            "Copying {} to {} ...",
            self.config_dir.display(),
            writable_copy.display()
        );
        self.fs.copy_dir_all(&self.config_dir, &writable_copy)?;

        info!(
            "Mounting {} to {}",
            writable_copy.display(),
            self.config_dir.display()
        );
        self.mount.bind_mount(&writable_copy, &self.config_dir)?;

        Ok(())
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}
