use std::{
    path::Path,
    process::{Command, Output},
};

use tracing::debug;

use crate::error::{MountError, MountResult};

/// Seam for the privileged bind-mount invocation.
///
/// Mounting requires CAP_SYS_ADMIN, so the single place that escalates is
/// kept behind this trait and swapped for a recorder in tests.
pub trait MountProvider {
    /// Overlays `source_dir` on top of `target_dir` (`mount -o bind`).
    ///
    /// The mount persists for the lifetime of the process namespace;
    /// unmounting is the caller's concern.
    ///
    /// # Errors
    ///
    /// * [`MountError::Spawn`] if the mount command could not be started.
    /// * [`MountError::BindFailed`] if it ran but reported failure.
    fn bind_mount(&self, source_dir: &Path, target_dir: &Path) -> MountResult<()>;
}

#[derive(Default, Clone)]
pub struct StandardMountProvider;

impl MountProvider for StandardMountProvider {
    fn bind_mount(&self, source_dir: &Path, target_dir: &Path) -> MountResult<()> {
        debug!(
            source = %source_dir.display(),
            target = %target_dir.display(),
            "bind mounting"
        );

        let output = Command::new("mount")
            .arg("-o")
            .arg("bind")
            .arg(source_dir)
            .arg(target_dir)
            .output()
            .map_err(|err| MountError::Spawn {
                command: "mount".to_string(),
                source: err,
            })?;

        check_mount_output(&output, source_dir, target_dir)
    }
}

fn check_mount_output(output: &Output, source_dir: &Path, target_dir: &Path) -> MountResult<()> {
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    let detail = if stderr.is_empty() {
        output.status.to_string()
    } else {
        format!("{} ({stderr})", output.status)
    };

    Err(MountError::BindFailed {
        source_dir: source_dir.to_path_buf(),
        target_dir: target_dir.to_path_buf(),
        detail,
    })
}
