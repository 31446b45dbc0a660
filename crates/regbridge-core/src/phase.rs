//! Installer phase the registration workflow runs in.

use serde::{Deserialize, Serialize};

/// Phase of the installer driving the registration pass.
///
/// `Upgrade` is an installation run over an existing system, so it counts as
/// an installation too.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallPhase {
    /// Running on an already-installed system.
    Normal,
    /// Fresh installation, products not yet committed.
    Installation,
    /// Upgrade of an existing installation.
    Upgrade,
}

impl InstallPhase {
    pub fn is_normal(&self) -> bool {
        matches!(self, InstallPhase::Normal)
    }

    pub fn is_installation(&self) -> bool {
        matches!(self, InstallPhase::Installation | InstallPhase::Upgrade)
    }

    pub fn is_upgrade(&self) -> bool {
        matches!(self, InstallPhase::Upgrade)
    }
}
