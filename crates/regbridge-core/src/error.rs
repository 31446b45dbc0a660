//! Error types for regbridge-core.

use miette::Diagnostic;
use regbridge_utils::error::{FileSystemError, MountError, UtilsError};
use thiserror::Error;

/// Core error type for the registration workflow.
#[derive(Error, Diagnostic, Debug)]
pub enum BridgeError {
    #[error("Initializing the package management target failed")]
    #[diagnostic(
        code(regbridge::target_init),
        help("Check that the installation root exists and the package database is readable")
    )]
    TargetInit,

    #[error("Saving repository configuration failed")]
    #[diagnostic(
        code(regbridge::source_save),
        help("Check that the package manager configuration directory is writable")
    )]
    SourceSaveFailed,

    #[error("Adding service '{0}' failed")]
    #[diagnostic(
        code(regbridge::service_add),
        help("Check the service URL and that no service with this name already exists")
    )]
    ServiceAdd(String),

    #[error("Saving service '{0}' failed")]
    #[diagnostic(
        code(regbridge::service_save),
        help("Check that the service directory is writable")
    )]
    ServiceSave(String),

    #[error("Refreshing service '{0}' failed")]
    #[diagnostic(
        code(regbridge::service_refresh),
        help("Check the network connection and the registration server status")
    )]
    ServiceRefresh(String),

    #[error(transparent)]
    #[diagnostic(code(regbridge::utils))]
    Utils(#[from] UtilsError),

    #[error("Error while {action}")]
    #[diagnostic(code(regbridge::io), help("Check file permissions and disk space"))]
    Io {
        action: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<FileSystemError> for BridgeError {
    fn from(err: FileSystemError) -> Self {
        Self::Utils(UtilsError::FileSystem(err))
    }
}

impl From<MountError> for BridgeError {
    fn from(err: MountError) -> Self {
        Self::Utils(UtilsError::Mount(err))
    }
}

impl BridgeError {
    /// Name of the offending service, for the service-lifecycle failures.
    pub fn service_name(&self) -> Option<&str> {
        match self {
            Self::ServiceAdd(name) | Self::ServiceSave(name) | Self::ServiceRefresh(name) => {
                Some(name)
            }
            _ => None,
        }
    }
}

/// Trait for adding context to IO errors.
pub trait ErrorContext<T> {
    fn with_context<C>(self, context: C) -> std::result::Result<T, BridgeError>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> std::result::Result<T, BridgeError>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            BridgeError::Io {
                action: context(),
                source: err,
            }
        })
    }
}

pub type BridgeResult<T> = std::result::Result<T, BridgeError>;
