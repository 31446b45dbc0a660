use std::{error::Error, fmt, path::PathBuf};

#[derive(Debug)]
pub enum FileSystemError {
    File {
        path: PathBuf,
        action: &'static str,
        source: std::io::Error,
    },

    Directory {
        path: PathBuf,
        action: &'static str,
        source: std::io::Error,
    },

    NotADirectory {
        path: PathBuf,
    },
}

impl fmt::Display for FileSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSystemError::File {
                path,
                action,
                source,
            } => {
                write!(f, "Failed to {action} file `{}`: {source}", path.display())
            }
            FileSystemError::Directory {
                path,
                action,
                source,
            } => {
                write!(
                    f,
                    "Failed to {action} directory `{}`: {source}",
                    path.display()
                )
            }
            FileSystemError::NotADirectory { path } => {
                write!(f, "`{}` is not a directory", path.display())
            }
        }
    }
}

impl Error for FileSystemError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FileSystemError::File { source, .. } => Some(source),
            FileSystemError::Directory { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum MountError {
    Spawn {
        command: String,
        source: std::io::Error,
    },

    BindFailed {
        source_dir: PathBuf,
        target_dir: PathBuf,
        detail: String,
    },
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountError::Spawn { command, source } => {
                write!(f, "Failed to run `{command}`: {source}")
            }
            MountError::BindFailed {
                source_dir,
                target_dir,
                detail,
            } => {
                write!(
                    f,
                    "Bind mount of `{}` over `{}` failed: {detail}",
                    source_dir.display(),
                    target_dir.display()
                )
            }
        }
    }
}

impl Error for MountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MountError::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum UtilsError {
    FileSystem(FileSystemError),
    Mount(MountError),
}

impl fmt::Display for UtilsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilsError::FileSystem(err) => write!(f, "{err}"),
            UtilsError::Mount(err) => write!(f, "{err}"),
        }
    }
}

impl Error for UtilsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            UtilsError::FileSystem(err) => Some(err),
            UtilsError::Mount(err) => Some(err),
        }
    }
}

impl From<FileSystemError> for UtilsError {
    fn from(err: FileSystemError) -> Self {
        UtilsError::FileSystem(err)
    }
}

impl From<MountError> for UtilsError {
    fn from(err: MountError) -> Self {
        UtilsError::Mount(err)
    }
}

pub type FileSystemResult<T> = std::result::Result<T, FileSystemError>;
pub type MountResult<T> = std::result::Result<T, MountError>;

pub type UtilsResult<T> = std::result::Result<T, UtilsError>;
