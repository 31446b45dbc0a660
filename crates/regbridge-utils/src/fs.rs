use std::{fs, path::Path};

use nix::unistd::{access, AccessFlags};

use crate::error::{FileSystemError, FileSystemResult};

pub trait FileSystemProvider {
    /// Reports whether the current process may create entries in `path`.
    ///
    /// A missing path, a path that is not a directory, or a failed access
    /// probe all report `false`; this probe never errors.
    fn is_dir_writable<P: AsRef<Path>>(&self, path: P) -> bool;

    /// Creates a directory structure if it doesn't exist.
    ///
    /// If the directory already exists, this function does nothing. If the
    /// path exists but is not a directory, an error is returned.
    ///
    /// # Errors
    ///
    /// * [`FileSystemError::Directory`] if the directory could not be created.
    /// * [`FileSystemError::NotADirectory`] if the path exists but is not a directory.
    fn ensure_dir_exists<P: AsRef<Path>>(&self, path: P) -> FileSystemResult<()>;

    /// Recursively copies the directory tree at `src` to `dst`.
    ///
    /// `dst` is created (including missing parents) and receives the same
    /// entries as `src`. Existing files in `dst` are overwritten.
    ///
    /// # Errors
    ///
    /// * [`FileSystemError::NotADirectory`] if `src` is not a directory.
    /// * [`FileSystemError::Directory`] / [`FileSystemError::File`] for
    ///   failures while reading or writing individual entries.
    fn copy_dir_all<P: AsRef<Path>, Q: AsRef<Path>>(&self, src: P, dst: Q)
        -> FileSystemResult<()>;

    /// Copies a single file, overwriting `dst` if it exists.
    ///
    /// # Errors
    ///
    /// Returns a [`FileSystemError::File`] if the copy fails.
    fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, src: P, dst: Q) -> FileSystemResult<()>;
}

#[derive(Default, Clone)]
pub struct StandardFileSystemProvider;

impl FileSystemProvider for StandardFileSystemProvider {
    fn is_dir_writable<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        path.is_dir() && access(path, AccessFlags::W_OK).is_ok()
    }

    fn ensure_dir_exists<P: AsRef<Path>>(&self, path: P) -> FileSystemResult<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path).map_err(|err| FileSystemError::Directory {
                path: path.to_path_buf(),
                action: "create",
                source: err,
            })?;
        } else if !path.is_dir() {
            return Err(FileSystemError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        Ok(())
    }

    fn copy_dir_all<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        src: P,
        dst: Q,
    ) -> FileSystemResult<()> {
        let src = src.as_ref();
        let dst = dst.as_ref();

        if !src.is_dir() {
            return Err(FileSystemError::NotADirectory {
                path: src.to_path_buf(),
            });
        }

        self.ensure_dir_exists(dst)?;

        let entries = fs::read_dir(src).map_err(|err| FileSystemError::Directory {
            path: src.to_path_buf(),
            action: "read",
            source: err,
        })?;

        for entry in entries {
            let entry = entry.map_err(|err| FileSystemError::Directory {
                path: src.to_path_buf(),
                action: "read",
                source: err,
            })?;
            let target = dst.join(entry.file_name());
            let entry_path = entry.path();

            if entry_path.is_dir() {
                self.copy_dir_all(&entry_path, &target)?;
            } else {
                self.copy_file(&entry_path, &target)?;
            }
        }

        Ok(())
    }

    fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, src: P, dst: Q) -> FileSystemResult<()> {
        let src = src.as_ref();
        fs::copy(src, dst.as_ref()).map_err(|err| FileSystemError::File {
            path: src.to_path_buf(),
            action: "copy",
            source: err,
        })?;
        Ok(())
    }
}

/// Creates a directory structure if it doesn't exist.
///
/// This is a convenience function that creates a [`StandardFileSystemProvider`]
/// and calls [`FileSystemProvider::ensure_dir_exists`] on it.
pub fn ensure_dir_exists<P: AsRef<Path>>(path: P) -> FileSystemResult<()> {
    StandardFileSystemProvider.ensure_dir_exists(path)
}

/// Recursively copies a directory tree.
///
/// This is a convenience function that creates a [`StandardFileSystemProvider`]
/// and calls [`FileSystemProvider::copy_dir_all`] on it.
pub fn copy_dir_all<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> FileSystemResult<()> {
    StandardFileSystemProvider.copy_dir_all(src, dst)
}
