use std::{
    cell::RefCell,
    path::{Path, PathBuf},
};

use regbridge_utils::{
    error::{FileSystemResult, MountError, MountResult},
    fs::{FileSystemProvider, StandardFileSystemProvider},
    mount::MountProvider,
};

use crate::target::{PkgTarget, RepoInfo, Resolvable, ResolvableKind};

/// One repository known to the [`FakeTarget`].
#[derive(Clone, Debug)]
pub struct FakeRepo {
    pub src_id: u32,
    pub removed: bool,
    pub info: RepoInfo,
}

impl FakeRepo {
    pub fn new(src_id: u32, alias: &str, service: Option<&str>) -> Self {
        Self {
            src_id,
            removed: false,
            info: RepoInfo {
                alias: alias.to_string(),
                name: alias.to_string(),
                url: format!("https://updates.example.com/{alias}"),
                enabled: true,
                autorefresh: true,
                service: service.map(str::to_string),
            },
        }
    }

    pub fn removed(mut self) -> Self {
        self.removed = true;
        self
    }
}

/// Scriptable in-memory target that records every call in order.
#[derive(Default)]
pub struct FakeTarget {
    pub products: Vec<Resolvable>,
    pub repos: Vec<FakeRepo>,
    pub fail_initialize: bool,
    pub fail_load: bool,
    pub fail_save_all_sources: bool,
    /// Service names whose add/save/refresh call reports failure.
    pub fail_add_service: Option<String>,
    pub fail_save_service: Option<String>,
    pub fail_refresh_service: Option<String>,
    pub recorded: RefCell<Vec<String>>,
}

impl FakeTarget {
    pub fn calls(&self) -> Vec<String> {
        self.recorded.borrow().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.recorded.borrow_mut().push(call.into());
    }
}

impl PkgTarget for FakeTarget {
    fn initialize(&self, root: &Path) -> bool {
        self.record(format!("initialize:{}", root.display()));
        !self.fail_initialize
    }

    fn load(&self) -> bool {
        self.record("load");
        !self.fail_load
    }

    fn resolvables(&self, kind: ResolvableKind) -> Vec<Resolvable> {
        self.record(format!("resolvables:{kind:?}"));
        match kind {
            ResolvableKind::Product => self.products.clone(),
            _ => Vec::new(),
        }
    }

    fn save_all_sources(&self) -> bool {
        self.record("save_all_sources");
        !self.fail_save_all_sources
    }

    fn current_sources(&self, include_removed: bool) -> Vec<u32> {
        self.record(format!("current_sources:{include_removed}"));
        self.repos
            .iter()
            .filter(|repo| include_removed || !repo.removed)
            .map(|repo| repo.src_id)
            .collect()
    }

    fn source_general_data(&self, src_id: u32) -> Option<RepoInfo> {
        self.record(format!("source_general_data:{src_id}"));
        self.repos
            .iter()
            .find(|repo| repo.src_id == src_id)
            .map(|repo| repo.info.clone())
    }

    fn add_service(&self, name: &str, url: &str) -> bool {
        self.record(format!("add_service:{name}:{url}"));
        self.fail_add_service.as_deref() != Some(name)
    }

    fn save_service(&self, name: &str) -> bool {
        self.record(format!("save_service:{name}"));
        self.fail_save_service.as_deref() != Some(name)
    }

    fn refresh_service(&self, name: &str) -> bool {
        self.record(format!("refresh_service:{name}"));
        self.fail_refresh_service.as_deref() != Some(name)
    }
}

/// Filesystem provider with a scripted writability answer.
///
/// Everything except the writability probe is delegated to the standard
/// provider, so copies really happen inside the test's temp dirs.
pub struct FakeFs {
    pub writable: bool,
    pub copies: RefCell<Vec<(PathBuf, PathBuf)>>,
    inner: StandardFileSystemProvider,
}

impl FakeFs {
    pub fn new(writable: bool) -> Self {
        Self {
            writable,
            copies: RefCell::new(Vec::new()),
            inner: StandardFileSystemProvider,
        }
    }
}

impl FileSystemProvider for FakeFs {
    fn is_dir_writable<P: AsRef<Path>>(&self, _path: P) -> bool {
        self.writable
    }

    fn ensure_dir_exists<P: AsRef<Path>>(&self, path: P) -> FileSystemResult<()> {
        self.inner.ensure_dir_exists(path)
    }

    fn copy_dir_all<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        src: P,
        dst: Q,
    ) -> FileSystemResult<()> {
        self.copies
            .borrow_mut()
            .push((src.as_ref().to_path_buf(), dst.as_ref().to_path_buf()));
        self.inner.copy_dir_all(src, dst)
    }

    fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, src: P, dst: Q) -> FileSystemResult<()> {
        self.inner.copy_file(src, dst)
    }
}

/// Mount provider that records bind mounts instead of performing them.
#[derive(Default)]
pub struct FakeMount {
    pub fail: bool,
    pub mounts: RefCell<Vec<(PathBuf, PathBuf)>>,
}

impl MountProvider for FakeMount {
    fn bind_mount(&self, source_dir: &Path, target_dir: &Path) -> MountResult<()> {
        self.mounts
            .borrow_mut()
            .push((source_dir.to_path_buf(), target_dir.to_path_buf()));
        if self.fail {
            return Err(MountError::BindFailed {
                source_dir: source_dir.to_path_buf(),
                target_dir: target_dir.to_path_buf(),
                detail: "scripted failure".to_string(),
            });
        }
        Ok(())
    }
}
