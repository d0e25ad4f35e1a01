// src/workspace/mod.rs

//! Per-submission filesystem areas.
//!
//! Every submission gets its own directory under the execution root, named
//! by a fresh identifier, holding the source file and any build artifacts.
//! A [`Workspace`] is a guard: it is removed by an explicit
//! [`Workspace::release`] or, failing that, when it is dropped, so the
//! directory disappears on every exit path including panics.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::adapter::LanguageAdapter;
use crate::errors::{ExeczoneError, Result};

/// Prefix of every workspace directory name.
pub const WORKSPACE_PREFIX: &str = "ws";

/// Allocates and sweeps workspaces under a fixed execution root.
#[derive(Debug, Clone)]
pub struct WorkspaceManager {
    root: PathBuf,
}

impl WorkspaceManager {
    /// The root is created lazily on first allocation.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a fresh workspace and write `source_code` into it.
    ///
    /// The source file is named `<stem>.<extension>`, where the stem is the
    /// workspace identifier unless the adapter pins it.
    pub fn allocate(&self, source_code: &str, adapter: &dyn LanguageAdapter) -> Result<Workspace> {
        fs::create_dir_all(&self.root).map_err(|source| ExeczoneError::WorkspaceCreation {
            path: self.root.clone(),
            source,
        })?;

        let id = format!("{}{}", WORKSPACE_PREFIX, Uuid::new_v4().simple());
        let dir = self.root.join(&id);

        // `create_dir` (not `_all`) so an identifier collision is an error
        // rather than two submissions sharing a directory.
        fs::create_dir(&dir).map_err(|source| ExeczoneError::WorkspaceCreation {
            path: dir.clone(),
            source,
        })?;

        let file_name = format!("{}.{}", adapter.source_stem(&id), adapter.extension());
        let source_file = dir.join(&file_name);

        // From here on the guard owns the directory.
        let workspace = Workspace {
            id,
            dir,
            source_file,
            released: false,
        };

        fs::write(&workspace.source_file, source_code).map_err(|source| {
            ExeczoneError::WorkspaceCreation {
                path: workspace.source_file.clone(),
                source,
            }
        })?;

        debug!(
            workspace = %workspace.id,
            source = %file_name,
            "workspace allocated"
        );

        Ok(workspace)
    }

    /// Remove leftover workspace directories older than `max_age`.
    ///
    /// Only entries carrying the workspace prefix are considered. Returns the
    /// number of directories removed.
    pub fn sweep_stale(&self, max_age: Duration) -> Result<usize> {
        if !self.root.is_dir() {
            return Ok(0);
        }

        let now = SystemTime::now();
        let mut removed = 0;

        for entry in fs::read_dir(&self.root)? {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "failed to read execution root entry");
                    continue;
                }
            };

            let path = entry.path();
            let is_workspace = entry
                .file_name()
                .to_str()
                .is_some_and(|n| n.starts_with(WORKSPACE_PREFIX));
            if !is_workspace || !path.is_dir() {
                continue;
            }

            let age = entry
                .metadata()
                .and_then(|m| m.modified())
                .ok()
                .and_then(|modified| now.duration_since(modified).ok());

            match age {
                Some(age) if age >= max_age => match fs::remove_dir_all(&path) {
                    Ok(()) => {
                        info!(path = %path.display(), "removed stale workspace");
                        removed += 1;
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "failed to remove stale workspace");
                    }
                },
                _ => {}
            }
        }

        Ok(removed)
    }
}

/// One submission's directory and source file.
#[derive(Debug)]
pub struct Workspace {
    id: String,
    dir: PathBuf,
    source_file: PathBuf,
    released: bool,
}

impl Workspace {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn source_file(&self) -> &Path {
        &self.source_file
    }

    /// Source file name relative to [`Workspace::dir`].
    pub fn source_file_name(&self) -> String {
        self.source_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Recursively remove the workspace directory.
    ///
    /// Idempotent: releasing twice, or releasing a directory that is already
    /// gone, is not an error.
    pub fn release(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }

        match fs::remove_dir_all(&self.dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(ExeczoneError::IoError(e)),
        }

        self.released = true;
        debug!(workspace = %self.id, "workspace released");
        Ok(())
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!(workspace = %self.id, error = %e, "failed to release workspace on drop");
        }
    }
}
