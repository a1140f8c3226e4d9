//! Data path resolution for the tabletop application's data directory.
//!
//! Nothing here is cached: availability is re-checked against the filesystem
//! on every call.

use std::path::{Path, PathBuf};

/// Default worlds subdirectory, relative to the data root.
pub const DEFAULT_WORLDS_DIR: &str = "Data/worlds";

/// Manifest file name inside each world directory.
pub const WORLD_MANIFEST: &str = "world.json";

/// Actor container (newline-delimited JSON) relative to a world directory.
pub const ACTOR_CONTAINER: &str = "data/actors.db";

/// Per-record actor directory relative to a world directory.
pub const ACTOR_RECORD_DIR: &str = "data/actors";

/// Resolves derived locations under a configured data root.
#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
    worlds_dir: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_worlds_dir(root, DEFAULT_WORLDS_DIR)
    }

    pub fn with_worlds_dir(root: impl Into<PathBuf>, worlds_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            worlds_dir: worlds_dir.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True iff the root exists, is a directory, and can be listed.
    pub fn is_available(&self) -> bool {
        match std::fs::metadata(&self.root) {
            Ok(meta) if meta.is_dir() => std::fs::read_dir(&self.root).is_ok(),
            _ => false,
        }
    }

    /// `root/worlds_dir`. Existence is not checked.
    pub fn worlds_path(&self) -> PathBuf {
        self.root.join(&self.worlds_dir)
    }

    /// Worlds path with symlinks and relative segments resolved, for display.
    ///
    /// Falls back to the plain join when the path cannot be resolved.
    pub fn display_worlds_path(&self) -> PathBuf {
        let worlds = self.worlds_path();
        dunce::canonicalize(&worlds).unwrap_or(worlds)
    }
}

/// Manifest location for a world directory.
pub fn manifest_path(world_dir: &Path) -> PathBuf {
    world_dir.join(WORLD_MANIFEST)
}

/// Container location for a world directory.
pub fn actor_container_path(world_dir: &Path) -> PathBuf {
    world_dir.join(ACTOR_CONTAINER)
}

/// Per-record directory location for a world directory.
pub fn actor_record_dir(world_dir: &Path) -> PathBuf {
    world_dir.join(ACTOR_RECORD_DIR)
}
