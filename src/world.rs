//! World Discovery
//!
//! Lists the world directories under the worlds path and reads each manifest.
//! A world with a missing or broken manifest is still included, named after
//! its directory, and the problem is recorded as a [`ScanFailure`]. Hidden
//! directories (names starting with `.`) are never worlds.

pub mod manifest;

pub use manifest::WorldManifest;

use crate::error::ApiError;
use crate::paths::{self, DataPaths};
use crate::types::{ScanFailure, WorldDescriptor};
use tracing::{debug, warn};

/// Worlds found by one discovery pass, in directory-name order.
#[derive(Debug, Clone, Default)]
pub struct WorldCatalog {
    pub worlds: Vec<WorldDescriptor>,
    pub failures: Vec<ScanFailure>,
}

/// Discover worlds under `paths.worlds_path()`.
///
/// Fails only when the worlds directory itself cannot be listed.
pub fn discover(paths: &DataPaths) -> Result<WorldCatalog, ApiError> {
    let worlds_path = paths.worlds_path();
    let entries = std::fs::read_dir(&worlds_path).map_err(|source| ApiError::Discovery {
        path: worlds_path.clone(),
        source,
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(
                    "Failed to read directory entry in {}: {}",
                    worlds_path.display(),
                    e
                );
                continue;
            }
        };

        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let dir_name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!("Skipping world directory with non UTF8 name: {:?}", raw);
                continue;
            }
        };
        if dir_name.starts_with('.') {
            debug!(path = %path.display(), "Skipping hidden world directory");
            continue;
        }

        dirs.push((dir_name, path));
    }

    dirs.sort_by(|a, b| a.0.cmp(&b.0));

    let mut catalog = WorldCatalog::default();
    for (dir_name, path) in dirs {
        let manifest_path = paths::manifest_path(&path);
        let name = match WorldManifest::load(&manifest_path) {
            Ok(manifest) => {
                if let Some(id) = manifest.id.as_deref() {
                    if id != dir_name {
                        warn!(
                            "World id mismatch in {}: directory={}, manifest={}",
                            manifest_path.display(),
                            dir_name,
                            id
                        );
                    }
                }
                manifest.display_name(&dir_name)
            }
            Err(reason) => {
                warn!(
                    "World {} has an unusable manifest ({}), using directory name",
                    dir_name, reason
                );
                catalog
                    .failures
                    .push(ScanFailure::world(manifest_path.display(), reason));
                dir_name.clone()
            }
        };

        debug!(world = %dir_name, name = %name, "Discovered world");
        catalog.worlds.push(WorldDescriptor {
            id: dir_name,
            name,
            storage_path: path,
        });
    }

    Ok(catalog)
}

/// Discover worlds and drop the diagnostics.
pub fn list_worlds(paths: &DataPaths) -> Result<Vec<WorldDescriptor>, ApiError> {
    discover(paths).map(|catalog| catalog.worlds)
}
