//! Actor Scanner: turns one world's storage into index entries.

use crate::actor::storage::{ActorStorage, ContainerStorage, DirectoryStorage};
use crate::paths;
use crate::types::{ActorIndexEntry, ScanFailure, WorldDescriptor};
use tracing::{debug, warn};

/// Entries and diagnostics for a single world.
#[derive(Debug, Clone, Default)]
pub struct WorldScan {
    pub entries: Vec<ActorIndexEntry>,
    pub failures: Vec<ScanFailure>,
}

/// Scanner configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct ActorScanner {
    follow_symlinks: bool,
}

impl ActorScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Storage backends for a world, in the order their records are indexed:
    /// the container first, then per-record files.
    fn storages(&self, world: &WorldDescriptor) -> Vec<Box<dyn ActorStorage>> {
        vec![
            Box::new(ContainerStorage::new(paths::actor_container_path(
                &world.storage_path,
            ))),
            Box::new(
                DirectoryStorage::new(paths::actor_record_dir(&world.storage_path))
                    .with_follow_symlinks(self.follow_symlinks),
            ),
        ]
    }

    /// Scan one world. Never fails: bad records become diagnostics and a
    /// world without actor storage yields an empty scan.
    pub fn scan_world(&self, world: &WorldDescriptor) -> WorldScan {
        let mut scan = WorldScan::default();

        for storage in self.storages(world) {
            let records = storage.records();
            if !records.is_empty() {
                debug!(
                    location = %storage.location(),
                    records = records.len(),
                    "Read actor storage"
                );
            }
            for result in records {
                match result {
                    Ok(stub) => scan.entries.push(ActorIndexEntry {
                        name: stub.name,
                        world: world.name.clone(),
                        locator: stub.locator,
                    }),
                    Err(failure) => {
                        warn!(
                            world = %world.id,
                            "Skipping actor record {}: {}",
                            failure.path,
                            failure.reason
                        );
                        scan.failures.push(failure);
                    }
                }
            }
        }

        debug!(
            world = %world.id,
            actors = scan.entries.len(),
            failures = scan.failures.len(),
            "Scanned world"
        );
        scan
    }
}
