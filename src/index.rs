//! Index Builder
//!
//! Runs world discovery and the actor scanner over every world, then swaps
//! the result in as the current [`ActorIndex`].
//!
//! The held index sits behind `RwLock<Arc<ActorIndex>>`. The lock only
//! guards the pointer: readers clone the `Arc` and search without holding
//! it, and a build holds the write lock just long enough to swap. Readers
//! therefore see either the old index or the new one, never a partial one.
//!
//! Builds are not serialized. Each build takes a generation number when it
//! starts and installs only if no newer build has installed already, so a
//! slow stale build cannot overwrite a fresher one.

use crate::actor::{ActorScanner, WorldScan};
use crate::config::IndexerConfig;
use crate::error::ApiError;
use crate::paths::DataPaths;
use crate::types::{ActorIndex, ActorIndexEntry, ScanFailure, WorldDescriptor};
use crate::world::{self, WorldCatalog};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Outcome of one build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// New entries in index order
    pub entries: Vec<ActorIndexEntry>,
    pub worlds: Vec<WorldDescriptor>,
    /// World and record failures absorbed during the build
    pub failures: Vec<ScanFailure>,
    pub built_at: DateTime<Utc>,
    pub duration_ms: u64,
    /// False when a newer build had already installed its result
    pub installed: bool,
}

/// Summary of the currently held index.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStatus {
    pub available: bool,
    pub worlds_path: String,
    pub entry_count: usize,
    pub world_count: usize,
    pub failure_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub built_at: Option<DateTime<Utc>>,
}

/// Owns the current index and rebuilds it on demand.
pub struct IndexService {
    paths: DataPaths,
    scanner: ActorScanner,
    current: RwLock<Arc<ActorIndex>>,
    next_generation: AtomicU64,
}

impl IndexService {
    /// Create a service with an empty index.
    pub fn new(paths: DataPaths, scanner: ActorScanner) -> Self {
        Self {
            paths,
            scanner,
            current: RwLock::new(Arc::new(ActorIndex::default())),
            next_generation: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &IndexerConfig) -> Result<Self, ApiError> {
        let paths = config.data.data_paths()?;
        let scanner = ActorScanner::new().with_follow_symlinks(config.scan.follow_symlinks);
        Ok(Self::new(paths, scanner))
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    pub fn is_available(&self) -> bool {
        self.paths.is_available()
    }

    /// Freshly discovered worlds. Not cached.
    pub fn list_worlds(&self) -> Result<Vec<WorldDescriptor>, ApiError> {
        world::list_worlds(&self.paths)
    }

    /// The currently installed index.
    pub fn snapshot(&self) -> Arc<ActorIndex> {
        self.current.read().clone()
    }

    pub fn status(&self) -> IndexStatus {
        let index = self.snapshot();
        IndexStatus {
            available: self.is_available(),
            worlds_path: self.paths.display_worlds_path().display().to_string(),
            entry_count: index.len(),
            world_count: index.world_count,
            failure_count: index.failure_count,
            built_at: index.built_at,
        }
    }

    /// Best match in the current index.
    pub fn search_actor(&self, query: &str) -> Option<ActorIndexEntry> {
        self.snapshot().search_actor(query).cloned()
    }

    /// All matches in the current index.
    pub fn search_actors(&self, query: &str) -> Vec<ActorIndexEntry> {
        self.snapshot()
            .search_actors(query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Rebuild from disk, scanning worlds one after another.
    pub fn build_index(&self) -> Result<BuildReport, ApiError> {
        let started = Instant::now();
        let generation = self.begin_build();
        let catalog = world::discover(&self.paths)?;
        let scans = catalog
            .worlds
            .iter()
            .map(|w| self.scanner.scan_world(w))
            .collect();
        Ok(self.finish_build(generation, catalog, scans, started))
    }

    /// Rebuild from disk, scanning each world on the blocking pool.
    ///
    /// Results are joined in discovery order, so the entry order matches
    /// [`IndexService::build_index`].
    pub async fn build_index_concurrent(&self) -> Result<BuildReport, ApiError> {
        let started = Instant::now();
        let generation = self.begin_build();

        let paths = self.paths.clone();
        let catalog = tokio::task::spawn_blocking(move || world::discover(&paths))
            .await
            .map_err(|e| ApiError::Join(e.to_string()))??;

        let tasks = catalog.worlds.iter().cloned().map(|world| {
            let scanner = self.scanner;
            tokio::task::spawn_blocking(move || scanner.scan_world(&world))
        });
        let mut scans = Vec::with_capacity(catalog.worlds.len());
        for joined in futures::future::join_all(tasks).await {
            scans.push(joined.map_err(|e| ApiError::Join(e.to_string()))?);
        }

        Ok(self.finish_build(generation, catalog, scans, started))
    }

    fn begin_build(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn finish_build(
        &self,
        generation: u64,
        catalog: WorldCatalog,
        scans: Vec<WorldScan>,
        started: Instant,
    ) -> BuildReport {
        let WorldCatalog { worlds, mut failures } = catalog;
        let mut entries = Vec::new();
        for scan in scans {
            entries.extend(scan.entries);
            failures.extend(scan.failures);
        }

        let built_at = Utc::now();
        let mut index = ActorIndex::from_entries(entries.clone());
        index.built_at = Some(built_at);
        index.world_count = worlds.len();
        index.failure_count = failures.len();
        index.generation = generation;

        let installed = self.install(index);
        let duration_ms = started.elapsed().as_millis() as u64;
        if installed {
            info!(
                entries = entries.len(),
                worlds = worlds.len(),
                failures = failures.len(),
                duration_ms,
                "Actor index rebuilt"
            );
        } else {
            warn!(
                generation,
                "Discarding actor index build, a newer build already installed"
            );
        }

        BuildReport {
            entries,
            worlds,
            failures,
            built_at,
            duration_ms,
            installed,
        }
    }

    fn install(&self, index: ActorIndex) -> bool {
        let mut current = self.current.write();
        if index.generation <= current.generation {
            return false;
        }
        *current = Arc::new(index);
        true
    }
}
