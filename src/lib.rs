//! vtt-index: actor lookup across virtual-tabletop worlds
//!
//! Discovers the worlds in a tabletop application's data directory, scans
//! each world's actor storage for names and locations, and keeps an
//! in-memory index that resolves a name to the world and record it lives in.
//! The index is a read cache rebuilt on demand; nothing here writes to the
//! application's data.

pub mod actor;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod paths;
pub mod search;
pub mod tooling;
pub mod triple;
pub mod types;
pub mod world;

pub use error::{ApiError, TripleError};
pub use index::{BuildReport, IndexService, IndexStatus};
pub use paths::DataPaths;
pub use search::MatchStrength;
pub use types::{ActorIndex, ActorIndexEntry, ActorLocator, ScanFailure, WorldDescriptor};
