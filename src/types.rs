//! Core types for the actor index.

use crate::error::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::str::FromStr;

/// One world found under the worlds directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldDescriptor {
    /// Directory name; unique within the worlds directory
    pub id: String,
    /// Display name from the manifest, or the directory name
    pub name: String,
    pub storage_path: PathBuf,
}

/// Where an actor record lives on disk.
///
/// Text form: a `File` is its path; a `Record` is `<container>#L<line>`
/// with a 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActorLocator {
    /// One document per file
    File { path: PathBuf },
    /// One line of a newline-delimited container
    Record { container: PathBuf, line: usize },
}

const LINE_MARKER: &str = "#L";

impl ActorLocator {
    /// Re-read the full actor document this locator points at.
    pub fn open(&self) -> Result<serde_json::Value, ApiError> {
        let raw = match self {
            ActorLocator::File { path } => std::fs::read_to_string(path).map_err(|e| {
                ApiError::Locator(format!("Failed to read {}: {}", path.display(), e))
            })?,
            ActorLocator::Record { container, line } => {
                let file = std::fs::File::open(container).map_err(|e| {
                    ApiError::Locator(format!("Failed to open {}: {}", container.display(), e))
                })?;
                let index = line.checked_sub(1).ok_or_else(|| {
                    ApiError::Locator(format!("Line numbers start at 1: {}", self))
                })?;
                BufReader::new(file)
                    .lines()
                    .nth(index)
                    .transpose()
                    .map_err(|e| {
                        ApiError::Locator(format!("Failed to read {}: {}", container.display(), e))
                    })?
                    .ok_or_else(|| {
                        ApiError::Locator(format!("{} has no line {}", container.display(), line))
                    })?
            }
        };

        serde_json::from_str(&raw)
            .map_err(|e| ApiError::Locator(format!("Record at {} is not valid JSON: {}", self, e)))
    }
}

impl fmt::Display for ActorLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorLocator::File { path } => write!(f, "{}", path.display()),
            ActorLocator::Record { container, line } => {
                write!(f, "{}{}{}", container.display(), LINE_MARKER, line)
            }
        }
    }
}

impl FromStr for ActorLocator {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ApiError::Locator("Empty locator".to_string()));
        }
        if let Some((container, line)) = s.rsplit_once(LINE_MARKER) {
            if !container.is_empty() && !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
            {
                if let Ok(line) = line.parse::<usize>() {
                    if line > 0 {
                        return Ok(ActorLocator::Record {
                            container: PathBuf::from(container),
                            line,
                        });
                    }
                }
            }
        }
        Ok(ActorLocator::File {
            path: PathBuf::from(s),
        })
    }
}

impl Serialize for ActorLocator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ActorLocator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Lightweight index row for one actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorIndexEntry {
    pub name: String,
    /// Display name of the owning world
    pub world: String,
    pub locator: ActorLocator,
}

/// Which level a scan failure happened at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// Manifest unreadable or malformed
    World,
    /// Single actor record unreadable or malformed
    Record,
}

/// A non-fatal problem recorded during discovery or scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFailure {
    pub kind: FailureKind,
    pub path: String,
    pub reason: String,
}

impl ScanFailure {
    pub fn world(path: impl fmt::Display, reason: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::World,
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub fn record(path: impl fmt::Display, reason: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Record,
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// A complete, immutable build result held by the index service.
#[derive(Debug, Clone, Default)]
pub struct ActorIndex {
    pub(crate) entries: Vec<ActorIndexEntry>,
    /// Normalized names, parallel to `entries`
    pub(crate) keys: Vec<String>,
    /// None until the first build installs
    pub built_at: Option<DateTime<Utc>>,
    pub world_count: usize,
    pub failure_count: usize,
    pub(crate) generation: u64,
}

impl ActorIndex {
    /// Index over `entries` with no build metadata.
    pub fn from_entries(entries: Vec<ActorIndexEntry>) -> Self {
        let keys = entries
            .iter()
            .map(|e| crate::search::normalize(&e.name))
            .collect();
        Self {
            entries,
            keys,
            ..Self::default()
        }
    }

    /// Entries in index order.
    pub fn entries(&self) -> &[ActorIndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
