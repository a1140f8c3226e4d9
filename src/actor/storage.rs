//! Actor storage backends.
//!
//! Both layouts a world can use are exposed through [`ActorStorage`] as a
//! flat list of per-record results, so the scanner never needs to know which
//! one it is reading.

use crate::actor::record::ActorRecord;
use crate::types::{ActorLocator, ScanFailure};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use walkdir::WalkDir;

/// Name and locator of one actor, without the rest of its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorStub {
    pub name: String,
    pub locator: ActorLocator,
}

pub type RecordResult = Result<ActorStub, ScanFailure>;

/// An enumerable source of actor records.
pub trait ActorStorage {
    /// Location shown in logs.
    fn location(&self) -> String;

    /// All records in storage order. A missing store yields nothing.
    fn records(&self) -> Vec<RecordResult>;
}

/// Newline-delimited JSON container with append-log semantics.
///
/// A later line with the same `_id` replaces the earlier record in place,
/// and a `$$deleted` line removes it.
pub struct ContainerStorage {
    path: PathBuf,
}

impl ContainerStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ActorStorage for ContainerStorage {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn records(&self) -> Vec<RecordResult> {
        if !self.path.is_file() {
            return Vec::new();
        }

        let file = match std::fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                return vec![Err(ScanFailure::record(
                    self.path.display(),
                    format!("failed to open container: {}", e),
                ))]
            }
        };

        let mut slots: Vec<Option<RecordResult>> = Vec::new();
        let mut by_id: HashMap<String, usize> = HashMap::new();

        let mut reader = BufReader::new(file);
        let mut raw = Vec::new();
        let mut line_no = 0;
        loop {
            raw.clear();
            match reader.read_until(b'\n', &mut raw) {
                Ok(0) => break,
                Ok(_) => line_no += 1,
                Err(e) => {
                    slots.push(Some(Err(ScanFailure::record(
                        self.path.display(),
                        format!("failed to read container after line {}: {}", line_no, e),
                    ))));
                    break;
                }
            }
            let locator = ActorLocator::Record {
                container: self.path.clone(),
                line: line_no,
            };
            let line = match std::str::from_utf8(&raw) {
                Ok(l) => l,
                Err(e) => {
                    slots.push(Some(Err(ScanFailure::record(
                        &locator,
                        format!("line is not valid UTF-8: {}", e),
                    ))));
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let record = match ActorRecord::parse(line) {
                Ok(r) => r,
                Err(reason) => {
                    slots.push(Some(Err(ScanFailure::record(&locator, reason))));
                    continue;
                }
            };

            if record.deleted {
                if let Some(id) = record.id.as_deref() {
                    if let Some(slot) = by_id.remove(id) {
                        slots[slot] = None;
                    }
                }
                continue;
            }

            let result = record
                .display_name()
                .map(|name| ActorStub {
                    name,
                    locator: locator.clone(),
                })
                .map_err(|reason| ScanFailure::record(&locator, reason));

            match record.id {
                Some(id) => match by_id.get(&id) {
                    Some(&slot) => slots[slot] = Some(result),
                    None => {
                        by_id.insert(id, slots.len());
                        slots.push(Some(result));
                    }
                },
                None => slots.push(Some(result)),
            }
        }

        slots.into_iter().flatten().collect()
    }
}

/// Directory of one JSON document per actor, walked in path order.
pub struct DirectoryStorage {
    root: PathBuf,
    follow_symlinks: bool,
}

impl DirectoryStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_symlinks: false,
        }
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

impl ActorStorage for DirectoryStorage {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn records(&self) -> Vec<RecordResult> {
        if !self.root.is_dir() {
            return Vec::new();
        }

        let walker = WalkDir::new(&self.root)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name();

        let mut out = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    let path = e
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| self.location());
                    out.push(Err(ScanFailure::record(path, e.to_string())));
                    continue;
                }
            };
            if !entry.file_type().is_file()
                || entry.path().extension() != Some(OsStr::new("json"))
            {
                continue;
            }

            let path = entry.into_path();
            let raw = match std::fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(e) => {
                    out.push(Err(ScanFailure::record(
                        path.display(),
                        format!("failed to read record: {}", e),
                    )));
                    continue;
                }
            };

            let result = ActorRecord::parse(&raw).and_then(|record| {
                if record.deleted {
                    Ok(None)
                } else {
                    record.display_name().map(Some)
                }
            });
            match result {
                Ok(Some(name)) => out.push(Ok(ActorStub {
                    name,
                    locator: ActorLocator::File { path },
                })),
                Ok(None) => {}
                Err(reason) => out.push(Err(ScanFailure::record(path.display(), reason))),
            }
        }
        out
    }
}
