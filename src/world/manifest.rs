//! World manifest (`world.json`) with explicit optional fields.

use serde::Deserialize;
use std::path::Path;

/// Fields read from a world manifest. Everything else in the file is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorldManifest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl WorldManifest {
    /// Read and parse a manifest file. The error is a human-readable reason.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                "manifest not found".to_string()
            } else {
                format!("failed to read manifest: {}", e)
            }
        })?;
        serde_json::from_str(&content).map_err(|e| format!("failed to parse manifest: {}", e))
    }

    /// `title`, then `name`, then `fallback`. Blank strings count as absent.
    pub fn display_name(&self, fallback: &str) -> String {
        [self.title.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}
