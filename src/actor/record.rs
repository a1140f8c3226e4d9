//! Actor record fields read during a scan.

use serde::Deserialize;

/// The handful of actor fields the index needs. The rest of the document
/// (stats, items, tokens, ...) is skipped by serde without being kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActorRecord {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Tombstone written by append-log containers
    #[serde(rename = "$$deleted", default)]
    pub deleted: bool,
}

impl ActorRecord {
    pub fn parse(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| format!("invalid actor document: {}", e))
    }

    /// Trimmed display name. Missing or blank names are an error.
    pub fn display_name(&self) -> Result<String, String> {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name.to_string()),
            Some(_) => Err("actor name is blank".to_string()),
            None => Err("actor has no name".to_string()),
        }
    }
}
