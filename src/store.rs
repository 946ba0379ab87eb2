use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The last-observed release for a tracked repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    /// Tag string identifying the release; the novelty key
    pub tag_name: String,
    /// Display name, falls back to the tag when the release is unnamed
    pub name: String,
    /// Publication time, absent for releases synthesized from bare tags
    pub published_at: Option<DateTime<Utc>>,
    /// Canonical release page URL
    pub html_url: String,
    /// Free-text release notes
    pub body: Option<String>,
}

/// Mapping from "owner/name" repository identifier to its last-seen release.
/// This is the only durable state; it is rewritten in full at the end of a run.
pub type ReleaseStore = BTreeMap<String, ReleaseInfo>;

/// Load the persisted store, or an empty one on first run.
pub fn load(path: &Path) -> Result<ReleaseStore> {
    if !path.exists() {
        return Ok(ReleaseStore::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read release store {}", path.display()))?;
    let store: ReleaseStore = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse release store {}", path.display()))?;
    Ok(store)
}

/// Overwrite the persisted store with the in-memory mapping.
pub fn save(path: &Path, store: &ReleaseStore) -> Result<()> {
    let content = serde_json::to_string_pretty(store).context("Failed to serialize release store")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write release store {}", path.display()))?;
    Ok(())
}
