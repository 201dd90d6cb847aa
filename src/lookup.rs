//! Persisted folder → app lookup table.
//!
//! The table is the cheapest resolution strategy and the accumulator for
//! confirmed matches: once a folder is definitively tied to an app id the
//! pair is recorded here so later runs resolve it without touching the
//! catalog.

use std::path::Path;

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

/// One persisted correspondence from a prior run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    /// Confirmed application id.
    #[serde(rename = "AppID")]
    pub app_id: i64,
    /// Display name at the time the match was confirmed, when known.
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Folder name under the library's common directory.
    #[serde(rename = "InstallDir")]
    pub install_dir: String,
}

/// Accumulator of confirmed folder → app correspondences.
///
/// Insertion order is preserved on write; inserts are idempotent per app
/// id: recording an already-known id is a no-op, never a duplicate.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LookupTable {
    entries: Vec<LookupEntry>,
}

impl LookupTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from raw entries, suppressing duplicate ids.
    #[must_use]
    pub fn from_entries(entries: Vec<LookupEntry>) -> Self {
        let mut table = Self::new();
        for entry in entries {
            table.insert(entry);
        }
        table
    }

    /// Load the table from a JSON file.
    ///
    /// A missing file yields an empty table; absence of prior
    /// correspondences is a normal state, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        let entries: Vec<LookupEntry> = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Self::from_entries(entries))
    }

    /// Write the table back out as a JSON array, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(&self.entries).context("serialising lookup table")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
    }

    /// Record a correspondence. Returns `false` when the id was already
    /// present (the existing entry is kept untouched).
    pub fn insert(&mut self, entry: LookupEntry) -> bool {
        if self.contains_id(entry.app_id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Whether an app id is already recorded.
    #[must_use]
    pub fn contains_id(&self, app_id: i64) -> bool {
        self.entries.iter().any(|e| e.app_id == app_id)
    }

    /// The first entry whose install dir equals `install_dir` exactly.
    #[must_use]
    pub fn by_install_dir(&self, install_dir: &str) -> Option<&LookupEntry> {
        self.entries.iter().find(|e| e.install_dir == install_dir)
    }

    /// All entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LookupEntry> {
        self.entries.iter()
    }

    /// Number of recorded correspondences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
