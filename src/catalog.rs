//! Remote app catalog: entry type, JSON loading, and lookup indexes.
//!
//! The catalog is supplied externally as plain data (the HTTP collaborator
//! is out of scope); this module parses the two JSON shapes it arrives in
//! and builds the read-only [`CatalogIndex`] the resolver queries.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Deserialize;

/// One application in the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    /// Numeric application id.
    #[serde(rename = "appid")]
    pub id: i64,
    /// Display name. Names are not unique across the catalog.
    pub name: String,
}

/// The full app-list JSON shape: `{"applist": {"apps": [...]}}`.
#[derive(Debug, Deserialize)]
struct AppList {
    applist: Apps,
}

#[derive(Debug, Deserialize)]
struct Apps {
    apps: Vec<CatalogEntry>,
}

/// Owned-games JSON shapes accepted by [`parse_owned_ids`].
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwnedList {
    /// A flat array of ids.
    Ids(Vec<i64>),
    /// An array of `{"appid": ..}` records.
    Apps(Vec<OwnedApp>),
    /// The owned-games response shape `{"response": {"games": [...]}}`.
    Response {
        /// Response envelope.
        response: OwnedGames,
    },
}

#[derive(Debug, Deserialize)]
struct OwnedApp {
    appid: i64,
}

#[derive(Debug, Deserialize)]
struct OwnedGames {
    #[serde(default)]
    games: Vec<OwnedApp>,
}

/// Load catalog entries from a JSON file.
///
/// Accepts either the app-list shape (`{"applist": {"apps": [...]}}`) or a
/// flat array of `{"appid", "name"}` records. A missing or empty file
/// yields an empty catalog, and the resolver degrades to "everything
/// unmatched" rather than failing.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load(path: &Path) -> Result<Vec<CatalogEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Parse catalog JSON from a string (for testing).
///
/// # Examples
///
/// ```
/// use steamshelf::catalog::parse;
///
/// let entries = parse(r#"[{"appid": 400, "name": "Portal"}]"#).unwrap();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].id, 400);
/// ```
///
/// # Errors
///
/// Returns an error if the content matches neither accepted shape.
pub fn parse(content: &str) -> Result<Vec<CatalogEntry>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    if let Ok(list) = serde_json::from_str::<AppList>(content) {
        return Ok(list.applist.apps);
    }
    serde_json::from_str::<Vec<CatalogEntry>>(content).context("catalog JSON shape not recognised")
}

/// Load an owned-app id set from a JSON file.
///
/// A missing file yields `None`, meaning "no ownership filter".
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_owned_ids(path: &Path) -> Result<Option<HashSet<i64>>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_owned_ids(&content)
        .with_context(|| format!("parsing {}", path.display()))
        .map(Some)
}

/// Parse an owned-app id set from a string (for testing).
///
/// Accepts a flat id array, an array of `{"appid": ..}` records, or the
/// owned-games response shape.
///
/// # Errors
///
/// Returns an error if the content matches none of the accepted shapes.
pub fn parse_owned_ids(content: &str) -> Result<HashSet<i64>> {
    let list: OwnedList =
        serde_json::from_str(content).context("owned-list JSON shape not recognised")?;
    let ids = match list {
        OwnedList::Ids(ids) => ids,
        OwnedList::Apps(apps) => apps.into_iter().map(|a| a.appid).collect(),
        OwnedList::Response { response } => {
            response.games.into_iter().map(|a| a.appid).collect()
        }
    };
    Ok(ids.into_iter().collect())
}

/// Read-only lookup structure over a fixed catalog snapshot.
///
/// Rebuilt whenever the catalog changes, never mutated in place. Name and
/// id lookups are hash-indexed; pattern lookups scan the catalog in its
/// original order so results are deterministic.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    entries: Vec<CatalogEntry>,
    by_name: HashMap<String, Vec<usize>>,
    by_id: HashMap<i64, usize>,
}

impl CatalogIndex {
    /// Build the index over a catalog snapshot.
    ///
    /// Duplicate names are expected and retained as multi-valued; for
    /// duplicate ids the last entry wins in the id index.
    #[must_use]
    pub fn build(entries: Vec<CatalogEntry>) -> Self {
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::with_capacity(entries.len());
        let mut by_id: HashMap<i64, usize> = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            by_name.entry(entry.name.clone()).or_default().push(index);
            by_id.insert(entry.id, index);
        }
        Self {
            entries,
            by_name,
            by_id,
        }
    }

    /// All entries whose name equals `name` exactly, in catalog order.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Vec<&CatalogEntry> {
        self.by_name
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(|&index| self.entries.get(index))
            .collect()
    }

    /// The entry with the given id, if present.
    #[must_use]
    pub fn by_id(&self, id: i64) -> Option<&CatalogEntry> {
        self.by_id
            .get(&id)
            .and_then(|&index| self.entries.get(index))
    }

    /// All entries whose name satisfies `predicate`, in catalog order.
    ///
    /// Necessarily a linear scan; this is the hot path exercised once per
    /// unmatched folder per strategy.
    pub fn by_pattern<P>(&self, predicate: P) -> Vec<&CatalogEntry>
    where
        P: Fn(&str) -> bool,
    {
        self.entries
            .iter()
            .filter(|entry| predicate(&entry.name))
            .collect()
    }

    /// Number of entries in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
