//! The individual heuristics of the resolution cascade.
//!
//! Each heuristic implements [`Strategy`]; the resolver iterates an
//! ordered list of them until one yields matches. Adding, removing, or
//! reordering heuristics only touches the list the resolver builds.

use regex::Regex;

use crate::catalog::{CatalogEntry, CatalogIndex};
use crate::lookup::LookupTable;

use super::MatchRule;
use super::tokens::{pattern_cascade, split_by_capitals, split_by_space, split_by_underscore};

/// One catalog identity matched by a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct MatchHit {
    /// Matched application id.
    pub app_id: i64,
    /// Display name of the matched application.
    pub name: String,
}

impl From<&CatalogEntry> for MatchHit {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            app_id: entry.id,
            name: entry.name.clone(),
        }
    }
}

/// A single resolution heuristic in the cascade.
pub(super) trait Strategy {
    /// The rule stamped on candidates this strategy produces.
    fn rule(&self) -> MatchRule;

    /// Match `folder` against the catalog and lookup table.
    ///
    /// An empty result means the heuristic has nothing to say and the
    /// next strategy in the cascade runs.
    fn attempt(&self, folder: &str, catalog: &CatalogIndex, lookup: &LookupTable)
    -> Vec<MatchHit>;
}

/// The fixed-priority strategy cascade.
pub(super) fn cascade() -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(LookupExact),
        Box::new(NameEquals),
        Box::new(NameMatches),
        Box::new(SpaceTokens),
        Box::new(CapitalTokens),
        Box::new(UnderscoreTokens),
    ]
}

/// Strategy 1: the folder equals a previously confirmed install dir.
struct LookupExact;

impl Strategy for LookupExact {
    fn rule(&self) -> MatchRule {
        MatchRule::LookupTable
    }

    fn attempt(
        &self,
        folder: &str,
        catalog: &CatalogIndex,
        lookup: &LookupTable,
    ) -> Vec<MatchHit> {
        lookup
            .by_install_dir(folder)
            .map(|entry| {
                let name = entry
                    .name
                    .clone()
                    .or_else(|| catalog.by_id(entry.app_id).map(|e| e.name.clone()))
                    .unwrap_or_else(|| folder.to_string());
                vec![MatchHit {
                    app_id: entry.app_id,
                    name,
                }]
            })
            .unwrap_or_default()
    }
}

/// Strategy 2: a catalog name equals the folder exactly.
struct NameEquals;

impl Strategy for NameEquals {
    fn rule(&self) -> MatchRule {
        MatchRule::NameEquals
    }

    fn attempt(
        &self,
        folder: &str,
        catalog: &CatalogIndex,
        _lookup: &LookupTable,
    ) -> Vec<MatchHit> {
        catalog.by_name(folder).into_iter().map(Into::into).collect()
    }
}

/// Strategy 3: the folder name occurs inside a catalog name.
struct NameMatches;

impl Strategy for NameMatches {
    fn rule(&self) -> MatchRule {
        MatchRule::NameMatches
    }

    fn attempt(
        &self,
        folder: &str,
        catalog: &CatalogIndex,
        _lookup: &LookupTable,
    ) -> Vec<MatchHit> {
        let Ok(probe) = Regex::new(&format!("(?i){}", regex::escape(folder))) else {
            return Vec::new();
        };
        catalog
            .by_pattern(|name| probe.is_match(name))
            .into_iter()
            .map(Into::into)
            .collect()
    }
}

/// Run a token cascade against the catalog, stopping at the first
/// pattern that matches anything.
fn attempt_cascade(tokens: &[&str], catalog: &CatalogIndex) -> Vec<MatchHit> {
    for pattern in pattern_cascade(tokens) {
        let hits = catalog.by_pattern(|name| pattern.is_match(name));
        if !hits.is_empty() {
            return hits.into_iter().map(Into::into).collect();
        }
    }
    Vec::new()
}

/// Strategy 4: progressively shorter patterns over space-separated words.
struct SpaceTokens;

impl Strategy for SpaceTokens {
    fn rule(&self) -> MatchRule {
        MatchRule::SpaceTokens
    }

    fn attempt(
        &self,
        folder: &str,
        catalog: &CatalogIndex,
        _lookup: &LookupTable,
    ) -> Vec<MatchHit> {
        attempt_cascade(&split_by_space(folder), catalog)
    }
}

/// Strategy 5: PascalCase decomposition, for whitespace-free folders only.
struct CapitalTokens;

impl Strategy for CapitalTokens {
    fn rule(&self) -> MatchRule {
        MatchRule::CapitalTokens
    }

    fn attempt(
        &self,
        folder: &str,
        catalog: &CatalogIndex,
        _lookup: &LookupTable,
    ) -> Vec<MatchHit> {
        if folder.contains(char::is_whitespace) {
            return Vec::new();
        }
        let tokens = split_by_capitals(folder);
        // A single word adds nothing over the earlier probes.
        if tokens.len() <= 1 {
            return Vec::new();
        }
        attempt_cascade(&tokens, catalog)
    }
}

/// Strategy 6: progressively shorter patterns over underscore segments.
struct UnderscoreTokens;

impl Strategy for UnderscoreTokens {
    fn rule(&self) -> MatchRule {
        MatchRule::UnderscoreTokens
    }

    fn attempt(
        &self,
        folder: &str,
        catalog: &CatalogIndex,
        _lookup: &LookupTable,
    ) -> Vec<MatchHit> {
        attempt_cascade(&split_by_underscore(folder), catalog)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::lookup::LookupEntry;

    fn index(entries: &[(i64, &str)]) -> CatalogIndex {
        CatalogIndex::build(
            entries
                .iter()
                .map(|&(id, name)| CatalogEntry {
                    id,
                    name: name.to_string(),
                })
                .collect(),
        )
    }

    fn ids(hits: &[MatchHit]) -> Vec<i64> {
        hits.iter().map(|h| h.app_id).collect()
    }

    #[test]
    fn lookup_exact_resolves_from_table() {
        let catalog = index(&[(400, "Portal")]);
        let mut lookup = LookupTable::new();
        lookup.insert(LookupEntry {
            app_id: 400,
            name: None,
            install_dir: "Portal".to_string(),
        });

        let hits = LookupExact.attempt("Portal", &catalog, &lookup);
        assert_eq!(ids(&hits), [400]);
        assert_eq!(hits[0].name, "Portal", "name backfilled from catalog");
    }

    #[test]
    fn lookup_exact_misses_unknown_folder() {
        let catalog = index(&[]);
        let lookup = LookupTable::new();
        assert!(LookupExact.attempt("Portal", &catalog, &lookup).is_empty());
    }

    #[test]
    fn name_equals_is_exact_and_case_sensitive() {
        let catalog = index(&[(400, "Portal"), (620, "Portal 2")]);
        let lookup = LookupTable::new();
        assert_eq!(ids(&NameEquals.attempt("Portal", &catalog, &lookup)), [400]);
        assert!(NameEquals.attempt("portal", &catalog, &lookup).is_empty());
    }

    #[test]
    fn name_matches_probes_substring_case_insensitively() {
        let catalog = index(&[(400, "Portal"), (620, "Portal 2"), (220, "Half-Life 2")]);
        let lookup = LookupTable::new();
        let hits = NameMatches.attempt("portal", &catalog, &lookup);
        assert_eq!(ids(&hits), [400, 620], "catalog order preserved");
    }

    #[test]
    fn space_tokens_fall_back_to_shorter_prefixes() {
        let catalog = index(&[(400, "Portal")]);
        let lookup = LookupTable::new();
        let hits = SpaceTokens.attempt("Portal Ultimate Edition", &catalog, &lookup);
        assert_eq!(ids(&hits), [400]);
    }

    #[test]
    fn capital_tokens_require_whitespace_free_folder() {
        let catalog = index(&[(220, "Half-Life 2")]);
        let lookup = LookupTable::new();
        assert!(
            CapitalTokens
                .attempt("Half Life", &catalog, &lookup)
                .is_empty(),
            "whitespace disables the strategy"
        );
        let hits = CapitalTokens.attempt("HalfLife2", &catalog, &lookup);
        assert_eq!(ids(&hits), [220]);
    }

    #[test]
    fn capital_tokens_yield_nothing_for_single_word() {
        let catalog = index(&[(400, "Portal")]);
        let lookup = LookupTable::new();
        assert!(CapitalTokens.attempt("Portal", &catalog, &lookup).is_empty());
        assert!(CapitalTokens.attempt("XCOM2", &catalog, &lookup).is_empty());
    }

    #[test]
    fn underscore_tokens_match_catalog_names() {
        let catalog = index(&[(220, "Half-Life 2")]);
        let lookup = LookupTable::new();
        let hits = UnderscoreTokens.attempt("half_life_2", &catalog, &lookup);
        assert_eq!(ids(&hits), [220]);
    }

    #[test]
    fn cascade_order_is_fixed() {
        let rules: Vec<MatchRule> = cascade().iter().map(|s| s.rule()).collect();
        assert_eq!(
            rules,
            [
                MatchRule::LookupTable,
                MatchRule::NameEquals,
                MatchRule::NameMatches,
                MatchRule::SpaceTokens,
                MatchRule::CapitalTokens,
                MatchRule::UnderscoreTokens,
            ]
        );
    }
}
