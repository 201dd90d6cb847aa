//! Cascading match resolver: folder names → ranked candidate identities.
//!
//! Given one on-disk folder name, a [`CatalogIndex`], the persisted
//! [`LookupTable`] and an existing-manifest collaborator, the resolver
//! runs a fixed cascade of heuristics and produces zero or more
//! [`Candidate`]s. Ambiguity and non-matches are data, never errors: a
//! folder nothing matches yields the single sentinel candidate.

mod strategy;
mod tokens;

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::catalog::CatalogIndex;
use crate::lookup::{LookupEntry, LookupTable};

use strategy::{MatchHit, Strategy, cascade};

/// App id of the sentinel "no match found" candidate.
pub const SENTINEL_APP_ID: i64 = -1;

/// Display name of the sentinel "no match found" candidate.
pub const SENTINEL_NAME: &str = "????";

/// Default ambiguity threshold: only unique matches are proposed.
pub const DEFAULT_AMBIGUITY_THRESHOLD: usize = 1;

/// Which heuristic produced a candidate (for audit and display).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Folder equalled a previously confirmed install dir.
    LookupTable,
    /// A catalog name equalled the folder exactly.
    NameEquals,
    /// The folder name occurred inside a catalog name.
    NameMatches,
    /// Matched via the space-separated token cascade.
    SpaceTokens,
    /// Matched via the PascalCase token cascade.
    CapitalTokens,
    /// Matched via the underscore token cascade.
    UnderscoreTokens,
    /// No heuristic matched; sentinel candidate.
    NotMatched,
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LookupTable => "Lookup-table",
            Self::NameEquals => "Name-equals-folder",
            Self::NameMatches => "Name-matches-folder",
            Self::SpaceTokens => "Tokenized-by-space",
            Self::CapitalTokens => "Tokenized-by-capitalization",
            Self::UnderscoreTokens => "Tokenized-by-underscore",
            Self::NotMatched => "Not Matched",
        })
    }
}

/// A proposed identity for an install folder, pending confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Proposed application id ([`SENTINEL_APP_ID`] when nothing matched).
    pub app_id: i64,
    /// Proposed display name ([`SENTINEL_NAME`] when nothing matched).
    pub name: String,
    /// Folder name being resolved.
    pub folder: String,
    /// Library root the folder lives in.
    pub library: String,
    /// Heuristic that produced this candidate.
    pub rule: MatchRule,
    /// Whether other candidates were produced for the same folder.
    pub ambiguous: bool,
}

impl Candidate {
    /// The sentinel candidate for a folder no heuristic matched.
    #[must_use]
    pub fn not_matched(folder: &str, library: &str) -> Self {
        Self {
            app_id: SENTINEL_APP_ID,
            name: SENTINEL_NAME.to_string(),
            folder: folder.to_string(),
            library: library.to_string(),
            rule: MatchRule::NotMatched,
            ambiguous: false,
        }
    }

    /// Whether this is the sentinel "no match found" candidate.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.app_id == SENTINEL_APP_ID
    }
}

/// Outcome of resolving one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An existing on-disk manifest confirmed the identity; nothing to
    /// review. The lookup table has been updated as a side effect.
    Authoritative {
        /// Confirmed application id.
        app_id: i64,
        /// Confirmed display name.
        name: String,
    },
    /// Candidates for manual confirmation (the sentinel candidate when
    /// every heuristic came up empty).
    Candidates(Vec<Candidate>),
}

/// Existing-manifest collaborator supplied by the caller.
///
/// The resolver never touches the filesystem itself; whoever drives it
/// provides the recorded install directory of an app in a library, if a
/// manifest for it exists on disk.
#[cfg_attr(test, mockall::automock)]
pub trait ManifestStore {
    /// Recorded install directory of `app_id` in `library`, when a
    /// manifest exists.
    fn install_dir_of(&self, app_id: i64, library: &str) -> Option<String>;
}

/// The cascading resolver. Pure apart from the explicit lookup-table
/// accumulator passed into [`Resolver::resolve_folder`].
pub struct Resolver<'a> {
    catalog: &'a CatalogIndex,
    manifests: &'a dyn ManifestStore,
    threshold: usize,
    strategies: Vec<Box<dyn Strategy>>,
}

impl fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("catalog_len", &self.catalog.len())
            .field("threshold", &self.threshold)
            .field("strategies", &self.strategies.len())
            .finish_non_exhaustive()
    }
}

impl<'a> Resolver<'a> {
    /// Build a resolver over a catalog snapshot and manifest collaborator.
    #[must_use]
    pub fn new(
        catalog: &'a CatalogIndex,
        manifests: &'a dyn ManifestStore,
        threshold: usize,
    ) -> Self {
        Self {
            catalog,
            manifests,
            threshold,
            strategies: cascade(),
        }
    }

    /// Resolve one folder name.
    ///
    /// Strategies run in fixed priority order; the first one whose match
    /// set survives the ambiguity threshold short-circuits the rest. A
    /// match set containing an app whose on-disk manifest records this
    /// exact folder resolves authoritatively: no candidate is emitted and
    /// the correspondence is appended to `lookup` (idempotent per id).
    pub fn resolve_folder(
        &self,
        folder: &str,
        library: &str,
        lookup: &mut LookupTable,
    ) -> Resolution {
        for strategy in &self.strategies {
            let hits = strategy.attempt(folder, self.catalog, lookup);
            if hits.is_empty() {
                continue;
            }
            let distinct = distinct_by_id(hits);

            if let Some(hit) = distinct.iter().find(|hit| {
                self.manifests.install_dir_of(hit.app_id, library).as_deref() == Some(folder)
            }) {
                debug!(
                    "folder \"{folder}\": app {} confirmed by existing manifest",
                    hit.app_id
                );
                let resolution = Resolution::Authoritative {
                    app_id: hit.app_id,
                    name: hit.name.clone(),
                };
                lookup.insert(LookupEntry {
                    app_id: hit.app_id,
                    name: Some(hit.name.clone()),
                    install_dir: folder.to_string(),
                });
                return resolution;
            }

            if distinct.len() <= self.threshold {
                let ambiguous = distinct.len() > 1;
                let rule = strategy.rule();
                return Resolution::Candidates(
                    distinct
                        .into_iter()
                        .map(|hit| Candidate {
                            app_id: hit.app_id,
                            name: hit.name,
                            folder: folder.to_string(),
                            library: library.to_string(),
                            rule,
                            ambiguous,
                        })
                        .collect(),
                );
            }

            debug!(
                "folder \"{folder}\": {} matches via {} exceed threshold {}, trying next strategy",
                distinct.len(),
                strategy.rule(),
                self.threshold
            );
        }

        Resolution::Candidates(vec![Candidate::not_matched(folder, library)])
    }
}

/// Drop duplicate app ids from a match set, keeping first occurrences.
fn distinct_by_id(hits: Vec<MatchHit>) -> Vec<MatchHit> {
    let mut seen = HashSet::new();
    hits.into_iter()
        .filter(|hit| seen.insert(hit.app_id))
        .collect()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;

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

    fn no_manifests() -> MockManifestStore {
        let mut store = MockManifestStore::new();
        store.expect_install_dir_of().returning(|_, _| None);
        store
    }

    fn candidates(resolution: Resolution) -> Vec<Candidate> {
        match resolution {
            Resolution::Candidates(list) => list,
            Resolution::Authoritative { .. } => panic!("expected candidates"),
        }
    }

    #[test]
    fn exact_name_match_yields_single_candidate() {
        let catalog = index(&[(400, "Portal")]);
        let store = no_manifests();
        let resolver = Resolver::new(&catalog, &store, 1);
        let mut lookup = LookupTable::new();

        let list = candidates(resolver.resolve_folder("Portal", "lib", &mut lookup));
        assert_eq!(
            list,
            vec![Candidate {
                app_id: 400,
                name: "Portal".to_string(),
                folder: "Portal".to_string(),
                library: "lib".to_string(),
                rule: MatchRule::NameEquals,
                ambiguous: false,
            }]
        );
        assert!(lookup.is_empty(), "plain candidates do not touch the table");
    }

    #[test]
    fn lookup_table_outranks_exact_name() {
        let catalog = index(&[(400, "Portal")]);
        let store = no_manifests();
        let resolver = Resolver::new(&catalog, &store, 1);
        let mut lookup = LookupTable::new();
        lookup.insert(LookupEntry {
            app_id: 999,
            name: Some("Remembered".to_string()),
            install_dir: "Portal".to_string(),
        });

        let list = candidates(resolver.resolve_folder("Portal", "lib", &mut lookup));
        assert_eq!(list[0].app_id, 999);
        assert_eq!(list[0].rule, MatchRule::LookupTable);
    }

    #[test]
    fn over_threshold_falls_through_to_later_strategies() {
        let catalog = index(&[(1, "Game One"), (2, "Game Two"), (3, "Game Three")]);
        let store = no_manifests();
        let resolver = Resolver::new(&catalog, &store, 1);
        let mut lookup = LookupTable::new();

        // Every pattern strategy matches all three entries, so each is
        // over the threshold and the folder ends unmatched.
        let list = candidates(resolver.resolve_folder("Game", "lib", &mut lookup));
        assert_eq!(list.len(), 1);
        assert!(list[0].is_sentinel());
        assert_eq!(list[0].rule, MatchRule::NotMatched);
    }

    #[test]
    fn within_threshold_emits_all_marked_ambiguous() {
        let catalog = index(&[(1, "Game One"), (2, "Game Two"), (3, "Game Three")]);
        let store = no_manifests();
        let resolver = Resolver::new(&catalog, &store, 3);
        let mut lookup = LookupTable::new();

        let list = candidates(resolver.resolve_folder("Game", "lib", &mut lookup));
        assert_eq!(list.len(), 3);
        assert!(list.iter().all(|c| c.ambiguous));
        assert_eq!(list[0].rule, MatchRule::NameMatches);
        let ids: Vec<i64> = list.iter().map(|c| c.app_id).collect();
        assert_eq!(ids, [1, 2, 3], "catalog order preserved");
    }

    #[test]
    fn authoritative_manifest_suppresses_candidates() {
        let catalog = index(&[(10, "Game Title"), (20, "Game Title")]);
        let mut store = MockManifestStore::new();
        store
            .expect_install_dir_of()
            .returning(|app_id, _| (app_id == 20).then(|| "Game Title".to_string()));
        let resolver = Resolver::new(&catalog, &store, 1);
        let mut lookup = LookupTable::new();

        let resolution = resolver.resolve_folder("Game Title", "lib", &mut lookup);
        assert_eq!(
            resolution,
            Resolution::Authoritative {
                app_id: 20,
                name: "Game Title".to_string(),
            }
        );
        assert_eq!(lookup.len(), 1);
        let entry = lookup.iter().next().unwrap();
        assert_eq!(entry.app_id, 20);
        assert_eq!(entry.install_dir, "Game Title");
    }

    #[test]
    fn authoritative_insert_is_idempotent() {
        let catalog = index(&[(20, "Game Title")]);
        let mut store = MockManifestStore::new();
        store
            .expect_install_dir_of()
            .returning(|_, _| Some("Game Title".to_string()));
        let resolver = Resolver::new(&catalog, &store, 1);
        let mut lookup = LookupTable::new();

        resolver.resolve_folder("Game Title", "lib", &mut lookup);
        resolver.resolve_folder("Game Title", "lib", &mut lookup);
        assert_eq!(lookup.len(), 1);
    }

    #[test]
    fn unmatched_folder_yields_exactly_one_sentinel() {
        let catalog = index(&[(400, "Portal")]);
        let store = no_manifests();
        let resolver = Resolver::new(&catalog, &store, 1);
        let mut lookup = LookupTable::new();

        let list = candidates(resolver.resolve_folder("Zzz Nothing", "lib", &mut lookup));
        assert_eq!(
            list,
            vec![Candidate {
                app_id: SENTINEL_APP_ID,
                name: SENTINEL_NAME.to_string(),
                folder: "Zzz Nothing".to_string(),
                library: "lib".to_string(),
                rule: MatchRule::NotMatched,
                ambiguous: false,
            }]
        );
        assert!(lookup.is_empty());
    }

    #[test]
    fn empty_catalog_degrades_to_unmatched() {
        let catalog = CatalogIndex::build(Vec::new());
        let store = no_manifests();
        let resolver = Resolver::new(&catalog, &store, 1);
        let mut lookup = LookupTable::new();

        let list = candidates(resolver.resolve_folder("Portal", "lib", &mut lookup));
        assert!(list[0].is_sentinel());
    }

    #[test]
    fn resolution_is_deterministic() {
        let catalog = index(&[(1, "Alpha Game"), (2, "Alpha Game II")]);
        let store = no_manifests();
        let resolver = Resolver::new(&catalog, &store, 2);
        let mut lookup_a = LookupTable::new();
        let mut lookup_b = LookupTable::new();

        let first = resolver.resolve_folder("Alpha Game", "lib", &mut lookup_a);
        let second = resolver.resolve_folder("Alpha Game", "lib", &mut lookup_b);
        assert_eq!(first, second);
    }

    #[test]
    fn rule_display_strings() {
        assert_eq!(MatchRule::LookupTable.to_string(), "Lookup-table");
        assert_eq!(MatchRule::NameEquals.to_string(), "Name-equals-folder");
        assert_eq!(MatchRule::NameMatches.to_string(), "Name-matches-folder");
        assert_eq!(MatchRule::SpaceTokens.to_string(), "Tokenized-by-space");
        assert_eq!(
            MatchRule::CapitalTokens.to_string(),
            "Tokenized-by-capitalization"
        );
        assert_eq!(
            MatchRule::UnderscoreTokens.to_string(),
            "Tokenized-by-underscore"
        );
        assert_eq!(MatchRule::NotMatched.to_string(), "Not Matched");
    }
}
