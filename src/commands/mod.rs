//! Top-level subcommand orchestration.

pub mod adopt;
pub mod scan;

use anyhow::{Context as _, Result, bail};
use tracing::{info, warn};

use crate::catalog::{self, CatalogIndex};
use crate::cli::GlobalOpts;
use crate::library::{FsManifestStore, Library};
use crate::logging;
use crate::lookup::LookupTable;
use crate::resolver::{Candidate, Resolution, Resolver};

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates catalog loading, the ownership filter, lookup-table
/// loading, and library-root resolution so that each command does not
/// repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// Index over the (possibly ownership-filtered) catalog snapshot.
    pub index: CatalogIndex,
    /// Lookup table carried over from prior runs; grows during a run.
    pub lookup: LookupTable,
    /// Library roots to reconcile.
    pub libraries: Vec<Library>,
    /// Ambiguity threshold for the resolver.
    pub threshold: usize,
}

impl CommandSetup {
    /// Load the catalog, the lookup table, and the library roots.
    ///
    /// A missing catalog or lookup file degrades to empty data; a run
    /// without library roots has nothing to do and is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing input file fails to parse, a
    /// library root cannot be resolved, or no library roots were given.
    pub fn init(global: &GlobalOpts) -> Result<Self> {
        logging::stage("Loading catalog");
        let mut entries = match global.catalog.as_deref() {
            Some(path) => catalog::load(path)?,
            None => Vec::new(),
        };
        if let Some(path) = global.owned.as_deref()
            && let Some(owned) = catalog::load_owned_ids(path)?
        {
            let before = entries.len();
            entries.retain(|entry| owned.contains(&entry.id));
            info!("owned filter kept {} of {before} entries", entries.len());
        }
        if entries.is_empty() {
            warn!("catalog is empty; every folder will resolve as unmatched");
        } else {
            info!("{} catalog entries", entries.len());
        }
        let index = CatalogIndex::build(entries);

        logging::stage("Loading lookup table");
        let lookup = match global.lookup.as_deref() {
            Some(path) => LookupTable::load(path)?,
            None => LookupTable::new(),
        };
        info!("{} known correspondence(s)", lookup.len());

        let libraries = resolve_libraries(global)?;

        Ok(Self {
            index,
            lookup,
            libraries,
            threshold: global.threshold,
        })
    }
}

/// Canonicalise and wrap the library roots given on the command line.
fn resolve_libraries(global: &GlobalOpts) -> Result<Vec<Library>> {
    if global.libraries.is_empty() {
        bail!("no library roots given; pass --library at least once");
    }
    global
        .libraries
        .iter()
        .map(|path| {
            let canonical = dunce::canonicalize(path)
                .with_context(|| format!("resolving library root {}", path.display()))?;
            Ok(Library::new(canonical))
        })
        .collect()
}

/// A folder confirmed by an existing on-disk manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmed {
    /// Folder name that was resolved.
    pub folder: String,
    /// Library root the folder lives in.
    pub library: String,
    /// Confirmed application id.
    pub app_id: i64,
    /// Confirmed display name.
    pub name: String,
}

/// Aggregated resolution results across all libraries.
#[derive(Debug, Default)]
pub struct Report {
    /// Folders resolved authoritatively; the lookup table was updated.
    pub confirmed: Vec<Confirmed>,
    /// Proposed identities awaiting confirmation.
    pub candidates: Vec<Candidate>,
    /// Sentinel candidates for folders nothing matched.
    pub unmatched: Vec<Candidate>,
}

/// Resolve every folder of every library.
///
/// Authoritative resolutions append to `lookup` as they are found; all
/// outcomes are collected into the returned [`Report`].
///
/// # Errors
///
/// Returns an error if a library's folders cannot be listed.
pub fn resolve_all(
    index: &CatalogIndex,
    lookup: &mut LookupTable,
    libraries: &[Library],
    threshold: usize,
) -> Result<Report> {
    let store = FsManifestStore;
    let resolver = Resolver::new(index, &store, threshold);
    let mut report = Report::default();

    for library in libraries {
        let library_name = library.display_name();
        logging::stage(&format!("Scanning {library_name}"));
        let folders = library.folders()?;
        info!("{} folder(s) to reconcile", folders.len());

        for folder in folders {
            match resolver.resolve_folder(&folder, &library_name, lookup) {
                Resolution::Authoritative { app_id, name } => {
                    info!("{folder}: confirmed as \"{name}\" ({app_id}) by existing manifest");
                    report.confirmed.push(Confirmed {
                        folder,
                        library: library_name.clone(),
                        app_id,
                        name,
                    });
                }
                Resolution::Candidates(list) => {
                    for candidate in list {
                        if candidate.is_sentinel() {
                            warn!("{}: no match found", candidate.folder);
                            report.unmatched.push(candidate);
                        } else {
                            let note = if candidate.ambiguous { ", ambiguous" } else { "" };
                            info!(
                                "{}: \"{}\" ({}) [{}{note}]",
                                candidate.folder, candidate.name, candidate.app_id, candidate.rule
                            );
                            report.candidates.push(candidate);
                        }
                    }
                }
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::record;
    use crate::vdf::encode;
    use std::path::PathBuf;

    fn global_with(root: &std::path::Path) -> GlobalOpts {
        GlobalOpts {
            dry_run: false,
            catalog: None,
            lookup: None,
            owned: None,
            libraries: vec![root.to_path_buf()],
            threshold: 1,
        }
    }

    fn make_library(folders: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        let common = dir.path().join("steamapps").join("common");
        std::fs::create_dir_all(&common).expect("create common dir");
        for folder in folders {
            std::fs::create_dir_all(common.join(folder)).expect("create folder");
        }
        dir
    }

    #[test]
    fn init_fails_without_libraries() {
        let global = GlobalOpts {
            dry_run: false,
            catalog: None,
            lookup: None,
            owned: None,
            libraries: Vec::new(),
            threshold: 1,
        };
        let err = CommandSetup::init(&global).unwrap_err();
        assert!(err.to_string().contains("no library roots"));
    }

    #[test]
    fn init_fails_for_missing_library_root() {
        let mut global = global_with(&PathBuf::from("/does/not/exist"));
        global.libraries = vec![PathBuf::from("/does/not/exist/steamshelf-test")];
        assert!(CommandSetup::init(&global).is_err());
    }

    #[test]
    fn init_degrades_to_empty_inputs() {
        let dir = make_library(&[]);
        let setup = CommandSetup::init(&global_with(dir.path())).unwrap();
        assert!(setup.index.is_empty());
        assert!(setup.lookup.is_empty());
        assert_eq!(setup.libraries.len(), 1);
    }

    #[test]
    fn init_applies_owned_filter() {
        let dir = make_library(&[]);
        let catalog_path = dir.path().join("catalog.json");
        std::fs::write(
            &catalog_path,
            r#"[{"appid": 400, "name": "Portal"}, {"appid": 620, "name": "Portal 2"}]"#,
        )
        .unwrap();
        let owned_path = dir.path().join("owned.json");
        std::fs::write(&owned_path, "[620]").unwrap();

        let mut global = global_with(dir.path());
        global.catalog = Some(catalog_path);
        global.owned = Some(owned_path);

        let setup = CommandSetup::init(&global).unwrap();
        assert_eq!(setup.index.len(), 1);
        assert!(setup.index.by_id(620).is_some());
    }

    #[test]
    fn resolve_all_collects_every_outcome_kind() {
        let dir = make_library(&["Portal", "Game Title", "Zzz Nothing"]);
        // An existing manifest for app 20 recorded under "Game Title"
        // makes that folder authoritative.
        let manifest = encode(&record::build(20, "Game Title", "Game Title")).unwrap();
        std::fs::write(record::manifest_path(dir.path(), 20), manifest).unwrap();

        let index = CatalogIndex::build(vec![
            CatalogEntry {
                id: 400,
                name: "Portal".to_string(),
            },
            CatalogEntry {
                id: 10,
                name: "Game Title".to_string(),
            },
            CatalogEntry {
                id: 20,
                name: "Game Title".to_string(),
            },
        ]);
        let mut lookup = LookupTable::new();
        let libraries = vec![Library::new(dir.path())];

        let report = resolve_all(&index, &mut lookup, &libraries, 1).unwrap();

        assert_eq!(report.confirmed.len(), 1);
        assert_eq!(report.confirmed[0].app_id, 20);
        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.candidates[0].app_id, 400);
        assert_eq!(report.unmatched.len(), 1);
        assert_eq!(report.unmatched[0].folder, "Zzz Nothing");
        assert!(lookup.contains_id(20));
    }
}
