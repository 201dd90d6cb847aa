//! The `scan` command: resolve library folders and report candidates.

use anyhow::Result;
use tracing::info;

use super::{CommandSetup, resolve_all};
use crate::cli::GlobalOpts;
use crate::logging;

/// Run the scan command.
///
/// Resolves every folder of every given library and reports the outcome;
/// nothing is written to disk, so a scan is always safe to run.
///
/// # Errors
///
/// Returns an error if setup fails or a library cannot be listed.
pub fn run(global: &GlobalOpts) -> Result<()> {
    let mut setup = CommandSetup::init(global)?;
    let report = resolve_all(
        &setup.index,
        &mut setup.lookup,
        &setup.libraries,
        setup.threshold,
    )?;

    logging::stage("Summary");
    let ambiguous = report.candidates.iter().filter(|c| c.ambiguous).count();
    info!(
        "{} confirmed, {} candidate(s) ({ambiguous} ambiguous), {} unmatched",
        report.confirmed.len(),
        report.candidates.len(),
        report.unmatched.len()
    );
    if !report.candidates.is_empty() {
        info!("run `steamshelf adopt` to write install records for unambiguous candidates");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::path::Path;

    fn library_with_folders(folders: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        let common = dir.path().join("steamapps").join("common");
        std::fs::create_dir_all(&common).expect("create common dir");
        for folder in folders {
            std::fs::create_dir_all(common.join(folder)).expect("create folder");
        }
        dir
    }

    fn global_for(root: &Path, catalog: Option<&Path>) -> GlobalOpts {
        GlobalOpts {
            dry_run: false,
            catalog: catalog.map(Path::to_path_buf),
            lookup: None,
            owned: None,
            libraries: vec![root.to_path_buf()],
            threshold: 1,
        }
    }

    #[test]
    fn scan_succeeds_and_writes_nothing() {
        let dir = library_with_folders(&["Portal"]);
        let catalog_path = dir.path().join("catalog.json");
        std::fs::write(&catalog_path, r#"[{"appid": 400, "name": "Portal"}]"#).unwrap();

        run(&global_for(dir.path(), Some(&catalog_path))).unwrap();

        assert!(
            !crate::record::manifest_path(dir.path(), 400).exists(),
            "scan must never write manifests"
        );
    }

    #[test]
    fn scan_with_empty_catalog_still_succeeds() {
        let dir = library_with_folders(&["Anything"]);
        run(&global_for(dir.path(), None)).unwrap();
    }
}
