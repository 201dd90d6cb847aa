//! The `adopt` command: write install records for resolved folders.

use std::path::Path;

use anyhow::{Context as _, Result};
use tracing::{debug, info};

use super::{CommandSetup, resolve_all};
use crate::cli::GlobalOpts;
use crate::logging;
use crate::lookup::{LookupEntry, LookupTable};
use crate::record;
use crate::resolver::Candidate;
use crate::vdf;

/// What happened to one candidate's install record.
#[derive(Debug, PartialEq, Eq)]
enum WriteOutcome {
    /// Record written to the library.
    Written,
    /// Suppressed by `--dry-run`.
    DryRun,
    /// A manifest for the app already exists; never overwritten.
    AlreadyPresent,
}

/// Run the adopt command.
///
/// Resolves every folder, then writes a minimal install record for each
/// unambiguous candidate and persists the updated lookup table. Ambiguous
/// candidates and unmatched folders are reported for manual review;
/// adopting them needs a human decision.
///
/// # Errors
///
/// Returns an error if setup fails, a library cannot be listed, or a
/// record or the lookup table cannot be written.
pub fn run(global: &GlobalOpts) -> Result<()> {
    let mut setup = CommandSetup::init(global)?;
    let report = resolve_all(
        &setup.index,
        &mut setup.lookup,
        &setup.libraries,
        setup.threshold,
    )?;

    logging::stage("Writing install records");
    let mut written = 0usize;
    let mut dry = 0usize;
    let mut present = 0usize;
    for candidate in report.candidates.iter().filter(|c| !c.ambiguous) {
        match write_record(candidate, global.dry_run, &mut setup.lookup)? {
            WriteOutcome::Written => written += 1,
            WriteOutcome::DryRun => dry += 1,
            WriteOutcome::AlreadyPresent => present += 1,
        }
    }

    let ambiguous = report.candidates.iter().filter(|c| c.ambiguous).count();
    if ambiguous > 0 {
        info!("{ambiguous} ambiguous candidate(s) left for manual review");
    }

    if let Some(path) = global.lookup.as_deref() {
        if global.dry_run {
            logging::dry_run(&format!("save lookup table to {}", path.display()));
        } else {
            setup.lookup.save(path)?;
            info!("lookup table saved to {}", path.display());
        }
    }

    logging::stage("Summary");
    info!(
        "{written} record(s) written, {dry} dry-run, {present} already present, \
         {ambiguous} ambiguous, {} unmatched",
        report.unmatched.len()
    );
    Ok(())
}

/// Write one candidate's install record unless a manifest already exists.
fn write_record(
    candidate: &Candidate,
    dry_run: bool,
    lookup: &mut LookupTable,
) -> Result<WriteOutcome> {
    let path = record::manifest_path(Path::new(&candidate.library), candidate.app_id);
    if path.exists() {
        debug!("{}: manifest already present, skipping", candidate.folder);
        return Ok(WriteOutcome::AlreadyPresent);
    }
    if dry_run {
        logging::dry_run(&format!("write {}", path.display()));
        return Ok(WriteOutcome::DryRun);
    }

    let node = record::build(candidate.app_id, &candidate.name, &candidate.folder);
    let text = vdf::encode(&node)?;
    std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    lookup.insert(LookupEntry {
        app_id: candidate.app_id,
        name: Some(candidate.name.clone()),
        install_dir: candidate.folder.clone(),
    });
    info!(
        "{}: adopted as \"{}\" ({})",
        candidate.folder, candidate.name, candidate.app_id
    );
    Ok(WriteOutcome::Written)
}
