//! On-disk library access: folder listing and manifest reading.
//!
//! A library root is the directory that contains `steamapps/`; downloaded
//! apps live under `steamapps/common/<folder>` and installed apps are
//! additionally described by `steamapps/appmanifest_<id>.acf`. Manifests
//! are keyed by app id, not folder name, so every folder goes through the
//! resolver; the authoritative check silently absorbs folders whose
//! matched app already has a manifest recording that exact directory.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::record;
use crate::resolver::ManifestStore;
use crate::vdf;

/// One library root on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    root: PathBuf,
}

impl Library {
    /// Wrap a library root path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The library root path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Display string used in candidates and log lines.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.root.display().to_string()
    }

    fn common_dir(&self) -> PathBuf {
        self.root.join("steamapps").join("common")
    }

    /// Folder names under `steamapps/common`, sorted for deterministic
    /// processing order. A missing directory yields no folders.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing directory cannot be listed.
    pub fn folders(&self) -> Result<Vec<String>> {
        let common = self.common_dir();
        if !common.is_dir() {
            return Ok(Vec::new());
        }

        let mut folders = Vec::new();
        let entries =
            std::fs::read_dir(&common).with_context(|| format!("listing {}", common.display()))?;
        for entry in entries {
            let entry = entry.with_context(|| format!("listing {}", common.display()))?;
            if !entry.path().is_dir() {
                continue;
            }
            folders.push(entry.file_name().to_string_lossy().into_owned());
        }
        folders.sort();
        Ok(folders)
    }
}

/// The `installdir` recorded by a manifest file, if it decodes.
fn manifest_install_dir(path: &Path) -> Option<String> {
    let text = std::fs::read_to_string(path).ok()?;
    let root = vdf::decode(&text).ok()?;
    root.as_object()?
        .get_object("AppState")?
        .get_str("installdir")
        .map(ToString::to_string)
}

/// Filesystem-backed [`ManifestStore`] that reads manifests on demand.
///
/// A manifest that is missing, unreadable, or structurally broken simply
/// reports no install directory, and the folder stays a review candidate.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsManifestStore;

impl ManifestStore for FsManifestStore {
    fn install_dir_of(&self, app_id: i64, library: &str) -> Option<String> {
        manifest_install_dir(&record::manifest_path(Path::new(library), app_id))
    }
}
