// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed library root and a fluent builder
// so each integration test can set up an isolated environment without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use steamshelf::cli::GlobalOpts;
use steamshelf::record;
use steamshelf::vdf::encode;

/// An isolated library root backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct TestLibrary {
    /// Temporary directory containing the library root.
    pub root: tempfile::TempDir,
}

impl TestLibrary {
    /// Create a library root with an empty `steamapps/common` directory.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("steamapps").join("common"))
            .expect("create common dir");
        Self { root }
    }

    /// Path to the library root.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// The library root as the display string candidates carry.
    pub fn display(&self) -> String {
        dunce::canonicalize(self.root.path())
            .expect("canonicalize library root")
            .display()
            .to_string()
    }

    /// Path of the app manifest for `app_id` inside this library.
    pub fn manifest_path(&self, app_id: i64) -> PathBuf {
        record::manifest_path(self.root.path(), app_id)
    }
}

/// Fluent builder for [`TestLibrary`].
pub struct TestLibraryBuilder {
    library: TestLibrary,
}

impl TestLibraryBuilder {
    /// Begin building a new library root.
    pub fn new() -> Self {
        Self {
            library: TestLibrary::new(),
        }
    }

    /// Create an app folder under `steamapps/common`.
    pub fn with_folder(self, name: &str) -> Self {
        let path = self
            .library
            .path()
            .join("steamapps")
            .join("common")
            .join(name);
        std::fs::create_dir_all(path).expect("create app folder");
        self
    }

    /// Write a well-formed install record for an app.
    pub fn with_manifest(self, app_id: i64, name: &str, install_dir: &str) -> Self {
        let text = encode(&record::build(app_id, name, install_dir)).expect("encode manifest");
        std::fs::write(self.library.manifest_path(app_id), text).expect("write manifest");
        self
    }

    /// Write raw text as an app's manifest file (for corrupt fixtures).
    pub fn with_raw_manifest(self, app_id: i64, text: &str) -> Self {
        std::fs::write(self.library.manifest_path(app_id), text).expect("write manifest");
        self
    }

    /// Finish building and return the configured library.
    pub fn build(self) -> TestLibrary {
        self.library
    }
}

/// Write `json` into the library root and return its path.
pub fn write_json(library: &TestLibrary, filename: &str, json: &str) -> PathBuf {
    let path = library.path().join(filename);
    std::fs::write(&path, json).expect("write json file");
    path
}

/// Build [`GlobalOpts`] targeting one library, with optional data files.
pub fn global_opts(
    library: &TestLibrary,
    catalog: Option<PathBuf>,
    lookup: Option<PathBuf>,
) -> GlobalOpts {
    GlobalOpts {
        dry_run: false,
        catalog,
        lookup,
        owned: None,
        libraries: vec![library.path().to_path_buf()],
        threshold: 1,
    }
}
