//! Minimal install record builder.
//!
//! Produces the skeleton manifest the client needs to recognise an
//! already-downloaded folder as an installed app. The record is
//! intentionally incomplete: `StateFlags` is set to "update required", so
//! the client fills in the remaining fields on its own validation pass.

use std::path::{Path, PathBuf};

use crate::vdf::{Node, Object};

/// Placeholder owner identity written into new records; the client
/// replaces it with the real account id on its next validation pass.
const LAST_OWNER_PLACEHOLDER: &str = "76561197960265728";

/// Universe tag of the public catalog.
const UNIVERSE_PUBLIC: &str = "1";

/// State flag meaning "update required".
const STATE_UPDATE_REQUIRED: &str = "2";

/// Build the minimal install record tree for an adopted folder.
///
/// Pure: no filesystem access and no existence check. The caller decides
/// whether a record may be written (an existing manifest is never
/// overwritten).
///
/// # Examples
///
/// ```
/// use steamshelf::record;
/// use steamshelf::vdf::encode;
///
/// let node = record::build(400, "Portal", "Portal");
/// let text = encode(&node).unwrap();
/// assert!(text.starts_with("\"AppState\""));
/// assert!(text.contains("\"appid\"\t\"400\""));
/// ```
#[must_use]
pub fn build(app_id: i64, name: &str, install_dir: &str) -> Node {
    let mut state = Object::new();
    state.insert_scalar("appid", app_id.to_string());
    state.insert_scalar("Universe", UNIVERSE_PUBLIC);
    state.insert_scalar("name", name);
    state.insert_scalar("StateFlags", STATE_UPDATE_REQUIRED);
    state.insert_scalar("installdir", install_dir);
    state.insert_scalar("LastUpdated", "0");
    state.insert_scalar("UpdateResult", "0");
    state.insert_scalar("SizeOnDisk", "0");
    state.insert_scalar("buildid", "0");
    state.insert_scalar("LastOwner", LAST_OWNER_PLACEHOLDER);
    state.insert_scalar("BytesToDownload", "0");
    state.insert_scalar("BytesDownloaded", "0");
    state.insert_scalar("AutoUpdateBehavior", "0");
    state.insert_scalar("AllowOtherDownloadsWhileRunning", "0");

    let mut user_config = Object::new();
    user_config.insert_scalar("language", "english");
    state.insert("UserConfig", Node::Object(user_config));
    state.insert("InstalledDepots", Node::Object(Object::new()));
    state.insert("MountedDepots", Node::Object(Object::new()));

    let mut root = Object::new();
    root.insert("AppState", Node::Object(state));
    Node::Object(root)
}

/// Path of the app's manifest file inside a library root.
#[must_use]
pub fn manifest_path(library: &Path, app_id: i64) -> PathBuf {
    library
        .join("steamapps")
        .join(format!("appmanifest_{app_id}.acf"))
}
