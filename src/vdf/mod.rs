//! Codec for the nested, tab-indented, quoted key/value text format used
//! by the distribution client for app manifests and library metadata.
//!
//! The format is line-oriented:
//!
//! ```text
//! "AppState"
//! {
//!     "appid"     "400"
//!     "UserConfig"
//!     {
//!         "language"  "english"
//!     }
//! }
//! ```
//!
//! [`decode`] turns text into an ordered [`Node`] tree, [`encode`] renders
//! a tree back out byte-for-byte compatibly with the producing client.

mod decode;
mod encode;
mod node;

pub use decode::decode;
pub use encode::encode;
pub use node::{Node, Object};
