//! Tree → text encoder for the config-tree format.

use std::fmt::Write as _;

use crate::error::UnsupportedValueError;

use super::node::{Node, Object};

/// Encode a tree back into config-tree text.
///
/// Formatting is bit-exact for the producing client: `depth` literal tabs
/// of indentation per line, scalar entries as `"key"<TAB>"value"`, and,
/// deliberately, **all scalar entries of an object before all of its
/// nested objects**, each group in insertion order. Nested closing braces
/// are followed by a newline; the outermost result carries no trailing
/// newline.
///
/// # Examples
///
/// ```
/// use steamshelf::vdf::{Node, Object, encode};
///
/// let mut inner = Object::new();
/// inner.insert_scalar("appid", "400");
/// let mut root = Object::new();
/// root.insert("AppState", Node::Object(inner));
///
/// let text = encode(&Node::Object(root)).unwrap();
/// assert_eq!(text, "\"AppState\"\n{\n\t\"appid\"\t\"400\"\n}");
/// ```
///
/// # Errors
///
/// Returns [`UnsupportedValueError`] if a node holds a value that is
/// neither a scalar nor an object. With the current [`Node`] model this
/// cannot happen; a scalar at the root (which has no key to render) is
/// reported the same way.
pub fn encode(node: &Node) -> Result<String, UnsupportedValueError> {
    match node {
        Node::Object(object) => {
            let mut out = String::new();
            encode_object(object, 0, &mut out)?;
            // Nested closes always end with '\n'; the outermost result
            // must not.
            if out.ends_with('\n') {
                out.pop();
            }
            Ok(out)
        }
        Node::Scalar(_) => Err(UnsupportedValueError {
            key: "<root>".to_string(),
        }),
    }
}

/// Append one object's entries to `out` at the given depth.
fn encode_object(
    object: &Object,
    depth: usize,
    out: &mut String,
) -> Result<(), UnsupportedValueError> {
    let indent = "\t".repeat(depth);

    for (key, value) in object.scalars() {
        // Infallible for String targets.
        let _ = writeln!(out, "{indent}\"{key}\"\t\"{value}\"");
    }

    for (key, child) in object.objects() {
        let _ = writeln!(out, "{indent}\"{key}\"");
        let _ = writeln!(out, "{indent}{{");
        encode_object(child, depth + 1, out)?;
        let _ = writeln!(out, "{indent}}}");
    }

    Ok(())
}
