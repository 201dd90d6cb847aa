//! Text → tree decoder for the config-tree format.

use tracing::debug;

use crate::error::FormatError;

use super::node::{Node, Object};

/// How a single input line participates in the tree structure.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    /// `"key"  "value"`: scalar assignment on the current object.
    Pair(&'a str, &'a str),
    /// `"key"` alone: declares a pending child object.
    Key(&'a str),
    /// `{`: enter the pending child.
    Open,
    /// `}`: return to the parent object.
    Close,
    /// Blank, comment, or malformed: skipped.
    Skip,
}

/// Decode config-tree text into its root [`Node`].
///
/// The decoder is permissive: any line that is not a scalar pair, a key
/// declaration, or a structural brace is skipped and reported via a
/// `debug` diagnostic. The only fatal condition is a brace count that
/// does not balance out by the end of the input.
///
/// # Examples
///
/// ```
/// use steamshelf::vdf::decode;
///
/// let text = "\"AppState\"\n{\n\t\"appid\"\t\"400\"\n}";
/// let root = decode(text).unwrap();
/// let state = root.as_object().unwrap().get_object("AppState").unwrap();
/// assert_eq!(state.get_str("appid"), Some("400"));
/// ```
///
/// # Errors
///
/// Returns [`FormatError`] if more braces are opened than closed at the
/// end of the input, or vice versa. Nothing partially decoded escapes on
/// error.
pub fn decode(text: &str) -> Result<Node, FormatError> {
    let mut current = Object::new();
    // Parents awaiting a `}`, each with the key the child re-attaches under.
    let mut stack: Vec<(Object, String)> = Vec::new();
    let mut pending: Option<String> = None;
    let mut opens = 0usize;
    let mut closes = 0usize;

    for (index, line) in text.lines().enumerate() {
        match classify(line) {
            Line::Pair(key, value) => {
                if current.insert_scalar(key, value).is_some() {
                    debug!("line {}: duplicate key \"{key}\" overwritten", index + 1);
                }
            }
            Line::Key(key) => {
                current.insert(key, Node::Object(Object::new()));
                pending = Some(key.to_string());
            }
            Line::Open => {
                opens += 1;
                if let Some(key) = pending.take() {
                    stack.push((current, key));
                    current = Object::new();
                } else {
                    debug!("line {}: '{{' without a preceding key, ignored", index + 1);
                }
            }
            Line::Close => {
                closes += 1;
                if let Some((mut parent, key)) = stack.pop() {
                    parent.insert(key, Node::Object(current));
                    current = parent;
                } else {
                    debug!("line {}: '}}' with no open object, ignored", index + 1);
                }
            }
            Line::Skip => {
                if !line.trim().is_empty() {
                    debug!("line {}: skipped unrecognised line", index + 1);
                }
            }
        }
    }

    if closes > opens {
        return Err(FormatError::ExtraClosingBraces {
            count: closes - opens,
        });
    }
    if opens > closes {
        return Err(FormatError::UnclosedObjects {
            count: opens - closes,
        });
    }

    Ok(Node::Object(current))
}

/// Classify one line in the priority order of the format.
///
/// Quoted tokens are runs between pairs of `"` characters; an unterminated
/// final quote does not produce a token. Only the first one or two tokens
/// participate: extra quoted tokens on a pair line are ignored, while a
/// single token followed by non-whitespace junk makes the line malformed.
fn classify(line: &str) -> Line<'_> {
    let mut tokens = complete_tokens(line);
    let first = tokens.next();
    let second = tokens.next();
    match (first, second) {
        (Some(key), Some(value)) => Line::Pair(key, value),
        (Some(key), None) => {
            if outside_is_whitespace(line) {
                Line::Key(key)
            } else {
                Line::Skip
            }
        }
        _ => match line.trim() {
            "{" => Line::Open,
            "}" => Line::Close,
            _ => Line::Skip,
        },
    }
}

/// Iterate the complete quoted tokens of a line, in order.
///
/// Splitting on `"` alternates outside/inside segments; an inside segment
/// is a complete token only when its closing quote was present.
fn complete_tokens(line: &str) -> impl Iterator<Item = &str> {
    let segments: Vec<&str> = line.split('"').collect();
    let last = segments.len().saturating_sub(1);
    segments
        .into_iter()
        .enumerate()
        .filter(move |(i, _)| i % 2 == 1 && *i < last)
        .map(|(_, segment)| segment)
}

/// Whether everything outside the quoted tokens of a line is whitespace.
fn outside_is_whitespace(line: &str) -> bool {
    line.split('"')
        .step_by(2)
        .all(|outside| outside.trim().is_empty())
}
