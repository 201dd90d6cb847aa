//! Typed error types for the config-tree codec.
//!
//! The codec modules return these structured errors; command handlers at
//! the CLI boundary convert them to [`anyhow::Error`] via the standard `?`
//! operator.

use thiserror::Error;

/// Structural error raised by the tree decoder.
///
/// The decoder is deliberately permissive: malformed lines are skipped and
/// reported on the `debug` diagnostic channel rather than aborting. The
/// only unrecoverable condition is object nesting that does not balance
/// out by the end of the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// More objects were opened than closed by the end of the input.
    #[error("{count} object(s) left open at end of input")]
    UnclosedObjects {
        /// Number of `{` lines without a matching `}`.
        count: usize,
    },

    /// More objects were closed than opened by the end of the input.
    #[error("{count} closing brace(s) with no matching open object")]
    ExtraClosingBraces {
        /// Number of `}` lines that had no open object to close.
        count: usize,
    },
}

/// Error raised by the tree encoder when a node holds a value it cannot
/// render.
///
/// Not constructible with the current [`Node`](crate::vdf::Node) model,
/// since every node is either a scalar or an object. The encoder keeps the
/// fallible contract so that a future `Node` variant fails the encode call
/// instead of producing half-written text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot encode value under key \"{key}\": neither scalar nor object")]
pub struct UnsupportedValueError {
    /// Key whose value could not be encoded.
    pub key: String,
}
