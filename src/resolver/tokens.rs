//! Folder-name tokenisation and pattern cascades for the match strategies.

use std::sync::OnceLock;

use regex::Regex;

/// `[A-Z][a-z]+`: one capital followed by at least one lowercase letter.
///
/// This deliberately drops capitals that head no lowercase run, so
/// all-caps acronyms contribute no token (`XCOM2` decomposes to nothing,
/// `HalfLife2` to `Half`, `Life`). The quirk is part of the matching
/// contract and must not be "fixed".
fn capital_runs() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[A-Z][a-z]+").ok()).as_ref()
}

/// Split a folder name on whitespace.
pub(super) fn split_by_space(folder: &str) -> Vec<&str> {
    folder.split_whitespace().collect()
}

/// Decompose a PascalCase folder name into words.
pub(super) fn split_by_capitals(folder: &str) -> Vec<&str> {
    capital_runs().map_or_else(Vec::new, |re| {
        re.find_iter(folder).map(|m| m.as_str()).collect()
    })
}

/// Split a folder name on underscores, dropping empty segments.
pub(super) fn split_by_underscore(folder: &str) -> Vec<&str> {
    folder.split('_').filter(|s| !s.is_empty()).collect()
}

/// Build the longest-prefix-first pattern cascade for a token sequence.
///
/// Tokens `[A, B, C]` yield `A.*B.*C.*` then `A.*B.*` then `A.*`, each token
/// regex-escaped and the whole pattern case-insensitive and unanchored.
/// Strategies try the patterns in order and stop at the first one that
/// matches anything.
pub(super) fn pattern_cascade(tokens: &[&str]) -> Vec<Regex> {
    (1..=tokens.len())
        .rev()
        .filter_map(|len| {
            let prefix = tokens.get(..len)?;
            let body: String = prefix
                .iter()
                .map(|token| format!("{}.*", regex::escape(token)))
                .collect();
            Regex::new(&format!("(?i){body}")).ok()
        })
        .collect()
}
