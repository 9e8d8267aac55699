//! Buffer search helpers.
//!
//! Byte-offset search over the raw buffer. Log data is not guaranteed to be
//! UTF-8, so patterns are compiled with `regex::bytes` and all public
//! inputs/outputs are byte offsets. Supported:
//!
//! - plain substring search (escaped and compiled into a regex)
//! - regex search
//! - optional whole-word matching (ASCII-alphanumeric and `_`)

use regex::bytes::{Regex, RegexBuilder};
use tracing::trace;

/// Options that control how search is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// If `true`, performs a case-sensitive search.
    pub case_sensitive: bool,
    /// If `true`, matches only whole words.
    pub whole_word: bool,
    /// If `true`, treats the query as a regex pattern.
    pub regex: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            whole_word: false,
            regex: false,
        }
    }
}

/// A match returned by the search APIs, as a half-open byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl SearchMatch {
    /// Length of the match in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the match is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Search errors.
#[derive(Debug)]
pub enum SearchError {
    /// The provided regex pattern failed to compile.
    InvalidRegex(regex::Error),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRegex(err) => write!(f, "Invalid regex: {}", err),
        }
    }
}

impl std::error::Error for SearchError {}

fn compile_search_regex(query: &str, options: SearchOptions) -> Result<Regex, SearchError> {
    let pattern = if options.regex {
        query.to_string()
    } else {
        regex::escape(query)
    };

    RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .multi_line(true)
        .unicode(false)
        .build()
        .map_err(SearchError::InvalidRegex)
}

fn is_word_byte(byte: u8) -> bool {
    byte == b'_' || byte.is_ascii_alphanumeric()
}

fn is_whole_word(data: &[u8], m: SearchMatch) -> bool {
    if m.is_empty() {
        return false;
    }

    let before = m.start.checked_sub(1).and_then(|i| data.get(i).copied());
    let after = data.get(m.end).copied();

    !before.is_some_and(is_word_byte) && !after.is_some_and(is_word_byte)
}

/// Find the next occurrence of `query` in `data`, searching forward from
/// byte offset `from`.
///
/// Returns `Ok(None)` if no match is found (or if `query` is empty).
pub fn find_next(
    data: &[u8],
    query: &str,
    options: SearchOptions,
    from: usize,
) -> Result<Option<SearchMatch>, SearchError> {
    if query.is_empty() {
        return Ok(None);
    }

    let re = compile_search_regex(query, options)?;
    let mut start = from.min(data.len());
    loop {
        let Some(m) = re.find_at(data, start) else {
            return Ok(None);
        };

        let candidate = SearchMatch {
            start: m.start(),
            end: m.end(),
        };

        if candidate.is_empty() {
            if candidate.end >= data.len() {
                return Ok(None);
            }
            start = candidate.end + 1;
            continue;
        }

        if options.whole_word && !is_whole_word(data, candidate) {
            start = candidate.end;
            continue;
        }

        trace!(start = candidate.start, end = candidate.end, "match found");
        return Ok(Some(candidate));
    }
}

/// Find the previous occurrence of `query` in `data`, searching backward
/// from byte offset `before`.
///
/// Returns `Ok(None)` if no match is found (or if `query` is empty).
pub fn find_prev(
    data: &[u8],
    query: &str,
    options: SearchOptions,
    before: usize,
) -> Result<Option<SearchMatch>, SearchError> {
    if query.is_empty() {
        return Ok(None);
    }

    let re = compile_search_regex(query, options)?;
    let limit = before.min(data.len());

    let mut last: Option<SearchMatch> = None;
    for m in re.find_iter(&data[..limit]) {
        let candidate = SearchMatch {
            start: m.start(),
            end: m.end(),
        };

        if candidate.is_empty() {
            continue;
        }
        if options.whole_word && !is_whole_word(data, candidate) {
            continue;
        }

        last = Some(candidate);
    }

    Ok(last)
}

/// Find all occurrences of `query` in `data`.
///
/// Returns an empty list if `query` is empty.
pub fn find_all(
    data: &[u8],
    query: &str,
    options: SearchOptions,
) -> Result<Vec<SearchMatch>, SearchError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let re = compile_search_regex(query, options)?;

    let mut matches: Vec<SearchMatch> = Vec::new();
    for m in re.find_iter(data) {
        let candidate = SearchMatch {
            start: m.start(),
            end: m.end(),
        };

        if candidate.is_empty() {
            continue;
        }
        if options.whole_word && !is_whole_word(data, candidate) {
            continue;
        }

        matches.push(candidate);
    }

    Ok(matches)
}
