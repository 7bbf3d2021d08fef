//! # Docket Ident
//!
//! Docket identifier extraction and matching.
//!
//! A docket token is exactly five digits, optionally followed by a hyphen and a
//! one-to-three letter uppercase suffix: `25464`, `25464-AB`. [`normalize`]
//! pulls the first such token out of free text; [`matches`] is the predicate
//! every search source filters with.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Grammar for a docket token embedded in free text. The surrounding `\b`
/// guards keep a five-digit window from matching inside a longer digit run.
static DOCKET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{5})(?:-([A-Z]{1,3}))?\b").expect("docket grammar regex")
});

/// Default minimum query length for [`matches`].
///
/// A 1-character floor keeps the relaxed progressive-search behavior where a
/// partially typed number already narrows results; callers that find it too
/// broad pass a stricter guard to [`matches_with`].
pub const DEFAULT_MIN_QUERY_LEN: usize = 1;

/// A normalized docket identifier: five digits plus an optional suffix.
///
/// The digit run is kept verbatim so leading zeros survive round-trips;
/// [`DocketIdentifier::number`] exposes the numeric value for sorting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocketIdentifier {
    digits: String,
    number: u32,
    suffix: Option<String>,
}

impl DocketIdentifier {
    /// Raw five-digit run, leading zeros intact.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Numeric value of the digit run.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Uppercase suffix, if the token carried one.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Canonical text form: `25464` or `25464-AB`.
    pub fn canonical(&self) -> String {
        match &self.suffix {
            Some(suffix) => format!("{}-{}", self.digits, suffix),
            None => self.digits.clone(),
        }
    }
}

impl fmt::Display for DocketIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Extract the first docket token from free text, case-insensitively.
///
/// Returns `None` when the text contains no token matching the grammar.
pub fn normalize(text: &str) -> Option<DocketIdentifier> {
    let upper = text.to_uppercase();
    let captures = DOCKET_RE.captures(&upper)?;
    let digits = captures.get(1)?.as_str().to_string();
    let number = digits.parse().ok()?;
    let suffix = captures.get(2).map(|m| m.as_str().to_string());
    Some(DocketIdentifier {
        digits,
        number,
        suffix,
    })
}

/// [`matches_with`] under the default minimum-query-length guard.
pub fn matches(candidate: &str, query: &str) -> bool {
    matches_with(candidate, query, DEFAULT_MIN_QUERY_LEN)
}

/// Whether `candidate` matches `query`, case-insensitively and with both
/// sides whitespace-trimmed.
///
/// True when any of:
/// - `candidate` literally contains `query`;
/// - `candidate`'s extracted identifier equals `query`;
/// - either of those two is a prefix of the other.
///
/// The bidirectional prefix rule is what makes progressive search work
/// (`"254"` matches `"25464-AB Project"`), at the cost of very short queries
/// matching broadly; `min_query_len` is the guard against that, and queries
/// shorter than it (or empty) never match.
pub fn matches_with(candidate: &str, query: &str, min_query_len: usize) -> bool {
    let query = query.trim();
    if query.is_empty() || query.chars().count() < min_query_len.max(1) {
        return false;
    }
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return false;
    }

    let candidate_upper = candidate.to_uppercase();
    let query_upper = query.to_uppercase();
    if candidate_upper.contains(&query_upper) {
        return true;
    }

    if let Some(identifier) = normalize(candidate) {
        let canonical = identifier.canonical();
        return canonical == query_upper
            || canonical.starts_with(&query_upper)
            || query_upper.starts_with(&canonical);
    }

    false
}
