//! Message text and timestamp normalization.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime};
use regex::Regex;

use crate::error::ScraperError;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"http\S+").expect("valid regex"));
static NON_ALNUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9\s]").expect("valid regex"));
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Strip URLs and non-alphanumeric noise from message text.
///
/// Pure and deterministic: removes URL-shaped substrings, drops characters
/// outside alphanumerics and whitespace, collapses whitespace runs to single
/// spaces, and trims. Always returns a string, possibly empty. Idempotent.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let text = URL_RE.replace_all(text, "");
    let text = NON_ALNUM_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Parse an ISO-8601 timestamp marker (for example `2025-02-27T08:36:59Z`)
/// into the canonical naive UTC form rendered as `YYYY-MM-DD HH:MM:SS`.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidTimestamp`] if the marker is not valid
/// RFC 3339.
pub fn canonical_timestamp(iso: &str) -> Result<NaiveDateTime, ScraperError> {
    DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.naive_utc())
        .map_err(|source| ScraperError::InvalidTimestamp {
            raw: iso.to_string(),
            source,
        })
}
