//! Parsing and validation of raw purge submissions.
//!
//! A submission is free text with one URL per line. Any line-ending
//! convention is accepted (`\r\n`, `\r`, `\n`).

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Matches every supported line terminator.
static LINE_BREAK_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

/// Reasons a submission is rejected before anything is purged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("No url(s) were provided")]
    NoUrls,

    #[error("Maximum number of purgable URLs is {max}, got {count}. Please enter less or equal.")]
    TooManyUrls { count: usize, max: usize },

    #[error("Invalid URL: {value}")]
    InvalidUrl { value: String },
}

/// Splits raw text into candidate lines, trimming surrounding whitespace and
/// dropping blank lines.
pub fn split_lines(raw: &str) -> Vec<&str> {
    LINE_BREAK_REGEX
        .split(raw)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Returns `true` if `candidate` is an absolute URL with a non-empty host.
///
/// Embedded whitespace is rejected even though the URL parser would
/// percent-encode it.
pub fn is_valid_url(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }

    match Url::parse(candidate) {
        Ok(url) => url.host_str().is_some_and(|host| !host.is_empty()),
        Err(_) => false,
    }
}

/// Validates a raw submission and returns its URLs in input order.
///
/// # Rules
///
/// 1. Blank lines are dropped before counting
/// 2. More than `max_count` remaining lines rejects the batch (no truncation)
/// 3. Any line that is not an absolute URL with a host rejects the batch
/// 4. Duplicates are kept
///
/// # Errors
///
/// - [`ValidationError::NoUrls`] if no non-blank line remains
/// - [`ValidationError::TooManyUrls`] if the batch is oversized
/// - [`ValidationError::InvalidUrl`] naming the first offending line
pub fn validate_batch(raw: &str, max_count: usize) -> Result<Vec<String>, ValidationError> {
    let candidates = split_lines(raw);

    if candidates.is_empty() {
        return Err(ValidationError::NoUrls);
    }

    if candidates.len() > max_count {
        return Err(ValidationError::TooManyUrls {
            count: candidates.len(),
            max: max_count,
        });
    }

    if let Some(bad) = candidates.iter().find(|c| !is_valid_url(c)) {
        return Err(ValidationError::InvalidUrl {
            value: bad.to_string(),
        });
    }

    Ok(candidates.into_iter().map(str::to_string).collect())
}
