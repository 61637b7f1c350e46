//! Per-backend purge accounting and the aggregated report.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::PurgeBatch;

/// A cache layer that URLs can be purged from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Application-level rendered page cache.
    PageCache,
    /// Varnish edge reverse proxy.
    Varnish,
    /// Cloudflare CDN.
    Cloudflare,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::PageCache, Backend::Varnish, Backend::Cloudflare];

    /// Stable machine name used in JSON output and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::PageCache => "page_cache",
            Backend::Varnish => "varnish",
            Backend::Cloudflare => "cloudflare",
        }
    }

    /// Human-readable name used in notices.
    pub fn label(&self) -> &'static str {
        match self {
            Backend::PageCache => "Page",
            Backend::Varnish => "Varnish",
            Backend::Cloudflare => "Cloudflare",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one backend purge.
///
/// For a backend that ran, `processed` and `errors` partition the input
/// batch. A backend that was skipped (missing configuration) reports both
/// lists empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BackendResult {
    pub processed: Vec<String>,
    pub errors: Vec<String>,
}

impl BackendResult {
    /// Every URL of the batch succeeded.
    pub fn all_processed(batch: &PurgeBatch) -> Self {
        Self {
            processed: batch.urls().to_vec(),
            errors: Vec::new(),
        }
    }

    /// Every URL of the batch failed.
    pub fn all_failed(batch: &PurgeBatch) -> Self {
        Self {
            processed: Vec::new(),
            errors: batch.urls().to_vec(),
        }
    }

    /// The backend did not run.
    pub fn skipped() -> Self {
        Self::default()
    }

    /// Records the outcome for a single URL.
    pub fn record(&mut self, url: &str, processed: bool) {
        if processed {
            self.processed.push(url.to_string());
        } else {
            self.errors.push(url.to_string());
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_skipped(&self) -> bool {
        self.processed.is_empty() && self.errors.is_empty()
    }

    pub fn total(&self) -> usize {
        self.processed.len() + self.errors.len()
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Status,
    Warning,
    Error,
}

/// A human-readable line describing one backend outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub backend: Backend,
    pub level: NoticeLevel,
    pub message: String,
}

/// Aggregated outcome of a fanout purge, keyed by backend.
///
/// Created fresh for every purge call. Backends that are disabled by
/// configuration do not appear at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PurgeReport {
    backends: BTreeMap<Backend, BackendResult>,
}

impl PurgeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, backend: Backend, result: BackendResult) {
        self.backends.insert(backend, result);
    }

    pub fn get(&self, backend: Backend) -> Option<&BackendResult> {
        self.backends.get(&backend)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Backend, &BackendResult)> {
        self.backends.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Whether any backend reported at least one failed URL.
    pub fn has_errors(&self) -> bool {
        self.backends.values().any(BackendResult::has_errors)
    }

    /// Total number of failed URLs across all backends.
    pub fn error_count(&self) -> usize {
        self.backends.values().map(|r| r.errors.len()).sum()
    }

    /// Renders one notice per backend for display to the operator.
    pub fn notices(&self) -> Vec<Notice> {
        self.backends
            .iter()
            .map(|(backend, result)| notice_for(*backend, result))
            .collect()
    }
}

fn notice_for(backend: Backend, result: &BackendResult) -> Notice {
    let label = backend.label();
    let processed = result.processed.len();

    let (level, message) = if result.is_skipped() {
        (
            NoticeLevel::Warning,
            format!("{label} cache purge was skipped - backend is not configured"),
        )
    } else if !result.has_errors() {
        (
            NoticeLevel::Status,
            format!("{label} cache was purged successfully - processed {processed} url(s)"),
        )
    } else if processed > 0 {
        (
            NoticeLevel::Warning,
            format!(
                "{label} cache was purged partially - processed {processed}/{} url(s). Please check logs for more information.",
                result.total()
            ),
        )
    } else {
        (
            NoticeLevel::Error,
            format!("Error while clearing {label} cache for given urls. Please check logs."),
        )
    };

    Notice {
        backend,
        level,
        message,
    }
}
