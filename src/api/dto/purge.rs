//! DTOs for the purge endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Notice, PurgeReport};

/// Largest accepted `urls` text, in characters.
pub const MAX_RAW_LENGTH: u64 = 64 * 1024;

/// Request to purge a list of URLs.
///
/// `urls` is free text with one URL per line, exactly as typed into the
/// purge form.
#[derive(Debug, Deserialize, Validate)]
pub struct PurgeUrlsRequest {
    #[validate(length(max = MAX_RAW_LENGTH, message = "Submission is too large"))]
    pub urls: String,
}

/// Outcome of a purge.
#[derive(Debug, Serialize)]
pub struct PurgeResponse {
    pub summary: PurgeSummary,
    /// Per-backend processed and failed URLs.
    pub backends: PurgeReport,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Serialize)]
pub struct PurgeSummary {
    pub backends: usize,
    pub failed: usize,
    pub success: bool,
}

impl From<PurgeReport> for PurgeResponse {
    fn from(report: PurgeReport) -> Self {
        Self {
            summary: PurgeSummary {
                backends: report.iter().count(),
                failed: report.error_count(),
                success: !report.has_errors(),
            },
            notices: report.notices(),
            backends: report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Backend, BackendResult, PurgeBatch};

    #[test]
    fn test_oversized_body_is_rejected() {
        let request = PurgeUrlsRequest {
            urls: "a".repeat(MAX_RAW_LENGTH as usize + 1),
        };
        assert!(request.validate().is_err());

        let request = PurgeUrlsRequest {
            urls: "https://a.example/".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_response_from_report() {
        let batch = PurgeBatch::parse("https://a.example/", 25).unwrap();
        let mut report = PurgeReport::new();
        report.insert(Backend::PageCache, BackendResult::all_processed(&batch));
        report.insert(Backend::Cloudflare, BackendResult::all_failed(&batch));

        let response = PurgeResponse::from(report);

        assert_eq!(response.summary.backends, 2);
        assert_eq!(response.summary.failed, 1);
        assert!(!response.summary.success);
        assert_eq!(response.notices.len(), 2);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["backends"]["cloudflare"]["errors"][0], "https://a.example/");
    }
}
