//! NVD CVE API 2.0 client
//!
//! Issues the single upstream query the relay depends on: CVEs published in
//! the last three days, first page of 100 results.

use std::env;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;

use crate::model::nvd::NvdResponse;
use crate::model::CveRecord;

const NVD_API_BASE_URL: &str = "https://services.nvd.nist.gov/rest/json/cves/2.0";
const NVD_BASE_URL_ENV: &str = "NVD_BASE_URL";

const API_KEY_HEADER: &str = "apiKey";
const RESULTS_PER_PAGE: u32 = 100;
const LOOKBACK_DAYS: i64 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Timestamp format the NVD expects for publication date filters
const NVD_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000Z";

#[derive(Debug, thiserror::Error)]
pub enum NvdError {
    #[error("Missing NVD API Key.")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse response: {0}")]
    MalformedResponse(String),
}

/// Client for the NVD CVE API
pub struct NvdClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl NvdClient {
    /// Create a new NVD client
    ///
    /// The base URL is resolved in this order:
    /// 1. `NVD_BASE_URL` environment variable if set
    /// 2. Default NVD CVE API 2.0 URL
    pub fn new(api_key: Option<String>) -> Self {
        let resolved_url = env::var(NVD_BASE_URL_ENV)
            .ok()
            .unwrap_or_else(|| NVD_API_BASE_URL.to_string());

        Self {
            // Upstream has no SLA; cap how long a request may hang
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: resolved_url,
            api_key,
        }
    }

    /// Fetch CVEs published in the last three days, order-preserved
    ///
    /// Issues no outbound request when no API key is configured.
    pub async fn recent_cves(&self) -> Result<Vec<CveRecord>, NvdError> {
        let api_key = self.api_key.as_deref().ok_or(NvdError::MissingApiKey)?;

        let (pub_start, pub_end) = publication_window(Utc::now());

        tracing::debug!(
            pub_start = %pub_start,
            pub_end = %pub_end,
            url = %self.base_url,
            "Fetching recent CVEs from the NVD"
        );

        let response = self
            .client
            .get(&self.base_url)
            .header(API_KEY_HEADER, api_key)
            .query(&[
                ("resultsPerPage", RESULTS_PER_PAGE.to_string()),
                ("pubStartDate", pub_start),
                ("pubEndDate", pub_end),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NvdError::UpstreamStatus { status, body });
        }

        let payload: NvdResponse = response.json().await.map_err(|e| {
            NvdError::MalformedResponse(format!("Failed to deserialize CVE feed: {}", e))
        })?;

        let records = payload.into_records();

        tracing::debug!(count = records.len(), "Fetched recent CVEs");

        Ok(records)
    }
}

/// Compute the publication window ending at `end`, formatted for the NVD
fn publication_window(end: DateTime<Utc>) -> (String, String) {
    let start = end - chrono::Duration::days(LOOKBACK_DAYS);
    (
        start.format(NVD_DATE_FORMAT).to_string(),
        end.format(NVD_DATE_FORMAT).to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_is_exactly_three_days() {
        let end = Utc.with_ymd_and_hms(2025, 3, 10, 14, 30, 5).unwrap();
        let (start, end) = publication_window(end);
        assert_eq!(start, "2025-03-07T14:30:05.000Z");
        assert_eq!(end, "2025-03-10T14:30:05.000Z");
    }

    #[test]
    fn test_window_crosses_month_boundary() {
        let end = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let (start, _) = publication_window(end);
        assert_eq!(start, "2024-12-29T00:00:00.000Z");
    }

    #[test]
    fn test_window_format_has_fixed_millis() {
        let (start, end) = publication_window(Utc::now());
        for stamp in [&start, &end] {
            assert!(stamp.ends_with(".000Z"), "unexpected format: {}", stamp);
            assert_eq!(stamp.len(), "2025-01-01T00:00:00.000Z".len());
        }
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_request() {
        let client = NvdClient {
            client: Client::new(),
            // Nothing listens here; reaching it would fail loudly
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: None,
        };
        let result = client.recent_cves().await;
        assert!(matches!(result, Err(NvdError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_http_error() {
        let client = NvdClient {
            client: Client::new(),
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: Some("test-key".to_string()),
        };
        let result = client.recent_cves().await;
        assert!(matches!(result, Err(NvdError::HttpError(_))));
    }

    #[tokio::test]
    #[ignore] // Requires network access and a real NVD_API_KEY
    async fn test_fetch_recent_cves() {
        let api_key = std::env::var("NVD_API_KEY").expect("NVD_API_KEY not set");
        let client = NvdClient::new(Some(api_key));
        let records = client.recent_cves().await.unwrap();
        for record in records {
            assert!(!record.severity.is_empty());
            assert!(!record.summary.is_empty());
        }
    }
}
