//! NVD CVE API 2.0 response models
//!
//! Based on https://nvd.nist.gov/developers/vulnerabilities. Only the fields
//! the relay extracts are modeled; everything else in the upstream payload is
//! ignored. Every level is optional with a serde default so a missing field
//! falls through to the documented fallback, while a field of the wrong JSON
//! type is a deserialization error the service surfaces as a malformed
//! response rather than a crash.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const UNKNOWN_SEVERITY: &str = "Unknown";
const NO_DESCRIPTION: &str = "No description available.";

/// Top-level NVD response, `{"vulnerabilities": [...]}`
#[derive(Debug, Default, Deserialize)]
pub struct NvdResponse {
    #[serde(default)]
    pub vulnerabilities: Vec<NvdVulnerability>,
}

/// One element of the `vulnerabilities` array, wrapping a `cve` object
#[derive(Debug, Default, Deserialize)]
pub struct NvdVulnerability {
    #[serde(default)]
    pub cve: NvdCve,
}

#[derive(Debug, Default, Deserialize)]
pub struct NvdCve {
    #[serde(default)]
    pub id: Option<String>,

    /// Publication timestamp as reported by the NVD (no timezone suffix)
    #[serde(default)]
    pub published: Option<String>,

    #[serde(default)]
    pub metrics: Option<NvdMetrics>,

    #[serde(default)]
    pub descriptions: Vec<NvdDescription>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NvdMetrics {
    #[serde(default, rename = "cvssMetricV31")]
    pub cvss_metric_v31: Vec<NvdCvssMetric>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NvdCvssMetric {
    #[serde(default, rename = "cvssData")]
    pub cvss_data: Option<NvdCvssData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NvdCvssData {
    #[serde(default, rename = "baseSeverity")]
    pub base_severity: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NvdDescription {
    #[serde(default)]
    pub value: Option<String>,
}

/// Simplified vulnerability record returned to the frontend
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CveRecord {
    /// CVE identifier (e.g. "CVE-2025-1234"), null if upstream omitted it
    pub id: Option<String>,
    /// Publication timestamp, null if upstream omitted it
    pub published: Option<String>,
    /// CVSS v3.1 base severity label, "Unknown" when no metric is present
    pub severity: String,
    /// First upstream description, with a fixed fallback
    pub summary: String,
}

impl From<NvdVulnerability> for CveRecord {
    fn from(item: NvdVulnerability) -> Self {
        let cve = item.cve;

        let severity = cve
            .metrics
            .and_then(|m| m.cvss_metric_v31.into_iter().next())
            .and_then(|m| m.cvss_data)
            .and_then(|d| d.base_severity)
            .unwrap_or_else(|| UNKNOWN_SEVERITY.to_string());

        let summary = cve
            .descriptions
            .into_iter()
            .next()
            .and_then(|d| d.value)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        Self {
            id: cve.id,
            published: cve.published,
            severity,
            summary,
        }
    }
}

impl NvdResponse {
    /// Flatten the upstream payload into output records, preserving order
    pub fn into_records(self) -> Vec<CveRecord> {
        self.vulnerabilities
            .into_iter()
            .map(CveRecord::from)
            .collect()
    }
}
