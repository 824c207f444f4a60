//! The scan report model.
//!
//! Field names follow the JSON report layout produced by Trivy. Only the fields required for
//! counting (and a few for diagnostics) are modeled, everything else is ignored when decoding.

use crate::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scan report, a list of scan results.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Report {
    /// The name of the scanned artifact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_name: Option<String>,
    /// The results, `null` in the document is the same as no results
    #[serde(default)]
    pub results: Option<Vec<ScanResult>>,
}

impl Report {
    pub fn new(results: impl IntoIterator<Item = ScanResult>) -> Self {
        Self {
            artifact_name: None,
            results: Some(results.into_iter().collect()),
        }
    }

    pub fn results(&self) -> impl Iterator<Item = &ScanResult> {
        self.results.iter().flatten()
    }

    /// Iterate over all vulnerabilities of all results.
    pub fn vulnerabilities(&self) -> impl Iterator<Item = &Vulnerability> {
        self.results().flat_map(ScanResult::vulnerabilities)
    }
}

impl FromIterator<ScanResult> for Report {
    fn from_iter<T: IntoIterator<Item = ScanResult>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// The result of scanning a single target.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, rename = "Type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(default)]
    pub vulnerabilities: Option<Vec<Vulnerability>>,
}

impl ScanResult {
    pub fn new(vulnerabilities: impl IntoIterator<Item = Vulnerability>) -> Self {
        Self {
            vulnerabilities: Some(vulnerabilities.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn vulnerabilities(&self) -> impl Iterator<Item = &Vulnerability> {
        self.vulnerabilities.iter().flatten()
    }
}

/// A single vulnerability record of a result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Vulnerability {
    #[serde(
        default,
        rename = "VulnerabilityID",
        skip_serializing_if = "Option::is_none"
    )]
    pub vulnerability_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pkg_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_version: Option<String>,
    /// The raw severity label, as reported by the scanner
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub published_date: Option<DateTime<Utc>>,
}

impl Vulnerability {
    pub fn new(severity: impl Into<String>) -> Self {
        Self {
            severity: Some(severity.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.vulnerability_id = Some(id.into());
        self
    }

    pub fn with_published_date(mut self, published: DateTime<Utc>) -> Self {
        self.published_date = Some(published);
        self
    }

    /// The normalized severity of this record.
    pub fn normalized_severity(&self) -> Severity {
        Severity::from_optional(self.severity.as_deref())
    }
}
