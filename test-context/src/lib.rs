#![allow(clippy::expect_used)]

use anyhow::Context;
use chrono::{DateTime, TimeZone, Utc};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;
use test_context::TestContext;
use vulncount_common::report::Report;

/// Well known documents from `etc/test-data`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Document {
    /// A container image with OS and language packages, eight vulnerabilities in total
    Alpine,
    /// Three undated vulnerabilities, with the severities `Critical`, `high` and an empty one
    MixedSeverity,
    /// A report with `null` results
    NoResults,
    /// A document cut off in the middle
    Truncated,
}

impl Document {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Alpine => "trivy/alpine-3.10.json",
            Self::MixedSeverity => "trivy/mixed-severity.json",
            Self::NoResults => "trivy/no-results.json",
            Self::Truncated => "trivy/truncated.json",
        }
    }
}

pub struct VulnCountContext {
    /// A scratch directory, removed on teardown
    pub tmp: TempDir,
}

impl VulnCountContext {
    pub fn new() -> anyhow::Result<Self> {
        let tmp = tempfile::tempdir().context("creating temporary directory")?;
        log::debug!("Using temporary directory: {}", tmp.path().display());
        Ok(Self { tmp })
    }

    /// The absolute path of a test document.
    pub fn absolute_path(&self, path: impl AsRef<Path>) -> PathBuf {
        absolute_path(path)
    }

    pub fn document_bytes(&self, doc: Document) -> anyhow::Result<Vec<u8>> {
        document_bytes(doc.path())
    }

    pub fn report(&self, doc: Document) -> anyhow::Result<Report> {
        document(doc.path())
    }

    /// Write content into the scratch directory, returning the full path.
    pub fn write(&self, name: &str, content: impl AsRef<[u8]>) -> anyhow::Result<PathBuf> {
        let path = self.tmp.path().join(name);
        fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

impl TestContext for VulnCountContext {
    fn setup() -> Self {
        Self::new().expect("initializing the test context")
    }

    fn teardown(self) {
        if let Err(err) = self.tmp.close() {
            log::warn!("Failed to clean up temporary directory: {err}");
        }
    }
}

/// Resolve a path relative to `etc/test-data`.
pub fn absolute_path(path: impl AsRef<Path>) -> PathBuf {
    let base = match option_env!("CARGO_MANIFEST_DIR") {
        Some(dir) => PathBuf::from(dir).join(".."),
        None => env::current_dir().expect("current directory"),
    };

    base.join("etc/test-data").join(path)
}

/// Load the raw content of a test document.
pub fn document_bytes(path: impl AsRef<Path>) -> anyhow::Result<Vec<u8>> {
    let path = absolute_path(path);
    fs::read(&path).with_context(|| format!("reading test document {}", path.display()))
}

/// Load and decode a test document as report.
pub fn document(path: impl AsRef<Path>) -> anyhow::Result<Report> {
    let bytes = document_bytes(&path)?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("decoding test document {}", path.as_ref().display()))
}

/// The first instant of a day, in UTC.
pub fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date")
}
