use serde::Serialize;
use std::collections::BTreeMap;
use vulncount_common::Severity;

/// The outcome of counting the vulnerabilities of a report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AggregationResult {
    /// Matching vulnerabilities, by normalized severity
    counts_by_severity: BTreeMap<Severity, usize>,
    /// Number of vulnerabilities passing all filters
    total_matched: usize,
    /// Number of vulnerabilities passing the date filter, regardless of their severity
    total_all: usize,
    /// Number of vulnerabilities passing the date filter which were published strictly before
    /// the upper bound
    published_before_count: usize,
    /// Number of vulnerabilities passing the date filter which were published strictly after
    /// the lower bound
    published_after_count: usize,
}

impl AggregationResult {
    pub fn counts_by_severity(&self) -> &BTreeMap<Severity, usize> {
        &self.counts_by_severity
    }

    /// The number of matching vulnerabilities for a normalized severity label.
    pub fn count(&self, severity: &str) -> usize {
        self.counts_by_severity.get(severity).copied().unwrap_or_default()
    }

    pub fn total_matched(&self) -> usize {
        self.total_matched
    }

    pub fn total_all(&self) -> usize {
        self.total_all
    }

    pub fn published_before_count(&self) -> usize {
        self.published_before_count
    }

    pub fn published_after_count(&self) -> usize {
        self.published_after_count
    }

    /// Combine two partial results, e.g. of different scan results of the same report.
    pub fn merge(mut self, other: Self) -> Self {
        for (severity, count) in other.counts_by_severity {
            *self.counts_by_severity.entry(severity).or_default() += count;
        }
        self.total_matched += other.total_matched;
        self.total_all += other.total_all;
        self.published_before_count += other.published_before_count;
        self.published_after_count += other.published_after_count;
        self
    }
}

/// Building up an [`AggregationResult`], one record at a time.
#[derive(Debug, Default)]
pub(crate) struct Accumulator {
    result: AggregationResult,
}

impl Accumulator {
    /// Record a vulnerability which passed the date filter.
    pub fn seen(&mut self, published_before: bool, published_after: bool) {
        self.result.total_all += 1;
        if published_before {
            self.result.published_before_count += 1;
        }
        if published_after {
            self.result.published_after_count += 1;
        }
    }

    /// Record a vulnerability which passed all filters.
    pub fn matched(&mut self, severity: Severity) {
        *self.result.counts_by_severity.entry(severity).or_default() += 1;
        self.result.total_matched += 1;
    }

    pub fn finish(self) -> AggregationResult {
        self.result
    }
}
