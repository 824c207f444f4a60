use crate::{
    filter::FilterConfig,
    model::{Accumulator, AggregationResult},
};
use tracing::instrument;
use vulncount_common::report::{Report, ScanResult};

/// Count the vulnerabilities of a report, applying the filters.
///
/// Every vulnerability of every result is visited exactly once:
///
/// * Records failing the date filter are skipped and don't count at all.
/// * All other records count towards [`AggregationResult::total_all`].
/// * Records also accepted by the severity filter count towards
///   [`AggregationResult::total_matched`] and their normalized severity.
///
/// The report is not modified and no state is kept between calls.
#[instrument(skip_all, fields(artifact = report.artifact_name.as_deref()))]
pub fn aggregate(report: &Report, filter: &FilterConfig) -> AggregationResult {
    let result = report
        .results()
        .map(|result| aggregate_result(result, filter))
        .fold(AggregationResult::default(), AggregationResult::merge);

    log::debug!(
        "matched {} of {} vulnerabilities",
        result.total_matched(),
        result.total_all()
    );

    result
}

/// Count the vulnerabilities of a single scan result.
///
/// Partial results of the same report can be combined using [`AggregationResult::merge`].
pub fn aggregate_result(result: &ScanResult, filter: &FilterConfig) -> AggregationResult {
    let mut acc = Accumulator::default();

    for vuln in result.vulnerabilities() {
        if !filter.accepts_date(vuln.published_date) {
            log::trace!(
                "{}: rejected by date ({:?})",
                vuln.vulnerability_id.as_deref().unwrap_or_default(),
                vuln.published_date
            );
            continue;
        }

        // with an active bound, the date must be present at this point
        let published = vuln.published_date;
        acc.seen(
            filter
                .published_before
                .zip(published)
                .is_some_and(|(before, published)| published < before),
            filter
                .published_after
                .zip(published)
                .is_some_and(|(after, published)| published > after),
        );

        let severity = vuln.normalized_severity();
        if !filter.severities.accepts(&severity) {
            continue;
        }

        acc.matched(severity);
    }

    acc.finish()
}
