#![allow(clippy::expect_used)]

use rstest::rstest;
use test_context::test_context;
use vulncount_common::{
    Severity,
    report::{Report, ScanResult, Vulnerability},
};
use vulncount_module_aggregator::{FilterConfig, SeverityFilter, aggregate, aggregate_result};
use vulncount_test_context::{Document, VulnCountContext, day};

fn filters() -> Vec<FilterConfig> {
    vec![
        FilterConfig::new(),
        FilterConfig::new().severities(SeverityFilter::only(["critical"])),
        FilterConfig::new().severities(SeverityFilter::only(["HIGH", "unknown", "nonsense"])),
        FilterConfig::new().published_after(day(2021, 1, 1)),
        FilterConfig::new().published_before(day(2021, 1, 1)),
        FilterConfig::new()
            .published_after(day(2020, 1, 1))
            .published_before(day(2021, 6, 1))
            .severities(SeverityFilter::only(["high", "medium"])),
    ]
}

#[test_context(VulnCountContext)]
#[test_log::test]
fn mixed_severities(ctx: &VulnCountContext) -> anyhow::Result<()> {
    let report = ctx.report(Document::MixedSeverity)?;

    let result = aggregate(&report, &FilterConfig::new());
    assert_eq!(result.count("CRITICAL"), 1);
    assert_eq!(result.count("HIGH"), 1);
    assert_eq!(result.count("UNKNOWN"), 1);
    assert_eq!(result.total_all(), 3);
    assert_eq!(result.total_matched(), 3);

    let filter = FilterConfig::new().severities(SeverityFilter::only(["CRITICAL"]));
    let result = aggregate(&report, &filter);
    assert_eq!(result.count("CRITICAL"), 1);
    assert_eq!(result.total_matched(), 1);
    assert_eq!(result.total_all(), 3);

    Ok(())
}

#[test_context(VulnCountContext)]
#[test_log::test]
fn no_filter_counts_everything(ctx: &VulnCountContext) -> anyhow::Result<()> {
    for document in [
        Document::Alpine,
        Document::MixedSeverity,
        Document::NoResults,
    ] {
        let report = ctx.report(document)?;
        let result = aggregate(&report, &FilterConfig::new());

        let total = report.vulnerabilities().count();
        assert_eq!(result.total_matched(), total, "{document:?}");
        assert_eq!(result.total_all(), total, "{document:?}");
    }

    Ok(())
}

#[test_context(VulnCountContext)]
#[test_log::test]
fn matched_is_sum_of_severities(ctx: &VulnCountContext) -> anyhow::Result<()> {
    let report = ctx.report(Document::Alpine)?;

    for filter in filters() {
        let result = aggregate(&report, &filter);

        assert_eq!(
            result.total_matched(),
            result.counts_by_severity().values().sum::<usize>(),
            "{filter:?}"
        );
        assert!(result.total_matched() <= result.total_all(), "{filter:?}");
        assert!(
            result
                .counts_by_severity()
                .keys()
                .all(|severity| filter.severities.accepts(severity)),
            "{filter:?}"
        );
    }

    Ok(())
}

#[test_context(VulnCountContext)]
#[test_log::test]
fn idempotent(ctx: &VulnCountContext) -> anyhow::Result<()> {
    let report = ctx.report(Document::Alpine)?;
    let copy = report.clone();

    for filter in filters() {
        let first = aggregate(&report, &filter);
        let second = aggregate(&report, &filter);
        assert_eq!(first, second, "{filter:?}");
    }

    // the report is left untouched
    assert_eq!(report, copy);

    Ok(())
}

#[test_context(VulnCountContext)]
#[test_log::test]
fn merged_partials(ctx: &VulnCountContext) -> anyhow::Result<()> {
    let report = ctx.report(Document::Alpine)?;

    for filter in filters() {
        let merged = report
            .results()
            .map(|result| aggregate_result(result, &filter))
            .reduce(|a, b| a.merge(b))
            .expect("report has results");

        assert_eq!(merged, aggregate(&report, &filter), "{filter:?}");
    }

    Ok(())
}

#[test_context(VulnCountContext)]
#[test_log::test]
fn missing_date_never_counts(ctx: &VulnCountContext) -> anyhow::Result<()> {
    let report = ctx.report(Document::Alpine)?;
    let undated = report
        .vulnerabilities()
        .filter(|vuln| vuln.published_date.is_none())
        .count();
    assert_eq!(undated, 1);

    // a window wide enough to include every dated record
    let filter = FilterConfig::new()
        .published_after(day(1970, 1, 1))
        .published_before(day(2100, 1, 1));
    let result = aggregate(&report, &filter);

    assert_eq!(result.total_all(), 8 - undated);
    assert_eq!(result.total_matched(), 8 - undated);
    assert_eq!(result.count("LOW"), 0);

    Ok(())
}

#[rstest]
#[case::on_lower_bound(FilterConfig::new().published_after(day(2020, 6, 1)), 1)]
#[case::on_upper_bound(FilterConfig::new().published_before(day(2020, 6, 1)), 1)]
#[case::on_both_bounds(
    FilterConfig::new().published_after(day(2020, 6, 1)).published_before(day(2020, 6, 1)),
    1
)]
#[case::after_upper_bound(FilterConfig::new().published_before(day(2020, 5, 31)), 0)]
#[case::before_lower_bound(FilterConfig::new().published_after(day(2020, 6, 2)), 0)]
#[test_log::test]
fn boundaries(#[case] filter: FilterConfig, #[case] expected: usize) {
    let report = Report::new([ScanResult::new([
        Vulnerability::new("high").with_published_date(day(2020, 6, 1))
    ])]);

    let result = aggregate(&report, &filter);

    assert_eq!(result.total_matched(), expected);
    assert_eq!(result.total_all(), expected);
    // exactly on the bound is never strictly before or after
    assert_eq!(result.published_before_count(), 0);
    assert_eq!(result.published_after_count(), 0);
}

#[test_log::test]
fn filter_normalization_matches_records() {
    let report = Report::new([ScanResult::new([
        Vulnerability::new(" moderate "),
        Vulnerability::new("Moderate"),
        Vulnerability::new("MODERATE"),
        Vulnerability::new("\t"),
    ])]);

    let filter = FilterConfig::new().severities(SeverityFilter::only([
        Severity::normalize("moderate"),
        Severity::normalize(""),
    ]));
    let result = aggregate(&report, &filter);

    assert_eq!(result.count("MODERATE"), 3);
    assert_eq!(result.count("UNKNOWN"), 1);
    assert_eq!(result.total_matched(), 4);
}
