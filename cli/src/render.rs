use chrono::{DateTime, Utc};
use std::io::{self, Write};
use vulncount_common::date::DATE_FORMAT;
use vulncount_module_aggregator::{AggregationResult, FilterConfig};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per active filter
    #[default]
    Text,
    /// The full result as JSON object
    Json,
}

/// Write the result to the output, in the requested format.
pub fn render(
    out: &mut impl Write,
    format: OutputFormat,
    filter: &FilterConfig,
    result: &AggregationResult,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => render_text(out, filter, result),
        OutputFormat::Json => render_json(out, result),
    }
}

fn render_text(
    out: &mut impl Write,
    filter: &FilterConfig,
    result: &AggregationResult,
) -> io::Result<()> {
    for severity in filter.severities.severities() {
        writeln!(
            out,
            r#"Number of "{severity}" vulnerabilities: {}"#,
            result.count(severity)
        )?;
    }

    if let Some(after) = filter.published_after {
        writeln!(
            out,
            r#"Number of vulns published after "{}": {}"#,
            format_day(after),
            result.published_after_count()
        )?;
    }

    if let Some(before) = filter.published_before {
        writeln!(
            out,
            r#"Number of vulns published before "{}": {}"#,
            format_day(before),
            result.published_before_count()
        )?;
    }

    if filter.is_empty() {
        writeln!(out, "Number of total vulnerabilities: {}", result.total_all())?;
    }

    Ok(())
}

fn render_json(out: &mut impl Write, result: &AggregationResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)
}

fn format_day(value: DateTime<Utc>) -> impl std::fmt::Display {
    value.format(DATE_FORMAT)
}
