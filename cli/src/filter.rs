use vulncount_common::date::{self, parse_day};
use vulncount_module_aggregator::{FilterConfig, SeverityFilter};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid --{flag} value")]
    InvalidDate {
        flag: &'static str,
        #[source]
        source: date::Error,
    },
}

#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
#[command(next_help_heading = "Filters")]
pub struct FilterArgs {
    /// Take vulnerabilities published on or after the specified date (ex. 2019-11-04)
    #[arg(long, env = "VULNCOUNT_PUBLISHED_AFTER", value_name = "YYYY-MM-DD")]
    pub published_after: Option<String>,

    /// Take vulnerabilities published on or before the specified date (ex. 2019-11-04)
    #[arg(long, env = "VULNCOUNT_PUBLISHED_BEFORE", value_name = "YYYY-MM-DD")]
    pub published_before: Option<String>,

    /// Comma-separated list of severity levels (ex. Critical,High)
    #[arg(
        long,
        alias = "severity-plugin",
        env = "VULNCOUNT_SEVERITY",
        value_name = "LIST"
    )]
    pub severity: Option<String>,
}

impl FilterArgs {
    /// Validate the arguments and turn them into a filter configuration.
    pub fn config(&self) -> Result<FilterConfig, Error> {
        let published_after = parse_bound("published-after", self.published_after.as_deref())?;
        let published_before =
            parse_bound("published-before", self.published_before.as_deref())?;

        let severities = match &self.severity {
            Some(list) => {
                let severities = parse_severities(list);
                if !severities.is_active() {
                    log::warn!("Severity filter '{list}' lists no severities, accepting all");
                }
                severities
            }
            None => SeverityFilter::Any,
        };

        let config = FilterConfig::new()
            .published_after(published_after)
            .published_before(published_before)
            .severities(severities);

        log::debug!("Filter: {config:?}");

        Ok(config)
    }
}

/// Parse a date bound. An empty value means the bound is not set.
fn parse_bound(
    flag: &'static str,
    value: Option<&str>,
) -> Result<Option<chrono::DateTime<chrono::Utc>>, Error> {
    value
        .filter(|value| !value.is_empty())
        .map(|value| parse_day(value).map_err(|source| Error::InvalidDate { flag, source }))
        .transpose()
}

/// Parse a comma-separated list of severities.
///
/// Entries are trimmed and upper-cased, empty entries are dropped. If nothing remains, the
/// filter accepts all severities.
pub fn parse_severities(list: &str) -> SeverityFilter {
    SeverityFilter::only(
        list.split(',')
            .map(str::trim)
            .filter(|severity| !severity.is_empty()),
    )
}
