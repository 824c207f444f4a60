use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use vulncount_common::Severity;

/// The severities to accept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SeverityFilter {
    /// No filter, accept all severities
    #[default]
    Any,
    /// Accept only the listed severities, never empty
    Only(BTreeSet<Severity>),
}

impl SeverityFilter {
    /// Create a filter accepting only the provided severities.
    ///
    /// Each entry is normalized. If no entries remain, the filter accepts everything, the same
    /// as if no filter had been provided.
    pub fn only<I, S>(severities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Severity>,
    {
        let severities = severities
            .into_iter()
            .map(Into::into)
            .collect::<BTreeSet<_>>();

        if severities.is_empty() {
            Self::Any
        } else {
            Self::Only(severities)
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Only(_))
    }

    pub fn accepts(&self, severity: &Severity) -> bool {
        match self {
            Self::Any => true,
            Self::Only(severities) => severities.contains(severity),
        }
    }

    /// The accepted severities, in order. Empty when accepting all.
    pub fn severities(&self) -> impl Iterator<Item = &Severity> {
        let severities = match self {
            Self::Any => None,
            Self::Only(severities) => Some(severities),
        };
        severities.into_iter().flatten()
    }
}

/// Filters to apply when counting.
///
/// Both date bounds are inclusive. When a date bound is active, records without a publication
/// date don't match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterConfig {
    pub published_after: Option<DateTime<Utc>>,
    pub published_before: Option<DateTime<Utc>>,
    pub severities: SeverityFilter,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published_after(mut self, after: impl Into<Option<DateTime<Utc>>>) -> Self {
        self.published_after = after.into();
        self
    }

    pub fn published_before(mut self, before: impl Into<Option<DateTime<Utc>>>) -> Self {
        self.published_before = before.into();
        self
    }

    pub fn severities(mut self, severities: SeverityFilter) -> Self {
        self.severities = severities;
        self
    }

    pub fn has_date_filter(&self) -> bool {
        self.published_after.is_some() || self.published_before.is_some()
    }

    /// `true` if no filter is active at all
    pub fn is_empty(&self) -> bool {
        !self.has_date_filter() && !self.severities.is_active()
    }

    /// Check a publication date against the date bounds.
    pub fn accepts_date(&self, published: Option<DateTime<Utc>>) -> bool {
        if !self.has_date_filter() {
            return true;
        }

        let Some(published) = published else {
            return false;
        };

        if self.published_before.is_some_and(|before| published > before) {
            return false;
        }
        if self.published_after.is_some_and(|after| published < after) {
            return false;
        }

        true
    }
}
