//! Counting vulnerabilities of a scan report.
//!
//! The entry point is [`aggregate`], which classifies every vulnerability of a [`Report`] against
//! a [`FilterConfig`] and returns the counts as an [`AggregationResult`].
//!
//! [`Report`]: vulncount_common::report::Report

pub mod filter;
pub mod model;
pub mod service;

pub use filter::{FilterConfig, SeverityFilter};
pub use model::AggregationResult;
pub use service::{aggregate, aggregate_result};
