//! Claims Analytics - read-only report engine over insurance snapshots
//!
//! This library provides:
//! - CSV loading and validation of policyholder, policy and claim tables
//! - Foreign-key joins with inner / left semantics
//! - Grouped aggregation (averages, counts, ratios, top-N, age bands)
//! - A catalog of ten analytic reports evaluated against an as-of date
//! - Parallel batch evaluation and table / CSV / JSON rendering

pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod error;
pub mod join;
pub mod output;
pub mod reports;
pub mod runner;

#[cfg(test)]
mod fixtures;

// Re-export commonly used types
pub use config::AnalysisConfig;
pub use dataset::{Claim, Dataset, IntegrityIssue, Policy, Policyholder, SkippedRow};
pub use error::{AnalyticsError, Result};
pub use output::{write_report, OutputFormat};
pub use reports::{run_report, ReportKind, ReportOutput};
pub use runner::ReportRunner;
