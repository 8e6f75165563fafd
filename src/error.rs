//! Error type shared by the loader, aggregation engine and report runner

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("unknown {field}: {value:?}")]
    UnknownVariant { field: &'static str, value: String },

    #[error("invalid {table} record {id}: {reason}")]
    InvalidRecord {
        table: &'static str,
        id: u32,
        reason: String,
    },

    #[error("cannot average an empty group")]
    EmptyGroup,

    #[error("unknown report number {0} (expected 1-10)")]
    UnknownReport(u8),
}

impl AnalyticsError {
    pub(crate) fn unknown_variant(field: &'static str, value: &str) -> Self {
        AnalyticsError::UnknownVariant {
            field,
            value: value.to_string(),
        }
    }

    pub(crate) fn open(path: PathBuf, source: std::io::Error) -> Self {
        AnalyticsError::Open { path, source }
    }

    pub(crate) fn invalid(table: &'static str, id: u32, reason: impl Into<String>) -> Self {
        AnalyticsError::InvalidRecord {
            table,
            id,
            reason: reason.into(),
        }
    }
}
