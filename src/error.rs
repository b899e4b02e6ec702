//! Error handling for dashboard operations.
//!
//! Load failures are fatal and stop the dashboard. Filter failures are
//! recoverable and only arise from the strict empty-selection policy.
//! Empty results are not errors at all; see
//! [`EmptyResultWarning`](crate::pipeline::EmptyResultWarning).

use crate::filter::FilterDimension;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading the sales file into a [`Dataset`](crate::Dataset).
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Dataset not found at path: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: polars::error::PolarsError,
    },

    #[error("Dataset {path} is missing required columns: {}", columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    #[error("Invalid value '{value}' in column '{column}' at data row {row}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },
}

/// Rejected filter input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidFilterError {
    #[error("No {dimension} selected; select at least one value")]
    EmptySelection { dimension: FilterDimension },
}

/// Crate-level error wrapping every failure domain.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),

    #[error(transparent)]
    InvalidFilter(#[from] InvalidFilterError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Render error: {0}")]
    Render(#[from] std::io::Error),
}

impl DashboardError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the dashboard must halt on this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DataLoad(_) | Self::Configuration { .. })
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_lists_every_column() {
        let err = DataLoadError::MissingColumns {
            path: PathBuf::from("sales.csv"),
            columns: vec!["City".to_string(), "Rating".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Dataset sales.csv is missing required columns: City, Rating"
        );
    }

    #[test]
    fn test_fatality() {
        let load: DashboardError = DataLoadError::NotFound {
            path: PathBuf::from("missing.csv"),
        }
        .into();
        assert!(load.is_fatal());

        let filter: DashboardError = InvalidFilterError::EmptySelection {
            dimension: FilterDimension::City,
        }
        .into();
        assert!(!filter.is_fatal());
        assert_eq!(
            filter.to_string(),
            "No city selected; select at least one value"
        );
    }
}
