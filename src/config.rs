//! Configuration management and validation.
//!
//! [`DashboardConfig`] is built in layers: defaults, then the
//! `SALES_DASHBOARD_DATA` environment variable, then command-line flags.
//! [`validate`](DashboardConfig::validate) runs once all layers are applied.

use crate::aggregate::AggregationOptions;
use crate::constants::{
    DATA_PATH_ENV, DEFAULT_DATA_PATH, DEFAULT_DATE_FORMATS, DEFAULT_HISTOGRAM_BINS,
    MAX_HISTOGRAM_BINS,
};
use crate::dashboard::ChartKind;
use crate::error::{DashboardError, Result};
use crate::filter::EmptySelectionPolicy;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Settings for one dashboard session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Sales CSV file
    pub data_path: PathBuf,

    /// chrono formats tried in order when parsing the date column
    pub date_formats: Vec<String>,

    /// Bucket count of the rating histogram
    pub histogram_bins: usize,

    /// What an explicitly empty city or product-line selection means
    pub empty_selection: EmptySelectionPolicy,

    /// Charts to draw, in catalog order regardless of listing order
    pub charts: Vec<ChartKind>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            empty_selection: EmptySelectionPolicy::default(),
            charts: ChartKind::ALL.to_vec(),
        }
    }
}

impl DashboardConfig {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            ..Default::default()
        }
    }

    pub fn with_data_path(mut self, data_path: impl Into<PathBuf>) -> Self {
        self.data_path = data_path.into();
        self
    }

    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    pub fn with_date_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_empty_selection(mut self, policy: EmptySelectionPolicy) -> Self {
        self.empty_selection = policy;
        self
    }

    pub fn with_charts(mut self, charts: Vec<ChartKind>) -> Self {
        self.charts = charts;
        self
    }

    /// Defaults overlaid with the process environment
    pub fn from_env() -> Self {
        Self::default().apply_env(std::env::var(DATA_PATH_ENV).ok())
    }

    /// Overlay an environment-provided data path; blank values are ignored
    pub fn apply_env(mut self, data_path: Option<String>) -> Self {
        if let Some(path) = data_path.filter(|p| !p.trim().is_empty()) {
            debug!("Using data path from {}: {}", DATA_PATH_ENV, path);
            self.data_path = PathBuf::from(path.trim());
        }
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.data_path.as_os_str().is_empty() {
            return Err(DashboardError::configuration("Data path cannot be empty"));
        }

        if self.histogram_bins == 0 {
            return Err(DashboardError::configuration(
                "Histogram bin count must be greater than 0",
            ));
        }

        if self.histogram_bins > MAX_HISTOGRAM_BINS {
            return Err(DashboardError::configuration(format!(
                "Histogram bin count cannot exceed {}",
                MAX_HISTOGRAM_BINS
            )));
        }

        if self.date_formats.is_empty() {
            return Err(DashboardError::configuration(
                "At least one date format is required",
            ));
        }

        // Each format must round-trip a known date
        let probe = NaiveDate::from_ymd_opt(2019, 1, 5).unwrap_or_default();
        for format in &self.date_formats {
            let rendered = probe.format(format).to_string();
            if NaiveDate::parse_from_str(&rendered, format) != Ok(probe) {
                return Err(DashboardError::configuration(format!(
                    "Date format '{}' does not describe a full calendar date",
                    format
                )));
            }
        }

        if self.charts.is_empty() {
            return Err(DashboardError::configuration(
                "At least one chart must be selected",
            ));
        }

        Ok(())
    }

    pub fn aggregation_options(&self) -> AggregationOptions {
        AggregationOptions {
            histogram_bins: self.histogram_bins,
        }
    }
}
