//! Sales Dashboard Library
//!
//! The filter-and-aggregate core of an interactive retail sales dashboard.
//!
//! This library provides tools for:
//! - Loading the sales CSV export once into an immutable [`Dataset`]
//! - Validating widget selections into a [`FilterState`]
//! - Filtering the dataset into the active subset
//! - Computing the fixed chart catalog from that subset
//! - Handing the results to a [`ChartRenderer`]

pub mod aggregate;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod models;
pub mod pipeline;
pub mod session;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod render;
}

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::DashboardConfig;
pub use dashboard::{ChartKind, ChartRenderer, Dashboard, render};
pub use dataset::{Dataset, DatasetCache, DatasetSummary};
pub use error::{DashboardError, DataLoadError, InvalidFilterError, Result};
pub use filter::{DateRange, EmptySelectionPolicy, FilterSelection, FilterState};
pub use models::{CustomerType, NumericColumn, SalesRecord};
pub use pipeline::{ActiveSubset, EmptyResultWarning, apply};
pub use session::DashboardSession;
