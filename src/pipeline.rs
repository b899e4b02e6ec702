//! The filter pipeline.
//!
//! [`apply`] turns the dataset and a [`FilterState`] into the
//! [`ActiveSubset`] every filtered chart reads from. It is a pure
//! function: no caching, no mutation, source order preserved.

use crate::dataset::Dataset;
use crate::filter::FilterState;
use crate::models::SalesRecord;
use std::fmt;
use tracing::{debug, info};

/// Signal that no row survived the filters
///
/// Not an error. Renderers show "no data to display" in place of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyResultWarning {
    /// Size of the dataset the filters were applied to
    pub source_rows: usize,
}

impl fmt::Display for EmptyResultWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No data to display: none of the {} rows match the current filters",
            self.source_rows
        )
    }
}

/// Rows of the dataset that pass the current filters, in source order
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSubset<'a> {
    rows: Vec<&'a SalesRecord>,
    source_rows: usize,
}

impl<'a> ActiveSubset<'a> {
    pub fn rows(&self) -> &[&'a SalesRecord] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a SalesRecord> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row count of the dataset this subset was drawn from
    pub fn source_rows(&self) -> usize {
        self.source_rows
    }

    /// The empty-result marker, present exactly when no row matched
    pub fn empty_warning(&self) -> Option<EmptyResultWarning> {
        self.is_empty().then_some(EmptyResultWarning {
            source_rows: self.source_rows,
        })
    }

    /// Sum of `total` over the subset
    pub fn total_sales(&self) -> f64 {
        self.iter().map(|r| r.total).sum()
    }
}

/// Apply `state` to `dataset`
pub fn apply<'a>(dataset: &'a Dataset, state: &FilterState) -> ActiveSubset<'a> {
    let rows: Vec<&SalesRecord> = dataset
        .records()
        .iter()
        .filter(|record| state.matches(record))
        .collect();

    debug!(
        "Filter kept {} of {} rows ({} cities, {} product lines, range {:?})",
        rows.len(),
        dataset.len(),
        state.selected_cities().len(),
        state.selected_product_lines().len(),
        state.date_range()
    );

    let subset = ActiveSubset {
        rows,
        source_rows: dataset.len(),
    };
    if let Some(warning) = subset.empty_warning() {
        info!("{}", warning);
    }
    subset
}
