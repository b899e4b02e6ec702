//! The immutable sales dataset and its loader.
//!
//! A [`Dataset`] is read once from the sales file and then only shared,
//! never edited. [`DatasetCache`] memoizes the load for the lifetime of the
//! process and offers an explicit [`reload`](DatasetCache::reload).

mod cache;
mod loader;

pub use cache::DatasetCache;
pub use loader::{load_dataset, parse_date};

use crate::models::SalesRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Ordered, read-only collection of sales records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<SalesRecord>,
    source: Option<PathBuf>,
}

impl Dataset {
    /// Build a dataset from records already in memory
    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        Self {
            records,
            source: None,
        }
    }

    /// Load a dataset with the default date formats
    pub fn load(path: &Path) -> Result<Self, crate::DataLoadError> {
        let formats: Vec<String> = crate::constants::DEFAULT_DATE_FORMATS
            .iter()
            .map(|f| f.to_string())
            .collect();
        load_dataset(path, &formats)
    }

    pub(crate) fn with_source(mut self, source: PathBuf) -> Self {
        self.source = Some(source);
        self
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// File the dataset was read from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Earliest and latest valid date; `None` when no row has a valid date
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().filter_map(|r| r.date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    pub fn cities(&self) -> BTreeSet<String> {
        self.distinct(|r| &r.city)
    }

    pub fn product_lines(&self) -> BTreeSet<String> {
        self.distinct(|r| &r.product_line)
    }

    pub fn branches(&self) -> BTreeSet<String> {
        self.distinct(|r| &r.branch)
    }

    pub fn payment_methods(&self) -> BTreeSet<String> {
        self.distinct(|r| &r.payment_method)
    }

    /// Rows carrying the invalid-date sentinel
    pub fn invalid_date_count(&self) -> usize {
        self.records.iter().filter(|r| !r.has_valid_date()).count()
    }

    /// Facets feeding the filter widgets and the `summary` command
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            rows: self.len(),
            invalid_date_rows: self.invalid_date_count(),
            date_bounds: self.date_bounds(),
            cities: self.cities(),
            product_lines: self.product_lines(),
            branches: self.branches(),
            payment_methods: self.payment_methods(),
        }
    }

    fn distinct<F>(&self, key: F) -> BTreeSet<String>
    where
        F: Fn(&SalesRecord) -> &String,
    {
        self.records.iter().map(|r| key(r).clone()).collect()
    }
}

/// Distinct values and bounds of a loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub invalid_date_rows: usize,
    pub date_bounds: Option<(NaiveDate, NaiveDate)>,
    pub cities: BTreeSet<String>,
    pub product_lines: BTreeSet<String>,
    pub branches: BTreeSet<String>,
    pub payment_methods: BTreeSet<String>,
}

#[cfg(test)]
mod tests;
