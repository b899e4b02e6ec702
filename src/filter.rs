//! Filter selections and their validation.
//!
//! [`FilterSelection`] is what the filter widgets report: possibly
//! reversed dates, values that do not exist in the data, or untouched
//! widgets. [`FilterState`] is the validated form the pipeline consumes.

use crate::dataset::Dataset;
use crate::error::InvalidFilterError;
use crate::models::SalesRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, warn};

/// A filterable categorical dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterDimension {
    City,
    ProductLine,
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterDimension::City => f.write_str("city"),
            FilterDimension::ProductLine => f.write_str("product line"),
        }
    }
}

/// What an explicitly empty city or product-line selection means
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptySelectionPolicy {
    /// Reject it with [`InvalidFilterError::EmptySelection`]
    #[default]
    Reject,
    /// Accept it; the dashboard shows nothing
    ShowNothing,
}

/// Inclusive calendar range with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, swapping the ends if they arrive reversed
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Clamp both ends into `bounds`
    pub fn clamp_to(&self, bounds: &DateRange) -> Self {
        Self::new(
            self.start.clamp(bounds.start, bounds.end),
            self.end.clamp(bounds.start, bounds.end),
        )
    }

    /// Number of calendar days covered, both ends included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Raw widget state for one interaction
///
/// `None` means the widget was left at its default: every city, every
/// product line, the dataset's first or last date. `Some` of an empty set
/// is an explicit "nothing selected".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub cities: Option<BTreeSet<String>>,
    pub product_lines: Option<BTreeSet<String>>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl FilterSelection {
    pub fn with_cities<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cities = Some(cities.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_product_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.product_lines = Some(lines.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }
}

/// Validated filter for one render pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    selected_cities: BTreeSet<String>,
    selected_product_lines: BTreeSet<String>,
    /// `None` only when the dataset has no valid date at all
    date_range: Option<DateRange>,
}

impl FilterState {
    /// Assemble a state from already-validated parts
    pub fn new(
        selected_cities: BTreeSet<String>,
        selected_product_lines: BTreeSet<String>,
        date_range: Option<DateRange>,
    ) -> Self {
        Self {
            selected_cities,
            selected_product_lines,
            date_range,
        }
    }

    /// Every city, every product line, the full valid date span
    pub fn default_for(dataset: &Dataset) -> Self {
        Self {
            selected_cities: dataset.cities(),
            selected_product_lines: dataset.product_lines(),
            date_range: dataset
                .date_bounds()
                .map(|(start, end)| DateRange::new(start, end)),
        }
    }

    /// Validate raw widget state against `dataset`
    ///
    /// - Unknown cities and product lines are dropped.
    /// - Reversed dates are swapped.
    /// - A range overlapping the data is clamped to the data's date bounds.
    ///   A range entirely outside them is kept as given, so the resulting
    ///   state can hold dates outside the dataset bounds; it matches nothing.
    /// - An explicitly empty city or product-line selection on a non-empty
    ///   dataset is handled according to `policy`.
    pub fn from_selection(
        dataset: &Dataset,
        selection: &FilterSelection,
        policy: EmptySelectionPolicy,
    ) -> Result<Self, InvalidFilterError> {
        let selected_cities = resolve_dimension(
            FilterDimension::City,
            selection.cities.as_ref(),
            dataset.cities(),
            dataset.is_empty(),
            policy,
        )?;
        let selected_product_lines = resolve_dimension(
            FilterDimension::ProductLine,
            selection.product_lines.as_ref(),
            dataset.product_lines(),
            dataset.is_empty(),
            policy,
        )?;

        let date_range = resolve_date_range(dataset, selection.start, selection.end);

        Ok(Self {
            selected_cities,
            selected_product_lines,
            date_range,
        })
    }

    pub fn selected_cities(&self) -> &BTreeSet<String> {
        &self.selected_cities
    }

    pub fn selected_product_lines(&self) -> &BTreeSet<String> {
        &self.selected_product_lines
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    /// Whether `record` passes all three predicates
    ///
    /// Rows with the invalid-date sentinel never match.
    pub fn matches(&self, record: &SalesRecord) -> bool {
        let in_range = match (record.date, self.date_range) {
            (Some(date), Some(range)) => range.contains(date),
            _ => false,
        };
        in_range
            && self.selected_cities.contains(&record.city)
            && self.selected_product_lines.contains(&record.product_line)
    }
}

fn resolve_dimension(
    dimension: FilterDimension,
    requested: Option<&BTreeSet<String>>,
    known: BTreeSet<String>,
    dataset_is_empty: bool,
    policy: EmptySelectionPolicy,
) -> Result<BTreeSet<String>, InvalidFilterError> {
    let Some(requested) = requested else {
        return Ok(known);
    };

    if requested.is_empty() && !dataset_is_empty {
        match policy {
            EmptySelectionPolicy::Reject => {
                return Err(InvalidFilterError::EmptySelection { dimension });
            }
            EmptySelectionPolicy::ShowNothing => {
                debug!("Empty {} selection: nothing will be shown", dimension);
                return Ok(BTreeSet::new());
            }
        }
    }

    let (kept, unknown): (BTreeSet<String>, BTreeSet<String>) = requested
        .iter()
        .cloned()
        .partition(|value| known.contains(value));
    if !unknown.is_empty() {
        debug!("Ignoring unknown {} values: {:?}", dimension, unknown);
    }
    Ok(kept)
}

fn resolve_date_range(
    dataset: &Dataset,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Option<DateRange> {
    let bounds = dataset
        .date_bounds()
        .map(|(lo, hi)| DateRange::new(lo, hi));

    let Some(bounds) = bounds else {
        // No valid dates: nothing can match, whatever the range
        return match (start, end) {
            (Some(a), Some(b)) => Some(DateRange::new(a, b)),
            (Some(day), None) | (None, Some(day)) => Some(DateRange::single_day(day)),
            (None, None) => None,
        };
    };

    match (start, end) {
        (Some(a), Some(b)) if a > b => debug!("Swapping reversed date range {} / {}", a, b),
        _ => {}
    }

    // An open end defaults to the data bound, never past the other end
    let requested = DateRange::new(
        start.unwrap_or_else(|| end.map_or(bounds.start(), |e| e.min(bounds.start()))),
        end.unwrap_or_else(|| start.map_or(bounds.end(), |s| s.max(bounds.end()))),
    );

    if !requested.overlaps(&bounds) {
        warn!(
            "Date range {} lies outside the data ({}); no rows will match",
            requested, bounds
        );
        return Some(requested);
    }

    let clamped = requested.clamp_to(&bounds);
    if clamped != requested {
        debug!("Clamped date range {} to {}", requested, clamped);
    }
    Some(clamped)
}
