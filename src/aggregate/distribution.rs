//! Distributions: the rating histogram and the spend box summary.

use crate::constants::WHISKER_IQR_FACTOR;
use crate::models::CustomerType;
use crate::pipeline::ActiveSubset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Half-open bucket `[lower, upper)`; the last bucket also includes `upper`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingHistogram {
    pub bins: Vec<HistogramBin>,
}

impl RatingHistogram {
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Histogram of ratings with `bin_count` equal-width buckets
///
/// Edges span the observed minimum and maximum of the subset. When every
/// rating is the same the width would be zero, so a single bucket holds
/// them all.
pub fn rating_histogram(subset: &ActiveSubset<'_>, bin_count: usize) -> RatingHistogram {
    let ratings: Vec<f64> = subset.iter().map(|r| r.rating).collect();
    let Some((min, max)) = min_max(&ratings) else {
        return RatingHistogram::default();
    };

    if min == max {
        return RatingHistogram {
            bins: vec![HistogramBin {
                lower: min,
                upper: max,
                count: ratings.len(),
            }],
        };
    }

    let bin_count = bin_count.max(1);
    let width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for rating in &ratings {
        let index = (((rating - min) / width).floor() as usize).min(bin_count - 1);
        counts[index] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: if i + 1 == bin_count {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count,
        })
        .collect();

    RatingHistogram { bins }
}

/// Box-plot statistics of `total` for one customer type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendSummary {
    pub customer_type: CustomerType,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest value within 1.5 IQR below `q1`
    pub lower_whisker: f64,
    /// Largest value within 1.5 IQR above `q3`
    pub upper_whisker: f64,
    /// Values beyond the whiskers, ascending
    pub outliers: Vec<f64>,
}

impl SpendSummary {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    fn from_values(customer_type: CustomerType, mut values: Vec<f64>) -> Option<Self> {
        values.sort_by(f64::total_cmp);
        let min = *values.first()?;
        let max = *values.last()?;
        let q1 = quantile(&values, 0.25)?;
        let median = quantile(&values, 0.5)?;
        let q3 = quantile(&values, 0.75)?;

        let reach = WHISKER_IQR_FACTOR * (q3 - q1);
        let (low_fence, high_fence) = (q1 - reach, q3 + reach);
        let within = |v: &f64| *v >= low_fence && *v <= high_fence;
        let lower_whisker = values.iter().copied().find(within).unwrap_or(min);
        let upper_whisker = values.iter().copied().rev().find(within).unwrap_or(max);
        let outliers = values.iter().copied().filter(|v| !within(v)).collect();

        Some(Self {
            customer_type,
            count: values.len(),
            min,
            q1,
            median,
            q3,
            max,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

/// Spend distribution per customer type, ordered Member, Normal, others
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerSpend {
    pub groups: Vec<SpendSummary>,
}

impl CustomerSpend {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, customer_type: &CustomerType) -> Option<&SpendSummary> {
        self.groups
            .iter()
            .find(|g| &g.customer_type == customer_type)
    }
}

pub fn spend_by_customer_type(subset: &ActiveSubset<'_>) -> CustomerSpend {
    let mut by_type: BTreeMap<&CustomerType, Vec<f64>> = BTreeMap::new();
    for record in subset.iter() {
        by_type
            .entry(&record.customer_type)
            .or_default()
            .push(record.total);
    }

    CustomerSpend {
        groups: by_type
            .into_iter()
            .filter_map(|(customer_type, values)| {
                SpendSummary::from_values(customer_type.clone(), values)
            })
            .collect(),
    }
}

/// Quantile of ascending `sorted` values with linear interpolation
///
/// `q` is clamped to `[0, 1]`. `None` for an empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let position = q.clamp(0.0, 1.0) * last as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v))),
    )
}
