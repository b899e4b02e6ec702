//! Chart aggregations.
//!
//! One pure function per chart. Each reads an [`ActiveSubset`] (or, for
//! the gross-income share overview, the whole [`Dataset`]) and returns a
//! small owned table. An empty input always produces an empty table.
//!
//! [`ActiveSubset`]: crate::pipeline::ActiveSubset
//! [`Dataset`]: crate::dataset::Dataset

mod breakdown;
mod correlation;
mod distribution;
mod time_series;

pub use breakdown::{
    BranchProductCell, BranchProductIncome, CategoryCount, CategoryTotal, GrossIncomeShare,
    PaymentMix, ProductLineRevenue, gross_income_by_branch_and_line, gross_income_share,
    payment_mix, revenue_by_product_line,
};
pub use correlation::{Correlation, CorrelationMatrix, correlation_matrix};
pub use distribution::{
    CustomerSpend, HistogramBin, RatingHistogram, SpendSummary, quantile, rating_histogram,
    spend_by_customer_type,
};
pub use time_series::{DailySales, SalesOverTime, sales_over_time};

use crate::constants::DEFAULT_HISTOGRAM_BINS;
use serde::{Deserialize, Serialize};

/// Tunables of the chart catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationOptions {
    pub histogram_bins: usize,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}
