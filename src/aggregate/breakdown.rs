//! Category breakdowns: revenue, payment mix, gross income.

use crate::dataset::Dataset;
use crate::models::SalesRecord;
use crate::pipeline::ActiveSubset;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub key: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub key: String,
    pub count: usize,
}

/// Sum of `total` per product line, ascending by value for horizontal bars
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductLineRevenue {
    pub lines: Vec<CategoryTotal>,
}

impl ProductLineRevenue {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, product_line: &str) -> Option<f64> {
        self.lines
            .iter()
            .find(|line| line.key == product_line)
            .map(|line| line.value)
    }
}

pub fn revenue_by_product_line(subset: &ActiveSubset<'_>) -> ProductLineRevenue {
    let mut lines = into_totals(sum_by(subset.iter(), |r| &r.product_line, |r| r.total));
    // Stable: equal values stay in name order
    lines.sort_by(|a, b| a.value.total_cmp(&b.value));
    ProductLineRevenue { lines }
}

/// Transactions per payment method, most used first
///
/// Only counts are stored; shares are derived with
/// [`proportions`](Self::proportions) when drawing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMix {
    pub methods: Vec<CategoryCount>,
}

impl PaymentMix {
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn total(&self) -> usize {
        self.methods.iter().map(|m| m.count).sum()
    }

    pub fn proportions(&self) -> Vec<(&str, f64)> {
        let total = self.total() as f64;
        self.methods
            .iter()
            .map(|m| (m.key.as_str(), m.count as f64 / total))
            .collect()
    }
}

pub fn payment_mix(subset: &ActiveSubset<'_>) -> PaymentMix {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in subset.iter() {
        *counts.entry(record.payment_method.as_str()).or_insert(0) += 1;
    }

    let mut methods: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(key, count)| CategoryCount {
            key: key.to_string(),
            count,
        })
        .collect();
    methods.sort_by(|a, b| b.count.cmp(&a.count));
    PaymentMix { methods }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchProductCell {
    pub branch: String,
    pub product_line: String,
    pub gross_income: f64,
}

/// Gross income on a branch × product-line grid
///
/// The grid spans every branch and every product line present in the
/// subset; combinations with no sales hold zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchProductIncome {
    pub branches: Vec<String>,
    pub product_lines: Vec<String>,
    /// Row-major: branch, then product line
    pub cells: Vec<BranchProductCell>,
}

impl BranchProductIncome {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, branch: &str, product_line: &str) -> Option<f64> {
        self.cells
            .iter()
            .find(|c| c.branch == branch && c.product_line == product_line)
            .map(|c| c.gross_income)
    }
}

pub fn gross_income_by_branch_and_line(subset: &ActiveSubset<'_>) -> BranchProductIncome {
    let mut sums: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    let mut branches: BTreeSet<&str> = BTreeSet::new();
    let mut product_lines: BTreeSet<&str> = BTreeSet::new();

    for record in subset.iter() {
        branches.insert(&record.branch);
        product_lines.insert(&record.product_line);
        *sums
            .entry((record.branch.as_str(), record.product_line.as_str()))
            .or_insert(0.0) += record.gross_income;
    }

    let mut cells = Vec::with_capacity(branches.len() * product_lines.len());
    for &branch in &branches {
        for &line in &product_lines {
            cells.push(BranchProductCell {
                branch: branch.to_string(),
                product_line: line.to_string(),
                gross_income: sums.get(&(branch, line)).copied().unwrap_or(0.0),
            });
        }
    }

    BranchProductIncome {
        branches: branches.into_iter().map(str::to_string).collect(),
        product_lines: product_lines.into_iter().map(str::to_string).collect(),
        cells,
    }
}

/// Share of gross income per product line across the whole dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrossIncomeShare {
    /// Ordered by product line name
    pub slices: Vec<CategoryTotal>,
}

impl GrossIncomeShare {
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Shares of the total; all zero when the total is zero
    pub fn proportions(&self) -> Vec<(&str, f64)> {
        let total = self.total();
        self.slices
            .iter()
            .map(|s| {
                let share = if total == 0.0 { 0.0 } else { s.value / total };
                (s.key.as_str(), share)
            })
            .collect()
    }
}

/// Gross income per product line over the full dataset
///
/// Deliberately ignores the active filters: this overview always shows
/// the global picture. Rows with an invalid date are still left out.
pub fn gross_income_share(dataset: &Dataset) -> GrossIncomeShare {
    let dated = dataset.records().iter().filter(|r| r.has_valid_date());
    GrossIncomeShare {
        slices: into_totals(sum_by(dated, |r| &r.product_line, |r| r.gross_income)),
    }
}

fn sum_by<'r, I, K, V>(records: I, key: K, value: V) -> BTreeMap<&'r str, f64>
where
    I: IntoIterator<Item = &'r SalesRecord>,
    K: Fn(&'r SalesRecord) -> &'r String,
    V: Fn(&SalesRecord) -> f64,
{
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for record in records {
        *sums.entry(key(record).as_str()).or_insert(0.0) += value(record);
    }
    sums
}

fn into_totals(sums: BTreeMap<&str, f64>) -> Vec<CategoryTotal> {
    sums.into_iter()
        .map(|(key, value)| CategoryTotal {
            key: key.to_string(),
            value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterState;
    use crate::pipeline::apply;
    use crate::test_support::{RecordBuilder, three_row_dataset};

    fn everything(dataset: &Dataset) -> ActiveSubset<'_> {
        apply(dataset, &FilterState::default_for(dataset))
    }

    #[test]
    fn test_revenue_ascending_by_value() {
        let dataset = three_row_dataset();
        let result = revenue_by_product_line(&everything(&dataset));

        let keys: Vec<&str> = result.lines.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["Toys", "Food"]);
        assert_eq!(result.get("Food"), Some(30.0));
        assert_eq!(result.get("Toys"), Some(5.0));
    }

    #[test]
    fn test_payment_mix_counts_and_proportions() {
        let dataset = Dataset::from_records(vec![
            RecordBuilder::new().payment("Cash").build(),
            RecordBuilder::new().payment("Ewallet").build(),
            RecordBuilder::new().payment("Cash").build(),
            RecordBuilder::new().payment("Credit card").build(),
        ]);
        let result = payment_mix(&everything(&dataset));

        assert_eq!(
            result.methods,
            vec![
                CategoryCount {
                    key: "Cash".to_string(),
                    count: 2
                },
                CategoryCount {
                    key: "Credit card".to_string(),
                    count: 1
                },
                CategoryCount {
                    key: "Ewallet".to_string(),
                    count: 1
                },
            ]
        );
        assert_eq!(
            result.proportions(),
            vec![("Cash", 0.5), ("Credit card", 0.25), ("Ewallet", 0.25)]
        );
    }

    #[test]
    fn test_branch_grid_zero_fills_missing_combinations() {
        let dataset = Dataset::from_records(vec![
            RecordBuilder::new()
                .branch("A")
                .line("Food")
                .gross_income(3.0)
                .build(),
            RecordBuilder::new()
                .branch("A")
                .line("Food")
                .gross_income(2.0)
                .build(),
            RecordBuilder::new()
                .branch("B")
                .line("Toys")
                .gross_income(4.0)
                .build(),
        ]);
        let result = gross_income_by_branch_and_line(&everything(&dataset));

        assert_eq!(result.branches, vec!["A", "B"]);
        assert_eq!(result.product_lines, vec!["Food", "Toys"]);
        assert_eq!(result.cells.len(), 4);
        assert_eq!(result.get("A", "Food"), Some(5.0));
        assert_eq!(result.get("A", "Toys"), Some(0.0));
        assert_eq!(result.get("B", "Food"), Some(0.0));
        assert_eq!(result.get("B", "Toys"), Some(4.0));
        assert_eq!(result.get("C", "Toys"), None);
    }

    #[test]
    fn test_gross_income_share_ignores_filters() {
        let dataset = Dataset::from_records(vec![
            RecordBuilder::new().line("Food").gross_income(6.0).build(),
            RecordBuilder::new().line("Toys").gross_income(2.0).build(),
            RecordBuilder::new()
                .line("Toys")
                .gross_income(100.0)
                .invalid_date()
                .build(),
        ]);
        let result = gross_income_share(&dataset);

        assert_eq!(result.total(), 8.0);
        assert_eq!(result.proportions(), vec![("Food", 0.75), ("Toys", 0.25)]);
    }

    #[test]
    fn test_zero_gross_income_share() {
        let dataset = Dataset::from_records(vec![
            RecordBuilder::new().line("Food").gross_income(0.0).build(),
        ]);
        assert_eq!(gross_income_share(&dataset).proportions(), vec![("Food", 0.0)]);
    }

    #[test]
    fn test_empty_subset_gives_empty_tables() {
        let dataset = three_row_dataset();
        let state = FilterState::new(Default::default(), Default::default(), None);
        let subset = apply(&dataset, &state);

        assert!(revenue_by_product_line(&subset).is_empty());
        assert!(payment_mix(&subset).is_empty());
        assert!(gross_income_by_branch_and_line(&subset).is_empty());
    }
}
