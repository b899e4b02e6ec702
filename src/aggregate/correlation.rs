//! Pearson correlation across the numeric columns.

use crate::models::NumericColumn;
use crate::pipeline::ActiveSubset;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One matrix entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Correlation {
    Defined(f64),
    /// A column involved has zero variance over the subset
    Undefined,
}

impl Correlation {
    pub fn value(&self) -> Option<f64> {
        match self {
            Correlation::Defined(value) => Some(*value),
            Correlation::Undefined => None,
        }
    }
}

impl fmt::Display for Correlation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Correlation::Defined(value) => write!(f, "{:.2}", value),
            Correlation::Undefined => f.write_str("undefined"),
        }
    }
}

/// Square, symmetric matrix over [`NumericColumn::ALL`]
///
/// Empty (no columns) when the subset is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<NumericColumn>,
    /// Row-major, `columns.len()` squared entries
    pub values: Vec<Correlation>,
}

impl CorrelationMatrix {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, row: NumericColumn, column: NumericColumn) -> Option<Correlation> {
        let i = self.columns.iter().position(|c| *c == row)?;
        let j = self.columns.iter().position(|c| *c == column)?;
        self.values.get(i * self.columns.len() + j).copied()
    }

    pub fn row(&self, row: NumericColumn) -> Option<&[Correlation]> {
        let n = self.columns.len();
        let i = self.columns.iter().position(|c| *c == row)?;
        Some(&self.values[i * n..(i + 1) * n])
    }
}

pub fn correlation_matrix(subset: &ActiveSubset<'_>) -> CorrelationMatrix {
    if subset.is_empty() {
        return CorrelationMatrix::default();
    }

    let columns: Vec<Vec<f64>> = NumericColumn::ALL
        .iter()
        .map(|column| subset.iter().map(|r| r.numeric(*column)).collect())
        .collect();

    let n = columns.len();
    let mut values = vec![Correlation::Undefined; n * n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&columns[i], &columns[j]);
            values[i * n + j] = r;
            values[j * n + i] = r;
        }
    }

    CorrelationMatrix {
        columns: NumericColumn::ALL.to_vec(),
        values,
    }
}

/// Pearson coefficient of two equally long samples
fn pearson(x: &[f64], y: &[f64]) -> Correlation {
    if is_constant(x) || is_constant(y) {
        return Correlation::Undefined;
    }

    let count = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / count;
    let mean_y = y.iter().sum::<f64>() / count;

    let (mut covariance, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mean_x, b - mean_y);
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return Correlation::Undefined;
    }
    Correlation::Defined((covariance / denominator).clamp(-1.0, 1.0))
}

/// Zero variance, tested exactly rather than through a rounded mean
fn is_constant(values: &[f64]) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first),
        None => true,
    }
}
