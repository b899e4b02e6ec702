//! Core data structures for sales analysis.
//!
//! Defines the sales record loaded from the input file, the customer
//! category, and the fixed set of numeric columns used by the
//! correlation chart.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Customer loyalty category
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CustomerType {
    Member,
    Normal,
    /// Any category label outside the two the chain uses
    Other(String),
}

impl CustomerType {
    /// Parse a raw category label, case-insensitively for the known kinds
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("member") {
            CustomerType::Member
        } else if raw.eq_ignore_ascii_case("normal") {
            CustomerType::Normal
        } else {
            CustomerType::Other(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CustomerType::Member => "Member",
            CustomerType::Normal => "Normal",
            CustomerType::Other(label) => label,
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One invoice line of the sales dataset
///
/// `date` is `None` when the source value could not be parsed. That is the
/// invalid-date sentinel: such rows stay in the dataset but never reach
/// any chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub date: Option<NaiveDate>,
    pub city: String,
    pub branch: String,
    pub product_line: String,
    pub payment_method: String,
    pub customer_type: CustomerType,
    pub total: f64,
    pub unit_price: f64,
    pub quantity: i64,
    pub tax: f64,
    pub cogs: f64,
    pub gross_income: f64,
    pub rating: f64,
}

impl SalesRecord {
    pub fn has_valid_date(&self) -> bool {
        self.date.is_some()
    }

    /// Value of one of the correlation columns
    pub fn numeric(&self, column: NumericColumn) -> f64 {
        match column {
            NumericColumn::UnitPrice => self.unit_price,
            NumericColumn::Quantity => self.quantity as f64,
            NumericColumn::Tax => self.tax,
            NumericColumn::Total => self.total,
            NumericColumn::Cogs => self.cogs,
            NumericColumn::GrossIncome => self.gross_income,
            NumericColumn::Rating => self.rating,
        }
    }
}

/// Numeric columns participating in the correlation matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NumericColumn {
    UnitPrice,
    Quantity,
    Tax,
    Total,
    Cogs,
    GrossIncome,
    Rating,
}

impl NumericColumn {
    /// Matrix order
    pub const ALL: [NumericColumn; 7] = [
        NumericColumn::UnitPrice,
        NumericColumn::Quantity,
        NumericColumn::Tax,
        NumericColumn::Total,
        NumericColumn::Cogs,
        NumericColumn::GrossIncome,
        NumericColumn::Rating,
    ];

    /// Header of the column in the input file
    pub fn label(&self) -> &'static str {
        use crate::constants::*;
        match self {
            NumericColumn::UnitPrice => COL_UNIT_PRICE,
            NumericColumn::Quantity => COL_QUANTITY,
            NumericColumn::Tax => COL_TAX,
            NumericColumn::Total => COL_TOTAL,
            NumericColumn::Cogs => COL_COGS,
            NumericColumn::GrossIncome => COL_GROSS_INCOME,
            NumericColumn::Rating => COL_RATING,
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
