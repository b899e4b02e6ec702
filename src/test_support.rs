//! Shared fixtures for unit tests.

use crate::dataset::Dataset;
use crate::models::{CustomerType, SalesRecord};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Builder for a single record with neutral defaults
#[derive(Clone)]
pub struct RecordBuilder {
    record: SalesRecord,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self {
            record: SalesRecord {
                date: Some(date(2019, 1, 1)),
                city: "Yangon".to_string(),
                branch: "A".to_string(),
                product_line: "Food and beverages".to_string(),
                payment_method: "Cash".to_string(),
                customer_type: CustomerType::Member,
                total: 100.0,
                unit_price: 20.0,
                quantity: 5,
                tax: 5.0,
                cogs: 95.0,
                gross_income: 5.0,
                rating: 7.0,
            },
        }
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.record.date = Some(date);
        self
    }

    pub fn invalid_date(mut self) -> Self {
        self.record.date = None;
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.record.city = city.to_string();
        self
    }

    pub fn branch(mut self, branch: &str) -> Self {
        self.record.branch = branch.to_string();
        self
    }

    pub fn line(mut self, line: &str) -> Self {
        self.record.product_line = line.to_string();
        self
    }

    pub fn payment(mut self, payment: &str) -> Self {
        self.record.payment_method = payment.to_string();
        self
    }

    pub fn customer(mut self, customer_type: CustomerType) -> Self {
        self.record.customer_type = customer_type;
        self
    }

    pub fn total(mut self, total: f64) -> Self {
        self.record.total = total;
        self
    }

    pub fn gross_income(mut self, gross_income: f64) -> Self {
        self.record.gross_income = gross_income;
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.record.rating = rating;
        self
    }

    pub fn build(self) -> SalesRecord {
        self.record
    }
}

/// Three-row dataset used throughout the filter tests
///
/// (A, Food, 2023-01-01, 10), (B, Food, 2023-01-02, 20), (A, Toys, 2023-01-03, 5)
pub fn three_row_dataset() -> Dataset {
    Dataset::from_records(vec![
        RecordBuilder::new()
            .city("A")
            .line("Food")
            .date(date(2023, 1, 1))
            .total(10.0)
            .build(),
        RecordBuilder::new()
            .city("B")
            .line("Food")
            .date(date(2023, 1, 2))
            .total(20.0)
            .build(),
        RecordBuilder::new()
            .city("A")
            .line("Toys")
            .date(date(2023, 1, 3))
            .total(5.0)
            .build(),
    ])
}

/// Column layout of the chain's sales export
pub const SALES_HEADER: &str = "Invoice ID,Branch,City,Customer type,Gender,Product line,Unit price,Quantity,Tax 5%,Total,Date,Time,Payment,cogs,gross margin percentage,gross income,Rating";

/// Write `header` and `rows` to `sales.csv` inside a fresh temporary directory
pub fn write_sales_file(header: &str, rows: &[&str]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sales.csv");
    let mut content = String::from(header);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}
