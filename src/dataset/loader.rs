//! Sales file reading and type normalization.
//!
//! Reads the delimited file with polars, every column as text, then
//! converts each row into a typed [`SalesRecord`]. Dates that fail to
//! parse become the invalid-date sentinel instead of failing the load;
//! malformed numbers fail it.

use super::Dataset;
use crate::constants::*;
use crate::error::DataLoadError;
use crate::models::{CustomerType, SalesRecord};
use chrono::NaiveDate;
use polars::prelude::{CsvReadOptions, DataFrame, SerReader, StringChunked};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// Read the sales file at `path`
///
/// `date_formats` are chrono format strings tried in order for the date
/// column.
pub fn load_dataset(path: &Path, date_formats: &[String]) -> Result<Dataset, DataLoadError> {
    if !path.is_file() {
        return Err(DataLoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    debug!("Reading sales file: {}", path.display());

    // Infer nothing: every column arrives as text and is typed below
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|source| DataLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let columns = SourceColumns::resolve(&frame, path)?;

    let mut records = Vec::with_capacity(frame.height());
    for row in 0..frame.height() {
        records.push(columns.record(row, date_formats)?);
    }

    let dataset = Dataset::from_records(records).with_source(path.to_path_buf());

    let invalid_dates = dataset.invalid_date_count();
    if invalid_dates > 0 {
        warn!(
            "{} of {} rows have unparsable dates and are excluded from analysis",
            invalid_dates,
            dataset.len()
        );
    }

    let (rating_lo, rating_hi) = RATING_SCALE;
    let off_scale = dataset
        .records()
        .iter()
        .filter(|r| r.rating < rating_lo || r.rating > rating_hi)
        .count();
    if off_scale > 0 {
        warn!(
            "{} ratings fall outside the {}-{} scale",
            off_scale, rating_lo, rating_hi
        );
    }

    info!(
        "Loaded {} sales records from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

/// Parse a calendar date, trying each format in turn
///
/// Timestamps such as `2019-01-05 13:08:00` are reduced to their date.
/// Returns `None` for anything unparsable.
pub fn parse_date(raw: &str, formats: &[String]) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let parse = |value: &str| {
        formats
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
    };

    parse(raw).or_else(|| {
        let day = raw.split([' ', 'T']).next()?;
        if day.len() < raw.len() {
            parse(day)
        } else {
            None
        }
    })
}

/// Text columns of the frame, one per required input column
struct SourceColumns<'a> {
    date: &'a StringChunked,
    city: &'a StringChunked,
    branch: &'a StringChunked,
    product_line: &'a StringChunked,
    payment: &'a StringChunked,
    customer_type: &'a StringChunked,
    total: &'a StringChunked,
    unit_price: &'a StringChunked,
    quantity: &'a StringChunked,
    tax: &'a StringChunked,
    cogs: &'a StringChunked,
    gross_income: &'a StringChunked,
    rating: &'a StringChunked,
}

impl<'a> SourceColumns<'a> {
    fn resolve(frame: &'a DataFrame, path: &Path) -> Result<Self, DataLoadError> {
        let present: HashSet<&str> = frame
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| !present.contains(*name))
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(DataLoadError::MissingColumns {
                path: path.to_path_buf(),
                columns: missing,
            });
        }

        let text = move |name: &str| {
            frame
                .column(name)
                .and_then(|column| column.as_materialized_series().str())
                .map_err(|source| DataLoadError::Read {
                    path: path.to_path_buf(),
                    source,
                })
        };

        Ok(Self {
            date: text(COL_DATE)?,
            city: text(COL_CITY)?,
            branch: text(COL_BRANCH)?,
            product_line: text(COL_PRODUCT_LINE)?,
            payment: text(COL_PAYMENT)?,
            customer_type: text(COL_CUSTOMER_TYPE)?,
            total: text(COL_TOTAL)?,
            unit_price: text(COL_UNIT_PRICE)?,
            quantity: text(COL_QUANTITY)?,
            tax: text(COL_TAX)?,
            cogs: text(COL_COGS)?,
            gross_income: text(COL_GROSS_INCOME)?,
            rating: text(COL_RATING)?,
        })
    }

    fn record(&self, row: usize, date_formats: &[String]) -> Result<SalesRecord, DataLoadError> {
        Ok(SalesRecord {
            date: self
                .date
                .get(row)
                .and_then(|raw| parse_date(raw, date_formats)),
            city: label(self.city, row),
            branch: label(self.branch, row),
            product_line: label(self.product_line, row),
            payment_method: label(self.payment, row),
            customer_type: CustomerType::parse(self.customer_type.get(row).unwrap_or_default()),
            total: decimal(self.total, COL_TOTAL, row)?,
            unit_price: decimal(self.unit_price, COL_UNIT_PRICE, row)?,
            quantity: integer(self.quantity, COL_QUANTITY, row)?,
            tax: decimal(self.tax, COL_TAX, row)?,
            cogs: decimal(self.cogs, COL_COGS, row)?,
            gross_income: decimal(self.gross_income, COL_GROSS_INCOME, row)?,
            rating: decimal(self.rating, COL_RATING, row)?,
        })
    }
}

fn label(column: &StringChunked, row: usize) -> String {
    column.get(row).unwrap_or_default().trim().to_string()
}

fn raw_value(column: &StringChunked, row: usize) -> &str {
    column.get(row).unwrap_or_default().trim()
}

fn invalid_value(column: &str, row: usize, value: &str) -> DataLoadError {
    DataLoadError::InvalidValue {
        column: column.to_string(),
        row: row + 1,
        value: value.to_string(),
    }
}

fn decimal(column: &StringChunked, name: &str, row: usize) -> Result<f64, DataLoadError> {
    let raw = raw_value(column, row);
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| invalid_value(name, row, raw))
}

fn integer(column: &StringChunked, name: &str, row: usize) -> Result<i64, DataLoadError> {
    let raw = raw_value(column, row);
    raw.parse::<i64>()
        .ok()
        .or_else(|| {
            // Whole numbers written as floats, e.g. "7.0"
            raw.parse::<f64>()
                .ok()
                .filter(|value| {
                    value.is_finite()
                        && value.fract() == 0.0
                        && *value >= i64::MIN as f64
                        && *value < i64::MAX as f64
                })
                .map(|value| value as i64)
        })
        .ok_or_else(|| invalid_value(name, row, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formats() -> Vec<String> {
        DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2019, 1, 5);
        assert_eq!(parse_date("1/5/2019", &formats()), expected);
        assert_eq!(parse_date("01/05/2019", &formats()), expected);
        assert_eq!(parse_date("2019-01-05", &formats()), expected);
        assert_eq!(parse_date(" 2019/01/05 ", &formats()), expected);
        assert_eq!(parse_date("05.01.2019", &formats()), expected);
    }

    #[test]
    fn test_parse_date_keeps_calendar_part_of_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2019, 3, 8);
        assert_eq!(parse_date("2019-03-08 13:08:00", &formats()), expected);
        assert_eq!(parse_date("2019-03-08T10:29", &formats()), expected);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date("", &formats()), None);
        assert_eq!(parse_date("not a date", &formats()), None);
        assert_eq!(parse_date("13/45/2019", &formats()), None);
        assert_eq!(parse_date("2019-02-30", &formats()), None);
    }

    #[test]
    fn test_parse_date_respects_configured_formats() {
        let only_iso = vec!["%Y-%m-%d".to_string()];
        assert_eq!(parse_date("1/5/2019", &only_iso), None);
        assert!(parse_date("2019-01-05", &only_iso).is_some());
    }
}
