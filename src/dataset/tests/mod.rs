//! Tests for dataset loading and caching
//!
//! Fixtures are written to temporary files in the layout of the chain's
//! sales export.


pub use crate::test_support::{SALES_HEADER as HEADER, write_sales_file};

use std::path::PathBuf;
use tempfile::TempDir;

/// Three well-formed rows plus one with an unparsable date
pub const ROWS: &[&str] = &[
    "750-67-8428,A,Yangon,Member,Female,Health and beauty,74.69,7,26.1415,548.9715,1/5/2019,13:08,Ewallet,522.83,4.761904762,26.1415,9.1",
    "226-31-3081,C,Naypyitaw,Normal,Female,Electronic accessories,15.28,5,3.82,80.22,3/8/2019,10:29,Cash,76.4,4.761904762,3.82,9.6",
    "631-41-3108,A,Yangon,Normal,Male,Home and lifestyle,46.33,7,16.2155,340.5255,3/3/2019,13:23,Credit card,324.31,4.761904762,16.2155,7.4",
    "123-19-1176,A,Yangon,Member,Male,Health and beauty,58.22,8,23.288,489.048,someday,20:33,Ewallet,465.76,4.761904762,23.288,8.4",
];

pub fn standard_sales_file() -> (TempDir, PathBuf) {
    write_sales_file(HEADER, ROWS)
}

pub fn default_formats() -> Vec<String> {
    crate::constants::DEFAULT_DATE_FORMATS
        .iter()
        .map(|f| f.to_string())
        .collect()
}
