//! Application constants for the sales dashboard
//!
//! Column names of the input file, loader defaults, and the fixed
//! parameters of the chart catalog.

// =============================================================================
// Input File Columns
// =============================================================================

pub const COL_DATE: &str = "Date";
pub const COL_CITY: &str = "City";
pub const COL_PRODUCT_LINE: &str = "Product line";
pub const COL_PAYMENT: &str = "Payment";
pub const COL_CUSTOMER_TYPE: &str = "Customer type";
pub const COL_TOTAL: &str = "Total";
pub const COL_UNIT_PRICE: &str = "Unit price";
pub const COL_QUANTITY: &str = "Quantity";
pub const COL_TAX: &str = "Tax 5%";
pub const COL_COGS: &str = "cogs";
pub const COL_GROSS_INCOME: &str = "gross income";
pub const COL_RATING: &str = "Rating";
pub const COL_BRANCH: &str = "Branch";

/// Columns the loader refuses to run without, in file-documentation order
pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_DATE,
    COL_CITY,
    COL_PRODUCT_LINE,
    COL_PAYMENT,
    COL_CUSTOMER_TYPE,
    COL_TOTAL,
    COL_UNIT_PRICE,
    COL_QUANTITY,
    COL_TAX,
    COL_COGS,
    COL_GROSS_INCOME,
    COL_RATING,
    COL_BRANCH,
];

// =============================================================================
// Loader Defaults
// =============================================================================

/// Date layouts tried in order; the first that parses wins
pub const DEFAULT_DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];

/// Default location of the sales file, relative to the working directory
pub const DEFAULT_DATA_PATH: &str = "data.csv";

/// Environment variable overriding the data path
pub const DATA_PATH_ENV: &str = "SALES_DASHBOARD_DATA";

/// Customer satisfaction ratings are recorded on this scale
pub const RATING_SCALE: (f64, f64) = (0.0, 10.0);

// =============================================================================
// Chart Parameters
// =============================================================================

/// Rating histogram bin count
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// Upper bound accepted for a configured histogram bin count
pub const MAX_HISTOGRAM_BINS: usize = 200;

/// Box-plot whiskers reach this many interquartile ranges past the quartiles
pub const WHISKER_IQR_FACTOR: f64 = 1.5;
