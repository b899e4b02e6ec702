//! Command-line argument definitions for the sales dashboard
//!
//! Defines the CLI interface using the clap derive API. Values given here
//! are the top layer of [`DashboardConfig`](crate::config::DashboardConfig).

use crate::dashboard::ChartKind;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the sales dashboard
///
/// Loads a supermarket sales export, applies city, product-line and date
/// filters, and prints the dashboard's charts as tables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sales-dashboard",
    version,
    about = "Filter and aggregate retail sales data into dashboard charts",
    long_about = "Loads a supermarket sales CSV export once, applies city, product line and \
                  date range filters, and computes the dashboard's chart catalog: sales over \
                  time, revenue by product line, payment mix, rating distribution, spend by \
                  customer type, correlations and gross income breakdowns."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Filter the dataset and draw the selected charts
    Render(RenderArgs),
    /// List the dataset's cities, product lines, branches and date span
    Summary(SummaryArgs),
}

/// Flags shared by every subcommand
#[derive(Debug, Clone, Parser)]
pub struct CommonArgs {
    /// Sales CSV file
    ///
    /// Falls back to $SALES_DASHBOARD_DATA, then ./data.csv
    #[arg(
        short = 'd',
        long = "data",
        value_name = "FILE",
        help = "Path to the sales CSV file"
    )]
    pub data_path: Option<PathBuf>,

    /// Extra chrono date format accepted by the loader (repeatable)
    ///
    /// Tried before the built-in formats.
    #[arg(long = "date-format", value_name = "FORMAT")]
    pub date_formats: Vec<String>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the render command
#[derive(Debug, Clone, Parser)]
pub struct RenderArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Cities to include (repeatable or comma-separated); all when omitted
    #[arg(long = "city", value_name = "CITY", value_delimiter = ',')]
    pub cities: Vec<String>,

    /// Product lines to include (repeatable or comma-separated); all when omitted
    #[arg(long = "product-line", value_name = "LINE", value_delimiter = ',')]
    pub product_lines: Vec<String>,

    /// First day of the range (YYYY-MM-DD); the earliest sale when omitted
    #[arg(long = "from", value_name = "DATE", value_parser = parse_date_arg)]
    pub from: Option<NaiveDate>,

    /// Last day of the range (YYYY-MM-DD); the latest sale when omitted
    #[arg(long = "to", value_name = "DATE", value_parser = parse_date_arg)]
    pub to: Option<NaiveDate>,

    /// Charts to draw (repeatable or comma-separated); all when omitted
    #[arg(long = "chart", value_enum, value_name = "CHART", value_delimiter = ',')]
    pub charts: Vec<ChartKind>,

    /// Bucket count of the rating histogram
    #[arg(long = "bins", value_name = "COUNT")]
    pub bins: Option<usize>,
}

/// Arguments for the summary command
#[derive(Debug, Clone, Parser)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output format options for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Human,
    /// JSON for scripting
    Json,
}

impl Commands {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Render(args) => &args.common,
            Commands::Summary(args) => &args.common,
        }
    }
}

impl CommonArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Show spinners only for interactive, human-readable runs
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }
}

/// Parse a `YYYY-MM-DD` command-line date
pub fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected a date as YYYY-MM-DD, got '{}': {}", value, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    fn render_args(argv: &[&str]) -> RenderArgs {
        match parse(argv).command {
            Some(Commands::Render(args)) => args,
            other => panic!("expected render command, got {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        assert!(parse(&["sales-dashboard"]).command.is_none());
    }

    #[test]
    fn test_render_defaults() {
        let args = render_args(&["sales-dashboard", "render"]);
        assert!(args.cities.is_empty());
        assert!(args.product_lines.is_empty());
        assert!(args.charts.is_empty());
        assert_eq!(args.from, None);
        assert_eq!(args.bins, None);
        assert_eq!(args.common.data_path, None);
        assert_eq!(args.common.output_format, OutputFormat::Human);
        assert_eq!(args.common.get_log_level(), "warn");
        assert!(args.common.show_progress());
    }

    #[test]
    fn test_repeatable_and_delimited_selections() {
        let args = render_args(&[
            "sales-dashboard",
            "render",
            "--city",
            "Yangon",
            "--city",
            "Mandalay,Naypyitaw",
            "--product-line",
            "Food and beverages",
            "--chart",
            "payment-mix,correlation",
        ]);
        assert_eq!(args.cities, vec!["Yangon", "Mandalay", "Naypyitaw"]);
        assert_eq!(args.product_lines, vec!["Food and beverages"]);
        assert_eq!(
            args.charts,
            vec![ChartKind::PaymentMix, ChartKind::Correlation]
        );
    }

    #[test]
    fn test_date_range_and_bins() {
        let args = render_args(&[
            "sales-dashboard",
            "render",
            "--data",
            "/tmp/sales.csv",
            "--from",
            "2019-01-01",
            "--to",
            "2019-03-31",
            "--bins",
            "10",
        ]);
        assert_eq!(args.from, NaiveDate::from_ymd_opt(2019, 1, 1));
        assert_eq!(args.to, NaiveDate::from_ymd_opt(2019, 3, 31));
        assert_eq!(args.bins, Some(10));
        assert_eq!(args.common.data_path, Some(PathBuf::from("/tmp/sales.csv")));
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let result = Args::try_parse_from(["sales-dashboard", "render", "--from", "01/05/2019"]);
        assert!(result.is_err());
        assert!(parse_date_arg("2019-02-30").is_err());
        assert_eq!(
            parse_date_arg(" 2019-02-28 "),
            Ok(NaiveDate::from_ymd_opt(2019, 2, 28).unwrap())
        );
    }

    #[test]
    fn test_log_levels() {
        let args = render_args(&["sales-dashboard", "render", "-vv"]);
        assert_eq!(args.common.get_log_level(), "debug");

        let args = render_args(&["sales-dashboard", "render", "-vvvv"]);
        assert_eq!(args.common.get_log_level(), "trace");

        let args = render_args(&["sales-dashboard", "render", "-q"]);
        assert_eq!(args.common.get_log_level(), "error");
        assert!(!args.common.show_progress());

        assert!(Args::try_parse_from(["sales-dashboard", "render", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_summary_command() {
        let args = parse(&["sales-dashboard", "summary", "--output-format", "json"]);
        let Some(command) = args.command else {
            panic!("expected summary command");
        };
        assert!(matches!(command, Commands::Summary(_)));
        assert_eq!(command.common().output_format, OutputFormat::Json);
        assert!(!command.common().show_progress());
    }
}
