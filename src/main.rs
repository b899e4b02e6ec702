use clap::Parser;
use sales_dashboard::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    match commands::run(command) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Sales Dashboard - Retail Sales Filtering and Aggregation");
    println!("========================================================");
    println!();
    println!("Load a supermarket sales CSV export, filter it by city, product line");
    println!("and date range, and print the dashboard's charts as tables.");
    println!();
    println!("USAGE:");
    println!("    sales-dashboard <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    render      Filter the dataset and draw the selected charts");
    println!("    summary     List cities, product lines, branches and the date span");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Draw every chart over the whole dataset:");
    println!("    sales-dashboard render --data supermarket_sales.csv");
    println!();
    println!("    # Two cities, one product line, first quarter only:");
    println!("    sales-dashboard render --city Yangon,Mandalay \\");
    println!("                           --product-line \"Food and beverages\" \\");
    println!("                           --from 2019-01-01 --to 2019-03-31");
    println!();
    println!("    # A subset of charts as JSON:");
    println!("    sales-dashboard render --chart payment-mix,correlation --output-format json");
    println!();
    println!("    # Inspect the dataset's facets:");
    println!("    sales-dashboard summary");
    println!();
    println!("The data file defaults to $SALES_DASHBOARD_DATA, then ./data.csv.");
    println!("For detailed help on any command, use:");
    println!("    sales-dashboard <COMMAND> --help");
}
