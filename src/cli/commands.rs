//! Command implementations for the sales dashboard CLI
//!
//! Sets up logging, resolves the layered configuration, loads the dataset
//! behind a spinner and hands the result to the renderer.

use crate::cli::args::{Commands, CommonArgs, OutputFormat, RenderArgs, SummaryArgs};
use crate::cli::render::TerminalRenderer;
use crate::config::DashboardConfig;
use crate::dashboard::{self, ChartKind};
use crate::dataset::{Dataset, DatasetSummary};
use crate::filter::FilterSelection;
use crate::session::DashboardSession;
use anyhow::{Context, Result};
use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Main command runner
pub fn run(command: Commands) -> Result<()> {
    setup_logging(command.common())?;
    debug!("Command line arguments: {:?}", command);

    let config = load_configuration(&command)?;
    debug!("Loaded configuration: {:?}", config);

    match &command {
        Commands::Render(args) => run_render(&config, args),
        Commands::Summary(args) => run_summary(&config, args),
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sales_dashboard={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (defaults -> env -> args)
fn load_configuration(command: &Commands) -> Result<DashboardConfig> {
    let mut config = DashboardConfig::from_env();
    apply_cli_overrides(&mut config, command);
    config.validate()?;
    Ok(config)
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut DashboardConfig, command: &Commands) {
    let common = command.common();
    if let Some(path) = &common.data_path {
        config.data_path = path.clone();
    }
    if !common.date_formats.is_empty() {
        let mut formats = common.date_formats.clone();
        formats.append(&mut config.date_formats);
        config.date_formats = formats;
    }

    if let Commands::Render(args) = command {
        if let Some(bins) = args.bins {
            config.histogram_bins = bins;
        }
        if !args.charts.is_empty() {
            config.charts = args.charts.clone();
        }
    }
}

/// Widget selection expressed by the render flags
fn selection_from_args(args: &RenderArgs) -> FilterSelection {
    let mut selection = FilterSelection::default().with_dates(args.from, args.to);
    if !args.cities.is_empty() {
        selection = selection.with_cities(args.cities.iter().cloned());
    }
    if !args.product_lines.is_empty() {
        selection = selection.with_product_lines(args.product_lines.iter().cloned());
    }
    selection
}

fn spinner(common: &CommonArgs, message: &str) -> Option<ProgressBar> {
    if !common.show_progress() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Load the dataset through the session, with a spinner while reading
fn load_with_progress(session: &DashboardSession, common: &CommonArgs) -> Result<Arc<Dataset>> {
    let start_time = Instant::now();
    let progress = spinner(common, "Loading sales data...");

    let loaded = session.dataset();
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }
    let dataset = loaded?;

    info!(
        "Loaded {} rows in {}",
        dataset.len(),
        HumanDuration(start_time.elapsed())
    );
    Ok(dataset)
}

fn run_render(config: &DashboardConfig, args: &RenderArgs) -> Result<()> {
    let mut session = DashboardSession::new(config);
    load_with_progress(&session, &args.common)?;

    let selection = selection_from_args(args);
    let rendered = session.interact(&selection)?;

    match args.common.output_format {
        OutputFormat::Human => {
            let stdout = io::stdout();
            let mut renderer = TerminalRenderer::new(stdout.lock());
            dashboard::present(rendered, &config.charts, &mut renderer)
                .context("Failed to write dashboard")?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(rendered)
                .context("Failed to serialize dashboard")?;
            println!("{}", json);
        }
    }

    if let Some(warning) = &rendered.warning {
        info!("{}", warning);
    }
    Ok(())
}

fn run_summary(config: &DashboardConfig, args: &SummaryArgs) -> Result<()> {
    let session = DashboardSession::new(config);
    let dataset = load_with_progress(&session, &args.common)?;
    let summary = dataset.summary();

    match args.common.output_format {
        OutputFormat::Human => {
            let stdout = io::stdout();
            write_summary(&mut stdout.lock(), &summary).context("Failed to write summary")?
        }
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Human-readable facets report
fn write_summary<W: Write>(out: &mut W, summary: &DatasetSummary) -> io::Result<()> {
    writeln!(out, "{}", "Sales Dataset Summary".bright_green().bold())?;
    writeln!(
        out,
        "  {} {}",
        "Rows:".bright_cyan(),
        summary.rows.to_string().bright_white().bold()
    )?;
    if summary.invalid_date_rows > 0 {
        writeln!(
            out,
            "  {} {}",
            "Rows with invalid dates:".bright_yellow(),
            summary.invalid_date_rows
        )?;
    }
    let span = match summary.date_bounds {
        Some((first, last)) => format!("{} to {}", first, last),
        None => "no valid dates".to_string(),
    };
    writeln!(out, "  {} {}", "Dates:".bright_cyan(), span)?;

    let facets = [
        ("Cities:", &summary.cities),
        ("Product lines:", &summary.product_lines),
        ("Branches:", &summary.branches),
        ("Payment methods:", &summary.payment_methods),
    ];
    for (label, values) in facets {
        writeln!(out, "  {} {}", label.bright_cyan(), values.len())?;
        for value in values {
            writeln!(out, "    • {}", value)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", "Charts:".bright_cyan())?;
    for kind in ChartKind::ALL {
        writeln!(out, "    • {}", kind.title())?;
    }
    Ok(())
}
