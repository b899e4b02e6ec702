//! Text renderer for the terminal.
//!
//! Draws each chart as a small table with proportional bars. Shares and
//! percentages are derived here from the stored counts and totals.

use crate::aggregate::{
    BranchProductIncome, CategoryTotal, CorrelationMatrix, CustomerSpend, GrossIncomeShare,
    PaymentMix, ProductLineRevenue, RatingHistogram, SalesOverTime,
};
use crate::dashboard::{ChartData, ChartKind, ChartRenderer, Dashboard};
use crate::pipeline::EmptyResultWarning;
use colored::*;
use std::io::{self, Write};

const DEFAULT_BAR_WIDTH: usize = 40;
const BAR: char = '█';

pub struct TerminalRenderer<W: Write> {
    out: W,
    bar_width: usize,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }

    /// Zero disables bars entirely
    pub fn with_bar_width(mut self, bar_width: usize) -> Self {
        self.bar_width = bar_width;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn heading(&mut self, kind: ChartKind) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", kind.title().bright_green().bold())
    }

    /// Bar scaled against `max`; negative and zero values draw nothing
    fn bar(&self, value: f64, max: f64) -> String {
        if self.bar_width == 0 || max <= 0.0 || value <= 0.0 {
            return String::new();
        }
        let cells = ((value / max) * self.bar_width as f64).round() as usize;
        BAR.to_string().repeat(cells.clamp(1, self.bar_width))
    }

    fn totals(&mut self, rows: &[CategoryTotal]) -> io::Result<()> {
        let max = rows.iter().map(|r| r.value).fold(0.0, f64::max);
        let width = rows.iter().map(|r| r.key.len()).max().unwrap_or(0);
        for row in rows {
            let bar = self.bar(row.value, max);
            writeln!(
                self.out,
                "  {:<width$}  {:>12.2}  {}",
                row.key,
                row.value,
                bar.bright_cyan(),
                width = width
            )?;
        }
        Ok(())
    }

    fn sales_over_time(&mut self, data: &SalesOverTime) -> io::Result<()> {
        let max = data.points.iter().map(|p| p.total).fold(0.0, f64::max);
        for point in &data.points {
            let bar = self.bar(point.total, max);
            writeln!(
                self.out,
                "  {}  {:>12.2}  {}",
                point.date,
                point.total,
                bar.bright_cyan()
            )?;
        }
        writeln!(self.out, "  {} {:.2}", "Total:".bright_cyan(), data.total())
    }

    fn revenue(&mut self, data: &ProductLineRevenue) -> io::Result<()> {
        self.totals(&data.lines)
    }

    fn payment_mix(&mut self, data: &PaymentMix) -> io::Result<()> {
        let width = data.methods.iter().map(|m| m.key.len()).max().unwrap_or(0);
        for (method, (_, share)) in data.methods.iter().zip(data.proportions()) {
            let bar = self.bar(share, 1.0);
            writeln!(
                self.out,
                "  {:<width$}  {:>6}  {:>5.1}%  {}",
                method.key,
                method.count,
                share * 100.0,
                bar.bright_cyan(),
                width = width
            )?;
        }
        Ok(())
    }

    fn rating_distribution(&mut self, data: &RatingHistogram) -> io::Result<()> {
        let max = data.bins.iter().map(|b| b.count).max().unwrap_or(0) as f64;
        for bin in &data.bins {
            let bar = self.bar(bin.count as f64, max);
            writeln!(
                self.out,
                "  {:>5.2} - {:<5.2}  {:>6}  {}",
                bin.lower,
                bin.upper,
                bin.count,
                bar.bright_cyan()
            )?;
        }
        Ok(())
    }

    fn spend(&mut self, data: &CustomerSpend) -> io::Result<()> {
        writeln!(
            self.out,
            "  {:<10} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>9}",
            "type", "n", "min", "q1", "median", "q3", "max", "outliers"
        )?;
        for group in &data.groups {
            writeln!(
                self.out,
                "  {:<10} {:>6} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>9}",
                group.customer_type.as_str(),
                group.count,
                group.min,
                group.q1,
                group.median,
                group.q3,
                group.max,
                group.outliers.len()
            )?;
        }
        Ok(())
    }

    fn correlation(&mut self, data: &CorrelationMatrix) -> io::Result<()> {
        let width = data.columns.iter().map(|c| c.label().len()).max().unwrap_or(0);
        write!(self.out, "  {:<width$}", "", width = width)?;
        for column in &data.columns {
            write!(self.out, " {:>12}", column.label())?;
        }
        writeln!(self.out)?;

        for row in &data.columns {
            write!(self.out, "  {:<width$}", row.label(), width = width)?;
            for value in data.row(*row).unwrap_or_default() {
                write!(self.out, " {:>12}", value.to_string())?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn branch_grid(&mut self, data: &BranchProductIncome) -> io::Result<()> {
        let width = data.branches.iter().map(|b| b.len()).max().unwrap_or(0).max(6);
        write!(self.out, "  {:<width$}", "branch", width = width)?;
        for line in &data.product_lines {
            write!(self.out, " {:>24}", line)?;
        }
        writeln!(self.out)?;

        for branch in &data.branches {
            write!(self.out, "  {:<width$}", branch, width = width)?;
            for line in &data.product_lines {
                let value = data.get(branch, line).unwrap_or(0.0);
                write!(self.out, " {:>24.2}", value)?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn share(&mut self, data: &GrossIncomeShare) -> io::Result<()> {
        let width = data.slices.iter().map(|s| s.key.len()).max().unwrap_or(0);
        for (slice, (_, share)) in data.slices.iter().zip(data.proportions()) {
            let bar = self.bar(share, 1.0);
            writeln!(
                self.out,
                "  {:<width$}  {:>12.2}  {:>5.1}%  {}",
                slice.key,
                slice.value,
                share * 100.0,
                bar.bright_cyan(),
                width = width
            )?;
        }
        Ok(())
    }
}

impl<W: Write> ChartRenderer for TerminalRenderer<W> {
    fn begin(&mut self, dashboard: &Dashboard) -> io::Result<()> {
        let filter = &dashboard.filter;
        writeln!(self.out, "{}", "Sales Dashboard".bright_green().bold())?;
        writeln!(
            self.out,
            "{} {} of {} rows, total sales {:.2}",
            "Selected:".bright_cyan(),
            dashboard.subset_rows.to_string().bright_white().bold(),
            dashboard.source_rows,
            dashboard.subset_sales
        )?;
        writeln!(
            self.out,
            "{} {}",
            "Cities:".bright_cyan(),
            join(filter.selected_cities())
        )?;
        writeln!(
            self.out,
            "{} {}",
            "Product lines:".bright_cyan(),
            join(filter.selected_product_lines())
        )?;
        let range = filter
            .date_range()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "no valid dates".to_string());
        writeln!(self.out, "{} {}", "Dates:".bright_cyan(), range)
    }

    fn draw(&mut self, kind: ChartKind, data: ChartData<'_>) -> io::Result<()> {
        self.heading(kind)?;
        match data {
            ChartData::SalesOverTime(data) => self.sales_over_time(data),
            ChartData::RevenueByProductLine(data) => self.revenue(data),
            ChartData::PaymentMix(data) => self.payment_mix(data),
            ChartData::RatingDistribution(data) => self.rating_distribution(data),
            ChartData::SpendByCustomerType(data) => self.spend(data),
            ChartData::Correlation(data) => self.correlation(data),
            ChartData::GrossIncomeByBranch(data) => self.branch_grid(data),
            ChartData::GrossIncomeShare(data) => self.share(data),
        }
    }

    fn draw_empty(&mut self, kind: ChartKind, warning: &EmptyResultWarning) -> io::Result<()> {
        self.heading(kind)?;
        writeln!(self.out, "  {}", warning.to_string().bright_yellow())
    }
}

fn join<'a>(values: impl IntoIterator<Item = &'a String>) -> String {
    let joined: Vec<&str> = values.into_iter().map(String::as_str).collect();
    if joined.is_empty() {
        "(none)".to_string()
    } else {
        joined.join(", ")
    }
}
