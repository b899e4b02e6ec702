//! One render pass: filter once, aggregate every chart, hand the results
//! to a renderer.

use crate::aggregate::{self, *};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::filter::FilterState;
use crate::pipeline::{self, EmptyResultWarning};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io;
use tracing::debug;

/// The fixed chart catalog, in display order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum ChartKind {
    SalesOverTime,
    RevenueByProductLine,
    PaymentMix,
    RatingDistribution,
    SpendByCustomerType,
    Correlation,
    GrossIncomeByBranch,
    GrossIncomeShare,
}

impl ChartKind {
    pub const ALL: [ChartKind; 8] = [
        ChartKind::SalesOverTime,
        ChartKind::RevenueByProductLine,
        ChartKind::PaymentMix,
        ChartKind::RatingDistribution,
        ChartKind::SpendByCustomerType,
        ChartKind::Correlation,
        ChartKind::GrossIncomeByBranch,
        ChartKind::GrossIncomeShare,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::SalesOverTime => "Total sales over time",
            ChartKind::RevenueByProductLine => "Revenue by product line",
            ChartKind::PaymentMix => "Payment method mix",
            ChartKind::RatingDistribution => "Customer rating distribution",
            ChartKind::SpendByCustomerType => "Spend by customer type",
            ChartKind::Correlation => "Correlation of numeric variables",
            ChartKind::GrossIncomeByBranch => "Gross income by branch and product line",
            ChartKind::GrossIncomeShare => "Gross income share by product line (all data)",
        }
    }

    /// Whether the chart follows the active filters
    pub fn is_filtered(&self) -> bool {
        !matches!(self, ChartKind::GrossIncomeShare)
    }
}

/// Borrowed view of one chart's result
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartData<'a> {
    SalesOverTime(&'a SalesOverTime),
    RevenueByProductLine(&'a ProductLineRevenue),
    PaymentMix(&'a PaymentMix),
    RatingDistribution(&'a RatingHistogram),
    SpendByCustomerType(&'a CustomerSpend),
    Correlation(&'a CorrelationMatrix),
    GrossIncomeByBranch(&'a BranchProductIncome),
    GrossIncomeShare(&'a GrossIncomeShare),
}

impl ChartData<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            ChartData::SalesOverTime(data) => data.is_empty(),
            ChartData::RevenueByProductLine(data) => data.is_empty(),
            ChartData::PaymentMix(data) => data.is_empty(),
            ChartData::RatingDistribution(data) => data.is_empty(),
            ChartData::SpendByCustomerType(data) => data.is_empty(),
            ChartData::Correlation(data) => data.is_empty(),
            ChartData::GrossIncomeByBranch(data) => data.is_empty(),
            ChartData::GrossIncomeShare(data) => data.is_empty(),
        }
    }
}

/// Every chart's result for one filter state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub filter: FilterState,
    pub subset_rows: usize,
    pub source_rows: usize,
    /// Subset total, for the headline figure
    pub subset_sales: f64,
    #[serde(skip)]
    pub warning: Option<EmptyResultWarning>,
    pub sales_over_time: SalesOverTime,
    pub revenue_by_product_line: ProductLineRevenue,
    pub payment_mix: PaymentMix,
    pub rating_distribution: RatingHistogram,
    pub spend_by_customer_type: CustomerSpend,
    pub correlation: CorrelationMatrix,
    pub gross_income_by_branch: BranchProductIncome,
    pub gross_income_share: GrossIncomeShare,
}

impl Dashboard {
    pub fn chart(&self, kind: ChartKind) -> ChartData<'_> {
        match kind {
            ChartKind::SalesOverTime => ChartData::SalesOverTime(&self.sales_over_time),
            ChartKind::RevenueByProductLine => {
                ChartData::RevenueByProductLine(&self.revenue_by_product_line)
            }
            ChartKind::PaymentMix => ChartData::PaymentMix(&self.payment_mix),
            ChartKind::RatingDistribution => {
                ChartData::RatingDistribution(&self.rating_distribution)
            }
            ChartKind::SpendByCustomerType => {
                ChartData::SpendByCustomerType(&self.spend_by_customer_type)
            }
            ChartKind::Correlation => ChartData::Correlation(&self.correlation),
            ChartKind::GrossIncomeByBranch => {
                ChartData::GrossIncomeByBranch(&self.gross_income_by_branch)
            }
            ChartKind::GrossIncomeShare => ChartData::GrossIncomeShare(&self.gross_income_share),
        }
    }
}

/// Filter `dataset` with `state` and compute every chart
pub fn render(dataset: &Dataset, state: &FilterState, options: &AggregationOptions) -> Dashboard {
    let subset = pipeline::apply(dataset, state);

    let dashboard = Dashboard {
        filter: state.clone(),
        subset_rows: subset.len(),
        source_rows: dataset.len(),
        subset_sales: subset.total_sales(),
        warning: subset.empty_warning(),
        sales_over_time: aggregate::sales_over_time(&subset),
        revenue_by_product_line: aggregate::revenue_by_product_line(&subset),
        payment_mix: aggregate::payment_mix(&subset),
        rating_distribution: aggregate::rating_histogram(&subset, options.histogram_bins),
        spend_by_customer_type: aggregate::spend_by_customer_type(&subset),
        correlation: aggregate::correlation_matrix(&subset),
        gross_income_by_branch: aggregate::gross_income_by_branch_and_line(&subset),
        gross_income_share: aggregate::gross_income_share(dataset),
    };

    debug!(
        "Rendered dashboard over {} of {} rows",
        dashboard.subset_rows, dashboard.source_rows
    );
    dashboard
}

/// Output side of the dashboard: draws one chart at a time
pub trait ChartRenderer {
    /// Draw the headline before any chart
    fn begin(&mut self, dashboard: &Dashboard) -> io::Result<()>;

    fn draw(&mut self, kind: ChartKind, data: ChartData<'_>) -> io::Result<()>;

    /// Stand-in for a chart with nothing to show
    fn draw_empty(&mut self, kind: ChartKind, warning: &EmptyResultWarning) -> io::Result<()>;
}

/// Send the selected charts of `dashboard` to `renderer`, in catalog order
pub fn present<R: ChartRenderer>(
    dashboard: &Dashboard,
    charts: &[ChartKind],
    renderer: &mut R,
) -> Result<()> {
    renderer.begin(dashboard)?;

    let fallback = EmptyResultWarning {
        source_rows: dashboard.source_rows,
    };
    for kind in ChartKind::ALL.into_iter().filter(|k| charts.contains(k)) {
        let data = dashboard.chart(kind);
        if data.is_empty() {
            renderer.draw_empty(kind, dashboard.warning.as_ref().unwrap_or(&fallback))?;
        } else {
            renderer.draw(kind, data)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::DateRange;
    use crate::test_support::{date, three_row_dataset};
    use std::collections::BTreeSet;

    #[derive(Default)]
    struct Recorder {
        drawn: Vec<ChartKind>,
        empty: Vec<ChartKind>,
        began: usize,
    }

    impl ChartRenderer for Recorder {
        fn begin(&mut self, _dashboard: &Dashboard) -> io::Result<()> {
            self.began += 1;
            Ok(())
        }

        fn draw(&mut self, kind: ChartKind, _data: ChartData<'_>) -> io::Result<()> {
            self.drawn.push(kind);
            Ok(())
        }

        fn draw_empty(&mut self, kind: ChartKind, _warning: &EmptyResultWarning) -> io::Result<()> {
            self.empty.push(kind);
            Ok(())
        }
    }

    #[test]
    fn test_render_computes_every_chart() {
        let dataset = three_row_dataset();
        let state = FilterState::default_for(&dataset);
        let dashboard = render(&dataset, &state, &AggregationOptions::default());

        assert_eq!(dashboard.subset_rows, 3);
        assert_eq!(dashboard.subset_sales, 35.0);
        assert_eq!(dashboard.warning, None);
        for kind in ChartKind::ALL {
            assert!(!dashboard.chart(kind).is_empty(), "{:?} is empty", kind);
        }
    }

    #[test]
    fn test_empty_subset_still_shows_global_share() {
        let dataset = three_row_dataset();
        let state = FilterState::new(
            BTreeSet::new(),
            dataset.product_lines(),
            Some(DateRange::new(date(2023, 1, 1), date(2023, 1, 3))),
        );
        let dashboard = render(&dataset, &state, &AggregationOptions::default());
        assert!(dashboard.warning.is_some());

        let mut recorder = Recorder::default();
        present(&dashboard, &ChartKind::ALL, &mut recorder).unwrap();

        assert_eq!(recorder.began, 1);
        assert_eq!(recorder.drawn, vec![ChartKind::GrossIncomeShare]);
        assert_eq!(recorder.empty.len(), 7);
    }

    #[test]
    fn test_present_honours_selection_in_catalog_order() {
        let dataset = three_row_dataset();
        let dashboard = render(
            &dataset,
            &FilterState::default_for(&dataset),
            &AggregationOptions::default(),
        );

        let mut recorder = Recorder::default();
        present(
            &dashboard,
            &[ChartKind::Correlation, ChartKind::SalesOverTime],
            &mut recorder,
        )
        .unwrap();
        assert_eq!(
            recorder.drawn,
            vec![ChartKind::SalesOverTime, ChartKind::Correlation]
        );
    }

    #[test]
    fn test_only_share_chart_ignores_filters() {
        let unfiltered: Vec<_> = ChartKind::ALL
            .into_iter()
            .filter(|k| !k.is_filtered())
            .collect();
        assert_eq!(unfiltered, vec![ChartKind::GrossIncomeShare]);
    }
}
