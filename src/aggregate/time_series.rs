//! Daily sales totals.

use crate::pipeline::ActiveSubset;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub total: f64,
}

/// Sum of `total` per day, ascending by date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesOverTime {
    pub points: Vec<DailySales>,
}

impl SalesOverTime {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.total).sum()
    }
}

pub fn sales_over_time(subset: &ActiveSubset<'_>) -> SalesOverTime {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in subset.iter() {
        // The pipeline only lets dated rows through
        if let Some(date) = record.date {
            *by_day.entry(date).or_insert(0.0) += record.total;
        }
    }

    SalesOverTime {
        points: by_day
            .into_iter()
            .map(|(date, total)| DailySales { date, total })
            .collect(),
    }
}
