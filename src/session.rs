//! Interactive dashboard session.
//!
//! Owns the dataset cache and the most recent [`Dashboard`]. Each
//! interaction validates the widget selection, filters once and recomputes
//! every chart; nothing is computed until the first interaction.

use crate::aggregate::AggregationOptions;
use crate::config::DashboardConfig;
use crate::dashboard::{self, Dashboard};
use crate::dataset::{Dataset, DatasetCache};
use crate::error::Result;
use crate::filter::{EmptySelectionPolicy, FilterSelection, FilterState};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug)]
pub struct DashboardSession {
    cache: DatasetCache,
    options: AggregationOptions,
    policy: EmptySelectionPolicy,
    last: Option<Dashboard>,
}

impl DashboardSession {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            cache: DatasetCache::new(config.data_path.clone(), config.date_formats.clone()),
            options: config.aggregation_options(),
            policy: config.empty_selection,
            last: None,
        }
    }

    /// The cached dataset, read from disk on first use
    pub fn dataset(&self) -> Result<Arc<Dataset>> {
        Ok(self.cache.get()?)
    }

    /// Filter state the widgets start from: everything selected
    pub fn initial_state(&self) -> Result<FilterState> {
        let dataset = self.dataset()?;
        Ok(FilterState::default_for(&dataset))
    }

    /// Apply a new widget selection and recompute every chart
    ///
    /// A rejected selection leaves the previous dashboard in place.
    pub fn interact(&mut self, selection: &FilterSelection) -> Result<&Dashboard> {
        let dataset = self.dataset()?;
        let state = FilterState::from_selection(&dataset, selection, self.policy).map_err(|e| {
            warn!("Selection rejected: {}", e);
            e
        })?;

        let rendered = dashboard::render(&dataset, &state, &self.options);
        Ok(self.last.insert(rendered))
    }

    /// The last computed dashboard; `None` before the first interaction
    pub fn last(&self) -> Option<&Dashboard> {
        self.last.as_ref()
    }

    /// Read the sales file again
    ///
    /// The previous dashboard described the old data and is dropped.
    pub fn reload(&mut self) -> Result<Arc<Dataset>> {
        let dataset = self.cache.reload()?;
        info!("Dataset reloaded: {} rows", dataset.len());
        self.last = None;
        Ok(dataset)
    }
}
