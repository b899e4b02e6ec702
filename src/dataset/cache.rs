//! Load-once memoization of the sales dataset.

use super::{Dataset, load_dataset};
use crate::error::DataLoadError;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// Memoized dataset handle for one sales file
///
/// The file is assumed unchanged for the lifetime of the process, so there
/// is no automatic invalidation. Call [`reload`](Self::reload) to pick up
/// a new version of the file.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    date_formats: Vec<String>,
    slot: RwLock<Option<Arc<Dataset>>>,
    loads: AtomicUsize,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>, date_formats: Vec<String>) -> Self {
        Self {
            path: path.into(),
            date_formats,
            slot: RwLock::new(None),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached dataset, loading it on first use
    ///
    /// A failed load is not cached; the next call tries again.
    pub fn get(&self) -> Result<Arc<Dataset>, DataLoadError> {
        if let Some(dataset) = self
            .slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(Arc::clone(dataset));
        }

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(dataset) = slot.as_ref() {
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(self.load()?);
        *slot = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Discard the cached dataset and read the file again
    ///
    /// The previous dataset stays cached if the new read fails.
    pub fn reload(&self) -> Result<Arc<Dataset>, DataLoadError> {
        info!("Reloading sales dataset from {}", self.path.display());
        let dataset = Arc::new(self.load()?);
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    pub fn is_loaded(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Number of successful reads of the file so far
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    fn load(&self) -> Result<Dataset, DataLoadError> {
        let dataset = load_dataset(&self.path, &self.date_formats)?;
        let count = self.loads.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("Dataset read #{} from {}", count, self.path.display());
        Ok(dataset)
    }
}
