//! Process-wide cache of the loaded campaign dataset.
//! Readers take a snapshot; a reload builds a complete new dataset before
//! swapping it in, so readers never see a partial load.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use budget_core::{Dataset, PlannerResult};
use budget_ingest::{DatasetLoader, LoadReport};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

struct Snapshot {
    dataset: Dataset,
    report: LoadReport,
    modified: Option<SystemTime>,
}

/// Holds the current dataset for one source file.
pub struct DatasetStore {
    path: PathBuf,
    loader: DatasetLoader,
    current: RwLock<Arc<Snapshot>>,
}

impl DatasetStore {
    /// Load `path` and cache the result. Load errors are returned as-is and
    /// are fatal for the session.
    pub fn open(path: impl Into<PathBuf>) -> PlannerResult<Self> {
        let path = path.into();
        let loader = DatasetLoader::new();
        let snapshot = load_snapshot(&loader, &path)?;
        info!(path = %path.display(), rows = snapshot.dataset.len(), "Dataset cached");
        Ok(Self {
            path,
            loader,
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current dataset. Cheap; shares rows with the cache.
    pub fn dataset(&self) -> Dataset {
        self.current.read().dataset.clone()
    }

    pub fn report(&self) -> LoadReport {
        self.current.read().report.clone()
    }

    /// Re-read the source and replace the cached dataset as a whole. On
    /// failure the previous dataset stays in place.
    pub fn reload(&self) -> PlannerResult<Dataset> {
        match load_snapshot(&self.loader, &self.path) {
            Ok(snapshot) => {
                let dataset = snapshot.dataset.clone();
                *self.current.write() = Arc::new(snapshot);
                metrics::counter!("dataset.reload", "outcome" => "ok").increment(1);
                info!(path = %self.path.display(), rows = dataset.len(), "Dataset reloaded");
                Ok(dataset)
            }
            Err(e) => {
                metrics::counter!("dataset.reload", "outcome" => "error").increment(1);
                warn!(path = %self.path.display(), error = %e, "Reload failed, keeping previous dataset");
                Err(e)
            }
        }
    }

    /// Reload only if the source's modification time moved since the last
    /// load. Returns whether a reload happened.
    pub fn reload_if_changed(&self) -> PlannerResult<bool> {
        let on_disk = modified_time(&self.path);
        let cached = self.current.read().modified;
        if on_disk.is_some() && on_disk == cached {
            debug!(path = %self.path.display(), "Source unchanged");
            return Ok(false);
        }
        self.reload()?;
        Ok(true)
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn load_snapshot(loader: &DatasetLoader, path: &Path) -> PlannerResult<Snapshot> {
    let modified = modified_time(path);
    let (dataset, report) = loader.load_path(path)?;
    Ok(Snapshot {
        dataset,
        report,
        modified,
    })
}
