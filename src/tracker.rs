//! Snapshot holder for normalized goals
//!
//! Each successful refresh replaces the whole snapshot; nothing is patched in
//! place. A failed refresh leaves the previous snapshot untouched so callers
//! can keep showing stale data.

use std::sync::Arc;
use log::{error, info, warn};
use crate::api::{ApiError, GoalSource};
use crate::models::PodOutcomeMap;
use crate::normalize::aggregate_pods;

#[derive(Debug, Default)]
pub struct Tracker {
    snapshot: Option<Arc<PodOutcomeMap>>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and normalize a fresh snapshot
    ///
    /// On failure the error is logged and returned, and the previous snapshot
    /// (if any) stays available through [`Tracker::snapshot`].
    pub fn refresh(&mut self, source: &dyn GoalSource) -> Result<Arc<PodOutcomeMap>, ApiError> {
        info!("Fetching goals from {}", source.describe());
        match source.fetch_goals() {
            Ok(response) => {
                let map = Arc::new(aggregate_pods(&response));
                info!("Loaded {} pods from {}", map.len(), source.describe());
                self.snapshot = Some(Arc::clone(&map));
                Ok(map)
            }
            Err(e) => {
                error!("Failed to fetch goals from {}: {}", source.describe(), e);
                if self.snapshot.is_some() {
                    warn!("Keeping previous snapshot");
                }
                Err(e)
            }
        }
    }

    pub fn snapshot(&self) -> Option<Arc<PodOutcomeMap>> {
        self.snapshot.clone()
    }
}
