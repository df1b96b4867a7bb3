use serde::Serialize;
use crate::models::OutcomeGroup;

/// Checked vs total tasks for one outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeProgress {
    pub id: String,
    pub title: String,
    pub checked: usize,
    pub total: usize,
    pub completed: bool,
}

/// Progress summary for one pod
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodProgress {
    pub outcomes: Vec<OutcomeProgress>,
    pub checked: usize,
    pub total: usize,
    pub completed_outcomes: usize,
    pub total_outcomes: usize,
}

impl PodProgress {
    /// Share of tasks checked, 0.0 for a pod with no tasks
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.checked as f64 / self.total as f64
        }
    }
}

pub fn pod_progress(groups: &[OutcomeGroup]) -> PodProgress {
    let outcomes: Vec<OutcomeProgress> = groups
        .iter()
        .map(|g| OutcomeProgress {
            id: g.id.clone(),
            title: g.title.clone(),
            checked: g.checked_count(),
            total: g.content.len(),
            completed: g.completed,
        })
        .collect();

    PodProgress {
        checked: outcomes.iter().map(|o| o.checked).sum(),
        total: outcomes.iter().map(|o| o.total).sum(),
        completed_outcomes: outcomes.iter().filter(|o| o.completed).count(),
        total_outcomes: outcomes.len(),
        outcomes,
    }
}
