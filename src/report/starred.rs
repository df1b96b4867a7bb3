use serde::Serialize;
use crate::models::{display_name, Pod, PodOutcomeMap, TaskEntry};
use crate::report::access::{pod_access, AccessStatus};

/// A starred task still waiting on approval, with where it lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StarredTask {
    pub pod: String,
    pub outcome: String,
    /// The task's pod is unlocked for the participant
    pub accessible: bool,
    #[serde(flatten)]
    pub task: TaskEntry,
}

/// Collect starred tasks that have not been approved yet, in snapshot order
pub fn starred_tasks(map: &PodOutcomeMap) -> Vec<StarredTask> {
    let access = pod_access(map);
    let mut starred = Vec::new();
    for (pod_name, groups) in map.iter() {
        // Pods outside the known tiers are never accessible
        let accessible = Pod::from_name(pod_name)
            .and_then(|pod| access.iter().find(|a| a.pod == pod))
            .map_or(false, |a| a.status == AccessStatus::Allowed);
        for group in groups {
            for task in group.content.iter().filter(|t| t.is_awaiting_approval()) {
                starred.push(StarredTask {
                    pod: display_name(pod_name).to_string(),
                    outcome: group.title.clone(),
                    accessible,
                    task: task.clone(),
                });
            }
        }
    }
    starred
}
