//! Pod unlock status
//!
//! Pods unlock in tier order. A pod is open to the participant only once
//! every pod before it has all of its outcomes completed.

use serde::Serialize;
use crate::models::{OutcomeGroup, Pod, PodOutcomeMap};

/// Whether a participant may work on a pod
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessStatus {
    Allowed,
    Locked,
    /// The participant has no record for this pod
    Missing,
}

impl AccessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessStatus::Allowed => "allowed",
            AccessStatus::Locked => "locked",
            AccessStatus::Missing => "missing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodAccess {
    pub pod: Pod,
    pub status: AccessStatus,
    pub completed: bool,
    /// First unfinished pod after a finished one
    pub current: bool,
}

/// All outcomes achieved; a pod without outcomes counts as complete
pub fn is_pod_completed(groups: &[OutcomeGroup]) -> bool {
    groups.iter().all(|g| g.completed)
}

/// Compute unlock status for every pod, in tier order
pub fn pod_access(map: &PodOutcomeMap) -> Vec<PodAccess> {
    let mut result: Vec<PodAccess> = Vec::with_capacity(Pod::ALL.len());

    for pod in Pod::ALL {
        let entry = match map.get_pod(pod) {
            None => PodAccess {
                pod,
                status: AccessStatus::Missing,
                completed: false,
                current: false,
            },
            Some((_, groups)) => {
                let unlocked = result.iter().all(|earlier| earlier.completed);
                PodAccess {
                    pod,
                    status: if unlocked {
                        AccessStatus::Allowed
                    } else {
                        AccessStatus::Locked
                    },
                    completed: is_pod_completed(groups),
                    current: false,
                }
            }
        };
        result.push(entry);
    }

    let mut prev_completed = false;
    for entry in result.iter_mut() {
        if entry.completed {
            prev_completed = true;
        } else if prev_completed {
            entry.current = true;
            break;
        }
    }

    result
}
