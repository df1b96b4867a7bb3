use serde::{Deserialize, Serialize};

/// Suffix of the CRM object backing each pod (e.g. `Trainee_POD_Map__c`)
pub const POD_MAP_SUFFIX: &str = "_POD_Map__c";

/// Program tier a participant cohort belongs to
///
/// Tiers unlock in order: a participant moves from Trainee to Associate to
/// Partner as the outcomes of the earlier tier are completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pod {
    Trainee,
    Associate,
    Partner,
}

impl Pod {
    /// All pods in unlock order
    pub const ALL: [Pod; 3] = [Pod::Trainee, Pod::Associate, Pod::Partner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pod::Trainee => "Trainee",
            Pod::Associate => "Associate",
            Pod::Partner => "Partner",
        }
    }

    /// Resolve a display name or CRM map name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        let display = display_name(name.trim());
        Pod::ALL
            .into_iter()
            .find(|pod| pod.as_str().eq_ignore_ascii_case(display))
    }
}

impl std::fmt::Display for Pod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strip the CRM map suffix from a pod key, if present
pub fn display_name(pod_key: &str) -> &str {
    pod_key.strip_suffix(POD_MAP_SUFFIX).unwrap_or(pod_key)
}
