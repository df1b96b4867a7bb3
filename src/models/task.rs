use serde::{Deserialize, Serialize};

/// A single trackable task within an outcome
///
/// Serialized with the field names the rendering layer already expects
/// (`ydmApproved`, `starIsFilled`).
///
/// State model:
/// - `checked`: ticked off by the participant or staff in this client
/// - `ydm_approved`: approved CRM-side by a youth development manager
/// - `star_is_filled`: verified CRM-side; the checkbox is locked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    pub api_key: String,
    pub id: String,
    pub key: String,
    #[serde(rename = "ydmApproved")]
    pub ydm_approved: bool,
    pub checked: bool,
    #[serde(rename = "starIsFilled")]
    pub star_is_filled: bool,
}

impl TaskEntry {
    /// Create a task from its Youth field; markers are applied later
    pub fn new(api_key: String, id: String, key: String, checked: bool) -> Self {
        Self {
            api_key,
            id,
            key,
            ydm_approved: true,
            checked,
            star_is_filled: false,
        }
    }

    /// Verified tasks can no longer be toggled from the client
    pub fn is_locked(&self) -> bool {
        self.star_is_filled
    }

    /// Starred but still waiting on approval
    pub fn is_awaiting_approval(&self) -> bool {
        self.star_is_filled && !self.ydm_approved
    }
}
