//! Field classification
//!
//! The upstream API exposes CRM field names directly, and the role of a field
//! is encoded in the name itself:
//!
//! ```text
//! CAR_Outcome_Career_Pathway__c   outcome group
//! CAR_Youth_Resume__c             task (participant checkbox)
//! CAR_YDM_Resume__c               approval marker for the task above
//! CAR_BOOL_Resume__c              star marker for the task above
//! ```
//!
//! Tests run in order and the first match wins.

use serde::Serialize;

/// Role a field plays in the outcome tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldRole {
    /// Names an outcome group
    Group,
    /// A task occurrence ("Youth" field)
    Task,
    /// Youth development manager approval ("YDM" field)
    Approval,
    /// Verification star ("BOOL" field)
    Star,
    Ignored,
}

impl FieldRole {
    pub fn is_marker(&self) -> bool {
        matches!(self, FieldRole::Approval | FieldRole::Star)
    }
}

/// Classify a CRM field name by substring tests
pub fn classify(field_name: &str) -> FieldRole {
    if field_name.contains("Outcome") && !field_name.contains("Outcomes") {
        FieldRole::Group
    } else if field_name.contains("Youth") && !field_name.contains("BOOL") {
        FieldRole::Task
    } else if field_name.contains("YDM") {
        FieldRole::Approval
    } else if field_name.contains("BOOL") {
        FieldRole::Star
    } else {
        FieldRole::Ignored
    }
}
