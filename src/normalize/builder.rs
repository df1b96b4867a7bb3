//! Outcome tree builder
//!
//! Turns one pod's flat field list into ordered outcome groups.
//!
//! # Passes
//!
//! 1. Group fields create an [`OutcomeGroup`] each, keyed by group code.
//! 2. Task fields append a [`TaskEntry`] to the first group with their code.
//! 3. Approval and star markers overwrite `ydm_approved` / `star_is_filled`
//!    on the task with the same identifier in the same group.
//!
//! Markers run in their own pass so a marker listed before its task still
//! lands. Fields that do not resolve (no group, no identifier, no task) are
//! dropped without error.

use log::debug;
use crate::models::{OutcomeGroup, RawFieldRecord, TaskEntry};
use crate::normalize::classifier::{classify, FieldRole};
use crate::normalize::identifier::{group_code, task_identifier};

/// Build the outcome groups for a single pod
pub fn build_outcome_tree(fields: &[(String, RawFieldRecord)]) -> Vec<OutcomeGroup> {
    let mut groups: Vec<OutcomeGroup> = Vec::new();

    for (api_name, record) in fields {
        if classify(api_name) == FieldRole::Group {
            groups.push(OutcomeGroup::new(
                group_code(api_name),
                record.name.clone(),
                record.is_true(),
            ));
        }
    }

    for (api_name, record) in fields {
        if classify(api_name) != FieldRole::Task {
            continue;
        }
        let Some(index) = group_index(&groups, api_name) else {
            debug!("Skipping task field {}: no outcome group", api_name);
            continue;
        };
        let Some(task_id) = task_identifier(api_name) else {
            debug!("Skipping task field {}: no identifier segment", api_name);
            continue;
        };
        groups[index].content.push(TaskEntry::new(
            api_name.clone(),
            task_id,
            record.name.clone(),
            record.is_true(),
        ));
    }

    for (api_name, record) in fields {
        let role = classify(api_name);
        if !role.is_marker() {
            continue;
        }
        let Some(index) = group_index(&groups, api_name) else {
            continue;
        };
        let Some(task_id) = task_identifier(api_name) else {
            continue;
        };
        match groups[index].find_task_mut(&task_id) {
            Some(task) => apply_marker(task, role, record.is_true()),
            None => debug!(
                "Dropping {:?} marker {}: no task '{}' in outcome {}",
                role, api_name, task_id, groups[index].id
            ),
        }
    }

    groups
}

/// Index of the first group whose code matches the field's prefix
fn group_index(groups: &[OutcomeGroup], api_name: &str) -> Option<usize> {
    let code = group_code(api_name);
    groups.iter().position(|g| g.id == code)
}

fn apply_marker(task: &mut TaskEntry, role: FieldRole, value: bool) {
    match role {
        FieldRole::Approval => task.ydm_approved = value,
        FieldRole::Star => task.star_is_filled = value,
        FieldRole::Group | FieldRole::Task | FieldRole::Ignored => {}
    }
}
