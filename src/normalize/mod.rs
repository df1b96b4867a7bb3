//! Outcome response normalizer
//!
//! Reshapes the flat, CRM-keyed API response into a [`PodOutcomeMap`]. Runs
//! synchronously, performs no I/O and never fails: fields that cannot be
//! placed are dropped.
//!
//! [`PodOutcomeMap`]: crate::models::PodOutcomeMap

pub mod classifier;
pub mod identifier;
pub mod builder;
pub mod aggregate;

pub use classifier::{classify, FieldRole};
pub use identifier::{group_code, task_identifier};
pub use builder::build_outcome_tree;
pub use aggregate::aggregate_pods;
