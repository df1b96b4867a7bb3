//! Podtrack - a command-line client for tracking youth-development pods
//!
//! This library provides the core functionality for podtrack, including:
//! - Decoding the flat, CRM-keyed goals response from the tracker API
//! - Normalizing it into a pod -> outcome -> task tree
//! - Reports over a snapshot: starred tasks, progress, pod unlock status
//! - A local session store for the API access token
//! - CLI command parsing and execution
//!
//! # Example
//!
//! ```
//! use podtrack::api::decode_response;
//! use podtrack::normalize::aggregate_pods;
//!
//! let body = r#"{"Trainee": {
//!     "CAR_Outcome_Career__c": {"name": "Career", "value": null},
//!     "CAR_Youth_Resume__c": {"name": "Draft a resume", "value": true}
//! }}"#;
//! let pods = aggregate_pods(&decode_response(body).unwrap());
//! assert_eq!(pods.get("Trainee").unwrap()[0].content[0].id, "resume");
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod models;
pub mod normalize;
pub mod report;
pub mod repo;
pub mod tracker;
pub mod utils;
