// Error handling utilities for consistent error messages and exit codes
// Internal errors (exit code 2) are reported by main from the returned error chain

use std::process;
use crate::models::Pod;
use crate::utils::fuzzy::suggest_pod;

/// Exit with a user error (exit code 1)
/// User errors are for invalid input, missing login, unknown tasks, etc.
pub fn user_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Validate that a string is not empty
pub fn validate_non_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate a bearer token: non-empty, no whitespace
pub fn validate_token(token: &str) -> Result<(), String> {
    validate_non_empty(token, "Token")?;
    if token.chars().any(char::is_whitespace) {
        Err("Invalid token: tokens cannot contain whitespace.".to_string())
    } else {
        Ok(())
    }
}

/// Resolve a pod argument, suggesting the closest pod on a typo
pub fn parse_pod(name: &str) -> Result<Pod, String> {
    if let Some(pod) = Pod::from_name(name) {
        return Ok(pod);
    }
    let valid = Pod::ALL.map(|p| p.as_str()).join(", ");
    match suggest_pod(name) {
        Some(pod) => Err(format!("Unknown pod '{}'. Did you mean '{}'?", name, pod)),
        None => Err(format!("Unknown pod '{}'. Valid pods: {}.", name, valid)),
    }
}

/// Validate a CRM task field name passed on the command line
pub fn validate_task_key(api_key: &str) -> Result<(), String> {
    validate_non_empty(api_key, "Task key")?;
    if api_key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(format!(
            "Invalid task key: '{}'. Task keys are CRM field names (letters, numbers, underscores).",
            api_key
        ))
    }
}
