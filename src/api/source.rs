use std::path::PathBuf;
use crate::api::{decode_response, ApiError};
use crate::models::RawResponse;

/// Supplies the raw main goals response for a pod set
///
/// The normalizer only needs this one capability; where the JSON comes from
/// (the live API, a saved file) is up to the implementation.
pub trait GoalSource {
    fn fetch_goals(&self) -> Result<RawResponse, ApiError>;

    /// Human-readable origin, used in log lines
    fn describe(&self) -> String;
}

/// Reads a saved `getMainGoals` response from disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GoalSource for FileSource {
    fn fetch_goals(&self) -> Result<RawResponse, ApiError> {
        let body = std::fs::read_to_string(&self.path).map_err(|source| ApiError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        decode_response(&body)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
