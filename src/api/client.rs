use std::time::Duration;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use crate::api::{decode_response, ApiError, GoalSource};
use crate::models::{Pod, RawResponse, Session};

/// Endpoint returning every pod's raw fields for the current user
pub const MAIN_GOALS_PATH: &str = "/getMainGoals";
/// Endpoint writing a single task checkbox back to the CRM
pub const UPDATE_CHECKBOX_PATH: &str = "/updateCheckbox";
pub const USER_INFO_PATH: &str = "/userinfo";

/// Body of an `updateCheckbox` request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckboxUpdate {
    pub pod: String,
    pub task_title: String,
    pub new_value: bool,
}

/// Logged-in user's contact details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub email: String,
    pub name: String,
}

/// Blocking client for the tracker API
///
/// One request per call, no retry. Every request carries the session's bearer
/// token.
pub struct ApiClient {
    base_url: String,
    token: String,
    client: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, token: String, timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    /// Build a client from the stored session, rejecting missing or expired tokens
    pub fn from_session(
        base_url: &str,
        session: Option<&Session>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let session = session.ok_or(ApiError::NotLoggedIn)?;
        if !session.is_valid() {
            return Err(ApiError::SessionExpired.into());
        }
        Self::new(base_url, session.token.clone(), timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET the raw main goals response
    pub fn fetch_main_goals(&self) -> Result<RawResponse, ApiError> {
        let body = self.get_text(MAIN_GOALS_PATH)?;
        decode_response(&body)
    }

    /// Write a task's checkbox value back to the CRM
    pub fn update_checkbox(&self, pod: Pod, task_title: &str, new_value: bool) -> Result<(), ApiError> {
        let url = self.endpoint(UPDATE_CHECKBOX_PATH);
        let update = CheckboxUpdate {
            pod: pod.as_str().to_string(),
            task_title: task_title.to_string(),
            new_value,
        };
        info!("Updating {} in {} to {}", task_title, pod, new_value);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&update)
            .send()
            .map_err(|source| ApiError::Transport { url: url.clone(), source })?;
        check_status(&url, response.status())?;
        Ok(())
    }

    /// Fetch the user's contact details; `None` when the API has no match
    pub fn user_info(&self) -> Result<Option<UserInfo>, ApiError> {
        let body = self.get_text(USER_INFO_PATH)?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        if value.as_object().map_or(false, |o| o.is_empty()) {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn get_text(&self, path: &str) -> Result<String, ApiError> {
        let url = self.endpoint(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .map_err(|source| ApiError::Transport { url: url.clone(), source })?;
        check_status(&url, response.status())?;
        response
            .text()
            .map_err(|source| ApiError::Transport { url, source })
    }
}

impl GoalSource for ApiClient {
    fn fetch_goals(&self) -> Result<RawResponse, ApiError> {
        self.fetch_main_goals()
    }

    fn describe(&self) -> String {
        format!("API {}", self.base_url)
    }
}

fn check_status(url: &str, status: reqwest::StatusCode) -> Result<(), ApiError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}
