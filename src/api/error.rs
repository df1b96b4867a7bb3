/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not logged in. Run 'podtrack login --token <token>' first.")]
    NotLoggedIn,

    #[error("Session expired. Run 'podtrack login --token <token>' again.")]
    SessionExpired,

    #[error("Failed to reach API at {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode API response: {0}")]
    Decode(String),

    #[error("Failed to read response file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Errors the user can fix without touching the local install
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            ApiError::NotLoggedIn
                | ApiError::SessionExpired
                | ApiError::Status { status: 401, .. }
                | ApiError::Io { .. }
        )
    }
}
