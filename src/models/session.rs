use serde::{Deserialize, Serialize};

/// Stored login session
///
/// The client never talks to the identity provider itself; it only keeps the
/// bearer token it was handed and the time it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    /// Expiry as a UTC timestamp; `None` means the token does not expire
    pub expires_ts: Option<i64>,
    pub created_ts: i64,
}

impl Session {
    pub fn new(token: String, expires_ts: Option<i64>) -> Self {
        Self {
            token,
            expires_ts,
            created_ts: chrono::Utc::now().timestamp(),
        }
    }

    /// Check validity at a given time
    pub fn is_valid_at(&self, now: i64) -> bool {
        !self.token.is_empty() && self.expires_ts.map_or(true, |exp| exp > now)
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(chrono::Utc::now().timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_without_expiry_is_valid() {
        let session = Session::new("abc".to_string(), None);
        assert!(session.is_valid());
    }

    #[test]
    fn test_session_expiry() {
        let session = Session::new("abc".to_string(), Some(1_000));
        assert!(session.is_valid_at(999));
        assert!(!session.is_valid_at(1_000));
        assert!(!session.is_valid_at(5_000));
    }

    #[test]
    fn test_empty_token_is_invalid() {
        let session = Session::new(String::new(), None);
        assert!(!session.is_valid());
    }
}
