use rusqlite::{Connection, OptionalExtension};
use crate::models::Session;
use anyhow::{Context, Result};

/// Session repository: at most one stored login at a time
pub struct SessionRepo;

impl SessionRepo {
    /// Store a session, replacing any existing one
    pub fn save(conn: &Connection, session: &Session) -> Result<()> {
        conn.execute(
            "INSERT INTO session (id, token, expires_ts, created_ts) VALUES (1, ?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
               token = excluded.token,
               expires_ts = excluded.expires_ts,
               created_ts = excluded.created_ts",
            rusqlite::params![session.token, session.expires_ts, session.created_ts],
        )
        .context("Failed to save session")?;
        Ok(())
    }

    /// Get the stored session (if any), expired or not
    pub fn get(conn: &Connection) -> Result<Option<Session>> {
        let mut stmt = conn.prepare(
            "SELECT token, expires_ts, created_ts FROM session WHERE id = 1"
        )?;
        let session = stmt
            .query_row([], |row| {
                Ok(Session {
                    token: row.get(0)?,
                    expires_ts: row.get(1)?,
                    created_ts: row.get(2)?,
                })
            })
            .optional()?;
        Ok(session)
    }

    /// Remove the stored session; returns whether one existed
    pub fn clear(conn: &Connection) -> Result<bool> {
        let removed = conn
            .execute("DELETE FROM session", [])
            .context("Failed to clear session")?;
        Ok(removed > 0)
    }
}
