//! Session domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tracking record stored in the shared session map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub session_id: String,
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_contact: DateTime<Utc>,
}

impl SessionInfo {
    pub fn new(session_id: impl Into<String>, username: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            session_id: session_id.into(),
            username,
            created_at: now,
            last_contact: now,
        }
    }

    /// Copy of this record with `last_contact` moved to `now`.
    pub fn touched(&self, now: DateTime<Utc>) -> Self {
        Self {
            last_contact: now,
            ..self.clone()
        }
    }
}
