use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityCommentQuery {
    pub entity_type: String,
    pub entity_id: String,
}

impl EntityCommentQuery {
    pub fn new(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityComment {
    pub id: String,
    pub entity_type: String,
    pub entity_id: String,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
