//! Notification domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Notification priority.
///
/// Ordered by numeric value: Low < Medium < High < Warning < Error.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    #[default]
    Low = 1,
    Medium = 2,
    High = 3,
    Warning = 4,
    Error = 5,
}

impl Priority {
    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Warning => "WARNING",
            Priority::Error => "ERROR",
        }
    }

    /// Display styling bound to this priority.
    pub fn style(&self) -> PriorityStyle {
        match self {
            Priority::Low => PriorityStyle::new("contrast", "info"),
            Priority::Medium => PriorityStyle::new("primary", "info"),
            Priority::High => PriorityStyle::new("primary", "exclamation"),
            Priority::Warning => PriorityStyle::new("warning", "warning"),
            Priority::Error => PriorityStyle::new("error", "error"),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Theme variant and icon used when rendering a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityStyle {
    pub theme: &'static str,
    pub icon: &'static str,
}

impl PriorityStyle {
    const fn new(theme: &'static str, icon: &'static str) -> Self {
        Self { theme, icon }
    }
}

/// What a notification points at.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NotificationKind {
    #[default]
    Message,
    #[serde(rename_all = "camelCase")]
    EntityReference {
        entity_type: String,
        entity_id: String,
    },
    Action {
        label: String,
        route: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    pub fn new(priority: Priority, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            priority,
            kind: NotificationKind::Message,
            created_at: Utc::now(),
            read: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_kind(mut self, kind: NotificationKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn style(&self) -> PriorityStyle {
        self.priority.style()
    }
}

/// Input model for pushing a notification into a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub kind: NotificationKind,
}

impl From<NewNotification> for Notification {
    fn from(input: NewNotification) -> Self {
        let mut notification = Notification::new(input.priority, input.title).with_kind(input.kind);
        notification.description = input.description;
        if let Some(id) = input.id {
            notification.id = id;
        }
        notification
    }
}
