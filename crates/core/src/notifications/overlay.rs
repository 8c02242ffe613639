use chrono::{DateTime, Utc};
use serde::Serialize;

use super::holder::NotificationHolder;
use super::notifications_model::{Notification, NotificationKind, Priority};

/// One rendered card in the notification overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationCardView {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub theme: &'static str,
    pub icon: &'static str,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

impl From<&Notification> for NotificationCardView {
    fn from(n: &Notification) -> Self {
        let style = n.style();
        Self {
            id: n.id.clone(),
            title: n.title.clone(),
            description: n.description.clone(),
            priority: n.priority,
            theme: style.theme,
            icon: style.icon,
            kind: n.kind.clone(),
            created_at: n.created_at,
            read: n.read,
        }
    }
}

/// Overlay listing a holder's notifications, most urgent first.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationOverlay {
    pub unread_only: bool,
}

impl NotificationOverlay {
    pub fn unread_only() -> Self {
        Self { unread_only: true }
    }

    /// Cards ordered by priority descending, then newest first.
    pub fn render(&self, holder: &NotificationHolder) -> Vec<NotificationCardView> {
        let mut visible: Vec<&Notification> = holder
            .notifications()
            .iter()
            .filter(|n| !self.unread_only || !n.read)
            .collect();
        visible.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        visible.into_iter().map(NotificationCardView::from).collect()
    }
}
