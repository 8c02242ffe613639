use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::holder::{NotificationComponent, NotificationHolder};
use crate::constants::BADGE_MAX_DISPLAY;

/// Bell badge bound to a holder's unread count.
///
/// Clones share the same counter, so the handle kept by a view observes the
/// refreshes applied to the copy registered with the holder.
#[derive(Debug, Clone, Default)]
pub struct NotificationBadge {
    unread: Arc<AtomicUsize>,
}

impl NotificationBadge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.unread.load(Ordering::Relaxed)
    }

    pub fn is_visible(&self) -> bool {
        self.count() > 0
    }

    /// Caption shown on the badge; `None` hides it.
    pub fn caption(&self) -> Option<String> {
        match self.count() {
            0 => None,
            n if n > BADGE_MAX_DISPLAY => Some(format!("{}+", BADGE_MAX_DISPLAY)),
            n => Some(n.to_string()),
        }
    }
}

impl NotificationComponent for NotificationBadge {
    fn refresh(&self, holder: &NotificationHolder) {
        self.unread.store(holder.unread_count(), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{Notification, Priority};

    #[test]
    fn badge_tracks_live_unread_count() {
        let mut holder = NotificationHolder::new();
        holder.add_notification(Notification::new(Priority::Low, "before registration"));

        let badge = NotificationBadge::new();
        holder.register_notification_component(Box::new(badge.clone()));
        assert_eq!(badge.count(), 1);

        let second = Notification::new(Priority::High, "second");
        let second_id = second.id.clone();
        holder.add_notification(second);
        assert_eq!(badge.caption().as_deref(), Some("2"));

        holder.mark_read(&second_id);
        assert_eq!(badge.count(), 1);

        holder.clear();
        assert!(!badge.is_visible());
        assert_eq!(badge.caption(), None);
    }

    #[test]
    fn caption_is_capped() {
        let mut holder = NotificationHolder::new();
        let badge = NotificationBadge::new();
        holder.register_notification_component(Box::new(badge.clone()));
        holder.add_notifications(
            (0..120)
                .map(|i| Notification::new(Priority::Low, format!("n{i}")))
                .collect(),
        );
        assert_eq!(badge.count(), 120);
        assert_eq!(badge.caption().as_deref(), Some("99+"));
    }
}
