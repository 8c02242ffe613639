//! In-memory notification holder with synchronous change propagation.

use log::debug;
use serde::Serialize;

use super::notifications_model::Notification;

/// What changed in a holder. Carries the affected notification ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "ids", rename_all = "camelCase")]
pub enum NotificationChangeEvent {
    Added(Vec<String>),
    Removed(Vec<String>),
    Read(Vec<String>),
    Cleared,
}

/// Display bound to a holder, refreshed after every change.
pub trait NotificationComponent: Send + Sync {
    fn refresh(&self, holder: &NotificationHolder);
}

type ChangeListener = Box<dyn Fn(&NotificationChangeEvent, &NotificationHolder) + Send + Sync>;

/// Handle returned when a listener is added; pass it back to remove it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerRegistration(u64);

/// Current notifications of one session.
///
/// Listeners and components run synchronously on the mutating call, exactly
/// once per effective change. Mutations that change nothing notify nobody.
#[derive(Default)]
pub struct NotificationHolder {
    notifications: Vec<Notification>,
    components: Vec<Box<dyn NotificationComponent>>,
    listeners: Vec<(ListenerRegistration, ChangeListener)>,
    next_listener_id: u64,
}

impl NotificationHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Binds a display to this holder and refreshes it right away.
    pub fn register_notification_component(&mut self, component: Box<dyn NotificationComponent>) {
        component.refresh(self);
        self.components.push(component);
    }

    pub fn add_notifications_change_listener<F>(&mut self, listener: F) -> ListenerRegistration
    where
        F: Fn(&NotificationChangeEvent, &NotificationHolder) + Send + Sync + 'static,
    {
        let registration = ListenerRegistration(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((registration, Box::new(listener)));
        registration
    }

    /// Returns false when the registration was already removed.
    pub fn remove_listener(&mut self, registration: ListenerRegistration) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(r, _)| *r != registration);
        self.listeners.len() != before
    }

    /// Adds one notification. An id already held is ignored.
    pub fn add_notification(&mut self, notification: Notification) -> bool {
        !self.add_notifications(vec![notification]).is_empty()
    }

    /// Adds several notifications with a single change event.
    ///
    /// Returns the ids actually added; ids already held are skipped.
    pub fn add_notifications(&mut self, notifications: Vec<Notification>) -> Vec<String> {
        let mut added = Vec::new();
        for notification in notifications {
            if self.get(&notification.id).is_some() {
                debug!("Skipping duplicate notification {}", notification.id);
                continue;
            }
            added.push(notification.id.clone());
            self.notifications.push(notification);
        }
        if !added.is_empty() {
            self.fire(NotificationChangeEvent::Added(added.clone()));
        }
        added
    }

    pub fn remove_notification(&mut self, id: &str) -> Option<Notification> {
        let index = self.notifications.iter().position(|n| n.id == id)?;
        let removed = self.notifications.remove(index);
        self.fire(NotificationChangeEvent::Removed(vec![removed.id.clone()]));
        Some(removed)
    }

    /// Acknowledging a notification removes it from the holder.
    pub fn acknowledge(&mut self, id: &str) -> Option<Notification> {
        self.remove_notification(id)
    }

    /// Marks a notification read. Returns false if unknown or already read.
    pub fn mark_read(&mut self, id: &str) -> bool {
        let Some(notification) = self.notifications.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        if notification.read {
            return false;
        }
        notification.read = true;
        self.fire(NotificationChangeEvent::Read(vec![id.to_string()]));
        true
    }

    pub fn mark_all_read(&mut self) -> usize {
        let ids: Vec<String> = self
            .notifications
            .iter_mut()
            .filter(|n| !n.read)
            .map(|n| {
                n.read = true;
                n.id.clone()
            })
            .collect();
        let count = ids.len();
        if count > 0 {
            self.fire(NotificationChangeEvent::Read(ids));
        }
        count
    }

    pub fn clear(&mut self) {
        if self.notifications.is_empty() {
            return;
        }
        self.notifications.clear();
        self.fire(NotificationChangeEvent::Cleared);
    }

    fn fire(&self, event: NotificationChangeEvent) {
        for component in &self.components {
            component.refresh(self);
        }
        for (_, listener) in &self.listeners {
            listener(&event, self);
        }
    }
}
