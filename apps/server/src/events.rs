use serde_json::Value;
use tokio::sync::broadcast;

pub const NOTIFICATIONS_CHANGED: &str = "notifications:changed";
pub const SESSION_DESTROYED: &str = "session:destroyed";

/// Event pushed to browsers over SSE, optionally scoped to one session.
#[derive(Clone, Debug)]
pub struct UiEvent {
    pub name: &'static str,
    pub session_id: Option<String>,
    pub payload: Option<Value>,
}

impl UiEvent {
    pub fn for_session(name: &'static str, session_id: &str, payload: Value) -> Self {
        Self {
            name,
            session_id: Some(session_id.to_string()),
            payload: Some(payload),
        }
    }

    /// Broadcast events reach every session.
    pub fn visible_to(&self, session_id: Option<&str>) -> bool {
        match (&self.session_id, session_id) {
            (None, _) => true,
            (Some(target), Some(current)) => target == current,
            (Some(_), None) => false,
        }
    }
}

/// Fan-out of UI events to every open event stream.
#[derive(Clone)]
pub struct UiEventBus {
    sender: broadcast::Sender<UiEvent>,
}

impl UiEventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.sender.subscribe()
    }

    /// Returns without error when no stream is open.
    pub fn publish(&self, event: UiEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("No UI event subscribers");
        }
    }
}
