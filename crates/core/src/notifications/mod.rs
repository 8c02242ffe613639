//! Notifications module.
//!
//! Per-session notification holders and the views bound to them:
//!
//! - **Models** (`notifications_model.rs`) - `Notification`, `Priority` and its styling
//! - **Holder** (`holder.rs`) - in-memory set of notifications with change listeners
//! - **Badge** (`badge.rs`) - display component bound to the live unread count
//! - **Overlay** (`overlay.rs`) - card list rendered from a holder
//! - **Registry** (`registry.rs`) - one holder per session

mod badge;
mod holder;
mod notifications_model;
mod overlay;
mod registry;

pub use badge::NotificationBadge;
pub use holder::{
    ListenerRegistration, NotificationChangeEvent, NotificationComponent, NotificationHolder,
};
pub use notifications_model::{
    NewNotification, Notification, NotificationKind, Priority, PriorityStyle,
};
pub use overlay::{NotificationCardView, NotificationOverlay};
pub use registry::{NotificationRegistry, SharedHolder};
