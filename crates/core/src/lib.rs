//! Portal Core - Domain types for the portal web tier.
//!
//! This crate holds everything the web tier renders or tracks that does not
//! depend on HTTP: the remote call envelope, the navigation menu, per-session
//! notifications, the session heartbeat store and dashboard cards.

pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod menu;
pub mod notifications;
pub mod service_result;
pub mod sessions;

pub use service_result::ServiceResult;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
