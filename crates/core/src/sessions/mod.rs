//! Sessions module - session tracking records and the heartbeat store.

mod memory_store;
mod sessions_model;
mod sessions_traits;
mod tracker;

pub use memory_store::InMemorySessionStore;
pub use sessions_model::SessionInfo;
pub use sessions_traits::SessionStore;
pub use tracker::{SessionTracker, TouchOutcome};
