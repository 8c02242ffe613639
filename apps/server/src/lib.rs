pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod extract;
mod main_lib;
pub mod scheduler;
pub mod session;

pub use main_lib::{build_state, init_tracing, AppState};
