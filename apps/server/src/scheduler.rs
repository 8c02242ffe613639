//! Background sweeper for sessions the cluster never reported as destroyed.

use std::sync::Arc;

use chrono::Utc;
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};

use crate::main_lib::AppState;

/// Sweep at most this often, regardless of the idle limit.
const MIN_SWEEP_INTERVAL_SECS: u64 = 60;

pub fn start_session_sweeper(state: Arc<AppState>, max_idle: Duration) {
    let period = Duration::from_secs((max_idle.as_secs() / 2).max(MIN_SWEEP_INTERVAL_SECS));
    tokio::spawn(async move {
        info!(
            "Session sweeper started (idle limit {}s, every {}s)",
            max_idle.as_secs(),
            period.as_secs()
        );
        let mut ticker = interval(period);
        loop {
            ticker.tick().await;
            sweep_idle_sessions(&state, max_idle);
        }
    });
}

/// Destroys sessions idle longer than `max_idle`. A session touched while
/// the sweep runs is kept. Returns how many went.
pub fn sweep_idle_sessions(state: &AppState, max_idle: Duration) -> usize {
    let max_idle = match chrono::Duration::from_std(max_idle) {
        Ok(d) => d,
        Err(e) => {
            warn!("Session idle limit out of range: {}", e);
            return 0;
        }
    };
    let expired = state.session_tracker.expired(Utc::now(), max_idle);
    if expired.is_empty() {
        debug!("No idle sessions to sweep");
        return 0;
    }
    let count = expired
        .iter()
        .filter(|s| state.expire_session(s))
        .count();
    info!("Swept {} idle sessions", count);
    count
}
