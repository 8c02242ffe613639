//! Consecutive-failure circuit breaker.
//!
//! Closed counts consecutive failures and opens at the threshold. Open
//! rejects calls until `open_duration` has elapsed, then lets a single trial
//! through in HalfOpen: success closes the circuit, failure opens it again.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use log::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub open_duration: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            open_duration: Duration::from_secs(30),
        }
    }
}

/// Observable breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

#[derive(Debug)]
enum Inner {
    Closed { failures: u32 },
    Open { since: Instant },
    HalfOpen { trial_in_flight: bool },
}

#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,
    config: CircuitBreakerConfig,
    inner: Mutex<Inner>,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            inner: Mutex::new(Inner::Closed { failures: 0 }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> CircuitState {
        match *self.lock() {
            Inner::Closed { .. } => CircuitState::Closed,
            Inner::Open { .. } => CircuitState::Open,
            Inner::HalfOpen { .. } => CircuitState::HalfOpen,
        }
    }

    /// Whether a call may go through now. Moves Open to HalfOpen once the
    /// open period has elapsed.
    pub fn try_acquire(&self) -> bool {
        let mut inner = self.lock();
        match *inner {
            Inner::Closed { .. } => true,
            Inner::Open { since } if since.elapsed() >= self.config.open_duration => {
                info!("Circuit '{}' half-open, admitting a trial call", self.name);
                *inner = Inner::HalfOpen {
                    trial_in_flight: true,
                };
                true
            }
            Inner::Open { .. } => false,
            Inner::HalfOpen {
                trial_in_flight: true,
            } => false,
            Inner::HalfOpen {
                trial_in_flight: false,
            } => {
                *inner = Inner::HalfOpen {
                    trial_in_flight: true,
                };
                true
            }
        }
    }

    /// Like [`try_acquire`](Self::try_acquire), but settles the call through
    /// the returned permit.
    pub fn acquire(&self) -> Option<CallPermit<'_>> {
        self.try_acquire().then(|| CallPermit {
            breaker: self,
            settled: false,
        })
    }

    pub fn record_success(&self) {
        let mut inner = self.lock();
        if matches!(*inner, Inner::HalfOpen { .. }) {
            info!("Circuit '{}' closed after successful trial", self.name);
        }
        *inner = Inner::Closed { failures: 0 };
    }

    pub fn record_failure(&self) {
        let mut inner = self.lock();
        let next = match *inner {
            Inner::Closed { failures } if failures + 1 >= self.config.failure_threshold => {
                warn!(
                    "Circuit '{}' opened after {} consecutive failures",
                    self.name,
                    failures + 1
                );
                Inner::Open {
                    since: Instant::now(),
                }
            }
            Inner::Closed { failures } => Inner::Closed {
                failures: failures + 1,
            },
            Inner::HalfOpen { .. } | Inner::Open { .. } => {
                warn!("Circuit '{}' re-opened", self.name);
                Inner::Open {
                    since: Instant::now(),
                }
            }
        };
        *inner = next;
    }

    /// An admitted call ended without an outcome. A half-open trial goes
    /// back to Open so a later call can try again.
    pub fn record_abandoned(&self) {
        let mut inner = self.lock();
        if matches!(*inner, Inner::HalfOpen { .. }) {
            warn!("Circuit '{}' trial call abandoned, re-opening", self.name);
            *inner = Inner::Open {
                since: Instant::now(),
            };
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One admitted call. Dropping it unsettled records an abandoned call.
#[must_use]
pub struct CallPermit<'a> {
    breaker: &'a CircuitBreaker,
    settled: bool,
}

impl CallPermit<'_> {
    pub fn success(mut self) {
        self.settled = true;
        self.breaker.record_success();
    }

    pub fn failure(mut self) {
        self.settled = true;
        self.breaker.record_failure();
    }
}

impl Drop for CallPermit<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.breaker.record_abandoned();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaker(threshold: u32, open: Duration) -> CircuitBreaker {
        CircuitBreaker::new(
            "test",
            CircuitBreakerConfig {
                failure_threshold: threshold,
                open_duration: open,
            },
        )
    }

    #[test]
    fn opens_after_threshold_consecutive_failures() {
        let cb = breaker(3, Duration::from_secs(60));
        cb.record_failure();
        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Closed);
        assert!(cb.try_acquire());

        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Open);
        assert!(!cb.try_acquire());
    }

    #[test]
    fn success_resets_failure_count() {
        let cb = breaker(2, Duration::from_secs(60));
        cb.record_failure();
        cb.record_success();
        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Closed);
    }

    #[test]
    fn half_open_admits_one_trial() {
        let cb = breaker(1, Duration::ZERO);
        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Open);

        assert!(cb.try_acquire());
        assert_eq!(cb.state(), CircuitState::HalfOpen);
        assert!(!cb.try_acquire());

        cb.record_success();
        assert_eq!(cb.state(), CircuitState::Closed);
    }

    #[test]
    fn failed_trial_reopens() {
        let cb = breaker(1, Duration::from_secs(60));
        *cb.lock() = Inner::HalfOpen {
            trial_in_flight: true,
        };
        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Open);
        assert!(!cb.try_acquire());
    }

    #[test]
    fn dropped_trial_permit_reopens_for_a_later_trial() {
        let cb = breaker(1, Duration::ZERO);
        cb.record_failure();

        let permit = cb.acquire().unwrap();
        assert_eq!(cb.state(), CircuitState::HalfOpen);
        drop(permit);
        assert_eq!(cb.state(), CircuitState::Open);

        cb.acquire().unwrap().success();
        assert_eq!(cb.state(), CircuitState::Closed);
    }

    #[test]
    fn dropped_permit_while_closed_changes_nothing() {
        let cb = breaker(1, Duration::from_secs(60));
        drop(cb.acquire().unwrap());
        assert_eq!(cb.state(), CircuitState::Closed);
        assert!(cb.try_acquire());
    }
}
