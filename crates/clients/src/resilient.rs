//! Resilience decorator turning transport failures into fallback results.

use std::future::Future;

use log::warn;
use portal_core::ServiceResult;

use crate::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
use crate::errors::Result;

/// Wraps a transport client with a circuit breaker and fallbacks.
///
/// Callers of the `*ServiceTrait` implementations on `Resilient<C>` always
/// get a well-formed [`ServiceResult`]: transport errors and open-circuit
/// rejections become `success = false` with the payload type's default.
/// A remote result that is itself unsuccessful passes through untouched.
pub struct Resilient<C> {
    inner: C,
    breaker: CircuitBreaker,
    service: String,
}

impl<C> Resilient<C> {
    pub fn new(service: impl Into<String>, inner: C, config: CircuitBreakerConfig) -> Self {
        let service = service.into();
        Self {
            inner,
            breaker: CircuitBreaker::new(service.clone(), config),
            service,
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn circuit_state(&self) -> CircuitState {
        self.breaker.state()
    }

    /// Runs `call` under the breaker, substituting the fallback on failure.
    pub async fn call<T, F>(&self, operation: &str, call: F) -> ServiceResult<T>
    where
        T: Default,
        F: Future<Output = Result<ServiceResult<T>>>,
    {
        let Some(permit) = self.breaker.acquire() else {
            let message = format!("{}.{} skipped: circuit open", self.service, operation);
            warn!("{}", message);
            return ServiceResult::failure(message);
        };

        // Dropping this future before it resolves releases the permit as abandoned.
        match call.await {
            Ok(result) => {
                permit.success();
                result
            }
            Err(err) => {
                permit.failure();
                let message = format!("{}.{} failed: {}", self.service, operation, err);
                warn!("Falling back: {}", message);
                ServiceResult::failure(message)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scriptable transport shared by the service tests.

    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use crate::errors::{ClientError, Result};

    #[derive(Default)]
    pub struct MockTransport {
        pub failing: AtomicBool,
        pub calls: AtomicUsize,
    }

    impl MockTransport {
        pub fn failing() -> Self {
            let mock = Self::default();
            mock.failing.store(true, Ordering::SeqCst);
            mock
        }

        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn respond<T>(&self, value: T) -> Result<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                Err(ClientError::Transport("connection refused".to_string()))
            } else {
                Ok(value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockTransport;
    use super::*;
    use std::time::Duration;

    fn resilient(threshold: u32) -> Resilient<MockTransport> {
        Resilient::new(
            "testService",
            MockTransport::failing(),
            CircuitBreakerConfig {
                failure_threshold: threshold,
                open_duration: Duration::from_secs(60),
            },
        )
    }

    #[tokio::test]
    async fn failure_becomes_fallback_with_message() {
        let r = resilient(5);
        let result: ServiceResult<Vec<String>> = r
            .call("list", async { r.inner().respond(ServiceResult::ok(vec!["x".to_string()])) })
            .await;
        assert!(!result.success);
        assert!(result.payload.is_empty());
        let message = result.message.unwrap();
        assert!(message.starts_with("testService.list failed"));
        assert!(message.contains("connection refused"));
    }

    #[tokio::test]
    async fn open_circuit_short_circuits_without_calling() {
        let r = resilient(2);
        for _ in 0..2 {
            let _: ServiceResult<u64> = r
                .call("count", async { r.inner().respond(ServiceResult::ok(1)) })
                .await;
        }
        assert_eq!(r.circuit_state(), CircuitState::Open);

        let result: ServiceResult<u64> =
            r.call("count", async { r.inner().respond(ServiceResult::ok(1)) }).await;
        assert_eq!(result.payload, 0);
        assert!(result.message.unwrap().contains("circuit open"));
        assert_eq!(r.inner().calls(), 2);
    }

    #[tokio::test]
    async fn remote_failure_passes_through() {
        let r = resilient(1);
        r.inner().set_failing(false);
        let remote: ServiceResult<Option<String>> = ServiceResult {
            success: false,
            message: Some("user locked".to_string()),
            payload: None,
        };
        let result = r.call("get", async { r.inner().respond(remote.clone()) }).await;
        assert_eq!(result, remote);
        assert_eq!(r.circuit_state(), CircuitState::Closed);
    }

    #[tokio::test]
    async fn cancelled_trial_does_not_wedge_the_circuit() {
        let r = Resilient::new(
            "testService",
            MockTransport::failing(),
            CircuitBreakerConfig {
                failure_threshold: 1,
                open_duration: Duration::ZERO,
            },
        );
        let _: ServiceResult<u64> = r
            .call("op", async { r.inner().respond(ServiceResult::ok(1)) })
            .await;
        assert_eq!(r.circuit_state(), CircuitState::Open);

        let trial = r.call(
            "op",
            std::future::pending::<Result<ServiceResult<u64>>>(),
        );
        assert!(tokio::time::timeout(Duration::from_millis(20), trial)
            .await
            .is_err());
        assert_eq!(r.circuit_state(), CircuitState::Open);

        r.inner().set_failing(false);
        let result: ServiceResult<u64> = r
            .call("op", async { r.inner().respond(ServiceResult::ok(7)) })
            .await;
        assert!(result.success);
        assert_eq!(result.payload, 7);
        assert_eq!(r.circuit_state(), CircuitState::Closed);
        assert_eq!(r.inner().calls(), 2);
    }
}
