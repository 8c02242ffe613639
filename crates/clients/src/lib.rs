//! Portal Clients - remote service contracts for the portal web tier.
//!
//! Every backend call is declared twice: a transport trait (`*Api`) that may
//! fail, and a caller-facing trait (`*ServiceTrait`) that always yields a
//! [`ServiceResult`]. [`Resilient`] bridges the two with a circuit breaker
//! and a fallback that substitutes the declared default payload.

pub mod circuit_breaker;
pub mod client;
pub mod comments;
pub mod errors;
pub mod notifications;
pub mod resilient;
pub mod users;

pub use circuit_breaker::{CallPermit, CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use client::HttpServiceClient;
pub use comments::{EntityComment, EntityCommentApi, EntityCommentQuery, EntityCommentServiceTrait};
pub use errors::{ClientError, Result};
pub use notifications::{NotificationQuery, NotificationServiceTrait, UserNotificationApi};
pub use resilient::Resilient;
pub use users::{SecurityUser, SecurityUserApi, SecurityUserQuery, SecurityUserServiceTrait};

pub use portal_core::ServiceResult;
