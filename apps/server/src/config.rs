use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use portal_clients::CircuitBreakerConfig;

pub struct Config {
    pub listen_addr: SocketAddr,
    /// Base URL of the business backend (`/api/...` services).
    pub backend_url: String,
    /// Base URL of the user account service (`/uaa/...`).
    pub uaa_url: String,
    pub backend_token: Option<String>,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub client_timeout: Duration,
    pub breaker: CircuitBreakerConfig,
    /// Sessions idle longer than this are swept; `None` disables the sweeper.
    pub session_max_idle: Option<Duration>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("PORTAL_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid PORTAL_LISTEN_ADDR")?;
        let backend_url =
            std::env::var("PORTAL_BACKEND_URL").unwrap_or_else(|_| "http://localhost:8081".into());
        let uaa_url = std::env::var("PORTAL_UAA_URL").unwrap_or_else(|_| backend_url.clone());
        let backend_token = std::env::var("PORTAL_BACKEND_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        let cors_allow = std::env::var("PORTAL_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let defaults = CircuitBreakerConfig::default();
        let breaker = CircuitBreakerConfig {
            failure_threshold: env_number("PORTAL_BREAKER_FAILURE_THRESHOLD")?
                .unwrap_or(defaults.failure_threshold),
            open_duration: env_number("PORTAL_BREAKER_OPEN_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.open_duration),
        };
        let session_max_idle = match env_number::<u64>("PORTAL_SESSION_MAX_IDLE_SECS")? {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Some(Duration::from_secs(30 * 60)),
        };
        let request_timeout = env_number("PORTAL_REQUEST_TIMEOUT_MS")?.unwrap_or(30000);
        let client_timeout = env_number("PORTAL_CLIENT_TIMEOUT_MS")?.unwrap_or(10000);
        Ok(Self {
            listen_addr,
            backend_url,
            uaa_url,
            backend_token,
            cors_allow,
            request_timeout: Duration::from_millis(request_timeout),
            client_timeout: Duration::from_millis(client_timeout),
            breaker,
            session_max_idle,
        })
    }
}

fn env_number<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_number(key, std::env::var(key).ok())
}

/// An unset or blank variable is `None`; anything else must parse.
fn parse_number<T>(key: &str, raw: Option<String>) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid {}: '{}'", key, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_or_blank_number_is_none() {
        assert_eq!(parse_number::<u64>("PORTAL_X", None).unwrap(), None);
        assert_eq!(parse_number::<u64>("PORTAL_X", Some("  ".into())).unwrap(), None);
        assert_eq!(parse_number::<u64>("PORTAL_X", Some(" 42 ".into())).unwrap(), Some(42));
    }

    #[test]
    fn malformed_or_out_of_range_number_is_an_error() {
        let err = parse_number::<u32>("PORTAL_BREAKER_FAILURE_THRESHOLD", Some("five".into()))
            .unwrap_err();
        assert!(err.to_string().contains("PORTAL_BREAKER_FAILURE_THRESHOLD"));

        assert!(parse_number::<u32>("PORTAL_X", Some("5000000000".into())).is_err());
        assert!(parse_number::<u64>("PORTAL_X", Some("-1".into())).is_err());
    }
}
