//! HTTP transport shared by every backend service client.
//!
//! Backend operations are JSON-over-POST: the query object is the request
//! body and the response body is a `ServiceResult` envelope.

use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::{ClientError, Result};

/// Default timeout for backend requests.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Longest slice of an error body kept in error messages.
const ERROR_BODY_PREVIEW: usize = 200;

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// JSON client bound to one backend base URL.
///
/// ```ignore
/// let client = HttpServiceClient::new("http://backend:8080", None, None)?;
/// let result: ServiceResult<Vec<EntityComment>> =
///     client.post("/api/entityCommentService/getEntityComments", &query).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpServiceClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: Option<HeaderValue>,
}

impl HttpServiceClient {
    /// Create a client for `base_url`, optionally sending a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the HTTP
    /// client cannot be initialized.
    pub fn new(base_url: &str, bearer_token: Option<&str>, timeout: Option<Duration>) -> Result<Self> {
        let auth_header = bearer_token
            .map(|token| {
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| ClientError::Config(format!("Invalid access token format: {}", e)))
            })
            .transpose()?;

        let client = reqwest::Client::builder()
            .timeout(timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)))
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(auth) = &self.auth_header {
            headers.insert(AUTHORIZATION, auth.clone());
        }
        headers
    }

    /// POST `body` as JSON to `path` and parse the JSON response.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("[Backend] POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(body)
            .send()
            .await?;

        parse_response(response).await
    }
}

async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let detail = serde_json::from_str::<ApiErrorResponse>(&body)
            .ok()
            .and_then(|err| err.message.or(err.error))
            .unwrap_or_else(|| body.chars().take(ERROR_BODY_PREVIEW).collect());
        return Err(ClientError::Status {
            status: status.as_u16(),
            body: detail,
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        ClientError::Decode(format!(
            "{} - {}",
            e,
            body.chars().take(ERROR_BODY_PREVIEW).collect::<String>()
        ))
    })
}


#[cfg(test)]
mod tests {
    use super::test_server::respond_once;
    use super::*;
    use portal_core::ServiceResult;

    #[tokio::test]
    async fn parses_service_result_envelope() {
        let base = respond_once("200 OK", r#"{"success":true,"payload":[1,2,3]}"#).await;
        let client = HttpServiceClient::new(&base, Some("token"), None).unwrap();
        let result: ServiceResult<Vec<u32>> = client
            .post("/api/anything", &serde_json::json!({ "q": 1 }))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.payload, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn non_success_status_becomes_error() {
        let base = respond_once(
            "503 Service Unavailable",
            r#"{"message":"maintenance window"}"#,
        )
        .await;
        let client = HttpServiceClient::new(&base, None, None).unwrap();
        let err = client
            .post::<_, ServiceResult<Vec<u32>>>("/api/anything", &serde_json::json!({}))
            .await
            .unwrap_err();
        match err {
            ClientError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance window");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_becomes_decode_error() {
        let base = respond_once("200 OK", "not json").await;
        let client = HttpServiceClient::new(&base, None, None).unwrap();
        let err = client
            .post::<_, ServiceResult<u64>>("/api/anything", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn trims_trailing_slash() {
        let client = HttpServiceClient::new("http://backend:8080/", None, None).unwrap();
        assert_eq!(client.base_url(), "http://backend:8080");
    }
}
