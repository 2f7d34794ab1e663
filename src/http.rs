use std::time::Duration;

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF: Duration = Duration::from_millis(500);

/// Errors from the shared HTTP fetch path.
///
/// SECURITY: messages must NEVER contain the bearer token or presigned query strings.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid bearer token format")]
    InvalidToken,

    /// Connection failures, timeouts, body decoding.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
}

/// Settings shared by every HTTP location (state and inventory).
#[derive(Clone)]
pub struct HttpSettings {
    pub token: Option<String>,
    pub timeout: Duration,
    pub max_retries: u32,
    pub backoff: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            max_retries: DEFAULT_MAX_RETRIES,
            backoff: DEFAULT_BACKOFF,
        }
    }
}

impl std::fmt::Debug for HttpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSettings")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

pub fn build_client(settings: &HttpSettings) -> Result<Client, HttpError> {
    let mut headers = HeaderMap::new();
    if let Some(token) = &settings.token {
        let auth_value = format!("Bearer {}", token);
        let header_value = HeaderValue::from_str(&auth_value).map_err(|_| HttpError::InvalidToken)?;
        headers.insert(AUTHORIZATION, header_value);
    }

    let client = Client::builder()
        .default_headers(headers)
        .timeout(settings.timeout)
        .build()?;

    Ok(client)
}

/// GET returning the body as text. 5xx responses and transport failures are retried
/// with linear backoff; 4xx responses fail immediately.
pub async fn get_text(client: &Client, url: &str, settings: &HttpSettings) -> Result<String, HttpError> {
    let mut attempt = 0u32;

    loop {
        let retryable = match client.get(url).send().await {
            Ok(response) if response.status().is_success() => return Ok(response.text().await?),
            Ok(response) if response.status().is_server_error() => HttpError::Status {
                status: response.status().as_u16(),
                url: display_url(url),
            },
            Ok(response) => {
                return Err(HttpError::Status {
                    status: response.status().as_u16(),
                    url: display_url(url),
                });
            }
            Err(e) if e.is_connect() || e.is_timeout() || e.is_request() => HttpError::Network(e.without_url()),
            Err(e) => return Err(HttpError::Network(e.without_url())),
        };

        if attempt >= settings.max_retries {
            return Err(retryable);
        }
        attempt += 1;
        warn!(
            url = %display_url(url),
            attempt,
            max_retries = settings.max_retries,
            error = %retryable,
            "request failed, retrying"
        );
        tokio::time::sleep(settings.backoff * attempt).await;
    }
}

/// URL with its query string dropped, safe for logs and errors.
pub fn display_url(url: &str) -> String {
    url.split(['?', '#']).next().unwrap_or(url).to_string()
}
