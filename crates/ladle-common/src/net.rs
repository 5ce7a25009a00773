//! HTTP fetch utilities for ladle.
//!
//! Provides the simple blocking HTTP GET wrapper used to load a document
//! from a network location. The query engine itself never touches the
//! network; callers go through [`fetch_text`] first.

use std::time::Duration;

/// User-Agent header sent with all requests.
///
/// Mimics a common desktop browser to avoid basic bot detection.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Failure to obtain a document body from a URL.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(String),

    /// The GET request itself failed (DNS, connect, timeout, ...).
    #[error("couldn't perform GET request to {url}: {reason}")]
    Request {
        /// The requested URL.
        url: String,
        /// Underlying transport error.
        reason: String,
    },

    /// The server answered with a non-success status.
    #[error("HTTP error {status} from {url}")]
    Status {
        /// The requested URL.
        url: String,
        /// The status code returned.
        status: u16,
    },

    /// The response body could not be read or decoded.
    #[error("unable to read the response body: {0}")]
    Body(String),
}

/// Fetch a URL and return its body as text.
///
/// # Errors
///
/// Returns a [`FetchError`] if the HTTP client cannot be created, the request
/// fails, the response has a non-success status, or the body cannot be decoded.
pub fn fetch_text(url: &str) -> Result<String, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()
        .map_err(|e| FetchError::Client(e.to_string()))?;

    log::debug!("GET {url}");
    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .map_err(|e| FetchError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().map_err(|e| FetchError::Body(e.to_string()))
}

/// Whether `source` looks like something [`fetch_text`] should load rather
/// than a local path.
#[must_use]
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
