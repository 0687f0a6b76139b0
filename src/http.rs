//! Blocking HTTP requests as deferred computations.
//!
//! [`HttpClient`] turns a request description into an [`IOResult`] that sends
//! the request each time it is run. Nothing goes over the wire until `run`.
//!
//! Responses outside the 2xx range become [`HttpError::Status`] in the `read_*`
//! helpers, so a chain only continues with bodies worth decoding. [`send`]
//! hands back the raw response for callers that want to inspect it
//! themselves.
//!
//! The client is `reqwest`'s blocking client, which runs its own runtime. Do
//! not run these computations directly on a tokio worker thread; use
//! [`IOResult::run_blocking`] (feature `async`) or a plain thread.
//!
//! [`send`]: HttpClient::send
//!
//! # Example
//!
//! ```no_run
//! use serde::Deserialize;
//! use weir::http::HttpClient;
//!
//! #[derive(Deserialize)]
//! struct Status {
//!     healthy: bool,
//! }
//!
//! let client = HttpClient::new().unwrap();
//! let healthy = client
//!     .read_json::<Status, _>(|c| c.get("http://localhost:8080/status"))
//!     .map(|s| s.healthy);
//!
//! match healthy.run() {
//!     Ok(up) => println!("healthy: {}", up),
//!     Err(e) => eprintln!("probe failed: {}", e),
//! }
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::IOResult;

// ========== HttpError ==========

/// Why an HTTP computation failed.
#[derive(Debug)]
pub enum HttpError {
    /// The request could not be sent or the body could not be read.
    Transport(reqwest::Error),
    /// The server answered with a non-2xx status.
    Status {
        /// The status code.
        status: StatusCode,
        /// The response body, decoded lossily as UTF-8.
        body: String,
    },
    /// The body was read but could not be decoded.
    Decode(Box<dyn StdError + Send + Sync>),
}

impl HttpError {
    /// The status code, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            HttpError::Transport(e) => e.status(),
            HttpError::Decode(_) => None,
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Transport(e) => write!(f, "request failed: {}", e),
            HttpError::Status { status, body } if body.is_empty() => {
                write!(f, "server returned HTTP {}", status)
            }
            HttpError::Status { status, body } => {
                write!(f, "server returned HTTP {}: {}", status, body)
            }
            HttpError::Decode(e) => write!(f, "failed to decode response body: {}", e),
        }
    }
}

impl StdError for HttpError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            HttpError::Transport(e) => Some(e),
            HttpError::Status { .. } => None,
            HttpError::Decode(e) => Some(e.as_ref()),
        }
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(e: reqwest::Error) -> Self {
        HttpError::Transport(e)
    }
}

// ========== HttpClient ==========

/// A blocking HTTP client whose requests are [`IOResult`]s.
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// A client with reqwest's default settings.
    pub fn new() -> Result<Self, HttpError> {
        Ok(HttpClient {
            client: Client::builder().build()?,
        })
    }

    /// A client whose requests time out after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        Ok(HttpClient {
            client: Client::builder().timeout(timeout).build()?,
        })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client) -> Self {
        HttpClient { client }
    }

    /// The underlying client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Send the request built by `make_request` on every run.
    ///
    /// Any status is a success here; only transport failures are errors.
    pub fn send<F>(&self, make_request: F) -> IOResult<Response, HttpError>
    where
        F: Fn(&Client) -> RequestBuilder + Send + Sync + 'static,
    {
        let client = self.client.clone();
        IOResult::from_fn(move || {
            let response = make_request(&client).send()?;
            #[cfg(feature = "tracing")]
            tracing::debug!(
                url = %response.url(),
                status = response.status().as_u16(),
                "http response"
            );
            Ok(response)
        })
    }

    /// Send the request and read the body as bytes.
    pub fn read_bytes<F>(&self, make_request: F) -> IOResult<Vec<u8>, HttpError>
    where
        F: Fn(&Client) -> RequestBuilder + Send + Sync + 'static,
    {
        self.send(make_request)
            .and_then_result(|response| Ok(success(response)?.bytes()?.to_vec()))
    }

    /// Send the request and read the body as UTF-8 text.
    pub fn read_text<F>(&self, make_request: F) -> IOResult<String, HttpError>
    where
        F: Fn(&Client) -> RequestBuilder + Send + Sync + 'static,
    {
        self.read_bytes(make_request).and_then_result(|bytes| {
            String::from_utf8(bytes).map_err(|e| HttpError::Decode(Box::new(e)))
        })
    }

    /// Send the request and decode the body as JSON.
    pub fn read_json<T, F>(&self, make_request: F) -> IOResult<T, HttpError>
    where
        T: DeserializeOwned + Send + 'static,
        F: Fn(&Client) -> RequestBuilder + Send + Sync + 'static,
    {
        self.read_bytes(make_request).and_then_result(|bytes| {
            serde_json::from_slice(&bytes).map_err(|e| HttpError::Decode(Box::new(e)))
        })
    }
}

/// Turn a non-2xx response into [`HttpError::Status`], keeping its body.
fn success(response: Response) -> Result<Response, HttpError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .bytes()
        .map(|b| String::from_utf8_lossy(&b).into_owned())
        .unwrap_or_default();
    #[cfg(feature = "tracing")]
    tracing::warn!(status = status.as_u16(), "http request rejected");
    Err(HttpError::Status { status, body })
}
