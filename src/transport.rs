//! HTTP transport abstraction.
//!
//! The client only needs "send a form body, get the status and bytes back";
//! `HttpTransport` provides that over `reqwest` when the `fetch` feature is
//! enabled, and tests plug in an in-memory implementation.

use std::fmt;

use crate::error::Error;

/// HTTP verb used for a gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// Raw HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a form-encoded request body to a URL.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        form_body: String,
    ) -> Result<TransportResponse, Error>;
}

#[cfg(feature = "fetch")]
pub use reqwest_transport::HttpTransport;

#[cfg(feature = "fetch")]
mod reqwest_transport {
    use std::time::Duration;

    use super::{HttpMethod, Transport, TransportResponse};
    use crate::constants::CONTENT_TYPE;
    use crate::error::Error;

    /// [`Transport`] backed by a pooled `reqwest::Client`.
    #[derive(Debug, Clone, Default)]
    pub struct HttpTransport {
        client: reqwest::Client,
        timeout: Option<Duration>,
    }

    impl HttpTransport {
        pub fn new(timeout: Option<Duration>) -> Self {
            Self {
                client: reqwest::Client::new(),
                timeout,
            }
        }

        /// Reuse an existing `reqwest::Client`.
        pub fn with_client(client: reqwest::Client, timeout: Option<Duration>) -> Self {
            Self { client, timeout }
        }
    }

    #[async_trait::async_trait]
    impl Transport for HttpTransport {
        async fn send(
            &self,
            method: HttpMethod,
            url: &str,
            form_body: String,
        ) -> Result<TransportResponse, Error> {
            let method = match method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
            };
            let mut request = self
                .client
                .request(method, url)
                .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
                .body(form_body);
            if let Some(timeout) = self.timeout {
                request = request.timeout(timeout);
            }

            let resp = request
                .send()
                .await
                .map_err(|e| Error::Transport(format!("Failed to reach {}: {}", url, e)))?;
            let status = resp.status().as_u16();
            let body = resp.bytes().await?.to_vec();
            Ok(TransportResponse { status, body })
        }
    }
}
