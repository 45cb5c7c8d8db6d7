use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use url::Url;

use crate::client_logger::ChatLogger;
use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{ChatRequest, ChatResponse, SessionId};

/// Server origin used when neither an explicit URL nor the environment names one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/";

/// Environment variable consulted for the server origin.
pub const BASE_URL_ENV: &str = "RPCHAT_BASE_URL";

/// Something that can carry one chat request to a server and bring back its reply.
///
/// The chat widget only depends on this trait, so it can be driven by the
/// HTTP implementation below or by an in-process stand-in.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send `request` on behalf of `session` and wait for the complete reply.
    async fn send(&self, session: SessionId, request: &ChatRequest) -> Result<ChatResponse>;
}

#[async_trait]
impl<B: ChatBackend + ?Sized> ChatBackend for Arc<B> {
    async fn send(&self, session: SessionId, request: &ChatRequest) -> Result<ChatResponse> {
        (**self).send(session, request).await
    }
}

/// Client for the `/api/chat/{id}` endpoint.
#[derive(Clone)]
pub struct HttpChatBackend {
    client: ReqwestClient,
    base_url: Url,
    logger: Option<Arc<dyn ChatLogger>>,
}

impl fmt::Debug for HttpChatBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpChatBackend")
            .field("base_url", &self.base_url.as_str())
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

impl HttpChatBackend {
    /// Create a new backend.
    ///
    /// The server origin can be provided directly or read from the
    /// RPCHAT_BASE_URL environment variable; failing both, the default
    /// `http://localhost:8000/` is used.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        let base_url = match base_url {
            Some(url) => url,
            None => env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        };
        let base_url = parse_base_url(&base_url)?;

        // No timeout: a hung server leaves the reply pending.
        let client = ReqwestClient::builder().build().map_err(|e| {
            Error::http_client(
                format!("Failed to build HTTP client: {}", e),
                Some(Box::new(e)),
            )
        })?;

        Ok(Self {
            client,
            base_url,
            logger: None,
        })
    }

    /// Attach a logger that observes every exchange.
    pub fn with_logger(mut self, logger: Arc<dyn ChatLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The normalized server origin.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The endpoint for `session`.
    pub fn endpoint(&self, session: SessionId) -> Result<Url> {
        Ok(self.base_url.join(&format!("api/chat/{session}"))?)
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers
    }

    async fn post(&self, url: Url, request: &ChatRequest) -> Result<ChatResponse> {
        let body = serde_json::to_vec(request)?;
        let response = self
            .client
            .post(url)
            .headers(self.default_headers())
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice::<ChatResponse>(&bytes).map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();
        match response.text().await {
            Ok(body) => Error::api(status_code, body.trim()),
            Err(e) => Error::http_client(
                format!("Failed to read error response: {}", e),
                Some(Box::new(e)),
            ),
        }
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, session: SessionId, request: &ChatRequest) -> Result<ChatResponse> {
        let url = self.endpoint(session)?;
        CLIENT_REQUESTS.click();
        if let Some(logger) = &self.logger {
            logger.log_request(session, request);
        }

        let start = Instant::now();
        let result = self.post(url, request).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        match &result {
            Ok(response) => {
                if let Some(logger) = &self.logger {
                    logger.log_response(session, response);
                }
            }
            Err(err) => {
                CLIENT_REQUEST_ERRORS.click();
                if let Some(logger) = &self.logger {
                    logger.log_error(session, err);
                }
            }
        }
        result
    }
}

/// Parse a server origin, requiring http(s) and a trailing slash on the path
/// so that joining `api/chat/{id}` appends rather than replaces.
fn parse_base_url(input: &str) -> Result<Url> {
    let mut url = Url::parse(input.trim())?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::validation(
            format!("unsupported scheme {:?}", url.scheme()),
            Some("base_url".to_string()),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_creation() {
        let backend = HttpChatBackend::new(Some("http://127.0.0.1:9000".to_string())).unwrap();
        assert_eq!(backend.base_url().as_str(), "http://127.0.0.1:9000/");
        assert!(backend.logger.is_none());
    }

    #[test]
    fn endpoint_uses_decimal_session() {
        let backend = HttpChatBackend::new(Some("http://localhost:8000".to_string())).unwrap();
        let url = backend.endpoint(SessionId::new(123_456)).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/chat/123456");
    }

    #[test]
    fn endpoint_keeps_path_prefix() {
        let backend =
            HttpChatBackend::new(Some("https://example.com/bots/rp?x=1#top".to_string())).unwrap();
        assert_eq!(backend.base_url().as_str(), "https://example.com/bots/rp/");
        let url = backend.endpoint(SessionId::new(9)).unwrap();
        assert_eq!(url.as_str(), "https://example.com/bots/rp/api/chat/9");
    }

    #[test]
    fn rejects_bad_base_urls() {
        let err = HttpChatBackend::new(Some("not a url".to_string())).unwrap_err();
        assert!(matches!(err, Error::Url { .. }));

        let err = HttpChatBackend::new(Some("ftp://example.com/".to_string())).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn only_content_type_header() {
        let backend = HttpChatBackend::new(Some(DEFAULT_BASE_URL.to_string())).unwrap();
        let headers = backend.default_headers();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    }
}
