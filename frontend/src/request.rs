use std::collections::BTreeMap;

use farmvizion_shared::HttpMethod;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

// =========================================================
// HTTP interface abstraction
// =========================================================

/// Failure before any HTTP status was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("failed to build request: {0}")]
    RequestBuild(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to read response: {0}")]
    ResponseRead(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Request with no headers and no body.
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Sets a header, replacing any earlier value for the same key.
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    /// Header lookup. Keys are matched exactly.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body; an empty body decodes as JSON `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let body = self.body.trim();
        serde_json::from_str(if body.is_empty() { "null" } else { body })
    }
}

/// Sends a request and hands back whatever status the server answered with.
/// Non-2xx statuses are not errors at this layer.
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// =========================================================
// Test double
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    // ("METHOD url", (status, body))
    responses: RefCell<HashMap<String, (u16, String)>>,
    failures: RefCell<HashMap<String, TransportError>>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            failures: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn key(method: HttpMethod, url: &str) -> String {
        format!("{} {}", method.as_str(), url)
    }

    /// Answers `method url` with `status` and a JSON body.
    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, url), (status, body.to_string()));
    }

    /// Like `mock_response` but with a body sent verbatim.
    pub fn mock_raw(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, url), (status, body.to_string()));
    }

    /// Fails `method url` at the transport level.
    pub fn mock_failure(&self, method: HttpMethod, url: &str, error: TransportError) {
        self.failures
            .borrow_mut()
            .insert(Self::key(method, url), error);
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let key = Self::key(req.method, &req.url);
        self.requests.borrow_mut().push(req);

        if let Some(err) = self.failures.borrow().get(&key) {
            return Err(err.clone());
        }

        let responses = self.responses.borrow();
        match responses.get(&key) {
            Some((status, body)) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}
