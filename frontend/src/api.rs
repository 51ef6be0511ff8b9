//! Typed backend client.
//!
//! Every call goes through [`ApiClient::send`] or
//! [`ApiClient::send_authorized`]; failures come back as [`ApiError`] and are
//! turned into banner text by the view that made the call.

use farmvizion_shared::{
    ApiRequest, ErrorBody, CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE,
};
use thiserror::Error;

use crate::request::{HttpClient, HttpRequest, HttpResponse, TransportError};

pub const MISSING_TOKEN_MESSAGE: &str = "No authentication token found. Please log in.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
pub const INVALID_DATA_MESSAGE: &str = "Invalid data format received from server.";

// =========================================================
// Errors
// =========================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// 401: the token was rejected.
    #[error("unauthorized ({status})")]
    Unauthorized { status: u16, message: Option<String> },
    /// 403: authenticated but not allowed.
    #[error("forbidden ({status})")]
    Forbidden { status: u16, message: Option<String> },
    #[error("request failed with status {status}")]
    Backend { status: u16, message: Option<String> },
    #[error("No authentication token found. Please log in.")]
    MissingToken,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    fn from_response(res: &HttpResponse) -> Self {
        let message = serde_json::from_str::<ErrorBody>(&res.body)
            .ok()
            .and_then(ErrorBody::into_message);
        let status = res.status;
        match status {
            401 => ApiError::Unauthorized { status, message },
            403 => ApiError::Forbidden { status, message },
            _ => ApiError::Backend { status, message },
        }
    }

    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status, .. }
            | ApiError::Forbidden { status, .. }
            | ApiError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message supplied by the backend, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message, .. }
            | ApiError::Forbidden { message, .. }
            | ApiError::Backend { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// The token is no longer accepted and the session should end.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Text for an inline banner: the backend's own message when it sent
    /// one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ApiError::MissingToken => MISSING_TOKEN_MESSAGE.to_string(),
            ApiError::InvalidResponse(_) => INVALID_DATA_MESSAGE.to_string(),
            ApiError::Encode(_) => fallback.to_string(),
            _ => self
                .backend_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// =========================================================
// Client
// =========================================================

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient<C: HttpClient> {
    base_url: String,
    client: C,
}

impl<C: HttpClient> ApiClient<C> {
    /// A trailing `/` on `base_url` is dropped.
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    /// Service root, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The transport, exposed so tests can script the mock.
    pub fn client(&self) -> &C {
        &self.client
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn build<R: ApiRequest>(&self, req: &R) -> ApiResult<HttpRequest> {
        let mut http = HttpRequest::new(&self.url(&req.path()), R::METHOD);
        for (key, value) in req.headers() {
            http = http.with_header(key, &value);
        }
        if R::METHOD.has_body() {
            let body = serde_json::to_string(req).map_err(|e| ApiError::Encode(e.to_string()))?;
            http = http
                .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
                .with_body(body);
        }
        Ok(http)
    }

    /// Calls a public endpoint.
    pub async fn send<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let http = self.build(req)?;
        self.dispatch::<R>(http).await
    }

    /// Calls an endpoint that needs `Authorization: Bearer <token>`.
    ///
    /// Without a token nothing is sent and [`ApiError::MissingToken`] is
    /// returned.
    pub async fn send_authorized<R: ApiRequest>(
        &self,
        req: &R,
        token: Option<&str>,
    ) -> ApiResult<R::Response> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or(ApiError::MissingToken)?;
        let http = self
            .build(req)?
            .with_header(HEADER_AUTHORIZATION, &format!("Bearer {token}"));
        self.dispatch::<R>(http).await
    }

    async fn dispatch<R: ApiRequest>(&self, http: HttpRequest) -> ApiResult<R::Response> {
        let method = http.method;
        let path = R::PATH;

        let res = self.client.send(http).await.map_err(|e| {
            tracing::error!(method = method.as_str(), path, error = %e, "request did not complete");
            ApiError::from(e)
        })?;

        if !res.is_success() {
            let err = ApiError::from_response(&res);
            tracing::warn!(method = method.as_str(), path, status = res.status, "request rejected");
            return Err(err);
        }

        tracing::debug!(method = method.as_str(), path, status = res.status, "request ok");
        res.json::<R::Response>()
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

// =========================================================
// Session-aware calls
// =========================================================

/// Read/expire access to the current session, as seen by API callers.
pub trait SessionHandle {
    fn token(&self) -> Option<String>;
    /// Ends the session after the backend rejected its token.
    fn expire(&self);
}

/// API client bound to the session: attaches the current token to every
/// call and signs the user out when the backend answers 401.
#[derive(Clone)]
pub struct AuthorizedApi<C: HttpClient, H: SessionHandle> {
    api: ApiClient<C>,
    session: H,
}

impl<C: HttpClient, H: SessionHandle> AuthorizedApi<C, H> {
    pub fn new(api: ApiClient<C>, session: H) -> Self {
        Self { api, session }
    }

    pub async fn send<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let token = self.session.token();
        let result = self.api.send_authorized(req, token.as_deref()).await;
        if let Err(err) = &result {
            if err.is_auth_rejection() {
                tracing::warn!(path = R::PATH, "token rejected, ending session");
                self.session.expire();
            }
        }
        result
    }
}

#[cfg(test)]
mod tests;
