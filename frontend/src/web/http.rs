//! `fetch`-backed [`HttpClient`].

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::request::{HttpClient, HttpRequest, HttpResponse, TransportError};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FetchHttpClient;

impl FetchHttpClient {
    fn build(req: &HttpRequest) -> Result<Request, TransportError> {
        let headers = Headers::new()
            .map_err(|e| TransportError::RequestBuild(format!("headers: {e:?}")))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| TransportError::RequestBuild(format!("header {key}: {e:?}")))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| TransportError::RequestBuild(format!("{e:?}")))
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let request = Self::build(&req)?;

        let window =
            web_sys::window().ok_or_else(|| TransportError::Network("no window".to_string()))?;

        let value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| TransportError::Network(format!("{e:?}")))?;
        let response: Response = value
            .dyn_into()
            .map_err(|e| TransportError::ResponseRead(format!("not a Response: {e:?}")))?;

        let status = response.status();
        let promise = response
            .text()
            .map_err(|e| TransportError::ResponseRead(format!("{e:?}")))?;
        let body = JsFuture::from(promise)
            .await
            .map_err(|e| TransportError::ResponseRead(format!("{e:?}")))?
            .as_string()
            .unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}
