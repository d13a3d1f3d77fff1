//! HTTP transport for the platform API
//!
//! This module holds the explicitly constructed HTTP client and base URL.
//! The transport is built once at startup from settings and handed to the
//! session manager; there is no global client singleton.

use crate::{Result, config::Settings, types::ApiErrorBody};
use reqwest::{Client, Method, Proxy};
use std::time::Duration;
use url::Url;

/// Request description carried through dispatch.
///
/// The `retried` marker travels with the request itself, so concurrent
/// in-flight requests each track their own single retry.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<serde_json::Value>,
    retried: bool,
}

impl ApiRequest {
    /// Create a new request for the given method and path
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Attach a JSON body
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Mark this request as already retried. Set by the dispatch pipeline
    /// only, never by callers.
    pub(crate) fn mark_retried(mut self) -> Self {
        self.retried = true;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    pub fn is_retried(&self) -> bool {
        self.retried
    }

    /// Whether the path targets an authentication endpoint. A 401 from
    /// those is never intercepted for refresh.
    pub fn is_auth_endpoint(&self) -> bool {
        self.path.trim_start_matches('/').starts_with("auth/")
    }
}

/// HTTP transport: configured client plus base URL
#[derive(Debug, Clone)]
pub struct ApiTransport {
    /// Base HTTP client
    client: Client,
    /// Root of the platform API
    base_url: Url,
}

impl ApiTransport {
    /// Create a new transport from settings. User agent, timeouts, and
    /// proxy configuration all come from there.
    pub fn new(settings: &Settings) -> Result<Self> {
        let base_url = settings.api_base_url()?;

        let mut builder = Client::builder()
            .user_agent(settings.api.user_agent.clone())
            .connect_timeout(Duration::from_secs(settings.network.connect_timeout))
            .timeout(Duration::from_secs(settings.network.request_timeout));

        if let Some(proxy_url) = settings.get_proxy_url() {
            let proxy = Proxy::all(&proxy_url).map_err(|e| {
                crate::Error::config("proxy", format!("Invalid proxy URL: {}", e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    /// Absolute URL for an API path, preserving any path prefix on the
    /// base URL
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Issue a request, attaching the bearer token when one is supplied
    pub async fn execute(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response> {
        let url = self.url_for(request.path());
        let mut builder = self.client.request(request.method().clone(), &url);

        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        Ok(response)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Map a non-success response to the error taxonomy, pulling the server's
/// detail message out of the body when it carries one. Validation bodies
/// keyed by field name are passed through whole.
pub(crate) async fn api_error_for(response: reqwest::Response) -> crate::Error {
    let status = response.status();
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    };

    let detail = match response.bytes().await {
        Ok(bytes) => {
            if let Ok(body) = serde_json::from_slice::<ApiErrorBody>(&bytes)
                && let Some(message) = body.message()
            {
                message.to_string()
            } else if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&bytes) {
                value.to_string()
            } else {
                fallback()
            }
        }
        Err(_) => fallback(),
    };

    crate::Error::api(status.as_u16(), detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_request_builder() {
        let request = ApiRequest::post("/auth/login/")
            .with_body(serde_json::json!({"email": "ada@example.com"}));

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.path(), "/auth/login/");
        assert!(request.body.is_some());
        assert!(!request.is_retried());
    }

    #[test]
    fn test_mark_retried() {
        let request = ApiRequest::get("/profile/");
        assert!(!request.is_retried());

        let retried = request.mark_retried();
        assert!(retried.is_retried());
    }

    #[test]
    fn test_auth_endpoint_detection() {
        assert!(ApiRequest::post("/auth/login/").is_auth_endpoint());
        assert!(ApiRequest::post("auth/token/refresh/").is_auth_endpoint());
        assert!(!ApiRequest::get("/profile/").is_auth_endpoint());
        assert!(!ApiRequest::get("/programs/1/").is_auth_endpoint());
    }

    #[test]
    fn test_url_for_joins_without_doubled_slash() {
        let settings = Settings::default();
        let transport = ApiTransport::new(&settings).unwrap();

        assert_eq!(
            transport.url_for("/auth/login/"),
            "http://localhost:8000/auth/login/"
        );
        assert_eq!(
            transport.url_for("profile/"),
            "http://localhost:8000/profile/"
        );
    }

    #[test]
    fn test_url_for_preserves_base_path_prefix() {
        let mut settings = Settings::default();
        settings.api.base_url = "http://localhost:8000/api/v2".to_string();
        let transport = ApiTransport::new(&settings).unwrap();

        assert_eq!(
            transport.url_for("/profile/"),
            "http://localhost:8000/api/v2/profile/"
        );
    }

    #[test]
    fn test_transport_creation_from_default_settings() {
        let settings = Settings::default();
        let transport = ApiTransport::new(&settings);
        assert!(transport.is_ok());
    }

    #[test]
    fn test_transport_rejects_invalid_proxy() {
        let mut settings = Settings::default();
        settings.network.https_proxy = Some("not a proxy url".to_string());

        let result = ApiTransport::new(&settings);
        assert!(result.is_err());
    }
}
