//! HTTP client for the admin backend
//!
//! Every call attaches the bearer token, aborts after the configured timeout
//! and unwraps the `{ code, status, message, data }` envelope.

use contracts::shared::api::{endpoints, ApiEnvelope, ApiError};
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::AbortController;

use crate::config::AppConfig;
use crate::system::auth::storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    fn name(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    fn builder(self, url: &str) -> RequestBuilder {
        match self {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Delete => Request::delete(url),
        }
    }
}

/// Shared by every screen through Leptos context
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    timeout_ms: u32,
    token_keys: Vec<String>,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api.base_url.clone(),
            timeout_ms: config.api.request_timeout_ms,
            token_keys: config.auth.token_keys.clone(),
        }
    }

    /// Build a full API URL from a path like "/api/products"
    pub fn api_url(&self, path: &str) -> String {
        endpoints::join(&self.base_url, path)
    }

    /// Single-object response; missing `data` is a decode error
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let text = self.execute::<()>(Method::Get, path, None).await?;
        ApiEnvelope::<T>::parse(&text)?.into_data()
    }

    /// Collection response; missing `data` is an empty list
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let text = self.execute::<()>(Method::Get, path, None).await?;
        ApiEnvelope::<Vec<T>>::parse(&text)?.into_list()
    }

    /// Write call with a JSON body; `data` is optional in the reply
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let text = self.execute(method, path, Some(body)).await?;
        decode_optional(&text)
    }

    /// Write call without a body (DELETE, summarize)
    pub async fn send_empty(&self, method: Method, path: &str) -> Result<(), ApiError> {
        let text = self.execute::<()>(method, path, None).await?;
        decode_optional::<serde_json::Value>(&text).map(|_| ())
    }

    async fn execute<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<String, ApiError> {
        let auth_header = storage::bearer(&self.token_keys).ok_or(ApiError::Unauthorized)?;
        let url = self.api_url(path);
        log::debug!("{} {}", method.name(), url);

        let controller = AbortController::new()
            .map_err(|e| ApiError::Network(format!("AbortController unavailable: {:?}", e)))?;
        let signal = controller.signal();

        let builder = method
            .builder(&url)
            .header("Authorization", &auth_header)
            .abort_signal(Some(&signal));
        let request = match body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(format!("Failed to build request: {}", e)))?;

        // the timeout covers the body as well as the headers
        let timer = Timeout::new(self.timeout_ms, move || controller.abort());

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let error = transport_error(signal.aborted(), ApiError::Network(e.to_string()));
                log::error!("{} {} failed: {}", method.name(), url, error);
                return Err(error);
            }
        };

        let status = response.status();
        let read = response.text().await;
        drop(timer);
        let text = read.map_err(|e| {
            let error = transport_error(signal.aborted(), ApiError::Decode(e.to_string()));
            log::error!("{} {} body failed: {}", method.name(), url, error);
            error
        })?;

        if !response.ok() {
            let error = ApiError::from_status(status, &text);
            log::error!("{} {} -> {}: {}", method.name(), url, status, error);
            return Err(error);
        }

        Ok(text)
    }
}

/// A request cut by the abort timer is a timeout whatever the fetch reported
fn transport_error(aborted: bool, error: ApiError) -> ApiError {
    if aborted {
        ApiError::Timeout
    } else {
        error
    }
}

/// Empty bodies are accepted for writes that return nothing
fn decode_optional<T: DeserializeOwned>(text: &str) -> Result<Option<T>, ApiError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    ApiEnvelope::<T>::parse(text)?.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_uses_config_base() {
        let mut config = AppConfig::default();
        config.api.base_url = "https://admin.example.vn/".to_string();
        let client = ApiClient::new(&config);
        assert_eq!(
            client.api_url("/api/products"),
            "https://admin.example.vn/api/products"
        );
    }

    #[test]
    fn test_decode_optional() {
        assert_eq!(decode_optional::<i32>("").unwrap(), None);
        assert_eq!(
            decode_optional::<i32>(r#"{"status":"success","data":7}"#).unwrap(),
            Some(7)
        );
        assert!(matches!(
            decode_optional::<i32>(r#"{"status":"error","message":"Trùng dữ liệu"}"#),
            Err(ApiError::Business { .. })
        ));
        assert!(matches!(
            decode_optional::<i32>("<html>"),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_aborted_read_is_a_timeout() {
        assert_eq!(
            transport_error(true, ApiError::Decode("body stream aborted".into())),
            ApiError::Timeout
        );
        assert_eq!(
            transport_error(false, ApiError::Decode("bad utf-8".into())),
            ApiError::Decode("bad utf-8".into())
        );
    }
}
