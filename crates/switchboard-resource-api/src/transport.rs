//! Authenticated JSON transport to the platform API

use reqwest::{
    Client,
    Method,
    RequestBuilder,
    Response,
};
use secrecy::{
    ExposeSecret,
    SecretString,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{
    RemoteError,
    RemoteResult,
};

/// Shared by every proxy of a process; cloning is cheap
#[derive(Clone)]
pub struct PlatformClient {
    http: Client,
    base_url: String,
    token: SecretString,
}

impl std::fmt::Debug for PlatformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl PlatformClient {
    pub fn new(http: Client, base_url: impl Into<String>, token: SecretString) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins an API path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .bearer_auth(self.token.expose_secret())
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self, path: &str, query: &[(&str, String)],
    ) -> RemoteResult<T> {
        let response = send(self.request(Method::GET, path).query(query), path).await?;
        decode(response, path).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self, path: &str, body: &B,
    ) -> RemoteResult<T> {
        let response = send(self.request(Method::POST, path).json(body), path).await?;
        decode(response, path).await
    }

    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self, path: &str, body: &B,
    ) -> RemoteResult<T> {
        let response = send(self.request(Method::PUT, path).json(body), path).await?;
        decode(response, path).await
    }

    pub async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self, path: &str, body: &B,
    ) -> RemoteResult<T> {
        let response = send(self.request(Method::PATCH, path).json(body), path).await?;
        decode(response, path).await
    }

    pub async fn delete(&self, path: &str) -> RemoteResult<()> {
        send(self.request(Method::DELETE, path), path).await?;
        Ok(())
    }
}

/// Percent-encodes one path segment
pub fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

async fn send(request: RequestBuilder, path: &str) -> RemoteResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| RemoteError::transport(format!("Request to {path} failed: {e}")))?;

    let status = response.status();
    debug!("{path} answered {status}");
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(RemoteError::new(
        Some(status.as_u16()),
        error_message(path, &body),
    ))
}

async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> RemoteResult<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| RemoteError::transport(format!("Failed to read response from {path}: {e}")))?;

    // Some endpoints answer 204 where the caller expects an object
    let bytes = if bytes.is_empty() {
        &b"null"[..]
    } else {
        &bytes[..]
    };

    serde_json::from_slice(bytes)
        .map_err(|e| RemoteError::transport(format!("Failed to parse response from {path}: {e}")))
}

/// Prefers the platform's `message` field over the raw body
fn error_message(path: &str, body: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());

    if message.is_empty() {
        format!("Request to {path} failed")
    } else {
        format!("Request to {path} failed: {message}")
    }
}
