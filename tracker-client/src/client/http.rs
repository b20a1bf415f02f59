//! HTTP client - network transport

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// HTTP client trait
///
/// Paths are relative to the API base URL (`"orders/7/status?status=READY"`).
/// A 2xx response with an empty body decodes as JSON `null`, so `()` and
/// `Option<T>` work as response types for endpoints that return nothing.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T>;
    /// GET an endpoint that answers with `text/plain`
    async fn get_text(&self, path: &str) -> ClientResult<String>;
    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn post_empty<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T>;
    /// POST without a body to an endpoint that answers with `text/plain`
    async fn post_text(&self, path: &str) -> ClientResult<String>;
    async fn put<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put_empty<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T>;
}

/// Network HTTP client over reqwest
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "Sending request");
        self.client.request(method, self.url(path))
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let response = req.send().await.map_err(|e| {
            tracing::warn!(error = %e, "Request failed");
            ClientError::Http(e)
        })?;
        handle_response(response).await
    }
}

/// Decode a 2xx body, or turn anything else into [`ClientError::Api`]
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let url = response.url().path().to_string();
    let text = read_body(response).await?;
    let text = if text.trim().is_empty() { "null" } else { text.as_str() };
    serde_json::from_str(text).map_err(|e| ClientError::InvalidResponse(format!("{url}: {e}")))
}

/// Body text of a 2xx response
async fn read_body(response: reqwest::Response) -> ClientResult<String> {
    let status = response.status();
    let url = response.url().path().to_string();
    let text = response.text().await?;

    if !status.is_success() {
        // Non-JSON error bodies (proxies, HTML error pages) carry no payload
        let body = serde_json::from_str::<serde_json::Value>(&text).ok();
        let err = ClientError::from_response(status, body);
        tracing::warn!(status = status.as_u16(), path = %url, error = %err, "Server rejected request");
        return Err(err);
    }
    Ok(text)
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    async fn get_text(&self, path: &str) -> ClientResult<String> {
        let response = self.request(Method::GET, path).send().await?;
        read_body(response).await
    }

    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn post_empty<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::POST, path)).await
    }

    async fn post_text(&self, path: &str) -> ClientResult<String> {
        let response = self.request(Method::POST, path).send().await?;
        read_body(response).await
    }

    async fn put<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    async fn put_empty<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::PUT, path)).await
    }

    async fn delete<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::DELETE, path)).await
    }
}
