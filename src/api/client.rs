//! # HTTP Client
//!
//! reqwest-backed implementation of [`EntryApi`].

use super::{ClientError, EntryApi, EntryPage, NewEntry};
use crate::config::ApiConfig;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, StatusCode};

/// Client for the Mailbox API.
///
/// Holds no per-session state; one instance is shared by every call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    pub fn entries_url(&self, page: u64) -> String {
        format!("{}/entries/?page={}", self.config.base_url(), page)
    }

    pub fn entry_url(&self, id: &str) -> String {
        format!("{}/entry/{}", self.config.base_url(), id)
    }

    pub fn submit_url(&self) -> String {
        format!("{}/submit", self.config.base_url())
    }

    /// `Basic` authorization value, encoded fresh for every request
    fn authorization(&self) -> Option<String> {
        self.config
            .credentials()
            .map(|(user, pwd)| format!("Basic {}", STANDARD.encode(format!("{user}:{pwd}"))))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match self.authorization() {
            Some(value) => builder.header(AUTHORIZATION, value),
            None => builder,
        }
    }

    /// Send a request and return the body of a 200 response
    async fn send(&self, builder: RequestBuilder, url: &str) -> Result<String, ClientError> {
        let transport = |source| ClientError::Transport {
            url: url.to_string(),
            source,
        };

        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if status == StatusCode::OK {
            tracing::debug!("{} -> {}", url, status);
            Ok(body)
        } else {
            tracing::warn!("{} -> {}: {}", url, status, body.trim());
            Err(ClientError::from_response(status, &body))
        }
    }
}

impl EntryApi for ApiClient {
    async fn list_page(&self, page: u64) -> Result<EntryPage, ClientError> {
        let url = self.entries_url(page);
        let body = self.send(self.request(Method::GET, &url), &url).await?;
        serde_json::from_str(&body).map_err(|source| ClientError::Decode { url, source })
    }

    async fn get_entry(&self, id: &str) -> Result<String, ClientError> {
        let url = self.entry_url(id);
        self.send(self.request(Method::GET, &url), &url).await
    }

    async fn delete_entry(&self, id: &str) -> Result<(), ClientError> {
        let url = self.entry_url(id);
        self.send(self.request(Method::DELETE, &url), &url)
            .await
            .map(|_| ())
    }

    async fn create_entry(&self, entry: &NewEntry) -> Result<(), ClientError> {
        let url = self.submit_url();
        let payload = serde_json::to_string(entry).map_err(|source| ClientError::Decode {
            url: url.clone(),
            source,
        })?;
        let builder = self
            .request(Method::POST, &url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        self.send(builder, &url).await.map(|_| ())
    }
}
