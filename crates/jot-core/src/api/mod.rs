//! REST client for the remote notes service.
//!
//! Every call resolves the collection URL from configuration first, so the
//! client never holds on to a stale base URL.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::{notes_collection_url, ConfigSource, EnvConfig};
use crate::error::{Error, Result};
use crate::models::{Note, NoteCreateRequest, NoteId};
use crate::util::compact_text;


const JSON_CONTENT_TYPE: &str = "application/json";

/// Note operations offered by the notes service.
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// All notes, in the order the service returns them.
    async fn list(&self) -> Result<Vec<Note>>;

    /// Create a note; the service assigns id and timestamps.
    async fn create(&self, payload: &NoteCreateRequest) -> Result<Note>;

    /// Replace title and content of the note with `id`.
    async fn update(&self, id: &NoteId, payload: &NoteCreateRequest) -> Result<Note>;

    /// Delete the note with `id`.
    async fn remove(&self, id: &NoteId) -> Result<()>;
}

#[async_trait]
impl<T: NotesApi + ?Sized> NotesApi for Arc<T> {
    async fn list(&self) -> Result<Vec<Note>> {
        (**self).list().await
    }

    async fn create(&self, payload: &NoteCreateRequest) -> Result<Note> {
        (**self).create(payload).await
    }

    async fn update(&self, id: &NoteId, payload: &NoteCreateRequest) -> Result<Note> {
        (**self).update(id, payload).await
    }

    async fn remove(&self, id: &NoteId) -> Result<()> {
        (**self).remove(id).await
    }
}

/// [`NotesApi`] over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpNotesApi {
    client: reqwest::Client,
    config: Arc<dyn ConfigSource>,
    headers: HeaderMap,
}

impl HttpNotesApi {
    /// Builds a client that resolves its base URL from `config`.
    pub fn new(config: impl ConfigSource + 'static) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(config, client))
    }

    /// Builds a client that reads the process environment on every call.
    pub fn from_env() -> Result<Self> {
        Self::new(EnvConfig)
    }

    /// Builds a client around an existing `reqwest::Client`.
    pub fn with_client(config: impl ConfigSource + 'static, client: reqwest::Client) -> Self {
        Self {
            client,
            config: Arc::new(config),
            headers: HeaderMap::new(),
        }
    }

    /// Merge extra headers into every request.
    ///
    /// `Content-Type` is part of the service contract and is never replaced.
    #[must_use]
    pub fn with_headers(mut self, headers: &HeaderMap) -> Self {
        for (name, value) in headers {
            if name == CONTENT_TYPE {
                continue;
            }
            self.headers.insert(name.clone(), value.clone());
        }
        self
    }

    /// Current collection endpoint URL.
    pub fn collection_url(&self) -> Result<String> {
        notes_collection_url(self.config.as_ref())
    }

    fn item_url(&self, id: &NoteId) -> Result<String> {
        Ok(format!(
            "{}/{}",
            self.collection_url()?,
            urlencoding::encode(id.as_str())
        ))
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&NoteCreateRequest>,
    ) -> Result<reqwest::Response> {
        tracing::debug!(%method, url, "notes api request");

        let mut request = self
            .client
            .request(method.clone(), url)
            .headers(self.headers.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() || status.is_redirection() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(
            %method,
            url,
            status = status.as_u16(),
            body = %compact_text(&body),
            "notes api request failed"
        );
        Err(Error::Http {
            status: status.as_u16(),
            body,
        })
    }

    /// Sends a request and decodes its JSON body; `None` on 204.
    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<&NoteCreateRequest>,
    ) -> Result<Option<T>> {
        let response = self.send(method, url, body).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|error| Error::Decode(error.to_string()))
    }
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    async fn list(&self) -> Result<Vec<Note>> {
        let url = self.collection_url()?;
        Ok(self
            .send_json::<Vec<Note>>(Method::GET, &url, None)
            .await?
            .unwrap_or_default())
    }

    async fn create(&self, payload: &NoteCreateRequest) -> Result<Note> {
        let url = self.collection_url()?;
        self.send_json(Method::POST, &url, Some(payload))
            .await?
            .ok_or(Error::EmptyResponse("create"))
    }

    async fn update(&self, id: &NoteId, payload: &NoteCreateRequest) -> Result<Note> {
        let url = self.item_url(id)?;
        self.send_json(Method::PUT, &url, Some(payload))
            .await?
            .ok_or(Error::EmptyResponse("update"))
    }

    async fn remove(&self, id: &NoteId) -> Result<()> {
        let url = self.item_url(id)?;
        self.send(Method::DELETE, &url, None).await?;
        Ok(())
    }
}
