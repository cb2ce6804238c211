//! Per-resource record access over HTTP.
//!
//! [`RecordApi`] is the shape of the server's record surface for one
//! named resource; [`HttpRecordApi`] is the reqwest-backed
//! implementation. Anything implementing the trait can be decorated
//! with [`BulkRecordApi`](super::BulkRecordApi).

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::RecordError;

/// Identifier assigned by the server when a record is created.
///
/// The backing store hands out either integer row ids or string ids,
/// so both wire shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Str(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Str(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId::Str(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Str(id.to_string())
    }
}

/// Query parameters for [`RecordApi::list`].
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Maximum number of records to return
    pub limit: Option<usize>,
    /// Opaque cursor from a previous page
    pub cursor: Option<String>,
    /// Sort order, e.g. `-created_at`
    pub order: Option<String>,
}

/// One page of [`RecordApi::list`] results.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    pub records: Vec<T>,
    /// Cursor for the next page, absent on the last one
    #[serde(default)]
    pub cursor: Option<String>,
}

/// Record access for one named resource.
///
/// Create, read, update, delete, and list over records of the
/// resource this instance is bound to. Identifiers are assigned by
/// the server at creation time.
#[async_trait]
pub trait RecordApi<T: Send + Sync>: Send + Sync {
    /// Creates one record and returns its server-assigned id.
    async fn create(&self, record: &T) -> Result<RecordId, RecordError>;

    /// Reads the record with the given id.
    async fn read(&self, id: &RecordId) -> Result<T, RecordError>;

    /// Replaces the record with the given id.
    async fn update(&self, id: &RecordId, record: &T) -> Result<(), RecordError>;

    /// Deletes the record with the given id.
    async fn delete(&self, id: &RecordId) -> Result<(), RecordError>;

    /// Lists records, one page per call.
    async fn list(&self, query: &ListQuery) -> Result<ListResponse<T>, RecordError>;
}

/// Response from the create endpoint.
#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: RecordId,
}

/// HTTP implementation of [`RecordApi`] bound to one resource on a
/// Todo Sync server.
///
/// Records live under `{base_url}/api/records/v1/{name}`. Requests
/// carry the API key as a bearer token when one is set.
#[derive(Debug, Clone)]
pub struct HttpRecordApi<T> {
    http: reqwest::Client,
    base_url: String,
    name: String,
    api_key: Option<String>,
    _record: PhantomData<fn() -> T>,
}

impl<T> HttpRecordApi<T> {
    /// Creates a record API for the named resource.
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        name: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            name: name.into(),
            api_key,
            _record: PhantomData,
        }
    }

    /// Returns the resource name this API is bound to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL of the resource's record collection.
    fn records_url(&self) -> String {
        format!("{}/api/records/v1/{}", self.base_url, self.name)
    }

    /// URL of a single record.
    fn record_url(&self, id: &RecordId) -> String {
        format!("{}/{}", self.records_url(), id)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    /// Maps non-success responses to errors; 404 becomes `NotFound`
    /// when a record id is in play.
    async fn ok_or_status(
        &self,
        response: reqwest::Response,
        id: Option<&RecordId>,
    ) -> Result<reqwest::Response, RecordError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(RecordError::NotFound(format!("{}/{}", self.name, id)));
            }
        }
        let message = response.text().await.unwrap_or_default();
        tracing::debug!(
            "Record API request for '{}' failed with status {}",
            self.name,
            status
        );
        Err(RecordError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl<T> RecordApi<T> for HttpRecordApi<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn create(&self, record: &T) -> Result<RecordId, RecordError> {
        let response = self
            .apply_auth(self.http.post(self.records_url()))
            .json(record)
            .send()
            .await
            .map_err(|e| RecordError::Transport(e.to_string()))?;

        let response = self.ok_or_status(response, None).await?;
        let created: CreateResponse = response
            .json()
            .await
            .map_err(|e| RecordError::Decode(e.to_string()))?;

        Ok(created.id)
    }

    async fn read(&self, id: &RecordId) -> Result<T, RecordError> {
        let response = self
            .apply_auth(self.http.get(self.record_url(id)))
            .send()
            .await
            .map_err(|e| RecordError::Transport(e.to_string()))?;

        let response = self.ok_or_status(response, Some(id)).await?;
        response
            .json()
            .await
            .map_err(|e| RecordError::Decode(e.to_string()))
    }

    async fn update(&self, id: &RecordId, record: &T) -> Result<(), RecordError> {
        let response = self
            .apply_auth(self.http.patch(self.record_url(id)))
            .json(record)
            .send()
            .await
            .map_err(|e| RecordError::Transport(e.to_string()))?;

        self.ok_or_status(response, Some(id)).await?;
        Ok(())
    }

    async fn delete(&self, id: &RecordId) -> Result<(), RecordError> {
        let response = self
            .apply_auth(self.http.delete(self.record_url(id)))
            .send()
            .await
            .map_err(|e| RecordError::Transport(e.to_string()))?;

        self.ok_or_status(response, Some(id)).await?;
        Ok(())
    }

    async fn list(&self, query: &ListQuery) -> Result<ListResponse<T>, RecordError> {
        let mut request = self.apply_auth(self.http.get(self.records_url()));
        if let Some(limit) = query.limit {
            request = request.query(&[("limit", limit.to_string())]);
        }
        if let Some(cursor) = &query.cursor {
            request = request.query(&[("cursor", cursor.as_str())]);
        }
        if let Some(order) = &query.order {
            request = request.query(&[("order", order.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RecordError::Transport(e.to_string()))?;

        let response = self.ok_or_status(response, None).await?;
        response
            .json()
            .await
            .map_err(|e| RecordError::Decode(e.to_string()))
    }
}
