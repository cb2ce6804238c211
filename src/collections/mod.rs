//! Collection definitions for the todo application.
//!
//! The app wires each server resource to a collection: a record API
//! plus a key extractor. The reactive store that consumes these lives
//! outside this crate; a [`Collection`] carries exactly that pair and
//! the common record operations expressed through it.
//!
//! The shared [`Client`] is passed in explicitly by the composition
//! root - there is no module-level client.

use rand::Rng;

use crate::client::Client;
use crate::models::{ConfigEntry, Todo};
use crate::records::{
    BulkRecordApi, HttpRecordApi, ListQuery, RecordApi, RecordError, RecordId,
};

/// Key extractor for collection items.
pub type KeyFn<T> = fn(&T) -> RecordId;

/// A named collection backed by a record API.
pub struct Collection<T, A> {
    record_api: BulkRecordApi<A>,
    get_key: KeyFn<T>,
}

impl<T, A> Collection<T, A>
where
    T: Send + Sync,
    A: RecordApi<T>,
{
    /// Binds a record API to a key extractor.
    pub fn new(record_api: BulkRecordApi<A>, get_key: KeyFn<T>) -> Self {
        Self {
            record_api,
            get_key,
        }
    }

    /// Returns the key of an item.
    pub fn key_of(&self, item: &T) -> RecordId {
        (self.get_key)(item)
    }

    /// Returns the underlying record API.
    pub fn record_api(&self) -> &BulkRecordApi<A> {
        &self.record_api
    }

    /// Creates one item and returns its server-assigned id.
    pub async fn insert(&self, item: &T) -> Result<RecordId, RecordError> {
        self.record_api.create(item).await
    }

    /// Creates many items sequentially; ids come back in input order.
    pub async fn insert_many(&self, items: &[T]) -> Result<Vec<RecordId>, RecordError> {
        self.record_api.create_bulk(items).await
    }

    /// Reads the item with the given id.
    pub async fn get(&self, id: &RecordId) -> Result<T, RecordError> {
        self.record_api.read(id).await
    }

    /// Replaces the item with the given id.
    pub async fn update(&self, id: &RecordId, item: &T) -> Result<(), RecordError> {
        self.record_api.update(id, item).await
    }

    /// Deletes the item with the given id.
    pub async fn remove(&self, id: &RecordId) -> Result<(), RecordError> {
        self.record_api.delete(id).await
    }

    /// Fetches every item, following list cursors to the end.
    pub async fn fetch_all(&self) -> Result<Vec<T>, RecordError> {
        let mut items = Vec::new();
        let mut query = ListQuery::default();
        loop {
            let mut page = self.record_api.list(&query).await?;
            if page.records.is_empty() {
                break;
            }
            items.append(&mut page.records);
            match page.cursor {
                Some(cursor) => query.cursor = Some(cursor),
                None => break,
            }
        }
        Ok(items)
    }
}

/// Collection of todos on the `todos` resource.
pub fn todo_collection(client: &Client) -> Collection<Todo, HttpRecordApi<Todo>> {
    Collection::new(client.records("todos"), |todo| {
        RecordId::Int(todo.id.unwrap_or(-1))
    })
}

/// Collection of settings on the `config` resource.
pub fn config_collection(client: &Client) -> Collection<ConfigEntry, HttpRecordApi<ConfigEntry>> {
    Collection::new(client.records("config"), |entry| {
        RecordId::Int(entry.id.unwrap_or(-1))
    })
}

/// Current unix time in seconds.
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Random client-side id for items the server has not numbered yet.
pub fn generate_id() -> i64 {
    rand::rng().random_range(0..=1_000_000)
}
