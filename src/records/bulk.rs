//! Bulk-create decoration for record APIs.

use async_trait::async_trait;

use super::api::{ListQuery, ListResponse, RecordApi, RecordId};
use super::error::RecordError;

/// A record API augmented with a bulk-create operation.
///
/// The server has no multi-row insert, so [`create_bulk`] issues the
/// underlying single-record creates one at a time and collects the
/// assigned ids. Every original operation delegates to the wrapped
/// instance unchanged.
///
/// [`create_bulk`]: BulkRecordApi::create_bulk
#[derive(Debug, Clone)]
pub struct BulkRecordApi<A> {
    inner: A,
}

impl<A> BulkRecordApi<A> {
    /// Wraps an existing record API.
    pub fn wrap(inner: A) -> Self {
        Self { inner }
    }

    /// Returns the wrapped record API.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Unwraps back into the original record API.
    pub fn into_inner(self) -> A {
        self.inner
    }

    /// Creates every record in input order and returns the assigned
    /// ids, also in input order.
    ///
    /// Creates run strictly one at a time; each is awaited before the
    /// next starts. The first failure aborts the remaining records and
    /// propagates unchanged. Records created before the failure stay
    /// created - there is no rollback.
    pub async fn create_bulk<T>(&self, records: &[T]) -> Result<Vec<RecordId>, RecordError>
    where
        A: RecordApi<T>,
        T: Send + Sync,
    {
        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            ids.push(self.inner.create(record).await?);
        }
        Ok(ids)
    }
}

#[async_trait]
impl<T, A> RecordApi<T> for BulkRecordApi<A>
where
    T: Send + Sync,
    A: RecordApi<T>,
{
    async fn create(&self, record: &T) -> Result<RecordId, RecordError> {
        self.inner.create(record).await
    }

    async fn read(&self, id: &RecordId) -> Result<T, RecordError> {
        self.inner.read(id).await
    }

    async fn update(&self, id: &RecordId, record: &T) -> Result<(), RecordError> {
        self.inner.update(id, record).await
    }

    async fn delete(&self, id: &RecordId) -> Result<(), RecordError> {
        self.inner.delete(id).await
    }

    async fn list(&self, query: &ListQuery) -> Result<ListResponse<T>, RecordError> {
        self.inner.list(query).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Record API over an in-memory list, with an optional poison
    /// record that fails to create.
    #[derive(Debug, Default)]
    struct MemoryApi {
        records: Mutex<Vec<String>>,
        create_calls: AtomicUsize,
        fail_on: Option<String>,
    }

    impl MemoryApi {
        fn failing_on(text: &str) -> Self {
            Self {
                fail_on: Some(text.to_string()),
                ..Default::default()
            }
        }

        fn created(&self) -> Vec<String> {
            self.records.lock().unwrap().clone()
        }

        fn create_calls(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RecordApi<String> for MemoryApi {
        async fn create(&self, record: &String) -> Result<RecordId, RecordError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on.as_deref() == Some(record.as_str()) {
                return Err(RecordError::Status {
                    status: 422,
                    message: format!("rejected: {}", record),
                });
            }
            let mut records = self.records.lock().unwrap();
            records.push(record.clone());
            Ok(RecordId::Int(records.len() as i64))
        }

        async fn read(&self, id: &RecordId) -> Result<String, RecordError> {
            let index = match id {
                RecordId::Int(id) => *id as usize,
                RecordId::Str(_) => return Err(RecordError::NotFound(id.to_string())),
            };
            self.records
                .lock()
                .unwrap()
                .get(index.wrapping_sub(1))
                .cloned()
                .ok_or_else(|| RecordError::NotFound(id.to_string()))
        }

        async fn update(&self, id: &RecordId, record: &String) -> Result<(), RecordError> {
            let index = match id {
                RecordId::Int(id) => *id as usize,
                RecordId::Str(_) => return Err(RecordError::NotFound(id.to_string())),
            };
            let mut records = self.records.lock().unwrap();
            match records.get_mut(index.wrapping_sub(1)) {
                Some(slot) => {
                    *slot = record.clone();
                    Ok(())
                }
                None => Err(RecordError::NotFound(id.to_string())),
            }
        }

        async fn delete(&self, id: &RecordId) -> Result<(), RecordError> {
            let index = match id {
                RecordId::Int(id) => *id as usize,
                RecordId::Str(_) => return Err(RecordError::NotFound(id.to_string())),
            };
            let mut records = self.records.lock().unwrap();
            if index == 0 || index > records.len() {
                return Err(RecordError::NotFound(id.to_string()));
            }
            records.remove(index - 1);
            Ok(())
        }

        async fn list(&self, query: &ListQuery) -> Result<ListResponse<String>, RecordError> {
            let records = self.records.lock().unwrap();
            let limit = query.limit.unwrap_or(records.len());
            Ok(ListResponse {
                records: records.iter().take(limit).cloned().collect(),
                cursor: None,
            })
        }
    }

    #[tokio::test]
    async fn test_create_bulk_returns_ids_in_input_order() {
        let api = BulkRecordApi::wrap(MemoryApi::default());

        let ids = api
            .create_bulk(&["a".to_string(), "b".to_string(), "c".to_string()])
            .await
            .unwrap();

        assert_eq!(
            ids,
            vec![RecordId::Int(1), RecordId::Int(2), RecordId::Int(3)]
        );
        assert_eq!(api.inner().created(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_create_bulk_empty_input_issues_no_calls() {
        let api = BulkRecordApi::wrap(MemoryApi::default());

        let ids = api.create_bulk(&[]).await.unwrap();

        assert!(ids.is_empty());
        assert_eq!(api.inner().create_calls(), 0);
    }

    #[tokio::test]
    async fn test_create_bulk_stops_at_first_failure() {
        let api = BulkRecordApi::wrap(MemoryApi::failing_on("b"));

        let result = api
            .create_bulk(&["a".to_string(), "b".to_string(), "c".to_string()])
            .await;

        match result {
            Err(RecordError::Status { status, message }) => {
                assert_eq!(status, 422);
                assert_eq!(message, "rejected: b");
            }
            other => panic!("Expected status error, got {:?}", other),
        }
        // "a" stays created, "c" was never attempted.
        assert_eq!(api.inner().created(), vec!["a"]);
        assert_eq!(api.inner().create_calls(), 2);
    }

    #[tokio::test]
    async fn test_wrapped_operations_match_unwrapped() {
        let api = BulkRecordApi::wrap(MemoryApi::default());
        let id = api.create(&"a".to_string()).await.unwrap();

        // Reading through the wrapper and through the inner instance
        // must give the same answer.
        let through_wrapper = api.read(&id).await.unwrap();
        let through_inner = api.inner().read(&id).await.unwrap();
        assert_eq!(through_wrapper, through_inner);

        api.update(&id, &"a2".to_string()).await.unwrap();
        assert_eq!(api.inner().read(&id).await.unwrap(), "a2");

        let listed = api.list(&ListQuery::default()).await.unwrap();
        assert_eq!(listed.records, vec!["a2"]);

        api.delete(&id).await.unwrap();
        assert!(api.inner().created().is_empty());
    }
}
