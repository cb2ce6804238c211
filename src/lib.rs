//! Todo Sync Client Library
//!
//! Client adapter for the Todo Sync record API: typed per-resource
//! record access, a bulk-create wrapper, and collection definitions
//! for the todo application.

pub mod client;
pub mod collections;
pub mod config;
pub mod models;
pub mod records;

pub use client::Client;
pub use collections::{config_collection, generate_id, now, todo_collection, Collection};
pub use config::{Config, ConfigError};
pub use models::{ConfigEntry, Todo};
pub use records::{
    BulkRecordApi, HttpRecordApi, ListQuery, ListResponse, RecordApi, RecordError, RecordId,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
