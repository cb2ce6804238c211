//! Record API surface for the Todo Sync server.
//!
//! This module provides typed per-resource record access:
//! - [`RecordApi`] - the shape of the server's record surface for one
//!   named resource (create/read/update/delete/list)
//! - [`HttpRecordApi`] - the HTTP-backed implementation
//! - [`BulkRecordApi`] - a wrapper adding `create_bulk` to any record
//!   API by delegating every original operation
//!
//! The server assigns record ids at creation time; [`RecordId`]
//! accepts both integer and string ids.

mod api;
mod bulk;
mod error;

pub use api::{HttpRecordApi, ListQuery, ListResponse, RecordApi, RecordId};
pub use bulk::BulkRecordApi;
pub use error::RecordError;
