//! Record API error types.

use thiserror::Error;

/// Errors that can occur during record API operations.
#[derive(Error, Debug)]
pub enum RecordError {
    /// Sync server is not configured
    #[error("Sync not configured. Add server_url to config.")]
    NotConfigured,

    /// Request never reached the server or produced no response
    #[error("Request failed: {0}")]
    Transport(String),

    /// Server answered with a non-success status
    #[error("Server returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Record does not exist on the server
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),
}
