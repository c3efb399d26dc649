/// API route handlers
///
/// Handlers are thin: decode and validate the request, call the resource
/// layer, wrap the result in one of the response envelopes below.
///
/// - `health`: health check endpoint
/// - `auth`: registration, login, token refresh
/// - `users`: account listing and management
/// - `boards`: board CRUD
/// - `tasks`: task CRUD

pub mod auth;
pub mod boards;
pub mod health;
pub mod tasks;
pub mod users;

use serde::{Deserialize, Serialize};
use taskboard_shared::resources::{DataSource, Sourced};

/// Envelope for reads that report where they were answered from
///
/// `source` is `"cache"` or `"db"` on the wire.
#[derive(Debug, Serialize, Deserialize)]
pub struct SourcedResponse<T> {
    /// The payload
    pub data: T,

    /// Which tier answered
    pub source: DataSource,
}

impl<T> From<Sourced<T>> for SourcedResponse<T> {
    fn from(sourced: Sourced<T>) -> Self {
        Self {
            data: sourced.data,
            source: sourced.source,
        }
    }
}

/// Envelope for writes returning the affected resource
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    /// The payload
    pub data: T,
}

impl<T> DataResponse<T> {
    /// Wraps a payload
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Envelope for deletes
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

impl MessageResponse {
    /// Wraps a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
