//! Error taxonomy
//!
//! Only validation errors reach the user. Storage and asset errors are logged
//! at the boundary and replaced by a safe default.

use thiserror::Error;

/// Missing required fields on a guestbook submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    MissingName,
    #[error("Message is required")]
    MissingText,
}

/// Datastore connectivity or query failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Query failed: {0}")]
    Query(String),
}

/// Image or audio asset that could not be fetched/decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to load asset: {name}")]
pub struct AssetLoadError {
    pub name: String,
}

/// Failure of a gateway write
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to save message: {0}")]
    Storage(#[from] StorageError),
}
