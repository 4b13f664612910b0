//! Guestbook persistence boundary
//!
//! Wraps an optional `EntryBackend`. With no backend configured the gateway
//! runs in demo mode: reads return built-in samples and writes are accepted
//! without being stored. Read failures are logged and become empty lists;
//! only write failures reach the caller.

mod memory;
mod model;

pub use memory::MemoryBackend;
pub use model::{BackendInfo, Entry, Photo};

use model::{sample_entries, sample_photos, sort_entries, sort_photos};

use crate::error::{GatewayError, StorageError, ValidationError};
use crate::platform::Clock;

/// A datastore that holds entries and photos
pub trait EntryBackend {
    fn insert_entry(&mut self, name: &str, message: &str, now: f64) -> Result<Entry, StorageError>;
    fn select_entries(&self) -> Result<Vec<Entry>, StorageError>;
    fn select_photos(&self) -> Result<Vec<Photo>, StorageError>;
    fn ping(&self, now: f64) -> Result<BackendInfo, StorageError>;
}

/// Datastore configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayConfig {
    pub database_url: Option<String>,
}

impl GatewayConfig {
    pub const ENV_VAR: &'static str = "DATABASE_URL";

    /// Read `DATABASE_URL`; empty counts as unset
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var(Self::ENV_VAR)
                .ok()
                .filter(|url| !url.trim().is_empty()),
        }
    }

    /// The browser build has no environment
    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn is_configured(&self) -> bool {
        self.database_url.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayStatus {
    Connected,
    DemoMode,
}

pub struct Gateway {
    backend: Option<Box<dyn EntryBackend>>,
    clock: Box<dyn Clock>,
}

impl Gateway {
    /// Build from configuration
    ///
    /// This build links no SQL driver, so a configured URL is served by an
    /// in-process `MemoryBackend`.
    pub fn new(config: &GatewayConfig, clock: Box<dyn Clock>) -> Self {
        if config.is_configured() {
            log::warn!("No SQL driver available, using in-memory guestbook store");
            Self::with_backend(Box::new(MemoryBackend::new()), clock)
        } else {
            log::info!("No datastore configured, guestbook running in demo mode");
            Self::demo(clock)
        }
    }

    pub fn with_backend(backend: Box<dyn EntryBackend>, clock: Box<dyn Clock>) -> Self {
        Self {
            backend: Some(backend),
            clock,
        }
    }

    pub fn demo(clock: Box<dyn Clock>) -> Self {
        Self {
            backend: None,
            clock,
        }
    }

    pub fn status(&self) -> GatewayStatus {
        if self.backend.is_some() {
            GatewayStatus::Connected
        } else {
            GatewayStatus::DemoMode
        }
    }

    /// Store a message
    ///
    /// Empty fields are rejected before anything is stored. Whitespace is
    /// kept as typed.
    pub fn submit_entry(&mut self, name: &str, text: &str) -> Result<(), GatewayError> {
        if name.is_empty() {
            return Err(ValidationError::MissingName.into());
        }
        if text.is_empty() {
            return Err(ValidationError::MissingText.into());
        }

        let now = self.clock.now_ms();
        match self.backend.as_mut() {
            None => {
                log::info!("Demo mode, message from {} not saved", name);
                Ok(())
            }
            Some(backend) => match backend.insert_entry(name, text, now) {
                Ok(entry) => {
                    log::info!("Saved message {} from {}", entry.id, entry.name);
                    Ok(())
                }
                Err(e) => {
                    log::error!("Error saving message: {}", e);
                    Err(e.into())
                }
            },
        }
    }

    /// All messages, newest first
    pub fn fetch_entries(&self) -> Vec<Entry> {
        let Some(backend) = self.backend.as_ref() else {
            return sample_entries(self.clock.now_ms());
        };
        match backend.select_entries() {
            Ok(mut entries) => {
                sort_entries(&mut entries);
                entries
            }
            Err(e) => {
                log::error!("Error fetching messages: {}", e);
                Vec::new()
            }
        }
    }

    /// All photos, newest first
    pub fn fetch_photos(&self) -> Vec<Photo> {
        let Some(backend) = self.backend.as_ref() else {
            return sample_photos(self.clock.now_ms());
        };
        match backend.select_photos() {
            Ok(mut photos) => {
                sort_photos(&mut photos);
                photos
            }
            Err(e) => {
                log::error!("Error fetching photos: {}", e);
                Vec::new()
            }
        }
    }

    /// Check that the datastore answers
    pub fn test_connection(&self) -> Result<BackendInfo, StorageError> {
        let backend = self.backend.as_ref().ok_or_else(|| {
            StorageError::Unavailable(format!("{} is not configured", GatewayConfig::ENV_VAR))
        })?;
        backend.ping(self.clock.now_ms()).inspect_err(|e| {
            log::error!("Database connection error: {}", e);
        })
    }
}
