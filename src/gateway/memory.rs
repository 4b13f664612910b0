//! In-process table store

use super::EntryBackend;
use super::model::{BackendInfo, Entry, Photo};
use crate::error::StorageError;

/// Entries and photos held in memory; ids are assigned in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Vec<Entry>,
    photos: Vec<Photo>,
    next_entry_id: u64,
    next_photo_id: u64,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a photo (there is no upload path through the gateway)
    pub fn add_photo(
        &mut self,
        title: &str,
        description: Option<&str>,
        image_url: &str,
        uploaded_at: f64,
    ) -> Photo {
        self.next_photo_id += 1;
        let photo = Photo {
            id: self.next_photo_id,
            title: title.to_string(),
            description: description.map(str::to_string),
            image_url: image_url.to_string(),
            uploaded_at,
        };
        self.photos.push(photo.clone());
        photo
    }
}

impl EntryBackend for MemoryBackend {
    fn insert_entry(&mut self, name: &str, message: &str, now: f64) -> Result<Entry, StorageError> {
        self.next_entry_id += 1;
        let entry = Entry {
            id: self.next_entry_id,
            name: name.to_string(),
            message: message.to_string(),
            created_at: now,
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }

    fn select_entries(&self) -> Result<Vec<Entry>, StorageError> {
        Ok(self.entries.clone())
    }

    fn select_photos(&self) -> Result<Vec<Photo>, StorageError> {
        Ok(self.photos.clone())
    }

    fn ping(&self, now: f64) -> Result<BackendInfo, StorageError> {
        Ok(BackendInfo {
            current_time: now,
            version: concat!("memory ", env!("CARGO_PKG_VERSION")).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase() {
        let mut backend = MemoryBackend::new();
        let a = backend.insert_entry("A", "hi", 1.0).unwrap();
        let b = backend.insert_entry("B", "yo", 1.0).unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(backend.select_entries().unwrap().len(), 2);
    }

    #[test]
    fn test_add_photo() {
        let mut backend = MemoryBackend::new();
        let photo = backend.add_photo("Cake", None, "/cake.png", 5.0);
        assert_eq!(photo.id, 1);
        assert_eq!(backend.select_photos().unwrap(), vec![photo]);
    }
}
