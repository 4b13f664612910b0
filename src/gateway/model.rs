//! Guestbook records and demo samples

use serde::{Deserialize, Serialize};

const HOUR_MS: f64 = 3_600_000.0;
const DAY_MS: f64 = 86_400_000.0;

/// A birthday message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: u64,
    pub name: String,
    pub message: String,
    /// ms since epoch
    pub created_at: f64,
}

/// A gallery photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    /// ms since epoch
    pub uploaded_at: f64,
}

/// Result of a connectivity check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendInfo {
    pub current_time: f64,
    pub version: String,
}

/// Newest first; equal timestamps put the higher id first
pub(crate) fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| {
        b.created_at
            .total_cmp(&a.created_at)
            .then(b.id.cmp(&a.id))
    });
}

pub(crate) fn sort_photos(photos: &mut [Photo]) {
    photos.sort_by(|a, b| {
        b.uploaded_at
            .total_cmp(&a.uploaded_at)
            .then(b.id.cmp(&a.id))
    });
}

pub(crate) fn sample_entries(now: f64) -> Vec<Entry> {
    vec![
        Entry {
            id: 1,
            name: "Player One".into(),
            message: "Happy Birthday! Level up to another amazing year! 🎮✨".into(),
            created_at: now,
        },
        Entry {
            id: 2,
            name: "Game Master".into(),
            message: "Wishing you power-ups, extra lives, and endless joy! 🍄🎂".into(),
            created_at: now - HOUR_MS,
        },
    ]
}

pub(crate) fn sample_photos(now: f64) -> Vec<Photo> {
    let photo = |id, title: &str, description: &str, text: &str, uploaded_at| Photo {
        id,
        title: title.into(),
        description: Some(description.into()),
        image_url: format!("/placeholder.svg?height=300&width=400&text={}", text),
        uploaded_at,
    };
    vec![
        photo(
            1,
            "Birthday Adventure",
            "Ready for another year of adventures!",
            "Birthday+Adventure",
            now,
        ),
        photo(
            2,
            "Level Complete",
            "Another year, another level mastered!",
            "Level+Complete",
            now - DAY_MS,
        ),
        photo(
            3,
            "Power-Up Moment",
            "Collecting memories like coins!",
            "Power+Up",
            now - 2.0 * DAY_MS,
        ),
    ]
}
