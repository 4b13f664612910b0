//! Photo carousel state

use crate::gateway::Photo;

/// Shown when a photo image fails to load
pub const FALLBACK_IMAGE_URL: &str = "/placeholder.svg?height=400&width=600&text=Photo";
/// Thumbnail variant of the fallback
pub const THUMBNAIL_FALLBACK_URL: &str = "/placeholder.svg?height=96&width=96&text=Photo";
const PLACEHOLDER_URL: &str = "/placeholder.svg";

/// Current position in a photo list, plus the fullscreen flag
#[derive(Debug, Clone, Default)]
pub struct GalleryCursor {
    photos: Vec<Photo>,
    index: usize,
    fullscreen: bool,
}

impl GalleryCursor {
    pub fn new(photos: Vec<Photo>) -> Self {
        Self {
            photos,
            index: 0,
            fullscreen: false,
        }
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Photo> {
        self.photos.get(self.index)
    }

    /// Arrows and thumbnails only make sense with more than one photo
    pub fn has_navigation(&self) -> bool {
        self.photos.len() > 1
    }

    pub fn next(&mut self) {
        if !self.photos.is_empty() {
            self.index = (self.index + 1) % self.photos.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.photos.is_empty() {
            self.index = (self.index + self.photos.len() - 1) % self.photos.len();
        }
    }

    /// Jump to a thumbnail; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) {
        if index < self.photos.len() {
            self.index = index;
        }
    }

    /// "current / total", e.g. "2 / 3"
    pub fn counter_label(&self) -> String {
        if self.photos.is_empty() {
            return String::new();
        }
        format!("{} / {}", self.index + 1, self.photos.len())
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Fullscreen needs a photo to show
    pub fn open_fullscreen(&mut self) {
        self.fullscreen = !self.photos.is_empty();
    }

    pub fn close_fullscreen(&mut self) {
        self.fullscreen = false;
    }

    pub fn toggle_fullscreen(&mut self) {
        if self.fullscreen {
            self.close_fullscreen();
        } else {
            self.open_fullscreen();
        }
    }
}

/// URL to put in the `src` attribute; blank URLs use the bare placeholder
pub fn image_src(photo: &Photo) -> &str {
    if photo.image_url.is_empty() {
        PLACEHOLDER_URL
    } else {
        &photo.image_url
    }
}
