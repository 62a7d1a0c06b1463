use crate::models::property::PropertyRecord;

/// Stock photo shown on cards when a record carries no first image.
pub const FALLBACK_IMAGE: &str = "https://images.pexels.com/photos/1029599/pexels-photo-1029599.jpeg?auto=compress&cs=tinysrgb&w=800&h=600&dpr=2";

/// Thumbnail for a listing card: the first image slot, or the stock photo.
pub fn card_image(record: &PropertyRecord) -> &str {
    record.image1.as_deref().unwrap_or(FALLBACK_IMAGE)
}

/// Navigable cursor over a record's defined images.
///
/// Navigation is circular: stepping past the last image wraps to the first
/// and vice versa. An empty gallery keeps `current()` at `None` and the
/// view renders its no-images placeholder instead.
#[derive(Debug, Clone)]
pub struct Gallery {
    images: Vec<String>,
    current: usize,
}

impl Gallery {
    pub fn for_record(record: &PropertyRecord) -> Gallery {
        Gallery::from_images(record.image_slots().into_iter().map(str::to_string).collect())
    }

    pub fn from_images(images: Vec<String>) -> Gallery {
        Gallery { images, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// The image under the cursor, `None` for an empty gallery.
    pub fn current(&self) -> Option<&str> {
        self.images.get(self.current).map(String::as_str)
    }

    /// Zero-based cursor position.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn next(&mut self) {
        if !self.images.is_empty() {
            self.current = (self.current + 1) % self.images.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.images.is_empty() {
            self.current = (self.current + self.images.len() - 1) % self.images.len();
        }
    }

    /// Jumps to a thumbnail; out-of-range indexes are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.images.len() {
            self.current = index;
        }
    }

    /// `"2 / 6"`-style counter for the image overlay.
    pub fn counter(&self) -> String {
        format!("{} / {}", self.current + 1, self.images.len())
    }
}
