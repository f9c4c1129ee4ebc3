//! Broadcast payloads: what an admin asks for and what gets sent

use crate::domain::traits::InlineKeyboard;
use std::fmt;

/// One size of an image as offered by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoVariant {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
}

impl PhotoVariant {
    pub fn new(file_id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            file_id: file_id.into(),
            width,
            height,
        }
    }

    fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Opaque reference to an image the transport already holds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(file_id: impl Into<String>) -> Self {
        Self(file_id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Pick the highest-resolution variant. Equal areas resolve to the later
    /// variant, since transports list sizes in ascending order.
    pub fn best_of(variants: &[PhotoVariant]) -> Option<Self> {
        variants
            .iter()
            .max_by_key(|v| v.area())
            .map(|v| ImageRef(v.file_id.clone()))
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lines to broadcast plus an optional image, built per command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastRequest {
    pub lines: Vec<String>,
    pub image: Option<ImageRef>,
}

impl BroadcastRequest {
    pub fn text(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            image: None,
        }
    }

    pub fn with_image(mut self, image: Option<ImageRef>) -> Self {
        self.image = image;
        self
    }
}

/// A fully composed outbound message. Consumed once by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage {
    pub caption: String,
    pub image: Option<ImageRef>,
    pub control: InlineKeyboard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_of_picks_largest_area() {
        let variants = vec![
            PhotoVariant::new("small", 90, 67),
            PhotoVariant::new("large", 1280, 960),
            PhotoVariant::new("medium", 320, 240),
        ];
        assert_eq!(ImageRef::best_of(&variants), Some(ImageRef::new("large")));
    }

    #[test]
    fn test_best_of_prefers_last_on_tie() {
        let variants = vec![
            PhotoVariant::new("first", 800, 600),
            PhotoVariant::new("second", 600, 800),
        ];
        assert_eq!(ImageRef::best_of(&variants), Some(ImageRef::new("second")));

        // Identical variants: the later one wins
        let variants = vec![
            PhotoVariant::new("first", 800, 600),
            PhotoVariant::new("second", 800, 600),
        ];
        assert_eq!(ImageRef::best_of(&variants), Some(ImageRef::new("second")));
    }

    #[test]
    fn test_best_of_empty() {
        assert_eq!(ImageRef::best_of(&[]), None);
    }
}
