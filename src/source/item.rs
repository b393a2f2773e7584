//! The image record shared by every listing source.
//!
//! `Item` is what one entry of a listing page decodes into.  Sources convert
//! their wire format into `Item`s so the gallery logic (de-duplication,
//! rendering, list mutation) never needs to know where they came from.

use std::fmt;

use serde::Deserialize;

/// Base address for derived image URLs.
const IMAGE_BASE: &str = "https://picsum.photos/id";

/// Opaque, source-assigned identifier.
///
/// The listing endpoint has served ids both as JSON strings and as numbers;
/// both normalise to the same textual form so `"5"` and `5` are one image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawId")]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for ItemId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        }
    }
}

/// A single image entry from a listing page.
///
/// Extra fields on the wire (`width`, `height`, `download_url`, ...) are
/// ignored.  Uniqueness is defined by `id` alone.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Photographer's name, shown on the card and in like messages.
    pub author: String,
    /// Link to the original photo page.
    pub url: String,
}

impl Item {
    /// Address of a resized rendition of this image.
    ///
    /// Only the address is derived here; fetching the bytes is left to
    /// whatever displays them.
    pub fn image_url(&self, width: u32, height: u32) -> String {
        format!("{IMAGE_BASE}/{}/{width}/{height}", self.id)
    }
}
