//! Board content: the things players try to pair up.
//!
//! An `Item` is identified by its locator (a URL or path). Two tiles match
//! when they reference items with the same locator; the media kind only
//! tells a renderer how to present it.

use serde::{Deserialize, Serialize};

/// File extensions treated as motion clips when inferring a kind.
const CLIP_EXTENSIONS: [&str; 4] = ["webm", "mp4", "mov", "ogv"];

/// How an item is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaKind {
    /// A still image.
    StillImage,
    /// A looping video clip, played while face up.
    MotionClip,
}

impl MediaKind {
    /// Guess the kind from a locator's extension.
    ///
    /// Query strings and fragments are ignored. Anything unrecognised is a
    /// still image.
    #[must_use]
    pub fn infer(locator: &str) -> Self {
        let path = locator
            .split(|c| c == '?' || c == '#')
            .next()
            .unwrap_or(locator);

        let is_clip = path
            .rsplit_once('.')
            .map(|(_, ext)| {
                CLIP_EXTENSIONS
                    .iter()
                    .any(|clip| ext.eq_ignore_ascii_case(clip))
            })
            .unwrap_or(false);

        if is_clip {
            MediaKind::MotionClip
        } else {
            MediaKind::StillImage
        }
    }
}

/// A distinct piece of content used to form a matching pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// Source locator. Identity of the item.
    pub locator: String,
    /// Presentation kind.
    pub kind: MediaKind,
}

impl Item {
    /// Create an item with an explicit kind.
    pub fn new(locator: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            locator: locator.into(),
            kind,
        }
    }

    /// Create an item, inferring the kind from the locator.
    pub fn from_locator(locator: impl Into<String>) -> Self {
        let locator = locator.into();
        let kind = MediaKind::infer(&locator);
        Self { locator, kind }
    }

    /// Whether two items count as the same pair.
    #[must_use]
    pub fn same_content(&self, other: &Item) -> bool {
        self.locator == other.locator
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.locator)
    }
}
