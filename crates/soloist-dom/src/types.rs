//! Node types for the in-memory document

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a document node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Element bounding box relative to the viewport, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f64,
    pub bottom: f64,
}

impl BoundingBox {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Whether the box lies fully inside a viewport of the given height
    pub fn within_viewport(&self, viewport_height: f64) -> bool {
        self.top >= 0.0 && self.bottom <= viewport_height
    }
}

/// A `<source>` declaration inside a media element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDecl {
    /// Source URL (possibly relative)
    pub src: String,
    /// Declared MIME type (empty if absent)
    pub mime_type: String,
}

impl SourceDecl {
    pub fn new(src: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// A non-source child of a media element (text track)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDecl {
    /// Track kind (e.g. "captions", "subtitles")
    pub kind: String,
    /// URL of the track file
    pub src: String,
    /// BCP-47 language code
    pub language: Option<String>,
}

impl TrackDecl {
    pub fn new(kind: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            src: src.into(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Media element state
///
/// Field set follows the host media element surface the coordinator touches:
/// playback flags, the src attribute, declared sources and tracks, classes
/// for selector matching, and a bounding box for scroll decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaElement {
    /// src attribute (distinct from `<source>` children)
    pub src: Option<String>,
    /// Declared `<source>` children
    pub sources: Vec<SourceDecl>,
    /// Non-source children preserved across cloning
    pub tracks: Vec<TrackDecl>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Paused flag; elements start paused
    pub paused: bool,
    /// Current playback position in seconds
    pub current_time: f64,
    /// Bounding box relative to the viewport
    pub bounding_box: BoundingBox,
}

impl Default for MediaElement {
    fn default() -> Self {
        Self {
            src: None,
            sources: Vec::new(),
            tracks: Vec::new(),
            classes: Vec::new(),
            paused: true,
            current_time: 0.0,
            bounding_box: BoundingBox::default(),
        }
    }
}

impl MediaElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_source(mut self, source: SourceDecl) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_track(mut self, track: TrackDecl) -> Self {
        self.tracks.push(track);
        self
    }

    pub fn with_bounding_box(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = bounding_box;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Structural copy with source declarations removed; tracks, classes and
    /// geometry carry over, playback state resets.
    pub fn clone_without_sources(&self) -> Self {
        Self {
            src: None,
            sources: Vec::new(),
            tracks: self.tracks.clone(),
            classes: self.classes.clone(),
            paused: true,
            current_time: 0.0,
            bounding_box: self.bounding_box,
        }
    }
}

/// Anchor element state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    /// href attribute
    pub href: String,
}

impl Anchor {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_without_sources_keeps_tracks() {
        let media = MediaElement::new()
            .with_class("lf-media")
            .with_source(SourceDecl::new("clip.m3u8", "application/vnd.apple.mpegurl"))
            .with_track(TrackDecl::new("captions", "clip.vtt").with_language("en"));

        let copy = media.clone_without_sources();
        assert!(copy.sources.is_empty());
        assert!(copy.src.is_none());
        assert_eq!(copy.tracks.len(), 1);
        assert_eq!(copy.tracks[0].kind, "captions");
        assert!(copy.has_class("lf-media"));
        assert!(copy.paused);
    }

    #[test]
    fn test_bounding_box_within_viewport() {
        assert!(BoundingBox::new(0.0, 400.0).within_viewport(800.0));
        assert!(BoundingBox::new(100.0, 800.0).within_viewport(800.0));
        assert!(!BoundingBox::new(-1.0, 400.0).within_viewport(800.0));
        assert!(!BoundingBox::new(500.0, 900.0).within_viewport(800.0));
    }
}
