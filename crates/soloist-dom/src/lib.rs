//! Soloist DOM - Document abstraction for playback coordination
//!
//! The coordinator in `soloist-core` never touches a rendered page directly.
//! Everything it needs from the document goes through the [`Document`] trait:
//! - media element and anchor enumeration in document order
//! - document-order comparison between nodes
//! - playback mutation (pause, play, currentTime)
//! - structural mutation (clone without sources, replace in place)
//! - geometry and scrolling (bounding box, viewport height, scroll-into-view)
//!
//! [`MemoryDocument`] is a complete in-memory implementation, so the whole
//! coordination core is testable without a browser.

pub mod error;
pub mod memory;
pub mod types;

pub use error::{DomError, Result};
pub use memory::MemoryDocument;
pub use types::{Anchor, BoundingBox, MediaElement, NodeId, SourceDecl, TrackDecl};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Document access surface consumed by the playback coordinator.
///
/// Implementations must enumerate nodes in document order and keep that
/// order stable across calls; `precedes` is the single source of truth for
/// the seek navigator's nearest-preceding-element rule.
pub trait Document {
    /// All media elements, in document order.
    fn media_elements(&self) -> Vec<NodeId>;

    /// All anchor elements, in document order.
    fn anchors(&self) -> Vec<NodeId>;

    /// Whether the element carries the given class.
    fn has_class(&self, id: NodeId, class: &str) -> bool;

    /// True if `a` comes before `b` in document order.
    ///
    /// Detached nodes precede nothing and nothing precedes them.
    fn precedes(&self, a: NodeId, b: NodeId) -> bool;

    /// The anchor's href, if `id` is an anchor in the document.
    fn anchor_href(&self, id: NodeId) -> Option<&str>;

    /// Source declarations of a media element (empty if none or unknown).
    fn media_sources(&self, id: NodeId) -> Vec<SourceDecl>;

    /// Whether the media element is paused. Unknown nodes read as paused.
    fn is_paused(&self, id: NodeId) -> bool;

    /// Current playback position, if `id` is a media element.
    fn current_time(&self, id: NodeId) -> Option<f64>;

    /// Pause the media element.
    fn pause(&mut self, id: NodeId) -> Result<()>;

    /// Start playback of the media element.
    fn play(&mut self, id: NodeId) -> Result<()>;

    /// Set the playback position. The value is not validated; a NaN is
    /// stored as-is, matching host media element behavior.
    fn set_current_time(&mut self, id: NodeId, time: f64) -> Result<()>;

    /// Structural copy of a media element with all source declarations
    /// removed and non-source children (text tracks) preserved. The clone is
    /// detached until inserted via [`Document::replace_media`].
    fn clone_media_without_sources(&mut self, id: NodeId) -> Result<NodeId>;

    /// Set the element's src attribute.
    fn set_media_src(&mut self, id: NodeId, src: &str) -> Result<()>;

    /// Replace `old` with `new` at the same document position. `old` is
    /// detached and no longer enumerable; `new` must be a detached node.
    fn replace_media(&mut self, old: NodeId, new: NodeId) -> Result<()>;

    /// Bounding box of the element relative to the viewport.
    fn bounding_box(&self, id: NodeId) -> Option<BoundingBox>;

    /// Height of the viewport in CSS pixels.
    fn viewport_height(&self) -> f64;

    /// Scroll the element into view.
    fn scroll_into_view(&mut self, id: NodeId) -> Result<()>;
}
