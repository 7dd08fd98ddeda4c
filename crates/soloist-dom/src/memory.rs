//! In-memory document
//!
//! A flat, document-ordered node store implementing [`Document`]. Stands in
//! for a rendered page in tests and headless hosts: playback and structural
//! mutations update plain state, and scroll-into-view calls are recorded so
//! scroll behavior can be asserted.

use crate::error::{DomError, Result};
use crate::types::{Anchor, BoundingBox, MediaElement, NodeId, SourceDecl};
use crate::Document;
use std::collections::HashMap;
use tracing::debug;

/// Node payload
#[derive(Debug, Clone)]
enum NodeData {
    Media(MediaElement),
    Anchor(Anchor),
}

/// In-memory [`Document`] implementation
///
/// Nodes appended via `append_media`/`append_anchor` are attached in
/// insertion order, which is the document order. Clones produced by
/// [`Document::clone_media_without_sources`] stay detached until they take
/// an attached node's place through [`Document::replace_media`]; the
/// replaced node is discarded.
#[derive(Debug)]
pub struct MemoryDocument {
    /// All live nodes, attached or detached
    nodes: HashMap<NodeId, NodeData>,
    /// Attached nodes in document order
    order: Vec<NodeId>,
    /// Viewport height in CSS pixels
    viewport_height: f64,
    /// Recorded scroll-into-view calls, in call order
    scroll_log: Vec<NodeId>,
}

impl MemoryDocument {
    /// Create an empty document with the given viewport height
    pub fn new(viewport_height: f64) -> Self {
        Self {
            nodes: HashMap::new(),
            order: Vec::new(),
            viewport_height,
            scroll_log: Vec::new(),
        }
    }

    /// Append a media element at the end of the document
    pub fn append_media(&mut self, media: MediaElement) -> NodeId {
        let id = NodeId::new();
        self.nodes.insert(id, NodeData::Media(media));
        self.order.push(id);
        id
    }

    /// Append an anchor at the end of the document
    pub fn append_anchor(&mut self, anchor: Anchor) -> NodeId {
        let id = NodeId::new();
        self.nodes.insert(id, NodeData::Anchor(anchor));
        self.order.push(id);
        id
    }

    /// Whether the node exists and sits in the document tree
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.order.contains(&id)
    }

    /// Media element state, if `id` is a live media node
    pub fn media(&self, id: NodeId) -> Option<&MediaElement> {
        match self.nodes.get(&id) {
            Some(NodeData::Media(media)) => Some(media),
            _ => None,
        }
    }

    /// Attached media elements currently playing, in document order
    pub fn playing_elements(&self) -> Vec<NodeId> {
        self.order
            .iter()
            .copied()
            .filter(|id| matches!(self.nodes.get(id), Some(NodeData::Media(m)) if !m.paused))
            .collect()
    }

    /// Scroll-into-view calls recorded so far
    pub fn scroll_calls(&self) -> &[NodeId] {
        &self.scroll_log
    }

    fn media_mut(&mut self, id: NodeId) -> Result<&mut MediaElement> {
        match self.nodes.get_mut(&id) {
            Some(NodeData::Media(media)) => Ok(media),
            Some(_) => Err(DomError::NotMedia(id)),
            None => Err(DomError::UnknownNode(id)),
        }
    }

    fn position(&self, id: NodeId) -> Option<usize> {
        self.order.iter().position(|&n| n == id)
    }
}

impl Document for MemoryDocument {
    fn media_elements(&self) -> Vec<NodeId> {
        self.order
            .iter()
            .copied()
            .filter(|id| matches!(self.nodes.get(id), Some(NodeData::Media(_))))
            .collect()
    }

    fn anchors(&self) -> Vec<NodeId> {
        self.order
            .iter()
            .copied()
            .filter(|id| matches!(self.nodes.get(id), Some(NodeData::Anchor(_))))
            .collect()
    }

    fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.media(id).map(|m| m.has_class(class)).unwrap_or(false)
    }

    fn precedes(&self, a: NodeId, b: NodeId) -> bool {
        match (self.position(a), self.position(b)) {
            (Some(pa), Some(pb)) => pa < pb,
            _ => false,
        }
    }

    fn anchor_href(&self, id: NodeId) -> Option<&str> {
        match self.nodes.get(&id) {
            Some(NodeData::Anchor(anchor)) => Some(anchor.href.as_str()),
            _ => None,
        }
    }

    fn media_sources(&self, id: NodeId) -> Vec<SourceDecl> {
        self.media(id).map(|m| m.sources.clone()).unwrap_or_default()
    }

    fn is_paused(&self, id: NodeId) -> bool {
        self.media(id).map(|m| m.paused).unwrap_or(true)
    }

    fn current_time(&self, id: NodeId) -> Option<f64> {
        self.media(id).map(|m| m.current_time)
    }

    fn pause(&mut self, id: NodeId) -> Result<()> {
        self.media_mut(id)?.paused = true;
        Ok(())
    }

    fn play(&mut self, id: NodeId) -> Result<()> {
        self.media_mut(id)?.paused = false;
        Ok(())
    }

    fn set_current_time(&mut self, id: NodeId, time: f64) -> Result<()> {
        self.media_mut(id)?.current_time = time;
        Ok(())
    }

    fn clone_media_without_sources(&mut self, id: NodeId) -> Result<NodeId> {
        let copy = match self.nodes.get(&id) {
            Some(NodeData::Media(media)) => media.clone_without_sources(),
            Some(_) => return Err(DomError::NotMedia(id)),
            None => return Err(DomError::UnknownNode(id)),
        };
        let copy_id = NodeId::new();
        self.nodes.insert(copy_id, NodeData::Media(copy));
        debug!(original = %id, copy = %copy_id, "Cloned media element without sources");
        Ok(copy_id)
    }

    fn set_media_src(&mut self, id: NodeId, src: &str) -> Result<()> {
        self.media_mut(id)?.src = Some(src.to_string());
        Ok(())
    }

    fn replace_media(&mut self, old: NodeId, new: NodeId) -> Result<()> {
        if !self.nodes.contains_key(&new) {
            return Err(DomError::UnknownNode(new));
        }
        if !matches!(self.nodes.get(&new), Some(NodeData::Media(_))) {
            return Err(DomError::NotMedia(new));
        }
        if self.position(new).is_some() {
            return Err(DomError::AlreadyAttached(new));
        }
        let pos = match self.position(old) {
            Some(pos) => pos,
            None if self.nodes.contains_key(&old) => return Err(DomError::Detached(old)),
            None => return Err(DomError::UnknownNode(old)),
        };

        self.order[pos] = new;
        // The replaced node is gone for good.
        self.nodes.remove(&old);
        debug!(old = %old, new = %new, position = pos, "Replaced media element");
        Ok(())
    }

    fn bounding_box(&self, id: NodeId) -> Option<BoundingBox> {
        self.media(id).map(|m| m.bounding_box)
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn scroll_into_view(&mut self, id: NodeId) -> Result<()> {
        if !self.nodes.contains_key(&id) {
            return Err(DomError::UnknownNode(id));
        }
        self.scroll_log.push(id);
        Ok(())
    }
}
