//! Playback Arbiter
//!
//! Enforces the one-video-at-a-time rule: when any managed element begins
//! playing, every other managed element that is not already paused gets
//! paused before the dispatch returns. Management is an explicit registry
//! rather than a live document query, so elements introduced after the
//! initial scan (the upgrader's replacements) are covered by re-registering
//! them.

use crate::error::Result;
use soloist_dom::{Document, NodeId};
use tracing::debug;

/// Registry-backed playback arbiter
#[derive(Debug, Default)]
pub struct PlaybackArbiter {
    /// Managed elements in registration order
    managed: Vec<NodeId>,
}

impl PlaybackArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every media element matching the class filter (all media
    /// elements when the filter is None). Returns how many are managed
    /// afterwards.
    pub fn scan(&mut self, doc: &dyn Document, media_class: Option<&str>) -> usize {
        for id in doc.media_elements() {
            let matches = match media_class {
                Some(class) => doc.has_class(id, class),
                None => true,
            };
            if matches {
                self.register(id);
            }
        }
        self.managed.len()
    }

    /// Add an element to the registry. Idempotent: registering an element
    /// twice leaves a single entry and never double-pauses.
    pub fn register(&mut self, id: NodeId) {
        if !self.managed.contains(&id) {
            self.managed.push(id);
        }
    }

    /// Drop an element from the registry (used when a replacement takes a
    /// registered element's place).
    pub fn unregister(&mut self, id: NodeId) {
        self.managed.retain(|&m| m != id);
    }

    /// Whether the element is currently managed
    pub fn is_managed(&self, id: NodeId) -> bool {
        self.managed.contains(&id)
    }

    /// Number of managed elements
    pub fn managed_count(&self) -> usize {
        self.managed.len()
    }

    /// React to `target` starting to play: pause every other managed element
    /// that is not already paused. Elements outside the registry are left
    /// alone, and a play on an unmanaged element pauses nothing (only
    /// managed elements carry the play listener).
    pub fn on_play(&self, doc: &mut dyn Document, target: NodeId) -> Result<()> {
        if !self.managed.contains(&target) {
            return Ok(());
        }
        let mut paused = 0;
        for &other in &self.managed {
            if other != target && !doc.is_paused(other) {
                doc.pause(other)?;
                paused += 1;
            }
        }
        if paused > 0 {
            debug!(target = %target, paused, "Paused other playing elements");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soloist_dom::{MediaElement, MemoryDocument};

    fn doc_with_media(n: usize) -> (MemoryDocument, Vec<NodeId>) {
        let mut doc = MemoryDocument::new(800.0);
        let ids = (0..n).map(|_| doc.append_media(MediaElement::new())).collect();
        (doc, ids)
    }

    #[test]
    fn test_play_pauses_all_others() {
        let (mut doc, ids) = doc_with_media(3);
        let mut arbiter = PlaybackArbiter::new();
        assert_eq!(arbiter.scan(&doc, None), 3);

        doc.play(ids[0]).unwrap();
        doc.play(ids[2]).unwrap();
        arbiter.on_play(&mut doc, ids[2]).unwrap();

        assert_eq!(doc.playing_elements(), vec![ids[2]]);
    }

    #[test]
    fn test_empty_registry_is_a_noop() {
        let (mut doc, ids) = doc_with_media(1);
        let arbiter = PlaybackArbiter::new();

        doc.play(ids[0]).unwrap();
        arbiter.on_play(&mut doc, ids[0]).unwrap();
        assert_eq!(doc.playing_elements(), vec![ids[0]]);
    }

    #[test]
    fn test_reregistration_is_idempotent() {
        let (mut doc, ids) = doc_with_media(2);
        let mut arbiter = PlaybackArbiter::new();
        arbiter.scan(&doc, None);
        arbiter.register(ids[0]);
        arbiter.register(ids[0]);
        assert_eq!(arbiter.managed_count(), 2);

        doc.play(ids[1]).unwrap();
        doc.play(ids[0]).unwrap();
        arbiter.on_play(&mut doc, ids[0]).unwrap();
        assert_eq!(doc.playing_elements(), vec![ids[0]]);
    }

    #[test]
    fn test_class_filter_limits_management() {
        let mut doc = MemoryDocument::new(800.0);
        let managed = doc.append_media(MediaElement::new().with_class("lf-media"));
        let outsider = doc.append_media(MediaElement::new());

        let mut arbiter = PlaybackArbiter::new();
        assert_eq!(arbiter.scan(&doc, Some("lf-media")), 1);
        assert!(arbiter.is_managed(managed));
        assert!(!arbiter.is_managed(outsider));

        // An unmanaged playing element is unaffected.
        doc.play(outsider).unwrap();
        doc.play(managed).unwrap();
        arbiter.on_play(&mut doc, managed).unwrap();
        assert_eq!(doc.playing_elements(), vec![managed, outsider]);
    }

    #[test]
    fn test_unmanaged_play_pauses_nothing() {
        let mut doc = MemoryDocument::new(800.0);
        let managed = doc.append_media(MediaElement::new().with_class("lf-media"));
        let outsider = doc.append_media(MediaElement::new());

        let mut arbiter = PlaybackArbiter::new();
        arbiter.scan(&doc, Some("lf-media"));

        // Only managed elements carry the play listener; a play on an
        // element outside the selector must not pause anyone.
        doc.play(managed).unwrap();
        doc.play(outsider).unwrap();
        arbiter.on_play(&mut doc, outsider).unwrap();

        assert!(!doc.is_paused(managed));
        assert_eq!(doc.playing_elements(), vec![managed, outsider]);
    }

    #[test]
    fn test_last_to_start_wins_within_one_turn() {
        let (mut doc, ids) = doc_with_media(2);
        let mut arbiter = PlaybackArbiter::new();
        arbiter.scan(&doc, None);

        // Two plays in the same synchronous turn: handlers run in event
        // order, so the second dispatch sees the first as playing.
        doc.play(ids[0]).unwrap();
        arbiter.on_play(&mut doc, ids[0]).unwrap();
        doc.play(ids[1]).unwrap();
        arbiter.on_play(&mut doc, ids[1]).unwrap();

        assert_eq!(doc.playing_elements(), vec![ids[1]]);
    }

    #[test]
    fn test_unregister_stops_pausing() {
        let (mut doc, ids) = doc_with_media(2);
        let mut arbiter = PlaybackArbiter::new();
        arbiter.scan(&doc, None);
        arbiter.unregister(ids[0]);

        doc.play(ids[0]).unwrap();
        doc.play(ids[1]).unwrap();
        arbiter.on_play(&mut doc, ids[1]).unwrap();
        assert_eq!(doc.playing_elements(), vec![ids[0], ids[1]]);
    }
}
