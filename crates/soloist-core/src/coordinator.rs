//! Playback Coordinator - single owner of the three components
//!
//! Wires the arbiter, upgrader and navigator over one injected document and
//! routes the three external signals into them: media play events, anchor
//! activations, and the engine's manifest-parsed callback. Every handler
//! runs to completion synchronously; the arbiter's pause side effects are
//! observable before the handler returns.

use crate::arbiter::PlaybackArbiter;
use crate::engine::EngineProvider;
use crate::error::Result;
use crate::seek::{SeekNavigator, SeekOutcome};
use crate::types::{CoordinatorConfig, UpgradeRecord};
use crate::upgrade::StreamingUpgrader;
use serde::{Deserialize, Serialize};
use soloist_dom::{Document, NodeId};
use tracing::{info, instrument};

/// What an [`PlaybackCoordinator::install`] scan found and did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallReport {
    /// Elements under arbiter management after the scan
    pub managed: usize,
    /// Elements replaced for streaming
    pub upgraded: usize,
    /// Registered seek anchors
    pub seek_anchors: usize,
}

/// Coordinates playback across a document's media elements
pub struct PlaybackCoordinator {
    config: CoordinatorConfig,
    arbiter: PlaybackArbiter,
    upgrader: StreamingUpgrader,
    navigator: SeekNavigator,
}

impl PlaybackCoordinator {
    /// Create a coordinator with the given configuration and engine factory
    pub fn new(config: CoordinatorConfig, provider: Box<dyn EngineProvider>) -> Self {
        Self {
            config,
            arbiter: PlaybackArbiter::new(),
            upgrader: StreamingUpgrader::new(provider),
            navigator: SeekNavigator::new(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Whether the element is under arbiter management
    pub fn is_managed(&self, id: NodeId) -> bool {
        self.arbiter.is_managed(id)
    }

    /// Upgrade record for an element, if it was upgraded
    pub fn upgrade_record(&self, id: NodeId) -> Option<&UpgradeRecord> {
        self.upgrader.record(id)
    }

    /// Scan the document and wire all three components.
    ///
    /// The arbiter scan runs first so it covers every pre-existing element;
    /// the upgrader re-registers its replacements itself, so elements it
    /// introduces are covered too.
    pub fn install(&mut self, doc: &mut dyn Document) -> Result<InstallReport> {
        self.arbiter.scan(doc, self.config.media_class.as_deref());
        let upgraded = self.upgrader.scan(doc, &mut self.arbiter, &self.config)?;
        let seek_anchors = self.navigator.scan(doc, &self.config.seek_prefix);

        let report = InstallReport {
            managed: self.arbiter.managed_count(),
            upgraded,
            seek_anchors,
        };
        info!(
            managed = report.managed,
            upgraded = report.upgraded,
            seek_anchors = report.seek_anchors,
            "Coordinator installed"
        );
        Ok(report)
    }

    /// Dispatch a media element's play event.
    ///
    /// The upgrader's one-shot gate runs before the arbiter, matching the
    /// listener order on upgraded elements.
    #[instrument(skip(self, doc))]
    pub fn handle_play(&mut self, doc: &mut dyn Document, id: NodeId) -> Result<()> {
        self.upgrader.on_play(id, &self.config)?;
        self.arbiter.on_play(doc, id)?;
        Ok(())
    }

    /// Dispatch an anchor activation. If the navigator started playback,
    /// the resulting play event is dispatched as well, so the upgrade gate
    /// and the arbiter both observe it.
    #[instrument(skip(self, doc))]
    pub fn handle_anchor_click(
        &mut self,
        doc: &mut dyn Document,
        anchor: NodeId,
    ) -> Result<SeekOutcome> {
        let outcome = self.navigator.on_click(doc, anchor, &self.config.seek_prefix)?;
        if let SeekOutcome::Sought {
            target,
            played: true,
            ..
        } = outcome
        {
            self.handle_play(doc, target)?;
        }
        Ok(outcome)
    }

    /// Dispatch the engine's manifest-parsed signal for an upgraded element.
    /// Playback starts on the element and the play is dispatched through
    /// the arbiter.
    #[instrument(skip(self, doc))]
    pub fn handle_manifest_parsed(&mut self, doc: &mut dyn Document, id: NodeId) -> Result<()> {
        self.upgrader.on_manifest_parsed(doc, id)?;
        self.handle_play(doc, id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MockProvider;
    use soloist_dom::{MediaElement, MemoryDocument, SourceDecl};

    #[test]
    fn test_install_on_empty_document() {
        let mut doc = MemoryDocument::new(800.0);
        let mut coordinator =
            PlaybackCoordinator::new(CoordinatorConfig::default(), Box::new(MockProvider::new()));

        let report = coordinator.install(&mut doc).unwrap();
        assert_eq!(
            report,
            InstallReport {
                managed: 0,
                upgraded: 0,
                seek_anchors: 0
            }
        );
    }

    #[test]
    fn test_handle_play_routes_through_arbiter() {
        let mut doc = MemoryDocument::new(800.0);
        let v1 = doc.append_media(MediaElement::new());
        let v2 = doc.append_media(MediaElement::new());
        let mut coordinator =
            PlaybackCoordinator::new(CoordinatorConfig::default(), Box::new(MockProvider::new()));
        coordinator.install(&mut doc).unwrap();

        doc.play(v1).unwrap();
        coordinator.handle_play(&mut doc, v1).unwrap();
        doc.play(v2).unwrap();
        coordinator.handle_play(&mut doc, v2).unwrap();

        assert_eq!(doc.playing_elements(), vec![v2]);
    }

    #[test]
    fn test_upgraded_replacement_is_managed() {
        let mut doc = MemoryDocument::new(800.0);
        let original = doc.append_media(MediaElement::new().with_source(SourceDecl::new(
            "https://cdn.example.com/clip.m3u8",
            "application/vnd.apple.mpegurl",
        )));
        let mut coordinator =
            PlaybackCoordinator::new(CoordinatorConfig::default(), Box::new(MockProvider::new()));

        let report = coordinator.install(&mut doc).unwrap();
        assert_eq!(report.upgraded, 1);
        assert_eq!(report.managed, 1);

        let replacement = doc.media_elements()[0];
        assert_ne!(replacement, original);
        assert!(coordinator.is_managed(replacement));
        assert!(!coordinator.is_managed(original));
        assert!(coordinator.upgrade_record(replacement).is_some());
    }
}
