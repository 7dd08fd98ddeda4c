//! Core types for Soloist

use serde::{Deserialize, Serialize};
use soloist_dom::NodeId;
use url::Url;

/// MIME type that marks a `<source>` as an HLS manifest
pub const HLS_MANIFEST_MIME: &str = "application/vnd.apple.mpegurl";

/// Fragment prefix of seek anchors (`#video-seek-<seconds>`)
pub const SEEK_PREFIX: &str = "#video-seek-";

/// Placeholder src assigned to upgraded elements so play intent stays
/// observable before the engine attaches (Chromium 72+ suppresses the play
/// event on elements with no source at all)
pub const PLACEHOLDER_SRC: &str = "about:blank";

/// One-shot engine attachment state
///
/// Flips to `Attached` exactly once, on the element's first play; never
/// resets. Replaces the closure-captured `once` flag of an event-handler
/// formulation with an inspectable tagged state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttachState {
    /// No engine instantiated for this element yet
    NotAttached,
    /// Engine instantiated and bound; further play events are ignored
    Attached,
}

impl std::fmt::Display for AttachState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachState::NotAttached => write!(f, "not-attached"),
            AttachState::Attached => write!(f, "attached"),
        }
    }
}

/// Playback phase of an upgraded element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackPhase {
    /// Upgraded, engine not yet attached
    Idle,
    /// Engine attached, waiting for its manifest-parsed signal
    AwaitingManifest,
    /// Manifest parsed, playback handed to the engine
    Ready,
}

impl PlaybackPhase {
    /// Check if transition to target phase is valid
    ///
    /// Phases only move forward; there is no cancellation or reset.
    pub fn can_transition_to(&self, target: PlaybackPhase) -> bool {
        use PlaybackPhase::*;
        matches!(
            (self, target),
            (Idle, AwaitingManifest) | (AwaitingManifest, Ready)
        )
    }
}

impl std::fmt::Display for PlaybackPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackPhase::Idle => write!(f, "idle"),
            PlaybackPhase::AwaitingManifest => write!(f, "awaiting-manifest"),
            PlaybackPhase::Ready => write!(f, "ready"),
        }
    }
}

/// Per-element upgrade bookkeeping, keyed by the replacement element
///
/// Exactly one record exists per originally-declared streaming element. The
/// original element itself is discarded during the upgrade; `target` is the
/// replacement that took its document position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeRecord {
    /// Captured manifest URL
    pub manifest_url: Url,
    /// The replacement element this record drives
    pub target: NodeId,
    /// One-shot engine attachment state
    pub attach: AttachState,
    /// Playback phase
    pub phase: PlaybackPhase,
}

impl UpgradeRecord {
    pub fn new(manifest_url: Url, target: NodeId) -> Self {
        Self {
            manifest_url,
            target,
            attach: AttachState::NotAttached,
            phase: PlaybackPhase::Idle,
        }
    }
}

/// Streaming engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cap the selected rendition to the player's viewport size
    pub cap_level_to_player_size: bool,
    /// Maximum buffer length in seconds of media time
    pub max_max_buffer_length: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cap_level_to_player_size: true,
            max_max_buffer_length: 90.0,
        }
    }
}

/// Coordinator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Class a media element must carry to be arbitrated and upgraded
    /// (None = every media element). The seek navigator deliberately
    /// ignores this and considers all media elements.
    pub media_class: Option<String>,
    /// Fragment prefix of seek anchors
    pub seek_prefix: String,
    /// MIME type that triggers the streaming upgrade
    pub manifest_mime: String,
    /// src assigned to upgraded elements before the engine takes over
    pub placeholder_src: String,
    /// Configuration handed to the streaming engine on attach
    pub engine: EngineConfig,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            media_class: None,
            seek_prefix: SEEK_PREFIX.to_string(),
            manifest_mime: HLS_MANIFEST_MIME.to_string(),
            placeholder_src: PLACEHOLDER_SRC.to_string(),
            engine: EngineConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions() {
        // Valid transitions
        assert!(PlaybackPhase::Idle.can_transition_to(PlaybackPhase::AwaitingManifest));
        assert!(PlaybackPhase::AwaitingManifest.can_transition_to(PlaybackPhase::Ready));

        // Invalid transitions - phases never move backward or skip
        assert!(!PlaybackPhase::Idle.can_transition_to(PlaybackPhase::Ready));
        assert!(!PlaybackPhase::Ready.can_transition_to(PlaybackPhase::Idle));
        assert!(!PlaybackPhase::AwaitingManifest.can_transition_to(PlaybackPhase::Idle));
        assert!(!PlaybackPhase::Ready.can_transition_to(PlaybackPhase::AwaitingManifest));
    }

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert!(config.cap_level_to_player_size);
        assert_eq!(config.max_max_buffer_length, 90.0);
    }

    #[test]
    fn test_coordinator_config_defaults() {
        let config = CoordinatorConfig::default();
        assert_eq!(config.seek_prefix, "#video-seek-");
        assert_eq!(config.manifest_mime, "application/vnd.apple.mpegurl");
        assert_eq!(config.placeholder_src, "about:blank");
        assert!(config.media_class.is_none());
    }
}
