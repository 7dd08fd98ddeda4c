//! Soloist Core - Playback coordination for document-embedded media
//!
//! This crate provides the coordination layer for media elements on a
//! rendered document:
//! - At most one video plays at a time (playback arbitration)
//! - Elements declaring an HLS manifest source are transparently upgraded
//!   to adaptive streaming, with engine attachment gated behind first play
//! - `#video-seek-<seconds>` anchors reposition the nearest preceding video
//!   and scroll it into view when needed
//!
//! The document and the streaming engine are both trait boundaries
//! ([`soloist_dom::Document`], [`EngineProvider`]), so the whole core runs
//! against an in-memory document and a mock engine in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                  Playback Coordinator                     │
//! ├───────────────────────────────────────────────────────────┤
//! │                                                           │
//! │  ┌────────────┐   ┌─────────────┐   ┌────────────┐        │
//! │  │  Playback  │   │  Streaming  │   │    Seek    │        │
//! │  │  Arbiter   │   │  Upgrader   │   │  Navigator │        │
//! │  └─────┬──────┘   └──────┬──────┘   └─────┬──────┘        │
//! │        │                 │                │               │
//! │        └────────┬────────┴────────────────┘               │
//! │                 │                                         │
//! │          ┌──────┴──────┐         ┌─────────────────┐      │
//! │          │  Document   │         │ Streaming Engine│      │
//! │          │  (trait)    │         │    (trait)      │      │
//! │          └─────────────┘         └─────────────────┘      │
//! └───────────────────────────────────────────────────────────┘
//! ```

pub mod arbiter;
pub mod coordinator;
pub mod engine;
pub mod error;
pub mod seek;
pub mod types;
pub mod upgrade;

pub use arbiter::PlaybackArbiter;
pub use coordinator::{InstallReport, PlaybackCoordinator};
pub use engine::{EngineProvider, StreamingEngine};
pub use error::{Error, Result};
pub use seek::{parse_seek_offset, SeekNavigator, SeekOutcome};
pub use types::{
    AttachState, CoordinatorConfig, EngineConfig, PlaybackPhase, UpgradeRecord, HLS_MANIFEST_MIME,
    PLACEHOLDER_SRC, SEEK_PREFIX,
};
pub use upgrade::StreamingUpgrader;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
