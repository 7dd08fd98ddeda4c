//! Streaming Upgrader
//!
//! Finds media elements declaring a manifest-typed source, swaps each for a
//! structural copy with the source list stripped, and hands the copy to the
//! external streaming engine on its first play. Attachment is a one-shot
//! gate: the engine is instantiated exactly once per element no matter how
//! many play events arrive.
//!
//! Ordering matters on the abort paths. Zero manifest sources is the
//! expected case for most documents and does no work at all, not even a
//! capability query. An unsupported environment aborts before any document
//! mutation, so excluded elements keep their native sources.

use crate::arbiter::PlaybackArbiter;
use crate::engine::{EngineProvider, StreamingEngine};
use crate::error::{Error, Result};
use crate::types::{AttachState, CoordinatorConfig, PlaybackPhase, UpgradeRecord};
use soloist_dom::{Document, NodeId};
use std::collections::HashMap;
use tracing::{debug, warn};
use url::Url;

/// Upgrades manifest-declaring elements and gates engine attachment
pub struct StreamingUpgrader {
    /// Engine factory for the current environment
    provider: Box<dyn EngineProvider>,
    /// One record per upgraded element, keyed by the replacement
    records: HashMap<NodeId, UpgradeRecord>,
    /// Live engine instances, keyed by the element they drive
    engines: HashMap<NodeId, Box<dyn StreamingEngine>>,
}

impl StreamingUpgrader {
    pub fn new(provider: Box<dyn EngineProvider>) -> Self {
        Self {
            provider,
            records: HashMap::new(),
            engines: HashMap::new(),
        }
    }

    /// Upgrade record for an element, if it was upgraded
    pub fn record(&self, id: NodeId) -> Option<&UpgradeRecord> {
        self.records.get(&id)
    }

    /// Number of upgraded elements
    pub fn upgraded_count(&self) -> usize {
        self.records.len()
    }

    /// Scan the document and upgrade every eligible element.
    ///
    /// Returns the number of elements replaced. Replacements are
    /// re-registered with the arbiter in place of the originals they
    /// displaced.
    pub fn scan(
        &mut self,
        doc: &mut dyn Document,
        arbiter: &mut PlaybackArbiter,
        config: &CoordinatorConfig,
    ) -> Result<usize> {
        let mut eligible = Vec::new();
        for id in doc.media_elements() {
            if let Some(class) = config.media_class.as_deref() {
                if !doc.has_class(id, class) {
                    continue;
                }
            }
            if let Some(source) = doc
                .media_sources(id)
                .into_iter()
                .find(|s| s.mime_type == config.manifest_mime)
            {
                eligible.push((id, source.src));
            }
        }

        // Expected path for documents without streaming media.
        if eligible.is_empty() {
            return Ok(0);
        }

        if !self.provider.is_supported() {
            debug!("Streaming engine unsupported in this environment, leaving elements as-is");
            return Ok(0);
        }

        let mut upgraded = 0;
        for (id, src) in eligible {
            let manifest_url = match Url::parse(&src) {
                Ok(url) => url,
                Err(err) => {
                    warn!(element = %id, src = %src, error = %err, "Skipping element with unparseable manifest URL");
                    continue;
                }
            };

            let copy = doc.clone_media_without_sources(id)?;
            doc.set_media_src(copy, &config.placeholder_src)?;
            doc.replace_media(id, copy)?;

            self.records.insert(copy, UpgradeRecord::new(manifest_url, copy));
            arbiter.unregister(id);
            arbiter.register(copy);
            upgraded += 1;
            debug!(original = %id, replacement = %copy, "Upgraded element for streaming");
        }

        Ok(upgraded)
    }

    /// One-shot gate: on the first play of an upgraded element, instantiate
    /// the engine, point it at the captured manifest, and bind it to the
    /// element. Returns whether an engine was attached by this call; later
    /// plays on the same element return `Ok(false)` and leave the engine
    /// alone.
    pub fn on_play(&mut self, id: NodeId, config: &CoordinatorConfig) -> Result<bool> {
        let record = match self.records.get_mut(&id) {
            Some(record) => record,
            None => return Ok(false),
        };
        if record.attach == AttachState::Attached {
            return Ok(false);
        }

        transition(record, PlaybackPhase::AwaitingManifest)?;
        record.attach = AttachState::Attached;

        let mut engine = self.provider.create(&config.engine);
        engine.load_source(&record.manifest_url);
        engine.attach_media(id);
        self.engines.insert(id, engine);

        debug!(element = %id, manifest = %record.manifest_url, "Engine attached on first play");
        Ok(true)
    }

    /// Engine signal: the manifest is parsed and playback can start. Invokes
    /// play on the element; the coordinator dispatches the resulting play
    /// through the arbiter.
    pub fn on_manifest_parsed(&mut self, doc: &mut dyn Document, id: NodeId) -> Result<()> {
        let record = self.records.get_mut(&id).ok_or(Error::NotUpgraded(id))?;
        transition(record, PlaybackPhase::Ready)?;
        doc.play(id)?;
        debug!(element = %id, "Manifest parsed, playback started");
        Ok(())
    }
}

fn transition(record: &mut UpgradeRecord, to: PlaybackPhase) -> Result<()> {
    if !record.phase.can_transition_to(to) {
        return Err(Error::InvalidPhaseTransition {
            from: record.phase.to_string(),
            to: to.to_string(),
        });
    }
    record.phase = to;
    Ok(())
}
