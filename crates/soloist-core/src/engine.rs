//! External streaming engine boundary
//!
//! The engine that actually fetches manifests and assembles segments is a
//! collaborator, not part of this crate. The coordinator only needs three
//! things from it: a capability check for the current environment, a way to
//! point a fresh instance at a manifest, and a way to bind it to a media
//! element. The engine's manifest-parsed signal travels the other way, as a
//! host call to [`crate::PlaybackCoordinator::handle_manifest_parsed`].

use crate::types::EngineConfig;
use soloist_dom::NodeId;
use url::Url;

/// A single engine instance driving one media element
pub trait StreamingEngine {
    /// Begin loading the given manifest
    fn load_source(&mut self, manifest: &Url);

    /// Bind the engine to a media element
    fn attach_media(&mut self, target: NodeId);
}

/// Factory for engine instances
pub trait EngineProvider {
    /// Whether the current environment can run the engine at all
    fn is_supported(&self) -> bool;

    /// Create a fresh engine instance
    fn create(&self, config: &EngineConfig) -> Box<dyn StreamingEngine>;
}

pub use mock::{MockEngine, MockProvider};

/// Recording test doubles for the engine boundary
pub mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Everything a [`MockProvider`] and its engines observed
    #[derive(Debug, Default)]
    pub struct MockLog {
        /// Number of `is_supported` queries
        pub support_queries: usize,
        /// Number of engines created
        pub engines_created: usize,
        /// `(manifest, target)` per engine, in creation order; either side
        /// is None until the corresponding call lands
        pub bindings: Vec<(Option<Url>, Option<NodeId>)>,
        /// Config passed to the most recent `create`
        pub last_config: Option<EngineConfig>,
    }

    /// Engine double that records load/attach calls into the shared log
    pub struct MockEngine {
        log: Rc<RefCell<MockLog>>,
        index: usize,
    }

    impl StreamingEngine for MockEngine {
        fn load_source(&mut self, manifest: &Url) {
            self.log.borrow_mut().bindings[self.index].0 = Some(manifest.clone());
        }

        fn attach_media(&mut self, target: NodeId) {
            self.log.borrow_mut().bindings[self.index].1 = Some(target);
        }
    }

    /// Provider double with a configurable support answer
    pub struct MockProvider {
        supported: bool,
        log: Rc<RefCell<MockLog>>,
    }

    impl MockProvider {
        pub fn new() -> Self {
            Self::with_support(true)
        }

        pub fn with_support(supported: bool) -> Self {
            Self {
                supported,
                log: Rc::new(RefCell::new(MockLog::default())),
            }
        }

        /// Shared handle onto the call log
        pub fn log(&self) -> Rc<RefCell<MockLog>> {
            Rc::clone(&self.log)
        }
    }

    impl Default for MockProvider {
        fn default() -> Self {
            Self::new()
        }
    }

    impl EngineProvider for MockProvider {
        fn is_supported(&self) -> bool {
            self.log.borrow_mut().support_queries += 1;
            self.supported
        }

        fn create(&self, config: &EngineConfig) -> Box<dyn StreamingEngine> {
            let mut log = self.log.borrow_mut();
            log.engines_created += 1;
            log.last_config = Some(config.clone());
            log.bindings.push((None, None));
            let index = log.bindings.len() - 1;
            drop(log);

            Box::new(MockEngine {
                log: Rc::clone(&self.log),
                index,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_provider_records_calls() {
        let provider = MockProvider::new();
        let log = provider.log();

        assert!(provider.is_supported());
        assert_eq!(log.borrow().support_queries, 1);

        let mut engine = provider.create(&EngineConfig::default());
        let manifest = Url::parse("https://cdn.example.com/clip.m3u8").unwrap();
        let target = NodeId::new();
        engine.load_source(&manifest);
        engine.attach_media(target);

        let log = log.borrow();
        assert_eq!(log.engines_created, 1);
        assert_eq!(log.bindings[0], (Some(manifest), Some(target)));
        assert_eq!(log.last_config, Some(EngineConfig::default()));
    }

    #[test]
    fn test_mock_provider_unsupported() {
        let provider = MockProvider::with_support(false);
        assert!(!provider.is_supported());
        assert_eq!(provider.log().borrow().support_queries, 1);
    }
}
