//! Keyword registration surface.
//!
//! Every rule keyword exposes three entry points to the rule compiler:
//! `setup` (parse option text and link the result into a match chain),
//! `matches` (evaluate a node it owns against a buffer) and `release`
//! (dispose of a node payload it owns). [`KeywordRegistry`] maps keyword
//! names to implementations.

use crate::chain::{ChainAccess, NodeId, NodePayload};
use crate::config::KeywordConfig;
use crate::criterion::release;
use crate::error::{IsdataatError, Result, SetupError};
use crate::evaluator;
use crate::linker::{self, Linked};
use crate::parser;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Name the isdataat keyword is registered under.
pub const ISDATAAT_KEYWORD: &str = "isdataat";

/// Entry points a keyword provides to the rule compiler.
pub trait Keyword: Send + Sync {
    fn name(&self) -> &'static str;

    /// Parse `options` and link the result into `chain` after `tail`.
    ///
    /// Returns the id of the node that was appended, or `None` if the keyword
    /// folded its data into an existing node instead. On error the chain is
    /// left unmodified.
    fn setup(
        &self,
        chain: &mut dyn ChainAccess,
        tail: Option<NodeId>,
        options: &str,
    ) -> Result<Option<NodeId>>;

    /// Evaluate a payload this keyword created against `buffer`.
    fn matches(&self, payload: &NodePayload, buffer: &[u8]) -> bool;

    /// Dispose of a payload this keyword created.
    fn release(&self, payload: NodePayload);
}

/// The `isdataat` keyword.
#[derive(Debug, Clone, Default)]
pub struct IsdataatKeyword {
    config: KeywordConfig,
}

impl IsdataatKeyword {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: KeywordConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KeywordConfig {
        &self.config
    }
}

impl Keyword for IsdataatKeyword {
    fn name(&self) -> &'static str {
        ISDATAAT_KEYWORD
    }

    fn setup(
        &self,
        chain: &mut dyn ChainAccess,
        tail: Option<NodeId>,
        options: &str,
    ) -> Result<Option<NodeId>> {
        let criterion = parser::parse_with_config(options, &self.config).map_err(|e| {
            warn!(options, error = %e, "rejecting isdataat option");
            e
        })?;

        match linker::attach(chain, tail, Box::new(criterion))? {
            Linked::Appended(id) => Ok(Some(id)),
            Linked::Folded { .. } => Ok(None),
        }
    }

    fn matches(&self, payload: &NodePayload, buffer: &[u8]) -> bool {
        match payload {
            NodePayload::Isdataat(criterion) => evaluator::matches_buffer(criterion, buffer),
            _ => false,
        }
    }

    fn release(&self, payload: NodePayload) {
        if let NodePayload::Isdataat(criterion) = payload {
            release(criterion);
        }
    }
}

/// Registry of keywords by name.
///
/// # Example
/// ```rust
/// use isdataat::{KeywordRegistry, ISDATAAT_KEYWORD};
///
/// let registry = KeywordRegistry::new();
/// assert!(registry.has_keyword(ISDATAAT_KEYWORD));
/// ```
#[derive(Clone)]
pub struct KeywordRegistry {
    keywords: HashMap<String, Arc<dyn Keyword>>,
}

impl KeywordRegistry {
    /// Create a registry with the isdataat keyword registered.
    pub fn new() -> Self {
        Self::with_config(KeywordConfig::default())
    }

    /// Create a registry whose isdataat keyword enforces `config`.
    pub fn with_config(config: KeywordConfig) -> Self {
        let mut registry = Self::empty();
        registry.register(IsdataatKeyword::with_config(config));
        registry
    }

    /// Create a registry with no keywords.
    pub fn empty() -> Self {
        Self {
            keywords: HashMap::new(),
        }
    }

    /// Register a keyword under its own name, replacing any previous entry.
    pub fn register<K>(&mut self, keyword: K) -> &mut Self
    where
        K: Keyword + 'static,
    {
        self.keywords
            .insert(keyword.name().to_string(), Arc::new(keyword));
        self
    }

    /// Look up a keyword by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Keyword>> {
        self.keywords.get(name)
    }

    /// Look up a keyword, failing with [`SetupError::UnknownKeyword`].
    pub fn resolve(&self, name: &str) -> Result<&Arc<dyn Keyword>> {
        self.get(name)
            .ok_or_else(|| IsdataatError::from(SetupError::UnknownKeyword(name.to_string())))
    }

    /// Whether a keyword is registered under `name`.
    pub fn has_keyword(&self, name: &str) -> bool {
        self.keywords.contains_key(name)
    }

    /// Number of registered keywords.
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}

impl Default for KeywordRegistry {
    fn default() -> Self {
        Self::new()
    }
}
