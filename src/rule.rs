//! A rule under compilation and its match chain.
//!
//! [`Rule`] plays the part of the rule compiler for one signature: it owns
//! the chain, appends collaborator nodes (content and other keywords) and
//! routes keyword options through a [`KeywordRegistry`]. Evaluation covers
//! the standalone nodes owned by registered keywords. Content nodes, including
//! any relative isdataat data folded into them, are evaluated by the content
//! matcher and are skipped here. Opaque nodes carry no keyword data and are
//! skipped too, whatever name they were added under.

use crate::chain::{ChainAccess, ContentData, MatchChain, NodeId, NodePayload};
use crate::config::ParallelConfig;
use crate::error::Result;
use crate::keyword::{Keyword, KeywordRegistry, ISDATAAT_KEYWORD};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

pub type RuleId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    id: RuleId,
    name: Option<String>,
    chain: MatchChain,
}

impl Rule {
    pub fn new(id: RuleId) -> Self {
        Self {
            id,
            name: None,
            chain: MatchChain::new(),
        }
    }

    pub fn with_name(id: RuleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            chain: MatchChain::new(),
        }
    }

    pub fn id(&self) -> RuleId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn chain(&self) -> &MatchChain {
        &self.chain
    }

    /// Append a content match node.
    pub fn add_content(&mut self, pattern: impl Into<Vec<u8>>) -> Result<NodeId> {
        Ok(self
            .chain
            .append(NodePayload::Content(ContentData::new(pattern)))?)
    }

    /// Append a node for a keyword this crate treats as opaque.
    ///
    /// The node is never evaluated or released through the registry, even if
    /// `keyword` names a registered keyword.
    pub fn add_opaque(&mut self, keyword: &str) -> Result<NodeId> {
        Ok(self
            .chain
            .append(NodePayload::Other(keyword.to_string()))?)
    }

    /// Run `keyword`'s setup with `options` against the current end of the chain.
    ///
    /// Returns the appended node, or `None` when the keyword folded its data
    /// into an existing node. On error the chain is unchanged.
    pub fn setup_option(
        &mut self,
        registry: &KeywordRegistry,
        keyword: &str,
        options: &str,
    ) -> Result<Option<NodeId>> {
        let handler = registry.resolve(keyword)?;
        let tail = self.chain.tail();
        let node = handler.setup(&mut self.chain, tail, options)?;
        debug!(
            rule = self.id,
            keyword,
            options,
            node = ?node,
            "keyword option set up"
        );
        Ok(node)
    }

    /// Evaluate every standalone node owned by a registered keyword.
    ///
    /// A rule with no such node matches any buffer.
    pub fn evaluate(&self, registry: &KeywordRegistry, buffer: &[u8]) -> bool {
        self.chain.iter().all(|node| {
            match keyword_for(registry, node.payload()) {
                Some(keyword) => keyword.matches(node.payload(), buffer),
                None => true,
            }
        })
    }

    /// [`Rule::evaluate`] over many independent buffers, in input order.
    pub fn evaluate_batch<B>(
        &self,
        registry: &KeywordRegistry,
        buffers: &[B],
        config: &ParallelConfig,
    ) -> Vec<bool>
    where
        B: AsRef<[u8]> + Sync,
    {
        if config.should_parallelize(buffers.len()) {
            buffers
                .par_iter()
                .map(|buffer| self.evaluate(registry, buffer.as_ref()))
                .collect()
        } else {
            buffers
                .iter()
                .map(|buffer| self.evaluate(registry, buffer.as_ref()))
                .collect()
        }
    }

    /// Tear the rule down, handing each payload to the keyword that owns it.
    ///
    /// Content and opaque payloads are dropped.
    pub fn release(self, registry: &KeywordRegistry) {
        for node in self.chain.into_nodes() {
            match keyword_for(registry, node.payload()) {
                Some(keyword) => keyword.release(node.into_payload()),
                None => drop(node),
            }
        }
    }
}

/// The registered keyword that owns `payload`, if any.
///
/// Only payloads created by a keyword's setup have an owner. An opaque node
/// holds just a name, so no keyword could evaluate it.
fn keyword_for<'r>(
    registry: &'r KeywordRegistry,
    payload: &NodePayload,
) -> Option<&'r Arc<dyn Keyword>> {
    match payload {
        NodePayload::Isdataat(_) => registry.get(ISDATAAT_KEYWORD),
        NodePayload::Content(_) | NodePayload::Other(_) => None,
    }
}
