//! A rule's match chain: an ordered, backward-linked list of keyword nodes.
//!
//! The chain belongs to the rule compiler. Keyword setup code reaches it only
//! through [`ChainAccess`], which exposes the three capabilities setup needs:
//! search backward from a node, mutate a content node's relative-offset
//! fields, and append a new node. [`MatchChain`] is the arena-backed
//! implementation used by [`Rule`](crate::Rule).

use crate::criterion::Criterion;
use crate::error::SetupError;

/// Index of a node inside its chain.
pub type NodeId = usize;

/// Keyword kind a node is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Content,
    Isdataat,
    Other,
}

/// Flag bits carried by a content node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ContentFlags(u8);

impl ContentFlags {
    /// An isdataat check relative to the end of this content match is attached.
    pub const ISDATAAT_RELATIVE: ContentFlags = ContentFlags(0x01);
    /// The attached isdataat check asked for the raw buffer.
    pub const ISDATAAT_RAWBYTES: ContentFlags = ContentFlags(0x02);

    pub fn empty() -> Self {
        Self(0)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: ContentFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: ContentFlags) {
        self.0 |= other.0;
    }
}

/// Payload of a content node.
///
/// Only `isdataat` and `flags` are written by the isdataat keyword; the
/// content matcher reads them back when it evaluates the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentData {
    pattern: Vec<u8>,
    /// Bytes that must be present after the end of the match.
    pub isdataat: u32,
    pub flags: ContentFlags,
}

impl ContentData {
    pub fn new(pattern: impl Into<Vec<u8>>) -> Self {
        Self {
            pattern: pattern.into(),
            isdataat: 0,
            flags: ContentFlags::empty(),
        }
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    pub fn has_isdataat_relative(&self) -> bool {
        self.flags.contains(ContentFlags::ISDATAAT_RELATIVE)
    }
}

/// Kind-specific data held by a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodePayload {
    Content(ContentData),
    Isdataat(Box<Criterion>),
    /// Any other keyword, identified by name. Its data is opaque here.
    Other(String),
}

impl NodePayload {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodePayload::Content(_) => NodeKind::Content,
            NodePayload::Isdataat(_) => NodeKind::Isdataat,
            NodePayload::Other(_) => NodeKind::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchNode {
    id: NodeId,
    prev: Option<NodeId>,
    payload: NodePayload,
}

impl MatchNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn prev(&self) -> Option<NodeId> {
        self.prev
    }

    pub fn kind(&self) -> NodeKind {
        self.payload.kind()
    }

    pub fn payload(&self) -> &NodePayload {
        &self.payload
    }

    pub fn into_payload(self) -> NodePayload {
        self.payload
    }
}

/// Capabilities keyword setup needs from the chain owner.
pub trait ChainAccess {
    /// Walk backward from `from` (inclusive) and return the first node whose
    /// kind satisfies `predicate`.
    fn find_preceding(
        &self,
        from: Option<NodeId>,
        predicate: &dyn Fn(NodeKind) -> bool,
    ) -> Option<NodeId>;

    /// Mutable access to a content node's payload. `None` for other kinds.
    fn content_mut(&mut self, id: NodeId) -> Option<&mut ContentData>;

    /// Append a node at the end of the chain.
    fn append(&mut self, payload: NodePayload) -> Result<NodeId, SetupError>;
}

/// Arena-backed match chain; `prev` links are indices into the arena.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchChain {
    nodes: Vec<MatchNode>,
}

impl MatchChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The most recently appended node.
    pub fn tail(&self) -> Option<NodeId> {
        self.nodes.last().map(MatchNode::id)
    }

    pub fn get(&self, id: NodeId) -> Option<&MatchNode> {
        self.nodes.get(id)
    }

    pub fn content(&self, id: NodeId) -> Option<&ContentData> {
        match self.nodes.get(id).map(MatchNode::payload) {
            Some(NodePayload::Content(content)) => Some(content),
            _ => None,
        }
    }

    /// Nodes in append order.
    pub fn iter(&self) -> impl Iterator<Item = &MatchNode> {
        self.nodes.iter()
    }

    /// Consume the chain, yielding nodes in append order.
    pub fn into_nodes(self) -> std::vec::IntoIter<MatchNode> {
        self.nodes.into_iter()
    }

    /// Nodes from `from` back to the head, following `prev` links.
    pub fn iter_back_from(&self, from: Option<NodeId>) -> impl Iterator<Item = &MatchNode> {
        std::iter::successors(from.and_then(|id| self.nodes.get(id)), move |node| {
            node.prev.and_then(|prev| self.nodes.get(prev))
        })
    }
}

impl ChainAccess for MatchChain {
    fn find_preceding(
        &self,
        from: Option<NodeId>,
        predicate: &dyn Fn(NodeKind) -> bool,
    ) -> Option<NodeId> {
        self.iter_back_from(from)
            .find(|node| predicate(node.kind()))
            .map(MatchNode::id)
    }

    fn content_mut(&mut self, id: NodeId) -> Option<&mut ContentData> {
        match self.nodes.get_mut(id).map(|node| &mut node.payload) {
            Some(NodePayload::Content(content)) => Some(content),
            _ => None,
        }
    }

    fn append(&mut self, payload: NodePayload) -> Result<NodeId, SetupError> {
        self.nodes
            .try_reserve(1)
            .map_err(|_| SetupError::AllocationFailure)?;

        let id = self.nodes.len();
        let prev = self.tail();
        self.nodes.push(MatchNode { id, prev, payload });
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_chain() -> MatchChain {
        let mut chain = MatchChain::new();
        chain
            .append(NodePayload::Content(ContentData::new(&b"HTTP"[..])))
            .unwrap();
        chain
            .append(NodePayload::Other("flow".to_string()))
            .unwrap();
        chain
            .append(NodePayload::Isdataat(Box::new(Criterion::absolute(10))))
            .unwrap();
        chain
    }

    #[test]
    fn test_append_links_prev() {
        let chain = sample_chain();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.tail(), Some(2));
        assert_eq!(chain.get(0).unwrap().prev(), None);
        assert_eq!(chain.get(1).unwrap().prev(), Some(0));
        assert_eq!(chain.get(2).unwrap().prev(), Some(1));
    }

    #[test]
    fn test_kinds() {
        let chain = sample_chain();
        let kinds: Vec<NodeKind> = chain.iter().map(MatchNode::kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Content, NodeKind::Other, NodeKind::Isdataat]
        );
    }

    #[test]
    fn test_iter_back_from() {
        let chain = sample_chain();
        let ids: Vec<NodeId> = chain.iter_back_from(Some(2)).map(MatchNode::id).collect();
        assert_eq!(ids, vec![2, 1, 0]);
        assert_eq!(chain.iter_back_from(None).count(), 0);
    }

    #[test]
    fn test_find_preceding_is_inclusive() {
        let chain = sample_chain();
        let is_content = |kind: NodeKind| kind == NodeKind::Content;
        assert_eq!(chain.find_preceding(Some(2), &is_content), Some(0));
        assert_eq!(chain.find_preceding(Some(0), &is_content), Some(0));
        assert_eq!(chain.find_preceding(None, &is_content), None);

        let is_other = |kind: NodeKind| kind == NodeKind::Other;
        assert_eq!(chain.find_preceding(Some(0), &is_other), None);
    }

    #[test]
    fn test_content_mut_only_for_content_nodes() {
        let mut chain = sample_chain();
        assert!(chain.content_mut(0).is_some());
        assert!(chain.content_mut(1).is_none());
        assert!(chain.content_mut(2).is_none());
        assert!(chain.content_mut(42).is_none());
    }

    #[test]
    fn test_content_flags() {
        let mut flags = ContentFlags::empty();
        assert!(!flags.contains(ContentFlags::ISDATAAT_RELATIVE));

        flags.insert(ContentFlags::ISDATAAT_RELATIVE);
        assert!(flags.contains(ContentFlags::ISDATAAT_RELATIVE));
        assert!(!flags.contains(ContentFlags::ISDATAAT_RAWBYTES));

        flags.insert(ContentFlags::ISDATAAT_RAWBYTES);
        assert_eq!(flags.bits(), 0x03);
    }

    #[test]
    fn test_new_content_has_no_isdataat() {
        let content = ContentData::new("GET");
        assert_eq!(content.pattern(), b"GET");
        assert_eq!(content.isdataat, 0);
        assert!(!content.has_isdataat_relative());
    }
}
