//! Attaches a parsed criterion to a rule's match chain.
//!
//! An absolute criterion becomes its own node at the end of the chain. A
//! relative one is folded into the nearest content node at or before the
//! current tail: the content node's `isdataat` offset and flags are written,
//! no node is appended, and the criterion is released. The content matcher
//! performs the check later, when it evaluates that content node.

use crate::chain::{ChainAccess, ContentFlags, NodeId, NodeKind, NodePayload};
use crate::criterion::{release, Criterion};
use crate::error::SetupError;
use tracing::{debug, warn};

/// Where a criterion ended up after [`attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linked {
    /// Appended as a standalone node with this id.
    Appended(NodeId),
    /// Folded into the content node with this id.
    Folded { content: NodeId },
}

/// Attach `criterion` to the chain whose current last node is `tail`.
///
/// On error the chain is left exactly as it was and the criterion has been
/// released.
pub fn attach<C>(
    chain: &mut C,
    tail: Option<NodeId>,
    criterion: Box<Criterion>,
) -> Result<Linked, SetupError>
where
    C: ChainAccess + ?Sized,
{
    if !criterion.is_relative() {
        let offset = criterion.offset();
        let id = chain.append(NodePayload::Isdataat(criterion))?;
        debug!(node = id, offset, "isdataat appended as standalone match node");
        return Ok(Linked::Appended(id));
    }

    let is_content = |kind: NodeKind| kind == NodeKind::Content;
    let Some(target) = chain.find_preceding(tail, &is_content) else {
        warn!(
            offset = criterion.offset(),
            "isdataat relative used without a preceding content match"
        );
        release(criterion);
        return Err(SetupError::NoPrecedingContent);
    };

    // only misses if the chain's kind tags disagree with its payloads
    let Some(content) = chain.content_mut(target) else {
        release(criterion);
        return Err(SetupError::NoPrecedingContent);
    };

    content.isdataat = criterion.offset();
    content.flags.insert(ContentFlags::ISDATAAT_RELATIVE);
    if criterion.is_rawbytes() {
        content.flags.insert(ContentFlags::ISDATAAT_RAWBYTES);
    }

    debug!(
        content = target,
        offset = criterion.offset(),
        rawbytes = criterion.is_rawbytes(),
        "isdataat folded into preceding content match"
    );
    release(criterion);
    Ok(Linked::Folded { content: target })
}
