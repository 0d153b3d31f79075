//! Runtime check for absolute `isdataat` criteria.
//!
//! Only the buffer length is inspected. Relative criteria are never decided
//! here: they were folded into a content node at setup time and the content
//! matcher checks them.

use crate::config::ParallelConfig;
use crate::criterion::Criterion;
use rayon::prelude::*;

/// True iff `buffer_len >= criterion.offset()`.
///
/// An offset equal to the buffer length counts as present. A relative
/// criterion always yields `false`.
///
/// # Examples
///
/// ```rust
/// use isdataat::{matches, Criterion};
///
/// assert!(matches(&Criterion::absolute(50), 190));
/// assert!(matches(&Criterion::absolute(190), 190));
/// assert!(!matches(&Criterion::absolute(6000), 190));
/// ```
#[inline]
pub fn matches(criterion: &Criterion, buffer_len: usize) -> bool {
    if criterion.is_relative() {
        tracing::trace!(
            offset = criterion.offset(),
            "relative isdataat is checked by the content matcher"
        );
        return false;
    }
    buffer_len as u64 >= u64::from(criterion.offset())
}

/// [`matches`] against a byte buffer.
#[inline]
pub fn matches_buffer(criterion: &Criterion, buffer: &[u8]) -> bool {
    matches(criterion, buffer.len())
}

/// Evaluate one criterion against many independent buffers.
///
/// Results are returned in input order. Large batches are split across the
/// rayon thread pool according to `config`.
pub fn evaluate_batch<B>(criterion: &Criterion, buffers: &[B], config: &ParallelConfig) -> Vec<bool>
where
    B: AsRef<[u8]> + Sync,
{
    if config.should_parallelize(buffers.len()) {
        buffers
            .par_iter()
            .map(|buffer| matches_buffer(criterion, buffer.as_ref()))
            .collect()
    } else {
        buffers
            .iter()
            .map(|buffer| matches_buffer(criterion, buffer.as_ref()))
            .collect()
    }
}
