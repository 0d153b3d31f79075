//! The parsed value of an `isdataat` option.
//!
//! A [`Criterion`] is created by the parser and boxed so its ownership can be
//! handed to exactly one place: a standalone match node in the rule's chain,
//! or [`release`] once its data has been folded into a content node.

use serde::{Deserialize, Serialize};

/// Smallest offset accepted by default.
pub const ISDATAAT_MIN: u32 = 0;

/// Largest offset accepted by default.
pub const ISDATAAT_MAX: u32 = 65535;

/// Structured, validated form of an `isdataat` option.
///
/// `rawbytes` is only ever set together with `relative`. Deserialization
/// enforces the same rule as the constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CriterionRepr")]
pub struct Criterion {
    offset: u32,
    relative: bool,
    rawbytes: bool,
}

impl Criterion {
    /// A criterion tested from the start of the buffer.
    pub fn absolute(offset: u32) -> Self {
        Self {
            offset,
            relative: false,
            rawbytes: false,
        }
    }

    /// A criterion tested from the end of the last content match.
    pub fn relative(offset: u32, rawbytes: bool) -> Self {
        Self {
            offset,
            relative: true,
            rawbytes,
        }
    }

    /// Number of bytes that must be present.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Whether the offset counts from the end of the last content match.
    pub fn is_relative(&self) -> bool {
        self.relative
    }

    /// Whether the check applies to the raw buffer rather than a normalized one.
    pub fn is_rawbytes(&self) -> bool {
        self.rawbytes
    }
}

#[derive(Deserialize)]
struct CriterionRepr {
    offset: u32,
    #[serde(default)]
    relative: bool,
    #[serde(default)]
    rawbytes: bool,
}

impl TryFrom<CriterionRepr> for Criterion {
    type Error = String;

    fn try_from(repr: CriterionRepr) -> Result<Self, Self::Error> {
        match (repr.relative, repr.rawbytes) {
            (false, true) => Err("rawbytes requires relative".to_string()),
            (false, false) => Ok(Criterion::absolute(repr.offset)),
            (true, rawbytes) => Ok(Criterion::relative(repr.offset, rawbytes)),
        }
    }
}

/// Dispose of a criterion that is no longer referenced.
///
/// Taking the box by value makes a second release or a later read a compile
/// error.
pub fn release(criterion: Box<Criterion>) {
    tracing::trace!(offset = criterion.offset, "releasing isdataat criterion");
    drop(criterion);
}
