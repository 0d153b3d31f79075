//! # isdataat
//!
//! The `isdataat` rule keyword for a signature-based packet matching engine:
//! a test that data is present at a given byte offset of the inspected buffer.
//!
//! The option text `isdataat:<offset>[,relative[,rawbytes]]` is parsed into a
//! [`Criterion`]. An absolute criterion becomes its own node in the rule's
//! match chain and is evaluated per buffer with [`matches`]. A relative one is
//! folded into the nearest preceding content match node; the content matcher
//! checks it later, measured from the end of its own match.
//!
//! ## Quick Start
//!
//! ```rust
//! use isdataat::{KeywordRegistry, Rule};
//!
//! let registry = KeywordRegistry::new();
//!
//! let mut rule = Rule::with_name(1, "HTTP redirect with body");
//! rule.add_content("HTTP/1.1 302")?;
//! // folded into the content node above, no node appended
//! assert_eq!(rule.setup_option(&registry, "isdataat", "10,relative")?, None);
//! // standalone node, evaluated by this crate
//! assert!(rule.setup_option(&registry, "isdataat", "50")?.is_some());
//!
//! assert!(rule.evaluate(&registry, &[0u8; 190]));
//! assert!(!rule.evaluate(&registry, &[0u8; 20]));
//! # Ok::<(), isdataat::IsdataatError>(())
//! ```
//!
//! ## Linking without a rule
//!
//! ```rust
//! use isdataat::{attach, parse, ChainAccess, ContentData, Linked, MatchChain, NodePayload};
//!
//! let mut chain = MatchChain::new();
//! chain.append(NodePayload::Content(ContentData::new("GET")))?;
//!
//! let criterion = Box::new(parse("4, relative, rawbytes")?);
//! let tail = chain.tail();
//! assert_eq!(attach(&mut chain, tail, criterion)?, Linked::Folded { content: 0 });
//! assert_eq!(chain.content(0).map(|c| c.isdataat), Some(4));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod chain;
pub mod config;
pub mod criterion;
pub mod error;
pub mod evaluator;
pub mod keyword;
pub mod linker;
pub mod parser;
pub mod rule;

pub use chain::{
    ChainAccess, ContentData, ContentFlags, MatchChain, MatchNode, NodeId, NodeKind, NodePayload,
};
pub use config::{EngineConfig, KeywordConfig, ParallelConfig};
pub use criterion::{release, Criterion, ISDATAAT_MAX, ISDATAAT_MIN};
pub use error::{IsdataatError, ParseError, Result, SetupError};
pub use evaluator::{evaluate_batch, matches, matches_buffer};
pub use keyword::{IsdataatKeyword, Keyword, KeywordRegistry, ISDATAAT_KEYWORD};
pub use linker::{attach, Linked};
pub use parser::{parse, parse_with_config, MAX_OFFSET_DIGITS};
pub use rule::{Rule, RuleId};
