//! Shared fixtures for isdataat benchmarks.

use isdataat::{KeywordRegistry, Rule};

/// Option strings covering every accepted shape.
pub const OPTIONS: &[&str] = &[
    "50",
    "  1500 ",
    "30, relative",
    "30,relative, rawbytes ",
    "65535,relative,rawbytes",
];

/// Option strings the parser must reject.
pub const REJECTED_OPTIONS: &[&str] = &["", "abc", "-5", "30,rawbytes", "12345678901", "70000"];

/// Buffers of assorted lengths, from empty up to a jumbo frame.
pub fn create_buffers(count: usize) -> Vec<Vec<u8>> {
    (0..count).map(|i| vec![0u8; (i * 37) % 9001]).collect()
}

/// A rule with a content node, a folded relative check and `standalone`
/// absolute checks.
pub fn create_rule(registry: &KeywordRegistry, standalone: usize) -> anyhow::Result<Rule> {
    let mut rule = Rule::with_name(1, "benchmark rule");
    rule.add_content("HTTP/1.1")?;
    rule.setup_option(registry, "isdataat", "10,relative")?;

    for i in 0..standalone {
        let offset = (i * 100).to_string();
        rule.setup_option(registry, "isdataat", &offset)?;
    }

    if rule.chain().len() != standalone + 1 {
        anyhow::bail!(
            "expected {} nodes, chain has {}",
            standalone + 1,
            rule.chain().len()
        );
    }
    Ok(rule)
}
