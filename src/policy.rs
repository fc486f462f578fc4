//! Chain reporting policy.
//!
//! A policy fixes everything that changes the output of an analysis besides
//! the graph itself: which strategy runs, how many chains are reported per
//! package pair, and how notes are indented. Its `params_hash` identifies the
//! configuration in logs and stored reports.

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash_hex;
use crate::render::DEFAULT_INDENT;
use crate::strategy::StrategyKind;
use crate::DEFAULT_POLICY_VERSION;

/// Configuration for chain analysis and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainPolicy {
    /// How chains are discovered.
    pub strategy: StrategyKind,
    /// Maximum chains reported per package pair; `None` reports all.
    pub max_chains: Option<usize>,
    /// Spaces before every note after the first.
    pub indent: usize,
}

impl Default for ChainPolicy {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Iterative,
            max_chains: None,
            indent: DEFAULT_INDENT,
        }
    }
}

/// Hashed form of the parameters, tagged with the policy version.
#[derive(Serialize)]
struct PolicyParams<'a> {
    version: &'a str,
    strategy: StrategyKind,
    max_chains: Option<usize>,
    indent: usize,
}

impl ChainPolicy {
    /// Policy that reports at most `max_chains` chains per pair.
    pub fn with_max_chains(max_chains: usize) -> Self {
        Self {
            max_chains: Some(max_chains),
            ..Self::default()
        }
    }

    /// Load a policy from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Policy version identifier.
    pub fn policy_id(&self) -> &'static str {
        DEFAULT_POLICY_VERSION
    }

    /// Canonical hash of the parameters.
    pub fn params_hash(&self) -> String {
        canonical_hash_hex(&PolicyParams {
            version: self.policy_id(),
            strategy: self.strategy,
            max_chains: self.max_chains,
            indent: self.indent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = ChainPolicy::default();
        assert_eq!(policy.strategy, StrategyKind::Iterative);
        assert_eq!(policy.max_chains, None);
        assert_eq!(policy.indent, 2);
    }

    #[test]
    fn test_from_json_partial() {
        let policy = ChainPolicy::from_json(r#"{"strategy": "route", "max_chains": 3}"#).unwrap();
        assert_eq!(policy.strategy, StrategyKind::Route);
        assert_eq!(policy.max_chains, Some(3));
        assert_eq!(policy.indent, 2);
    }

    #[test]
    fn test_from_json_rejects_unknown_strategy() {
        assert!(ChainPolicy::from_json(r#"{"strategy": "dfs"}"#).is_err());
    }

    #[test]
    fn test_params_hash() {
        let a = ChainPolicy::default();
        let b = ChainPolicy::default();
        assert_eq!(a.params_hash(), b.params_hash());
        assert_ne!(a.params_hash(), ChainPolicy::with_max_chains(1).params_hash());
    }
}
