//! Fully annotated chains.

use serde::{Deserialize, Serialize};

use super::link::{Chain, Link};
use super::module::Module;
use crate::canonical::canonical_hash_hex;

/// A primary chain plus the sibling imports that share its boundaries.
///
/// `extra_firsts` are other imports from the importer package into the
/// chain's first intermediate module; `extra_lasts` are other imports from
/// the chain's last intermediate module into the imported package. Both are
/// sorted by module name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetailedChain {
    /// Primary chain with real head and tail modules.
    pub chain: Chain,
    /// Additional head imports, excluding the one in `chain`.
    pub extra_firsts: Vec<Link>,
    /// Additional tail imports, excluding the one in `chain`.
    pub extra_lasts: Vec<Link>,
}

impl DetailedChain {
    /// Create a detailed chain.
    pub fn new(chain: Chain, extra_firsts: Vec<Link>, extra_lasts: Vec<Link>) -> Self {
        Self {
            chain,
            extra_firsts,
            extra_lasts,
        }
    }

    /// A detailed chain with no sibling imports.
    pub fn bare(chain: Chain) -> Self {
        Self::new(chain, Vec::new(), Vec::new())
    }

    /// Module path of the primary chain.
    pub fn modules(&self) -> Vec<&Module> {
        self.chain.modules()
    }

    /// Total number of import edges reported, primary and extra.
    pub fn num_links(&self) -> usize {
        self.chain.len() + self.extra_firsts.len() + self.extra_lasts.len()
    }

    /// Canonical hex hash; identical values always hash identically.
    pub fn fingerprint(&self) -> String {
        canonical_hash_hex(self)
    }
}
