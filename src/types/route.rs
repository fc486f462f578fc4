//! Routes: paths with interchangeable heads and tails.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::link::ChainError;
use super::module::Module;

/// A path whose ends may be any of several modules.
///
/// Every head directly imports `middle[0]`, consecutive `middle` modules
/// import each other, and `middle[last]` directly imports every tail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Modules importing the start of the middle.
    pub heads: BTreeSet<Module>,
    /// Intermediate modules, in order.
    pub middle: Vec<Module>,
    /// Modules imported by the end of the middle.
    pub tails: BTreeSet<Module>,
}

impl Route {
    /// Create a route, rejecting empty heads, middle or tails.
    pub fn new(
        heads: BTreeSet<Module>,
        middle: Vec<Module>,
        tails: BTreeSet<Module>,
    ) -> Result<Self, ChainError> {
        if heads.is_empty() || middle.is_empty() || tails.is_empty() {
            return Err(ChainError::EmptyRoute);
        }
        Ok(Self { heads, middle, tails })
    }

    /// First middle module.
    pub fn middle_start(&self) -> &Module {
        &self.middle[0]
    }

    /// Last middle module.
    pub fn middle_end(&self) -> &Module {
        &self.middle[self.middle.len() - 1]
    }
}
