//! Interchangeable ways of building detailed chains.
//!
//! [`IterativeStrategy`] pops shortest chains off a disposable copy of the
//! graph and collapses them against the reference copy. [`RouteStrategy`]
//! asks the graph for routes in one query. Given the same graph both produce
//! the same detailed chains.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::collapse::segments_to_collapsed_chains;
use crate::extraction::iter_segments;
use crate::graph::{ImportGraph, RouteQuery};
use crate::route::build_detailed_chain_from_route;
use crate::types::{ChainError, DetailedChain, Module};

/// Builds every detailed chain from one package to another.
pub trait ChainStrategy<G: ImportGraph + ?Sized> {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Detailed chains from the `importer` package to the `imported`
    /// package, excluding direct imports between them. `reference` is never
    /// mutated.
    fn detailed_chains(
        &self,
        reference: &G,
        importer: &Module,
        imported: &Module,
    ) -> Result<Vec<DetailedChain>, ChainError>;
}

/// Which strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Extract and collapse shortest chains.
    Iterative,
    /// Query routes directly.
    Route,
}

impl StrategyKind {
    /// Parse strategy kind from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "iterative" | "" => Some(Self::Iterative),
            "route" => Some(Self::Route),
            _ => None,
        }
    }
}

impl Default for StrategyKind {
    fn default() -> Self {
        Self::Iterative
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iterative => write!(f, "iterative"),
            Self::Route => write!(f, "route"),
        }
    }
}

/// Packages that contain one another have no chains between them.
fn overlapping(importer: &Module, imported: &Module) -> bool {
    importer.is_in_package(imported) || imported.is_in_package(importer)
}

/// Extract-and-collapse strategy.
///
/// Works on a private clone of the reference graph in which both packages
/// are squashed and the direct import between them is removed.
#[derive(Debug, Clone, Default)]
pub struct IterativeStrategy {
    /// Stop after this many chains.
    pub max_chains: Option<usize>,
}

impl IterativeStrategy {
    /// Create a strategy with an optional chain cap.
    pub fn new(max_chains: Option<usize>) -> Self {
        Self { max_chains }
    }
}

impl<G: ImportGraph + Clone> ChainStrategy<G> for IterativeStrategy {
    fn name(&self) -> &'static str {
        "iterative"
    }

    fn detailed_chains(
        &self,
        reference: &G,
        importer: &Module,
        imported: &Module,
    ) -> Result<Vec<DetailedChain>, ChainError> {
        if overlapping(importer, imported) {
            debug!(importer = %importer, imported = %imported, "Packages overlap; no chains");
            return Ok(Vec::new());
        }

        let mut scratch = reference.clone();
        scratch.squash_module(importer);
        scratch.squash_module(imported);
        scratch.remove_import(importer, imported);

        let segments = iter_segments(&mut scratch, reference, importer, imported)
            .take(self.max_chains.unwrap_or(usize::MAX))
            .collect::<Result<Vec<_>, _>>()?;
        let chains = segments_to_collapsed_chains(reference, &segments, importer, imported)?;

        info!(
            strategy = "iterative",
            importer = %importer,
            imported = %imported,
            chains = chains.len(),
            "Assembled detailed chains"
        );
        Ok(chains)
    }
}

/// One-shot route strategy.
#[derive(Debug, Clone, Default)]
pub struct RouteStrategy {
    /// Stop after this many chains.
    pub max_chains: Option<usize>,
}

impl RouteStrategy {
    /// Create a strategy with an optional chain cap.
    pub fn new(max_chains: Option<usize>) -> Self {
        Self { max_chains }
    }
}

impl<G: RouteQuery + ?Sized> ChainStrategy<G> for RouteStrategy {
    fn name(&self) -> &'static str {
        "route"
    }

    fn detailed_chains(
        &self,
        reference: &G,
        importer: &Module,
        imported: &Module,
    ) -> Result<Vec<DetailedChain>, ChainError> {
        if overlapping(importer, imported) {
            debug!(importer = %importer, imported = %imported, "Packages overlap; no chains");
            return Ok(Vec::new());
        }

        let chains = reference
            .find_shortest_routes(importer, imported)
            .iter()
            .take(self.max_chains.unwrap_or(usize::MAX))
            .map(|route| build_detailed_chain_from_route(route, reference))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            strategy = "route",
            importer = %importer,
            imported = %imported,
            chains = chains.len(),
            "Assembled detailed chains"
        );
        Ok(chains)
    }
}
