//! Chain analyzer.
//!
//! Ties a reference graph to a [`ChainPolicy`]: finds the detailed chains
//! between a forbidden pair of packages with the configured strategy and
//! renders them as notes.

use std::sync::Arc;
use tracing::info;

use crate::graph::RouteQuery;
use crate::policy::ChainPolicy;
use crate::render::{notes_from_chain_data, render_to_string, ImportNote};
use crate::strategy::{ChainStrategy, IterativeStrategy, RouteStrategy, StrategyKind};
use crate::types::{ChainError, DetailedChain, Module};

/// Explains why one package reaches another.
///
/// ## Algorithm
///
/// 1. Clone the reference graph into a disposable copy (iterative strategy)
/// 2. Squash both packages and drop the direct import between them
/// 3. Pop shortest chains until none remain, removing each as it is found
/// 4. Collapse each chain against the reference graph, collecting sibling
///    imports at its first and last hop
/// 5. Render each detailed chain as an ordered list of notes
///
/// The reference graph is shared read-only, so one analyzer can serve many
/// package pairs, including from several threads.
pub struct ChainAnalyzer<G> {
    graph: Arc<G>,
    policy: ChainPolicy,
}

impl<G: RouteQuery + Clone> ChainAnalyzer<G> {
    /// Create a new analyzer.
    pub fn new(graph: Arc<G>, policy: ChainPolicy) -> Self {
        Self { graph, policy }
    }

    /// Create an analyzer with the default policy.
    pub fn with_default_policy(graph: Arc<G>) -> Self {
        Self::new(graph, ChainPolicy::default())
    }

    /// Detailed chains from the `importer` package to the `imported` package.
    ///
    /// An empty result means the packages are not indirectly connected.
    pub fn detailed_chains(
        &self,
        importer: &Module,
        imported: &Module,
    ) -> Result<Vec<DetailedChain>, ChainError> {
        let graph = self.graph.as_ref();
        let chains = match self.policy.strategy {
            StrategyKind::Iterative => {
                IterativeStrategy::new(self.policy.max_chains).detailed_chains(graph, importer, imported)?
            }
            StrategyKind::Route => {
                RouteStrategy::new(self.policy.max_chains).detailed_chains(graph, importer, imported)?
            }
        };

        info!(
            policy = self.policy.policy_id(),
            params_hash = %self.policy.params_hash(),
            importer = %importer,
            imported = %imported,
            chains = chains.len(),
            "Analyzed package pair"
        );
        Ok(chains)
    }

    /// Notes for every detailed chain, one list per chain.
    pub fn notes(&self, importer: &Module, imported: &Module) -> Result<Vec<Vec<ImportNote>>, ChainError> {
        Ok(self
            .detailed_chains(importer, imported)?
            .iter()
            .map(notes_from_chain_data)
            .collect())
    }

    /// Rendered report: one block per chain, separated by blank lines.
    pub fn report(&self, importer: &Module, imported: &Module) -> Result<String, ChainError> {
        let blocks: Vec<String> = self
            .notes(importer, imported)?
            .iter()
            .map(|notes| render_to_string(notes, self.policy.indent))
            .collect();
        Ok(blocks.join("\n"))
    }

    /// Get the policy.
    pub fn policy(&self) -> &ChainPolicy {
        &self.policy
    }

    /// Get a reference to the graph.
    pub fn graph(&self) -> &G {
        &self.graph
    }
}
