//! Shortest-chain extraction.
//!
//! Chains are pulled one at a time from a disposable copy of the graph. Each
//! chain's imports are removed before the next search, so successive chains
//! never share an edge and the sequence always ends.
//!
//! ## Precondition
//!
//! Direct imports from the importer to the imported module must be removed
//! from the disposable graph first. A two-module chain is reported as
//! [`ChainError::DirectChain`].

use tracing::{debug, error};

use crate::graph::{get_line_numbers, ImportGraph};
use crate::types::{ChainError, Link, Module, Segment};

/// Lazy sequence of shortest chains, removing each one from the graph as
/// it is yielded.
pub struct ShortestChains<'g, G: ImportGraph + ?Sized> {
    graph: &'g mut G,
    importer: Module,
    imported: Module,
    exhausted: bool,
}

impl<'g, G: ImportGraph + ?Sized> ShortestChains<'g, G> {
    /// Start popping chains from `graph`.
    pub fn new(graph: &'g mut G, importer: Module, imported: Module) -> Self {
        Self {
            graph,
            importer,
            imported,
            exhausted: false,
        }
    }
}

impl<'g, G: ImportGraph + ?Sized> Iterator for ShortestChains<'g, G> {
    type Item = Vec<Module>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let chain = match self.graph.find_shortest_chain(&self.importer, &self.imported) {
            // A chain without an edge would never be removed.
            Some(chain) if chain.len() >= 2 => chain,
            _ => {
                self.exhausted = true;
                return None;
            }
        };

        for pair in chain.windows(2) {
            self.graph.remove_import(&pair[0], &pair[1]);
        }

        debug!(
            importer = %self.importer,
            imported = %self.imported,
            length = chain.len(),
            "Popped shortest chain"
        );
        Some(chain)
    }
}

/// Pop shortest chains from `graph` until none remain.
pub fn pop_shortest_chains<'g, G: ImportGraph + ?Sized>(
    graph: &'g mut G,
    importer: &Module,
    imported: &Module,
) -> ShortestChains<'g, G> {
    ShortestChains::new(graph, importer.clone(), imported.clone())
}

/// Consecutive pairs of a module sequence.
pub fn pairwise(modules: &[Module]) -> impl Iterator<Item = (&Module, &Module)> {
    modules.windows(2).map(|pair| (&pair[0], &pair[1]))
}

/// Lazy sequence of segments: shortest chains with line numbers attached
/// from `reference`.
///
/// `graph` is mutated; `reference` must be an unmutated copy, since removed
/// imports lose their details.
pub fn iter_segments<'g, G: ImportGraph + ?Sized + 'g>(
    graph: &'g mut G,
    reference: &'g G,
    importer: &Module,
    imported: &Module,
) -> impl Iterator<Item = Result<Segment, ChainError>> + 'g {
    pop_shortest_chains(graph, importer, imported).map(move |chain| {
        if let [head, tail] = chain.as_slice() {
            error!(importer = %head, imported = %tail, "Direct chain found during extraction");
            return Err(ChainError::DirectChain {
                importer: head.clone(),
                imported: tail.clone(),
            });
        }

        let links = pairwise(&chain)
            .map(|(link_importer, link_imported)| {
                Link::new(
                    link_importer.clone(),
                    link_imported.clone(),
                    get_line_numbers(reference, link_importer, link_imported),
                )
            })
            .collect();
        Segment::new(links)
    })
}

/// Every headless and tailless chain from `importer` to `imported`.
///
/// Two graphs are passed in: the first is mutated, the second is only used
/// to look up import details that mutation removes.
pub fn find_segments<G: ImportGraph + ?Sized>(
    graph: &mut G,
    reference: &G,
    importer: &Module,
    imported: &Module,
) -> Result<Vec<Segment>, ChainError> {
    iter_segments(graph, reference, importer, imported).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::InMemoryImportGraph;

    fn m(name: &str) -> Module {
        Module::new(name)
    }

    fn names(chain: &[Module]) -> Vec<&str> {
        chain.iter().map(Module::name).collect()
    }

    #[test]
    fn test_pops_shortest_first_and_removes_edges() {
        let mut graph = InMemoryImportGraph::new();
        graph.add_import("a", "b", None);
        graph.add_import("b", "z", None);
        graph.add_import("a", "c", None);
        graph.add_import("c", "d", None);
        graph.add_import("d", "z", None);

        let chains: Vec<_> = pop_shortest_chains(&mut graph, &m("a"), &m("z")).collect();

        assert_eq!(chains.len(), 2);
        assert_eq!(names(&chains[0]), vec!["a", "b", "z"]);
        assert_eq!(names(&chains[1]), vec!["a", "c", "d", "z"]);
        assert_eq!(graph.count_imports(), 0);
    }

    #[test]
    fn test_no_path_is_empty() {
        let mut graph = InMemoryImportGraph::new();
        graph.add_import("z", "a", None);
        assert_eq!(pop_shortest_chains(&mut graph, &m("a"), &m("z")).count(), 0);
    }

    #[test]
    fn test_shared_edge_is_reported_once() {
        // a -> b is shared by both routes; once popped, the longer route is gone.
        let mut graph = InMemoryImportGraph::new();
        graph.add_import("a", "b", None);
        graph.add_import("b", "z", None);
        graph.add_import("b", "c", None);
        graph.add_import("c", "z", None);

        let chains: Vec<_> = pop_shortest_chains(&mut graph, &m("a"), &m("z")).collect();
        assert_eq!(chains.len(), 1);
        assert!(graph.find_shortest_chain(&m("a"), &m("z")).is_none());
    }

    #[test]
    fn test_segments_take_line_numbers_from_reference() {
        let mut reference = InMemoryImportGraph::new();
        reference.add_import("a", "b", Some(10));
        reference.add_import("b", "z", Some(20));
        let mut graph = reference.clone();

        let segments = find_segments(&mut graph, &reference, &m("a"), &m("z")).unwrap();

        assert_eq!(segments.len(), 1);
        let lines: Vec<String> = segments[0]
            .links()
            .iter()
            .map(|link| link.line_numbers.to_string())
            .collect();
        assert_eq!(lines, vec!["l.10", "l.20"]);
    }

    #[test]
    fn test_direct_chain_is_invariant_violation() {
        let mut graph = InMemoryImportGraph::new();
        graph.add_import("a", "z", None);
        let reference = graph.clone();

        let result = find_segments(&mut graph, &reference, &m("a"), &m("z"));
        assert_eq!(
            result,
            Err(ChainError::DirectChain {
                importer: m("a"),
                imported: m("z"),
            })
        );
    }

    #[test]
    fn test_pairwise() {
        let modules = vec![m("a"), m("b"), m("c")];
        let pairs: Vec<_> = pairwise(&modules)
            .map(|(x, y)| (x.name(), y.name()))
            .collect();
        assert_eq!(pairs, vec![("a", "b"), ("b", "c")]);
    }

    #[test]
    fn test_popper_outlives_borrowed_endpoints() {
        let mut graph = InMemoryImportGraph::new();
        graph.add_import("a", "b", None);
        graph.add_import("b", "z", None);

        let mut chains = {
            let importer = m("a");
            let imported = m("z");
            pop_shortest_chains(&mut graph, &importer, &imported)
        };
        assert_eq!(chains.next().map(|chain| chain.len()), Some(3));
        assert!(chains.next().is_none());
    }
}
