//! Detailed chains built directly from routes.

use crate::extraction::pairwise;
use crate::graph::{get_line_numbers, ImportGraph};
use crate::types::{Chain, ChainError, DetailedChain, Link, Module, Route};

fn link<G: ImportGraph + ?Sized>(graph: &G, importer: &Module, imported: &Module) -> Link {
    Link::new(
        importer.clone(),
        imported.clone(),
        get_line_numbers(graph, importer, imported),
    )
}

/// Build a detailed chain from a route, looking up line numbers in `graph`.
///
/// The first head and tail (by name) make up the primary chain with the
/// middle; the other heads and tails become extras.
pub fn build_detailed_chain_from_route<G: ImportGraph + ?Sized>(
    route: &Route,
    graph: &G,
) -> Result<DetailedChain, ChainError> {
    if route.heads.is_empty() || route.middle.is_empty() || route.tails.is_empty() {
        return Err(ChainError::EmptyRoute);
    }

    let start = route.middle_start();
    let end = route.middle_end();
    let mut heads = route.heads.iter();
    let mut tails = route.tails.iter();
    let (Some(primary_head), Some(primary_tail)) = (heads.next(), tails.next()) else {
        return Err(ChainError::EmptyRoute);
    };

    let extra_firsts = heads.map(|head| link(graph, head, start)).collect();
    let extra_lasts = tails.map(|tail| link(graph, end, tail)).collect();

    let mut path = Vec::with_capacity(route.middle.len() + 2);
    path.push(primary_head.clone());
    path.extend(route.middle.iter().cloned());
    path.push(primary_tail.clone());

    let links = pairwise(&path)
        .map(|(importer, imported)| link(graph, importer, imported))
        .collect();

    Ok(DetailedChain::new(Chain::new(links)?, extra_firsts, extra_lasts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::InMemoryImportGraph;
    use crate::types::LineNumbers;
    use std::collections::BTreeSet;

    fn set(names: &[&str]) -> BTreeSet<Module> {
        names.iter().map(|n| Module::new(*n)).collect()
    }

    #[test]
    fn test_route_to_detailed_chain() {
        let mut graph = InMemoryImportGraph::new();
        graph.add_import("a.two", "m1", Some(4));
        graph.add_import("a.one", "m1", Some(3));
        graph.add_import("m1", "m2", Some(8));
        graph.add_import("m2", "z.b", Some(11));
        graph.add_import("m2", "z.a", Some(10));

        let route = Route::new(
            set(&["a.two", "a.one"]),
            vec!["m1".into(), "m2".into()],
            set(&["z.b", "z.a"]),
        )
        .unwrap();

        let detailed = build_detailed_chain_from_route(&route, &graph).unwrap();

        let path: Vec<_> = detailed.modules().iter().map(|m| m.name()).collect();
        assert_eq!(path, vec!["a.one", "m1", "m2", "z.a"]);
        assert_eq!(detailed.extra_firsts.len(), 1);
        assert_eq!(detailed.extra_firsts[0].importer.name(), "a.two");
        assert_eq!(detailed.extra_firsts[0].line_numbers, LineNumbers::known(4));
        assert_eq!(detailed.extra_lasts.len(), 1);
        assert_eq!(detailed.extra_lasts[0].imported.name(), "z.b");
    }

    #[test]
    fn test_missing_details_are_unknown() {
        let graph = InMemoryImportGraph::new();
        let route = Route::new(set(&["a"]), vec!["m".into()], set(&["z"])).unwrap();

        let detailed = build_detailed_chain_from_route(&route, &graph).unwrap();
        assert!(detailed.chain.links().iter().all(|l| l.line_numbers.is_unknown()));
    }

    #[test]
    fn test_empty_route_rejected() {
        let graph = InMemoryImportGraph::new();
        let route = Route {
            heads: set(&["a"]),
            middle: vec![],
            tails: set(&["z"]),
        };
        assert_eq!(
            build_detailed_chain_from_route(&route, &graph),
            Err(ChainError::EmptyRoute)
        );
    }
}
