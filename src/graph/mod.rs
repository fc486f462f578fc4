//! Import graph collaborator interface.
//!
//! The chain algorithms never search or store the graph themselves; they
//! drive an [`ImportGraph`] implementation. Implementations must be
//! deterministic: the same graph state answers the same query identically.

pub mod memory;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::types::{LineNumbers, Module, Route};

/// Provenance record for one import statement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ImportDetail {
    /// Module containing the import.
    pub importer: Module,
    /// Module imported.
    pub imported: Module,
    /// Line of the import statement, if known.
    pub line_number: Option<u32>,
    /// Source text of the import statement, if known.
    pub line_contents: Option<String>,
}

/// Operations the chain algorithms need from an import graph.
///
/// Queries are synchronous and treated as atomic. Mutating methods are only
/// ever called on a disposable copy; the reference copy is read-only for the
/// whole analysis.
pub trait ImportGraph {
    /// Shortest chain of modules (by edge count) from `importer` to
    /// `imported`, both ends included. `None` when no chain exists or the
    /// two modules are the same.
    fn find_shortest_chain(&self, importer: &Module, imported: &Module) -> Option<Vec<Module>>;

    /// Remove the direct import, if present.
    fn remove_import(&mut self, importer: &Module, imported: &Module);

    /// Fold every descendant of `module` into `module` itself, rewiring
    /// their imports onto it.
    fn squash_module(&mut self, module: &Module);

    /// Details for the direct import; empty when there is no such import.
    fn import_details(&self, importer: &Module, imported: &Module) -> Vec<ImportDetail>;

    /// Modules with a direct import of `module`.
    fn find_modules_that_directly_import(&self, module: &Module) -> BTreeSet<Module>;

    /// Modules directly imported by `module`.
    fn find_modules_directly_imported_by(&self, module: &Module) -> BTreeSet<Module>;
}

/// Graphs that can answer a route query in one call.
pub trait RouteQuery: ImportGraph {
    /// Every route from the `importer` package to the `imported` package,
    /// shortest first. Direct imports between the packages are excluded and
    /// routes never share an edge.
    fn find_shortest_routes(&self, importer: &Module, imported: &Module) -> Vec<Route>;
}

/// Line numbers recorded for a direct import, or a single unknown entry
/// when the graph has no details for it.
pub fn get_line_numbers<G: ImportGraph + ?Sized>(
    graph: &G,
    importer: &Module,
    imported: &Module,
) -> LineNumbers {
    LineNumbers::from_details(
        graph
            .import_details(importer, imported)
            .into_iter()
            .map(|detail| detail.line_number),
    )
}

pub use memory::InMemoryImportGraph;
