//! In-memory import graph.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::{ImportDetail, ImportGraph, RouteQuery};
use crate::types::{Module, Route};

/// In-memory import graph.
///
/// Uses BTreeMap/BTreeSet so that neighbour iteration, and therefore
/// shortest-path tie-breaking, is deterministic. Cheap to clone into a
/// disposable copy for chain extraction.
#[derive(Debug, Clone, Default)]
pub struct InMemoryImportGraph {
    /// Every module, including ones without imports.
    modules: BTreeSet<Module>,
    /// Importer -> imported modules.
    imports: BTreeMap<Module, BTreeSet<Module>>,
    /// Imported -> importer modules.
    importers: BTreeMap<Module, BTreeSet<Module>>,
    /// Import statements by (importer, imported).
    details: BTreeMap<(Module, Module), Vec<ImportDetail>>,
}

impl InMemoryImportGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module with no imports.
    pub fn add_module(&mut self, module: impl Into<Module>) {
        self.modules.insert(module.into());
    }

    /// Add a direct import. A line number, when given, is kept as an import detail.
    pub fn add_import(
        &mut self,
        importer: impl Into<Module>,
        imported: impl Into<Module>,
        line_number: Option<u32>,
    ) {
        let importer = importer.into();
        let imported = imported.into();
        self.insert_edge(&importer, &imported);

        if line_number.is_some() {
            self.push_detail(ImportDetail {
                importer,
                imported,
                line_number,
                line_contents: None,
            });
        }
    }

    /// Add a direct import along with the text of the import statement.
    pub fn add_import_with_contents(
        &mut self,
        importer: impl Into<Module>,
        imported: impl Into<Module>,
        line_number: u32,
        line_contents: impl Into<String>,
    ) {
        let importer = importer.into();
        let imported = imported.into();
        self.insert_edge(&importer, &imported);
        self.push_detail(ImportDetail {
            importer,
            imported,
            line_number: Some(line_number),
            line_contents: Some(line_contents.into()),
        });
    }

    fn insert_edge(&mut self, importer: &Module, imported: &Module) {
        self.modules.insert(importer.clone());
        self.modules.insert(imported.clone());
        self.imports
            .entry(importer.clone())
            .or_default()
            .insert(imported.clone());
        self.importers
            .entry(imported.clone())
            .or_default()
            .insert(importer.clone());
    }

    fn push_detail(&mut self, detail: ImportDetail) {
        let details = self
            .details
            .entry((detail.importer.clone(), detail.imported.clone()))
            .or_default();
        if !details.contains(&detail) {
            details.push(detail);
            details.sort();
        }
    }

    /// All modules.
    pub fn modules(&self) -> &BTreeSet<Module> {
        &self.modules
    }

    /// Whether the module is in the graph.
    pub fn contains_module(&self, module: &Module) -> bool {
        self.modules.contains(module)
    }

    /// Number of direct imports.
    pub fn count_imports(&self) -> usize {
        self.imports.values().map(BTreeSet::len).sum()
    }

    /// All modules below `module` in the hierarchy.
    pub fn find_descendants(&self, module: &Module) -> BTreeSet<Module> {
        self.modules
            .iter()
            .filter(|m| m.is_descendant_of(module))
            .cloned()
            .collect()
    }

    /// `module` plus its descendants.
    fn package(&self, module: &Module) -> BTreeSet<Module> {
        let mut package = self.find_descendants(module);
        package.insert(module.clone());
        package
    }

    /// Whether `importer` directly imports `imported`. With `as_packages`,
    /// any import from the importer package into the imported package counts.
    pub fn direct_import_exists(&self, importer: &Module, imported: &Module, as_packages: bool) -> bool {
        if !as_packages {
            return self
                .imports
                .get(importer)
                .map_or(false, |targets| targets.contains(imported));
        }
        let targets = self.package(imported);
        self.package(importer).iter().any(|source| {
            self.imports
                .get(source)
                .map_or(false, |imported_by_source| !imported_by_source.is_disjoint(&targets))
        })
    }

    /// Every direct import as (importer, imported) pairs, in order.
    pub fn all_imports(&self) -> Vec<(Module, Module)> {
        self.imports
            .iter()
            .flat_map(|(importer, targets)| {
                targets.iter().map(move |imported| (importer.clone(), imported.clone()))
            })
            .collect()
    }

    /// Shortest path from any source module to any target module, returning
    /// only the modules strictly between them. The path never passes through
    /// a source or target module.
    ///
    /// The sources are treated as one node, so tie-breaking matches a BFS on
    /// a graph where the source package has been squashed.
    fn shortest_middle(
        &self,
        sources: &BTreeSet<Module>,
        targets: &BTreeSet<Module>,
    ) -> Option<Vec<Module>> {
        let outside = |m: &Module| !sources.contains(m) && !targets.contains(m);

        let first_level: BTreeSet<&Module> = sources
            .iter()
            .filter_map(|source| self.imports.get(source))
            .flatten()
            .filter(|m| outside(*m))
            .collect();

        let mut visited: BTreeSet<&Module> = first_level.clone();
        let mut parents: BTreeMap<&Module, &Module> = BTreeMap::new();
        let mut queue: VecDeque<&Module> = first_level.into_iter().collect();

        while let Some(current) = queue.pop_front() {
            for next in self.imports.get(current).into_iter().flatten() {
                if targets.contains(next) {
                    return Some(walk_back(&parents, current));
                }
                if !outside(next) || !visited.insert(next) {
                    continue;
                }
                parents.insert(next, current);
                queue.push_back(next);
            }
        }
        None
    }
}

/// Rebuild a path ending at `end` by following parent links until a node
/// without a parent.
fn walk_back<'a>(parents: &BTreeMap<&'a Module, &'a Module>, end: &'a Module) -> Vec<Module> {
    let mut path = vec![end.clone()];
    let mut current = end;
    while let Some(parent) = parents.get(current) {
        path.push((*parent).clone());
        current = *parent;
    }
    path.reverse();
    path
}

impl ImportGraph for InMemoryImportGraph {
    fn find_shortest_chain(&self, importer: &Module, imported: &Module) -> Option<Vec<Module>> {
        if importer == imported || !self.modules.contains(importer) {
            return None;
        }

        let mut visited: BTreeSet<&Module> = BTreeSet::new();
        let mut parents: BTreeMap<&Module, &Module> = BTreeMap::new();
        let mut queue: VecDeque<&Module> = VecDeque::new();
        visited.insert(importer);
        queue.push_back(importer);

        while let Some(current) = queue.pop_front() {
            for next in self.imports.get(current).into_iter().flatten() {
                if !visited.insert(next) {
                    continue;
                }
                parents.insert(next, current);
                if next == imported {
                    return Some(walk_back(&parents, next));
                }
                queue.push_back(next);
            }
        }
        None
    }

    fn remove_import(&mut self, importer: &Module, imported: &Module) {
        if let Some(targets) = self.imports.get_mut(importer) {
            targets.remove(imported);
        }
        if let Some(sources) = self.importers.get_mut(imported) {
            sources.remove(importer);
        }
        self.details.remove(&(importer.clone(), imported.clone()));
    }

    fn squash_module(&mut self, module: &Module) {
        let descendants = self.find_descendants(module);
        if descendants.is_empty() {
            return;
        }
        self.modules.insert(module.clone());

        for descendant in &descendants {
            let targets: Vec<Module> = self.find_modules_directly_imported_by(descendant).into_iter().collect();
            for target in targets {
                self.remove_import(descendant, &target);
                if target != *module && !descendants.contains(&target) {
                    self.insert_edge(module, &target);
                }
            }

            let sources: Vec<Module> = self.find_modules_that_directly_import(descendant).into_iter().collect();
            for source in sources {
                self.remove_import(&source, descendant);
                if source != *module && !descendants.contains(&source) {
                    self.insert_edge(&source, module);
                }
            }

            self.modules.remove(descendant);
            self.imports.remove(descendant);
            self.importers.remove(descendant);
        }
    }

    fn import_details(&self, importer: &Module, imported: &Module) -> Vec<ImportDetail> {
        self.details
            .get(&(importer.clone(), imported.clone()))
            .cloned()
            .unwrap_or_default()
    }

    fn find_modules_that_directly_import(&self, module: &Module) -> BTreeSet<Module> {
        self.importers.get(module).cloned().unwrap_or_default()
    }

    fn find_modules_directly_imported_by(&self, module: &Module) -> BTreeSet<Module> {
        self.imports.get(module).cloned().unwrap_or_default()
    }
}

impl RouteQuery for InMemoryImportGraph {
    fn find_shortest_routes(&self, importer: &Module, imported: &Module) -> Vec<Route> {
        let heads_package = self.package(importer);
        let tails_package = self.package(imported);
        if !heads_package.is_disjoint(&tails_package) {
            return Vec::new();
        }

        let mut scratch = self.clone();
        for head in &heads_package {
            for tail in self.find_modules_directly_imported_by(head) {
                if tails_package.contains(&tail) {
                    scratch.remove_import(head, &tail);
                }
            }
        }

        let mut routes = Vec::new();
        while let Some(middle) = scratch.shortest_middle(&heads_package, &tails_package) {
            let start = middle[0].clone();
            let end = middle[middle.len() - 1].clone();

            let heads: BTreeSet<Module> = scratch
                .find_modules_that_directly_import(&start)
                .intersection(&heads_package)
                .cloned()
                .collect();
            let tails: BTreeSet<Module> = scratch
                .find_modules_directly_imported_by(&end)
                .intersection(&tails_package)
                .cloned()
                .collect();

            for head in &heads {
                scratch.remove_import(head, &start);
            }
            for pair in middle.windows(2) {
                scratch.remove_import(&pair[0], &pair[1]);
            }
            for tail in &tails {
                scratch.remove_import(&end, tail);
            }

            match Route::new(heads, middle, tails) {
                Ok(route) => routes.push(route),
                Err(_) => break,
            }
        }
        routes
    }
}
