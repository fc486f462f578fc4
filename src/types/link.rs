//! Links, chains and segments.

use serde::{Deserialize, Serialize};

use super::line::LineNumbers;
use super::module::Module;

/// Error type for chain construction, extraction and collapsing.
///
/// Every variant is an invariant violation: a caller broke a precondition or
/// two copies of the graph disagree. None of them describe user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// A chain of exactly two modules was found where direct imports had
    /// already been removed.
    #[error("Direct chain found from {importer} to {imported}: direct imports should have been removed")]
    DirectChain {
        /// Head of the chain.
        importer: Module,
        /// Tail of the chain.
        imported: Module,
    },
    /// No module in the importer package directly imports the segment head.
    #[error("No module within {importer} directly imports {boundary}")]
    NoHeadCandidates {
        /// First intermediate module of the segment.
        boundary: Module,
        /// Importer package.
        importer: Module,
    },
    /// The segment tail does not directly import any module in the imported package.
    #[error("{boundary} does not directly import any module within {imported}")]
    NoTailCandidates {
        /// Last intermediate module of the segment.
        boundary: Module,
        /// Imported package.
        imported: Module,
    },
    /// A route had no heads, no middle or no tails.
    #[error("Route is missing heads, middle or tails")]
    EmptyRoute,
    /// Links did not join up (or there were none).
    #[error("Chain is empty or disconnected at link {index}")]
    DisconnectedChain {
        /// Index of the first link that does not continue its predecessor.
        index: usize,
    },
}

impl ChainError {
    /// Whether this error is a broken internal contract rather than a
    /// reportable condition. Always true today.
    pub fn is_invariant_violation(&self) -> bool {
        true
    }
}

/// One directed import edge with its source lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// Module containing the import statement.
    pub importer: Module,
    /// Module being imported.
    pub imported: Module,
    /// Lines of `importer` where the import happens.
    pub line_numbers: LineNumbers,
}

impl Link {
    /// Create a new link.
    pub fn new(importer: Module, imported: Module, line_numbers: LineNumbers) -> Self {
        Self {
            importer,
            imported,
            line_numbers,
        }
    }
}

/// Check that `links` is non-empty and each link starts where the previous ended.
fn check_contiguous(links: &[Link]) -> Result<(), ChainError> {
    if links.is_empty() {
        return Err(ChainError::DisconnectedChain { index: 0 });
    }
    for (index, pair) in links.windows(2).enumerate() {
        if pair[0].imported != pair[1].importer {
            return Err(ChainError::DisconnectedChain { index: index + 1 });
        }
    }
    Ok(())
}

/// Ordered, non-empty path of links from a head module to a tail module.
///
/// Deserializes from a bare list of links through [`Chain::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Link>")]
pub struct Chain(Vec<Link>);

impl TryFrom<Vec<Link>> for Chain {
    type Error = ChainError;

    fn try_from(links: Vec<Link>) -> Result<Self, Self::Error> {
        Self::new(links)
    }
}

impl Chain {
    /// Create a chain, checking it is non-empty and contiguous.
    pub fn new(links: Vec<Link>) -> Result<Self, ChainError> {
        check_contiguous(&links)?;
        Ok(Self(links))
    }

    /// All links in order.
    pub fn links(&self) -> &[Link] {
        &self.0
    }

    /// First link.
    pub fn first(&self) -> &Link {
        &self.0[0]
    }

    /// Last link.
    pub fn last(&self) -> &Link {
        &self.0[self.0.len() - 1]
    }

    /// Links strictly between the first and the last.
    pub fn interior(&self) -> &[Link] {
        if self.0.len() < 2 {
            return &[];
        }
        &self.0[1..self.0.len() - 1]
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; chains are never empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this chain is a single direct import.
    pub fn is_direct(&self) -> bool {
        self.0.len() == 1
    }

    /// Modules visited, head to tail.
    pub fn modules(&self) -> Vec<&Module> {
        std::iter::once(&self.first().importer)
            .chain(self.0.iter().map(|link| &link.imported))
            .collect()
    }
}

/// Headless and tailless chain between two forbidden packages.
///
/// Holds at least two links, so there is always a module strictly between
/// the head and the tail. Its first and last links are placeholders to be
/// replaced by real boundary imports during collapsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Link>")]
pub struct Segment(Vec<Link>);

impl TryFrom<Vec<Link>> for Segment {
    type Error = ChainError;

    fn try_from(links: Vec<Link>) -> Result<Self, Self::Error> {
        Self::new(links)
    }
}

impl Segment {
    /// Create a segment, rejecting direct chains and disconnected links.
    pub fn new(links: Vec<Link>) -> Result<Self, ChainError> {
        check_contiguous(&links)?;
        if links.len() < 2 {
            return Err(ChainError::DirectChain {
                importer: links[0].importer.clone(),
                imported: links[0].imported.clone(),
            });
        }
        Ok(Self(links))
    }

    /// All links in order.
    pub fn links(&self) -> &[Link] {
        &self.0
    }

    /// First module after the head: where head imports are expanded.
    pub fn head_boundary(&self) -> &Module {
        &self.0[0].imported
    }

    /// Last module before the tail: where tail imports are expanded.
    pub fn tail_boundary(&self) -> &Module {
        &self.0[self.0.len() - 1].importer
    }

    /// Links between the two boundary modules. Empty when the segment has
    /// a single intermediate module.
    pub fn middle(&self) -> &[Link] {
        &self.0[1..self.0.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(importer: &str, imported: &str) -> Link {
        Link::new(importer.into(), imported.into(), LineNumbers::unknown())
    }

    #[test]
    fn test_chain_requires_links() {
        assert_eq!(
            Chain::new(vec![]),
            Err(ChainError::DisconnectedChain { index: 0 })
        );
    }

    #[test]
    fn test_chain_rejects_gap() {
        let result = Chain::new(vec![link("a", "b"), link("c", "d")]);
        assert_eq!(result, Err(ChainError::DisconnectedChain { index: 1 }));
    }

    #[test]
    fn test_chain_modules_and_interior() {
        let chain = Chain::new(vec![link("a", "b"), link("b", "c"), link("c", "d")]).unwrap();
        let names: Vec<_> = chain.modules().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
        assert_eq!(chain.interior(), &[link("b", "c")]);
        assert!(!chain.is_direct());
    }

    #[test]
    fn test_single_link_chain_has_no_interior() {
        let chain = Chain::new(vec![link("a", "b")]).unwrap();
        assert!(chain.is_direct());
        assert!(chain.interior().is_empty());
    }

    #[test]
    fn test_segment_rejects_direct_chain() {
        let result = Segment::new(vec![link("a", "b")]);
        assert!(matches!(result, Err(ChainError::DirectChain { .. })));
    }

    #[test]
    fn test_segment_boundaries() {
        let segment = Segment::new(vec![link("a", "x"), link("x", "b")]).unwrap();
        assert_eq!(segment.head_boundary().name(), "x");
        assert_eq!(segment.tail_boundary().name(), "x");
        assert!(segment.middle().is_empty());
    }

    #[test]
    fn test_deserialize_rejects_empty_chain() {
        let result: Result<Chain, _> = serde_json::from_str("[]");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("empty or disconnected"), "{}", err);
    }

    #[test]
    fn test_deserialize_rejects_disconnected_chain() {
        let json = serde_json::to_string(&vec![link("a", "b"), link("c", "d")]).unwrap();
        assert!(serde_json::from_str::<Chain>(&json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_direct_segment() {
        let json = r#"[{"importer": "a", "imported": "z", "line_numbers": [3]}]"#;
        let err = serde_json::from_str::<Segment>(json).unwrap_err().to_string();
        assert!(err.contains("Direct chain found from a to z"), "{}", err);
    }

    #[test]
    fn test_chain_serde_is_a_plain_list() {
        let chain = Chain::new(vec![link("a", "b"), link("b", "c")]).unwrap();
        let json = serde_json::to_value(&chain).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(2));
        assert_eq!(serde_json::from_value::<Chain>(json).unwrap(), chain);

        let segment = Segment::new(chain.links().to_vec()).unwrap();
        let json = serde_json::to_string(&segment).unwrap();
        assert_eq!(serde_json::from_str::<Segment>(&json).unwrap(), segment);
    }
}
