//! # import-chain-kernel
//!
//! Explains forbidden import chains in module dependency graphs.
//!
//! When an architecture rule says one package must not import another, the
//! kernel answers the follow-up question:
//!
//! > *How* does the importer reach the imported package?
//!
//! ## Core Contract
//!
//! 1. Decompose all indirect paths between two packages into edge-disjoint
//!    shortest chains
//! 2. Re-attach the real source line of every import, looked up in an
//!    unmutated reference graph
//! 3. Collapse each chain's ends, reporting every sibling import that shares
//!    its first or last hop
//! 4. Render the result as an ordered list of notes
//!
//! ## Architecture
//!
//! ```text
//!  ImportGraph ──clone──► ShortestChains ─► Segment ─► collapse ─┐
//!       │                                                         ├─► DetailedChain ─► ImportNote
//!       └──────────────► find_shortest_routes ─► Route ──────────┘
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same graph + same package pair + same policy → identical chains and notes
//! - Shortest-path ties are broken by module name
//! - Extra heads and tails are ordered by module name

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod graph;
pub mod extraction;
pub mod collapse;
pub mod route;
pub mod strategy;
pub mod policy;
pub mod render;
pub mod analyzer;
pub mod canonical;

// Re-exports
pub use types::{
    Module, ModuleError, LineNumber, LineNumbers, format_line_numbers,
    Link, Chain, Segment, ChainError, DetailedChain, Route,
};
pub use graph::{ImportGraph, RouteQuery, ImportDetail, InMemoryImportGraph, get_line_numbers};
pub use extraction::{ShortestChains, pop_shortest_chains, iter_segments, find_segments, pairwise};
pub use collapse::{collapse_segment, segments_to_collapsed_chains};
pub use route::build_detailed_chain_from_route;
pub use strategy::{ChainStrategy, IterativeStrategy, RouteStrategy, StrategyKind};
pub use policy::ChainPolicy;
pub use render::{ImportNote, notes_from_chain_data, render_notes, render_to_string, DEFAULT_INDENT};
pub use analyzer::ChainAnalyzer;
pub use canonical::{to_canonical_bytes, canonical_hash, canonical_hash_hex};

/// Default policy version identifier.
pub const DEFAULT_POLICY_VERSION: &str = "chain_policy_v1";
