//! Core types for chain analysis.

pub mod module;
pub mod line;
pub mod link;
pub mod detailed;
pub mod route;

pub use module::{Module, ModuleError};
pub use line::{LineNumber, LineNumbers, format_line_numbers};
pub use link::{Link, Chain, Segment, ChainError};
pub use detailed::DetailedChain;
pub use route::Route;
