//! Rendering detailed chains as notes.
//!
//! A detailed chain becomes a list of [`ImportNote`]s, one per printed line:
//!
//! ```text
//! - high.a (l.1)
//!   & high.b -> mid (l.2)
//!   mid -> low.p (l.3)
//!          & low.q (l.4)
//! ```
//!
//! Extra heads are listed under the primary head and the last one carries
//! the arrow; extra tails are aligned under the imported module of the last
//! link.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};

use crate::types::{DetailedChain, LineNumbers, Link, Module};

/// Indentation for notes after the first.
pub const DEFAULT_INDENT: usize = 2;

/// One printable line of a chain report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportNote {
    /// Module the note is anchored to.
    pub module: Module,
    /// Text before the line numbers.
    pub message: String,
    /// Line numbers of the import.
    pub line_numbers: LineNumbers,
}

impl ImportNote {
    fn new(module: &Module, message: String, line_numbers: &LineNumbers) -> Self {
        Self {
            module: module.clone(),
            message,
            line_numbers: line_numbers.clone(),
        }
    }
}

impl fmt::Display for ImportNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.line_numbers)
    }
}

fn arrow(link: &Link) -> String {
    format!("{} -> {}", link.importer, link.imported)
}

fn notes_from_direct_import(link: &Link, extra_firsts: &[Link], extra_lasts: &[Link]) -> Vec<ImportNote> {
    let mut notes = Vec::new();

    match extra_firsts.split_last() {
        Some((final_first, other_firsts)) => {
            notes.push(ImportNote::new(
                &link.importer,
                link.importer.to_string(),
                &link.line_numbers,
            ));
            for source in other_firsts {
                notes.push(ImportNote::new(
                    &source.importer,
                    format!("& {}", source.importer),
                    &source.line_numbers,
                ));
            }
            notes.push(ImportNote::new(
                &final_first.importer,
                format!("& {}", arrow(final_first)),
                &final_first.line_numbers,
            ));
        }
        None => notes.push(ImportNote::new(&link.importer, arrow(link), &link.line_numbers)),
    }

    if !extra_lasts.is_empty() {
        let indent = " ".repeat(link.importer.name().len() + 4);
        for destination in extra_lasts {
            notes.push(ImportNote::new(
                &link.importer,
                format!("{}& {}", indent, destination.imported),
                &destination.line_numbers,
            ));
        }
    }

    notes
}

/// Notes for a detailed chain, in print order.
pub fn notes_from_chain_data(chain_data: &DetailedChain) -> Vec<ImportNote> {
    let chain = &chain_data.chain;
    if chain.is_direct() {
        return notes_from_direct_import(
            chain.first(),
            &chain_data.extra_firsts,
            &chain_data.extra_lasts,
        );
    }

    let mut notes = notes_from_direct_import(chain.first(), &chain_data.extra_firsts, &[]);
    for link in chain.interior() {
        notes.extend(notes_from_direct_import(link, &[], &[]));
    }
    notes.extend(notes_from_direct_import(chain.last(), &[], &chain_data.extra_lasts));
    notes
}

/// Render notes as text: the first line starts with `- `, later lines are
/// indented by `indent` spaces.
pub fn render_to_string(notes: &[ImportNote], indent: usize) -> String {
    let padding = " ".repeat(indent);
    let mut output = String::new();
    for (position, note) in notes.iter().enumerate() {
        if position == 0 {
            output.push_str(&format!("- {}\n", note));
        } else {
            output.push_str(&format!("{}{}\n", padding, note));
        }
    }
    output
}

/// Write rendered notes to `writer`.
pub fn render_notes<W: Write>(notes: &[ImportNote], indent: usize, writer: &mut W) -> io::Result<()> {
    writer.write_all(render_to_string(notes, indent).as_bytes())
}
