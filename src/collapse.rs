//! Segment collapsing.
//!
//! A segment found on a disposable graph starts and ends at placeholder
//! modules (usually squashed packages). Collapsing swaps those ends for real
//! imports looked up in the reference graph, keeping every sibling import at
//! the same boundary as an extra.

use tracing::{debug, error};

use crate::graph::{get_line_numbers, ImportGraph};
use crate::types::{Chain, ChainError, DetailedChain, Link, Module, Segment};

/// Imports from the `importer` package into `boundary`, sorted by importer.
fn head_imports<G: ImportGraph + ?Sized>(
    reference: &G,
    boundary: &Module,
    importer: &Module,
) -> Vec<Link> {
    reference
        .find_modules_that_directly_import(boundary)
        .into_iter()
        .filter(|candidate| candidate.is_in_package(importer))
        .map(|candidate| {
            let line_numbers = get_line_numbers(reference, &candidate, boundary);
            Link::new(candidate, boundary.clone(), line_numbers)
        })
        .collect()
}

/// Imports from `boundary` into the `imported` package, sorted by imported.
fn tail_imports<G: ImportGraph + ?Sized>(
    reference: &G,
    boundary: &Module,
    imported: &Module,
) -> Vec<Link> {
    reference
        .find_modules_directly_imported_by(boundary)
        .into_iter()
        .filter(|candidate| candidate.is_in_package(imported))
        .map(|candidate| {
            let line_numbers = get_line_numbers(reference, boundary, &candidate);
            Link::new(boundary.clone(), candidate, line_numbers)
        })
        .collect()
}

/// Expand one segment into a detailed chain.
///
/// The lexicographically first head and tail imports become part of the
/// primary chain; the rest are reported as extras.
pub fn collapse_segment<G: ImportGraph + ?Sized>(
    reference: &G,
    segment: &Segment,
    importer: &Module,
    imported: &Module,
) -> Result<DetailedChain, ChainError> {
    let mut heads = head_imports(reference, segment.head_boundary(), importer).into_iter();
    let primary_head = heads.next().ok_or_else(|| {
        error!(
            boundary = %segment.head_boundary(),
            importer = %importer,
            "No head import found in reference graph"
        );
        ChainError::NoHeadCandidates {
            boundary: segment.head_boundary().clone(),
            importer: importer.clone(),
        }
    })?;

    let mut tails = tail_imports(reference, segment.tail_boundary(), imported).into_iter();
    let primary_tail = tails.next().ok_or_else(|| {
        error!(
            boundary = %segment.tail_boundary(),
            imported = %imported,
            "No tail import found in reference graph"
        );
        ChainError::NoTailCandidates {
            boundary: segment.tail_boundary().clone(),
            imported: imported.clone(),
        }
    })?;

    let mut links = Vec::with_capacity(segment.links().len());
    links.push(primary_head);
    links.extend(segment.middle().iter().cloned());
    links.push(primary_tail);

    let detailed = DetailedChain::new(Chain::new(links)?, heads.collect(), tails.collect());
    debug!(
        head = %detailed.chain.first().importer,
        tail = %detailed.chain.last().imported,
        extra_firsts = detailed.extra_firsts.len(),
        extra_lasts = detailed.extra_lasts.len(),
        "Collapsed segment"
    );
    Ok(detailed)
}

/// Collapse every segment, in order.
pub fn segments_to_collapsed_chains<G: ImportGraph + ?Sized>(
    reference: &G,
    segments: &[Segment],
    importer: &Module,
    imported: &Module,
) -> Result<Vec<DetailedChain>, ChainError> {
    segments
        .iter()
        .map(|segment| collapse_segment(reference, segment, importer, imported))
        .collect()
}
