//! The result selector: one blocking backend call, a stable policy filter,
//! and an owned result buffer.
//!
//! The aligner itself (FM-index backward search, seed chaining, banded
//! extension, CIGAR generation) sits behind [`AlignerBackend`]. This module
//! never constructs raw regions or finalized records; it only orchestrates
//! the backend's `search` and `convert` steps.

use crate::buffer::AlignmentBuffer;
use crate::error::{AlignError, Result};
use crate::finalization::Alignment;
use crate::index::BwaIndex;
use crate::mem_opt::MemOpt;
use crate::region::AlignmentRegion;

/// A BWA-MEM style aligner collaborator.
///
/// Requirement on implementors: `search` must be reentrant for read-only
/// index access, so one loaded [`BwaIndex`] can be shared across concurrent
/// `align` calls. The raw region vector and the result buffer are exclusively
/// owned by the call that created them and need no synchronization.
pub trait AlignerBackend {
    /// Seed-and-extend search for one query. Blocking and non-cancelable
    /// from this layer's perspective; returns the raw candidate regions in
    /// the backend's output order.
    fn search(
        &self,
        opt: &MemOpt,
        index: &BwaIndex,
        query: &[u8],
    ) -> Result<Vec<AlignmentRegion>>;

    /// Realize one raw region into a finalized alignment record with
    /// coordinates, CIGAR, and mapping quality (bwa-mem's `mem_reg2aln`).
    fn convert(
        &self,
        opt: &MemOpt,
        index: &BwaIndex,
        query: &[u8],
        region: &AlignmentRegion,
    ) -> Result<Alignment>;
}

/// Align one query sequence against a loaded index.
///
/// The query is a byte sequence over the IUPAC nucleotide alphabet (case
/// insensitive); how a backend scores ambiguity codes is its own concern.
///
/// Returns `Ok(Some(buffer))` with exactly the regions selected by
/// `opt.selection`, finalized in their original search order, or `Ok(None)`
/// when no region matches the policy. The raw region vector is released on
/// every path; the returned buffer is owned by the caller and cleans up its
/// records (and their CIGARs) when dropped.
pub fn align<B: AlignerBackend>(
    backend: &B,
    opt: &MemOpt,
    index: &BwaIndex,
    query: &[u8],
) -> Result<Option<AlignmentBuffer>> {
    validate_query(query)?;

    let regions = backend.search(opt, index, query)?;

    let selected = regions
        .iter()
        .filter(|r| r.selected_by(opt.selection))
        .count();
    log::debug!(
        "search returned {} regions, {} selected under {:?}",
        regions.len(),
        selected,
        opt.selection
    );

    if selected == 0 {
        // Expected outcome, not an error; `regions` is dropped here.
        return Ok(None);
    }

    let mut buffer = AlignmentBuffer::with_capacity(selected)?;
    for region in regions.iter().filter(|r| r.selected_by(opt.selection)) {
        // Any conversion failure aborts the call; the partial buffer and
        // the raw regions are released by scope.
        buffer.push(backend.convert(opt, index, query, region)?);
    }

    debug_assert_eq!(buffer.len(), selected);
    Ok(Some(buffer))
}

/// The IUPAC nucleotide alphabet, upper case. Backends fold ambiguity
/// codes beyond ACGT to N, the way bwa's nst_nt4 table does.
const IUPAC_NT: &[u8] = b"ACGTUNRYSWKMBDHV";

/// Precondition checks applied before the backend is invoked.
fn validate_query(query: &[u8]) -> Result<()> {
    if query.is_empty() {
        return Err(AlignError::InvalidQuery("empty query sequence".to_string()));
    }
    if let Some(&bad) = query
        .iter()
        .find(|&&b| !IUPAC_NT.contains(&b.to_ascii_uppercase()))
    {
        return Err(AlignError::InvalidQuery(format!(
            "unexpected base '{}' in query",
            bad as char
        )));
    }
    Ok(())
}
