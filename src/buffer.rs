// Owned result buffer returned to the caller.
//
// The buffer is a single owning container: dropping it drops every element
// and, transitively, each element's CIGAR allocation. There is no paired
// release call to forget and no way to release twice.

use crate::error::{AlignError, Result};
use crate::finalization::Alignment;

/// A fixed-intent sequence of finalized alignments.
///
/// Invariant: the length always equals the number of valid, fully finalized
/// records. The selector never exposes a zero-length buffer; an empty result
/// is reported as `None` instead.
#[derive(Debug)]
pub struct AlignmentBuffer {
    records: Vec<Alignment>,
}

impl AlignmentBuffer {
    /// Reserve storage for exactly `capacity` records.
    ///
    /// Reservation failure surfaces as [`AlignError::Allocation`] rather
    /// than aborting, so the caller can tell it apart from an empty result.
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self> {
        let mut records = Vec::new();
        records.try_reserve_exact(capacity)?;
        Ok(AlignmentBuffer { records })
    }

    /// Append a finalized record. Only called within the reserved capacity.
    pub(crate) fn push(&mut self, alignment: Alignment) {
        debug_assert!(self.records.len() < self.records.capacity());
        self.records.push(alignment);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Alignment> {
        self.records.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Alignment> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Alignment] {
        &self.records
    }

    /// Consume the buffer, handing the records to the caller.
    pub fn into_vec(self) -> Vec<Alignment> {
        self.records
    }
}

impl<'a> IntoIterator for &'a AlignmentBuffer {
    type Item = &'a Alignment;
    type IntoIter = std::slice::Iter<'a, Alignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for AlignmentBuffer {
    type Item = Alignment;
    type IntoIter = std::vec::IntoIter<Alignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl std::ops::Index<usize> for AlignmentBuffer {
    type Output = Alignment;

    fn index(&self, i: usize) -> &Alignment {
        &self.records[i]
    }
}
