// Raw alignment regions as produced by the backend's seed-and-extend search.
//
// A region records alignment boundaries and scores but carries no CIGAR;
// CIGAR is generated only for the regions that survive selection, by the
// backend's region-to-alignment conversion.

use crate::mem_opt::SelectionPolicy;

/// Whether a region is the primary placement of the query or shadows one.
///
/// Replaces bwa-mem's signed-sentinel `secondary` field (`< 0` means
/// primary, any non-negative value is the index of the shadowing parent
/// hit). The strict negative-sentinel test is the one deliberately chosen
/// semantic: an indicator of 0 marks a secondary region, not a primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryStatus {
    Primary,
    /// Shadowed by the region at `parent` in the raw sequence.
    Secondary { parent: usize },
}

impl SecondaryStatus {
    /// Decode the backend's raw sentinel value.
    pub fn from_raw(secondary: i32) -> Self {
        if secondary < 0 {
            SecondaryStatus::Primary
        } else {
            SecondaryStatus::Secondary {
                parent: secondary as usize,
            }
        }
    }

    #[inline]
    pub fn is_primary(&self) -> bool {
        matches!(self, SecondaryStatus::Primary)
    }
}

/// One candidate alignment before finalization.
///
/// The reduced equivalent of `mem_alnreg_t`: boundaries in query and
/// reference space, scores, and the secondary status. Produced only by the
/// backend; owned by the raw region vector for the duration of one `align`
/// call.
#[derive(Debug, Clone)]
pub struct AlignmentRegion {
    /// Reference start position (inclusive, FM-index space)
    pub rb: u64,
    /// Reference end position (exclusive, FM-index space)
    pub re: u64,
    /// Query start position (inclusive, 0-based)
    pub qb: i32,
    /// Query end position (exclusive)
    pub qe: i32,
    /// Reference sequence ID (-1 if spanning a boundary)
    pub rid: i32,
    /// Best local Smith-Waterman score
    pub score: i32,
    /// Actual score of the aligned region, possibly smaller than `score`
    pub truesc: i32,
    /// Second-best score
    pub sub: i32,
    /// Band width used during extension
    pub w: i32,
    /// Length of the region covered by seeds
    pub seedcov: i32,
    /// Primary/secondary status of this region
    pub secondary: SecondaryStatus,
}

impl AlignmentRegion {
    /// A region positioned at the given span with default scores.
    pub fn new(rb: u64, re: u64, qb: i32, qe: i32) -> Self {
        AlignmentRegion {
            rb,
            re,
            qb,
            qe,
            rid: -1,
            score: 0,
            truesc: 0,
            sub: 0,
            w: 0,
            seedcov: 0,
            secondary: SecondaryStatus::Primary,
        }
    }

    #[inline]
    pub fn query_span(&self) -> i32 {
        self.qe - self.qb
    }

    #[inline]
    pub fn ref_span(&self) -> u64 {
        self.re - self.rb
    }

    /// Stable filter predicate used by the result selector.
    #[inline]
    pub fn selected_by(&self, policy: SelectionPolicy) -> bool {
        match policy {
            SelectionPolicy::All => true,
            SelectionPolicy::PrimaryOnly => self.secondary.is_primary(),
        }
    }
}
