// Finalized alignment records, the output of the backend's
// region-to-alignment conversion (bwa-mem's mem_reg2aln / mem_aln_t).

use crate::cigar;

/// One fully realized alignment: coordinates, CIGAR, and quality.
///
/// Every `Alignment` owns its CIGAR vector; dropping the record drops the
/// CIGAR with it.
#[derive(Debug, Clone)]
pub struct Alignment {
    /// Reference sequence index; negative for unmapped
    pub rid: i32,
    /// Reference sequence name resolved from the index annotations
    pub ref_name: String,
    /// Forward strand 5'-end mapping position, 0-based
    pub pos: u64,
    /// Whether the query aligned to the reverse strand
    pub is_rev: bool,
    /// Mapping quality
    pub mapq: u8,
    /// Alignment score
    pub score: i32,
    /// Suboptimal (second-best) score
    pub sub: i32,
    /// Edit distance to the reference (NM)
    pub edit_distance: i32,
    /// CIGAR operations as (op byte, length) pairs
    pub cigar: Vec<(u8, i32)>,
    /// Alternative-hit annotation (XA), when the backend produces one
    pub alt_hits: Option<String>,
}

impl Alignment {
    /// Strand character: '+' forward, '-' reverse.
    #[inline]
    pub fn strand(&self) -> char {
        if self.is_rev { '-' } else { '+' }
    }

    /// CIGAR rendered as a string, "*" when empty.
    pub fn cigar_string(&self) -> String {
        cigar::to_string(&self.cigar)
    }

    /// Reference bases consumed by this alignment.
    pub fn reference_length(&self) -> i32 {
        cigar::reference_length(&self.cigar)
    }
}
