// Reference sequence database (BNT format).
//
// Restores the textual .ann and .amb files exactly as `bwa index` writes
// them, plus the path of the 2-bit packed reference (.pac). The packed
// sequence itself is consumed by the backend, not by this layer; the
// annotations are what we need to resolve finalized alignments to sequence
// names.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

fn invalid(msg: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.to_string())
}

/// Metadata for one reference sequence (e.g. a chromosome).
/// Corresponds to bwa's `bntann1_t`.
#[derive(Debug)]
pub struct ReferenceAnnotation {
    /// Offset in the concatenated packed sequence
    pub offset: u64,
    /// Length of this sequence
    pub sequence_length: i32,
    /// Number of ambiguous bases in this sequence
    pub ambiguous_base_count: i32,
    /// GenInfo identifier from the FASTA header
    pub geninfo_identifier: u32,
    /// Sequence name (e.g. "chr1")
    pub name: String,
    /// Optional comment from the FASTA header
    pub comment: String,
}

/// A contiguous run of ambiguous (N) bases.
/// Corresponds to bwa's `bntamb1_t`.
#[derive(Debug)]
pub struct AmbiguousRegion {
    pub offset: u64,
    pub region_length: i32,
    pub base: char,
}

/// Reference sequence annotations restored from .ann/.amb.
/// Corresponds to bwa's `bntseq_t`, without the packed sequence payload.
#[derive(Debug)]
pub struct BntSeq {
    /// Total length of the packed forward sequence
    pub packed_sequence_length: u64,
    /// Random seed bwa used for ambiguous base replacement
    pub seed: u32,
    /// Per-sequence annotations, ordered by offset
    pub annotations: Vec<ReferenceAnnotation>,
    /// Ambiguous base regions
    pub ambiguous_regions: Vec<AmbiguousRegion>,
    /// Path to the .pac file, for the backend's on-demand reads
    pub pac_file_path: Option<PathBuf>,
}

impl BntSeq {
    pub fn new() -> Self {
        BntSeq {
            packed_sequence_length: 0,
            seed: 0,
            annotations: Vec::new(),
            ambiguous_regions: Vec::new(),
            pac_file_path: None,
        }
    }

    /// Restore annotations from `<prefix>.ann` and `<prefix>.amb`.
    pub fn restore(prefix: &Path) -> io::Result<Self> {
        let mut bns = BntSeq::new();

        let ann_path = PathBuf::from(format!("{}.ann", prefix.display()));
        let ann_file = BufReader::new(File::open(&ann_path)?);
        let mut lines = ann_file.lines();

        // First line: l_pac n_seqs seed
        let header = lines
            .next()
            .ok_or_else(|| invalid("missing header line in .ann"))??;
        let mut fields = header.split_whitespace();
        bns.packed_sequence_length = fields
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| invalid("invalid l_pac in .ann"))?;
        let sequence_count: usize = fields
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| invalid("invalid n_seqs in .ann"))?;
        bns.seed = fields
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| invalid("invalid seed in .ann"))?;

        // Counts come from an untrusted text file; a corrupt value must
        // surface as an error rather than abort inside the allocator.
        bns.annotations
            .try_reserve_exact(sequence_count)
            .map_err(|_| invalid("implausible n_seqs in .ann"))?;
        for _ in 0..sequence_count {
            // Line pair per sequence: "gi name [comment]" then "offset len n_ambs"
            let name_line = lines
                .next()
                .ok_or_else(|| invalid("missing name line in .ann"))??;
            let mut parts = name_line.splitn(3, ' ');
            let geninfo_identifier = parts
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| invalid("invalid gi in .ann"))?;
            let name = parts
                .next()
                .ok_or_else(|| invalid("missing sequence name in .ann"))?
                .to_string();
            let comment = parts.next().unwrap_or("").to_string();

            let span_line = lines
                .next()
                .ok_or_else(|| invalid("missing offset line in .ann"))??;
            let mut span = span_line.split_whitespace();
            let offset = span
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| invalid("invalid offset in .ann"))?;
            let sequence_length = span
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| invalid("invalid length in .ann"))?;
            let ambiguous_base_count = span
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| invalid("invalid n_ambs in .ann"))?;

            bns.annotations.push(ReferenceAnnotation {
                offset,
                sequence_length,
                ambiguous_base_count,
                geninfo_identifier,
                name,
                comment,
            });
        }

        let amb_path = PathBuf::from(format!("{}.amb", prefix.display()));
        let amb_file = BufReader::new(File::open(&amb_path)?);
        let mut amb_lines = amb_file.lines();

        // First line: l_pac n_seqs n_holes; l_pac and n_seqs repeat the .ann values
        let amb_header = amb_lines
            .next()
            .ok_or_else(|| invalid("missing header line in .amb"))??;
        let hole_count: usize = amb_header
            .split_whitespace()
            .nth(2)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| invalid("invalid n_holes in .amb"))?;

        bns.ambiguous_regions
            .try_reserve_exact(hole_count)
            .map_err(|_| invalid("implausible n_holes in .amb"))?;
        for _ in 0..hole_count {
            let line = amb_lines
                .next()
                .ok_or_else(|| invalid("missing region line in .amb"))??;
            let mut fields = line.split_whitespace();
            let offset = fields
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| invalid("invalid offset in .amb"))?;
            let region_length = fields
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| invalid("invalid length in .amb"))?;
            let base = fields
                .next()
                .and_then(|s| s.chars().next())
                .ok_or_else(|| invalid("missing base in .amb"))?;
            bns.ambiguous_regions.push(AmbiguousRegion {
                offset,
                region_length,
                base,
            });
        }

        bns.pac_file_path = Some(PathBuf::from(format!("{}.pac", prefix.display())));
        Ok(bns)
    }

    pub fn sequence_count(&self) -> usize {
        self.annotations.len()
    }

    /// Convert an FM-index position to a forward-strand position and strand.
    /// Equivalent to bwa's `bns_depos`.
    pub fn depos(&self, pos: i64) -> (i64, bool) {
        let is_rev = pos >= self.packed_sequence_length as i64;
        let pos_f = if is_rev {
            ((self.packed_sequence_length as i64) << 1) - 1 - pos
        } else {
            pos
        };
        (pos_f, is_rev)
    }

    /// Map a forward-strand position to its reference sequence index,
    /// or -1 when the position falls outside every sequence.
    /// Equivalent to bwa's `bns_pos2rid`.
    pub fn pos_to_rid(&self, pos_f: i64) -> i32 {
        if pos_f < 0 || pos_f as u64 >= self.packed_sequence_length {
            return -1;
        }
        // Annotations are ordered by offset; find the last one at or below pos_f.
        let idx = self
            .annotations
            .partition_point(|ann| ann.offset <= pos_f as u64);
        idx as i32 - 1
    }

    /// Name of the sequence with the given index, if any.
    pub fn name_of(&self, rid: i32) -> Option<&str> {
        if rid < 0 {
            return None;
        }
        self.annotations.get(rid as usize).map(|a| a.name.as_str())
    }
}

impl Default for BntSeq {
    fn default() -> Self {
        BntSeq::new()
    }
}
