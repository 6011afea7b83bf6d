//! CIGAR operations for finalized alignments.
//!
//! CIGARs are represented as `(op, len)` pairs with the op as its SAM byte.
//! The backend may hand back CIGARs in the packed BAM encoding
//! (`len << 4 | op`); [`from_bam_encoding`] decodes that form.

use std::fmt::Write;

/// Op table for the packed BAM encoding: op codes 0..=4 map to M,I,D,S,H.
const BAM_CIGAR_OPS: [u8; 5] = [b'M', b'I', b'D', b'S', b'H'];

/// Check if a byte represents a query-consuming CIGAR operation
#[inline(always)]
pub const fn op_consumes_query(op: u8) -> bool {
    matches!(op, b'M' | b'I' | b'S' | b'=' | b'X')
}

/// Check if a byte represents a reference-consuming CIGAR operation
#[inline(always)]
pub const fn op_consumes_ref(op: u8) -> bool {
    matches!(op, b'M' | b'D' | b'N' | b'=' | b'X')
}

/// Decode a packed BAM-encoded CIGAR (`len << 4 | op`, op in 0..=4).
///
/// Returns `None` if any op code falls outside the MIDSH table.
pub fn from_bam_encoding(packed: &[u32]) -> Option<Vec<(u8, i32)>> {
    let mut cigar = Vec::with_capacity(packed.len());
    for &word in packed {
        let op = BAM_CIGAR_OPS.get((word & 0xf) as usize)?;
        cigar.push((*op, (word >> 4) as i32));
    }
    Some(cigar)
}

/// Normalize CIGAR in-place by merging adjacent identical operations.
///
/// E.g., `[(M, 10), (M, 5)]` → `[(M, 15)]`
#[inline]
pub fn normalize_in_place(cigar: &mut Vec<(u8, i32)>) {
    if cigar.len() <= 1 {
        return;
    }

    let mut write = 0;
    for read in 1..cigar.len() {
        if cigar[read].0 == cigar[write].0 {
            cigar[write].1 += cigar[read].1;
        } else {
            write += 1;
            cigar[write] = cigar[read];
        }
    }
    cigar.truncate(write + 1);
}

/// Calculate the reference-consuming length from a CIGAR.
#[inline]
pub fn reference_length(cigar: &[(u8, i32)]) -> i32 {
    cigar
        .iter()
        .filter_map(|&(op, len)| if op_consumes_ref(op) { Some(len) } else { None })
        .sum()
}

/// Calculate the query-consuming length from a CIGAR.
#[inline]
pub fn query_length(cigar: &[(u8, i32)]) -> i32 {
    cigar
        .iter()
        .filter_map(|&(op, len)| if op_consumes_query(op) { Some(len) } else { None })
        .sum()
}

/// Convert CIGAR to string representation (e.g., "50M2I48M").
/// An empty CIGAR renders as "*" per the SAM convention for unmapped reads.
#[inline]
pub fn to_string(cigar: &[(u8, i32)]) -> String {
    if cigar.is_empty() {
        return "*".to_string();
    }

    let mut result = String::with_capacity(cigar.len() * 4);
    for &(op, len) in cigar {
        write!(&mut result, "{}{}", len, op as char).unwrap();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bam_encoding() {
        // 50M 2I 48M in packed form
        let packed = [(50 << 4) | 0, (2 << 4) | 1, (48 << 4) | 0];
        let cigar = from_bam_encoding(&packed).unwrap();
        assert_eq!(cigar, vec![(b'M', 50), (b'I', 2), (b'M', 48)]);

        // 10S 90M
        let packed = [(10 << 4) | 3, (90 << 4) | 0];
        let cigar = from_bam_encoding(&packed).unwrap();
        assert_eq!(cigar, vec![(b'S', 10), (b'M', 90)]);
    }

    #[test]
    fn test_from_bam_encoding_rejects_unknown_op() {
        // Op code 9 is outside the MIDSH table
        assert!(from_bam_encoding(&[(5 << 4) | 9]).is_none());
    }

    #[test]
    fn test_op_consumes() {
        assert!(op_consumes_query(b'M'));
        assert!(op_consumes_ref(b'M'));
        assert!(op_consumes_query(b'I'));
        assert!(!op_consumes_ref(b'I'));
        assert!(!op_consumes_query(b'D'));
        assert!(op_consumes_ref(b'D'));
        assert!(op_consumes_query(b'S'));
        assert!(!op_consumes_ref(b'S'));
    }

    #[test]
    fn test_normalize_in_place() {
        let mut cigar = vec![(b'M', 10), (b'M', 5), (b'I', 2), (b'M', 20)];
        normalize_in_place(&mut cigar);
        assert_eq!(cigar, vec![(b'M', 15), (b'I', 2), (b'M', 20)]);

        let mut cigar: Vec<(u8, i32)> = vec![];
        normalize_in_place(&mut cigar);
        assert!(cigar.is_empty());
    }

    #[test]
    fn test_lengths() {
        let cigar = vec![(b'S', 5), (b'M', 50), (b'D', 3), (b'I', 2), (b'M', 40)];
        assert_eq!(reference_length(&cigar), 93);
        assert_eq!(query_length(&cigar), 97);
    }

    #[test]
    fn test_to_string() {
        let cigar = vec![(b'M', 50), (b'I', 2), (b'M', 48)];
        assert_eq!(to_string(&cigar), "50M2I48M");
        assert_eq!(to_string(&[]), "*");
    }
}
