// Index loading.
//
// Restores every component of a prebuilt bwa-mem2 style index: reference
// annotations (.ann/.amb), the packed sequence (.pac), and the FM-index
// component file (.bwt.2bit.64) holding the BWT checkpoints and the sampled
// suffix array. This layer loads the data and hands it to the backend as an
// opaque, read-only handle; it never interprets the FM-index itself.

use crate::bntseq::BntSeq;
use crate::error::{AlignError, Result};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Checkpoint spacing of the occurrence array: one entry per 64 BWT bases.
const CP_SHIFT: u64 = 6;

/// Suffix array sampling: one sample per 8 positions.
const SA_SHIFT: u64 = 3;

/// Occurrence checkpoint, bwa-mem2's `CP_OCC`: running counts per base plus
/// the one-hot encoded BWT block for popcount queries.
#[derive(Debug, Clone, Default)]
pub struct OccCheckpoint {
    pub counts: [i64; 4],
    pub encoded_bwt: [u64; 4],
}

/// Raw FM-index payload of the .bwt.2bit.64 file.
///
/// Consumed by the backend's search routine; opaque to the selector.
#[derive(Debug, Default)]
pub struct FmComponent {
    /// BWT sequence length (both strands plus sentinel)
    pub seq_len: u64,
    /// Cumulative base counts, bwa's C() array
    pub cumulative_count: [u64; 5],
    /// Occurrence checkpoints every 64 bases
    pub checkpoints: Vec<OccCheckpoint>,
    /// High bytes of the sampled suffix array
    pub sa_high_bytes: Vec<i8>,
    /// Low words of the sampled suffix array
    pub sa_low_words: Vec<u32>,
    /// Distance between suffix array samples
    pub sa_sample_interval: u64,
    /// Position of the sentinel in the BWT
    pub sentinel_index: i64,
}

impl FmComponent {
    /// Read a .bwt.2bit.64 file in bwa-mem2's on-disk layout.
    fn load(path: &Path) -> io::Result<Self> {
        // The file can run to gigabytes for a full genome; buffer generously.
        const BUFFER_SIZE: usize = 16 * 1024 * 1024;
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();
        let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);

        let seq_len = read_i64(&mut reader)?;
        if seq_len < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("negative seq_len {} in FM component header", seq_len),
            ));
        }
        let seq_len = seq_len as u64;

        // Bound the counts derived from the header against the file size
        // before reserving anything: a corrupt header claiming a huge
        // seq_len must surface as an error, not abort the process. Each
        // checkpoint is 64 bytes, each SA sample 5; the header and sentinel
        // add 56.
        let checkpoint_count = (seq_len >> CP_SHIFT) + 1;
        let sample_count = (seq_len >> SA_SHIFT) + 1;
        let needed = checkpoint_count
            .checked_mul(64)
            .zip(sample_count.checked_mul(5))
            .and_then(|(cp, sa)| cp.checked_add(sa))
            .and_then(|body| body.checked_add(56));
        match needed {
            Some(n) if n <= file_len => {}
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "header claims seq_len {} but file is {} bytes",
                        seq_len, file_len
                    ),
                ));
            }
        }

        let mut fm = FmComponent {
            seq_len,
            ..FmComponent::default()
        };

        for i in 0..5 {
            fm.cumulative_count[i] = read_i64(&mut reader)? as u64;
        }
        // bwa-mem2 shifts the counts by one on load (FMI_search::load_index)
        for count in fm.cumulative_count.iter_mut() {
            *count += 1;
        }

        fm.checkpoints.reserve_exact(checkpoint_count as usize);
        for _ in 0..checkpoint_count {
            let mut cp = OccCheckpoint::default();
            for i in 0..4 {
                cp.counts[i] = read_i64(&mut reader)?;
            }
            for i in 0..4 {
                cp.encoded_bwt[i] = read_u64(&mut reader)?;
            }
            fm.checkpoints.push(cp);
        }

        fm.sa_high_bytes.reserve_exact(sample_count as usize);
        fm.sa_low_words.reserve_exact(sample_count as usize);
        for _ in 0..sample_count {
            let mut byte = [0u8; 1];
            reader.read_exact(&mut byte)?;
            fm.sa_high_bytes.push(byte[0] as i8);
        }
        for _ in 0..sample_count {
            let mut word = [0u8; 4];
            reader.read_exact(&mut word)?;
            fm.sa_low_words.push(u32::from_le_bytes(word));
        }

        fm.sentinel_index = read_i64(&mut reader)?;
        fm.sa_sample_interval = 1 << SA_SHIFT;

        log::debug!(
            "loaded FM component: seq_len={}, {} checkpoints, {} SA samples",
            fm.seq_len,
            fm.checkpoints.len(),
            sample_count
        );
        Ok(fm)
    }
}

fn read_i64<R: Read>(reader: &mut R) -> io::Result<i64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(i64::from_le_bytes(buf))
}

fn read_u64<R: Read>(reader: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// A loaded genome index: FM-index payload plus reference annotations.
///
/// Read-only after loading; safe to share across concurrent `align` calls.
#[derive(Debug)]
pub struct BwaIndex {
    pub fm: FmComponent,
    pub bns: BntSeq,
}

impl BwaIndex {
    /// Load all index components for `prefix`, as written by the index
    /// builder. A missing or truncated component is reported as
    /// [`AlignError::Index`], never a panic.
    pub fn load(prefix: &Path) -> Result<Self> {
        let bns = BntSeq::restore(prefix).map_err(|source| AlignError::Index {
            component: format!("{}.ann/.amb", prefix.display()),
            source,
        })?;

        let pac_path = bns
            .pac_file_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.pac", prefix.display())));
        if !pac_path.is_file() {
            return Err(AlignError::Index {
                component: pac_path.display().to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "packed sequence missing"),
            });
        }

        let fm_path = PathBuf::from(format!("{}.bwt.2bit.64", prefix.display()));
        let fm = FmComponent::load(&fm_path).map_err(|source| AlignError::Index {
            component: fm_path.display().to_string(),
            source,
        })?;

        log::debug!(
            "index loaded: {} reference sequences, l_pac={}",
            bns.sequence_count(),
            bns.packed_sequence_length
        );
        Ok(BwaIndex { fm, bns })
    }
}
