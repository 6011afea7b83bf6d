//! bwa-bridge provides the result-selection and buffer-lifecycle layer that
//! sits between a BWA-MEM style aligner backend and its caller.
//!
//! The backend (FM-index search, seed-and-extend, banded Smith-Waterman,
//! CIGAR generation) lives behind the [`aligner::AlignerBackend`] trait. This
//! crate loads a prebuilt genome index, invokes the backend for one query
//! sequence, filters the raw alignment regions by a selection policy, and
//! packages the finalized records into an owned [`buffer::AlignmentBuffer`].
//!
//! ```no_run
//! use bwa_bridge::aligner::{align, AlignerBackend};
//! use bwa_bridge::index::BwaIndex;
//! use bwa_bridge::mem_opt::{MemOpt, SelectionPolicy};
//!
//! fn run(backend: &impl AlignerBackend) -> Result<(), bwa_bridge::error::AlignError> {
//!     let index = BwaIndex::load("ref.fa".as_ref())?;
//!     let opt = MemOpt::default().with_selection(SelectionPolicy::PrimaryOnly);
//!     match align(backend, &opt, &index, b"ACGTACGTACGT")? {
//!         Some(buffer) => {
//!             for aln in &buffer {
//!                 println!("{}:{} {}", aln.ref_name, aln.pos, aln.cigar_string());
//!             }
//!         }
//!         None => println!("no alignment found"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod aligner;
pub mod bntseq;
pub mod buffer;
pub mod cigar;
pub mod error;
pub mod finalization;
pub mod index;
pub mod mem_opt;
pub mod region;

pub use aligner::{align, AlignerBackend};
pub use buffer::AlignmentBuffer;
pub use error::AlignError;
pub use finalization::Alignment;
pub use index::BwaIndex;
pub use mem_opt::{MemOpt, SelectionPolicy};
pub use region::{AlignmentRegion, SecondaryStatus};
