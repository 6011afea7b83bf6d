//! Error taxonomy for the binding layer.
//!
//! "No alignment found" is an expected outcome, not an error; `align` models
//! it as `Ok(None)`. Everything in [`AlignError`] is a genuine failure that
//! the caller must be able to tell apart from the empty result.

use std::collections::TryReserveError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlignError {
    /// Precondition violation surfaced before the backend is invoked.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Result buffer reservation failed. Distinct from the empty result:
    /// the caller must never confuse "out of memory" with "no alignment".
    #[error("result buffer allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// An index component was missing or corrupt at load time.
    #[error("failed to load index component {component}: {source}")]
    Index {
        component: String,
        #[source]
        source: io::Error,
    },

    /// Failure reported by the aligner backend itself. The backend's
    /// unrecoverable conditions (corrupt FM-index structures) are not
    /// caught here and propagate as-is.
    #[error("aligner backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, AlignError>;
