// Alignment options consumed by the backend and the result selector.
//
// The field set follows bwa-mem's mem_opt_t, reduced to the parameters a
// single-query call actually reads. Options are immutable for the duration
// of one align() call.

/// Which raw alignment regions the selector keeps.
///
/// Read exactly once per `align` call; a configuration flag, not a state
/// machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// Keep only regions whose secondary status is `Primary`, suppressing
    /// secondary alignments the way `bwa mem` does without `-a`.
    #[default]
    PrimaryOnly,
    /// Keep every region the backend returns, in order.
    All,
}

/// Alignment configuration, the reduced equivalent of bwa-mem's `mem_opt_t`.
#[derive(Debug, Clone)]
pub struct MemOpt {
    /// Match score
    pub a: i32,
    /// Mismatch penalty
    pub b: i32,
    /// Gap open penalty (deletions)
    pub o_del: i32,
    /// Gap extension penalty (deletions)
    pub e_del: i32,
    /// Gap open penalty (insertions)
    pub o_ins: i32,
    /// Gap extension penalty (insertions)
    pub e_ins: i32,
    /// 5' clipping penalty
    pub pen_clip5: i32,
    /// 3' clipping penalty
    pub pen_clip3: i32,
    /// Band width for banded extension
    pub w: i32,
    /// Z-dropoff (off-diagonal X-dropoff)
    pub zdrop: i32,
    /// Minimum score threshold for output
    pub t: i32,
    /// 5x5 scoring matrix over A,C,G,T,N
    pub mat: [i8; 25],
    /// Region selection policy applied by the result selector
    pub selection: SelectionPolicy,
}

impl Default for MemOpt {
    /// Default parameters matching `mem_opt_init()` in bwa-mem.
    fn default() -> Self {
        let mut opt = MemOpt {
            a: 1,
            b: 4,
            o_del: 6,
            e_del: 1,
            o_ins: 6,
            e_ins: 1,
            pen_clip5: 5,
            pen_clip3: 5,
            w: 100,
            zdrop: 100,
            t: 30,
            mat: [0; 25],
            selection: SelectionPolicy::default(),
        };
        opt.fill_scoring_matrix();
        opt
    }
}

impl MemOpt {
    /// Set match/mismatch and gap penalties, refreshing the scoring matrix.
    ///
    /// Matrix entries are `i8`; match and mismatch scores outside the
    /// `i8` range saturate rather than wrap.
    pub fn with_scores(mut self, a: i32, b: i32, gap_open: i32, gap_extend: i32) -> Self {
        self.a = a;
        self.b = b;
        self.o_del = gap_open;
        self.o_ins = gap_open;
        self.e_del = gap_extend;
        self.e_ins = gap_extend;
        self.fill_scoring_matrix();
        self
    }

    /// Set the 5' and 3' clipping penalties.
    pub fn with_clip_penalties(mut self, clip5: i32, clip3: i32) -> Self {
        self.pen_clip5 = clip5;
        self.pen_clip3 = clip3;
        self
    }

    /// Set the region selection policy.
    pub fn with_selection(mut self, selection: SelectionPolicy) -> Self {
        self.selection = selection;
        self
    }

    /// Rebuild the scoring matrix from `a` and `b`.
    ///
    /// Equivalent to `bwa_fill_scmat`: match on the diagonal, -b elsewhere,
    /// and -1 for every pairing involving N.
    pub fn fill_scoring_matrix(&mut self) {
        let match_score = self.a.clamp(i8::MIN as i32, i8::MAX as i32) as i8;
        let mismatch = (-self.b).clamp(i8::MIN as i32, i8::MAX as i32) as i8;
        let mut k = 0;
        for i in 0..4 {
            for j in 0..4 {
                self.mat[k] = if i == j { match_score } else { mismatch };
                k += 1;
            }
            self.mat[k] = -1; // ambiguous base
            k += 1;
        }
        for _ in 0..5 {
            self.mat[k] = -1;
            k += 1;
        }
    }
}
