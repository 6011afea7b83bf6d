// Result-selector behavior against a scripted mock backend: policy
// filtering, output order, the empty result, and failure propagation.

use std::sync::atomic::{AtomicUsize, Ordering};

use bwa_bridge::aligner::{align, AlignerBackend};
use bwa_bridge::bntseq::BntSeq;
use bwa_bridge::error::{AlignError, Result};
use bwa_bridge::index::{BwaIndex, FmComponent};
use bwa_bridge::mem_opt::{MemOpt, SelectionPolicy};
use bwa_bridge::region::{AlignmentRegion, SecondaryStatus};
use bwa_bridge::Alignment;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn empty_index() -> BwaIndex {
    BwaIndex {
        fm: FmComponent::default(),
        bns: BntSeq::new(),
    }
}

/// Backend scripted with raw secondary sentinels, counting every search and
/// every CIGAR handed out through convert.
struct MockBackend {
    sentinels: Vec<i32>,
    fail_conversion_at: Option<usize>,
    searches: AtomicUsize,
    conversions: AtomicUsize,
}

impl MockBackend {
    fn with_sentinels(sentinels: &[i32]) -> Self {
        MockBackend {
            sentinels: sentinels.to_vec(),
            fail_conversion_at: None,
            searches: AtomicUsize::new(0),
            conversions: AtomicUsize::new(0),
        }
    }

    fn failing_at(mut self, nth: usize) -> Self {
        self.fail_conversion_at = Some(nth);
        self
    }
}

impl AlignerBackend for MockBackend {
    fn search(
        &self,
        _opt: &MemOpt,
        _index: &BwaIndex,
        query: &[u8],
    ) -> Result<Vec<AlignmentRegion>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        let regions = self
            .sentinels
            .iter()
            .enumerate()
            .map(|(i, &sentinel)| {
                // Stamp each region with its input position so ordering is
                // observable in the finalized output.
                let mut region =
                    AlignmentRegion::new(1000 * i as u64, 1000 * i as u64 + 100, 0, query.len() as i32);
                region.rid = 0;
                region.score = 100 - i as i32;
                region.secondary = SecondaryStatus::from_raw(sentinel);
                region
            })
            .collect();
        Ok(regions)
    }

    fn convert(
        &self,
        _opt: &MemOpt,
        _index: &BwaIndex,
        query: &[u8],
        region: &AlignmentRegion,
    ) -> Result<Alignment> {
        let nth = self.conversions.fetch_add(1, Ordering::SeqCst);
        if self.fail_conversion_at == Some(nth) {
            return Err(AlignError::Backend("conversion failed".to_string()));
        }
        Ok(Alignment {
            rid: region.rid,
            ref_name: "chr1".to_string(),
            pos: region.rb,
            is_rev: false,
            mapq: 60,
            score: region.score,
            sub: region.sub,
            edit_distance: 0,
            cigar: vec![(b'M', query.len() as i32)],
            alt_hits: None,
        })
    }
}

#[test]
fn scenario_a_primary_only_keeps_regions_0_and_2() {
    init_logging();
    let backend = MockBackend::with_sentinels(&[-1, 0, -1]);
    let index = empty_index();
    let opt = MemOpt::default().with_selection(SelectionPolicy::PrimaryOnly);

    let buffer = align(&backend, &opt, &index, b"ACGTACGT").unwrap().unwrap();
    assert_eq!(buffer.len(), 2);
    // Stable filter: regions 0 and 2, in raw order, never sorted by score
    assert_eq!(buffer[0].pos, 0);
    assert_eq!(buffer[1].pos, 2000);
}

#[test]
fn scenario_b_no_regions_is_empty_not_error() {
    init_logging();
    let backend = MockBackend::with_sentinels(&[]);
    let index = empty_index();

    let result = align(&backend, &MemOpt::default(), &index, b"ACGTACGT").unwrap();
    assert!(result.is_none());
    assert_eq!(backend.searches.load(Ordering::SeqCst), 1);
    // The empty path allocates nothing and converts nothing
    assert_eq!(backend.conversions.load(Ordering::SeqCst), 0);
}

#[test]
fn scenario_c_keep_all_preserves_count_and_order() {
    init_logging();
    let backend = MockBackend::with_sentinels(&[0, -1]);
    let index = empty_index();
    let opt = MemOpt::default().with_selection(SelectionPolicy::All);

    let buffer = align(&backend, &opt, &index, b"ACGTACGT").unwrap().unwrap();
    assert_eq!(buffer.len(), 2);
    assert_eq!(buffer[0].pos, 0);
    assert_eq!(buffer[1].pos, 1000);
}

#[test]
fn scenario_d_conversion_failure_is_distinct_from_empty() {
    init_logging();
    let backend = MockBackend::with_sentinels(&[-1, -1, -1]).failing_at(1);
    let index = empty_index();
    let opt = MemOpt::default().with_selection(SelectionPolicy::All);

    let result = align(&backend, &opt, &index, b"ACGTACGT");
    assert!(matches!(result, Err(AlignError::Backend(_))));
    // The failure aborted the walk; no partial buffer escaped
    assert_eq!(backend.conversions.load(Ordering::SeqCst), 2);
}

#[test]
fn all_secondary_regions_yield_empty_under_primary_only() {
    init_logging();
    // An indicator of 0 is a parent index, so it marks a secondary region
    let backend = MockBackend::with_sentinels(&[0, 1, 2]);
    let index = empty_index();
    let opt = MemOpt::default().with_selection(SelectionPolicy::PrimaryOnly);

    let result = align(&backend, &opt, &index, b"ACGTACGT").unwrap();
    assert!(result.is_none());
    assert_eq!(backend.conversions.load(Ordering::SeqCst), 0);
}

#[test]
fn conversion_count_matches_buffer_length() {
    init_logging();
    let backend = MockBackend::with_sentinels(&[-1, 0, -1, 3, -1]);
    let index = empty_index();
    let opt = MemOpt::default().with_selection(SelectionPolicy::PrimaryOnly);

    let buffer = align(&backend, &opt, &index, b"ACGTACGT").unwrap().unwrap();
    // Exactly one CIGAR allocation per finalized record, all owned by the
    // buffer. Dropping the buffer consumes it, so releasing twice is a
    // compile error rather than undefined behavior.
    assert_eq!(buffer.len(), 3);
    assert_eq!(backend.conversions.load(Ordering::SeqCst), buffer.len());
    drop(buffer);
}

#[test]
fn selection_policy_is_read_per_call() {
    init_logging();
    let backend = MockBackend::with_sentinels(&[-1, 0]);
    let index = empty_index();

    let primary_only = MemOpt::default().with_selection(SelectionPolicy::PrimaryOnly);
    let keep_all = MemOpt::default().with_selection(SelectionPolicy::All);

    let a = align(&backend, &primary_only, &index, b"ACGT").unwrap().unwrap();
    let b = align(&backend, &keep_all, &index, b"ACGT").unwrap().unwrap();
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 2);
}

#[test]
fn into_vec_hands_records_to_the_caller() {
    init_logging();
    let backend = MockBackend::with_sentinels(&[-1]);
    let index = empty_index();
    let opt = MemOpt::default();

    let buffer = align(&backend, &opt, &index, b"ACGTACGT").unwrap().unwrap();
    let records = buffer.into_vec();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].ref_name, "chr1");
    assert_eq!(records[0].cigar_string(), "8M");
    assert_eq!(records[0].strand(), '+');
}
