//! Pigeonhole seeded matching: if a pattern matches with at most `m`
//! mismatches and is cut into at least `m + 1` disjoint seeds, one seed
//! matches exactly. Seeds are looked up in an index and every hit is
//! verified against the text.

use std::collections::BTreeSet;

use log::debug;
use rayon::prelude::*;

use super::naive::verify_alignment;
use super::types::{MatchConfig, MatchReport, SlicePolicy};
use crate::error::{Result, SeqError};
use crate::kmer::index::contiguous_usable_slices;
use crate::kmer::subseq::strided_usable_slices;
use crate::kmer::{KmerIndex, SeedIndex, SubsequenceIndex};

/// Seeded matcher over one prebuilt index; reusable for many patterns
pub struct ApproximateMatcher<'a, I: SeedIndex> {
    index: &'a I,
    max_mismatches: usize,
    policy: SlicePolicy,
}

fn check_slices(usable: usize, max_mismatches: usize, policy: SlicePolicy) -> Result<()> {
    if policy == SlicePolicy::Strict && usable < max_mismatches + 1 {
        return Err(SeqError::config(format!(
            "pattern yields {} usable seeds but {} mismatches need at least {}",
            usable,
            max_mismatches,
            max_mismatches + 1
        )));
    }
    Ok(())
}

impl<'a, I: SeedIndex> ApproximateMatcher<'a, I> {
    pub fn new(index: &'a I, max_mismatches: usize, policy: SlicePolicy) -> Self {
        ApproximateMatcher {
            index,
            max_mismatches,
            policy,
        }
    }

    /// All text offsets where `pattern` aligns with at most `m` mismatches
    pub fn find(&self, pattern: &[u8]) -> Result<MatchReport> {
        if pattern.is_empty() {
            return Err(SeqError::invalid("pattern is empty"));
        }
        check_slices(
            self.index.usable_slices(pattern.len()),
            self.max_mismatches,
            self.policy,
        )?;

        let text = self.index.text();
        let Some(last_start) = text.len().checked_sub(pattern.len()) else {
            return Ok(MatchReport::default());
        };

        let mut queries = 0;
        let mut candidates = BTreeSet::new();
        // seeds past the usable ones run off the end of the pattern
        for slice in 0..self.index.usable_slices(pattern.len()) {
            let shift = self.index.slice_shift(slice);
            for hit in self.index.query(pattern, slice) {
                queries += 1;
                match hit.checked_sub(shift) {
                    Some(start) if start <= last_start => {
                        candidates.insert(start);
                    }
                    _ => {}
                }
            }
        }

        let candidates: Vec<usize> = candidates.into_iter().collect();
        let verified: Vec<(usize, bool, usize)> = candidates
            .par_iter()
            .map(|&start| {
                let window = &text[start..start + pattern.len()];
                let (matched, comparisons) =
                    verify_alignment(pattern, window, self.max_mismatches);
                (start, matched, comparisons)
            })
            .collect();

        let report = MatchReport {
            matches: verified
                .iter()
                .filter(|(_, matched, _)| *matched)
                .map(|(start, _, _)| *start)
                .collect(),
            alignments: 0,
            queries,
            comparisons: verified.iter().map(|(_, _, c)| c).sum(),
        };
        debug!(
            "{} index hits, {} candidates verified, {} matches",
            report.queries,
            candidates.len(),
            report.matches.len()
        );
        Ok(report)
    }
}

/// Seeded approximate match with contiguous (`interval == 0`) or strided
/// seeds. Parameters are checked before anything is indexed.
pub fn approximate_match_with(
    text: &[u8],
    pattern: &[u8],
    config: &MatchConfig,
) -> Result<MatchReport> {
    if text.is_empty() {
        return Err(SeqError::invalid("text is empty"));
    }
    if pattern.is_empty() {
        return Err(SeqError::invalid("pattern is empty"));
    }
    if config.k == 0 {
        return Err(SeqError::config("pigeonhole matching requires a k-mer size > 0"));
    }
    let usable = if config.interval == 0 {
        contiguous_usable_slices(config.k, pattern.len())
    } else {
        strided_usable_slices(config.k, config.interval, pattern.len())
    };
    check_slices(usable, config.max_mismatches, config.policy)?;

    if config.interval == 0 {
        let index = KmerIndex::build(text, config.k)?;
        ApproximateMatcher::new(&index, config.max_mismatches, config.policy).find(pattern)
    } else {
        let index = SubsequenceIndex::build(text, config.k, config.interval)?;
        ApproximateMatcher::new(&index, config.max_mismatches, config.policy).find(pattern)
    }
}

/// Seeded approximate match under the strict seed-count policy
pub fn approximate_match(
    text: &[u8],
    pattern: &[u8],
    k: usize,
    max_mismatches: usize,
    interval: usize,
) -> Result<MatchReport> {
    approximate_match_with(
        text,
        pattern,
        &MatchConfig::new(k, max_mismatches).with_interval(interval),
    )
}
