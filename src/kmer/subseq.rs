use bytes::Bytes;
use log::debug;
use rayon::prelude::*;

use super::types::{lookup, IndexEntry, Kmer};
use super::SeedIndex;
use crate::error::{Result, SeqError};

/// Index of strided k-mers: `k` symbols taken every `ival` positions.
///
/// A seed starting at `i` covers `text[i..i + span]` where
/// `span = 1 + ival * (k - 1)`. Seeds at pattern offsets `0..ival` are
/// disjoint, so clustered mismatches corrupt fewer of them than they would
/// contiguous seeds.
#[derive(Debug, Clone)]
pub struct SubsequenceIndex {
    text: Bytes,
    k: usize,
    ival: usize,
    span: usize,
    entries: Vec<IndexEntry>,
}

fn strided(window: &[u8], ival: usize) -> Bytes {
    window.iter().step_by(ival).copied().collect::<Vec<u8>>().into()
}

/// Length of text spanned by one strided seed, `None` on overflow
pub(crate) fn seed_span(k: usize, ival: usize) -> Option<usize> {
    ival.checked_mul(k.saturating_sub(1))?.checked_add(1)
}

/// Number of strided seeds (offsets `0..ival`) that fit inside a pattern.
/// Offset `s` fits when `s + span <= pattern_len`, so these are always a
/// prefix of `0..ival`.
pub(crate) fn strided_usable_slices(k: usize, ival: usize, pattern_len: usize) -> usize {
    if k == 0 || ival == 0 {
        return 0;
    }
    match seed_span(k, ival) {
        Some(span) if span <= pattern_len => ival.min(pattern_len - span + 1),
        _ => 0,
    }
}

impl SubsequenceIndex {
    pub fn build(text: &[u8], k: usize, ival: usize) -> Result<Self> {
        if k == 0 {
            return Err(SeqError::config("k-mer size must be > 0"));
        }
        if ival == 0 {
            return Err(SeqError::invalid(
                "subsequence interval must be > 0 for strided indexing",
            ));
        }
        if text.is_empty() {
            return Err(SeqError::invalid("cannot index an empty text"));
        }
        let span = match seed_span(k, ival) {
            Some(span) if span <= text.len() => span,
            _ => {
                return Err(SeqError::invalid(format!(
                    "strided seed span (k={}, interval={}) exceeds text length {}",
                    k,
                    ival,
                    text.len()
                )))
            }
        };

        let text = Bytes::copy_from_slice(text);
        let mut entries: Vec<IndexEntry> = (0..=text.len() - span)
            .into_par_iter()
            .map(|offset| IndexEntry {
                kmer: Kmer::from_bytes(strided(&text[offset..offset + span], ival)),
                offset,
            })
            .collect();
        entries.par_sort_unstable_by(|a, b| a.kmer.cmp(&b.kmer).then(a.offset.cmp(&b.offset)));

        debug!(
            "Indexed {} strided {}-mers (interval {})",
            entries.len(),
            k,
            ival
        );
        Ok(SubsequenceIndex {
            text,
            k,
            ival,
            span,
            entries,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn interval(&self) -> usize {
        self.ival
    }

    pub fn span(&self) -> usize {
        self.span
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Text positions where `pattern` would have to start for its strided
    /// seed at `offset` to line up with an indexed seed.
    pub fn query_alignments(&self, pattern: &[u8], offset: usize) -> Vec<usize> {
        self.query(pattern, offset)
            .into_iter()
            .filter_map(|hit| hit.checked_sub(offset))
            .collect()
    }
}

impl SeedIndex for SubsequenceIndex {
    fn text(&self) -> &[u8] {
        &self.text
    }

    fn num_slices(&self, _pattern_len: usize) -> usize {
        self.ival
    }

    fn usable_slices(&self, pattern_len: usize) -> usize {
        strided_usable_slices(self.k, self.ival, pattern_len)
    }

    fn slice_shift(&self, slice: usize) -> usize {
        slice
    }

    fn query(&self, pattern: &[u8], slice: usize) -> Vec<usize> {
        let Some(end) = slice.checked_add(self.span) else {
            return Vec::new();
        };
        match pattern.get(slice..end) {
            Some(window) => lookup(&self.entries, &strided(window, self.ival))
                .iter()
                .map(|e| e.offset)
                .collect(),
            None => Vec::new(),
        }
    }
}
