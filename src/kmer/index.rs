use bytes::Bytes;
use log::debug;
use rayon::prelude::*;

use super::types::{lookup, IndexEntry, Kmer};
use super::SeedIndex;
use crate::error::{Result, SeqError};

/// Sorted index of every contiguous k-mer of a text.
///
/// Built once and never mutated; one index serves any number of queries.
#[derive(Debug, Clone)]
pub struct KmerIndex {
    text: Bytes,
    k: usize,
    entries: Vec<IndexEntry>,
}

impl KmerIndex {
    /// Index all `len(text) - k + 1` k-mers of `text`
    pub fn build(text: &[u8], k: usize) -> Result<Self> {
        if k == 0 {
            return Err(SeqError::config("k-mer size must be > 0"));
        }
        if text.is_empty() {
            return Err(SeqError::invalid("cannot index an empty text"));
        }
        if k > text.len() {
            return Err(SeqError::invalid(format!(
                "k-mer size {} exceeds text length {}",
                k,
                text.len()
            )));
        }

        let text = Bytes::copy_from_slice(text);
        let mut entries: Vec<IndexEntry> = (0..=text.len() - k)
            .map(|offset| IndexEntry {
                kmer: Kmer::from_bytes(text.slice(offset..offset + k)),
                offset,
            })
            .collect();
        entries.par_sort_unstable_by(|a, b| a.kmer.cmp(&b.kmer).then(a.offset.cmp(&b.offset)));

        debug!("Indexed {} {}-mers", entries.len(), k);
        Ok(KmerIndex { text, k, entries })
    }

    pub fn k(&self) -> usize {
        self.k
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

    /// Offsets of an arbitrary k-length seed
    pub fn occurrences(&self, seed: &[u8]) -> Vec<usize> {
        lookup(&self.entries, seed).iter().map(|e| e.offset).collect()
    }
}

/// Number of whole k-length slices in a pattern
pub(crate) fn contiguous_usable_slices(k: usize, pattern_len: usize) -> usize {
    if k == 0 {
        0
    } else {
        pattern_len / k
    }
}

impl SeedIndex for KmerIndex {
    fn text(&self) -> &[u8] {
        &self.text
    }

    fn num_slices(&self, pattern_len: usize) -> usize {
        pattern_len / self.k + 1
    }

    fn usable_slices(&self, pattern_len: usize) -> usize {
        contiguous_usable_slices(self.k, pattern_len)
    }

    fn slice_shift(&self, slice: usize) -> usize {
        slice.saturating_mul(self.k)
    }

    fn query(&self, pattern: &[u8], slice: usize) -> Vec<usize> {
        let bounds = slice
            .checked_mul(self.k)
            .and_then(|start| Some((start, start.checked_add(self.k)?)));
        match bounds.and_then(|(start, end)| pattern.get(start..end)) {
            Some(seed) => self.occurrences(seed),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_sorted() {
        let index = KmerIndex::build(b"GCATGCA", 3).unwrap();
        assert_eq!(index.len(), 5);
        let kmers: Vec<String> = index.entries().iter().map(|e| e.kmer.sequence()).collect();
        assert_eq!(kmers, vec!["ATG", "CAT", "GCA", "GCA", "TGC"]);
        assert_eq!(index.entries()[2].offset, 0);
        assert_eq!(index.entries()[3].offset, 4);
    }

    #[test]
    fn test_query_slices() {
        let index = KmerIndex::build(b"AACGTAACGT", 2).unwrap();
        // slice 0 = "AA", slice 1 = "CG", slice 2 = "T" (partial)
        assert_eq!(index.query(b"AACGT", 0), vec![0, 5]);
        assert_eq!(index.query(b"AACGT", 1), vec![2, 7]);
        assert!(index.query(b"AACGT", 2).is_empty());
        assert!(index.query(b"AACGT", 9).is_empty());
        assert_eq!(index.num_slices(5), 3);
        assert_eq!(index.usable_slices(5), 2);
    }

    #[test]
    fn test_query_slice_overflow() {
        let index = KmerIndex::build(b"AACGTAACGT", 2).unwrap();
        assert!(index.query(b"AACGT", usize::MAX / 2 + 1).is_empty());
        assert!(index.query(b"AACGT", usize::MAX).is_empty());
    }

    #[test]
    fn test_query_missing_kmer() {
        let index = KmerIndex::build(b"AAAAAA", 3).unwrap();
        assert!(index.query(b"CCC", 0).is_empty());
        assert_eq!(index.occurrences(b"AAA"), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            KmerIndex::build(b"ACGT", 0),
            Err(SeqError::Configuration(_))
        ));
        assert!(matches!(
            KmerIndex::build(b"ACGT", 5),
            Err(SeqError::InvalidParameter(_))
        ));
        assert!(matches!(
            KmerIndex::build(b"", 1),
            Err(SeqError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_whole_text_kmer() {
        let index = KmerIndex::build(b"ACGT", 4).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.occurrences(b"ACGT"), vec![0]);
    }
}
