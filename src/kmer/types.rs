use bytes::Bytes;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A fixed-length run of symbols taken from a source sequence.
///
/// Contiguous k-mers are zero-copy slices of the source buffer; strided
/// k-mers own a freshly gathered buffer.
#[derive(Debug, Clone, Eq)]
pub struct Kmer {
    sequence: Bytes,
}

impl Kmer {
    pub fn new(sequence: &[u8]) -> Self {
        Kmer {
            sequence: Bytes::copy_from_slice(sequence),
        }
    }

    pub fn from_bytes(sequence: Bytes) -> Self {
        Kmer { sequence }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn sequence(&self) -> String {
        String::from_utf8_lossy(&self.sequence).into_owned()
    }
}

impl Hash for Kmer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sequence.hash(state);
    }
}

impl PartialEq for Kmer {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence
    }
}

impl PartialOrd for Kmer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Kmer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

/// Where a k-mer occurs in the indexed text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub kmer: Kmer,
    pub offset: usize,
}

/// Contiguous run of entries whose k-mer equals `seed`.
///
/// `entries` must be sorted by `(kmer, offset)`.
pub(crate) fn lookup<'a>(entries: &'a [IndexEntry], seed: &[u8]) -> &'a [IndexEntry] {
    let start = entries.partition_point(|e| e.kmer.as_bytes() < seed);
    let len = entries[start..].partition_point(|e| e.kmer.as_bytes() == seed);
    &entries[start..start + len]
}
