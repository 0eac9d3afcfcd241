use std::collections::BTreeSet;

use bytes::Bytes;
use dashmap::DashMap;
use fxhash::{FxBuildHasher, FxHashSet};
use rayon::prelude::*;

use super::types::Kmer;
use crate::assembly::{Read, ReadId};

/// Global map from every k-mer to the reads that contain it.
///
/// Reads can be added concurrently; the assembler also removes and re-adds
/// reads as it contracts the graph.
pub struct KmerReadMap {
    k: usize,
    reads: DashMap<Kmer, FxHashSet<ReadId>, FxBuildHasher>,
}

impl KmerReadMap {
    /// Create an empty map for k-mers of size `k`
    pub fn new(k: usize) -> Self {
        KmerReadMap {
            k,
            reads: DashMap::with_hasher(FxBuildHasher::default()),
        }
    }

    fn kmers<'a>(&self, sequence: &'a Bytes) -> impl Iterator<Item = Kmer> + 'a {
        let k = self.k;
        let count = if k == 0 || sequence.len() < k {
            0
        } else {
            sequence.len() - k + 1
        };
        (0..count).map(move |start| Kmer::from_bytes(sequence.slice(start..start + k)))
    }

    /// Record every k-mer of one read
    pub fn add_read(&self, id: ReadId, sequence: &Bytes) {
        for kmer in self.kmers(sequence) {
            self.reads.entry(kmer).or_default().insert(id);
        }
    }

    /// Record reads in parallel using rayon
    pub fn add_reads<'a, I>(&self, reads: I)
    where
        I: ParallelIterator<Item = &'a Read>,
    {
        reads.for_each(|read| self.add_read(read.id(), read.sequence()));
    }

    /// Forget a read; k-mers left without any read are dropped
    pub fn remove_read(&self, id: ReadId, sequence: &Bytes) {
        for kmer in self.kmers(sequence) {
            let now_empty = match self.reads.get_mut(&kmer) {
                Some(mut ids) => {
                    ids.remove(&id);
                    ids.is_empty()
                }
                None => false,
            };
            if now_empty {
                self.reads.remove_if(&kmer, |_, ids| ids.is_empty());
            }
        }
    }

    /// Reads sharing at least one k-mer with `sequence`, excluding `id`
    pub fn candidates(&self, id: ReadId, sequence: &Bytes) -> BTreeSet<ReadId> {
        let mut candidates = BTreeSet::new();
        for kmer in self.kmers(sequence) {
            if let Some(ids) = self.reads.get(&kmer) {
                candidates.extend(ids.iter().copied().filter(|other| *other != id));
            }
        }
        candidates
    }

    /// Get the k-mer size
    pub fn kmer_size(&self) -> usize {
        self.k
    }

    /// Get the number of distinct k-mers
    pub fn unique_kmers(&self) -> usize {
        self.reads.len()
    }

    /// Reads containing `kmer`, ascending
    pub fn reads_with(&self, kmer: &[u8]) -> Vec<ReadId> {
        let mut ids: Vec<ReadId> = self
            .reads
            .get(&Kmer::new(kmer))
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }
}
