//! Overlap graph construction: k-mer candidate filtering followed by exact
//! suffix/prefix verification.

use std::collections::{BTreeMap, BTreeSet};

use crossbeam::queue::SegQueue;
use fxhash::FxHashMap;
use log::{debug, info};
use rayon::prelude::*;

use super::types::{AssemblyConfig, OverlapEdge, Read, ReadId};
use crate::error::{Result, SeqError};
use crate::kmer::KmerReadMap;

/// Length of the longest suffix of `a` that is a prefix of `b`, provided it
/// is at least `min_length` long; otherwise 0.
pub fn suffix_prefix_overlap(a: &[u8], b: &[u8], min_length: usize) -> usize {
    if min_length == 0 || a.len() < min_length || b.len() < min_length {
        return 0;
    }
    let anchor = &b[..min_length];
    let mut start = 0;
    // leftmost anchor hit whose tail is a prefix of b gives the longest overlap
    while let Some(hit) = a[start..]
        .windows(min_length)
        .position(|window| window == anchor)
    {
        let pos = start + hit;
        if b.starts_with(&a[pos..]) {
            return a.len() - pos;
        }
        start = pos + 1;
    }
    0
}

/// Reads connected by verified overlap edges.
///
/// Edges are kept ordered by `(source, target)`, which fixes the iteration
/// order used for tie-breaking during greedy contraction.
#[derive(Debug, Clone, Default)]
pub struct OverlapGraph {
    min_overlap: usize,
    nodes: BTreeSet<ReadId>,
    edges: BTreeMap<(ReadId, ReadId), usize>,
}

impl OverlapGraph {
    pub fn new<I>(min_overlap: usize, nodes: I) -> Self
    where
        I: IntoIterator<Item = ReadId>,
    {
        OverlapGraph {
            min_overlap,
            nodes: nodes.into_iter().collect(),
            edges: BTreeMap::new(),
        }
    }

    pub fn min_overlap(&self) -> usize {
        self.min_overlap
    }

    pub fn nodes(&self) -> impl Iterator<Item = ReadId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Edges in ascending `(source, target)` order
    pub fn edges(&self) -> impl Iterator<Item = OverlapEdge> + '_ {
        self.edges
            .iter()
            .map(|(&(source, target), &length)| OverlapEdge {
                source,
                target,
                length,
            })
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn overlap(&self, source: ReadId, target: ReadId) -> Option<usize> {
        self.edges.get(&(source, target)).copied()
    }

    /// Reads that are the source of at least one edge
    pub fn source_nodes(&self) -> BTreeSet<ReadId> {
        self.edges.keys().map(|(source, _)| *source).collect()
    }

    /// First edge of maximal length in `(source, target)` order
    pub fn max_edge(&self) -> Option<OverlapEdge> {
        let mut best: Option<OverlapEdge> = None;
        for edge in self.edges() {
            if best.map_or(true, |b| edge.length > b.length) {
                best = Some(edge);
            }
        }
        best
    }

    pub(crate) fn add_node(&mut self, id: ReadId) {
        self.nodes.insert(id);
    }

    pub(crate) fn insert(&mut self, edge: OverlapEdge) {
        if edge.length > 0 && edge.source != edge.target {
            self.edges.insert((edge.source, edge.target), edge.length);
        }
    }

    /// Drop a node together with every edge touching it
    pub(crate) fn remove_node(&mut self, id: ReadId) {
        self.nodes.remove(&id);
        self.edges
            .retain(|(source, target), _| *source != id && *target != id);
    }
}

/// Builds an [`OverlapGraph`] over a read set, comparing only reads that
/// share a k-mer.
#[derive(Debug, Clone, Copy)]
pub struct OverlapGraphBuilder {
    config: AssemblyConfig,
}

impl OverlapGraphBuilder {
    pub fn new(config: AssemblyConfig) -> Result<Self> {
        if config.min_overlap == 0 {
            return Err(SeqError::config("minimum overlap length must be > 0"));
        }
        Ok(OverlapGraphBuilder { config })
    }

    pub fn build(&self, reads: &[Read]) -> Result<OverlapGraph> {
        self.build_with_map(reads).map(|(graph, _)| graph)
    }

    /// Build the graph and hand back the k-mer map it was filtered with, so
    /// the assembler can keep it current instead of rebuilding it.
    pub(crate) fn build_with_map(&self, reads: &[Read]) -> Result<(OverlapGraph, KmerReadMap)> {
        let k = self.config.min_overlap;
        if let Some(short) = reads.iter().find(|r| r.len() < k) {
            return Err(SeqError::invalid(format!(
                "k-mer size {} exceeds length {} of read {}",
                k,
                short.len(),
                short.id()
            )));
        }

        let read_map = KmerReadMap::new(k);
        read_map.add_reads(reads.par_iter());
        info!(
            "Indexed {} distinct {}-mers across {} reads",
            read_map.unique_kmers(),
            k,
            reads.len()
        );

        let by_id: FxHashMap<ReadId, &Read> = reads.iter().map(|r| (r.id(), r)).collect();
        let verified = SegQueue::new();
        let compared: usize = reads
            .par_iter()
            .map(|read| {
                let candidates = read_map.candidates(read.id(), read.sequence());
                for candidate in &candidates {
                    if let Some(other) = by_id.get(candidate) {
                        let length = suffix_prefix_overlap(read.as_bytes(), other.as_bytes(), k);
                        if length > 0 {
                            verified.push(OverlapEdge {
                                source: read.id(),
                                target: *candidate,
                                length,
                            });
                        }
                    }
                }
                candidates.len()
            })
            .sum();

        let mut graph = OverlapGraph::new(k, reads.iter().map(Read::id));
        while let Some(edge) = verified.pop() {
            graph.insert(edge);
        }
        debug!(
            "Verified {} candidate pairs, kept {} overlaps",
            compared,
            graph.edge_count()
        );
        Ok((graph, read_map))
    }
}

/// Overlap graph of `reads` with minimum overlap (and k-mer size) `k`
pub fn build_overlap_graph(reads: &[Read], k: usize) -> Result<OverlapGraph> {
    OverlapGraphBuilder::new(AssemblyConfig::new(k))?.build(reads)
}
