use std::collections::BTreeMap;

use bytes::{Bytes, BytesMut};
use log::{debug, info};
use rayon::prelude::*;

use super::cancel::{Cancellation, Never};
use super::overlap::{suffix_prefix_overlap, OverlapGraph, OverlapGraphBuilder};
use super::types::{AssemblyConfig, AssemblyOutcome, AssemblyStatus, OverlapEdge, Read, ReadId};
use crate::error::{Result, SeqError};
use crate::kmer::KmerReadMap;

/// Greedy shortest-common-superstring approximation: repeatedly merge the
/// pair of reads with the longest overlap until no overlap is left.
///
/// Not optimal in general. Each merge removes one read, so at most `R - 1`
/// merges happen for `R` input reads.
#[derive(Debug, Clone, Copy)]
pub struct GreedyAssembler {
    builder: OverlapGraphBuilder,
    config: AssemblyConfig,
}

/// Current reads, their overlap graph and the k-mer map used to find
/// neighbours of newly merged reads. Only touched by one contraction at a time.
struct AssemblyState {
    reads: BTreeMap<ReadId, Read>,
    graph: OverlapGraph,
    read_map: KmerReadMap,
    next_id: usize,
    merges: usize,
}

impl AssemblyState {
    fn new(builder: &OverlapGraphBuilder, reads: &[Read]) -> Result<Self> {
        let (graph, read_map) = builder.build_with_map(reads)?;
        Ok(AssemblyState {
            reads: reads.iter().map(|r| (r.id(), r.clone())).collect(),
            graph,
            read_map,
            next_id: reads.iter().map(|r| r.id().0 + 1).max().unwrap_or(0),
            merges: 0,
        })
    }

    /// Replace the two reads of `edge` with their merge and reconnect it.
    /// Edges between untouched reads are kept as they are.
    fn contract(&mut self, edge: OverlapEdge) -> Result<ReadId> {
        let (Some(a), Some(b)) = (
            self.reads.remove(&edge.source),
            self.reads.remove(&edge.target),
        ) else {
            return Err(SeqError::invalid(format!(
                "overlap edge {} -> {} references a read that is no longer present",
                edge.source, edge.target
            )));
        };

        for read in [&a, &b] {
            self.graph.remove_node(read.id());
            self.read_map.remove_read(read.id(), read.sequence());
        }

        let mut merged = BytesMut::with_capacity(a.len() + b.len() - edge.length);
        merged.extend_from_slice(a.as_bytes());
        merged.extend_from_slice(&b.as_bytes()[edge.length..]);

        let id = ReadId(self.next_id);
        self.next_id += 1;
        let merged = Read::new(id, merged.freeze());

        let k = self.graph.min_overlap();
        self.read_map.add_read(id, merged.sequence());
        self.graph.add_node(id);

        let candidates: Vec<&Read> = self
            .read_map
            .candidates(id, merged.sequence())
            .into_iter()
            .filter_map(|other| self.reads.get(&other))
            .collect();
        let edges: Vec<OverlapEdge> = candidates
            .par_iter()
            .flat_map_iter(|other| {
                let forward = suffix_prefix_overlap(merged.as_bytes(), other.as_bytes(), k);
                let backward = suffix_prefix_overlap(other.as_bytes(), merged.as_bytes(), k);
                [
                    OverlapEdge {
                        source: id,
                        target: other.id(),
                        length: forward,
                    },
                    OverlapEdge {
                        source: other.id(),
                        target: id,
                        length: backward,
                    },
                ]
            })
            .filter(|edge| edge.length > 0)
            .collect();
        for edge in edges {
            self.graph.insert(edge);
        }

        self.reads.insert(id, merged);
        self.merges += 1;
        Ok(id)
    }

    fn finish(self, status: AssemblyStatus) -> AssemblyOutcome {
        let reads: Vec<Read> = self.reads.into_values().collect();
        let mut sequence = BytesMut::with_capacity(reads.iter().map(Read::len).sum());
        for read in &reads {
            sequence.extend_from_slice(read.as_bytes());
        }
        AssemblyOutcome {
            sequence: sequence.freeze(),
            reads,
            merges: self.merges,
            status,
        }
    }
}

impl GreedyAssembler {
    pub fn new(config: AssemblyConfig) -> Result<Self> {
        let builder = OverlapGraphBuilder::new(config)?;
        Ok(GreedyAssembler { builder, config })
    }

    pub fn config(&self) -> AssemblyConfig {
        self.config
    }

    /// Assemble until convergence
    pub fn assemble(&self, reads: &[Read]) -> Result<AssemblyOutcome> {
        self.assemble_with(reads, &Never)
    }

    /// Assemble, checking `cancel` before every contraction
    pub fn assemble_with<C>(&self, reads: &[Read], cancel: &C) -> Result<AssemblyOutcome>
    where
        C: Cancellation + ?Sized,
    {
        let mut state = AssemblyState::new(&self.builder, reads)?;
        info!(
            "Starting greedy assembly of {} reads ({} overlaps)",
            reads.len(),
            state.graph.edge_count()
        );

        loop {
            if cancel.is_cancelled() {
                info!(
                    "Assembly cancelled after {} merges, {} reads remain",
                    state.merges,
                    state.reads.len()
                );
                return Ok(state.finish(AssemblyStatus::Cancelled));
            }

            let Some(edge) = state.graph.max_edge() else {
                info!(
                    "Assembly converged after {} merges, {} reads remain",
                    state.merges,
                    state.reads.len()
                );
                return Ok(state.finish(AssemblyStatus::Converged));
            };

            let merged = state.contract(edge)?;
            debug!(
                "Merged {} + {} (overlap {}) into {}, {} overlaps remain",
                edge.source,
                edge.target,
                edge.length,
                merged,
                state.graph.edge_count()
            );
        }
    }
}

/// Greedily assemble `reads` with minimum overlap `k` and return the
/// assembled sequence
pub fn assemble_greedy(reads: &[Read], k: usize) -> Result<Bytes> {
    GreedyAssembler::new(AssemblyConfig::new(k))?
        .assemble(reads)
        .map(|outcome| outcome.sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::scs::shortest_common_superstring;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Lets `remaining` checks pass, then cancels
    struct CancelAfter {
        remaining: AtomicUsize,
    }

    impl CancelAfter {
        fn new(checks: usize) -> Self {
            CancelAfter {
                remaining: AtomicUsize::new(checks),
            }
        }
    }

    impl Cancellation for CancelAfter {
        fn is_cancelled(&self) -> bool {
            self.remaining
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
                .is_err()
        }
    }

    fn assemble(seqs: &[&str], k: usize) -> AssemblyOutcome {
        let reads = Read::from_sequences(seqs.iter().map(|s| s.as_bytes()));
        GreedyAssembler::new(AssemblyConfig::new(k))
            .unwrap()
            .assemble(&reads)
            .unwrap()
    }

    #[test]
    fn test_two_reads() {
        let reads = Read::from_sequences(["CGTACG", "TACGAT"]);
        assert_eq!(assemble_greedy(&reads, 4).unwrap().as_ref(), b"CGTACGAT");
    }

    #[test]
    fn test_successive_contractions() {
        let outcome = assemble(&["ABCDEFG", "EFGHIJ", "HIJKLMNOP"], 3);
        assert_eq!(outcome.sequence.as_ref(), b"ABCDEFGHIJKLMNOP");
        assert_eq!(outcome.merges, 2);
        assert_eq!(outcome.status, AssemblyStatus::Converged);
        assert_eq!(outcome.reads.len(), 1);
        assert_eq!(outcome.reads[0].id(), ReadId(4));
    }

    #[test]
    fn test_no_overlaps_concatenates_in_input_order() {
        let outcome = assemble(&["AAAA", "CCCCC", "GGG"], 3);
        assert_eq!(outcome.sequence.as_ref(), b"AAAACCCCCGGG");
        assert_eq!(outcome.merges, 0);
        assert_eq!(outcome.reads.len(), 3);
    }

    #[test]
    fn test_merged_read_joins_unaffected_reads() {
        // ACGTTG + TTGCA first (overlap 3), then GGGACG + ACGTTGCA
        let outcome = assemble(&["ACGTTG", "TTGCA", "GGGAC"], 2);
        assert_eq!(outcome.sequence.as_ref(), b"GGGACGTTGCA");
        assert_eq!(outcome.merges, 2);
    }

    #[test]
    fn test_tie_break_by_read_order() {
        // r0 -> r1 and r0 -> r2 both overlap by 2; r0 -> r1 is merged first
        let outcome = assemble(&["AAAB", "ABCC", "ABDD"], 2);
        assert_eq!(outcome.sequence.as_ref(), b"ABDDAAABCC");
        assert_eq!(outcome.merges, 1);
    }

    #[test]
    fn test_cancelled_before_first_merge() {
        let reads = Read::from_sequences(["CGTACG", "TACGAT"]);
        let cancel = AtomicBool::new(true);
        let outcome = GreedyAssembler::new(AssemblyConfig::new(4))
            .unwrap()
            .assemble_with(&reads, &cancel)
            .unwrap();
        assert_eq!(outcome.status, AssemblyStatus::Cancelled);
        assert_eq!(outcome.merges, 0);
        assert_eq!(outcome.sequence.as_ref(), b"CGTACGTACGAT");
    }

    #[test]
    fn test_cancelled_between_merges() {
        // one merge (r0 + r1 -> r3) happens before the second check cancels
        let reads = Read::from_sequences(["ABCDEFG", "EFGHIJ", "HIJKLMNOP"]);
        let outcome = GreedyAssembler::new(AssemblyConfig::new(3))
            .unwrap()
            .assemble_with(&reads, &CancelAfter::new(1))
            .unwrap();
        assert_eq!(outcome.status, AssemblyStatus::Cancelled);
        assert_eq!(outcome.merges, 1);
        let ids: Vec<ReadId> = outcome.reads.iter().map(Read::id).collect();
        assert_eq!(ids, vec![ReadId(2), ReadId(3)]);
        assert_eq!(outcome.reads[1].as_bytes(), b"ABCDEFGHIJ");
        assert_eq!(outcome.sequence.as_ref(), b"HIJKLMNOPABCDEFGHIJ");
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            GreedyAssembler::new(AssemblyConfig::new(0)),
            Err(SeqError::Configuration(_))
        ));
        let reads = Read::from_sequences(["ACG"]);
        assert!(matches!(
            assemble_greedy(&reads, 4),
            Err(SeqError::InvalidParameter(_))
        ));
        assert!(assemble_greedy(&[], 4).unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn prop_terminates_and_contains_every_read(
            seqs in prop::collection::vec("[ACG]{3,10}", 1..7),
            k in 1usize..4,
        ) {
            let reads = Read::from_sequences(seqs.iter().map(|s| s.as_bytes()));
            let outcome = GreedyAssembler::new(AssemblyConfig::new(k))
                .unwrap()
                .assemble(&reads)
                .unwrap();

            prop_assert!(outcome.merges < reads.len());
            let longest = reads.iter().map(Read::len).max().unwrap_or(0);
            let total: usize = reads.iter().map(Read::len).sum();
            prop_assert!(outcome.sequence.len() >= longest);
            prop_assert!(outcome.sequence.len() <= total);

            let assembled = outcome.sequence.as_ref();
            for read in &reads {
                prop_assert!(assembled
                    .windows(read.len())
                    .any(|w| w == read.as_bytes()));
            }

            let oracle = shortest_common_superstring(
                &reads.iter().map(Read::as_bytes).collect::<Vec<_>>(),
            );
            prop_assert!(outcome.sequence.len() >= oracle.len());
        }

        #[test]
        fn prop_contraction_matches_rebuild(
            seqs in prop::collection::vec("[AC]{3,9}", 1..7),
            k in 1usize..4,
        ) {
            let builder = OverlapGraphBuilder::new(AssemblyConfig::new(k)).unwrap();
            let reads = Read::from_sequences(seqs.iter().map(|s| s.as_bytes()));
            let mut state = AssemblyState::new(&builder, &reads).unwrap();

            while let Some(edge) = state.graph.max_edge() {
                state.contract(edge).unwrap();
                let current: Vec<Read> = state.reads.values().cloned().collect();
                let rebuilt = builder.build(&current).unwrap();
                prop_assert_eq!(
                    state.graph.edges().collect::<Vec<_>>(),
                    rebuilt.edges().collect::<Vec<_>>()
                );
                prop_assert_eq!(
                    state.graph.nodes().collect::<Vec<_>>(),
                    rebuilt.nodes().collect::<Vec<_>>()
                );
            }
            prop_assert!(state.merges < reads.len());
        }
    }
}
