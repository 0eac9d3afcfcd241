//! k-mer indexed approximate matching (pigeonhole seeding) and greedy
//! overlap-graph assembly over sequencing data.

pub mod assembly;
pub mod error;
pub mod io;
pub mod kmer;
pub mod matching;

pub use assembly::{
    assemble_greedy, build_overlap_graph, AssemblyConfig, AssemblyOutcome, AssemblyStatus,
    GreedyAssembler, OverlapEdge, OverlapGraph, Read, ReadId,
};
pub use error::{Result, SeqError};
pub use kmer::{KmerIndex, SeedIndex, SubsequenceIndex};
pub use matching::{approximate_match, ApproximateMatcher, MatchConfig, MatchReport, SlicePolicy};
