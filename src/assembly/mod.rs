pub(crate) mod types;
pub(crate) mod overlap;
pub(crate) mod greedy;
pub(crate) mod cancel;
#[cfg(test)]
pub(crate) mod scs;

pub use types::{AssemblyConfig, AssemblyOutcome, AssemblyStatus, OverlapEdge, Read, ReadId};
pub use overlap::{build_overlap_graph, suffix_prefix_overlap, OverlapGraph, OverlapGraphBuilder};
pub use greedy::{assemble_greedy, GreedyAssembler};
pub use cancel::{Cancellation, Deadline, Never};
