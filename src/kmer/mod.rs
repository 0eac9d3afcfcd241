pub(crate) mod types;
pub(crate) mod index;
pub(crate) mod subseq;
pub(crate) mod read_map;

pub use types::{IndexEntry, Kmer};
pub use index::KmerIndex;
pub use subseq::SubsequenceIndex;
pub use read_map::KmerReadMap;

/// A seed index over one text that the pigeonhole matcher can query.
///
/// A pattern is cut into `num_slices` disjoint seeds; seed `slice` starts
/// `slice_shift(slice)` symbols into the pattern.
pub trait SeedIndex: Sync {
    /// The indexed text
    fn text(&self) -> &[u8];

    /// Number of seeds a pattern of this length is cut into
    fn num_slices(&self, pattern_len: usize) -> usize;

    /// Seeds that lie entirely inside a pattern of this length
    fn usable_slices(&self, pattern_len: usize) -> usize;

    /// Offset of seed `slice` from the start of the pattern
    fn slice_shift(&self, slice: usize) -> usize;

    /// Text offsets where seed `slice` of `pattern` occurs, ascending.
    /// Empty when the seed runs past the end of the pattern.
    fn query(&self, pattern: &[u8], slice: usize) -> Vec<usize>;
}
