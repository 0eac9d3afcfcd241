use bytes::Bytes;
use serde::Serialize;
use std::fmt;

/// Stable identifier of a read within one assembly.
///
/// Input reads are numbered in input order; every merged read gets the next
/// unused number, so ascending ids follow insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ReadId(pub usize);

impl fmt::Display for ReadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// An identified sequence taking part in assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Read {
    id: ReadId,
    sequence: Bytes,
}

impl Read {
    pub fn new(id: ReadId, sequence: impl Into<Bytes>) -> Self {
        Read {
            id,
            sequence: sequence.into(),
        }
    }

    /// Number reads in input order. Duplicate sequences stay distinct reads.
    pub fn from_sequences<I, S>(sequences: I) -> Vec<Read>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        sequences
            .into_iter()
            .enumerate()
            .map(|(i, seq)| Read::new(ReadId(i), Bytes::copy_from_slice(seq.as_ref())))
            .collect()
    }

    pub fn id(&self) -> ReadId {
        self.id
    }

    pub fn sequence(&self) -> &Bytes {
        &self.sequence
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
}

/// Verified suffix/prefix overlap: the last `length` symbols of `source`
/// equal the first `length` symbols of `target`, and no longer such
/// overlap exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverlapEdge {
    pub source: ReadId,
    pub target: ReadId,
    pub length: usize,
}

/// Parameters for overlap graph construction and greedy assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyConfig {
    /// k-mer size used as candidate filter, and minimum overlap length
    pub min_overlap: usize,
}

impl AssemblyConfig {
    pub fn new(min_overlap: usize) -> Self {
        AssemblyConfig { min_overlap }
    }
}

/// How the contraction loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyStatus {
    /// No positive-overlap edge remained
    Converged,
    /// Stopped early by a cancellation check; reads are partially assembled
    Cancelled,
}

impl fmt::Display for AssemblyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyStatus::Converged => write!(f, "converged"),
            AssemblyStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Final read set of an assembly run
#[derive(Debug, Clone)]
pub struct AssemblyOutcome {
    /// Surviving reads concatenated in ascending id order
    pub sequence: Bytes,
    /// Surviving reads in ascending id order
    pub reads: Vec<Read>,
    /// Number of contractions performed
    pub merges: usize,
    pub status: AssemblyStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_from_sequences() {
        let reads = Read::from_sequences(["ACGT", "ACGT", "TT"]);
        assert_eq!(reads.len(), 3);
        assert_eq!(reads[1].id(), ReadId(1));
        assert_eq!(reads[2].as_bytes(), b"TT");
        // same sequence, different records
        assert_ne!(reads[0], reads[1]);
        assert_eq!(reads[0].sequence(), reads[1].sequence());
    }

    #[test]
    fn test_display() {
        assert_eq!(ReadId(7).to_string(), "r7");
        assert_eq!(AssemblyStatus::Cancelled.to_string(), "cancelled");
    }
}
