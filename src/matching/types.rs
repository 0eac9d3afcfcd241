use serde::Serialize;
use std::fmt;

/// What to do when a pattern is cut into fewer than `m + 1` usable seeds,
/// where a match with `m` mismatches may corrupt every seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlicePolicy {
    /// Reject the request with a configuration error
    #[default]
    Strict,
    /// Run anyway; matches whose every seed holds a mismatch are missed
    Lossy,
}

/// Pigeonhole matching parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    /// Seed length
    pub k: usize,
    /// Mismatch budget `m`
    pub max_mismatches: usize,
    /// Stride of strided seeds; 0 selects contiguous k-mers
    pub interval: usize,
    pub policy: SlicePolicy,
}

impl MatchConfig {
    pub fn new(k: usize, max_mismatches: usize) -> Self {
        MatchConfig {
            k,
            max_mismatches,
            interval: 0,
            policy: SlicePolicy::default(),
        }
    }

    pub fn with_interval(mut self, interval: usize) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_policy(mut self, policy: SlicePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Matcher selected by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Scan every alignment, allowing mismatches
    Naive,
    /// Exact scan of the pattern and its reverse complement
    ReverseComplement,
    /// Exact-only Horspool scan
    Exact,
    /// k-mer seeded search with mismatches
    Pigeonhole,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Naive => write!(f, "naive"),
            MatchMode::ReverseComplement => write!(f, "reverse-complement"),
            MatchMode::Exact => write!(f, "exact"),
            MatchMode::Pigeonhole => write!(f, "pigeonhole"),
        }
    }
}

/// Match offsets plus work counters. The counters are diagnostics only.
///
/// `MatchMode::Exact` delegates to `bio`'s Horspool scanner, which does not
/// expose its shifts or comparisons, so its counters stay zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    /// Sorted, unique pattern start offsets in the text
    pub matches: Vec<usize>,
    /// Alignments tried (naive scanning)
    pub alignments: usize,
    /// Index hits returned by seed queries (pigeonhole)
    pub queries: usize,
    /// Character comparisons made while verifying
    pub comparisons: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = MatchConfig::new(5, 2)
            .with_interval(3)
            .with_policy(SlicePolicy::Lossy);
        assert_eq!(config.k, 5);
        assert_eq!(config.max_mismatches, 2);
        assert_eq!(config.interval, 3);
        assert_eq!(config.policy, SlicePolicy::Lossy);
        assert_eq!(MatchConfig::new(5, 0).policy, SlicePolicy::Strict);
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(MatchMode::ReverseComplement.to_string(), "reverse-complement");
        assert_eq!(MatchMode::Pigeonhole.to_string(), "pigeonhole");
    }
}
