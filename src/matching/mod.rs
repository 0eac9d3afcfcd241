pub(crate) mod types;
pub(crate) mod naive;
pub(crate) mod exact;
pub(crate) mod edit;
pub(crate) mod pigeonhole;

pub use types::{MatchConfig, MatchMode, MatchReport, SlicePolicy};
pub use naive::{naive_exact, naive_with_mismatches, naive_with_reverse_complement};
pub use exact::exact_matches;
pub use edit::{edit_distance, min_edit_distance};
pub use pigeonhole::{approximate_match, approximate_match_with, ApproximateMatcher};

use crate::error::{Result, SeqError};

/// Run the matcher selected by `mode`.
///
/// Exact-only modes reject a positive mismatch budget; the seeded mode
/// needs a k-mer size. `MatchMode::Exact` reports matches only, with zero
/// counters.
pub fn find_matches(
    text: &[u8],
    pattern: &[u8],
    mode: MatchMode,
    config: &MatchConfig,
) -> Result<MatchReport> {
    match mode {
        MatchMode::Exact | MatchMode::ReverseComplement if config.max_mismatches > 0 => {
            Err(SeqError::config(format!(
                "{} matching is exact-only; got {} allowed mismatches",
                mode, config.max_mismatches
            )))
        }
        _ if text.is_empty() => Err(SeqError::invalid("text is empty")),
        _ if pattern.is_empty() => Err(SeqError::invalid("pattern is empty")),
        MatchMode::Naive => Ok(naive_with_mismatches(pattern, text, config.max_mismatches)),
        MatchMode::ReverseComplement => Ok(naive_with_reverse_complement(pattern, text)),
        MatchMode::Exact => Ok(MatchReport {
            matches: exact_matches(pattern, text)?,
            ..MatchReport::default()
        }),
        MatchMode::Pigeonhole => approximate_match_with(text, pattern, config),
    }
}
