//! Brute-force scanners. Also the reference the seeded matcher is tested
//! against.

use bio::alphabets::dna::revcomp;

use super::types::MatchReport;

/// Compare `pattern` against an equally long `window`, stopping as soon as
/// more than `max_mismatches` positions differ.
///
/// Returns whether the window matched and how many symbols were compared.
pub(crate) fn verify_alignment(
    pattern: &[u8],
    window: &[u8],
    max_mismatches: usize,
) -> (bool, usize) {
    let mut mismatches = 0;
    let mut comparisons = 0;
    for (p, t) in pattern.iter().zip(window) {
        comparisons += 1;
        if p != t {
            mismatches += 1;
            if mismatches > max_mismatches {
                return (false, comparisons);
            }
        }
    }
    (window.len() == pattern.len(), comparisons)
}

/// Every offset where `pattern` aligns to `text` with at most
/// `max_mismatches` substitutions
pub fn naive_with_mismatches(pattern: &[u8], text: &[u8], max_mismatches: usize) -> MatchReport {
    let mut report = MatchReport::default();
    if pattern.is_empty() || pattern.len() > text.len() {
        return report;
    }
    for start in 0..=text.len() - pattern.len() {
        report.alignments += 1;
        let (matched, comparisons) =
            verify_alignment(pattern, &text[start..start + pattern.len()], max_mismatches);
        report.comparisons += comparisons;
        if matched {
            report.matches.push(start);
        }
    }
    report
}

/// Exact occurrences of `pattern`
pub fn naive_exact(pattern: &[u8], text: &[u8]) -> Vec<usize> {
    naive_with_mismatches(pattern, text, 0).matches
}

/// Exact occurrences of `pattern` or its reverse complement, sorted.
/// A pattern equal to its own reverse complement is scanned once.
pub fn naive_with_reverse_complement(pattern: &[u8], text: &[u8]) -> MatchReport {
    let mut report = naive_with_mismatches(pattern, text, 0);
    let reverse = revcomp(pattern);
    if reverse != pattern {
        let other = naive_with_mismatches(&reverse, text, 0);
        report.matches.extend(other.matches);
        report.alignments += other.alignments;
        report.comparisons += other.comparisons;
        report.matches.sort_unstable();
        report.matches.dedup();
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exact() {
        assert_eq!(naive_exact(b"AACGT", b"AACGTAACGT"), vec![0, 5]);
        assert!(naive_exact(b"AACGTAACGTT", b"AACGTAACGT").is_empty());
        assert!(naive_exact(b"", b"ACGT").is_empty());
    }

    #[test]
    fn test_mismatches_and_counters() {
        let report = naive_with_mismatches(b"ACG", b"ACGTCG", 1);
        assert_eq!(report.matches, vec![0, 3]);
        assert_eq!(report.alignments, 4);
        // ACG:3, CGT:2 (early exit), GTC:2, TCG:3
        assert_eq!(report.comparisons, 10);
    }

    #[test]
    fn test_verify_alignment_short_circuits() {
        assert_eq!(verify_alignment(b"AAAA", b"CCAA", 1), (false, 2));
        assert_eq!(verify_alignment(b"AAAA", b"CAAA", 1), (true, 4));
    }

    #[test]
    fn test_reverse_complement() {
        // revcomp(AAC) = GTT
        let report = naive_with_reverse_complement(b"AAC", b"AACTTGTT");
        assert_eq!(report.matches, vec![0, 5]);
        // palindrome ACGT scanned once
        let report = naive_with_reverse_complement(b"ACGT", b"ACGTACGT");
        assert_eq!(report.matches, vec![0, 4]);
        assert_eq!(report.alignments, 5);
    }
}
