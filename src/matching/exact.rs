use bio::pattern_matching::horspool::Horspool;

use crate::error::{Result, SeqError};

/// Exact occurrences of `pattern` in `text` using Horspool's shift table.
/// This scanner has no notion of mismatches.
pub fn exact_matches(pattern: &[u8], text: &[u8]) -> Result<Vec<usize>> {
    if pattern.is_empty() {
        return Err(SeqError::invalid("pattern is empty"));
    }
    if pattern.len() > text.len() {
        return Ok(Vec::new());
    }
    let horspool = Horspool::new(pattern);
    Ok(horspool.find_all(text).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::naive::naive_exact;

    #[test]
    fn test_agrees_with_naive() {
        let text = b"GATTACAGATTACATTACA";
        for pattern in [&b"TACA"[..], b"GATTACA", b"A", b"CCC"] {
            assert_eq!(exact_matches(pattern, text).unwrap(), naive_exact(pattern, text));
        }
    }

    #[test]
    fn test_edge_cases() {
        assert!(exact_matches(b"ACGTT", b"ACGT").unwrap().is_empty());
        assert!(matches!(exact_matches(b"", b"ACGT"), Err(SeqError::InvalidParameter(_))));
    }
}
