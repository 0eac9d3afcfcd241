//! Exhaustive shortest common superstring, used only as a test oracle.
//!
//! Tries all `R!` read orders, so it is only usable for a handful of reads
//! (six reads is 720 orders).

use super::overlap::suffix_prefix_overlap;

fn permutations(n: usize) -> Vec<Vec<usize>> {
    if n == 0 {
        return vec![Vec::new()];
    }
    let mut result = Vec::new();
    for rest in permutations(n - 1) {
        for pos in 0..=rest.len() {
            let mut order = rest.clone();
            order.insert(pos, n - 1);
            result.push(order);
        }
    }
    result
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}

/// Shortest string containing every read, by brute force over read orders
pub(crate) fn shortest_common_superstring(reads: &[&[u8]]) -> Vec<u8> {
    let mut shortest: Option<Vec<u8>> = None;
    for order in permutations(reads.len()) {
        let mut superstring: Vec<u8> = Vec::new();
        for &i in &order {
            let read = reads[i];
            if contains(&superstring, read) {
                continue;
            }
            let overlap = suffix_prefix_overlap(&superstring, read, 1);
            superstring.extend_from_slice(&read[overlap..]);
        }
        if shortest.as_ref().map_or(true, |s| superstring.len() < s.len()) {
            shortest = Some(superstring);
        }
    }
    shortest.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permutation_count() {
        assert_eq!(permutations(4).len(), 24);
        assert_eq!(permutations(0).len(), 1);
    }

    #[test]
    fn test_oracle() {
        let scs = shortest_common_superstring(&[&b"ABC"[..], b"BCA", b"CAB"]);
        assert_eq!(scs.len(), 5);
        let scs = shortest_common_superstring(&[&b"CGTACG"[..], b"TACGAT"]);
        assert_eq!(scs, b"CGTACGAT".to_vec());
    }
}
