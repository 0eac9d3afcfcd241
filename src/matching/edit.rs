use bio::alignment::distance::levenshtein;
use bio::alignment::pairwise::Aligner;

/// Global edit distance between `x` and `y`
pub fn edit_distance(x: &[u8], y: &[u8]) -> usize {
    levenshtein(x, y) as usize
}

/// Smallest edit distance between `sample` and any substring of `reference`.
///
/// Unit-cost semi-global alignment: all of `sample` is aligned, the ends of
/// `reference` are free.
pub fn min_edit_distance(reference: &[u8], sample: &[u8]) -> usize {
    if sample.is_empty() {
        return 0;
    }
    if reference.is_empty() {
        return sample.len();
    }
    let score = |a: u8, b: u8| if a == b { 0i32 } else { -1i32 };
    let mut aligner = Aligner::with_capacity(sample.len(), reference.len(), 0, -1, &score);
    let alignment = aligner.semiglobal(sample, reference);
    alignment.score.unsigned_abs() as usize
}
