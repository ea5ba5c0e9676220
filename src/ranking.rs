//! Competition ranking of SAW scores
//!
//! Highest score gets rank 1. Equal scores share the lowest rank of their
//! block and the next distinct score skips the tied positions:
//! [0.9, 0.8, 0.8, 0.5] -> [1, 2, 2, 4].

/// Row indices ordered by score descending
///
/// The sort is stable, so tied rows keep their input order. Callers should not
/// rely on that order; only rank values are meaningful among ties.
pub fn rank_order(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order
}

/// Minimum-on-tie rank for every score, in input order
pub fn competition_ranks(scores: &[f64]) -> Vec<u32> {
    let order = rank_order(scores);
    let mut ranks = vec![0u32; scores.len()];

    let mut current = 0u32;
    let mut previous: Option<f64> = None;
    for (position, &row) in order.iter().enumerate() {
        let score = scores[row];
        if previous != Some(score) {
            current = position as u32 + 1;
            previous = Some(score);
        }
        ranks[row] = current;
    }

    ranks
}
