use std::collections::HashSet;
use std::hash::Hash;

use crate::models::WeightPair;

/// Fraction of the first `k` recommended items found in `relevant`
///
/// Always divides by `k`, even when fewer than `k` items were recommended.
pub fn precision_at_k<T: Eq + Hash>(recommended: &[T], relevant: &[T], k: usize) -> f64 {
    if k == 0 {
        return 0.0;
    }

    let relevant: HashSet<&T> = relevant.iter().collect();
    let hits = recommended
        .iter()
        .take(k)
        .filter(|item| relevant.contains(item))
        .count();

    hits as f64 / k as f64
}

/// Share of distinct items in the list
pub fn diversity_score<T: Eq + Hash>(items: &[T]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }

    let distinct: HashSet<&T> = items.iter().collect();
    distinct.len() as f64 / items.len() as f64
}

/// Proxy for explainability: the weight given to the popularity model
pub fn explainability_score(weights: &WeightPair) -> f64 {
    weights.popularity
}
