use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{CandidateItem, Recommendation, WeightPair};

/// Number of blended recommendations returned by default
pub const DEFAULT_TOP_K: usize = 5;

/// Merges the two candidate lists into one ranking
///
/// Each candidate contributes `score * weight` of its source. Titles present
/// in both lists accumulate both contributions. The result is sorted by
/// summed score descending with a stable sort, so ties keep first-encounter
/// order (popularity candidates first, then CF candidates).
pub fn blend(
    popularity: &[CandidateItem],
    user_cf: &[CandidateItem],
    weights: WeightPair,
    top_k: usize,
) -> Vec<Recommendation> {
    let weighted = popularity
        .iter()
        .map(|item| (item, weights.popularity))
        .chain(user_cf.iter().map(|item| (item, weights.user_cf)));

    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut combined: Vec<Recommendation> = Vec::new();

    for (item, weight) in weighted {
        let contribution = item.score * weight;
        match positions.get(item.title.as_str()) {
            Some(&i) => combined[i].final_score += contribution,
            None => {
                positions.insert(item.title.as_str(), combined.len());
                combined.push(Recommendation {
                    title: item.title.clone(),
                    final_score: contribution,
                });
            }
        }
    }

    combined.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(Ordering::Equal)
    });
    combined.truncate(top_k);

    combined
}
