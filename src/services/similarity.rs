use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use crate::{
    models::{CandidateItem, MovieId, UserId},
    store::{InteractionStore, SparseRow, UserItemMatrix},
};

use super::CandidateSource;

/// Similarity a user must exceed to count as a neighbor
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.3;

/// Cosine similarity of two sparse rows sorted by column
///
/// Unrated cells count as 0. Returns 0.0 when either row has zero norm.
pub fn cosine_similarity(a: &SparseRow, b: &SparseRow) -> f64 {
    let norm_a = norm(a);
    let norm_b = norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot(a, b) / (norm_a * norm_b)
}

fn norm(row: &SparseRow) -> f64 {
    row.iter().map(|&(_, x)| x * x).sum::<f64>().sqrt()
}

/// Dot product by merging the two column-sorted rows
fn dot(a: &SparseRow, b: &SparseRow) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;

    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }

    sum
}

/// Users whose similarity to `user_id` exceeds `min_similarity`
///
/// The target itself is excluded. Sorted by similarity descending, ties by
/// user id ascending. Empty for users not present in the matrix.
pub fn similar_users(
    matrix: &UserItemMatrix,
    user_id: UserId,
    min_similarity: f64,
) -> Vec<(UserId, f64)> {
    let Some(target) = matrix.row(user_id) else {
        return Vec::new();
    };

    let mut neighbors: Vec<(UserId, f64)> = matrix
        .users()
        .iter()
        .filter(|&&other| other != user_id)
        .filter_map(|&other| {
            let similarity = cosine_similarity(target, matrix.row(other)?);
            (similarity > min_similarity).then_some((other, similarity))
        })
        .collect();

    neighbors.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    neighbors
}

/// User-based collaborative filtering
///
/// Every neighbor adds `similarity * rating` to each movie the target has
/// not rated. Scores are summed over neighbors, not averaged, so movies
/// endorsed by many similar users rank higher.
pub fn user_based_cf(
    store: &InteractionStore,
    user_id: UserId,
    top_k: usize,
    min_similarity: f64,
) -> Vec<CandidateItem> {
    let matrix = store.user_item_matrix();
    if !matrix.contains_user(user_id) {
        return Vec::new();
    }

    let neighbors = similar_users(matrix, user_id, min_similarity);
    let watched: HashSet<MovieId> = matrix
        .rated_items(user_id)
        .into_iter()
        .map(|(movie_id, _)| movie_id)
        .collect();

    let mut weighted_scores: BTreeMap<MovieId, f64> = BTreeMap::new();
    for &(neighbor, similarity) in &neighbors {
        for (movie_id, rating) in matrix.rated_items(neighbor) {
            if !watched.contains(&movie_id) {
                *weighted_scores.entry(movie_id).or_insert(0.0) += similarity * rating;
            }
        }
    }

    tracing::debug!(
        user_id,
        neighbors = neighbors.len(),
        scored_items = weighted_scores.len(),
        "Collaborative scores computed"
    );

    let mut scored: Vec<(MovieId, f64)> = weighted_scores.into_iter().collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    scored
        .into_iter()
        .take(top_k)
        .filter_map(|(movie_id, score)| {
            store
                .title_of(movie_id)
                .map(|title| CandidateItem::new(title, score))
        })
        .collect()
}

/// User-user similarity model
#[derive(Debug, Clone)]
pub struct UserSimilarityModel {
    min_similarity: f64,
}

impl Default for UserSimilarityModel {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SIMILARITY)
    }
}

impl UserSimilarityModel {
    pub fn new(min_similarity: f64) -> Self {
        Self { min_similarity }
    }
}

impl CandidateSource for UserSimilarityModel {
    fn candidates(
        &self,
        store: &InteractionStore,
        user_id: UserId,
        top_k: usize,
    ) -> Vec<CandidateItem> {
        user_based_cf(store, user_id, top_k, self.min_similarity)
    }

    fn name(&self) -> &'static str {
        "user_cf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::record;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    /// Users 1 and 2 share taste, user 3 rates something unrelated
    fn neighborhood_store() -> InteractionStore {
        InteractionStore::new(vec![
            record(1, 10, 5.0, "Alien"),
            record(1, 20, 4.0, "Aliens"),
            record(2, 10, 5.0, "Alien"),
            record(2, 20, 4.0, "Aliens"),
            record(2, 30, 5.0, "Prometheus"),
            record(2, 40, 2.0, "Covenant"),
            record(3, 50, 5.0, "Notting Hill"),
        ])
    }

    #[test]
    fn test_cosine_similarity() {
        assert_close(cosine_similarity(&[(0, 1.0)], &[(0, 1.0)]), 1.0);
        assert_close(cosine_similarity(&[(0, 1.0)], &[(1, 1.0)]), 0.0);
        assert_close(
            cosine_similarity(&[(0, 3.0), (1, 4.0)], &[(0, 4.0), (1, 3.0)]),
            24.0 / 25.0,
        );
    }

    #[test]
    fn test_cosine_similarity_skips_unshared_columns() {
        // dense: [2, 0, 1, 0] and [0, 5, 2, 3]
        let a = [(0, 2.0), (2, 1.0)];
        let b = [(1, 5.0), (2, 2.0), (3, 3.0)];
        assert_close(
            cosine_similarity(&a, &b),
            2.0 / (5.0f64.sqrt() * 38.0f64.sqrt()),
        );
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        assert_eq!(cosine_similarity(&[], &[(0, 1.0), (1, 2.0)]), 0.0);
        assert_eq!(cosine_similarity(&[(0, 0.0)], &[(0, 1.0)]), 0.0);
    }

    #[test]
    fn test_similar_users_excludes_self_and_dissimilar() {
        let store = neighborhood_store();
        let matrix = store.user_item_matrix();
        let neighbors = similar_users(matrix, 1, DEFAULT_MIN_SIMILARITY);

        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].0, 2);
        // dot = 41, |u1| = sqrt(41), |u2| = sqrt(70)
        assert_close(neighbors[0].1, 41.0 / (41.0f64.sqrt() * 70.0f64.sqrt()));
    }

    #[test]
    fn test_recommends_unwatched_items_from_neighbors() {
        let store = neighborhood_store();
        let recs = user_based_cf(&store, 1, 5, DEFAULT_MIN_SIMILARITY);

        let titles: Vec<&str> = recs.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Prometheus", "Covenant"]);

        let similarity = 41.0 / (41.0f64.sqrt() * 70.0f64.sqrt());
        assert_close(recs[0].score, similarity * 5.0);
        assert_close(recs[1].score, similarity * 2.0);
    }

    #[test]
    fn test_scores_sum_across_neighbors() {
        let store = InteractionStore::new(vec![
            record(1, 10, 4.0, "Shared"),
            record(2, 10, 4.0, "Shared"),
            record(2, 20, 3.0, "Novel"),
            record(3, 10, 4.0, "Shared"),
            record(3, 20, 5.0, "Novel"),
        ]);

        let recs = user_based_cf(&store, 1, 5, DEFAULT_MIN_SIMILARITY);
        assert_eq!(recs.len(), 1);

        let sim_2 = 4.0 / 5.0; // 16 / (4 * 5)
        let sim_3 = 16.0 / (4.0 * 41.0f64.sqrt());
        assert_close(recs[0].score, sim_2 * 3.0 + sim_3 * 5.0);
    }

    #[test]
    fn test_top_k_limits_output() {
        let store = neighborhood_store();
        let recs = user_based_cf(&store, 1, 1, DEFAULT_MIN_SIMILARITY);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Prometheus");
    }

    #[test]
    fn test_unknown_user_is_empty() {
        let store = neighborhood_store();
        assert!(user_based_cf(&store, 404, 5, DEFAULT_MIN_SIMILARITY).is_empty());
    }

    #[test]
    fn test_no_neighbors_is_empty() {
        let store = neighborhood_store();
        let model = UserSimilarityModel::default();
        assert!(model.candidates(&store, 3, 5).is_empty());
    }

    #[test]
    fn test_no_novel_items_is_empty() {
        let store = InteractionStore::new(vec![
            record(1, 10, 4.0, "Shared"),
            record(2, 10, 5.0, "Shared"),
        ]);
        assert!(user_based_cf(&store, 1, 5, DEFAULT_MIN_SIMILARITY).is_empty());
    }
}
