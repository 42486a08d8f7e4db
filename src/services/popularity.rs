use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::{
    models::{CandidateItem, MovieId, UserId},
    store::InteractionStore,
};

use super::CandidateSource;

/// Minimum number of ratings an item needs to be ranked
pub const DEFAULT_MIN_RATINGS: usize = 50;

/// Aggregate rating statistics for one title
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PopularItem {
    /// First movie id seen with this title
    pub movie_id: MovieId,
    pub title: String,
    pub mean_rating: f64,
    pub rating_count: usize,
}

/// Ranks titles by mean rating among those with at least `min_ratings` ratings
///
/// Statistics are pooled per title, so movie ids sharing a title form one
/// entry and the support threshold applies to their combined count. Ordered
/// by mean rating, then rating count, both descending. Remaining ties keep
/// the order in which titles first appear in the dataset.
pub fn rank_popular(store: &InteractionStore, top_k: usize, min_ratings: usize) -> Vec<PopularItem> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    // (movie, title, sum, count) in first-appearance order
    let mut totals: Vec<(MovieId, &str, f64, usize)> = Vec::new();

    for record in store.records() {
        let slot = *index.entry(record.title.as_str()).or_insert_with(|| {
            totals.push((record.movie_id, record.title.as_str(), 0.0, 0));
            totals.len() - 1
        });
        totals[slot].2 += record.rating;
        totals[slot].3 += 1;
    }

    let mut ranked: Vec<PopularItem> = totals
        .into_iter()
        .filter(|&(_, _, _, count)| count >= min_ratings)
        .map(|(movie_id, title, sum, count)| PopularItem {
            movie_id,
            title: title.to_string(),
            mean_rating: sum / count as f64,
            rating_count: count,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.mean_rating
            .partial_cmp(&a.mean_rating)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.rating_count.cmp(&a.rating_count))
    });
    ranked.truncate(top_k);

    ranked
}

/// Global popularity model
#[derive(Debug, Clone)]
pub struct PopularityModel {
    min_ratings: usize,
}

impl Default for PopularityModel {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_RATINGS)
    }
}

impl PopularityModel {
    pub fn new(min_ratings: usize) -> Self {
        Self { min_ratings }
    }
}

impl CandidateSource for PopularityModel {
    fn candidates(
        &self,
        store: &InteractionStore,
        _user_id: UserId,
        top_k: usize,
    ) -> Vec<CandidateItem> {
        let ranked = rank_popular(store, top_k, self.min_ratings);

        if ranked.is_empty() {
            tracing::debug!(
                min_ratings = self.min_ratings,
                "No item meets the popularity support threshold"
            );
        }

        ranked
            .into_iter()
            .map(|item| CandidateItem::new(item.title, item.mean_rating))
            .collect()
    }

    fn name(&self) -> &'static str {
        "popularity"
    }
}
