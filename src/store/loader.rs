use std::collections::HashMap;
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::{InteractionRecord, MovieId, MovieRow, RatingRow},
};

use super::InteractionStore;

const RATINGS_FILE: &str = "ratings.json";
const MOVIES_FILE: &str = "movies.json";

/// Loads `ratings.json` and `movies.json` from a directory
pub async fn load_from_dir(data_dir: impl AsRef<Path>) -> AppResult<InteractionStore> {
    let data_dir = data_dir.as_ref();
    let ratings_path = data_dir.join(RATINGS_FILE);
    let movies_path = data_dir.join(MOVIES_FILE);

    tracing::info!(
        ratings = %ratings_path.display(),
        movies = %movies_path.display(),
        "Loading interaction dataset"
    );

    let ratings_json = tokio::fs::read_to_string(&ratings_path)
        .await
        .map_err(|e| AppError::DataLoad(format!("{}: {}", ratings_path.display(), e)))?;
    let movies_json = tokio::fs::read_to_string(&movies_path)
        .await
        .map_err(|e| AppError::DataLoad(format!("{}: {}", movies_path.display(), e)))?;

    load_from_json(&ratings_json, &movies_json)
}

/// Parses both dataset documents and joins them into a store
pub fn load_from_json(ratings_json: &str, movies_json: &str) -> AppResult<InteractionStore> {
    let ratings: Vec<RatingRow> = serde_json::from_str(ratings_json)?;
    let movies: Vec<MovieRow> = serde_json::from_str(movies_json)?;

    let records = join_ratings(ratings, movies);
    let store = InteractionStore::new(records);

    tracing::info!(
        records = store.len(),
        users = store.users().len(),
        "Interaction dataset loaded"
    );

    Ok(store)
}

/// Left-joins ratings to movie titles
///
/// Ratings whose movie has no title are dropped. When a movie id appears
/// more than once in the movies table the first title wins.
fn join_ratings(ratings: Vec<RatingRow>, movies: Vec<MovieRow>) -> Vec<InteractionRecord> {
    let mut titles: HashMap<MovieId, String> = HashMap::with_capacity(movies.len());
    for movie in movies {
        if titles.contains_key(&movie.movie_id) {
            tracing::warn!(movie_id = movie.movie_id, "Duplicate movie id, keeping first title");
            continue;
        }
        titles.insert(movie.movie_id, movie.title);
    }

    let mut skipped = 0usize;
    let records: Vec<InteractionRecord> = ratings
        .into_iter()
        .filter_map(|row| match titles.get(&row.movie_id) {
            Some(title) => Some(InteractionRecord {
                user_id: row.user_id,
                movie_id: row.movie_id,
                rating: row.rating,
                title: title.clone(),
            }),
            None => {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        tracing::warn!(count = skipped, "Ratings reference unknown movies, skipping");
    }

    records
}
