//! Immutable interaction table shared by every recommendation request.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::models::{InteractionRecord, MovieId, UserId};

pub mod loader;
pub mod matrix;

pub use loader::{load_from_dir, load_from_json};
pub use matrix::{SparseRow, UserItemMatrix};

/// Activity summary for one user
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct UserActivity {
    pub user_id: UserId,
    pub activity: usize,
}

/// Read-only store of rating events and movie titles
///
/// Built once from the loaded dataset and shared by reference; nothing in
/// the engine mutates it afterwards.
#[derive(Debug, Clone, Default)]
pub struct InteractionStore {
    records: Vec<InteractionRecord>,
    titles: HashMap<MovieId, String>,
    activity: HashMap<UserId, usize>,
    matrix: UserItemMatrix,
}

impl InteractionStore {
    /// Creates a store from joined interaction records
    pub fn new(records: Vec<InteractionRecord>) -> Self {
        let mut titles = HashMap::new();
        let mut activity = HashMap::new();

        for record in &records {
            titles
                .entry(record.movie_id)
                .or_insert_with(|| record.title.clone());
            *activity.entry(record.user_id).or_insert(0) += 1;
        }

        let matrix = UserItemMatrix::from_records(&records);

        Self {
            records,
            titles,
            activity,
            matrix,
        }
    }

    /// All records in dataset order
    pub fn records(&self) -> &[InteractionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of interaction records for a user (0 for unknown users)
    pub fn user_activity(&self, user_id: UserId) -> usize {
        self.activity.get(&user_id).copied().unwrap_or(0)
    }

    /// Distinct users sorted by id, with their activity counts
    pub fn users(&self) -> Vec<UserActivity> {
        let mut users: Vec<UserActivity> = self
            .activity
            .iter()
            .map(|(&user_id, &activity)| UserActivity { user_id, activity })
            .collect();
        users.sort_by_key(|u| u.user_id);
        users
    }

    /// Title of a movie, as first seen in the dataset
    pub fn title_of(&self, movie_id: MovieId) -> Option<&str> {
        self.titles.get(&movie_id).map(String::as_str)
    }

    /// Movie ids the user has rated, in dataset order
    pub fn user_history(&self, user_id: UserId) -> Vec<MovieId> {
        self.records
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.movie_id)
            .collect()
    }

    /// Distinct movie ids whose title is in `titles`, in dataset order
    pub fn movie_ids_for_titles(&self, titles: &[String]) -> Vec<MovieId> {
        let wanted: HashSet<&str> = titles.iter().map(String::as_str).collect();
        let mut seen = HashSet::new();

        self.records
            .iter()
            .filter(|r| wanted.contains(r.title.as_str()))
            .filter(|r| seen.insert(r.movie_id))
            .map(|r| r.movie_id)
            .collect()
    }

    /// Sparse user-item rating matrix, built once with the store
    pub fn user_item_matrix(&self) -> &UserItemMatrix {
        &self.matrix
    }
}
