use std::collections::{BTreeSet, HashMap};

use crate::models::{InteractionRecord, MovieId, UserId};

/// Ratings of one user as `(column, rating)` pairs, sorted by column
pub type SparseRow = [(usize, f64)];

/// User x item rating matrix
///
/// Rows follow ascending user id, columns ascending movie id. Only rated
/// cells are stored; every other cell reads as 0. Duplicate (user, movie)
/// rows are averaged into one cell.
#[derive(Debug, Clone, Default)]
pub struct UserItemMatrix {
    users: Vec<UserId>,
    items: Vec<MovieId>,
    user_index: HashMap<UserId, usize>,
    rows: Vec<Vec<(usize, f64)>>,
}

impl UserItemMatrix {
    pub fn from_records(records: &[InteractionRecord]) -> Self {
        let users: Vec<UserId> = records
            .iter()
            .map(|r| r.user_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let items: Vec<MovieId> = records
            .iter()
            .map(|r| r.movie_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let user_index: HashMap<UserId, usize> =
            users.iter().enumerate().map(|(i, &u)| (u, i)).collect();
        let item_index: HashMap<MovieId, usize> =
            items.iter().enumerate().map(|(i, &m)| (m, i)).collect();

        // (sum, count) per cell
        let mut totals: HashMap<(usize, usize), (f64, usize)> = HashMap::new();
        for record in records {
            let row = user_index[&record.user_id];
            let col = item_index[&record.movie_id];
            let entry = totals.entry((row, col)).or_insert((0.0, 0));
            entry.0 += record.rating;
            entry.1 += 1;
        }

        let mut rows: Vec<Vec<(usize, f64)>> = vec![Vec::new(); users.len()];
        for ((row, col), (sum, count)) in totals {
            rows[row].push((col, sum / count as f64));
        }
        for row in &mut rows {
            row.sort_by_key(|&(col, _)| col);
        }

        Self {
            users,
            items,
            user_index,
            rows,
        }
    }

    /// User ids in row order
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// Movie ids in column order
    pub fn items(&self) -> &[MovieId] {
        &self.items
    }

    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.user_index.contains_key(&user_id)
    }

    /// Rated cells of a user, `None` for unknown users
    pub fn row(&self, user_id: UserId) -> Option<&SparseRow> {
        self.user_index
            .get(&user_id)
            .map(|&i| self.rows[i].as_slice())
    }

    /// (movie, rating) pairs the user actually rated, in column order
    pub fn rated_items(&self, user_id: UserId) -> Vec<(MovieId, f64)> {
        self.row(user_id)
            .map(|row| {
                row.iter()
                    .map(|&(col, rating)| (self.items[col], rating))
                    .collect()
            })
            .unwrap_or_default()
    }
}
