//! Recommendation engine services
//!
//! Each sub-model produces its own candidate list; the weighting policy and
//! blending engine merge them, and the explanation and metrics modules
//! describe the result.

use crate::{
    models::{CandidateItem, UserId},
    store::InteractionStore,
};

pub mod blending;
pub mod explanations;
pub mod metrics;
pub mod popularity;
pub mod recommender;
pub mod similarity;
pub mod weighting;

pub use popularity::PopularityModel;
pub use recommender::{EngineSettings, Recommender};
pub use similarity::UserSimilarityModel;

/// Trait for candidate-generating sub-models
///
/// Sources receive the whole interaction store and the target user; sources
/// that are not personalized simply ignore the user. Returning an empty list
/// is a normal outcome (cold-start users, too little support) and never an
/// error.
#[cfg_attr(test, mockall::automock)]
pub trait CandidateSource: Send + Sync {
    /// Ranked candidates for the user, best first, at most `top_k` of them
    fn candidates(
        &self,
        store: &InteractionStore,
        user_id: UserId,
        top_k: usize,
    ) -> Vec<CandidateItem>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}
