//! Game scores and leaderboards

pub mod board;
#[allow(clippy::module_inception)]
pub mod score;
pub mod user_score;

pub use score::Score;
pub use user_score::{ScorePeriod, UserScore};
