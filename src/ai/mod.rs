pub mod eval;
pub mod search;

pub use eval::{WIN_SCORE, evaluate, has_finished, move_score, score};
pub use search::{SearchOutcome, Searcher, find_move, find_move_with_rng};
