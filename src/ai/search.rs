use std::cmp::Reverse;
use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;
use web_time::Instant;

use crate::ai::eval::{evaluate, has_finished, move_score};
use crate::board::Board;
use crate::moves::all_moves;
use crate::types::{DepthTable, Difficulty, Move, Player};

const MIN_SCORE: i32 = -1_000_000;
const MAX_SCORE: i32 = 1_000_000;

/// Result of a root search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// `None` when the side has already won or has no legal move.
    pub best_move: Option<Move>,
    pub score: i32,
    /// Number of root moves sharing the best score.
    pub candidates: usize,
    /// Positions scored by the static evaluator.
    pub evaluated: u64,
    pub elapsed: Duration,
}

/// Fixed-depth negamax with alpha-beta pruning.
///
/// The board is mutated in place and restored before every return.
pub struct Searcher {
    depth: u8,
    evaluated: u64,
}

impl Searcher {
    /// `depth` is the number of plies searched after each root move.
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            evaluated: 0,
        }
    }

    pub fn for_difficulty(difficulty: Difficulty, table: &DepthTable) -> Self {
        Self::new(table.depth_for(difficulty))
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Picks a move for `ai`, breaking ties between equally scored root moves
    /// uniformly at random.
    pub fn search<R: Rng + ?Sized>(
        &mut self,
        board: &mut Board,
        ai: Player,
        rng: &mut R,
    ) -> SearchOutcome {
        let start_time = Instant::now();
        self.evaluated = 0;

        if has_finished(board, ai) {
            log::debug!("{ai:?} has already finished, no move to search");
            return SearchOutcome {
                best_move: None,
                score: evaluate(board, ai),
                candidates: 0,
                evaluated: 0,
                elapsed: start_time.elapsed(),
            };
        }

        let mut moves = all_moves(board, ai);
        order_moves(&mut moves, ai);

        let mut best_moves: Vec<Move> = Vec::new();
        let mut best_score = MIN_SCORE;

        for mv in moves {
            let score = {
                let mut applied = board.scoped(&mv);
                if has_finished(&applied, ai) {
                    self.evaluated += 1;
                    evaluate(&applied, ai)
                } else {
                    -self.negamax(&mut applied, ai.opponent(), self.depth, MIN_SCORE, MAX_SCORE)
                }
            };

            if score > best_score {
                best_score = score;
                best_moves.clear();
                best_moves.push(mv);
            } else if score == best_score {
                best_moves.push(mv);
            }
        }

        let elapsed = start_time.elapsed();
        log::debug!(
            "searched depth {} in {}ms, evaluated {} positions, choosing one of {} moves",
            self.depth,
            elapsed.as_millis(),
            self.evaluated,
            best_moves.len()
        );

        SearchOutcome {
            best_move: best_moves.choose(rng).cloned(),
            score: if best_moves.is_empty() {
                evaluate(board, ai)
            } else {
                best_score
            },
            candidates: best_moves.len(),
            evaluated: self.evaluated,
            elapsed,
        }
    }

    pub fn evaluated(&self) -> u64 {
        self.evaluated
    }

    fn negamax(
        &mut self,
        board: &mut Board,
        to_move: Player,
        depth: u8,
        alpha: i32,
        beta: i32,
    ) -> i32 {
        if depth == 0 || has_finished(board, to_move) {
            self.evaluated += 1;
            return evaluate(board, to_move);
        }

        let mut moves = all_moves(board, to_move);
        // A side with no move left is scored as a quiet leaf.
        if moves.is_empty() {
            self.evaluated += 1;
            return evaluate(board, to_move);
        }
        order_moves(&mut moves, to_move);

        let mut alpha = alpha;
        for mv in &moves {
            let score = {
                let mut applied = board.scoped(mv);
                -self.negamax(&mut applied, to_move.opponent(), depth - 1, -beta, -alpha)
            };
            if score >= beta {
                return beta;
            }
            alpha = alpha.max(score);
        }

        alpha
    }
}

/// Best-looking moves first. The sort is stable, so ties keep generation order.
fn order_moves(moves: &mut [Move], player: Player) {
    moves.sort_by_key(|mv| Reverse(move_score(mv, player)));
}

/// Picks a move for `ai` at the default depth for `difficulty`.
pub fn find_move(board: &mut Board, ai: Player, difficulty: Difficulty) -> Option<Move> {
    find_move_with_rng(board, ai, difficulty, &mut rand::thread_rng())
}

pub fn find_move_with_rng<R: Rng + ?Sized>(
    board: &mut Board,
    ai: Player,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Move> {
    Searcher::for_difficulty(difficulty, &DepthTable::default())
        .search(board, ai, rng)
        .best_move
}
