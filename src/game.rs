use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::ai::eval::{has_finished, score};
use crate::ai::search::Searcher;
use crate::board::Board;
use crate::error::GameError;
use crate::moves::{all_moves, moves_from};
use crate::types::{Coord, DepthTable, Difficulty, GameState, Move, Player};

pub trait MoveSelector: Send + Sync {
    fn select_move(&mut self, board: &mut Board, player: Player, difficulty: Difficulty)
    -> Option<Move>;
}

/// Alpha-beta search with the configured depth table.
pub struct SearchSelector {
    depths: DepthTable,
    rng: StdRng,
}

impl SearchSelector {
    pub fn new(depths: DepthTable) -> Self {
        Self {
            depths,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(depths: DepthTable, seed: u64) -> Self {
        Self {
            depths,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SearchSelector {
    fn default() -> Self {
        Self::new(DepthTable::default())
    }
}

impl MoveSelector for SearchSelector {
    fn select_move(
        &mut self,
        board: &mut Board,
        player: Player,
        difficulty: Difficulty,
    ) -> Option<Move> {
        Searcher::for_difficulty(difficulty, &self.depths)
            .search(board, player, &mut self.rng)
            .best_move
    }
}

/// A human against the AI on one board.
pub struct GameInstance {
    board: Board,
    pub current_player: Player,
    pub human: Player,
    pub difficulty: Difficulty,
    last_move: Option<Move>,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(human: Player, difficulty: Difficulty, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            board: Board::starting_position(),
            current_player: Player::White,
            human,
            difficulty,
            last_move: None,
            selector,
        }
    }

    pub fn new_with_default_selector(human: Player, difficulty: Difficulty) -> Self {
        Self::new(human, difficulty, Box::new(SearchSelector::default()))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }

    /// The first side to pack its pieces into its target corner.
    pub fn winner(&self) -> Option<Player> {
        [Player::White, Player::Black]
            .into_iter()
            .find(|&player| has_finished(&self.board, player))
    }

    pub fn is_game_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Squares the piece on `from` may move to.
    pub fn legal_destinations(&self, from: Coord) -> Vec<Coord> {
        moves_from(from, &self.board)
            .into_iter()
            .map(|mv| mv.to)
            .collect()
    }

    pub fn has_legal_moves_for_current(&self) -> bool {
        !all_moves(&self.board, self.current_player).is_empty()
    }

    /// Hands the turn over when the human has nothing to move.
    pub fn pass(&mut self) -> Result<(), GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        if self.current_player != self.human {
            return Err(GameError::NotYourTurn(self.human));
        }
        if self.has_legal_moves_for_current() {
            return Err(GameError::CannotPass(self.human));
        }

        log::info!("{:?} has no legal move and passes", self.human);
        self.apply(None);
        Ok(())
    }

    /// Moves the human's piece from `from` to `to`.
    pub fn try_move(&mut self, from: Coord, to: Coord) -> Result<(), GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        if self.current_player != self.human {
            return Err(GameError::NotYourTurn(self.human));
        }
        if self.board[from].owner() != Some(self.current_player) {
            return Err(GameError::NoPieceAt(from));
        }

        let mv = moves_from(from, &self.board)
            .into_iter()
            .find(|mv| mv.to == to)
            .ok_or(GameError::IllegalMove { from, to })?;

        self.apply(Some(mv));
        Ok(())
    }

    /// Lets the AI move. A side without a reply still passes the turn.
    pub fn do_ai_move(&mut self) -> Result<(), GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        let ai = self.human.opponent();
        if self.current_player != ai {
            return Err(GameError::NotYourTurn(ai));
        }

        let selected = self
            .selector
            .select_move(&mut self.board, ai, self.difficulty);
        if let Some(mv) = &selected {
            let legal = moves_from(mv.from, &self.board);
            if self.board[mv.from].owner() != Some(ai) || !legal.contains(mv) {
                return Err(GameError::IllegalMove {
                    from: mv.from,
                    to: mv.to,
                });
            }
        } else {
            log::warn!("{ai:?} has no response");
        }

        self.apply(selected);
        Ok(())
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            board: self.board.cells().to_vec(),
            current_player: self.current_player,
            white_score: score(&self.board, Player::White),
            black_score: score(&self.board, Player::Black),
            is_game_over: self.is_game_over(),
            winner: self.winner(),
            last_path: self
                .last_move
                .as_ref()
                .map(|mv| mv.path.clone())
                .unwrap_or_default(),
        }
    }

    fn apply(&mut self, mv: Option<Move>) {
        if let Some(mv) = &mv {
            self.board.apply_move(mv);
        }
        self.last_move = mv;
        self.current_player = self.current_player.opponent();
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Player) {
        self.board = board;
        self.current_player = current_player;
        self.last_move = None;
    }
}
