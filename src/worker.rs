//! Message boundary for running the search off the interactive thread.
//!
//! A host posts a [`SearchRequest`] (64 cells, colour to move, difficulty)
//! and gets back either a move or nothing when that side has already won or
//! cannot move.

use rand::Rng;
use serde::Deserialize;

use crate::ai::search::Searcher;
use crate::board::Board;
use crate::error::RequestError;
use crate::moves::moves_from;
use crate::types::{Cell, Coord, DepthTable, Difficulty, Move, NUM_SQUARES, Player};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchRequest {
    pub cells: Vec<Cell>,
    pub color: Player,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Overrides the depth implied by `difficulty`, capped at the deepest
    /// table entry.
    #[serde(default)]
    pub depth: Option<u8>,
}

impl SearchRequest {
    pub fn depth(&self) -> u8 {
        let table = DepthTable::default();
        match self.depth {
            Some(depth) => depth.min(table.max_depth()),
            None => table.depth_for(self.difficulty),
        }
    }
}

pub fn board_from_cells(cells: &[Cell]) -> Result<Board, RequestError> {
    let cells: [Cell; NUM_SQUARES] = cells
        .try_into()
        .map_err(|_| RequestError::CellCount(cells.len()))?;
    Ok(Board::from_cells(cells))
}

pub fn handle_request<R: Rng + ?Sized>(
    request: &SearchRequest,
    rng: &mut R,
) -> Result<Option<Move>, RequestError> {
    let mut board = board_from_cells(&request.cells)?;
    let outcome = Searcher::new(request.depth()).search(&mut board, request.color, rng);
    Ok(outcome.best_move)
}

pub fn legal_moves(cells: &[Cell], from: Coord) -> Result<Vec<Move>, RequestError> {
    if !from.is_on_board() {
        return Err(RequestError::OffBoard(from));
    }
    let board = board_from_cells(cells)?;
    Ok(moves_from(from, &board))
}
