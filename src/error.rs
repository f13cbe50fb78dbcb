use thiserror::Error;

use crate::types::{Coord, Player};

/// Why a placement string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("expected 8 rows separated by '/', got {0}")]
    RowCount(usize),
    #[error("row {row} covers {width} cells, at most 8 fit")]
    RowWidth { row: usize, width: usize },
    #[error("unexpected character {ch:?} in row {row}")]
    UnexpectedChar { row: usize, ch: char },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,
    #[error("it is not {0:?}'s turn")]
    NotYourTurn(Player),
    #[error("no piece of the side to move at {0}")]
    NoPieceAt(Coord),
    #[error("{0:?} still has a legal move and cannot pass")]
    CannotPass(Player),
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Coord, to: Coord },
    #[error("unknown player {0:?}")]
    UnknownPlayer(String),
    #[error("unknown difficulty {0:?}")]
    UnknownDifficulty(String),
}

/// Failures decoding a search request at the worker boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("board must have 64 cells, got {0}")]
    CellCount(usize),
    #[error("coordinate {0} is off the board")]
    OffBoard(Coord),
    #[error(transparent)]
    Placement(#[from] PlacementError),
}
