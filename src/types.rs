use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

pub const BOARD_SIZE: u8 = 8;
pub const NUM_SQUARES: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Corner this side is racing towards.
    /// White starts bottom-left and heads for the top-right, Black the reverse.
    pub fn target_corner(self) -> Coord {
        match self {
            Self::White => Coord::new(BOARD_SIZE - 1, 0),
            Self::Black => Coord::new(0, BOARD_SIZE - 1),
        }
    }
}

impl FromStr for Player {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" => Ok(Self::White),
            "black" => Ok(Self::Black),
            other => Err(GameError::UnknownPlayer(other.to_string())),
        }
    }
}

/// Occupancy of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    #[serde(rename = "none")]
    Empty,
    White,
    Black,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Self::Empty => None,
            Self::White => Some(Player::White),
            Self::Black => Some(Player::Black),
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::White => Self::White,
            Player::Black => Self::Black,
        }
    }
}

/// Square colour. Cosmetic only, the rules never look at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Light,
    Dark,
}

/// A board coordinate, `x` is the column and `y` the row counted from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    pub fn is_on_board(self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// Returns the coordinate shifted by `(dx, dy) * steps`, or `None` off the board.
    pub fn offset(self, dx: i8, dy: i8, steps: i8) -> Option<Self> {
        let x = self.x as i16 + (dx * steps) as i16;
        let y = self.y as i16 + (dy * steps) as i16;
        let range = 0..BOARD_SIZE as i16;
        if range.contains(&x) && range.contains(&y) {
            Some(Self::new(x as u8, y as u8))
        } else {
            None
        }
    }

    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) as u32 + self.y.abs_diff(other.y) as u32
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One complete turn for a single piece.
///
/// `path` starts at `from` and ends at `to`. A path of two squares is either
/// a step or a single jump; longer paths are jump chains.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub path: Vec<Coord>,
}

impl Move {
    pub fn is_jump(&self) -> bool {
        self.path.len() > 2 || !is_adjacent(self.from, self.to)
    }

    pub fn jump_count(&self) -> usize {
        if self.is_jump() { self.path.len() - 1 } else { 0 }
    }
}

fn is_adjacent(a: Coord, b: Coord) -> bool {
    a.x.abs_diff(b.x) <= 1 && a.y.abs_diff(b.y) <= 1
}

/// AI strength selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(GameError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Difficulty to search depth mapping.
///
/// Depth counts plies searched after the AI's own candidate move, so `0`
/// scores each candidate statically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthTable {
    pub easy: u8,
    pub medium: u8,
    pub hard: u8,
}

impl DepthTable {
    pub fn depth_for(&self, difficulty: Difficulty) -> u8 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn max_depth(&self) -> u8 {
        self.easy.max(self.medium).max(self.hard)
    }
}

impl Default for DepthTable {
    fn default() -> Self {
        Self {
            easy: 0,
            medium: 1,
            hard: 2,
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub board: Vec<Cell>,
    pub current_player: Player,
    pub white_score: i32,
    pub black_score: i32,
    pub is_game_over: bool,
    pub winner: Option<Player>,
    /// Squares visited by the previous move, for highlighting.
    /// Empty before the first move and after the AI found no response.
    pub last_path: Vec<Coord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_stays_on_board() {
        let corner = Coord::new(0, 0);

        assert_eq!(corner.offset(1, 1, 2), Some(Coord::new(2, 2)));
        assert_eq!(corner.offset(-1, 0, 1), None);
        assert_eq!(Coord::new(7, 7).offset(0, 1, 1), None);
    }

    #[test]
    fn jump_detection_uses_path_geometry() {
        let step = Move {
            from: Coord::new(3, 3),
            to: Coord::new(4, 4),
            path: vec![Coord::new(3, 3), Coord::new(4, 4)],
        };
        let jump = Move {
            from: Coord::new(3, 3),
            to: Coord::new(3, 5),
            path: vec![Coord::new(3, 3), Coord::new(3, 5)],
        };

        assert!(!step.is_jump());
        assert_eq!(step.jump_count(), 0);
        assert!(jump.is_jump());
        assert_eq!(jump.jump_count(), 1);
    }

    #[test]
    fn difficulty_parses_lowercase_names() {
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("insane".parse::<Difficulty>().is_err());
        assert_eq!("black".parse::<Player>().unwrap(), Player::Black);
    }

    #[test]
    fn default_depth_table_is_zero_one_two() {
        let table = DepthTable::default();

        assert_eq!(table.depth_for(Difficulty::Easy), 0);
        assert_eq!(table.depth_for(Difficulty::Medium), 1);
        assert_eq!(table.depth_for(Difficulty::Hard), 2);
    }
}
