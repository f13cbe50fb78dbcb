use std::fmt;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::str::FromStr;

use crate::error::PlacementError;
use crate::types::{BOARD_SIZE, Cell, Coord, Move, NUM_SQUARES, Player, Tile};

/// Ten pieces each, packed into opposite corners.
pub const STARTING_PLACEMENT: &str = "4pppp/5ppp/6pp/7p/P/PP/PPP/PPPP";

/// 8x8 occupancy grid stored flat as `x + y * 8`.
///
/// The board performs no rule checks; legality is the move generator's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; NUM_SQUARES],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; NUM_SQUARES],
        }
    }

    pub fn starting_position() -> Self {
        // The constant is known to parse.
        match STARTING_PLACEMENT.parse() {
            Ok(board) => board,
            Err(err) => unreachable!("starting placement is malformed: {err}"),
        }
    }

    pub fn from_cells(cells: [Cell; NUM_SQUARES]) -> Self {
        Self { cells }
    }

    pub fn get(&self, x: u8, y: u8) -> Cell {
        self.cells[index(x, y)]
    }

    pub fn set(&mut self, x: u8, y: u8, cell: Cell) {
        self.cells[index(x, y)] = cell;
    }

    pub fn tile(x: u8, y: u8) -> Tile {
        assert_on_board(x, y);
        if (x + y) % 2 == 0 { Tile::Light } else { Tile::Dark }
    }

    /// All 64 coordinates in row-major order.
    pub fn coordinates() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Coord::new(x, y)))
    }

    /// Squares occupied by `player`, row-major.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = Coord> + '_ {
        let cell = Cell::from(player);
        Self::coordinates().filter(move |&coord| self[coord] == cell)
    }

    pub fn count(&self, player: Player) -> usize {
        self.pieces(player).count()
    }

    pub fn cells(&self) -> &[Cell; NUM_SQUARES] {
        &self.cells
    }

    /// Moves the piece at `mv.from` to `mv.to`. The move is trusted.
    pub fn apply_move(&mut self, mv: &Move) {
        let piece = self[mv.from];
        self[mv.from] = Cell::Empty;
        self[mv.to] = piece;
    }

    /// Reverts `mv`, which must be the last move applied to this board.
    pub fn undo_move(&mut self, mv: &Move) {
        let piece = self[mv.to];
        self[mv.to] = Cell::Empty;
        self[mv.from] = piece;
    }

    /// Applies `mv` until the returned guard is dropped.
    pub fn scoped<'a>(&'a mut self, mv: &'a Move) -> AppliedMove<'a> {
        self.apply_move(mv);
        AppliedMove { board: self, mv }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Coord> for Board {
    type Output = Cell;

    fn index(&self, coord: Coord) -> &Cell {
        &self.cells[index(coord.x, coord.y)]
    }
}

impl IndexMut<Coord> for Board {
    fn index_mut(&mut self, coord: Coord) -> &mut Cell {
        &mut self.cells[index(coord.x, coord.y)]
    }
}

impl FromStr for Board {
    type Err = PlacementError;

    /// Parses a placement string: rows top to bottom separated by `/`,
    /// digits skip empty cells, `P` is White and `p` is Black.
    /// Short rows are padded with empty cells.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.split('/').collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(PlacementError::RowCount(rows.len()));
        }

        let mut board = Self::new();
        for (y, row) in rows.iter().enumerate() {
            let mut x = 0usize;
            for ch in row.chars() {
                let (cell, width) = match ch {
                    'P' => (Cell::White, 1),
                    'p' => (Cell::Black, 1),
                    '1'..='8' => (Cell::Empty, ch as usize - '0' as usize),
                    _ => return Err(PlacementError::UnexpectedChar { row: y, ch }),
                };
                if x + width > BOARD_SIZE as usize {
                    return Err(PlacementError::RowWidth {
                        row: y,
                        width: x + width,
                    });
                }
                if cell != Cell::Empty {
                    board.set(x as u8, y as u8, cell);
                }
                x += width;
            }
        }

        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..BOARD_SIZE {
            if y > 0 {
                f.write_str("/")?;
            }

            let mut gap = 0;
            let mut wrote_piece = false;
            for x in 0..BOARD_SIZE {
                let ch = match self.get(x, y) {
                    Cell::Empty => {
                        gap += 1;
                        continue;
                    }
                    Cell::White => 'P',
                    Cell::Black => 'p',
                };
                if gap > 0 {
                    write!(f, "{gap}")?;
                    gap = 0;
                }
                write!(f, "{ch}")?;
                wrote_piece = true;
            }
            if !wrote_piece {
                write!(f, "{BOARD_SIZE}")?;
            }
        }
        Ok(())
    }
}

/// A move applied to a board, undone on drop.
///
/// Pruning returns early from the search loop; the guard keeps every exit
/// path paired with its undo.
pub struct AppliedMove<'a> {
    board: &'a mut Board,
    mv: &'a Move,
}

impl Deref for AppliedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for AppliedMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for AppliedMove<'_> {
    fn drop(&mut self) {
        self.board.undo_move(self.mv);
    }
}

fn assert_on_board(x: u8, y: u8) {
    assert!(
        x < BOARD_SIZE && y < BOARD_SIZE,
        "coordinate ({x}, {y}) is off the board"
    );
}

fn index(x: u8, y: u8) -> usize {
    assert_on_board(x, y);
    x as usize + y as usize * BOARD_SIZE as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(from: (u8, u8), to: (u8, u8)) -> Move {
        let from = Coord::new(from.0, from.1);
        let to = Coord::new(to.0, to.1);
        Move {
            from,
            to,
            path: vec![from, to],
        }
    }

    #[test]
    fn starting_position_places_ten_pieces_each() {
        let board = Board::starting_position();

        assert_eq!(board.count(Player::White), 10);
        assert_eq!(board.count(Player::Black), 10);
        assert_eq!(board.get(0, 4), Cell::White);
        assert_eq!(board.get(7, 3), Cell::Black);
        assert_eq!(board.get(4, 0), Cell::Black);
        assert_eq!(board.get(3, 7), Cell::White);
        assert_eq!(board.get(1, 4), Cell::Empty);
    }

    #[test]
    fn cells_are_stored_at_x_plus_y_times_eight() {
        let mut board = Board::new();
        board.set(3, 5, Cell::Black);

        assert_eq!(board.cells()[3 + 5 * 8], Cell::Black);
        assert_eq!(board[Coord::new(3, 5)], Cell::Black);
    }

    #[test]
    fn display_round_trips_placement() {
        let board = Board::starting_position();

        assert_eq!(board.to_string(), STARTING_PLACEMENT);
        assert_eq!(Board::new().to_string(), "8/8/8/8/8/8/8/8");
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
    }

    #[test]
    fn malformed_placements_are_rejected() {
        assert_eq!(
            "8/8/8".parse::<Board>(),
            Err(PlacementError::RowCount(3))
        );
        assert_eq!(
            "8/8/8/8/8/8/8/7pp".parse::<Board>(),
            Err(PlacementError::RowWidth { row: 7, width: 9 })
        );
        assert_eq!(
            "8/8/8/8/x/8/8/8".parse::<Board>(),
            Err(PlacementError::UnexpectedChar { row: 4, ch: 'x' })
        );
        assert!("0/8/8/8/8/8/8/8".parse::<Board>().is_err());
    }

    #[test]
    fn coordinates_are_row_major() {
        let coords: Vec<Coord> = Board::coordinates().collect();

        assert_eq!(coords.len(), 64);
        assert_eq!(coords[0], Coord::new(0, 0));
        assert_eq!(coords[1], Coord::new(1, 0));
        assert_eq!(coords[8], Coord::new(0, 1));
        assert_eq!(coords[63], Coord::new(7, 7));
    }

    #[test]
    fn tile_parity_alternates() {
        assert_eq!(Board::tile(0, 0), Tile::Light);
        assert_eq!(Board::tile(1, 0), Tile::Dark);
        assert_eq!(Board::tile(1, 1), Tile::Light);
    }

    #[test]
    fn apply_then_undo_restores_board() {
        let mut board = Board::starting_position();
        let before = board;
        let mv = step((0, 4), (1, 3));

        board.apply_move(&mv);
        assert_eq!(board.get(0, 4), Cell::Empty);
        assert_eq!(board.get(1, 3), Cell::White);

        board.undo_move(&mv);
        assert_eq!(board, before);
    }

    #[test]
    fn scoped_move_is_undone_on_drop() {
        let mut board = Board::starting_position();
        let before = board;
        let mv = step((0, 4), (0, 3));

        {
            let applied = board.scoped(&mv);
            assert_eq!(applied.get(0, 3), Cell::White);
        }

        assert_eq!(board, before);
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn out_of_bounds_access_panics() {
        Board::new().get(8, 0);
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn off_board_tile_panics() {
        Board::tile(8, 0);
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn tile_with_overflowing_sum_panics() {
        Board::tile(200, 100);
    }
}
