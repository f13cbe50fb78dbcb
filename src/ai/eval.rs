use crate::board::Board;
use crate::types::{Move, Player};

const BASELINE: i32 = 1000;

/// Score of ten pieces packed into the target corner triangle.
pub const WIN_SCORE: i32 = 980;

/// Progress of `player`: higher when its pieces sit closer to its target corner.
pub fn score(board: &Board, player: Player) -> i32 {
    let corner = player.target_corner();
    let distance: u32 = board.pieces(player).map(|at| at.manhattan(corner)).sum();
    BASELINE - distance as i32
}

pub fn has_finished(board: &Board, player: Player) -> bool {
    score(board, player) == WIN_SCORE
}

/// Zero-sum evaluation from the perspective of `to_move`.
pub fn evaluate(board: &Board, to_move: Player) -> i32 {
    let relative = score(board, Player::White) - score(board, Player::Black);
    match to_move {
        Player::White => relative,
        Player::Black => -relative,
    }
}

/// Ordering hint: how much closer `mv` brings its piece to the target corner.
pub fn move_score(mv: &Move, player: Player) -> i32 {
    let corner = player.target_corner();
    mv.from.manhattan(corner) as i32 - mv.to.manhattan(corner) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;

    fn step(from: Coord, to: Coord) -> Move {
        Move {
            from,
            to,
            path: vec![from, to],
        }
    }

    #[test]
    fn starting_position_is_balanced() {
        let board = Board::starting_position();

        assert_eq!(score(&board, Player::White), score(&board, Player::Black));
        assert_eq!(evaluate(&board, Player::White), 0);
    }

    #[test]
    fn evaluation_is_antisymmetric() {
        let boards = [
            Board::starting_position(),
            "4pppp/5ppp/6pp/P6p/8/PP/PPP/PPPP".parse().unwrap(),
            "p7/8/8/3P4/8/8/8/7P".parse().unwrap(),
        ];

        for board in &boards {
            assert_eq!(evaluate(board, Player::White), -evaluate(board, Player::Black));
        }
    }

    #[test]
    fn packed_target_corner_hits_win_score() {
        let white_home: Board = "4PPPP/5PPP/6PP/7P/8/8/8/8".parse().unwrap();
        let black_home: Board = "8/8/8/8/p/pp/ppp/pppp".parse().unwrap();

        assert_eq!(score(&white_home, Player::White), WIN_SCORE);
        assert!(has_finished(&white_home, Player::White));
        assert!(has_finished(&black_home, Player::Black));
        assert!(!has_finished(&Board::starting_position(), Player::White));
    }

    #[test]
    fn advancing_piece_raises_score() {
        let mut board = Board::starting_position();
        let before = score(&board, Player::White);
        let mv = step(Coord::new(0, 4), Coord::new(1, 3));

        board.apply_move(&mv);

        assert_eq!(score(&board, Player::White), before + 2);
        assert_eq!(move_score(&mv, Player::White), 2);
        assert_eq!(move_score(&mv, Player::Black), -2);
    }
}
