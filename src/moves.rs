use std::collections::HashMap;

use crate::board::Board;
use crate::types::{Coord, Move, Player};

/// N, NE, E, SE, S, SW, W, NW in board coordinates (`y` grows downwards).
const DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Every legal move for the piece standing on `from`.
///
/// A piece either steps to an adjacent empty square, or jumps over an
/// adjacent piece of either colour onto the empty square behind it and may
/// keep jumping. Each jump in a chain is a complete move on its own. Only
/// one move is kept per destination: the one with the shortest path, the
/// first found in direction order when lengths tie.
pub fn moves_from(from: Coord, board: &Board) -> Vec<Move> {
    let mut candidates = Vec::new();

    for (dx, dy) in DIRECTIONS {
        let Some(to) = from.offset(dx, dy, 1) else {
            continue;
        };
        if board[to].is_empty() {
            candidates.push(Move {
                from,
                to,
                path: vec![from, to],
            });
        }
    }

    let mut path = vec![from];
    collect_jumps(from, board, &mut path, &mut candidates);

    dedup_by_endpoints(candidates)
}

/// Moves for every piece `player` owns, scanned in row-major order.
pub fn all_moves(board: &Board, player: Player) -> Vec<Move> {
    board
        .pieces(player)
        .flat_map(|from| moves_from(from, board))
        .collect()
}

// Depth is bounded by the board: a landing square never repeats within `path`.
fn collect_jumps(at: Coord, board: &Board, path: &mut Vec<Coord>, out: &mut Vec<Move>) {
    for (dx, dy) in DIRECTIONS {
        let (Some(over), Some(landing)) = (at.offset(dx, dy, 1), at.offset(dx, dy, 2)) else {
            continue;
        };
        if board[over].is_empty() || !board[landing].is_empty() || path.contains(&landing) {
            continue;
        }

        path.push(landing);
        out.push(Move {
            from: path[0],
            to: landing,
            path: path.clone(),
        });
        collect_jumps(landing, board, path, out);
        path.pop();
    }
}

fn dedup_by_endpoints(candidates: Vec<Move>) -> Vec<Move> {
    let mut slots: HashMap<(Coord, Coord), usize> = HashMap::new();
    let mut kept: Vec<Move> = Vec::new();

    for mv in candidates {
        match slots.get(&(mv.from, mv.to)) {
            Some(&slot) => {
                if mv.path.len() < kept[slot].path.len() {
                    kept[slot] = mv;
                }
            }
            None => {
                slots.insert((mv.from, mv.to), kept.len());
                kept.push(mv);
            }
        }
    }

    kept
}
