//! Promotion-safety lookahead.
//!
//! Two related searches live here:
//!
//! - [`find_promo_path`] answers "can this man walk to its back rank without
//!   ever being immediately capturable along the way?" by recursive
//!   hypothetical play. Each ply applies the step to a *cloned* board, so the
//!   caller's board is untouched by construction, including on failing
//!   branches.
//! - [`auto_moves`] is the filter the turn machine applies when a side is
//!   down to a single piece with no capture: only moves that do not hand the
//!   opponent an immediate capture (and with it the game) are offered.

use crate::board::{Board, Coord, Level, MoveDirection, Piece, Side, back_rank};
use crate::rules;

/// Whether `dir` starts a path on which the man at `from` eventually reaches
/// the back rank without the opponent gaining a capture at any stop.
///
/// Success is declared as soon as the next square is a back rank. Otherwise
/// the step is played on a cloned board; if the opponent then has any capture
/// the branch is unsafe, else the search recurses over the destination's
/// moves.
pub fn find_promo_path(board: &Board, side: Side, from: Coord, dir: MoveDirection) -> bool {
    if !rules::can_move(board, side, from, dir) {
        return false;
    }
    let next = from.step(dir);
    if next.x == back_rank(Side::Light) || next.x == back_rank(Side::Dark) {
        return true;
    }

    let mut scratch = *board;
    scratch.relocate(from, next);

    if rules::can_take_any(&scratch, side.reverse()) {
        return false;
    }
    rules::moves_from(&scratch, side, next)
        .iter()
        .any(|m| find_promo_path(&scratch, side, next, m.dir))
}

/// Count of (man, direction) pairs of `side` that open a safe promotion
/// path. Reported in history records.
pub fn promo_paths(board: &Board, side: Side) -> u8 {
    let mut count = 0;
    for (at, piece) in board.pieces() {
        if piece.side != side || piece.level != Level::Man {
            continue;
        }
        for dir in MoveDirection::ALL {
            if find_promo_path(board, side, at, dir) {
                count += 1;
            }
        }
    }
    count
}

/// The moves of the lone piece at `from` that survive a one-ply safety
/// check: the move (promotion included) is applied to a cloned board, and
/// any move after which the opponent can capture is dropped. With a single
/// remaining piece, an opponent capture is precisely an immediate loss.
pub fn auto_moves(board: &Board, side: Side, from: Coord) -> Vec<rules::Action> {
    let mut safe = Vec::new();
    for action in rules::moves_from(board, side, from) {
        let mut scratch = *board;
        apply_hypothetical_move(&mut scratch, from, action.dir);
        if !rules::can_take_any(&scratch, side.reverse()) {
            safe.push(action);
        }
    }
    safe
}

/// Play one move on `board`, promoting a man that lands on its back rank.
fn apply_hypothetical_move(board: &mut Board, from: Coord, dir: MoveDirection) {
    let to = from.step(dir);
    board.relocate(from, to);
    if let Some(piece) = board.get(to) {
        if piece.level == Level::Man && to.x == back_rank(piece.side) {
            board.set(to, Some(Piece::king(piece.side)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(pieces: &[(i8, i8, Piece)]) -> Board {
        let mut board = Board::empty();
        for &(x, y, piece) in pieces {
            board.set(Coord::new(x, y), Some(piece));
        }
        board
    }

    #[test]
    fn test_clear_path_to_back_rank() {
        // Lone Light man two rows from promotion, nothing in the way.
        let board = board_with(&[
            (3, 3, Piece::man(Side::Light)),
            (8, 6, Piece::man(Side::Dark)),
        ]);
        let at = Coord::new(3, 3);
        assert!(find_promo_path(&board, Side::Light, at, MoveDirection::TopLeft));
        assert!(find_promo_path(&board, Side::Light, at, MoveDirection::TopRight));
        assert_eq!(promo_paths(&board, Side::Light), 2);
    }

    #[test]
    fn test_guarded_stop_is_unsafe() {
        // Stepping to (2,4) exposes the man to the king on (1,5), which can
        // jump into the square the man just vacated.
        let board = board_with(&[
            (3, 3, Piece::man(Side::Light)),
            (1, 5, Piece::king(Side::Dark)),
        ]);
        let at = Coord::new(3, 3);
        assert!(!find_promo_path(&board, Side::Light, at, MoveDirection::TopRight));
        assert!(find_promo_path(&board, Side::Light, at, MoveDirection::TopLeft));
    }

    #[test]
    fn test_search_leaves_board_unchanged() {
        let board = board_with(&[
            (3, 3, Piece::man(Side::Light)),
            (1, 5, Piece::king(Side::Dark)),
        ]);
        let snapshot = board;
        let _ = find_promo_path(&board, Side::Light, Coord::new(3, 3), MoveDirection::TopRight);
        let _ = promo_paths(&board, Side::Light);
        let _ = auto_moves(&board, Side::Light, Coord::new(3, 3));
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_initial_position_has_no_promo_paths() {
        // Every forward path from the starting rows dead-ends on the
        // opponent's men before reaching the back rank.
        let board = Board::initial();
        assert_eq!(promo_paths(&board, Side::Light), 0);
        assert_eq!(promo_paths(&board, Side::Dark), 0);
    }

    #[test]
    fn test_auto_moves_exclude_recapture_exposed_direction() {
        let board = board_with(&[
            (3, 3, Piece::man(Side::Light)),
            (1, 5, Piece::king(Side::Dark)),
        ]);
        let safe = auto_moves(&board, Side::Light, Coord::new(3, 3));
        assert_eq!(safe.len(), 1);
        assert_eq!(safe[0].dir, MoveDirection::TopLeft);
    }

    #[test]
    fn test_auto_moves_promotion_is_safe() {
        // A man promoting on the back rank cannot be jumped: the landing
        // square behind it is off board.
        let board = board_with(&[
            (2, 2, Piece::man(Side::Light)),
            (2, 4, Piece::king(Side::Dark)),
        ]);
        let safe = auto_moves(&board, Side::Light, Coord::new(2, 2));
        let dirs: Vec<_> = safe.iter().map(|a| a.dir).collect();
        assert!(dirs.contains(&MoveDirection::TopLeft));
        assert!(dirs.contains(&MoveDirection::TopRight));
    }

    #[test]
    fn test_auto_moves_empty_when_every_move_is_unsafe() {
        let board = board_with(&[
            (3, 3, Piece::man(Side::Light)),
            (1, 1, Piece::king(Side::Dark)),
            (1, 5, Piece::king(Side::Dark)),
        ]);
        assert!(auto_moves(&board, Side::Light, Coord::new(3, 3)).is_empty());
    }
}
