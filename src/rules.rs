//! Move and capture legality, plus action enumeration.
//!
//! Everything here is a pure query over `(&Board, side_to_move)`:
//! - `can_move` / `can_take` decide legality per square and direction
//! - `moves_from` / `takes_from` enumerate a square's actions in direction
//!   order TL, TR, BL, BR
//! - `moves_of` / `takes_of` enumerate a whole side row-major, which fixes a
//!   deterministic tie-break wherever "the" action is chosen among ties
//!
//! Off-board coordinates are simply illegal; they never surface as errors.

use crate::board::{Board, Coord, Level, MoveDirection, Piece, Side};

/// A ready-to-execute action record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Move,
    Take,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub from: Coord,
    pub dir: MoveDirection,
}

impl Action {
    pub const fn new_move(from: Coord, dir: MoveDirection) -> Self {
        Self {
            kind: ActionKind::Move,
            from,
            dir,
        }
    }

    pub const fn new_take(from: Coord, dir: MoveDirection) -> Self {
        Self {
            kind: ActionKind::Take,
            from,
            dir,
        }
    }
}

/// Shared preconditions of moving and capturing: a piece of `side` stands on
/// `at`, and a man does not head behind its forward arc.
fn may_head(board: &Board, side: Side, at: Coord, dir: MoveDirection) -> Option<Piece> {
    let piece = board.get(at)?;
    if piece.side != side {
        return None;
    }
    if piece.level == Level::Man && !dir.forward_for(piece.side) {
        return None;
    }
    Some(piece)
}

/// Legal iff a piece of `side` occupies `at`, the direction is within the
/// piece's arc, and the one-step destination is on board and empty.
pub fn can_move(board: &Board, side: Side, at: Coord, dir: MoveDirection) -> bool {
    if may_head(board, side, at, dir).is_none() {
        return false;
    }
    let dest = at.step(dir);
    dest.on_board() && board.get(dest).is_none()
}

pub fn can_move_from(board: &Board, side: Side, at: Coord) -> bool {
    MoveDirection::ALL
        .iter()
        .any(|&dir| can_move(board, side, at, dir))
}

pub fn can_move_any(board: &Board, side: Side) -> bool {
    board
        .pieces()
        .any(|(at, p)| p.side == side && can_move_from(board, side, at))
}

/// Legal iff the adjacent cell in `dir` holds an opposing piece and the cell
/// two steps away (the landing square) is on board and empty.
pub fn can_take(board: &Board, side: Side, at: Coord, dir: MoveDirection) -> bool {
    let Some(piece) = may_head(board, side, at, dir) else {
        return false;
    };
    let mid = at.step(dir);
    match board.get(mid) {
        Some(victim) if victim.side != piece.side => {}
        _ => return false,
    }
    let landing = at.jump(dir);
    landing.on_board() && board.get(landing).is_none()
}

pub fn can_take_from(board: &Board, side: Side, at: Coord) -> bool {
    MoveDirection::ALL
        .iter()
        .any(|&dir| can_take(board, side, at, dir))
}

pub fn can_take_any(board: &Board, side: Side) -> bool {
    board
        .pieces()
        .any(|(at, p)| p.side == side && can_take_from(board, side, at))
}

/// All legal moves from one square, in direction order.
pub fn moves_from(board: &Board, side: Side, at: Coord) -> Vec<Action> {
    MoveDirection::ALL
        .iter()
        .filter(|&&dir| can_move(board, side, at, dir))
        .map(|&dir| Action::new_move(at, dir))
        .collect()
}

/// All legal moves of a side, row-major then direction order.
pub fn moves_of(board: &Board, side: Side) -> Vec<Action> {
    let mut moves = Vec::new();
    for (at, piece) in board.pieces() {
        if piece.side == side {
            moves.extend(moves_from(board, side, at));
        }
    }
    moves
}

/// All legal captures from one square, in direction order.
pub fn takes_from(board: &Board, side: Side, at: Coord) -> Vec<Action> {
    MoveDirection::ALL
        .iter()
        .filter(|&&dir| can_take(board, side, at, dir))
        .map(|&dir| Action::new_take(at, dir))
        .collect()
}

/// All legal captures of a side, row-major then direction order.
pub fn takes_of(board: &Board, side: Side) -> Vec<Action> {
    let mut takes = Vec::new();
    for (at, piece) in board.pieces() {
        if piece.side == side {
            takes.extend(takes_from(board, side, at));
        }
    }
    takes
}

/// Number of legal single jumps available to a side, without materializing
/// action records. Used to detect multi-way capture branching.
pub fn takes_count(board: &Board, side: Side) -> usize {
    board
        .pieces()
        .filter(|(_, p)| p.side == side)
        .map(|(at, _)| {
            MoveDirection::ALL
                .iter()
                .filter(|&&dir| can_take(board, side, at, dir))
                .count()
        })
        .sum()
}

/// Squares occupied by `side`, row-major; men before kings is not needed,
/// callers only care about the count and an arbitrary-but-stable order.
pub fn pieces_of(board: &Board, side: Side) -> Vec<Coord> {
    board
        .pieces()
        .filter(|(_, p)| p.side == side)
        .map(|(at, _)| at)
        .collect()
}

pub fn count_of(board: &Board, side: Side, level: Level) -> usize {
    board
        .pieces()
        .filter(|(_, p)| p.side == side && p.level == level)
        .count()
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
    fn test_man_moves_forward_only() {
        let board = board_with(&[(5, 3, Piece::man(Side::Light))]);
        let at = Coord::new(5, 3);
        assert!(can_move(&board, Side::Light, at, MoveDirection::TopLeft));
        assert!(can_move(&board, Side::Light, at, MoveDirection::TopRight));
        assert!(!can_move(&board, Side::Light, at, MoveDirection::BottomLeft));
        assert!(!can_move(&board, Side::Light, at, MoveDirection::BottomRight));
    }

    #[test]
    fn test_king_moves_all_directions() {
        let board = board_with(&[(5, 3, Piece::king(Side::Dark))]);
        let at = Coord::new(5, 3);
        for dir in MoveDirection::ALL {
            assert!(can_move(&board, Side::Dark, at, dir), "{dir} blocked");
        }
    }

    #[test]
    fn test_wrong_side_cannot_move() {
        let board = board_with(&[(5, 3, Piece::man(Side::Light))]);
        assert!(!can_move(
            &board,
            Side::Dark,
            Coord::new(5, 3),
            MoveDirection::TopLeft
        ));
    }

    #[test]
    fn test_move_blocked_by_occupied_destination() {
        let board = board_with(&[
            (5, 3, Piece::man(Side::Light)),
            (4, 2, Piece::man(Side::Light)),
        ]);
        let at = Coord::new(5, 3);
        assert!(!can_move(&board, Side::Light, at, MoveDirection::TopLeft));
        assert!(can_move(&board, Side::Light, at, MoveDirection::TopRight));
    }

    #[test]
    fn test_move_off_board_is_illegal() {
        let board = board_with(&[(1, 3, Piece::king(Side::Light))]);
        let at = Coord::new(1, 3);
        assert!(!can_move(&board, Side::Light, at, MoveDirection::TopLeft));
        assert!(!can_move(&board, Side::Light, at, MoveDirection::TopRight));
        // Queries on squares that are themselves off board are just illegal.
        assert!(!can_move(
            &board,
            Side::Light,
            Coord::new(0, 0),
            MoveDirection::TopLeft
        ));
    }

    #[test]
    fn test_take_requires_enemy_and_empty_landing() {
        let board = board_with(&[
            (6, 2, Piece::man(Side::Light)),
            (5, 3, Piece::man(Side::Dark)),
        ]);
        let at = Coord::new(6, 2);
        assert!(can_take(&board, Side::Light, at, MoveDirection::TopRight));
        // No victim on the other diagonal.
        assert!(!can_take(&board, Side::Light, at, MoveDirection::TopLeft));
    }

    #[test]
    fn test_take_blocked_landing() {
        let board = board_with(&[
            (6, 2, Piece::man(Side::Light)),
            (5, 3, Piece::man(Side::Dark)),
            (4, 4, Piece::man(Side::Dark)),
        ]);
        assert!(!can_take(
            &board,
            Side::Light,
            Coord::new(6, 2),
            MoveDirection::TopRight
        ));
    }

    #[test]
    fn test_take_own_piece_is_illegal() {
        let board = board_with(&[
            (6, 2, Piece::man(Side::Light)),
            (5, 3, Piece::man(Side::Light)),
        ]);
        assert!(!can_take(
            &board,
            Side::Light,
            Coord::new(6, 2),
            MoveDirection::TopRight
        ));
    }

    #[test]
    fn test_man_cannot_take_backward() {
        let board = board_with(&[
            (4, 4, Piece::man(Side::Light)),
            (5, 3, Piece::man(Side::Dark)),
        ]);
        assert!(!can_take(
            &board,
            Side::Light,
            Coord::new(4, 4),
            MoveDirection::BottomLeft
        ));
        // A king may.
        let board = board_with(&[
            (4, 4, Piece::king(Side::Light)),
            (5, 3, Piece::man(Side::Dark)),
        ]);
        assert!(can_take(
            &board,
            Side::Light,
            Coord::new(4, 4),
            MoveDirection::BottomLeft
        ));
    }

    #[test]
    fn test_enumeration_direction_order() {
        let board = board_with(&[(5, 3, Piece::king(Side::Light))]);
        let moves = moves_from(&board, Side::Light, Coord::new(5, 3));
        let dirs: Vec<_> = moves.iter().map(|m| m.dir).collect();
        assert_eq!(dirs, MoveDirection::ALL.to_vec());
    }

    #[test]
    fn test_whole_board_enumeration_row_major() {
        let board = board_with(&[
            (6, 6, Piece::king(Side::Light)),
            (3, 3, Piece::king(Side::Light)),
        ]);
        let moves = moves_of(&board, Side::Light);
        assert_eq!(moves.len(), 8);
        // Row 3 piece enumerated before row 6 piece.
        assert_eq!(moves[0].from, Coord::new(3, 3));
        assert_eq!(moves[4].from, Coord::new(6, 6));
    }

    #[test]
    fn test_takes_count() {
        let board = board_with(&[
            (6, 4, Piece::king(Side::Light)),
            (5, 3, Piece::man(Side::Dark)),
            (5, 5, Piece::man(Side::Dark)),
        ]);
        // Both Dark men can also jump the king going the other way.
        assert_eq!(takes_count(&board, Side::Light), 2);
        assert_eq!(takes_count(&board, Side::Dark), 2);
    }

    #[test]
    fn test_census() {
        let board = board_with(&[
            (6, 4, Piece::king(Side::Light)),
            (5, 3, Piece::man(Side::Dark)),
            (2, 2, Piece::man(Side::Light)),
        ]);
        assert_eq!(count_of(&board, Side::Light, Level::King), 1);
        assert_eq!(count_of(&board, Side::Light, Level::Man), 1);
        assert_eq!(count_of(&board, Side::Dark, Level::Man), 1);
        assert_eq!(pieces_of(&board, Side::Light).len(), 2);
    }
}
