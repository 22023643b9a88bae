//! Machine players.
//!
//! An [`Agent`] is asked for one action at a time while it owns the turn;
//! the engine validates and executes the proposal through the same path as
//! caller input, then asks again if the turn is still the agent's (capture
//! chains paused on a branch come back to the same agent).

use crate::board::Side;
use crate::engine::Engine;
use crate::rules::{self, Action};
use crate::search;

/// A machine player bound to one side.
pub trait Agent {
    fn side(&self) -> Side;

    /// Pick an action for the current position, or `None` to pass the turn
    /// back to the caller. Called only while the game is in progress.
    fn propose(&mut self, engine: &Engine) -> Option<Action>;
}

/// Uniform-random agent. Captures are preferred (they are mandatory anyway);
/// when down to the last piece it avoids moves that would let the opponent
/// capture it, as long as any safe move exists.
pub struct Computer {
    side: Side,
}

impl Computer {
    pub fn new(side: Side) -> Self {
        Self { side }
    }
}

impl Agent for Computer {
    fn side(&self) -> Side {
        self.side
    }

    fn propose(&mut self, engine: &Engine) -> Option<Action> {
        if engine.side_to_move() != self.side {
            return None;
        }
        let board = engine.board();

        let takes = rules::takes_of(board, self.side);
        if !takes.is_empty() {
            return Some(takes[fastrand::usize(..takes.len())]);
        }

        let pieces = rules::pieces_of(board, self.side);
        let moves = if pieces.len() == 1 {
            let safe = search::auto_moves(board, self.side, pieces[0]);
            if safe.is_empty() {
                rules::moves_of(board, self.side)
            } else {
                safe
            }
        } else {
            rules::moves_of(board, self.side)
        };
        if moves.is_empty() {
            return None;
        }
        Some(moves[fastrand::usize(..moves.len())])
    }
}
