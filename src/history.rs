//! Plain-data move history.
//!
//! A history entry records everything needed to (a) exactly invert one
//! executed action and (b) report auditing counts later. There are no command
//! objects and no back-references into the engine: the engine owns the single
//! interpreter that applies and inverts these records.
//!
//! A capture that auto-chains mandatory single continuations stores one
//! [`Segment`] per jump in the same entry, so reverting the entry undoes the
//! whole derived chain. A continuation the player chose among several
//! branches is its own entry flagged `continuation`.

use crate::board::{Coord, MoveDirection, Piece, Side};
use crate::rules::Action;

/// Per-side counter pair used in history reports.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub light: u8,
    pub dark: u8,
}

impl Tally {
    pub const fn new(light: u8, dark: u8) -> Self {
        Self { light, dark }
    }
}

/// Census recorded when an action is executed, reported by `get_history`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Census {
    pub kings: Tally,
    pub men: Tally,
    pub promo_paths: Tally,
}

/// One board mutation performed during execution. Reverting a segment moves
/// the piece back, demotes it if the segment promoted it, and restores the
/// captured piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub from: Coord,
    pub to: Coord,
    pub promoted: bool,
    pub captured: Option<(Coord, Piece)>,
}

/// One executed action with its pre-state snapshot.
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    pub action: Action,
    /// The caller continued a paused multi-branch capture chain.
    pub continuation: bool,
    pub side_before: Side,
    pub seq_before: u8,
    pub winner_before: Side,
    pub chain_before: Option<Coord>,
    pub census: Census,
    pub segments: Vec<Segment>,
}

/// Flattened history row: one per recorded action, plus a synthetic trailing
/// row carrying the current totals (coordinate 0,0 and no direction).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HistoryItem {
    pub x: i8,
    pub y: i8,
    pub direction: Option<MoveDirection>,
    /// The action resumed a capture chain paused on a multi-way branch.
    pub continuation: bool,
    pub side_to_move: Side,
    pub kings: Tally,
    pub men: Tally,
    pub num_seq_moves: u8,
    pub promo_paths: Tally,
}

impl HistoryItem {
    pub fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            x: entry.action.from.x,
            y: entry.action.from.y,
            direction: Some(entry.action.dir),
            continuation: entry.continuation,
            side_to_move: entry.side_before,
            kings: entry.census.kings,
            men: entry.census.men,
            num_seq_moves: entry.seq_before,
            promo_paths: entry.census.promo_paths,
        }
    }

    /// The trailing summary row.
    pub fn summary(side_to_move: Side, census: Census, num_seq_moves: u8) -> Self {
        Self {
            x: 0,
            y: 0,
            direction: None,
            continuation: false,
            side_to_move,
            kings: census.kings,
            men: census.men,
            num_seq_moves,
            promo_paths: census.promo_paths,
        }
    }
}
