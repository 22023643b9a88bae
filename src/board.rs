//! Sides, pieces, diagonal directions, 1-indexed coordinates, and the grid.

use std::fmt;

use crate::config::{BOARD_SIZE, SIZE};

/// One of the two players, plus the sentinel states the turn machine uses:
/// `Unset` when no game is running and `Neutral` for a drawn outcome.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Unset,
    Light,
    Dark,
    Neutral,
}

impl Side {
    /// The opposing player. Identity for `Unset` and `Neutral`.
    pub const fn reverse(self) -> Side {
        match self {
            Side::Light => Side::Dark,
            Side::Dark => Side::Light,
            other => other,
        }
    }

    /// Whether this is an actual player (Light or Dark).
    pub const fn is_player(self) -> bool {
        matches!(self, Side::Light | Side::Dark)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Side::Unset => "Unset",
            Side::Light => "Light",
            Side::Dark => "Dark",
            Side::Neutral => "Neutral",
        };
        write!(f, "{s}")
    }
}

/// Piece rank. Men move one diagonal step forward only; kings move in all
/// four diagonal directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Level {
    Man,
    King,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub side: Side,
    pub level: Level,
}

impl Piece {
    pub const fn new(side: Side, level: Level) -> Self {
        Self { side, level }
    }

    pub const fn man(side: Side) -> Self {
        Self::new(side, Level::Man)
    }

    pub const fn king(side: Side) -> Self {
        Self::new(side, Level::King)
    }
}

/// The four diagonal directions. `Top` decreases the row, `Left` decreases
/// the column. Enumeration order is always TL, TR, BL, BR.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl MoveDirection {
    pub const ALL: [MoveDirection; 4] = [
        MoveDirection::TopLeft,
        MoveDirection::TopRight,
        MoveDirection::BottomLeft,
        MoveDirection::BottomRight,
    ];

    pub const fn dx(self) -> i8 {
        match self {
            MoveDirection::TopLeft | MoveDirection::TopRight => -1,
            MoveDirection::BottomLeft | MoveDirection::BottomRight => 1,
        }
    }

    pub const fn dy(self) -> i8 {
        match self {
            MoveDirection::TopLeft | MoveDirection::BottomLeft => -1,
            MoveDirection::TopRight | MoveDirection::BottomRight => 1,
        }
    }

    /// Whether a man of `side` may head this way (kings are unrestricted).
    pub const fn forward_for(self, side: Side) -> bool {
        match side {
            Side::Light => self.dx() < 0,
            Side::Dark => self.dx() > 0,
            _ => false,
        }
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MoveDirection::TopLeft => "TopLeft",
            MoveDirection::TopRight => "TopRight",
            MoveDirection::BottomLeft => "BottomLeft",
            MoveDirection::BottomRight => "BottomRight",
        };
        write!(f, "{s}")
    }
}

/// A 1-indexed board coordinate: `x` is the row (1 = top), `y` the column.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub const fn on_board(self) -> bool {
        self.x >= 1 && self.x <= BOARD_SIZE && self.y >= 1 && self.y <= BOARD_SIZE
    }

    /// One diagonal step in `dir`. May leave the board.
    pub const fn step(self, dir: MoveDirection) -> Coord {
        Coord::new(self.x + dir.dx(), self.y + dir.dy())
    }

    /// Two diagonal steps in `dir` (the landing square of a jump).
    pub const fn jump(self, dir: MoveDirection) -> Coord {
        Coord::new(self.x + 2 * dir.dx(), self.y + 2 * dir.dy())
    }

    /// Pieces occupy only one color of square; diagonal steps stay on it.
    pub const fn playable(self) -> bool {
        (self.x + self.y) % 2 == 0
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x={},y={})", self.x, self.y)
    }
}

/// The back rank where a man of `side` promotes.
pub const fn back_rank(side: Side) -> i8 {
    match side {
        Side::Light => 1,
        _ => BOARD_SIZE,
    }
}

/// Raw board snapshot: the observer payload and the `Options` starting
/// position format.
pub type Cells = [[Option<Piece>; SIZE]; SIZE];

/// NxN grid of optional pieces. Owns no game logic beyond placement.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Board {
    cells: Cells,
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[None; SIZE]; SIZE],
        }
    }

    /// The standard starting position: Dark men fill the playable squares of
    /// the first `MEN_ROWS` rows, Light men the last `MEN_ROWS` rows.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for x in 1..=BOARD_SIZE {
            for y in 1..=BOARD_SIZE {
                let at = Coord::new(x, y);
                if !at.playable() {
                    continue;
                }
                if x <= crate::config::MEN_ROWS {
                    board.set(at, Some(Piece::man(Side::Dark)));
                } else if x > BOARD_SIZE - crate::config::MEN_ROWS {
                    board.set(at, Some(Piece::man(Side::Light)));
                }
            }
        }
        board
    }

    pub fn from_cells(cells: &Cells) -> Self {
        Self { cells: *cells }
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    pub fn get(&self, at: Coord) -> Option<Piece> {
        if !at.on_board() {
            return None;
        }
        self.cells[(at.x - 1) as usize][(at.y - 1) as usize]
    }

    /// Off-board coordinates are ignored, mirroring `get`.
    pub fn set(&mut self, at: Coord, piece: Option<Piece>) {
        if !at.on_board() {
            return;
        }
        self.cells[(at.x - 1) as usize][(at.y - 1) as usize] = piece;
    }

    /// Move the occupant of `from` to `to`. `to` must be empty.
    pub fn relocate(&mut self, from: Coord, to: Coord) {
        let piece = self.get(from);
        self.set(from, None);
        self.set(to, piece);
    }

    /// Remove and return the occupant of `at`.
    pub fn take_out(&mut self, at: Coord) -> Option<Piece> {
        let piece = self.get(at);
        self.set(at, None);
        piece
    }

    /// Iterate all occupied squares row-major (the deterministic scan order
    /// used by whole-board enumeration).
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        (1..=BOARD_SIZE).flat_map(move |x| {
            (1..=BOARD_SIZE).filter_map(move |y| {
                let at = Coord::new(x, y);
                self.get(at).map(|p| (at, p))
            })
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for x in 1..=BOARD_SIZE {
            for y in 1..=BOARD_SIZE {
                let ch = match self.get(Coord::new(x, y)) {
                    Some(Piece {
                        side: Side::Light,
                        level: Level::Man,
                    }) => 'o',
                    Some(Piece {
                        side: Side::Light,
                        level: Level::King,
                    }) => 'O',
                    Some(Piece {
                        side: Side::Dark,
                        level: Level::Man,
                    }) => 'x',
                    Some(Piece {
                        side: Side::Dark,
                        level: Level::King,
                    }) => 'X',
                    _ => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
