//! A rules engine for checkers-family draughts on 8x8 or 10x10 boards
//! (selected by the `board8x8` / `board10x10` feature).
//!
//! The crate is organized bottom-up:
//!
//! - [`config`]: board size and game constants
//! - [`board`]: sides, pieces, coordinates, directions, and the grid
//! - [`rules`]: pure legality predicates and action enumeration
//! - [`search`]: promotion-path lookahead and the safe-move filter
//! - [`history`]: recorded actions and the flattened report rows
//! - [`engine`]: the turn state machine that ties it all together
//! - [`computer`]: machine players
//!
//! # Example
//!
//! ```
//! use draughts_rust::board::{Board, Coord, MoveDirection, Piece, Side};
//! use draughts_rust::engine::{Engine, NullLogger, NullObserver, Options};
//!
//! let mut board = Board::empty();
//! board.set(Coord::new(6, 2), Some(Piece::man(Side::Light)));
//! board.set(Coord::new(2, 4), Some(Piece::man(Side::Dark)));
//!
//! let options = Options {
//!     board: Some(*board.cells()),
//!     ..Options::default()
//! };
//! let mut engine = Engine::new(Box::new(NullObserver), Box::new(NullLogger));
//! engine.start_game(Some(options)).unwrap();
//!
//! assert!(engine.try_move(6, 2, MoveDirection::TopRight));
//! assert_eq!(engine.side_to_move(), Side::Dark);
//! ```

pub mod board;
pub mod computer;
pub mod config;
pub mod engine;
pub mod history;
pub mod rules;
pub mod search;
