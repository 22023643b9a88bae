//! Constants for board dimensions and game-rule parameters.
//!
//! This module contains the configuration constants for the draughts engine.
//! Coordinates are 1-indexed: `x` is the row (1 = top), `y` is the column.
//! Light men head toward row 1 and promote there; Dark men head toward row
//! `BOARD_SIZE`.
//!
//! # Board Size Configuration
//!
//! The board size is controlled by Cargo features:
//! - `board8x8` (default): the standard 8x8 board
//! - `board10x10`: the international 10x10 board
//!
//! To compile for a specific board size:
//! ```sh
//! cargo build                           # 8x8 (default)
//! cargo build --no-default-features --features board10x10  # 10x10
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Standard draughts boards are 8 or 10 squares wide.
#[cfg(feature = "board8x8")]
pub const BOARD_SIZE: i8 = 8;

#[cfg(feature = "board10x10")]
pub const BOARD_SIZE: i8 = 10;

// Compile-time check: exactly one board size feature must be enabled
#[cfg(all(feature = "board8x8", feature = "board10x10"))]
compile_error!("Cannot enable both 'board8x8' and 'board10x10' features at the same time");

#[cfg(not(any(feature = "board8x8", feature = "board10x10")))]
compile_error!("Must enable exactly one board size feature: 'board8x8' or 'board10x10'");

/// Board size as an index bound.
pub const SIZE: usize = BOARD_SIZE as usize;

/// Number of starting rows filled with men on each side of the board
/// (3 rows of 4 men on 8x8, 4 rows of 5 men on 10x10).
pub const MEN_ROWS: i8 = BOARD_SIZE / 2 - 1;

// =============================================================================
// Game Rules
// =============================================================================

/// Consecutive non-capturing moves after which the game is drawn.
/// Every capture resets the counter to zero.
pub const MAX_SEQ_MOVES: u8 = 30;
