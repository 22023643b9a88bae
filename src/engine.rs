//! The rules engine: turn state machine, action execution, and undo.
//!
//! [`Engine`] owns the board, the side to move, the no-progress counter, the
//! move history, and the optional per-side agents. Callers drive it through a
//! small submission surface:
//!
//! - [`Engine::start_game`] (re)initializes everything from [`Options`] and
//!   may already auto-play a forced opening action
//! - [`Engine::try_at`] attempts the unique legal action from a square, with
//!   captures taking precedence over plain moves
//! - [`Engine::try_move`] / [`Engine::try_take`] submit an explicit direction
//! - [`Engine::revert`] undoes the most recent recorded action
//!
//! Forced-capture precedence, mandatory capture chaining, the draw counter,
//! and game termination are all handled inside; whenever a decision point
//! yields exactly one legal action the engine executes it without waiting
//! for input (except plain moves in [`GameType::Analysis`]).

use std::error;
use std::fmt;

use crate::board::{Board, Cells, Coord, Level, MoveDirection, Piece, Side, back_rank};
use crate::computer::{Agent, Computer};
use crate::config::{BOARD_SIZE, MAX_SEQ_MOVES};
use crate::history::{Census, HistoryEntry, HistoryItem, Segment, Tally};
use crate::rules::{self, Action, ActionKind};
use crate::search;

/// Severity of a [`Logger`] message.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// Leveled text sink. Informational tracing only; the engine never consults
/// it for control flow.
pub trait Logger {
    fn log(&mut self, level: LogLevel, message: &str);
}

/// Callback surface notified on every state change.
pub trait Observer {
    fn on_game_started(&mut self, board_size: i8);
    fn on_game_updated(&mut self, side_to_move: Side, board: &Cells);
    fn on_game_ended(&mut self, winner: Side);
}

/// Observer that ignores every notification.
pub struct NullObserver;

impl Observer for NullObserver {
    fn on_game_started(&mut self, _board_size: i8) {}
    fn on_game_updated(&mut self, _side_to_move: Side, _board: &Cells) {}
    fn on_game_ended(&mut self, _winner: Side) {}
}

/// Logger that discards every message.
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&mut self, _level: LogLevel, _message: &str) {}
}

/// Who plays which side, or pure analysis (no agents, no auto-played plain
/// moves).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GameType {
    Unset,
    #[default]
    HumanHuman,
    /// Light is the caller, Dark is a [`Computer`].
    HumanComputer,
    /// Light is a [`Computer`], Dark is the caller.
    ComputerHuman,
    ComputerComputer,
    Analysis,
}

/// Configuration for one game.
#[derive(Copy, Clone, Debug)]
pub struct Options {
    pub game_type: GameType,
    /// Side to move when `board` supplies a custom starting position.
    pub side_to_move: Side,
    /// Custom starting position; `None` means the standard layout with Light
    /// to move.
    pub board: Option<Cells>,
    /// Starting no-progress counter when resuming a recorded position.
    pub num_seq_moves: u8,
    /// Whether executed actions are recorded (required for `revert`).
    pub has_history: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            game_type: GameType::HumanHuman,
            side_to_move: Side::Light,
            board: None,
            num_seq_moves: 0,
            has_history: true,
        }
    }
}

/// Programmer-level misconfiguration. Player-facing illegality is never an
/// error; it is reported through `false` returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// `start_game` was given `GameType::Unset`.
    InvalidGameType,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidGameType => write!(f, "invalid game type"),
        }
    }
}

impl error::Error for EngineError {}

const LIGHT_SLOT: usize = 0;
const DARK_SLOT: usize = 1;

fn agent_slot(side: Side) -> Option<usize> {
    match side {
        Side::Light => Some(LIGHT_SLOT),
        Side::Dark => Some(DARK_SLOT),
        _ => None,
    }
}

pub struct Engine {
    board: Board,
    side_to_move: Side,
    num_seq_moves: u8,
    winner: Side,
    options: Options,
    history: Vec<HistoryEntry>,
    /// Landing square of a capture chain paused on a multi-way branch.
    chain_from: Option<Coord>,
    agents: [Option<Box<dyn Agent>>; 2],
    observer: Box<dyn Observer>,
    logger: Box<dyn Logger>,
}

impl Engine {
    pub fn new(observer: Box<dyn Observer>, logger: Box<dyn Logger>) -> Self {
        Self {
            board: Board::empty(),
            side_to_move: Side::Unset,
            num_seq_moves: 0,
            winner: Side::Unset,
            options: Options::default(),
            history: Vec::new(),
            chain_from: None,
            agents: [None, None],
            observer,
            logger,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// `Unset` while a game is in progress (or none was started), a player
    /// side once decided, `Neutral` for a draw.
    pub fn winner(&self) -> Side {
        self.winner
    }

    pub fn num_seq_moves(&self) -> u8 {
        self.num_seq_moves
    }

    /// Landing square of a capture chain waiting for the caller to pick one
    /// of several mandatory continuations.
    pub fn pending_chain(&self) -> Option<Coord> {
        self.chain_from
    }

    /// (Re)start a game. May be called repeatedly; all mutable state is
    /// reinitialized. Positions that are already decided terminate
    /// immediately (before the game type is validated, so a finished
    /// position never trips [`EngineError::InvalidGameType`]).
    pub fn start_game(&mut self, options: Option<Options>) -> Result<(), EngineError> {
        self.logger.log(LogLevel::Info, "start_game");
        self.winner = Side::Unset;
        self.chain_from = None;
        self.options = options.unwrap_or_default();
        if let Some(cells) = self.options.board {
            self.side_to_move = self.options.side_to_move;
            self.board = Board::from_cells(&cells);
            self.num_seq_moves = self.options.num_seq_moves;
        } else {
            self.side_to_move = Side::Light;
            self.board = Board::initial();
            self.num_seq_moves = 0;
        }
        self.history.clear();
        self.observer.on_game_started(BOARD_SIZE);

        let side = self.side_to_move;
        if rules::pieces_of(&self.board, side).is_empty() {
            if rules::pieces_of(&self.board, side.reverse()).is_empty() {
                self.end_game(Side::Neutral);
            } else {
                self.end_game(side.reverse());
            }
            return Ok(());
        }
        if rules::pieces_of(&self.board, side.reverse()).is_empty() {
            self.end_game(side);
            return Ok(());
        }

        let can_move = rules::can_move_any(&self.board, side);
        let can_take = rules::can_take_any(&self.board, side);
        if !can_move && !can_take {
            self.end_game(side.reverse());
            return Ok(());
        }

        self.setup_agents()?;

        self.observer.on_game_updated(side, self.board.cells());

        let actions = if can_take {
            rules::takes_of(&self.board, side)
        } else if self.options.game_type != GameType::Analysis {
            rules::moves_of(&self.board, side)
        } else {
            Vec::new()
        };
        if actions.len() == 1 {
            self.execute(actions[0]);
        }

        self.run_agents();
        Ok(())
    }

    /// Attempt the unique legal action originating from `(x, y)`: the single
    /// legal capture if there is exactly one, else the single legal move.
    /// Returns `false` when zero or several directions qualify.
    pub fn try_at(&mut self, x: i8, y: i8) -> bool {
        self.logger
            .log(LogLevel::Info, &format!("try_at (x={x},y={y})"));
        let at = Coord::new(x, y);
        let side = self.side_to_move;

        let take_dirs: Vec<MoveDirection> = MoveDirection::ALL
            .into_iter()
            .filter(|&dir| rules::can_take(&self.board, side, at, dir))
            .collect();
        let ok = match take_dirs.len() {
            1 => self.submit_take(at, take_dirs[0]),
            0 => {
                let move_dirs: Vec<MoveDirection> = MoveDirection::ALL
                    .into_iter()
                    .filter(|&dir| rules::can_move(&self.board, side, at, dir))
                    .collect();
                if move_dirs.len() == 1 {
                    self.submit_move(at, move_dirs[0])
                } else {
                    false
                }
            }
            _ => false,
        };
        if ok {
            self.run_agents();
        }
        ok
    }

    /// Submit a plain move. Refused while any capture is available to the
    /// side to move (forced-capture precedence).
    pub fn try_move(&mut self, x: i8, y: i8, dir: MoveDirection) -> bool {
        let ok = self.submit_move(Coord::new(x, y), dir);
        if ok {
            self.run_agents();
        }
        ok
    }

    /// Submit a capture.
    pub fn try_take(&mut self, x: i8, y: i8, dir: MoveDirection) -> bool {
        let ok = self.submit_take(Coord::new(x, y), dir);
        if ok {
            self.run_agents();
        }
        ok
    }

    /// Undo the most recent recorded action (a capture together with its
    /// auto-derived continuations counts as one). Returns `false` when
    /// history is disabled or empty.
    pub fn revert(&mut self) -> bool {
        self.logger.log(LogLevel::Info, "revert");
        if !self.options.has_history {
            return false;
        }
        let Some(entry) = self.history.pop() else {
            return false;
        };
        for seg in entry.segments.iter().rev() {
            self.board.relocate(seg.to, seg.from);
            if seg.promoted {
                if let Some(piece) = self.board.get(seg.from) {
                    self.board.set(seg.from, Some(Piece::man(piece.side)));
                }
            }
            if let Some((at, piece)) = seg.captured {
                self.board.set(at, Some(piece));
            }
        }
        self.side_to_move = entry.side_before;
        self.num_seq_moves = entry.seq_before;
        self.winner = entry.winner_before;
        self.chain_from = entry.chain_before;
        true
    }

    /// The last `size` recorded actions as flattened rows, plus one trailing
    /// synthetic row with the current totals. `size < 0` means `|size|`,
    /// `size == 0` means all; the count is clamped to the available length.
    pub fn get_history(&self, size: i32) -> Vec<HistoryItem> {
        let len = self.history.len();
        let wanted = if size == 0 {
            len
        } else {
            size.unsigned_abs() as usize
        };
        let wanted = wanted.min(len);
        let mut items = Vec::with_capacity(wanted + 1);
        for entry in &self.history[len - wanted..] {
            items.push(HistoryItem::from_entry(entry));
        }
        items.push(HistoryItem::summary(
            self.side_to_move,
            self.census(),
            self.num_seq_moves,
        ));
        items
    }

    fn submit_move(&mut self, at: Coord, dir: MoveDirection) -> bool {
        self.logger
            .log(LogLevel::Info, &format!("move {at} -> {dir}"));
        if !rules::can_move(&self.board, self.side_to_move, at, dir) {
            return false;
        }
        if rules::can_take_any(&self.board, self.side_to_move) {
            return false;
        }
        self.execute(Action::new_move(at, dir));
        true
    }

    fn submit_take(&mut self, at: Coord, dir: MoveDirection) -> bool {
        self.logger
            .log(LogLevel::Info, &format!("take {at} -> {dir}"));
        if !rules::can_take(&self.board, self.side_to_move, at, dir) {
            return false;
        }
        self.execute(Action::new_take(at, dir));
        true
    }

    fn execute(&mut self, action: Action) {
        match action.kind {
            ActionKind::Move => self.execute_move(action),
            ActionKind::Take => self.execute_take(action),
        }
    }

    fn execute_move(&mut self, action: Action) {
        let side_before = self.side_to_move;
        let seq_before = self.num_seq_moves;
        let winner_before = self.winner;
        let chain_before = self.chain_from;
        let census = if self.options.has_history {
            self.census()
        } else {
            Census::default()
        };

        self.observer
            .on_game_updated(self.side_to_move, self.board.cells());

        let from = action.from;
        let to = from.step(action.dir);
        self.board.relocate(from, to);
        let promoted = self.promote_if_due(to);
        self.chain_from = None;

        if self.options.has_history {
            self.history.push(HistoryEntry {
                action,
                continuation: false,
                side_before,
                seq_before,
                winner_before,
                chain_before,
                census,
                segments: vec![Segment {
                    from,
                    to,
                    promoted,
                    captured: None,
                }],
            });
        }

        // A resumed counter may already sit at or past the threshold.
        self.num_seq_moves = self.num_seq_moves.saturating_add(1);
        if self.num_seq_moves >= MAX_SEQ_MOVES {
            self.end_game(Side::Neutral);
            return;
        }

        self.side_to_move = self.side_to_move.reverse();
        let (can_proceed, next) = self.proceed();
        if !can_proceed {
            let winner = self.side_to_move.reverse();
            self.end_game(winner);
            return;
        }
        if next.len() == 1 {
            self.execute(next[0]);
        }
    }

    fn execute_take(&mut self, action: Action) {
        let side_before = self.side_to_move;
        let seq_before = self.num_seq_moves;
        let winner_before = self.winner;
        let chain_before = self.chain_from;
        let continuation = self.chain_from == Some(action.from);
        let census = if self.options.has_history {
            self.census()
        } else {
            Census::default()
        };

        let mut segments = Vec::new();
        let mut from = action.from;
        let mut dir = action.dir;
        loop {
            self.observer
                .on_game_updated(self.side_to_move, self.board.cells());

            let mid = from.step(dir);
            let landing = from.jump(dir);
            let captured = self.board.take_out(mid).map(|p| (mid, p));
            self.board.relocate(from, landing);
            let promoted = self.promote_if_due(landing);
            segments.push(Segment {
                from,
                to: landing,
                promoted,
                captured,
            });

            self.observer
                .on_game_updated(self.side_to_move, self.board.cells());
            self.num_seq_moves = 0;

            let continuations = rules::takes_from(&self.board, self.side_to_move, landing);
            match continuations.len() {
                0 => {
                    self.chain_from = None;
                    break;
                }
                1 => {
                    // Derived mandatory continuation: same entry, same turn.
                    from = landing;
                    dir = continuations[0].dir;
                }
                _ => {
                    self.chain_from = Some(landing);
                    if self.options.has_history {
                        self.history.push(HistoryEntry {
                            action,
                            continuation,
                            side_before,
                            seq_before,
                            winner_before,
                            chain_before,
                            census,
                            segments,
                        });
                    }
                    return;
                }
            }
        }

        if self.options.has_history {
            self.history.push(HistoryEntry {
                action,
                continuation,
                side_before,
                seq_before,
                winner_before,
                chain_before,
                census,
                segments,
            });
        }

        self.side_to_move = self.side_to_move.reverse();
        let (can_proceed, next) = self.proceed();
        if !can_proceed {
            let winner = self.side_to_move.reverse();
            self.end_game(winner);
            return;
        }
        if next.len() == 1 {
            self.execute(next[0]);
        }
    }

    /// Decide whether the (possibly just-flipped) side to move can act, and
    /// compute its action set: captures take precedence; a side down to one
    /// piece with no capture is routed through the promotion-safety filter,
    /// and an empty filtered set means play cannot continue.
    fn proceed(&mut self) -> (bool, Vec<Action>) {
        let side = self.side_to_move;
        let can_move = rules::can_move_any(&self.board, side);
        let can_take = rules::can_take_any(&self.board, side);
        if !can_move && !can_take {
            return (false, Vec::new());
        }

        let mut actions = Vec::new();
        if !can_take && self.options.game_type != GameType::Analysis {
            let pieces = rules::pieces_of(&self.board, side);
            if pieces.len() == 1 {
                actions = search::auto_moves(&self.board, side, pieces[0]);
                if actions.is_empty() {
                    return (false, Vec::new());
                }
            } else {
                actions = rules::moves_of(&self.board, side);
            }
        }

        self.observer.on_game_updated(side, self.board.cells());

        if can_take {
            actions = rules::takes_of(&self.board, side);
        }
        (true, actions)
    }

    fn promote_if_due(&mut self, at: Coord) -> bool {
        if let Some(piece) = self.board.get(at) {
            if piece.level == Level::Man && at.x == back_rank(piece.side) {
                self.board.set(at, Some(Piece::king(piece.side)));
                return true;
            }
        }
        false
    }

    fn end_game(&mut self, winner: Side) {
        self.observer
            .on_game_updated(Side::Unset, self.board.cells());
        self.winner = winner;
        self.observer.on_game_ended(winner);
        self.side_to_move = Side::Unset;
    }

    fn setup_agents(&mut self) -> Result<(), EngineError> {
        self.agents = match self.options.game_type {
            GameType::Unset => return Err(EngineError::InvalidGameType),
            GameType::HumanComputer => [None, Some(Box::new(Computer::new(Side::Dark)) as Box<dyn Agent>)],
            GameType::ComputerHuman => [Some(Box::new(Computer::new(Side::Light)) as Box<dyn Agent>), None],
            GameType::ComputerComputer => [
                Some(Box::new(Computer::new(Side::Light)) as Box<dyn Agent>),
                Some(Box::new(Computer::new(Side::Dark)) as Box<dyn Agent>),
            ],
            _ => [None, None],
        };
        Ok(())
    }

    /// Invite the agent owning the current turn to act, repeatedly, until
    /// the turn belongs to the caller or the game ends. Agents propose;
    /// submission goes through the same validation as caller input.
    fn run_agents(&mut self) {
        loop {
            if self.winner != Side::Unset {
                break;
            }
            let Some(slot) = agent_slot(self.side_to_move) else {
                break;
            };
            let Some(mut agent) = self.agents[slot].take() else {
                break;
            };
            let proposal = agent.propose(self);
            self.agents[slot] = Some(agent);
            let Some(action) = proposal else {
                break;
            };
            let ok = match action.kind {
                ActionKind::Move => self.submit_move(action.from, action.dir),
                ActionKind::Take => self.submit_take(action.from, action.dir),
            };
            if !ok {
                break;
            }
        }
    }

    fn census(&self) -> Census {
        Census {
            kings: Tally::new(
                rules::count_of(&self.board, Side::Light, Level::King) as u8,
                rules::count_of(&self.board, Side::Dark, Level::King) as u8,
            ),
            men: Tally::new(
                rules::count_of(&self.board, Side::Light, Level::Man) as u8,
                rules::count_of(&self.board, Side::Dark, Level::Man) as u8,
            ),
            promo_paths: Tally::new(
                search::promo_paths(&self.board, Side::Light),
                search::promo_paths(&self.board, Side::Dark),
            ),
        }
    }
}
