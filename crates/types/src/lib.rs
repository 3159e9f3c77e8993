//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, persistence).
//!
//! # Board Dimensions
//!
//! The classic 2048 playfield is a 4x4 grid. Other square sizes are allowed at
//! construction time:
//!
//! - **Default size**: 4 (16 cells)
//! - **Minimum size**: 2
//! - **Maximum size**: 16 (256 cells)
//!
//! Coordinates are `(row, col)` with row 0 at the top and col 0 at the left.
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `WIN_TILE` | 2048 | Tile value that wins the game |
//! | `MAX_TILE` | 2^30 | Largest tile; two of them never merge |
//! | `INITIAL_TILES` | 2 | Tiles spawned on a fresh board |
//! | `SPAWN_TWO_IN_TEN` | 9 | Out of 10 spawns are a 2, the rest a 4 |
//! | `TICK_MS` | 16 | Front-end frame interval (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, Pos, DEFAULT_BOARD_SIZE, WIN_TILE};
//!
//! // Parse from string (case-insensitive)
//! assert_eq!(Direction::from_str("left"), Some(Direction::Left));
//! assert_eq!(Direction::from_str("sideways"), None);
//!
//! // Directions know their opposite
//! assert_eq!(Direction::Up.opposite(), Direction::Down);
//!
//! // Actions wrap directions
//! assert_eq!(GameAction::from_str("moveUp"), Some(GameAction::Move(Direction::Up)));
//!
//! let p = Pos::new(1, 2);
//! assert_eq!((p.row, p.col), (1, 2));
//!
//! assert_eq!(DEFAULT_BOARD_SIZE, 4);
//! assert_eq!(WIN_TILE, 2048);
//! ```

/// Default board side length (4x4)
pub const DEFAULT_BOARD_SIZE: u8 = 4;

/// Smallest accepted board side length
pub const MIN_BOARD_SIZE: u8 = 2;

/// Largest accepted board side length
pub const MAX_BOARD_SIZE: u8 = 16;

/// Upper bound on cell count, used for fixed-capacity scratch buffers
pub const MAX_CELLS: usize = (MAX_BOARD_SIZE as usize) * (MAX_BOARD_SIZE as usize);

/// Tile value that wins the game
pub const WIN_TILE: u32 = 2048;

/// Largest tile value a cell can hold. Doubling it would overflow `u32`, so
/// a pair at this value stays put.
pub const MAX_TILE: u32 = 1 << 30;

/// Number of tiles placed on a fresh board
pub const INITIAL_TILES: usize = 2;

/// Spawns draw `next_range(10)`; values below this threshold spawn a 2, the rest a 4.
pub const SPAWN_TWO_IN_TEN: u32 = 9;

/// Fixed front-end frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Animation speed bounds (settings slider range)
pub const MIN_ANIMATION_SPEED: u8 = 1;
pub const MAX_ANIMATION_SPEED: u8 = 20;
pub const DEFAULT_ANIMATION_SPEED: u8 = 10;

/// Lifetime wins needed before the Royal skin can be selected
pub const ROYAL_UNLOCK_WINS: u32 = 1;


/// The four move directions
///
/// Tiles travel toward the named edge of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in code order (0=Up, 1=Down, 2=Left, 3=Right)
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "up" | "u", "down" | "d", "left" | "l", "right" | "r"
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("UP"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("r"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("north"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Decode a numeric direction code (0=Up, 1=Down, 2=Left, 3=Right)
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn code(&self) -> u8 {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True for Left/Right (lines are rows), false for Up/Down (lines are columns)
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// A cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Visual consequence of a move, consumed by the renderer
///
/// The engine rebuilds the list on every move; nothing here is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveEvent {
    /// A freshly spawned tile
    Appear { at: Pos, value: u32 },
    /// A tile that moved without merging
    Slide { from: Pos, to: Pos, value: u32 },
    /// Two tiles combined into one at `to`
    Merge { from: Pos, to: Pos, new_value: u32 },
}

impl MoveEvent {
    /// Cell the tile ends up in
    pub fn target(&self) -> Pos {
        match *self {
            MoveEvent::Appear { at, .. } => at,
            MoveEvent::Slide { to, .. } | MoveEvent::Merge { to, .. } => to,
        }
    }

    /// Cell the tile starts from (same as `target` for `Appear`)
    pub fn origin(&self) -> Pos {
        match *self {
            MoveEvent::Appear { at, .. } => at,
            MoveEvent::Slide { from, .. } | MoveEvent::Merge { from, .. } => from,
        }
    }

    /// Value shown once the event completes
    pub fn value(&self) -> u32 {
        match *self {
            MoveEvent::Appear { value, .. } | MoveEvent::Slide { value, .. } => value,
            MoveEvent::Merge { new_value, .. } => new_value,
        }
    }
}

/// Actions the front end can apply
///
/// Only `Move` and `Restart` reach the engine; the rest adjust presentation
/// settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide all tiles toward an edge
    Move(Direction),
    /// Start a new game
    Restart,
    /// Switch to the next unlocked skin
    NextSkin,
    /// Faster animation playback
    SpeedUp,
    /// Slower animation playback
    SpeedDown,
    /// Toggle the dark theme
    ToggleTheme,
}

impl GameAction {
    /// Parse action from a camelCase name
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::Move(Direction::Left)));
    /// assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveup" => Some(GameAction::Move(Direction::Up)),
            "movedown" => Some(GameAction::Move(Direction::Down)),
            "moveleft" => Some(GameAction::Move(Direction::Left)),
            "moveright" => Some(GameAction::Move(Direction::Right)),
            "restart" => Some(GameAction::Restart),
            "nextskin" => Some(GameAction::NextSkin),
            "speedup" => Some(GameAction::SpeedUp),
            "speeddown" => Some(GameAction::SpeedDown),
            "toggletheme" => Some(GameAction::ToggleTheme),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(Direction::Up) => "moveUp",
            GameAction::Move(Direction::Down) => "moveDown",
            GameAction::Move(Direction::Left) => "moveLeft",
            GameAction::Move(Direction::Right) => "moveRight",
            GameAction::Restart => "restart",
            GameAction::NextSkin => "nextSkin",
            GameAction::SpeedUp => "speedUp",
            GameAction::SpeedDown => "speedDown",
            GameAction::ToggleTheme => "toggleTheme",
        }
    }
}
