//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the 2048 rules, state management, and simulation logic.
//! It has **no dependencies** on UI, persistence, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Prepared boards and scripted random sources pin every outcome
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: Each move is O(N²) with no allocation on the hot path
//!
//! # Module Structure
//!
//! - [`board`]: NxN tile grid with adjacency checks
//! - [`game_state`]: The grid engine: moves, merges, spawns, win/loss detection
//! - [`rng`]: Injectable random source and the tile spawner
//! - [`snapshot`]: Owned copies of engine state for renderers
//! - [`error`]: Errors raised at the API boundary
//!
//! # Game Rules
//!
//! - Every move slides all tiles toward one edge; equal neighbours merge once
//! - Each merge adds the new tile value to the score
//! - A move that changes the board spawns one tile (2 at 90%, 4 at 10%)
//! - Reaching 2048 wins (play may continue); a full board with no equal
//!   neighbours ends the game
//!
//! # Example
//!
//! ```
//! use tui_2048_core::GameState;
//! use tui_2048_types::Direction;
//!
//! // A classic 4x4 game with a fixed seed
//! let mut game = GameState::new(12345);
//! assert_eq!(game.board().tile_count(), 2);
//!
//! // Apply moves until one changes the board
//! let moved = Direction::ALL.iter().any(|&dir| game.apply_move(dir).moved);
//! assert!(moved);
//! assert!(game.board().tile_count() >= 2);
//! assert!(game.score() <= 8);
//! ```

pub mod board;
pub mod error;
pub mod game_state;
pub mod rng;
pub mod snapshot;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use board::{is_tile_value, Board};
pub use error::EngineError;
pub use game_state::{
    direction_from_code, parse_direction, GameConfig, GameState, MoveOutcome, WinHook, WinPolicy,
};
pub use rng::{spawn_tile, RandomSource, ScriptedRng, SimpleRng};
pub use snapshot::GameSnapshot;
