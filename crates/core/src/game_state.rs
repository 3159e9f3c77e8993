//! Game state module - the grid engine
//!
//! This module ties together the board, the random spawner and scoring. It
//! applies directional moves, resolves merges, spawns tiles and tracks the
//! terminal flags. Every call runs to completion; nothing here waits for the
//! renderer.

use crate::board::Board;
use crate::error::{EngineError, Result};
use crate::rng::{spawn_tile, RandomSource, SimpleRng};
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// What happens to input once a 2048 tile exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WinPolicy {
    /// Keep playing past 2048; only a stuck board ends the game
    #[default]
    Continue,
    /// Ignore moves once the game is won
    Freeze,
}

/// Construction-time parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub size: u8,
    pub win_policy: WinPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            win_policy: WinPolicy::Continue,
        }
    }
}

/// Result of a single `apply_move` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// At least one tile slid or merged (and a tile was spawned)
    pub moved: bool,
    /// Sum of the merged tiles' new values
    pub score_gained: u32,
    /// This move produced the game's first winning tile
    pub won_now: bool,
}

/// Callback fired once per game when `won` flips to true
pub type WinHook = Box<dyn FnMut()>;

/// Parse a direction name at the API boundary
pub fn parse_direction(name: &str) -> Result<Direction> {
    Direction::from_str(name)
        .ok_or_else(|| EngineError::InvalidArgument(format!("unknown direction {name:?}")))
}

/// Decode a numeric direction code (0=Up, 1=Down, 2=Left, 3=Right)
pub fn direction_from_code(code: u8) -> Result<Direction> {
    Direction::from_code(code)
        .ok_or_else(|| EngineError::InvalidArgument(format!("unknown direction code {code}")))
}

/// Complete game state
pub struct GameState<R: RandomSource = SimpleRng> {
    board: Board,
    config: GameConfig,
    rng: R,
    score: u32,
    game_over: bool,
    won: bool,
    first_win_achieved: bool,
    /// Monotonic game counter (increments on restart)
    episode_id: u32,
    /// Successful moves in the current game
    moves: u32,
    /// Transcript of the last move (or of the opening spawns)
    events: Vec<MoveEvent>,
    win_hook: Option<WinHook>,
}

impl GameState<SimpleRng> {
    /// Create a classic 4x4 game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let board = Board::default();
        let mut state = Self::from_parts(GameConfig::default(), board, SimpleRng::new(seed));
        state.reset_and_spawn();
        state
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a game with explicit size, win policy and random source
    pub fn with_config(config: GameConfig, rng: R) -> Result<Self> {
        let board = Board::new(config.size)?;
        let mut state = Self::from_parts(config, board, rng);
        state.reset_and_spawn();
        Ok(state)
    }

    /// Resume from a prepared board without spawning anything.
    ///
    /// Terminal flags are derived from the board right away: a board with no
    /// legal move is game over, and a board already holding a winning tile is
    /// won (the win hook does not fire for it).
    pub fn with_board(config: GameConfig, board: Board, rng: R) -> Result<Self> {
        if board.size() != config.size {
            return Err(EngineError::InvalidArgument(format!(
                "board is {}x{0}, config expects {}x{1}",
                board.size(),
                config.size
            )));
        }
        let mut state = Self::from_parts(config, board, rng);
        state.won = state.board.has_winning_tile();
        state.game_over = !state.board.can_move();
        Ok(state)
    }

    fn from_parts(config: GameConfig, board: Board, rng: R) -> Self {
        Self {
            board,
            config,
            rng,
            score: 0,
            game_over: false,
            won: false,
            first_win_achieved: false,
            episode_id: 0,
            moves: 0,
            events: Vec::with_capacity(MAX_CELLS + 1),
            win_hook: None,
        }
    }

    /// Install the first-win callback (replaces any previous one)
    pub fn set_win_hook(&mut self, hook: WinHook) {
        self.win_hook = Some(hook);
    }

    pub fn clear_win_hook(&mut self) {
        self.win_hook = None;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> u8 {
        self.board.size()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn first_win_achieved(&self) -> bool {
        self.first_win_achieved
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Events produced by the last `apply_move` or `restart`
    pub fn last_move_events(&self) -> &[MoveEvent] {
        &self.events
    }

    /// True when moves are currently ignored
    pub fn is_halted(&self) -> bool {
        self.game_over || (self.won && self.config.win_policy == WinPolicy::Freeze)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board.clone_from(&self.board);
        out.score = self.score;
        out.game_over = self.game_over;
        out.won = self.won;
        out.first_win_achieved = self.first_win_achieved;
        out.episode_id = self.episode_id;
        out.moves = self.moves;
        out.events.clear();
        out.events.extend_from_slice(&self.events);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Start a fresh game on the same board size, keeping the RNG stream going
    pub fn restart(&mut self) {
        self.episode_id = self.episode_id.wrapping_add(1);
        self.reset_and_spawn();
        log::debug!("restart: episode {}", self.episode_id);
    }

    fn reset_and_spawn(&mut self) {
        self.board.clear();
        self.score = 0;
        self.game_over = false;
        self.won = false;
        self.first_win_achieved = false;
        self.moves = 0;
        self.events.clear();
        for _ in 0..INITIAL_TILES {
            if let Some(event) = spawn_tile(&mut self.board, &mut self.rng) {
                self.events.push(event);
            }
        }
    }

    /// Parse `name` and apply it; unknown names leave the state untouched
    pub fn apply_named_move(&mut self, name: &str) -> Result<MoveOutcome> {
        let direction = parse_direction(name)?;
        Ok(self.apply_move(direction))
    }

    /// Slide every tile toward `direction`.
    ///
    /// A move that changes nothing is a no-op apart from clearing the transcript:
    /// no spawn and no status check. Once the game is halted the call only clears
    /// the transcript.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        self.events.clear();
        if self.is_halted() {
            return MoveOutcome::default();
        }

        let mut outcome = MoveOutcome::default();
        for line in 0..self.board.size() {
            let (moved, gained) = self.collapse_line(direction, line);
            outcome.moved |= moved;
            outcome.score_gained = outcome.score_gained.saturating_add(gained);
        }

        if !outcome.moved {
            return outcome;
        }

        self.score = self.score.saturating_add(outcome.score_gained);
        self.moves = self.moves.wrapping_add(1);

        if let Some(event) = spawn_tile(&mut self.board, &mut self.rng) {
            self.events.push(event);
        }

        outcome.won_now = self.evaluate_status();
        outcome
    }

    /// Process one row or column from the leading edge inward.
    ///
    /// Step `k` counts cells away from the edge tiles travel toward. A tile made by
    /// a merge is marked so nothing merges into it again during this move.
    fn collapse_line(&mut self, direction: Direction, line: u8) -> (bool, u32) {
        let n = self.board.size();
        let mut merged = [false; MAX_BOARD_SIZE as usize];
        let mut moved = false;
        let mut gained = 0u32;

        for k in 1..n {
            let start = line_pos(n, direction, line, k);
            let value = self.board.value_at(start);
            if value == 0 {
                continue;
            }

            let mut cur = k;
            while cur > 0 && self.board.value_at(line_pos(n, direction, line, cur - 1)) == 0 {
                cur -= 1;
            }
            let dest = line_pos(n, direction, line, cur);
            if cur != k {
                self.board.set(start, 0);
                self.board.set(dest, value);
            }

            let ahead = cur.checked_sub(1);
            match ahead {
                Some(a)
                    if value < MAX_TILE
                        && !merged[a as usize]
                        && self.board.value_at(line_pos(n, direction, line, a)) == value =>
                {
                    let to = line_pos(n, direction, line, a);
                    let new_value = value * 2;
                    self.board.set(to, new_value);
                    self.board.set(dest, 0);
                    merged[a as usize] = true;
                    gained = gained.saturating_add(new_value);
                    self.events.push(MoveEvent::Merge {
                        from: start,
                        to,
                        new_value,
                    });
                    moved = true;
                }
                _ if cur != k => {
                    self.events.push(MoveEvent::Slide {
                        from: start,
                        to: dest,
                        value,
                    });
                    moved = true;
                }
                _ => {}
            }
        }

        (moved, gained)
    }

    /// Update `won`/`game_over` after a successful move.
    ///
    /// Returns true when this call produced the game's first win. Under
    /// `Continue` a winning move that also jams the board still ends the game.
    fn evaluate_status(&mut self) -> bool {
        let mut won_now = false;
        if !self.won && self.board.has_winning_tile() {
            self.won = true;
            self.first_win_achieved = true;
            won_now = true;
            log::info!(
                "reached {} after {} moves, score {}",
                WIN_TILE,
                self.moves,
                self.score
            );
            if let Some(hook) = self.win_hook.as_mut() {
                hook();
            }
        }

        if self.won && self.config.win_policy == WinPolicy::Freeze {
            return won_now;
        }

        if self.board.has_empty_cell() || self.board.has_adjacent_pair() {
            return won_now;
        }

        self.game_over = true;
        log::info!(
            "game over after {} moves, score {}, max tile {}",
            self.moves,
            self.score,
            self.board.max_tile()
        );
        won_now
    }
}

impl<R: RandomSource> std::fmt::Debug for GameState<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("board", &self.board)
            .field("config", &self.config)
            .field("score", &self.score)
            .field("game_over", &self.game_over)
            .field("won", &self.won)
            .field("first_win_achieved", &self.first_win_achieved)
            .field("episode_id", &self.episode_id)
            .field("moves", &self.moves)
            .field("events", &self.events)
            .field("win_hook", &self.win_hook.is_some())
            .finish()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Position of step `k` (0 = leading edge) along `line` for a move toward `direction`
#[inline]
fn line_pos(n: u8, direction: Direction, line: u8, k: u8) -> Pos {
    match direction {
        Direction::Left => Pos::new(line, k),
        Direction::Right => Pos::new(line, n - 1 - k),
        Direction::Up => Pos::new(k, line),
        Direction::Down => Pos::new(n - 1 - k, line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use std::cell::Cell;
    use std::rc::Rc;

    fn game_from<const N: usize>(rows: [[u32; N]; N]) -> GameState<SimpleRng> {
        let config = GameConfig {
            size: N as u8,
            ..GameConfig::default()
        };
        let board = Board::from_array(rows).unwrap();
        GameState::with_board(config, board, SimpleRng::new(42)).unwrap()
    }

    fn row(state: &GameState<impl RandomSource>, r: u8) -> Vec<u32> {
        state.board().rows()[r as usize].clone()
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.size(), 4);
        assert_eq!(state.score(), 0);
        assert!(!state.game_over());
        assert!(!state.won());
        assert!(!state.first_win_achieved());
        assert_eq!(state.episode_id(), 0);
        assert_eq!(state.board().tile_count(), 2);
        assert_eq!(state.last_move_events().len(), 2);
        for &v in state.board().cells() {
            assert!(v == 0 || v == 2 || v == 4);
        }
    }

    #[test]
    fn with_config_rejects_bad_size() {
        let config = GameConfig {
            size: 1,
            ..GameConfig::default()
        };
        let err = GameState::with_config(config, SimpleRng::new(1)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));
    }

    #[test]
    fn with_board_rejects_size_mismatch() {
        let board = Board::from_array([[2, 0], [0, 2]]).unwrap();
        let result = GameState::with_board(GameConfig::default(), board, SimpleRng::new(1));
        assert!(result.is_err());
    }

    #[test]
    fn left_merge_scores_the_new_value() {
        let mut state = game_from([[2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let outcome = state.apply_move(Direction::Left);

        assert!(outcome.moved);
        assert_eq!(outcome.score_gained, 4);
        assert_eq!(state.score(), 4);
        assert_eq!(state.board().get(Pos::new(0, 0)), Some(4));
        let merges: Vec<_> = state
            .last_move_events()
            .iter()
            .filter(|e| matches!(e, MoveEvent::Merge { .. }))
            .collect();
        assert_eq!(
            merges,
            vec![&MoveEvent::Merge {
                from: Pos::new(0, 1),
                to: Pos::new(0, 0),
                new_value: 4
            }]
        );
    }

    #[test]
    fn tiles_merge_once_per_move() {
        let mut state = game_from([[2, 2, 2, 2], [2, 2, 4, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        state.apply_move(Direction::Left);
        assert_eq!(&row(&state, 0)[..2], &[4, 4]);
        assert_eq!(&row(&state, 1)[..2], &[4, 4]);
        assert_eq!(state.score(), 12);
    }

    #[test]
    fn slide_event_records_origin_and_destination() {
        let mut state = game_from([[0, 0, 8, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        state.apply_move(Direction::Left);
        assert_eq!(
            state.last_move_events()[0],
            MoveEvent::Slide {
                from: Pos::new(0, 2),
                to: Pos::new(0, 0),
                value: 8
            }
        );
        assert!(matches!(
            state.last_move_events().last(),
            Some(MoveEvent::Appear { .. })
        ));
    }

    #[test]
    fn blocked_move_is_a_no_op() {
        let mut state = game_from([[2, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let before = state.board().clone();
        let outcome = state.apply_move(Direction::Left);

        assert!(!outcome.moved);
        assert_eq!(state.board(), &before);
        assert_eq!(state.score(), 0);
        assert!(state.last_move_events().is_empty());
        assert_eq!(state.moves(), 0);
    }

    #[test]
    fn stuck_board_is_game_over_and_ignores_moves() {
        let mut state = game_from([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(state.game_over());
        for dir in Direction::ALL {
            assert!(!state.apply_move(dir).moved);
        }
        assert!(state.game_over());
    }

    #[test]
    fn filling_the_last_gap_without_pairs_ends_the_game() {
        // Left leaves one gap at (0,3); the scripted spawn drops a 4 there and no
        // neighbours match.
        let board = Board::from_array([
            [4, 0, 8, 2],
            [8, 16, 32, 64],
            [128, 256, 512, 1024],
            [4, 8, 16, 32],
        ])
        .unwrap();
        let mut state =
            GameState::with_board(GameConfig::default(), board, ScriptedRng::new([0, 9])).unwrap();
        assert!(!state.game_over());

        let outcome = state.apply_move(Direction::Left);
        assert!(outcome.moved);
        assert_eq!(row(&state, 0), vec![4, 8, 2, 4]);
        assert!(state.game_over());
        assert!(!state.apply_move(Direction::Right).moved);
    }

    #[test]
    fn win_hook_fires_once_per_game() {
        let fired = Rc::new(Cell::new(0u32));
        let counter = fired.clone();

        let mut state = game_from([[1024, 1024, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        state.set_win_hook(Box::new(move || counter.set(counter.get() + 1)));

        let outcome = state.apply_move(Direction::Left);
        assert!(outcome.won_now);
        assert!(state.won());
        assert!(state.first_win_achieved());
        assert_eq!(fired.get(), 1);

        // Continue policy: play goes on, the hook stays quiet.
        for dir in [Direction::Right, Direction::Left, Direction::Down, Direction::Up] {
            let outcome = state.apply_move(dir);
            assert!(!outcome.won_now);
        }
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn freeze_policy_halts_after_win() {
        let config = GameConfig {
            size: 4,
            win_policy: WinPolicy::Freeze,
        };
        let board =
            Board::from_array([[1024, 1024, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]])
                .unwrap();
        let mut state = GameState::with_board(config, board, SimpleRng::new(5)).unwrap();
        assert!(state.apply_move(Direction::Left).won_now);
        assert!(state.is_halted());

        let before = state.board().clone();
        assert!(!state.apply_move(Direction::Right).moved);
        assert_eq!(state.board(), &before);
    }

    #[test]
    fn restart_resets_flags_and_bumps_episode() {
        let mut state = game_from([[1024, 1024, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        state.apply_move(Direction::Left);
        assert!(state.won());

        state.restart();
        assert_eq!(state.episode_id(), 1);
        assert_eq!(state.score(), 0);
        assert!(!state.won());
        assert!(!state.first_win_achieved());
        assert!(!state.game_over());
        assert_eq!(state.board().tile_count(), 2);
    }

    #[test]
    fn named_moves_reject_unknown_directions() {
        let mut state = GameState::new(9);
        let before = state.board().clone();
        let err = state.apply_named_move("diagonal").unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));
        assert_eq!(state.board(), &before);

        assert!(direction_from_code(7).is_err());
        assert_eq!(direction_from_code(2).unwrap(), Direction::Left);
    }

    #[test]
    fn line_pos_maps_leading_edge() {
        assert_eq!(line_pos(4, Direction::Left, 1, 0), Pos::new(1, 0));
        assert_eq!(line_pos(4, Direction::Right, 1, 0), Pos::new(1, 3));
        assert_eq!(line_pos(4, Direction::Up, 2, 0), Pos::new(0, 2));
        assert_eq!(line_pos(4, Direction::Down, 2, 0), Pos::new(3, 2));
    }
}
