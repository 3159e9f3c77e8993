//! RNG module - random tile spawning
//!
//! The engine's only source of non-determinism is the tile spawner: which empty
//! cell receives the new tile and whether it is a 2 or a 4. Both draws go through
//! [`RandomSource`] so callers can inject a seeded or scripted generator.
//!
//! Also provides a simple LCG for deterministic games and tests.

use crate::board::Board;
use crate::types::{MoveEvent, SPAWN_TWO_IN_TEN};

/// Source of random draws used by the spawner
pub trait RandomSource {
    /// Uniform value in `[0, max)`. `max` is never zero.
    fn next_range(&mut self, max: u32) -> u32;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
    seed: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state, seed }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl RandomSource for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // Multiply-shift keeps the high bits; the low bits of an LCG cycle quickly.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed list of draws (each reduced modulo `max`), then repeats it.
///
/// Handy for pinning spawn locations in tests.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    draws: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(draws: impl Into<Vec<u32>>) -> Self {
        Self {
            draws: draws.into(),
            cursor: 0,
        }
    }
}

impl RandomSource for ScriptedRng {
    fn next_range(&mut self, max: u32) -> u32 {
        if self.draws.is_empty() {
            return 0;
        }
        let v = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        v % max
    }
}

/// Place one random tile on an empty cell.
///
/// Picks uniformly among the empty cells (row-major order), then places a 2 with
/// probability 9/10 and a 4 otherwise. Returns the `Appear` event, or `None` when
/// the board has no empty cell.
pub fn spawn_tile<R: RandomSource + ?Sized>(board: &mut Board, rng: &mut R) -> Option<MoveEvent> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return None;
    }

    let at = empty[rng.next_range(empty.len() as u32) as usize];
    let value = if rng.next_range(10) < SPAWN_TWO_IN_TEN { 2 } else { 4 };
    board.set(at, value);
    Some(MoveEvent::Appear { at, value })
}
