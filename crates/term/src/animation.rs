//! Playback of a move transcript.
//!
//! All events of one move animate together on a shared progress value that
//! advances once per frame tick. While playback runs, the target cells of the
//! events are hidden from the static board and drawn as sprites instead.

use crate::types::{MoveEvent, Pos, MAX_ANIMATION_SPEED, MIN_ANIMATION_SPEED};

/// Progress added per tick for each animation-speed step (speed 10 => 0.08/tick).
const PROGRESS_PER_SPEED_STEP: f32 = 0.008;

/// A tile drawn at a fractional board position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSprite {
    pub row: f32,
    pub col: f32,
    pub value: u32,
    /// 0..=1; below 1 the tile is still fading in
    pub opacity: f32,
}

#[derive(Debug, Clone, Default)]
pub struct AnimationPlayer {
    events: Vec<MoveEvent>,
    progress: f32,
    step: f32,
}

impl AnimationPlayer {
    pub fn new(speed: u8) -> Self {
        let mut player = Self {
            events: Vec::new(),
            progress: 1.0,
            step: 0.0,
        };
        player.set_speed(speed);
        player
    }

    pub fn set_speed(&mut self, speed: u8) {
        let speed = speed.clamp(MIN_ANIMATION_SPEED, MAX_ANIMATION_SPEED);
        self.step = speed as f32 * PROGRESS_PER_SPEED_STEP;
    }

    /// Replace the current playback with a new transcript.
    pub fn start(&mut self, events: &[MoveEvent]) {
        self.events.clear();
        self.events.extend_from_slice(events);
        self.progress = if self.events.is_empty() { 1.0 } else { 0.0 };
    }

    /// Advance one frame; returns whether playback is still running.
    pub fn tick(&mut self) -> bool {
        if self.is_running() {
            self.progress = (self.progress + self.step).min(1.0);
        }
        self.is_running()
    }

    /// Jump to the end (e.g. on restart).
    pub fn finish(&mut self) {
        self.progress = 1.0;
    }

    pub fn is_running(&self) -> bool {
        self.progress < 1.0
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// True when the static board must not draw `pos` this frame.
    pub fn hides(&self, pos: Pos) -> bool {
        self.is_running() && self.events.iter().any(|e| e.target() == pos)
    }

    /// Sprites for the current frame, back to front.
    pub fn sprites(&self) -> Vec<TileSprite> {
        if !self.is_running() {
            return Vec::new();
        }
        let t = ease_out_quad(self.progress);
        let mut out = Vec::with_capacity(self.events.len() * 2);

        // Tiles that stay put and absorb a merge.
        for event in &self.events {
            if let MoveEvent::Merge { to, new_value, .. } = *event {
                let absorbed_by_slide = self
                    .events
                    .iter()
                    .any(|e| matches!(e, MoveEvent::Slide { to: t2, .. } if *t2 == to));
                if !absorbed_by_slide {
                    out.push(sprite_at(to, to, 1.0, new_value / 2, 1.0));
                }
            }
        }
        for event in &self.events {
            if let MoveEvent::Slide { from, to, value } = *event {
                out.push(sprite_at(from, to, t, value, 1.0));
            }
        }
        for event in &self.events {
            if let MoveEvent::Merge { from, to, new_value } = *event {
                out.push(sprite_at(from, to, t, new_value / 2, 1.0));
            }
        }
        for event in &self.events {
            if let MoveEvent::Appear { at, value } = *event {
                out.push(sprite_at(at, at, 1.0, value, t));
            }
        }
        out
    }
}

fn sprite_at(from: Pos, to: Pos, t: f32, value: u32, opacity: f32) -> TileSprite {
    let lerp = |a: u8, b: u8| a as f32 + (b as f32 - a as f32) * t;
    TileSprite {
        row: lerp(from.row, to.row),
        col: lerp(from.col, to.col),
        value,
        opacity,
    }
}

/// Quadratic ease-out: fast start, gentle landing.
pub fn ease_out_quad(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    1.0 - (1.0 - p) * (1.0 - p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(from: (u8, u8), to: (u8, u8), value: u32) -> MoveEvent {
        MoveEvent::Slide {
            from: Pos::new(from.0, from.1),
            to: Pos::new(to.0, to.1),
            value,
        }
    }

    #[test]
    fn default_speed_takes_thirteen_ticks() {
        let mut player = AnimationPlayer::new(10);
        player.start(&[slide((0, 3), (0, 0), 2)]);
        let mut ticks = 0;
        while player.tick() {
            ticks += 1;
            assert!(ticks < 100);
        }
        // 0.08 per tick => 12 running ticks, the 13th finishes.
        assert_eq!(ticks + 1, 13);
    }

    #[test]
    fn empty_transcript_is_idle() {
        let mut player = AnimationPlayer::new(10);
        player.start(&[]);
        assert!(!player.is_running());
        assert!(player.sprites().is_empty());
    }

    #[test]
    fn slide_sprite_moves_toward_target() {
        let mut player = AnimationPlayer::new(20);
        player.start(&[slide((0, 3), (0, 0), 8)]);
        let first = player.sprites()[0];
        assert_eq!(first.col, 3.0);

        player.tick();
        let later = player.sprites()[0];
        assert!(later.col < 3.0 && later.col > 0.0);
        assert_eq!(later.value, 8);
    }

    #[test]
    fn targets_are_hidden_only_while_running() {
        let mut player = AnimationPlayer::new(20);
        player.start(&[MoveEvent::Appear {
            at: Pos::new(1, 1),
            value: 2,
        }]);
        assert!(player.hides(Pos::new(1, 1)));
        assert!(!player.hides(Pos::new(0, 0)));
        player.finish();
        assert!(!player.hides(Pos::new(1, 1)));
    }

    #[test]
    fn merge_draws_both_halves() {
        let mut player = AnimationPlayer::new(10);
        player.start(&[MoveEvent::Merge {
            from: Pos::new(0, 1),
            to: Pos::new(0, 0),
            new_value: 8,
        }]);
        let sprites = player.sprites();
        assert_eq!(sprites.len(), 2);
        assert!(sprites.iter().all(|s| s.value == 4));
    }

    #[test]
    fn easing_is_monotonic() {
        let mut last = 0.0;
        for i in 0..=10 {
            let v = ease_out_quad(i as f32 / 10.0);
            assert!(v >= last);
            last = v;
        }
        assert_eq!(ease_out_quad(1.0), 1.0);
    }
}
