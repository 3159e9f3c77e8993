//! Terminal front end for the 2048 game.
//!
//! Rendering goes through a plain framebuffer instead of a widget toolkit:
//! `GameView` paints a snapshot into a `FrameBuffer`, and `TerminalRenderer`
//! flushes only the cells that changed. Move transcripts are replayed by
//! `AnimationPlayer` on a fixed frame tick.

pub mod animation;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_store as store;
pub use tui_2048_types as types;

pub use animation::{ease_out_quad, AnimationPlayer, TileSprite};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, ViewOptions, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
