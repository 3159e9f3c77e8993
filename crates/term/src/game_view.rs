//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::animation::{AnimationPlayer, TileSprite};
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::store::{Settings, Skin};
use crate::types::Pos;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything besides the game itself that affects a frame.
#[derive(Debug, Clone, Copy)]
pub struct ViewOptions<'a> {
    pub skin: &'a Skin,
    pub settings: &'a Settings,
    pub animation: Option<&'a AnimationPlayer>,
    /// Whether the "YOU WIN!" banner is still up (dismissed by a key press).
    pub show_win_banner: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Resolved colours for one frame
#[derive(Debug, Clone, Copy)]
struct Palette {
    page: Rgb,
    text: Rgb,
    grid: Rgb,
    empty: Rgb,
}

const DARK_PAGE: Rgb = Rgb::new(0x1A, 0x1A, 0x22);
const DARK_TEXT: Rgb = Rgb::new(0xE6, 0xE6, 0xF0);
const INK_DARK: Rgb = Rgb::new(0x3C, 0x3A, 0x32);
const INK_LIGHT: Rgb = Rgb::new(0xF9, 0xF6, 0xF2);

/// A lightweight terminal renderer for the 2048 board.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 fits a centred five-digit value with a margin on both sides.
        Self {
            cell_w: 7,
            cell_h: 3,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Board frame size in terminal cells for an `n`x`n` board (grid lines included).
    pub fn board_extent(&self, n: u8) -> (u16, u16) {
        let n = n as u16;
        (
            n * (self.cell_w + 1) + 1,
            n * (self.cell_h + 1) + 1,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        opts: &ViewOptions<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        let palette = self.palette(opts);
        fb.resize(viewport.width, viewport.height);
        fb.clear(crate::fb::Cell {
            ch: ' ',
            style: CellStyle::colors(palette.text, palette.page),
        });

        let n = snap.board.size();
        let (frame_w, frame_h) = self.board_extent(n);
        let start_x = viewport.width.saturating_sub(frame_w + PANEL_W) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        fb.fill_rect(
            start_x,
            start_y,
            frame_w,
            frame_h,
            ' ',
            CellStyle::colors(palette.grid, palette.grid),
        );

        let running = opts.animation.filter(|a| a.is_running());
        for row in 0..n {
            for col in 0..n {
                let pos = Pos::new(row, col);
                let (px, py) = self.tile_origin(start_x, start_y, row as f32, col as f32);
                let value = match running {
                    Some(anim) if anim.hides(pos) => 0,
                    _ => snap.board.get(pos).unwrap_or(0),
                };
                self.draw_tile(fb, opts.skin, &palette, px, py, value, 1.0);
            }
        }

        if let Some(anim) = running {
            for TileSprite {
                row,
                col,
                value,
                opacity,
            } in anim.sprites()
            {
                let (px, py) = self.tile_origin(start_x, start_y, row, col);
                self.draw_tile(fb, opts.skin, &palette, px, py, value, opacity);
            }
        }

        self.draw_side_panel(fb, snap, opts, &palette, viewport, start_x + frame_w, start_y);

        // Overlays wait until the last move has finished animating.
        if running.is_none() {
            if snap.game_over {
                self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, "GAME OVER", "R to restart");
            } else if snap.won && opts.show_win_banner {
                self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, "YOU WIN!", "any key to continue");
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, opts: &ViewOptions<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, opts, viewport, &mut fb);
        fb
    }

    fn palette(&self, opts: &ViewOptions<'_>) -> Palette {
        let skin = opts.skin;
        let grid = Rgb::from_hex_or(&skin.grid_color, Rgb::new(0xBB, 0xAD, 0xA0));
        let empty = Rgb::from_hex_or(skin.tile_color(0), grid);
        let (page, text) = if opts.settings.dark_theme {
            (DARK_PAGE, DARK_TEXT)
        } else {
            (
                Rgb::from_hex_or(&skin.background_color, Rgb::new(0xFA, 0xF8, 0xEF)),
                Rgb::from_hex_or(&skin.text_color, INK_DARK),
            )
        };
        Palette {
            page,
            text,
            grid,
            empty,
        }
    }

    fn tile_origin(&self, start_x: u16, start_y: u16, row: f32, col: f32) -> (u16, u16) {
        let px = start_x as f32 + 1.0 + col * (self.cell_w + 1) as f32;
        let py = start_y as f32 + 1.0 + row * (self.cell_h + 1) as f32;
        (px.round().max(0.0) as u16, py.round().max(0.0) as u16)
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        skin: &Skin,
        palette: &Palette,
        px: u16,
        py: u16,
        value: u32,
        opacity: f32,
    ) {
        if value == 0 {
            let style = CellStyle::colors(palette.empty, palette.empty);
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
            return;
        }

        let full = Rgb::from_hex_or(skin.tile_color(value), palette.grid);
        let bg = palette.empty.mix(full, opacity);
        let fg = if full.luma() > 150 { INK_DARK } else { INK_LIGHT };
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', CellStyle::colors(fg, bg));

        if opacity >= 0.5 {
            let mut digits = String::with_capacity(10);
            push_u32(&mut digits, value);
            let style = CellStyle::colors(fg, bg).bold();
            fb.put_str_centered(px, py + self.cell_h / 2, self.cell_w, &digits, style);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        opts: &ViewOptions<'_>,
        palette: &Palette,
        viewport: Viewport,
        board_right: u16,
        start_y: u16,
    ) {
        let panel_x = board_right.saturating_add(3);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::colors(palette.text, palette.page).bold();
        let value = CellStyle::colors(palette.text, palette.page);
        let dim = CellStyle { dim: true, ..value };

        let mut y = start_y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("BEST", snap.max_tile()),
            ("MOVES", snap.moves),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "SKIN", label);
        fb.put_str(panel_x, y + 1, &opts.skin.name, value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "SPEED", label);
        fb.put_u32(panel_x, y + 1, opts.settings.animation_speed as u32, value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "WINS", label);
        fb.put_u32(panel_x, y + 1, opts.settings.total_wins, value);
        y = y.saturating_add(3);

        for help in HELP_LINES {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, help, dim);
            y = y.saturating_add(1);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        title: &str,
        hint: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let band = CellStyle::colors(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0));
        fb.fill_rect(start_x + 1, mid_y.saturating_sub(1), frame_w.saturating_sub(2), 3, ' ', band);
        fb.put_str_centered(start_x, mid_y.saturating_sub(1), frame_w, title, band.bold());
        fb.put_str_centered(start_x, mid_y + 1, frame_w, hint, CellStyle { dim: true, ..band });
    }
}

const PANEL_W: u16 = 24;

const HELP_LINES: [&str; 6] = [
    "arrows/wasd  move",
    "r  restart",
    "t  next skin",
    "+/-  speed",
    "m  theme",
    "q  quit",
];

fn push_u32(out: &mut String, value: u32) {
    use std::fmt::Write;
    let _ = write!(out, "{value}");
}
