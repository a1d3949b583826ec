//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). The field is scaled to the largest whole
//! multiple that fits the viewport, so the caller recomputes nothing on resize
//! beyond passing the new [`Viewport`].

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rect, Rgb};
use crate::types::{Mode, ShapeKind};

/// Terminal columns per grid cell at scale 1; glyphs are about twice as tall
/// as they are wide.
const ASPECT: u16 = 2;

/// Rows above the frame reserved for the score line.
const HUD_ROWS: u16 = 1;

const BACKDROP: CellStyle = CellStyle::new(Rgb::new(120, 120, 130), Rgb::new(0, 0, 0));
const FIELD: CellStyle = CellStyle::new(Rgb::new(60, 60, 70), Rgb::new(24, 24, 32));
const BORDER: CellStyle = CellStyle::new(Rgb::new(190, 190, 200), Rgb::new(0, 0, 0));
const HUD: CellStyle = CellStyle::new(Rgb::new(230, 230, 230), Rgb::new(0, 0, 0)).bold();
const OVERLAY: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(70, 20, 20)).bold();
const SHADOW: Rgb = Rgb::new(8, 8, 12);

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

/// Where the field lands in the viewport at the current scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Inner play area, excluding the border.
    pub field: Rect,
    /// Border rectangle around `field`.
    pub frame: Rect,
    pub scale: u16,
    pub cell_w: u16,
    pub cell_h: u16,
}

impl Layout {
    /// Terminal rectangle of grid cell (x, y), or `None` when the cell is
    /// outside the grid.
    pub fn cell_rect(&self, x: i32, y: i32) -> Option<Rect> {
        if x < 0 || y < 0 {
            return None;
        }
        let px = (x as u16).checked_mul(self.cell_w)?;
        let py = (y as u16).checked_mul(self.cell_h)?;
        if px >= self.field.w || py >= self.field.h {
            return None;
        }
        Some(Rect::new(
            self.field.x + px,
            self.field.y + py,
            self.cell_w,
            self.cell_h,
        ))
    }
}

/// Palette entry for a grid value.
pub fn block_color(value: u8) -> Rgb {
    match ShapeKind::from_code(value) {
        Some(ShapeKind::T) => Rgb::new(190, 110, 220),
        Some(ShapeKind::S) => Rgb::new(100, 210, 120),
        Some(ShapeKind::Z) => Rgb::new(220, 80, 80),
        Some(ShapeKind::O) => Rgb::new(240, 210, 80),
        Some(ShapeKind::L) => Rgb::new(250, 160, 40),
        Some(ShapeKind::J) => Rgb::new(80, 120, 220),
        Some(ShapeKind::I) => Rgb::new(80, 210, 220),
        None => Rgb::new(150, 150, 150),
    }
}

/// Renders snapshots for the terminal runner.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    max_scale: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { max_scale: 4 }
    }
}

impl GameView {
    pub fn new(max_scale: u16) -> Self {
        Self {
            max_scale: max_scale.max(1),
        }
    }

    /// Fit a `cols` x `rows` grid into `viewport`.
    pub fn layout(&self, cols: usize, rows: usize, viewport: Viewport) -> Layout {
        let cols = cols.clamp(1, u16::MAX as usize) as u16;
        let rows = rows.clamp(1, u16::MAX as usize) as u16;

        let by_w = viewport.width.saturating_sub(2) / cols.saturating_mul(ASPECT);
        let by_h = viewport.height.saturating_sub(2 + HUD_ROWS) / rows;
        let scale = by_w.min(by_h).clamp(1, self.max_scale);

        let cell_w = ASPECT * scale;
        let cell_h = scale;
        let field_w = cols.saturating_mul(cell_w);
        let field_h = rows.saturating_mul(cell_h);
        let frame_w = field_w.saturating_add(2);
        let frame_h = field_h.saturating_add(2);

        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = viewport.height.saturating_sub(frame_h.saturating_add(HUD_ROWS)) / 2 + HUD_ROWS;

        Layout {
            field: Rect::new(x + 1, y + 1, field_w, field_h),
            frame: Rect::new(x, y, frame_w, frame_h),
            scale,
            cell_w,
            cell_h,
        }
    }

    /// Draw `snap` into `fb`, resizing it to the viewport first.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) -> Layout {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::new(' ', BACKDROP));

        let layout = self.layout(snap.width, snap.height, viewport);
        fb.draw_box(layout.frame, BORDER);
        fb.fill(layout.field, Cell::new(' ', FIELD));

        for y in 0..snap.height as i32 {
            for x in 0..snap.width as i32 {
                let value = snap.cell(x, y);
                if value != 0 {
                    self.paint_block(fb, &layout, x, y, block_color(value));
                }
            }
        }

        if let Some(kind) = snap.figure_kind {
            // Shadow first so the piece covers it where they overlap.
            for b in snap.figure.iter() {
                self.paint_shadow(fb, &layout, b.x, b.y);
            }
            for b in snap.figure.iter() {
                self.paint_block(fb, &layout, b.x, b.y, block_color(kind.code()));
            }
        }

        self.draw_hud(fb, snap, &layout);

        match snap.mode {
            Mode::Begin => self.draw_overlay(fb, &layout, "BLOCKDROP", "space to start"),
            Mode::GameOver => self.draw_overlay(fb, &layout, "GAME OVER", "r: new  q: quit"),
            Mode::Playing => {}
        }

        layout
    }

    /// Convenience wrapper allocating a fresh framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn paint_block(&self, fb: &mut FrameBuffer, layout: &Layout, x: i32, y: i32, color: Rgb) {
        if let Some(r) = layout.cell_rect(x, y) {
            fb.fill(r, Cell::new('█', CellStyle::new(color, FIELD.bg)));
        }
    }

    fn paint_shadow(&self, fb: &mut FrameBuffer, layout: &Layout, x: i32, y: i32) {
        let Some(r) = layout.cell_rect(x, y) else {
            return;
        };
        // One terminal cell down and right, clipped to the field.
        let shifted = Rect::new(r.x + 1, r.y + 1, r.w, r.h);
        let w = shifted.right().min(layout.field.right()).saturating_sub(shifted.x);
        let h = shifted.bottom().min(layout.field.bottom()).saturating_sub(shifted.y);
        fb.fill(
            Rect::new(shifted.x, shifted.y, w, h),
            Cell::new('░', CellStyle::new(FIELD.fg.scaled(1, 2), SHADOW)),
        );
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        let Some(y) = layout.frame.y.checked_sub(1) else {
            return;
        };
        let line = format!("SCORE {}", snap.score);
        fb.put_str(layout.frame.x, y, &line, HUD);

        if snap.fast_fall {
            let tag = "FAST";
            let x = layout.frame.right().saturating_sub(tag.len() as u16);
            fb.put_str(x, y, tag, HUD);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: &Layout, title: &str, hint: &str) {
        let mid = layout.field.y + layout.field.h / 2;
        let band = Rect::new(layout.field.x, mid.saturating_sub(1), layout.field.w, 3);
        fb.fill(band, Cell::new(' ', OVERLAY));
        fb.put_str_centered(band, mid.saturating_sub(1), title, OVERLAY);
        fb.put_str_centered(band, mid + 1, hint, OVERLAY);
    }
}
