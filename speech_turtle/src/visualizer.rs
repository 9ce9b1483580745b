//! Software-rendered window using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────┬──────────────┐
//! │                                          │  COMMANDS    │
//! │   play area (toroidal, W × H)            │  F FORWARD   │
//! │                                          │  B BACK      │
//! │        ▲ turtle                          │  ...         │
//! │                                          │  (last one   │
//! │   [color list overlay slides in here]    │  highlighted)│
//! ├──────────────────────────────────────────┴──────────────┤
//! │  status bar                                             │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Shortcut keys and clicks on legend rows are forwarded as
//! [`WindowInput`] to the input hub; the window never touches the turtle.

use std::sync::mpsc::Sender;
use std::time::Duration;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use turtle_core::{Command, DrawSegment, Heading, PlayArea, Point, Rgb};

use crate::canvas::{Canvas, ColorOverlay};
use crate::error::AppError;
use crate::input::WindowInput;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

const LEGEND_W:        usize = 220;
const STATUS_H:        usize = 36;
const MIN_CANVAS_H:    usize = 320;
const LEGEND_ROW_H:    usize = 26;
const LEGEND_TOP:      usize = 44;
const BG_COLOR:        u32   = 0xFFFFFFFF;
const PANEL_BG:        u32   = 0xFF16213E;
const STATUS_BG:       u32   = 0xFF0F3460;
const DIM_TEXT:        u32   = 0xFF696969;
const HIGHLIGHT_COLOR: u32   = 0xFF00BFFF;  // deep sky blue
const PEN_UP_OUTLINE:  u32   = 0xFF808080;

/// Shortcut letter → window key.
const KEYS: [(char, Key); 10] = [
    ('F', Key::F),
    ('B', Key::B),
    ('L', Key::L),
    ('R', Key::R),
    ('D', Key::D),
    ('U', Key::U),
    ('G', Key::G),
    ('S', Key::S),
    ('C', Key::C),
    ('O', Key::O),
];

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:     Window,
    buf:        Vec<u32>,
    win_w:      usize,
    win_h:      usize,
    area:       PlayArea,
    canvas_w:   usize,
    canvas_h:   usize,
    win_tx:     Sender<WindowInput>,
    mouse_down: bool,
}

impl Visualizer {
    pub fn new(win_tx: Sender<WindowInput>, area: PlayArea) -> Result<Self, AppError> {
        let canvas_w = area.width.ceil() as usize;
        let canvas_h = area.height.ceil() as usize;
        let win_w = canvas_w + LEGEND_W;
        let win_h = canvas_h.max(MIN_CANVAS_H) + STATUS_H;

        let mut window = Window::new(
            "Speech Turtle",
            win_w, win_h,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| AppError::Window(e.to_string()))?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; win_w * win_h],
            win_w,
            win_h,
            area,
            canvas_w,
            canvas_h,
            win_tx,
            mouse_down: false,
        })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll keyboard and mouse and forward them as [`WindowInput`].
    /// Returns false once the window has closed.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() {
            let _ = self.win_tx.send(WindowInput::Closed);
            return false;
        }

        for (c, key) in KEYS {
            if self.window.is_key_pressed(key, KeyRepeat::No) {
                let _ = self.win_tx.send(WindowInput::Key(c));
            }
        }
        if self.window.is_key_pressed(Key::Escape, KeyRepeat::No) {
            let _ = self.win_tx.send(WindowInput::Escape);
        }

        // Click on a legend row acts like its shortcut key
        let down = self.window.get_mouse_down(MouseButton::Left);
        if down && !self.mouse_down {
            if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Discard) {
                if let Some(c) = legend_key_at(mx as usize, my as usize, self.canvas_w) {
                    let _ = self.win_tx.send(WindowInput::Key(c));
                }
            }
        }
        self.mouse_down = down;

        true
    }

    /// Render one frame.
    pub fn render(&mut self, canvas: &Canvas) {
        self.buf.fill(BG_COLOR);

        // ── Trail ─────────────────────────────────────────────────────────
        for seg in &canvas.segments {
            self.draw_segment(seg);
        }

        // ── Turtle ────────────────────────────────────────────────────────
        self.draw_turtle(canvas.position, canvas.heading, canvas.scale, canvas.pen_down, canvas.pen_color);

        // ── Color list overlay ────────────────────────────────────────────
        if let Some(overlay) = &canvas.overlay {
            self.draw_overlay(overlay);
        }

        // ── Legend ────────────────────────────────────────────────────────
        self.draw_legend(canvas.highlight.as_ref());

        // ── Status bar ────────────────────────────────────────────────────
        let status_y = self.win_h - STATUS_H;
        self.fill_rect(0, status_y, self.win_w, STATUS_H, STATUS_BG);
        self.draw_text(&canvas.status(), 10, status_y + 6, 2, 0xFFEEEEEE);
        self.draw_text(
            "KEYS OR CLICK A COMMAND.  ESC HIDES COLORS.  TYPE PHRASES IN THE CONSOLE.",
            10, status_y + 26, 1, 0xFFAAAAAA,
        );

        self.window.update_with_buffer(&self.buf, self.win_w, self.win_h).ok();
    }

    // ── Trail ─────────────────────────────────────────────────────────────

    /// Segments that crossed an edge are drawn as two pieces, each leaving
    /// through the edge it crossed.
    fn draw_segment(&mut self, seg: &DrawSegment) {
        let dx = unwrapped_delta(seg.to.x - seg.from.x, self.area.width);
        let dy = unwrapped_delta(seg.to.y - seg.from.y, self.area.height);
        let color = seg.color.to_argb();

        self.draw_thick_line(seg.from, Point::new(seg.from.x + dx, seg.from.y + dy), seg.thickness, color);
        if (seg.from.x + dx - seg.to.x).abs() > 0.5 || (seg.from.y + dy - seg.to.y).abs() > 0.5 {
            self.draw_thick_line(Point::new(seg.to.x - dx, seg.to.y - dy), seg.to, seg.thickness, color);
        }
    }

    fn draw_thick_line(&mut self, a: Point, b: Point, thickness: f64, color: u32) {
        let steps = (b.x - a.x).abs().max((b.y - a.y).abs()).ceil().max(1.0) as usize;
        let half = (thickness / 2.0).max(0.5);
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = a.x + (b.x - a.x) * t;
            let y = a.y + (b.y - a.y) * t;
            self.fill_canvas_square(x, y, half, color);
        }
    }

    fn fill_canvas_square(&mut self, cx: f64, cy: f64, half: f64, color: u32) {
        let x0 = (cx - half).floor().max(0.0) as usize;
        let y0 = (cy - half).floor().max(0.0) as usize;
        let x1 = ((cx + half).ceil().max(0.0) as usize).min(self.canvas_w);
        let y1 = ((cy + half).ceil().max(0.0) as usize).min(self.canvas_h);
        for y in y0..y1 {
            for x in x0..x1 {
                self.buf[y * self.win_w + x] = color;
            }
        }
    }

    // ── Turtle ────────────────────────────────────────────────────────────

    /// A triangle pointing along the heading: filled with the pen color
    /// while the pen is down, outlined in grey while it is up.
    fn draw_turtle(&mut self, pos: Point, heading: Heading, scale: f64, pen_down: bool, pen: Rgb) {
        let size = (10.0 * scale).clamp(4.0, 80.0);
        let d = heading.displacement();
        let (px, py) = (-d.dy, d.dx);

        let tip   = Point::new(pos.x + d.dx * size, pos.y + d.dy * size);
        let left  = Point::new(pos.x - d.dx * size * 0.6 + px * size * 0.7, pos.y - d.dy * size * 0.6 + py * size * 0.7);
        let right = Point::new(pos.x - d.dx * size * 0.6 - px * size * 0.7, pos.y - d.dy * size * 0.6 - py * size * 0.7);

        if pen_down {
            self.fill_triangle(tip, left, right, pen.to_argb());
        } else {
            self.draw_thick_line(tip, left, 1.0, PEN_UP_OUTLINE);
            self.draw_thick_line(left, right, 1.0, PEN_UP_OUTLINE);
            self.draw_thick_line(right, tip, 1.0, PEN_UP_OUTLINE);
        }
    }

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point, color: u32) {
        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as usize;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as usize;
        let max_x = (a.x.max(b.x).max(c.x).ceil().max(0.0) as usize).min(self.canvas_w);
        let max_y = (a.y.max(b.y).max(c.y).ceil().max(0.0) as usize).min(self.canvas_h);

        let edge = |p: Point, q: Point, r: Point| (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x);
        for y in min_y..max_y {
            for x in min_x..max_x {
                let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let w0 = edge(b, c, p);
                let w1 = edge(c, a, p);
                let w2 = edge(a, b, p);
                let inside = (w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0)
                          || (w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0);
                if inside {
                    self.buf[y * self.win_w + x] = color;
                }
            }
        }
    }

    // ── Color list overlay ────────────────────────────────────────────────

    fn draw_overlay(&mut self, overlay: &ColorOverlay) {
        const COL_W: usize = 104;
        const ROW_H: usize = 12;
        let cols = (self.canvas_w.saturating_sub(16) / COL_W).max(1);
        let rows = overlay.entries.len().div_ceil(cols);
        let panel_h = (rows * ROW_H + 32).min(self.canvas_h);

        // Slides down from the top edge
        let hidden = (panel_h as f32 * (1.0 - overlay.slide_in)) as usize;
        let visible_h = panel_h - hidden;
        self.fill_rect(0, 0, self.canvas_w, visible_h, PANEL_BG);
        if overlay.slide_in < 1.0 { return; }

        self.draw_text("KNOWN COLORS  (SAY A NAME, OR COLORS AGAIN TO HIDE)", 8, 8, 1, 0xFFFFD700);
        for (i, (name, rgb)) in overlay.entries.iter().enumerate() {
            let x = 8 + (i % cols) * COL_W;
            let y = 24 + (i / cols) * ROW_H;
            if y + ROW_H > panel_h { break; }
            self.fill_rect(x, y, 8, 8, rgb.to_argb());
            self.draw_text(name, x + 12, y + 2, 1, 0xFFEEEEEE);
        }
    }

    // ── Legend ────────────────────────────────────────────────────────────

    fn draw_legend(&mut self, highlight: Option<&Command>) {
        let x0 = self.canvas_w;
        let panel_h = self.win_h - STATUS_H;
        self.fill_rect(x0, 0, LEGEND_W, panel_h, PANEL_BG);
        self.draw_text("COMMANDS", x0 + 12, 14, 2, 0xFFFFD700);

        for (i, cmd) in Command::FIXED.iter().enumerate() {
            let y = LEGEND_TOP + i * LEGEND_ROW_H;
            let lit = highlight == Some(cmd);
            if lit {
                self.fill_rect(x0 + 4, y - 4, LEGEND_W - 8, LEGEND_ROW_H - 4, 0xFF1F4068);
            }
            let key = cmd.shortcut().map(String::from).unwrap_or_default();
            let color = if lit { HIGHLIGHT_COLOR } else { 0xFFCCCCCC };
            self.draw_text(&key, x0 + 12, y, 2, DIM_TEXT);
            self.draw_text(cmd.token(), x0 + 36, y, 2, color);
        }

        if let Some(Command::Color(name)) = highlight {
            let y = LEGEND_TOP + Command::FIXED.len() * LEGEND_ROW_H + 8;
            self.draw_text(name, x0 + 12, y, 2, HIGHLIGHT_COLOR);
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(self.win_h) {
            for col in x..(x + w).min(self.win_w) {
                self.buf[row * self.win_w + col] = color;
            }
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < self.win_w && y < self.win_h {
            self.buf[y * self.win_w + x] = color;
        }
    }

    /// 3×5 bitmap text, each font pixel drawn as a `px`×`px` block.
    fn draw_text(&mut self, text: &str, x: usize, y: usize, px: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let bits = glyph(ch);
            for row in 0..5 {
                for col in 0..3 {
                    if bits & (1 << (14 - (row * 3 + col))) == 0 { continue; }
                    for dy in 0..px {
                        for dx in 0..px {
                            self.set_pixel(cx + col * px + dx, y + row * px + dy, color);
                        }
                    }
                }
            }
            cx += 4 * px;
            if cx >= self.win_w { break; }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pure helpers
// ────────────────────────────────────────────────────────────────────────────

/// Shortest signed displacement on a circle of length `extent`.
fn unwrapped_delta(d: f64, extent: f64) -> f64 {
    d - extent * (d / extent).round()
}

/// Shortcut key of the legend row under window pixel (`x`, `y`).
fn legend_key_at(x: usize, y: usize, canvas_w: usize) -> Option<char> {
    if x < canvas_w || x >= canvas_w + LEGEND_W || y + 4 < LEGEND_TOP {
        return None;
    }
    let row = (y + 4 - LEGEND_TOP) / LEGEND_ROW_H;
    Command::FIXED.get(row).and_then(Command::shortcut)
}

/// 3×5 glyph, rows packed top to bottom, most significant bit first.
/// Letters are upper case only; unknown characters render as a dot.
fn glyph(c: char) -> u16 {
    match c.to_ascii_uppercase() {
        '0'  => 0x7B6F,
        '1'  => 0x2C97,
        '2'  => 0x62A7,
        '3'  => 0x628E,
        '4'  => 0x5BC9,
        '5'  => 0x798E,
        '6'  => 0x39EF,
        '7'  => 0x7292,
        '8'  => 0x7BEF,
        '9'  => 0x7BCE,
        'A'  => 0x2BED,
        'B'  => 0x6BAE,
        'C'  => 0x3923,
        'D'  => 0x6B6E,
        'E'  => 0x79A7,
        'F'  => 0x79A4,
        'G'  => 0x396B,
        'H'  => 0x5BED,
        'I'  => 0x7497,
        'J'  => 0x126A,
        'K'  => 0x5BAD,
        'L'  => 0x4927,
        'M'  => 0x5FED,
        'N'  => 0x6B6D,
        'O'  => 0x2B6A,
        'P'  => 0x6BA4,
        'Q'  => 0x2B73,
        'R'  => 0x6BAD,
        'S'  => 0x388E,
        'T'  => 0x7492,
        'U'  => 0x5B6F,
        'V'  => 0x5B6A,
        'W'  => 0x5BFD,
        'X'  => 0x5AAD,
        'Y'  => 0x5A92,
        'Z'  => 0x72A7,
        '.'  => 0x0002,
        ','  => 0x0014,
        ':'  => 0x0410,
        '-'  => 0x01C0,
        '='  => 0x0E38,
        '+'  => 0x05D0,
        '/'  => 0x12A4,
        '('  => 0x2922,
        ')'  => 0x224A,
        '@'  => 0x2BE3,
        '#'  => 0x5F7D,
        '\'' => 0x2400,
        '%'  => 0x52A5,
        '?'  => 0x6282,
        '!'  => 0x2482,
        '['  => 0x6926,
        ']'  => 0x324B,
        ' '  => 0x0000,
        _    => 0x0080,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_takes_the_short_way_round() {
        assert_eq!(unwrapped_delta(60.0, 100.0), -40.0);
        assert_eq!(unwrapped_delta(-40.0, 100.0), -40.0);
        assert_eq!(unwrapped_delta(30.0, 800.0), 30.0);
    }

    #[test]
    fn legend_rows_map_to_shortcuts() {
        assert_eq!(legend_key_at(810, LEGEND_TOP, 800), Some('F'));
        assert_eq!(legend_key_at(810, LEGEND_TOP + LEGEND_ROW_H, 800), Some('B'));
        assert_eq!(legend_key_at(810, LEGEND_TOP + 9 * LEGEND_ROW_H, 800), Some('O'));
        assert_eq!(legend_key_at(810, LEGEND_TOP + 10 * LEGEND_ROW_H, 800), None);
        assert_eq!(legend_key_at(400, LEGEND_TOP, 800), None);
        assert_eq!(legend_key_at(810, 5, 800), None);
    }

    #[test]
    fn glyphs_are_case_insensitive() {
        assert_eq!(glyph('a'), glyph('A'));
        assert_ne!(glyph('A'), glyph('B'));
        assert_eq!(glyph(' '), 0);
    }

    #[test]
    fn every_key_is_a_shortcut() {
        for (c, _) in KEYS {
            assert!(turtle_core::command::shortcut_command(c).is_some(), "{}", c);
        }
    }
}
