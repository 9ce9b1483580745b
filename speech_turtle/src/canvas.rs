//! Canvas state, i.e. what the renderer draws.
//!
//! The canvas is a consumer of [`TurtleEvent`]s: it mirrors the turtle's
//! pose and pen, accumulates drawn segments, tracks which command is
//! highlighted in the legend, and animates the color list overlay.  It
//! never touches the turtle itself.

use std::collections::VecDeque;

use turtle_core::{
    ColorTable, Command, DrawSegment, EventSink, Heading, Point, Rgb, TurtleEvent, TurtleState,
};

/// Oldest segments are dropped beyond this many.
pub const MAX_SEGMENTS: usize = 20_000;

// ════════════════════════════════════════════════════════════════════════════
// ColorOverlay: the non-modal list shown by COLORS
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct ColorOverlay {
    pub entries:  Vec<(&'static str, Rgb)>,
    /// Animation: how far the overlay has slid in (0.0–1.0).
    pub slide_in: f32,
}

impl ColorOverlay {
    pub fn new(colors: &ColorTable) -> Self {
        let entries = colors.names().map(|n| (n, colors.lookup(n))).collect();
        ColorOverlay { entries, slide_in: 0.0 }
    }

    pub fn tick(&mut self) {
        if self.slide_in < 1.0 {
            self.slide_in = (self.slide_in + 0.1).min(1.0);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Canvas
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct Canvas {
    pub segments:  VecDeque<DrawSegment>,
    pub position:  Point,
    pub heading:   Heading,
    pub pen_down:  bool,
    pub pen_color: Rgb,
    pub scale:     f64,
    /// Last accepted command, shown highlighted in the legend.
    pub highlight: Option<Command>,
    pub overlay:   Option<ColorOverlay>,
    /// Last rejection, shown in the status bar until the next command.
    pub notice:    Option<String>,
    colors:        ColorTable,
}

impl Canvas {
    pub fn new(state: &TurtleState, colors: ColorTable) -> Self {
        Canvas {
            segments:  VecDeque::new(),
            position:  state.position,
            heading:   state.heading,
            pen_down:  state.pen_down,
            pen_color: state.pen_color,
            scale:     state.scale,
            highlight: None,
            overlay:   None,
            notice:    None,
            colors,
        }
    }

    pub fn apply(&mut self, event: &TurtleEvent) {
        match event {
            TurtleEvent::ClearHighlight => {
                self.highlight = None;
                self.notice = None;
            }
            TurtleEvent::Rejected { token, confidence } => {
                self.notice = Some(format!("not sure: {} ({:.2})", token, confidence));
            }
            TurtleEvent::Highlight(cmd)              => self.highlight = Some(cmd.clone()),
            TurtleEvent::Moved { position }          => self.position = *position,
            TurtleEvent::Turned { heading }          => self.heading = *heading,
            TurtleEvent::PenChanged { down }         => self.pen_down = *down,
            TurtleEvent::PenColorChanged { color }   => self.pen_color = *color,
            TurtleEvent::Rescaled { scale }          => self.scale = *scale,
            TurtleEvent::Segment(seg) => {
                if self.segments.len() >= MAX_SEGMENTS {
                    self.segments.pop_front();
                }
                self.segments.push_back(seg.clone());
            }
            TurtleEvent::ShowColors => self.toggle_overlay(),
            TurtleEvent::CloseRequested => {}
        }
    }

    /// A heard utterance that matched nothing in the grammar.
    pub fn unrecognized(&mut self, utterance: &str) {
        self.highlight = None;
        self.notice = Some(format!("didn't catch \"{}\"", utterance));
    }

    fn toggle_overlay(&mut self) {
        self.overlay = match self.overlay.take() {
            Some(_) => None,
            None    => Some(ColorOverlay::new(&self.colors)),
        };
    }

    pub fn dismiss_overlay(&mut self) { self.overlay = None; }

    /// Advance animations by one frame.
    pub fn tick(&mut self) {
        if let Some(o) = &mut self.overlay {
            o.tick();
        }
    }

    /// One-line summary for the status bar.
    pub fn status(&self) -> String {
        if let Some(n) = &self.notice {
            return n.clone();
        }
        let color = self
            .colors
            .name_of(self.pen_color)
            .map(str::to_string)
            .unwrap_or_else(|| self.pen_color.to_string());
        format!(
            "x={:.0} y={:.0}  heading {}  pen {}  color {}  scale {:.2}",
            self.position.x,
            self.position.y,
            self.heading.degrees(),
            if self.pen_down { "down" } else { "up" },
            color,
            self.scale,
        )
    }
}

impl EventSink for Canvas {
    fn emit(&mut self, event: TurtleEvent) { self.apply(&event); }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
