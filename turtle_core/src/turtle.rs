//! Turtle state machine.
//!
//! [`Turtle`] exclusively owns a [`TurtleState`] and applies one
//! [`Command`] at a time.  Movement wraps toroidally around the play area;
//! BIGGER/SMALLER rescale step and pen thickness in lockstep with `scale`.

use crate::colors::{ColorTable, Rgb};
use crate::command::Command;
use crate::config::TurtleConfig;
use crate::error::ConfigError;
use crate::heading::{Heading, TURN_LEFT, TURN_RIGHT};

// ════════════════════════════════════════════════════════════════════════════
// Geometry
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self { Point { x, y } }
}

/// Width × height of the toroidal play area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayArea {
    pub width:  f64,
    pub height: f64,
}

impl PlayArea {
    pub fn center(&self) -> Point { Point::new(self.width / 2.0, self.height / 2.0) }

    pub fn contains(&self, p: Point) -> bool {
        (0.0..self.width).contains(&p.x) && (0.0..self.height).contains(&p.y)
    }

    /// Bring an arbitrary point back into the area.
    pub fn wrap(&self, p: Point) -> Point {
        Point::new(wrap(p.x, self.width), wrap(p.y, self.height))
    }
}

/// Largest step BIGGER will grow to.  Keeps `extent + pos ± step` finite.
pub const MAX_STEP: f64 = f64::MAX / 4.0;

/// Remainder of `value / extent` in `[0, extent)`.
///
/// Callers pass `extent + pos ± step`, so for any step no larger than the
/// extent the dividend is non-negative and this is plain `%`.  Larger
/// (heavily scaled) steps fall back to the Euclidean remainder.
pub fn wrap(value: f64, extent: f64) -> f64 {
    let r = value % extent;
    if r >= 0.0 {
        return r;
    }
    let r = r + extent;
    // a tiny negative remainder can round up to exactly `extent`
    if r >= extent { 0.0 } else { r }
}

// ════════════════════════════════════════════════════════════════════════════
// State and outputs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct TurtleState {
    pub position:      Point,
    pub heading:       Heading,
    pub pen_down:      bool,
    pub pen_color:     Rgb,
    pub scale:         f64,
    pub step_size:     f64,
    pub pen_thickness: f64,
}

/// A line drawn by one FORWARD/BACK with the pen down.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawSegment {
    pub from:      Point,
    pub to:        Point,
    pub color:     Rgb,
    pub thickness: f64,
}

/// Requests for the hosting shell that carry no state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    ShowColors,
    Close,
}

/// Result of applying one command.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Applied {
    pub segment: Option<DrawSegment>,
    pub signal:  Option<Signal>,
}

// ════════════════════════════════════════════════════════════════════════════
// Turtle
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct Turtle {
    state:        TurtleState,
    area:         PlayArea,
    scale_factor: f64,
    colors:       ColorTable,
}

impl Turtle {
    /// A turtle at the centre of the play area, facing up, at scale 1.
    pub fn new(cfg: &TurtleConfig) -> Self {
        Turtle::with_colors(cfg, ColorTable::known())
    }

    /// Like [`Turtle::new`], but rejects a config that fails
    /// [`TurtleConfig::validate`].
    pub fn try_new(cfg: &TurtleConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Turtle::new(cfg))
    }

    /// Unchecked: `cfg` must already have passed [`TurtleConfig::validate`],
    /// otherwise a zero-sized area yields NaN positions.
    pub fn with_colors(cfg: &TurtleConfig, colors: ColorTable) -> Self {
        let area = PlayArea { width: cfg.width, height: cfg.height };
        Turtle {
            state: TurtleState {
                position:      area.center(),
                heading:       Heading::Up,
                pen_down:      cfg.pen_down,
                pen_color:     Rgb::BLACK,
                scale:         1.0,
                step_size:     cfg.step,
                pen_thickness: cfg.pen_thickness,
            },
            area,
            scale_factor: cfg.scale_factor,
            colors,
        }
    }

    pub fn state(&self) -> &TurtleState { &self.state }
    pub fn area(&self)  -> PlayArea     { self.area }
    pub fn colors(&self) -> &ColorTable { &self.colors }

    /// Teleport the turtle (wrapping into the play area) and set its heading.
    pub fn place(&mut self, position: Point, heading: Heading) {
        self.state.position = self.area.wrap(position);
        self.state.heading = heading;
    }

    /// Apply exactly one command.
    pub fn apply(&mut self, command: &Command) -> Applied {
        let mut out = Applied::default();
        match command {
            Command::Forward => out.segment = self.travel(1.0),
            Command::Back    => out.segment = self.travel(-1.0),
            Command::Left    => self.state.heading = self.state.heading.rotate(TURN_LEFT),
            Command::Right   => self.state.heading = self.state.heading.rotate(TURN_RIGHT),
            Command::PenDown => self.state.pen_down = true,
            Command::PenUp   => self.state.pen_down = false,
            Command::Bigger  => self.rescale(self.scale_factor),
            Command::Smaller => self.rescale(self.scale_factor.recip()),
            Command::Colors  => out.signal = Some(Signal::ShowColors),
            Command::Close   => out.signal = Some(Signal::Close),
            Command::Color(name) => self.state.pen_color = self.colors.lookup(name),
        }
        out
    }

    /// Move one step along (`sign` = 1) or against (`sign` = -1) the heading.
    fn travel(&mut self, sign: f64) -> Option<DrawSegment> {
        let d = self.state.heading.displacement();
        let step = self.state.step_size * sign;
        let from = self.state.position;
        let to = Point::new(
            wrap(self.area.width  + from.x + step * d.dx, self.area.width),
            wrap(self.area.height + from.y + step * d.dy, self.area.height),
        );
        self.state.position = to;

        self.state.pen_down.then(|| DrawSegment {
            from,
            to,
            color:     self.state.pen_color,
            thickness: self.state.pen_thickness,
        })
    }

    /// Scale, step and thickness change together or not at all; growth
    /// stops once the step would pass [`MAX_STEP`].
    fn rescale(&mut self, factor: f64) {
        let scale     = self.state.scale * factor;
        let step      = self.state.step_size * factor;
        let thickness = self.state.pen_thickness * factor;
        if !(scale.is_finite() && thickness.is_finite() && step <= MAX_STEP) {
            return;
        }
        self.state.scale         = scale;
        self.state.step_size     = step;
        self.state.pen_thickness = thickness;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
