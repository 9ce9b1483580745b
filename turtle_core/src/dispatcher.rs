//! Confidence-gated command dispatch.
//!
//! Every input path (recognizer, keyboard shortcut, clicked control) goes
//! through [`Dispatcher::dispatch`], so the threshold is enforced in exactly
//! one place.  Keyboard and click paths use [`Dispatcher::dispatch_shortcut`],
//! which dispatches at [`FULL_CONFIDENCE`].
//!
//! The dispatcher holds no turtle state; it borrows the [`Turtle`] for the
//! duration of one call and reports what happened through an [`EventSink`].

use std::sync::mpsc::Sender;

use tracing::{debug, trace};

use crate::colors::Rgb;
use crate::command::{shortcut_command, Command};
use crate::heading::Heading;
use crate::turtle::{DrawSegment, Point, Signal, Turtle};

/// Confidence attached to keyboard and pointer input.
pub const FULL_CONFIDENCE: f32 = 1.0;

// ════════════════════════════════════════════════════════════════════════════
// TurtleEvent
// ════════════════════════════════════════════════════════════════════════════

/// Everything the core reports to its collaborators.
#[derive(Clone, Debug, PartialEq)]
pub enum TurtleEvent {
    /// Drop any "last recognized command" highlight.  Sent for every
    /// non-empty token, accepted or not.
    ClearHighlight,
    /// A token arrived below the confidence threshold.
    Rejected { token: String, confidence: f32 },
    /// The command about to be executed.
    Highlight(Command),
    Moved { position: Point },
    Turned { heading: Heading },
    PenChanged { down: bool },
    PenColorChanged { color: Rgb },
    Rescaled { scale: f64 },
    Segment(DrawSegment),
    ShowColors,
    CloseRequested,
}

// ════════════════════════════════════════════════════════════════════════════
// EventSink
// ════════════════════════════════════════════════════════════════════════════

/// Receiver of [`TurtleEvent`]s (renderer, speaker, test harness).
pub trait EventSink {
    fn emit(&mut self, event: TurtleEvent);
}

impl EventSink for Vec<TurtleEvent> {
    fn emit(&mut self, event: TurtleEvent) { self.push(event); }
}

impl EventSink for Sender<TurtleEvent> {
    fn emit(&mut self, event: TurtleEvent) {
        // a closed receiver means the consumer has shut down
        let _ = self.send(event);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Dispatcher
// ════════════════════════════════════════════════════════════════════════════

/// Outcome of one dispatch call.
#[derive(Clone, Debug, PartialEq)]
pub enum Dispatch {
    /// Empty token (or unknown shortcut key); nothing happened.
    Ignored,
    /// Below the confidence threshold; state untouched.
    Rejected,
    Executed(Command),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dispatcher {
    threshold: f32,
}

impl Dispatcher {
    pub fn new(threshold: f32) -> Self { Dispatcher { threshold } }

    pub fn threshold(&self) -> f32 { self.threshold }

    pub fn dispatch(
        &self,
        turtle:     &mut Turtle,
        token:      &str,
        confidence: f32,
        sink:       &mut impl EventSink,
    ) -> Dispatch {
        let token = token.trim();
        let command = match Command::parse(token) {
            Some(c) => c,
            None    => return Dispatch::Ignored,
        };

        sink.emit(TurtleEvent::ClearHighlight);

        if confidence.is_nan() || confidence < self.threshold {
            debug!(token, confidence, threshold = self.threshold, "below confidence threshold");
            sink.emit(TurtleEvent::Rejected { token: token.to_string(), confidence });
            return Dispatch::Rejected;
        }

        debug!(%command, confidence, "executing");
        sink.emit(TurtleEvent::Highlight(command.clone()));
        execute(turtle, &command, sink);
        Dispatch::Executed(command)
    }

    /// Dispatch the command bound to a keyboard shortcut at full confidence.
    pub fn dispatch_shortcut(
        &self,
        turtle: &mut Turtle,
        key:    char,
        sink:   &mut impl EventSink,
    ) -> Dispatch {
        match shortcut_command(key) {
            Some(cmd) => self.dispatch(turtle, cmd.token(), FULL_CONFIDENCE, sink),
            None => {
                trace!(%key, "no shortcut bound");
                Dispatch::Ignored
            }
        }
    }
}

/// Apply `command` and translate the transition into events.
fn execute(turtle: &mut Turtle, command: &Command, sink: &mut impl EventSink) {
    let applied = turtle.apply(command);
    let state = turtle.state();

    match command {
        Command::Forward | Command::Back => {
            if let Some(seg) = applied.segment {
                sink.emit(TurtleEvent::Segment(seg));
            }
            sink.emit(TurtleEvent::Moved { position: state.position });
        }
        Command::Left | Command::Right => {
            sink.emit(TurtleEvent::Turned { heading: state.heading });
        }
        Command::PenDown | Command::PenUp => {
            sink.emit(TurtleEvent::PenChanged { down: state.pen_down });
        }
        Command::Bigger | Command::Smaller => {
            sink.emit(TurtleEvent::Rescaled { scale: state.scale });
        }
        Command::Color(_) => {
            sink.emit(TurtleEvent::PenColorChanged { color: state.pen_color });
        }
        Command::Colors | Command::Close => {}
    }

    match applied.signal {
        Some(Signal::ShowColors) => sink.emit(TurtleEvent::ShowColors),
        Some(Signal::Close)      => sink.emit(TurtleEvent::CloseRequested),
        None => {}
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
