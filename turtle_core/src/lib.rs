//! # turtle_core
//!
//! Command interpretation and state machine for a voice-driven turtle.
//! Nothing here knows about windows, microphones or threads: an input
//! collaborator hands a `(token, confidence)` pair to the [`Dispatcher`],
//! which gates it and applies it to the [`Turtle`], reporting the outcome
//! as [`TurtleEvent`]s for whoever renders or speaks.
//!
//! ## Vocabulary
//!
//! | Token | Key | Effect |
//! |---|---|---|
//! | `FORWARD` | `F` | Move one step along the heading (wraps at the edges) |
//! | `BACK` | `B` | Move one step against the heading |
//! | `LEFT` | `L` | Quarter turn anticlockwise |
//! | `RIGHT` | `R` | Quarter turn clockwise |
//! | `PENDOWN` | `D` | Start drawing |
//! | `PENUP` | `U` | Stop drawing |
//! | `BIGGER` | `G` | Scale, step and pen thickness × 1.5 |
//! | `SMALLER` | `S` | Scale, step and pen thickness ÷ 1.5 |
//! | `COLORS` | `C` | Ask the shell to show the known colors |
//! | `CLOSE` | `O` | Ask the shell to exit |
//! | anything else | — | Pen color by name (unknown → black) |
//!
//! ## Example
//!
//! ```rust
//! use turtle_core::{Dispatcher, Turtle, TurtleConfig, TurtleEvent};
//!
//! let cfg = TurtleConfig::default();
//! let dispatcher = Dispatcher::new(cfg.confidence_threshold);
//! let mut turtle = Turtle::new(&cfg);
//! let mut events: Vec<TurtleEvent> = Vec::new();
//!
//! dispatcher.dispatch(&mut turtle, "Red", 0.95, &mut events);
//! dispatcher.dispatch(&mut turtle, "FORWARD", 0.95, &mut events);
//! assert!(events.iter().any(|e| matches!(e, TurtleEvent::Segment(_))));
//! ```

pub mod colors;
pub mod command;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod grammar;
pub mod heading;
pub mod turtle;

pub use colors::{ColorTable, Rgb, COLOR_TABLE_VERSION};
pub use command::Command;
pub use config::TurtleConfig;
pub use dispatcher::{Dispatch, Dispatcher, EventSink, TurtleEvent, FULL_CONFIDENCE};
pub use error::ConfigError;
pub use grammar::PhraseGrammar;
pub use heading::Heading;
pub use turtle::{DrawSegment, PlayArea, Point, Turtle, TurtleState};
