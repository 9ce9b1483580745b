//! # speech_turtle
//!
//! Interactive shell around [`turtle_core`]: recognized phrases and keyboard
//! shortcuts drive the turtle, a `minifb` window draws its trail, and an
//! optional speaker echoes every accepted command.
//!
//! ## Sources
//!
//! | Source | Delivers |
//! |---|---|
//! | Console recognizer | One utterance per line, optional `@confidence` suffix |
//! | Window keys | Shortcut keys, legend clicks, `Esc` |
//!
//! ## Window keys
//!
//! | Key | Command |
//! |---|---|
//! | `F` / `B` | FORWARD / BACK |
//! | `L` / `R` | LEFT / RIGHT |
//! | `D` / `U` | PENDOWN / PENUP |
//! | `G` / `S` | BIGGER / SMALLER |
//! | `C` | COLORS (toggle the color list) |
//! | `O` | CLOSE |
//! | `Esc` | Hide the color list |
//!
//! Shortcuts always dispatch at full confidence.

pub mod app;
pub mod canvas;
pub mod error;
pub mod input;
pub mod settings;
pub mod speaker;
pub mod visualizer;
