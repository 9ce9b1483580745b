//! Top-level application state machine.
//!
//! `AppState` owns the `Turtle`, the `Dispatcher`, the `Canvas` and the
//! `Speaker`.  It processes `InputEvent`s one at a time, fans the resulting
//! `TurtleEvent`s out to the canvas and the speaker, and is driven each frame
//! by either the window loop or the headless console loop.

use std::io::{self, BufReader};
use std::sync::mpsc;
use std::time::Duration;

use tracing::{debug, info};
use turtle_core::{Dispatch, Dispatcher, PhraseGrammar, Turtle, TurtleConfig, TurtleEvent};

use crate::canvas::Canvas;
use crate::error::AppError;
use crate::input::{ConsoleRecognizer, InputEvent, InputHub, WindowKeySource};
use crate::settings::Settings;
use crate::speaker::{SpeechConfig, Speaker};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub turtle:             TurtleConfig,
    /// Confidence given to console utterances without an `@confidence`.
    pub default_confidence: f32,
    pub speech:             SpeechConfig,
    /// Console only, no window.
    pub headless:           bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            turtle:             TurtleConfig::default(),
            default_confidence: 0.9,
            speech:             SpeechConfig::default(),
            headless:           false,
        }
    }
}

impl From<Settings> for AppConfig {
    fn from(s: Settings) -> Self {
        AppConfig {
            turtle:             s.turtle,
            default_confidence: s.recognizer.default_confidence,
            speech:             s.speech,
            headless:           false,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.turtle.validate()?;
        if !(0.0..=1.0).contains(&self.default_confidence) {
            return Err(AppError::Confidence(self.default_confidence));
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    turtle:     Turtle,
    dispatcher: Dispatcher,
    canvas:     Canvas,
    speaker:    Speaker,
    running:    bool,
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> Result<Self, AppError> {
        cfg.validate()?;

        let turtle = Turtle::try_new(&cfg.turtle)?;
        let canvas = Canvas::new(turtle.state(), *turtle.colors());
        info!(
            width = cfg.turtle.width,
            height = cfg.turtle.height,
            threshold = cfg.turtle.confidence_threshold,
            "turtle ready"
        );

        Ok(AppState {
            turtle,
            dispatcher: Dispatcher::new(cfg.turtle.confidence_threshold),
            canvas,
            speaker:    Speaker::spawn(&cfg.speech),
            running:    true,
        })
    }

    pub fn turtle(&self) -> &Turtle { &self.turtle }
    pub fn canvas(&self) -> &Canvas { &self.canvas }
    pub fn is_running(&self) -> bool { self.running }

    // ── process one InputEvent ───────────────────────────────────────────

    pub fn handle_input(&mut self, event: InputEvent) {
        let mut events: Vec<TurtleEvent> = Vec::new();

        match event {
            InputEvent::Recognized { token, confidence } => {
                let outcome = self.dispatcher.dispatch(&mut self.turtle, &token, confidence, &mut events);
                if outcome == Dispatch::Ignored {
                    debug!(%token, "empty token ignored");
                }
            }
            InputEvent::Shortcut(key) => {
                self.dispatcher.dispatch_shortcut(&mut self.turtle, key, &mut events);
            }
            InputEvent::Rejected { utterance } => {
                debug!(%utterance, "no phrase matched");
                self.canvas.unrecognized(&utterance);
            }
            InputEvent::DismissOverlay => self.canvas.dismiss_overlay(),
            InputEvent::Quit => {
                info!("input closed, shutting down");
                self.running = false;
            }
        }

        for ev in events {
            self.publish(ev);
        }
    }

    fn publish(&mut self, event: TurtleEvent) {
        match &event {
            TurtleEvent::Highlight(cmd) => self.speaker.say(cmd.token()),
            TurtleEvent::CloseRequested => {
                info!("close requested");
                self.running = false;
            }
            _ => {}
        }
        self.canvas.apply(&event);
    }

    // ── per-frame tick ───────────────────────────────────────────────────

    pub fn tick(&mut self) {
        self.canvas.tick();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run(): main event loop
// ════════════════════════════════════════════════════════════════════════════

pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    let mut app = AppState::new(&cfg)?;
    let grammar = PhraseGrammar::english(app.turtle().colors());
    let mut hub = InputHub::new();

    if cfg.headless {
        // ── Console only: one status line per utterance ──────────────────
        hub.register(ConsoleRecognizer {
            reader:             BufReader::new(io::stdin()),
            grammar,
            default_confidence: cfg.default_confidence,
            quit_on_eof:        true,
        })?;
        info!(sources = ?hub.sources().collect::<Vec<_>>(), "listening");

        println!("{}", app.canvas().status());
        while app.is_running() {
            if let Some(ev) = hub.next_timeout(Duration::from_millis(100)) {
                app.handle_input(ev);
                println!("{}", app.canvas().status());
            }
        }
        return Ok(());
    }

    // ── Window input channel ──────────────────────────────────────────────
    let (win_tx, win_rx) = mpsc::channel();
    hub.register(WindowKeySource { rx: win_rx })?;
    hub.register(ConsoleRecognizer {
        reader:             BufReader::new(io::stdin()),
        grammar,
        default_confidence: cfg.default_confidence,
        quit_on_eof:        false,
    })?;
    info!(sources = ?hub.sources().collect::<Vec<_>>(), "listening");

    // ── Visualizer (owns the window and the window input sender) ─────────
    let mut vis = Visualizer::new(win_tx, app.turtle().area())?;

    // ── Main loop ─────────────────────────────────────────────────────────
    while vis.is_open() && app.is_running() {
        // 1. Poll window input → WindowInput
        if !vis.poll_input() { break; }

        // 2. Drain input events in arrival order
        while let Some(ev) = hub.try_next() {
            app.handle_input(ev);
            if !app.is_running() { break; }
        }

        // 3. Per-frame logic
        app.tick();

        // 4. Render
        vis.render(app.canvas());
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use turtle_core::{Command, Point};

    fn make_app() -> AppState {
        AppState::new(&AppConfig { headless: true, ..AppConfig::default() }).unwrap()
    }

    fn heard(token: &str, confidence: f32) -> InputEvent {
        InputEvent::Recognized { token: token.into(), confidence }
    }

    #[test]
    fn shortcut_moves_turtle() {
        let mut app = make_app();
        app.handle_input(InputEvent::Shortcut('f'));
        assert_eq!(app.turtle().state().position, Point::new(400.0, 240.0));
        assert_eq!(app.canvas().position, app.turtle().state().position);
        assert_eq!(app.canvas().highlight, Some(Command::Forward));
        assert_eq!(app.canvas().segments.len(), 1);
    }

    #[test]
    fn unsure_recognition_is_reported_not_applied() {
        let mut app = make_app();
        let before = app.turtle().state().clone();
        app.handle_input(heard("LEFT", 0.2));
        assert_eq!(app.turtle().state(), &before);
        assert!(app.canvas().status().starts_with("not sure: LEFT"));
    }

    #[test]
    fn close_stops_the_app() {
        let mut app = make_app();
        app.handle_input(heard("CLOSE", 0.95));
        assert!(!app.is_running());
    }

    #[test]
    fn unsure_close_keeps_running() {
        let mut app = make_app();
        app.handle_input(heard("CLOSE", 0.5));
        assert!(app.is_running());
    }

    #[test]
    fn quit_stops_the_app() {
        let mut app = make_app();
        app.handle_input(InputEvent::Quit);
        assert!(!app.is_running());
    }

    #[test]
    fn rejected_utterance_shows_notice() {
        let mut app = make_app();
        app.handle_input(InputEvent::Rejected { utterance: "wiggle".into() });
        assert_eq!(app.canvas().status(), "didn't catch \"wiggle\"");
    }

    #[test]
    fn escape_dismisses_color_list() {
        let mut app = make_app();
        app.handle_input(InputEvent::Shortcut('C'));
        assert!(app.canvas().overlay.is_some());
        app.handle_input(InputEvent::DismissOverlay);
        assert!(app.canvas().overlay.is_none());
    }

    #[test]
    fn color_then_forward_draws_in_color() {
        let mut app = make_app();
        app.handle_input(heard("Blue", 0.9));
        app.handle_input(heard("FORWARD", 0.9));
        let seg = app.canvas().segments.back().unwrap();
        assert_eq!(seg.color, app.turtle().colors().lookup("Blue"));
    }

    #[test]
    fn bad_default_confidence_is_rejected() {
        let cfg = AppConfig { default_confidence: 1.5, ..AppConfig::default() };
        assert!(matches!(AppState::new(&cfg), Err(AppError::Confidence(_))));
    }

    #[test]
    fn bad_turtle_config_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.turtle.scale_factor = 1.0;
        assert!(matches!(AppState::new(&cfg), Err(AppError::Config(_))));
    }

    #[test]
    fn settings_carry_over() {
        let s = Settings::parse("[recognizer]\ndefault_confidence = 0.5\n[speech]\nenabled = true\n").unwrap();
        let cfg = AppConfig::from(s);
        assert_eq!(cfg.default_confidence, 0.5);
        assert!(cfg.speech.enabled);
        assert!(!cfg.headless);
    }
}
