//! Input sources: recognizer and window keyboard.
//!
//! Every source runs on its own thread and delivers [`InputEvent`]s over a
//! single `mpsc` channel owned by the [`InputHub`].  The application loop is
//! the only consumer, so commands from all sources are applied one at a
//! time in arrival order.  Consumers don't need to know which source an
//! event came from.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};
use turtle_core::PhraseGrammar;

use crate::error::AppError;

// ════════════════════════════════════════════════════════════════════════════
// InputEvent
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// The recognizer matched a phrase; `token` is its semantic value.
    Recognized { token: String, confidence: f32 },
    /// Speech was heard but matched no phrase.
    Rejected { utterance: String },
    /// Keyboard shortcut or clicked legend entry (always full confidence).
    Shortcut(char),
    /// Close the color list overlay.
    DismissOverlay,
    /// The window closed or the console ran out of input.
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// InputSource trait + hub
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`InputEvent`]s over a channel.
///
/// `run` should return promptly once `stop` is set or `tx` is disconnected.
pub trait InputSource: Send + 'static {
    fn name(&self) -> &'static str;
    fn run(self: Box<Self>, tx: Sender<InputEvent>, stop: Arc<AtomicBool>);
}

struct Registration {
    name: &'static str,
    stop: Arc<AtomicBool>,
}

/// Owns the shared event queue and every registered source.
///
/// Dropping the hub unregisters all sources: each is told to stop, and the
/// receiving end goes away so any pending send fails.
pub struct InputHub {
    tx:            Sender<InputEvent>,
    rx:            Receiver<InputEvent>,
    registrations: Vec<Registration>,
}

impl Default for InputHub {
    fn default() -> Self { InputHub::new() }
}

impl InputHub {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        InputHub { tx, rx, registrations: Vec::new() }
    }

    /// Spawn `source` on its own thread, feeding the shared queue.
    pub fn register<S: InputSource>(&mut self, source: S) -> Result<(), AppError> {
        let name = source.name();
        let stop = Arc::new(AtomicBool::new(false));
        let tx = self.tx.clone();
        let flag = Arc::clone(&stop);

        thread::Builder::new()
            .name(format!("input-{name}"))
            .spawn(move || Box::new(source).run(tx, flag))
            .map_err(|source| AppError::Spawn { name, source })?;

        info!(source = name, "input source registered");
        self.registrations.push(Registration { name, stop });
        Ok(())
    }

    pub fn sources(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.registrations.iter().map(|r| r.name)
    }

    /// Next queued event without blocking.
    pub fn try_next(&self) -> Option<InputEvent> {
        match self.rx.try_recv() {
            Ok(ev) => Some(ev),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for the next event.
    pub fn next_timeout(&self, timeout: Duration) -> Option<InputEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(ev) => Some(ev),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Drop for InputHub {
    fn drop(&mut self) {
        for reg in &self.registrations {
            reg.stop.store(true, Ordering::Relaxed);
            info!(source = reg.name, "input source unregistered");
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ConsoleRecognizer: typed utterances stand in for the speech engine
// ════════════════════════════════════════════════════════════════════════════

/// Reads one utterance per line and matches it against a [`PhraseGrammar`].
///
/// A line may end with `@<confidence>` (e.g. `turn left @0.4`) to simulate
/// an uncertain recognition; otherwise `default_confidence` is used.
pub struct ConsoleRecognizer<R> {
    pub reader:             R,
    pub grammar:            PhraseGrammar,
    pub default_confidence: f32,
    /// Send [`InputEvent::Quit`] at end of input.
    pub quit_on_eof:        bool,
}

impl<R: BufRead + Send + 'static> InputSource for ConsoleRecognizer<R> {
    fn name(&self) -> &'static str { "console-recognizer" }

    fn run(self: Box<Self>, tx: Sender<InputEvent>, stop: Arc<AtomicBool>) {
        let ConsoleRecognizer { reader, grammar, default_confidence, quit_on_eof } = *self;

        for line in reader.lines() {
            if stop.load(Ordering::Relaxed) { return; }
            let line = match line {
                Ok(l)  => l,
                Err(e) => {
                    warn!(error = %e, "console read failed");
                    break;
                }
            };

            let (utterance, confidence) = parse_utterance(&line, default_confidence);
            if utterance.is_empty() { continue; }

            let event = match grammar.recognize(utterance) {
                Some(token) => InputEvent::Recognized { token: token.to_string(), confidence },
                None        => InputEvent::Rejected { utterance: utterance.to_string() },
            };
            debug!(?event, "utterance");
            if tx.send(event).is_err() { return; }
        }

        if quit_on_eof && !stop.load(Ordering::Relaxed) {
            let _ = tx.send(InputEvent::Quit);
        }
    }
}

/// Split `"<phrase> @<confidence>"`.  A missing or unparsable suffix leaves
/// the whole line as the phrase with `default` confidence; parsed values are
/// clamped to `[0, 1]`.
pub fn parse_utterance(line: &str, default: f32) -> (&str, f32) {
    let line = line.trim();
    if let Some((phrase, conf)) = line.rsplit_once('@') {
        if let Ok(c) = conf.trim().parse::<f32>() {
            if c.is_finite() {
                return (phrase.trim(), c.clamp(0.0, 1.0));
            }
        }
    }
    (line, default)
}

// ════════════════════════════════════════════════════════════════════════════
// WindowKeySource: keyboard and pointer input from the visualizer window
// ════════════════════════════════════════════════════════════════════════════

/// Raw input from the window's event polling.
#[derive(Clone, Debug, PartialEq)]
pub enum WindowInput {
    /// Shortcut key pressed, or legend entry clicked.
    Key(char),
    Escape,
    Closed,
}

/// Translates [`WindowInput`] from the visualizer into [`InputEvent`]s.
/// This decouples the window event loop from the dispatch path.
pub struct WindowKeySource {
    pub rx: Receiver<WindowInput>,
}

impl InputSource for WindowKeySource {
    fn name(&self) -> &'static str { "window-keys" }

    fn run(self: Box<Self>, tx: Sender<InputEvent>, stop: Arc<AtomicBool>) {
        for input in self.rx {
            if stop.load(Ordering::Relaxed) { return; }
            let event = match input {
                WindowInput::Key(c)  => InputEvent::Shortcut(c),
                WindowInput::Escape  => InputEvent::DismissOverlay,
                WindowInput::Closed  => {
                    let _ = tx.send(InputEvent::Quit);
                    return;
                }
            };
            if tx.send(event).is_err() { return; }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use turtle_core::ColorTable;

    fn drain(hub: &InputHub) -> Vec<InputEvent> {
        let mut out = Vec::new();
        while let Some(ev) = hub.next_timeout(Duration::from_secs(2)) {
            let quit = ev == InputEvent::Quit;
            out.push(ev);
            if quit { break; }
        }
        out
    }

    #[test]
    fn utterance_with_confidence() {
        assert_eq!(parse_utterance("turn left @0.4", 0.9), ("turn left", 0.4));
        assert_eq!(parse_utterance("  forward ", 0.9), ("forward", 0.9));
        assert_eq!(parse_utterance("forward @7", 0.9), ("forward", 1.0));
        assert_eq!(parse_utterance("me@home", 0.9), ("me@home", 0.9));
    }

    #[test]
    fn console_recognizer_emits_tokens_then_quit() {
        let script = "forward\nturn right @0.25\n\nwiggle\nred\n";
        let mut hub = InputHub::new();
        hub.register(ConsoleRecognizer {
            reader:             Cursor::new(script.as_bytes().to_vec()),
            grammar:            PhraseGrammar::english(&ColorTable::known()),
            default_confidence: 0.9,
            quit_on_eof:        true,
        })
        .unwrap();

        let events = drain(&hub);
        assert_eq!(
            events,
            vec![
                InputEvent::Recognized { token: "FORWARD".into(), confidence: 0.9 },
                InputEvent::Recognized { token: "RIGHT".into(), confidence: 0.25 },
                InputEvent::Rejected { utterance: "wiggle".into() },
                InputEvent::Recognized { token: "Red".into(), confidence: 0.9 },
                InputEvent::Quit,
            ]
        );
    }

    #[test]
    fn window_keys_translate() {
        let (win_tx, win_rx) = mpsc::channel();
        let mut hub = InputHub::new();
        hub.register(WindowKeySource { rx: win_rx }).unwrap();

        win_tx.send(WindowInput::Key('F')).unwrap();
        win_tx.send(WindowInput::Escape).unwrap();
        win_tx.send(WindowInput::Closed).unwrap();

        assert_eq!(
            drain(&hub),
            vec![InputEvent::Shortcut('F'), InputEvent::DismissOverlay, InputEvent::Quit]
        );
    }

    #[test]
    fn sources_are_listed() {
        let (_win_tx, win_rx) = mpsc::channel();
        let mut hub = InputHub::new();
        hub.register(WindowKeySource { rx: win_rx }).unwrap();
        assert_eq!(hub.sources().collect::<Vec<_>>(), ["window-keys"]);
    }
}
