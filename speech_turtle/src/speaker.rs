//! Spoken echo of accepted commands.
//!
//! Speech runs on its own thread fed by a channel, so a long utterance
//! never holds up the event loop (a CLOSE right after COLORS still closes
//! immediately).  Output only: nothing said here feeds back into the turtle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

// ════════════════════════════════════════════════════════════════════════════
// SpeechConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub enabled:          bool,
    /// Pace used to estimate how long an utterance takes.
    pub words_per_minute: u32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        SpeechConfig { enabled: false, words_per_minute: 160 }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SpeakerCommand: sent to the speech thread
// ════════════════════════════════════════════════════════════════════════════

pub enum SpeakerCommand {
    Say(String),
    /// Terminate the thread.
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// Voice: abstraction over the synthesis backend
// ════════════════════════════════════════════════════════════════════════════

trait Voice: Send {
    fn speak(&mut self, text: &str);
}

/// Writes each utterance to the log and takes as long as saying it would.
struct LogVoice {
    words_per_minute: u32,
}

impl Voice for LogVoice {
    fn speak(&mut self, text: &str) {
        info!(target: "speech", "{}", text);
        thread::sleep(Duration::from_millis(utterance_ms(text, self.words_per_minute)));
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Speaker
// ════════════════════════════════════════════════════════════════════════════

/// Handle to the speech thread.  A disabled speaker drops every request.
pub struct Speaker {
    tx:     Option<Sender<SpeakerCommand>>,
    stop:   Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Speaker {
    pub fn disabled() -> Self {
        Speaker { tx: None, stop: Arc::new(AtomicBool::new(false)), handle: None }
    }

    /// Start the speech thread if `cfg.enabled`.  A thread that fails to
    /// start degrades to a disabled speaker with a warning.
    pub fn spawn(cfg: &SpeechConfig) -> Self {
        if !cfg.enabled {
            return Speaker::disabled();
        }

        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let voice = LogVoice { words_per_minute: cfg.words_per_minute };

        match thread::Builder::new()
            .name("speaker".into())
            .spawn(move || speech_thread(rx, Box::new(voice), flag))
        {
            Ok(handle) => Speaker { tx: Some(tx), stop, handle: Some(handle) },
            Err(e) => {
                warn!(error = %e, "speech thread failed to start; speech disabled");
                Speaker::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool { self.tx.is_some() }

    /// Queue `text` to be spoken.  Never blocks.
    pub fn say(&self, text: &str) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(SpeakerCommand::Say(text.to_string()));
        }
    }
}

impl Drop for Speaker {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(SpeakerCommand::Quit);
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn speech_thread(rx: Receiver<SpeakerCommand>, mut voice: Box<dyn Voice>, stop: Arc<AtomicBool>) {
    for cmd in rx {
        if stop.load(Ordering::Relaxed) { return; }
        match cmd {
            SpeakerCommand::Say(text) => voice.speak(&text),
            SpeakerCommand::Quit      => return,
        }
    }
}

/// Estimated speaking time for `text` at `wpm` words per minute.
fn utterance_ms(text: &str, wpm: u32) -> u64 {
    let words = text.split_whitespace().count().max(1) as u64;
    (words * 60_000 / u64::from(wpm.max(1))).max(150)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl Voice for Recorder {
        fn speak(&mut self, text: &str) {
            self.0.lock().unwrap().push(text.to_string());
        }
    }

    #[test]
    fn one_word_at_120_wpm() {
        assert_eq!(utterance_ms("forward", 120), 500);
    }

    #[test]
    fn several_words() {
        assert_eq!(utterance_ms("turn left now", 180), 1000);
    }

    #[test]
    fn short_utterances_have_a_floor() {
        assert_eq!(utterance_ms("go", 1000), 150);
        assert_eq!(utterance_ms("", 60), 1000);
    }

    #[test]
    fn disabled_speaker_ignores_requests() {
        let s = Speaker::spawn(&SpeechConfig::default());
        assert!(!s.is_enabled());
        s.say("FORWARD");
    }

    #[test]
    fn speech_thread_speaks_in_order_until_quit() {
        let spoken = Arc::new(Mutex::new(Vec::new()));
        let (tx, rx) = mpsc::channel();
        tx.send(SpeakerCommand::Say("FORWARD".into())).unwrap();
        tx.send(SpeakerCommand::Say("LEFT".into())).unwrap();
        tx.send(SpeakerCommand::Quit).unwrap();
        tx.send(SpeakerCommand::Say("never".into())).unwrap();

        speech_thread(rx, Box::new(Recorder(Arc::clone(&spoken))), Arc::new(AtomicBool::new(false)));
        assert_eq!(*spoken.lock().unwrap(), ["FORWARD", "LEFT"]);
    }
}
