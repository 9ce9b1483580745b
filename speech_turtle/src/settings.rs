//! Optional TOML settings file.
//!
//! ```toml
//! [turtle]
//! width = 800
//! height = 600
//! confidence_threshold = 0.7
//!
//! [recognizer]
//! default_confidence = 0.9
//!
//! [speech]
//! enabled = true
//! words_per_minute = 160
//! ```
//!
//! Every section and key is optional.  Without `--config`, the file is
//! looked up under the platform config directory and silently skipped when
//! absent.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use turtle_core::TurtleConfig;

use crate::error::AppError;
use crate::speaker::SpeechConfig;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub turtle: TurtleConfig,
    #[serde(default)]
    pub recognizer: RecognizerSettings,
    #[serde(default)]
    pub speech: SpeechConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RecognizerSettings {
    /// Confidence assigned to typed utterances that carry no `@confidence`.
    pub default_confidence: f32,
}

impl Default for RecognizerSettings {
    fn default() -> Self { RecognizerSettings { default_confidence: 0.9 } }
}

impl Settings {
    /// Load from `path`, or from [`Settings::default_path`] when `None`.
    ///
    /// An explicit path must exist; the default one may be missing.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None    => (Self::default_path(), false),
        };

        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(AppError::SettingsIo { path, source }),
        };

        debug!(path = %path.display(), "loading settings");
        Self::parse(&content).map_err(|source| AppError::SettingsParse { path, source })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("speech_turtle")
            .join("config.toml")
    }
}
