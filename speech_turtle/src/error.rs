use std::io;
use std::path::PathBuf;

use thiserror::Error;
use turtle_core::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot read settings file {path}: {source}")]
    SettingsIo {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed settings file {path}: {source}")]
    SettingsParse {
        path:   PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("recognizer confidence must lie in [0, 1], got {0}")]
    Confidence(f32),

    #[error("failed to start {name} thread: {source}")]
    Spawn {
        name:   &'static str,
        #[source]
        source: io::Error,
    },

    #[error("window: {0}")]
    Window(String),
}
