//! speech_turtle: interactive entry point.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use speech_turtle::app::{run, AppConfig};
use speech_turtle::settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "speech_turtle", version, about = "Drive a drawing turtle by voice or keyboard")]
struct Cli {
    /// Settings file (default: <config dir>/speech_turtle/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minimum recognition confidence for a command to run
    #[arg(short, long)]
    threshold: Option<f32>,

    /// Play-area width
    #[arg(long)]
    width: Option<f64>,

    /// Play-area height
    #[arg(long)]
    height: Option<f64>,

    /// Confidence for typed utterances without an @suffix
    #[arg(long)]
    confidence: Option<f32>,

    /// Speak each accepted command
    #[arg(long)]
    speak: bool,

    /// Console only, no window
    #[arg(long)]
    headless: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let mut cfg = AppConfig::from(settings);
    if let Some(t) = cli.threshold  { cfg.turtle.confidence_threshold = t; }
    if let Some(w) = cli.width      { cfg.turtle.width = w; }
    if let Some(h) = cli.height     { cfg.turtle.height = h; }
    if let Some(c) = cli.confidence { cfg.default_confidence = c; }
    if cli.speak                    { cfg.speech.enabled = true; }
    cfg.headless = cli.headless;

    if !cfg.headless {
        eprintln!();
        eprintln!("  Speech Turtle");
        eprintln!("  Say (type) a command in this console, e.g. \"forward\", \"turn left\", \"red\".");
        eprintln!("  Append @0.4 to simulate an unsure recognition.");
        eprintln!();
    }

    info!(headless = cfg.headless, speech = cfg.speech.enabled, "starting");
    if let Err(e) = run(cfg) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
