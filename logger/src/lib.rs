use std::path::Path;

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

// <----------------- DEFAULTS ----------------- >
pub const STDERR_APPENDER: &str = "stderr";

// Time, level, message. Colour only applies when stderr is a terminal.
pub const STDERR_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l:<5})} {m}{n}";

// <----------------- SETUP ----------------- >

// Install the global logger. A log4rs YAML file takes precedence; without
// one, everything at `level` and above goes to stderr.
pub fn setup_logger(level: LevelFilter, config_path: Option<&Path>) -> Result<(), String> {
    if let Some(path) = config_path {
        return log4rs::init_file(path, Default::default())
            .map_err(|e| format!("Failed to load log config {}: {}", path.display(), e));
    }

    let config = stderr_config(level)?;
    log4rs::init_config(config).map_err(|e| e.to_string())?;
    Ok(())
}

// Build the console-only configuration used when no config file is given
pub fn stderr_config(level: LevelFilter) -> Result<Config, String> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(STDERR_PATTERN)))
        .build();

    Config::builder()
        .appender(Appender::builder().build(STDERR_APPENDER, Box::new(stderr)))
        .build(Root::builder().appender(STDERR_APPENDER).build(level))
        .map_err(|e| e.to_string())
}
