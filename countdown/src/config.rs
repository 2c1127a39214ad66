//! Command line and file configuration
//!
//! Everything here runs before the terminal switches to raw mode, so errors
//! are reported as plain text on stderr.

use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use countdown_core::Keybindings;
use tracing_subscriber::EnvFilter;

use crate::keys::{default_keybindings, KeyContext};
use crate::state::{CounterConfig, CounterState, DEFAULT_TICK_SPEED_MS, SET_TO_OFFSET};
use crate::value::Value;

/// Countdown - a ticking counter panel for the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "countdown")]
#[command(about = "A count-up / count-down timer panel")]
pub struct Args {
    /// Initial count
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub count: i64,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = DEFAULT_TICK_SPEED_MS, allow_negative_numbers = true)]
    pub tick_speed: i64,

    /// Amount added or subtracted per tick
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub count_diff: i64,

    /// Initial "set to" value (defaults to count + 10)
    #[arg(long, allow_negative_numbers = true)]
    pub set_to: Option<i64>,

    /// JSON file with keybinding overrides
    #[arg(long, value_name = "FILE")]
    pub keybindings: Option<PathBuf>,

    /// Write logs to FILE (the terminal belongs to the UI)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn counter_config(&self) -> CounterConfig {
        let initial = CounterState {
            count: Value::new(self.count),
            tick_speed: Value::new(self.tick_speed),
            count_diff: Value::new(self.count_diff),
            ..CounterState::default()
        };
        let initial_set_to = match self.set_to {
            Some(n) => Value::new(n),
            None => initial.count.step(Value::new(SET_TO_OFFSET), true),
        };
        CounterConfig {
            initial,
            initial_set_to,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    /// Keybindings file could not be read
    Io { path: PathBuf, source: io::Error },
    /// Keybindings file is not valid JSON of the expected shape
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Log file could not be created
    LogFile { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read keybindings {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid keybindings {}: {}", path.display(), source)
            }
            ConfigError::LogFile { path, source } => {
                write!(f, "cannot open log file {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } | ConfigError::LogFile { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

/// Parse a keybindings override document and merge it onto the defaults.
pub fn parse_keybindings(json: &str) -> Result<Keybindings<KeyContext>, serde_json::Error> {
    let user: Keybindings<KeyContext> = serde_json::from_str(json)?;
    Ok(Keybindings::merge(default_keybindings(), user))
}

/// Default keybindings, overridden by `path` when given.
pub fn load_keybindings(path: Option<&Path>) -> Result<Keybindings<KeyContext>, ConfigError> {
    let Some(path) = path else {
        return Ok(default_keybindings());
    };
    let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_keybindings(&json).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Send tracing output to `path`. Without a path logging stays off.
///
/// The filter comes from `RUST_LOG`, defaulting to `countdown=debug`.
pub fn init_logging(path: Option<&Path>) -> Result<(), ConfigError> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).map_err(|source| ConfigError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("countdown=debug,countdown_core=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Command;
    use countdown_core::testing::{char_key, key};

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["countdown"]);
        let config = args.counter_config();

        assert_eq!(config.initial, CounterState::default());
        assert_eq!(config.initial_set_to, Value::new(10));
    }

    #[test]
    fn test_set_to_follows_count() {
        let args = Args::parse_from(["countdown", "--count", "-5", "--tick-speed", "50"]);
        let config = args.counter_config();

        assert_eq!(config.initial.count, Value::new(-5));
        assert_eq!(config.initial.tick_speed, Value::new(50));
        assert_eq!(config.initial_set_to, Value::new(5));

        let args = Args::parse_from(["countdown", "--set-to", "3"]);
        assert_eq!(args.counter_config().initial_set_to, Value::new(3));
    }

    #[test]
    fn test_keybinding_override_merges() {
        let kb = parse_keybindings(r#"{"panel": {"counter.start": ["g"]}, "bogus": {}}"#).unwrap();

        assert_eq!(
            kb.get_command(char_key('g'), KeyContext::Panel),
            Some(Command::START)
        );
        assert_eq!(kb.get_command(char_key('s'), KeyContext::Panel), None);
        assert_eq!(
            kb.get_command(char_key('p'), KeyContext::Panel),
            Some(Command::PAUSE)
        );
    }

    #[test]
    fn test_global_override_applies_in_every_context() {
        let kb = parse_keybindings(r#"{"global": {"quit": ["ctrl+q"]}}"#).unwrap();

        assert_eq!(kb.get_command(key("ctrl+q"), KeyContext::Field), Some(Command::QUIT));
        assert_eq!(kb.get_command(key("ctrl+q"), KeyContext::Panel), Some(Command::QUIT));
        assert_eq!(kb.get_command(key("ctrl+c"), KeyContext::Field), None);

        // Untouched global commands and panel-level quit keys survive
        assert_eq!(kb.get_command(key("tab"), KeyContext::Field), Some(Command::FOCUS_NEXT));
        assert_eq!(kb.get_command(key("q"), KeyContext::Panel), Some(Command::QUIT));
    }

    #[test]
    fn test_bad_keybindings() {
        assert!(parse_keybindings("{not json").is_err());

        let err = load_keybindings(Some(Path::new("/nonexistent/keys.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/keys.json"));
    }

    #[test]
    fn test_no_file_means_defaults() {
        let kb = load_keybindings(None).unwrap();
        assert_eq!(kb.get_command(char_key('r'), KeyContext::Panel), Some(Command::RESET));
    }
}
