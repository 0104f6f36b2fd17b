use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use tracing::Level;

use crate::constants::{DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH};
use crate::error::ConfigError;
use crate::layout::CellMetrics;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "term-codepad",
    version = env!("CARGO_PKG_VERSION"),
    about = "Coding-exercise workspace with a draggable question panel"
)]
pub struct Cli {
    /// JSON question file. The built-in sample is shown when omitted.
    #[arg(long = "question", value_name = "PATH")]
    pub question: Option<PathBuf>,

    /// Width of one terminal cell in panel units.
    #[arg(long = "cell-width", value_name = "UNITS", default_value_t = DEFAULT_CELL_WIDTH)]
    pub cell_width: i32,

    /// Height of one terminal cell in panel units.
    #[arg(long = "cell-height", value_name = "UNITS", default_value_t = DEFAULT_CELL_HEIGHT)]
    pub cell_height: i32,

    /// Name shown in the greeting.
    #[arg(long = "user", value_name = "NAME", default_value = "User")]
    pub user: String,

    /// Countdown budget.
    #[arg(long = "time", value_name = "SECONDS", default_value_t = 3600)]
    pub time_seconds: u64,

    /// Append logs to this file. Logging is discarded otherwise.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Start with the question panel open.
    #[arg(long = "open")]
    pub open: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub question: Option<PathBuf>,
    pub cells: CellMetrics,
    pub user: String,
    pub time_limit: Duration,
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
    pub open: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            question: None,
            cells: CellMetrics::default(),
            user: "User".to_string(),
            time_limit: Duration::from_secs(3600),
            log_file: None,
            log_level: Level::INFO,
            open: false,
        }
    }
}

fn check_range(name: &'static str, value: i64, min: i64, max: i64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            min,
            max,
            value,
        })
    }
}

impl TryFrom<&Cli> for AppConfig {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        check_range("cell-width", cli.cell_width as i64, 1, 64)?;
        check_range("cell-height", cli.cell_height as i64, 1, 64)?;
        let time = i64::try_from(cli.time_seconds).unwrap_or(i64::MAX);
        check_range("time", time, 1, 86_400)?;
        let log_level = Level::from_str(&cli.log_level)
            .map_err(|_| ConfigError::LogLevel(cli.log_level.clone()))?;
        Ok(Self {
            question: cli.question.clone(),
            cells: CellMetrics::new(cli.cell_width, cli.cell_height),
            user: cli.user.clone(),
            time_limit: Duration::from_secs(cli.time_seconds),
            log_file: cli.log_file.clone(),
            log_level,
            open: cli.open,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("term-codepad").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_match_the_documented_values() {
        let config = AppConfig::try_from(&parse(&[])).unwrap();
        assert_eq!(config.cells, CellMetrics::new(8, 16));
        assert_eq!(config.user, "User");
        assert_eq!(config.time_limit, Duration::from_secs(3600));
        assert_eq!(config.log_level, Level::INFO);
        assert!(!config.open);
        assert!(config.question.is_none());
    }

    #[test]
    fn flags_are_carried_through() {
        let cli = parse(&[
            "--question",
            "q.json",
            "--cell-width",
            "10",
            "--user",
            "Ada",
            "--time",
            "90",
            "--log-level",
            "trace",
            "--open",
        ]);
        let config = AppConfig::try_from(&cli).unwrap();
        assert_eq!(config.question, Some(PathBuf::from("q.json")));
        assert_eq!(config.cells.cell_width, 10);
        assert_eq!(config.user, "Ada");
        assert_eq!(config.time_limit, Duration::from_secs(90));
        assert_eq!(config.log_level, Level::TRACE);
        assert!(config.open);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = AppConfig::try_from(&parse(&["--cell-height", "0"])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                name: "cell-height",
                ..
            }
        ));
        let err = AppConfig::try_from(&parse(&["--time", "90000"])).unwrap_err();
        assert_eq!(err.to_string(), "time must be between 1 and 86400, got 90000");
    }

    #[test]
    fn rejects_unknown_log_level() {
        let err = AppConfig::try_from(&parse(&["--log-level", "loud"])).unwrap_err();
        assert!(matches!(err, ConfigError::LogLevel(level) if level == "loud"));
    }
}
