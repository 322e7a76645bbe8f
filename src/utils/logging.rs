//! Injectable logging.
//!
//! The router and the API clients receive an `Arc<dyn Logger>` instead of
//! reaching for a global. `LogFacade` hands records to the `log` crate;
//! `ChannelLogger` additionally broadcasts them so a UI log panel can follow.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::broadcast;

use super::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(Error::Config(format!("unknown log level {s:?}"))),
        }
    }
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }

    const fn to_log(self) -> log::Level {
        match self {
            Self::Error => log::Level::Error,
            Self::Warn => log::Level::Warn,
            Self::Info => log::Level::Info,
            Self::Debug => log::Level::Debug,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single structured log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.target, self.message)
    }
}

pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, target: &str, message: &str);
}

pub type SharedLogger = Arc<dyn Logger>;

/// Forwards every record to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacade;

impl Logger for LogFacade {
    fn log(&self, level: LogLevel, target: &str, message: &str) {
        log::log!(target: target, level.to_log(), "{message}");
    }
}

/// Forwards to the facade and broadcasts each record to subscribers.
#[derive(Debug, Clone)]
pub struct ChannelLogger {
    sender: broadcast::Sender<LogRecord>,
    min_level: LogLevel,
}

impl ChannelLogger {
    pub fn new(min_level: LogLevel) -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender, min_level }
    }

    pub fn from_env() -> Self {
        let level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(LogLevel::Warn);
        Self::new(level)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LogRecord> {
        self.sender.subscribe()
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }
}

impl Default for ChannelLogger {
    fn default() -> Self {
        Self::new(LogLevel::Debug)
    }
}

impl Logger for ChannelLogger {
    fn log(&self, level: LogLevel, target: &str, message: &str) {
        LogFacade.log(level, target, message);
        if self.enabled(level) {
            // Nobody listening is fine
            let _ = self.sender.send(LogRecord {
                level,
                target: target.to_string(),
                message: message.to_string(),
            });
        }
    }
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $target:expr, $($arg:tt)*) => {
        $logger.log($crate::utils::logging::LogLevel::Error, $target, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $target:expr, $($arg:tt)*) => {
        $logger.log($crate::utils::logging::LogLevel::Warn, $target, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $target:expr, $($arg:tt)*) => {
        $logger.log($crate::utils::logging::LogLevel::Info, $target, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $target:expr, $($arg:tt)*) => {
        $logger.log($crate::utils::logging::LogLevel::Debug, $target, &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing_is_case_insensitive() {
        assert_eq!("WARN".parse::<LogLevel>().ok(), Some(LogLevel::Warn));
        assert_eq!("debug".parse::<LogLevel>().ok(), Some(LogLevel::Debug));
        assert!(matches!("trace".parse::<LogLevel>(), Err(Error::Config(_))));
    }

    #[test]
    fn channel_logger_broadcasts_enabled_records() {
        let logger = ChannelLogger::new(LogLevel::Info);
        let mut rx = logger.subscribe();

        log_debug!(logger, "router", "hidden {}", 1);
        log_error!(logger, "router", "navigation to {} failed", "/x");

        let record = rx.try_recv().expect("record");
        assert_eq!(record.level, LogLevel::Error);
        assert_eq!(record.target, "router");
        assert_eq!(record.message, "navigation to /x failed");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn record_display_includes_level_and_target() {
        let record = LogRecord {
            level: LogLevel::Warn,
            target: "api".into(),
            message: "slow".into(),
        };
        assert_eq!(record.to_string(), "[WARN] api: slow");
    }
}
