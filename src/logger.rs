use crate::{
    config::Config,
    error::{Result, ViewGenError},
};
use chrono::{DateTime, Utc};
use colored::*;
use log::{Level, Metadata, Record};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{Duration, Instant};

static CONSOLE_LOGGER: Lazy<ConsoleLogger> = Lazy::new(ConsoleLogger::new);

pub fn init() -> Result<()> {
    init_with_config(LoggerConfig::default())
}

/// Installs the console logger. Calling it again only swaps the configuration.
pub fn init_with_config(config: LoggerConfig) -> Result<()> {
    let max_level = config.min_level.to_level_filter();
    CONSOLE_LOGGER.update_config(config);

    if log::set_logger(&*CONSOLE_LOGGER).is_err() {
        log::debug!("Logger already installed, configuration updated");
    }

    log::set_max_level(max_level);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    pub fn color(&self) -> Color {
        match self {
            LogLevel::Trace => Color::Cyan,
            LogLevel::Debug => Color::Blue,
            LogLevel::Info => Color::Green,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Error => Color::Red,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    pub fn to_level(&self) -> Level {
        match self {
            LogLevel::Trace => Level::Trace,
            LogLevel::Debug => Level::Debug,
            LogLevel::Info => Level::Info,
            LogLevel::Warn => Level::Warn,
            LogLevel::Error => Level::Error,
        }
    }

    pub fn to_level_filter(&self) -> log::LevelFilter {
        self.to_level().to_level_filter()
    }

    pub fn from_level(level: Level) -> Self {
        match level {
            Level::Trace => LogLevel::Trace,
            Level::Debug => LogLevel::Debug,
            Level::Info => LogLevel::Info,
            Level::Warn => LogLevel::Warn,
            Level::Error => LogLevel::Error,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub target: String,
    pub file: String,
    pub line: u32,
}

impl LogEntry {
    fn from_record(record: &Record) -> Self {
        Self {
            timestamp: Utc::now(),
            level: LogLevel::from_level(record.level()),
            message: record.args().to_string(),
            target: record.target().to_string(),
            file: record.file().unwrap_or("unknown").to_string(),
            line: record.line().unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub show_colors: bool,
    pub show_target: bool,
    pub show_file_location: bool,
    pub timestamp_format: String,
    pub output_json: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            show_colors: true,
            show_target: true,
            show_file_location: false,
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            output_json: false,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.show_colors = enabled;
        self
    }

    pub fn with_json_output(mut self, enabled: bool) -> Self {
        self.output_json = enabled;
        self
    }

    pub fn production() -> Self {
        Self {
            min_level: LogLevel::Info,
            show_colors: false,
            output_json: true,
            ..Default::default()
        }
    }

    pub fn development() -> Self {
        Self {
            min_level: LogLevel::Debug,
            show_colors: true,
            show_file_location: true,
            ..Default::default()
        }
    }
}

/// Writes log records to stderr, leaving stdout to the generated results.
pub struct ConsoleLogger {
    config: Mutex<LoggerConfig>,
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self {
            config: Mutex::new(LoggerConfig::default()),
        }
    }

    pub fn update_config(&self, new_config: LoggerConfig) {
        if let Ok(mut config) = self.config.lock() {
            *config = new_config;
        }
    }

    fn format_line(&self, entry: &LogEntry, config: &LoggerConfig) -> String {
        let timestamp = entry.timestamp.format(&config.timestamp_format).to_string();
        let level = format!("[{}]", entry.level.as_str());
        let location = format!("({}:{})", entry.file, entry.line);

        let mut output = if config.show_colors {
            format!(
                "{} {} ",
                timestamp.bright_black(),
                level.color(entry.level.color()).bold()
            )
        } else {
            format!("{} {} ", timestamp, level)
        };

        if config.show_target && !entry.target.is_empty() {
            if config.show_colors {
                output.push_str(&format!("{}: ", entry.target.bright_blue()));
            } else {
                output.push_str(&format!("{}: ", entry.target));
            }
        }

        output.push_str(&entry.message);

        if config.show_file_location {
            if config.show_colors {
                output.push_str(&format!(" {}", location.bright_black()));
            } else {
                output.push_str(&format!(" {}", location));
            }
        }

        output
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        match self.config.lock() {
            Ok(config) => metadata.level() <= config.min_level.to_level(),
            Err(_) => true,
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = LogEntry::from_record(record);
        if let Ok(config) = self.config.lock() {
            let line = if config.output_json {
                serde_json::to_string(&entry).unwrap_or_default()
            } else {
                self.format_line(&entry, &config)
            };
            let _ = writeln!(io::stderr(), "{}", line);
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Logs how long an operation took when dropped.
pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn new(name: &str) -> Self {
        log::debug!("⏱️  Starting timer: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        log::info!(
            "⏱️  {} completed in {}ms",
            self.name,
            self.elapsed().as_millis()
        );
    }
}

pub fn timer(name: &str) -> Timer {
    Timer::new(name)
}

pub fn log_config_info(config: &Config) -> Result<()> {
    let gemini = config
        .gemini
        .as_ref()
        .ok_or_else(|| ViewGenError::ConfigError("Gemini configuration missing".into()))?;

    log::info!("⚙️  Configuration loaded:");
    log::info!("   Model: {}", gemini.model_or_default());
    log::info!("   Endpoint: {}", gemini.base_url_or_default());
    log::info!(
        "   API key: {}",
        if gemini.api_key.is_some() { "✅" } else { "❌" }
    );
    match config.generator.concurrency_limit() {
        Some(limit) => log::info!("   Max concurrency: {}", limit),
        None => log::info!("   Max concurrency: unbounded"),
    }
    Ok(())
}
