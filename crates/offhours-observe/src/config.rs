use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::format::LoggerFormat;
use crate::level::LoggerLevel;

/// Logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output format.
    pub format: LoggerFormat,
    /// Log level filter expression (e.g., "info", "offhours_core=debug,info").
    pub level: LoggerLevel,
    /// Whether to include module/target names in log output.
    pub with_targets: bool,
    /// Whether to use colored output.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Build a config from `OFFHOURS_LOG_LEVEL` and `OFFHOURS_LOG_FORMAT`,
    /// falling back to the defaults for anything unset or invalid.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = std::env::var("OFFHOURS_LOG_LEVEL")
            && let Ok(level) = v.parse()
        {
            cfg.level = level;
        }
        if let Ok(v) = std::env::var("OFFHOURS_LOG_FORMAT")
            && let Ok(format) = v.parse()
        {
            cfg.format = format;
        }
        cfg
    }

    /// Determines whether colored output should be used.
    ///
    /// Color is enabled only if `use_color` is `true` AND stdout is a
    /// terminal (not redirected to a file/pipe). Call this during logger
    /// initialization, not during config parsing, for accurate terminal
    /// detection.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }
}
