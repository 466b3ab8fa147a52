//! Diagnostic logging configuration.
//!
//! Verbosity is carried as a value: the examples build a [`LogConfig`] from
//! `-v`, install the sink once, and hand the same config to the
//! [`SessionBuilder`](crate::SessionBuilder), which decides from it whether
//! message bodies are traced.

use std::io::Write;

use log::LevelFilter;

/// Log target of this crate.
pub const LOG_TARGET: &str = "netconf_crud";

/// Logging configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Level for this crate's log target.
    pub level: LevelFilter,

    /// Level for every other target (russh, tokio).
    pub other_level: LevelFilter,

    /// Trace full NETCONF message bodies.
    pub trace_messages: bool,
}

impl LogConfig {
    /// Debug-level diagnostics with message tracing when `verbose`,
    /// warnings only otherwise.
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Self {
                level: LevelFilter::Debug,
                other_level: LevelFilter::Warn,
                trace_messages: true,
            }
        } else {
            Self::default()
        }
    }

    /// Install an `env_logger` sink writing
    /// `<timestamp> - <target> - <LEVEL> - <message>` to stderr.
    ///
    /// Returns `false` if a logger was already installed.
    pub fn install(&self) -> bool {
        env_logger::Builder::new()
            .filter_level(self.other_level)
            .filter_module(LOG_TARGET, self.level)
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{} - {} - {} - {}",
                    buf.timestamp_millis(),
                    record.target(),
                    record.level(),
                    record.args()
                )
            })
            .try_init()
            .is_ok()
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Warn,
            other_level: LevelFilter::Warn,
            trace_messages: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_config() {
        let config = LogConfig::from_verbose(true);
        assert_eq!(config.level, LevelFilter::Debug);
        assert!(config.trace_messages);

        let config = LogConfig::from_verbose(false);
        assert_eq!(config.level, LevelFilter::Warn);
        assert!(!config.trace_messages);
    }
}
