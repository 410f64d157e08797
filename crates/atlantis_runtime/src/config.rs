//! Runtime configuration.

use atlantis_foundation::{Error, Result};
use atlantis_orders::Directions;

/// How parsed events are written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One event per line.
    #[default]
    Text,
    /// A JSON document.
    Json,
}

/// Settings shared by sessions, the REPL and the CLI.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Output format for rendered events.
    pub output: OutputFormat,
    /// Abort a session at the first bad order line.
    pub strict: bool,
    /// Record the raw report lines as events.
    pub show_lines: bool,
    /// Movement words accepted by `MOVE`, `ADVANCE` and `SAIL`.
    pub directions: Directions,
}

impl RuntimeConfig {
    /// Debug logging and raw report lines.
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            log_filter: "debug".to_string(),
            show_lines: true,
            ..Self::default()
        }
    }

    /// Errors only.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            log_filter: "error".to_string(),
            ..Self::default()
        }
    }

    /// Sets the fallback log filter.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Sets the output format.
    #[must_use]
    pub const fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Sets whether bad order lines abort a session.
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets whether raw report lines are recorded.
    #[must_use]
    pub const fn with_lines(mut self, show_lines: bool) -> Self {
        self.show_lines = show_lines;
        self
    }

    /// Sets the direction vocabulary.
    #[must_use]
    pub fn with_directions(mut self, directions: Directions) -> Self {
        self.directions = directions;
        self
    }

    /// Checks that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an empty log filter or an empty
    /// direction vocabulary.
    pub fn validate(&self) -> Result<()> {
        if self.log_filter.trim().is_empty() {
            return Err(Error::config("log filter is empty"));
        }
        if self.directions.words().is_empty() {
            return Err(Error::config("direction vocabulary is empty"));
        }
        Ok(())
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            output: OutputFormat::Text,
            strict: false,
            show_lines: false,
            directions: Directions::default(),
        }
    }
}
