//! External code formatter bridge.
//!
//! Generated source can be piped through prettier (or any command accepting
//! the same flags) before it is written. Formatting is opt-in through the
//! `format` section of the project settings.
//!
//! ```rust
//! use fastauto_core::format::FormatConfig;
//!
//! let config = FormatConfig::default();
//! assert!(!config.enabled);
//! assert_eq!(config.command, "prettier");
//! ```

use std::io::Write as IoWrite;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FastautoError, Result};
use crate::lang::SourceLang;

const DEFAULT_COMMAND: &str = "prettier";

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Run the formatter on generated files (default: false)
    #[serde(default)]
    pub enabled: bool,

    /// Formatter command line, e.g. `prettier` or `npx prettier`
    #[serde(default = "default_command")]
    pub command: String,
}

fn default_command() -> String {
    DEFAULT_COMMAND.to_string()
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: default_command(),
        }
    }
}

// ============================================================================
// Formatter
// ============================================================================

#[derive(Debug, Clone)]
pub struct Formatter {
    command: String,
}

impl Formatter {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Formatter for `config`, if formatting is enabled.
    pub fn from_config(config: &FormatConfig) -> Option<Self> {
        config.enabled.then(|| Self::new(config.command.clone()))
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn base_command(&self) -> Option<Command> {
        let mut parts = self.command.split_whitespace();
        let program = parts.next()?;
        let mut cmd = Command::new(program);
        cmd.args(parts);
        Some(cmd)
    }

    /// `<command> --version` succeeds.
    pub fn is_available(&self) -> bool {
        let Some(mut cmd) = self.base_command() else {
            return false;
        };
        cmd.arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Format `source` by piping it through the formatter.
    pub fn format(&self, lang: SourceLang, source: &str) -> Result<String> {
        let mut cmd = self
            .base_command()
            .ok_or_else(|| FastautoError::FormatterFailed {
                message: "empty formatter command".to_string(),
            })?;

        cmd.args(["--parser", lang.parser()]);
        cmd.args([
            "--no-semi",
            "--single-quote",
            "--arrow-parens",
            "always",
            "--print-width",
            "80",
        ]);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        debug!(command = %self.command, parser = lang.parser(), "running formatter");

        let mut child = cmd.spawn().map_err(|e| FastautoError::FormatterFailed {
            message: format!("failed to spawn '{}': {}", self.command, e),
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(|e| FastautoError::FormatterFailed {
                    message: format!("failed to write source: {}", e),
                })?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| FastautoError::FormatterFailed {
                message: format!("execution failed: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FastautoError::FormatterFailed {
                message: format!("'{}' exited with error: {}", self.command, stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Format `source` when a formatter is configured.
///
/// Falls back to the unformatted source, returning a warning, when the
/// formatter is missing or fails.
pub fn apply(formatter: Option<&Formatter>, lang: SourceLang, source: String) -> (String, Vec<String>) {
    let Some(formatter) = formatter else {
        return (source, Vec::new());
    };

    if !formatter.is_available() {
        let message = format!(
            "formatter '{}' not found, writing unformatted source",
            formatter.command()
        );
        debug!("{}", message);
        return (source, vec![message]);
    }

    match formatter.format(lang, &source) {
        Ok(formatted) => (formatted, Vec::new()),
        Err(e) => {
            let message = format!("{}, writing unformatted source", e);
            debug!("{}", message);
            (source, vec![message])
        }
    }
}
