use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured description of a failed command.
///
/// Carries the three facts a caller can act on: the exit code (when the
/// process ran at all), a copy of the argument vector, and free-form detail
/// text from the backend. The `Display` rendering is a multi-line diagnostic
/// for humans and carries no semantic weight beyond the structured fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct RunFailure {
    pub return_code: Option<i32>,
    pub command: Option<Vec<String>>,
    pub detail: Option<String>,
}

impl RunFailure {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_return_code(mut self, code: i32) -> Self {
        self.return_code = Some(code);
        self
    }

    #[must_use]
    pub fn with_command(mut self, command: Vec<String>) -> Self {
        self.command = Some(command);
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.return_code {
            Some(code) => write!(f, "Command failed with return code {code}.")?,
            None => write!(f, "Command failed.")?,
        }
        if let Some(command) = &self.command {
            let rendered: Vec<String> = command.iter().map(|a| quote_arg(a)).collect();
            write!(f, "\n- Command args: {}", rendered.join(" "))?;
        }
        if let Some(detail) = &self.detail {
            write!(f, "\n{detail}")?;
        }
        Ok(())
    }
}

impl std::error::Error for RunFailure {}

/// Shell-quote one argument for diagnostic output: elements containing
/// whitespace or quote characters are wrapped in double quotes, with inner
/// double quotes escaped.
fn quote_arg(arg: &str) -> String {
    if arg.is_empty() || arg.contains(' ') || arg.contains('"') || arg.contains('\'') {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_owned()
    }
}
