//! The value returned by `research` and `chat`.

use quickseek_core::error::RuntimeError;
use std::fmt;

/// Outcome of a single request.
///
/// Generation failures are values, not errors: they render as a readable
/// message so the caller always has text to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Trimmed model output, possibly empty.
    Generated(String),

    /// The model runtime timed out or failed.
    Failed(RuntimeError),
}

impl Response {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The text shown to the user.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated(text) => f.write_str(text),
            Self::Failed(err) => write!(f, "Error calling the model runtime: {err}"),
        }
    }
}
