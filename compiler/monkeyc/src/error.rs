//! Driver-level errors.

use std::path::PathBuf;

/// Why a command failed. [`CliError::exit_code`] maps each to the
/// process exit status.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("aborting due to {count} syntax error{}", plural_suffix(.count))]
    Syntax { count: usize },

    #[error("{message}")]
    Runtime { message: String },

    #[error("{message}")]
    Usage { message: String },

    #[error("i/o error: {0}")]
    Stream(#[from] std::io::Error),
}

#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "thiserror format arguments receive fields by reference"
)]
fn plural_suffix(count: &usize) -> &'static str {
    if *count == 1 {
        ""
    } else {
        "s"
    }
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::Usage {
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage { .. } => 2,
            CliError::Io { .. }
            | CliError::Syntax { .. }
            | CliError::Runtime { .. }
            | CliError::Stream(_) => 1,
        }
    }

    /// Whether the failure was already printed while the command ran.
    /// Syntax errors are listed individually but still get a summary line.
    pub fn already_reported(&self) -> bool {
        matches!(self, CliError::Runtime { .. })
    }
}
