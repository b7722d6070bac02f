use std::io;
use std::path::PathBuf;

/// Errors surfaced while reading, parsing or running a command.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// Neither a builtin nor a runnable program on the search path.
    #[error("{0}: command not found")]
    CommandNotFound(String),

    /// A redirection target could not be opened; the command did not run.
    #[error("{}: {source}", .path.display())]
    Redirect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),

    #[error("input stream closed")]
    InputClosed,

    /// Reading a keystroke failed.
    #[error("reading input: {0}")]
    Input(#[source] io::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ShellError {
    /// Whether the REPL must stop after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ShellError::Terminal(_) | ShellError::InputClosed | ShellError::Input(_)
        )
    }
}
