//! An interactive shell: a raw-mode line editor with command-name
//! completion, a quote-aware tokenizer, redirection parsing, and a dispatcher
//! for builtins and external programs.

pub mod commands;
pub mod completion;
pub mod config;
pub mod dispatch;
pub mod editor;
pub mod error;
pub mod logging;
pub mod redirection;
pub mod registry;
pub mod tokenize;

pub use commands::Flow;
pub use completion::{CompletionOutcome, ShellCompleter};
pub use config::Config;
pub use dispatch::Dispatcher;
pub use editor::{LineEditor, ReadOutcome};
pub use error::ShellError;
pub use redirection::{ParsedCommand, parse_command};
pub use registry::CommandRegistry;
pub use tokenize::tokenize;
