use crate::error::ShellError;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Stdio;

/// A parsed command with arguments and redirections.
///
/// `append` applies to whichever of the two targets are set; the streams do
/// not carry separate append flags.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
    pub stdout_target: Option<PathBuf>,
    pub stderr_target: Option<PathBuf>,
    pub append: bool,
}

impl ParsedCommand {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

fn redirect_operator(token: &str) -> Option<(Stream, bool)> {
    match token {
        ">" | "1>" => Some((Stream::Stdout, false)),
        ">>" | "1>>" => Some((Stream::Stdout, true)),
        "2>" => Some((Stream::Stderr, false)),
        "2>>" => Some((Stream::Stderr, true)),
        _ => None,
    }
}

/// Parses tokens into a ParsedCommand, extracting redirection operators.
///
/// An operator without a following target is kept as an ordinary word.
pub fn parse_command(tokens: Vec<String>) -> ParsedCommand {
    let mut parsed = ParsedCommand::default();
    let mut tokens = tokens.into_iter();

    while let Some(token) = tokens.next() {
        if let Some((stream, append)) = redirect_operator(&token)
            && let Some(target) = tokens.next()
        {
            let target = Some(PathBuf::from(target));
            match stream {
                Stream::Stdout => parsed.stdout_target = target,
                Stream::Stderr => parsed.stderr_target = target,
            }
            parsed.append = append;
            continue;
        }

        if parsed.name.is_empty() {
            parsed.name = token;
        } else {
            parsed.args.push(token);
        }
    }

    parsed
}

/// Destination of one output stream for a single command.
#[derive(Debug)]
pub enum Sink {
    Stdout,
    Stderr,
    File(File),
}

impl Sink {
    /// Opens `target` for writing, or falls back to `console` when unset.
    ///
    /// The file is created if missing and truncated unless `append` is set.
    pub fn open(target: Option<&Path>, append: bool, console: Sink) -> Result<Sink, ShellError> {
        let Some(path) = target else {
            return Ok(console);
        };

        let mut options = OpenOptions::new();
        options.write(true).create(true);
        if append {
            options.append(true);
        } else {
            options.truncate(true);
        }

        options
            .open(path)
            .map(Sink::File)
            .map_err(|source| ShellError::Redirect {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Hands the stream to a child process. Console sinks are inherited.
    pub fn into_stdio(self) -> Stdio {
        match self {
            Sink::Stdout | Sink::Stderr => Stdio::inherit(),
            Sink::File(file) => Stdio::from(file),
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Stdout => io::stdout().write(buf),
            Sink::Stderr => io::stderr().write(buf),
            Sink::File(file) => file.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout => io::stdout().flush(),
            Sink::Stderr => io::stderr().flush(),
            Sink::File(file) => file.flush(),
        }
    }
}
