use crate::config::Config;
use crate::registry::find_executable;
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// List of builtin commands
pub const BUILTINS: &[&str] = &["echo", "exit", "type", "pwd", "cd"];

/// Whether the REPL keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Output streams handed to a builtin for one invocation.
pub struct Streams<'a> {
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
}

/// Executes a builtin command, writing its output to `io`.
///
/// Returns `None` when `cmd` is not a builtin.
pub fn execute_builtin(
    cmd: &str,
    args: &[String],
    io: &mut Streams<'_>,
    config: &Config,
) -> Option<io::Result<Flow>> {
    let result = match cmd {
        "exit" => return Some(Ok(Flow::Exit)),
        "echo" => writeln!(io.stdout, "{}", args.join(" ")),
        "pwd" => execute_pwd(io),
        "cd" => execute_cd(args, io, config),
        "type" => execute_type(args, io, config),
        _ => return None,
    };
    Some(result.map(|_| Flow::Continue))
}

fn execute_pwd(io: &mut Streams<'_>) -> io::Result<()> {
    match env::current_dir() {
        Ok(dir) => writeln!(io.stdout, "{}", dir.display()),
        Err(e) => writeln!(io.stderr, "pwd: error getting current directory: {}", e),
    }
}

fn execute_cd(args: &[String], io: &mut Streams<'_>, config: &Config) -> io::Result<()> {
    let arg = args.first().map(String::as_str).unwrap_or_default();
    let target = cd_target(arg, config.home.as_deref());
    match env::set_current_dir(&target) {
        Ok(()) => {
            log::debug!("cd: now in {}", target.display());
            Ok(())
        }
        // Reported on stdout, like the rest of cd's output.
        Err(_) => writeln!(io.stdout, "cd: {}: No such file or directory", arg),
    }
}

/// Resolves a `cd` argument, expanding `~` and `~/...` against `home`.
///
/// An empty argument means home. With no home known, `~` stays literal.
pub fn cd_target(arg: &str, home: Option<&Path>) -> PathBuf {
    let arg = if arg.is_empty() { "~" } else { arg };
    let expanded = shellexpand::tilde_with_context(arg, || home.and_then(Path::to_str));
    PathBuf::from(expanded.as_ref())
}

fn execute_type(args: &[String], io: &mut Streams<'_>, config: &Config) -> io::Result<()> {
    let Some(arg) = args.first() else {
        return writeln!(io.stdout, "type: missing argument");
    };

    if BUILTINS.contains(&arg.as_str()) {
        writeln!(io.stdout, "{} is a shell builtin", arg)
    } else {
        match find_executable(&config.search_path, arg) {
            Some(path) => writeln!(io.stdout, "{} is {}", arg, path.display()),
            None => writeln!(io.stdout, "{}: not found", arg),
        }
    }
}
