use crate::commands::{self, Flow, Streams};
use crate::config::Config;
use crate::error::ShellError;
use crate::redirection::{ParsedCommand, Sink};
use crate::registry::find_executable;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

/// Runs parsed commands as builtins or external processes.
pub struct Dispatcher<'a> {
    config: &'a Config,
}

impl<'a> Dispatcher<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Executes one command with its redirections applied.
    ///
    /// Redirect targets are opened before anything runs; if one cannot be
    /// opened the command is skipped. The files are closed again when this
    /// returns, so the next command starts on the console.
    pub fn execute(&self, cmd: &ParsedCommand) -> Result<Flow, ShellError> {
        if cmd.is_empty() {
            return Ok(Flow::Continue);
        }
        log::debug!("dispatch {:?}", cmd);

        let mut stdout = Sink::open(cmd.stdout_target.as_deref(), cmd.append, Sink::Stdout)
            .inspect_err(|e| log::warn!("{}: {}", cmd.name, e))?;
        let mut stderr = Sink::open(cmd.stderr_target.as_deref(), cmd.append, Sink::Stderr)
            .inspect_err(|e| log::warn!("{}: {}", cmd.name, e))?;

        let mut io = Streams {
            stdout: &mut stdout,
            stderr: &mut stderr,
        };
        let builtin = commands::execute_builtin(&cmd.name, &cmd.args, &mut io, self.config);
        if let Some(result) = builtin {
            let flow = result?;
            stdout.flush()?;
            stderr.flush()?;
            return Ok(flow);
        }

        self.spawn(cmd, stdout, stderr)?;
        Ok(Flow::Continue)
    }

    /// Runs an external program and waits for it to exit.
    fn spawn(&self, cmd: &ParsedCommand, stdout: Sink, stderr: Sink) -> Result<(), ShellError> {
        let program = self
            .resolve(&cmd.name)
            .ok_or_else(|| ShellError::CommandNotFound(cmd.name.clone()))?;

        let mut command = Command::new(&program);
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.arg0(&cmd.name);
        }
        command
            .args(&cmd.args)
            .stdout(stdout.into_stdio())
            .stderr(stderr.into_stdio());

        let status = command.status().map_err(|e| {
            log::warn!("failed to run {}: {}", program.display(), e);
            ShellError::CommandNotFound(cmd.name.clone())
        })?;
        if !status.success() {
            log::debug!("{} exited with {}", cmd.name, status);
        }
        Ok(())
    }

    fn resolve(&self, name: &str) -> Option<PathBuf> {
        if name.contains('/') {
            return Some(PathBuf::from(name));
        }
        find_executable(&self.config.search_path, name)
    }
}
