use crate::config::LogConfig;
use anyhow::{Context, Result};
use simplelog::WriteLogger;

/// Installs a file logger when a log file is configured.
///
/// The console belongs to the prompt and to commands, so nothing is ever
/// logged there; without a file the `log` macros stay no-ops.
pub fn init(config: &LogConfig) -> Result<()> {
    let Some(path) = &config.file else {
        return Ok(());
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    WriteLogger::init(config.level, simplelog::Config::default(), file)
        .context("installing logger")?;
    log::info!("logging to {} at {}", path.display(), config.level);
    Ok(())
}
