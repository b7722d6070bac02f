use log::LevelFilter;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;

/// Environment variable naming the log file. Logging is off when unset.
pub const LOG_FILE_VAR: &str = "MYSHELL_LOG";
/// Environment variable holding the log level filter.
pub const LOG_LEVEL_VAR: &str = "MYSHELL_LOG_LEVEL";

const PROMPT: &str = "$ ";

/// Startup settings, read once from the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directories searched for executables, in `PATH` order.
    pub search_path: Vec<PathBuf>,
    /// Target of `cd`, `cd ~` and `~/...` paths.
    pub home: Option<PathBuf>,
    pub prompt: String,
    pub log: LogConfig,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
    pub level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: LevelFilter::Info,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var_os(key))
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let search_path = var("PATH")
            .map(|path| env::split_paths(&path).collect())
            .unwrap_or_default();
        let home = var("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from);

        let level = var(LOG_LEVEL_VAR)
            .and_then(|l| l.into_string().ok())
            .and_then(|l| LevelFilter::from_str(l.trim()).ok())
            .unwrap_or(LevelFilter::Info);
        let file = var(LOG_FILE_VAR)
            .filter(|f| !f.is_empty())
            .map(PathBuf::from);

        Self {
            search_path,
            home,
            prompt: PROMPT.to_string(),
            log: LogConfig { file, level },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, OsString> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(v)))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_search_path_order() {
        let config = config_from(&[("PATH", "/usr/local/bin:/usr/bin:/bin")]);
        assert_eq!(
            config.search_path,
            vec![
                PathBuf::from("/usr/local/bin"),
                PathBuf::from("/usr/bin"),
                PathBuf::from("/bin")
            ]
        );
        assert_eq!(config.prompt, "$ ");
    }

    #[test]
    fn test_missing_vars() {
        let config = config_from(&[]);
        assert!(config.search_path.is_empty());
        assert!(config.home.is_none());
        assert!(config.log.file.is_none());
        assert_eq!(config.log.level, LevelFilter::Info);
    }

    #[test]
    fn test_log_settings() {
        let config = config_from(&[
            ("HOME", "/home/user"),
            (LOG_FILE_VAR, "/tmp/myshell.log"),
            (LOG_LEVEL_VAR, "debug"),
        ]);
        assert_eq!(config.home, Some(PathBuf::from("/home/user")));
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/myshell.log")));
        assert_eq!(config.log.level, LevelFilter::Debug);

        let config = config_from(&[(LOG_LEVEL_VAR, "loud")]);
        assert_eq!(config.log.level, LevelFilter::Info);
    }
}
