use crate::commands::BUILTINS;
use std::collections::BTreeSet;
use std::ops::Bound;
use std::fs;
use std::path::{Path, PathBuf};

/// Command names known to the shell: builtins plus every executable found on
/// the search path when the registry was built.
///
/// The snapshot is taken once and never refreshed, so programs installed or
/// removed afterwards are not reflected in completion.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    names: BTreeSet<String>,
}

impl CommandRegistry {
    /// Scans every directory in `search_path` (non-recursively).
    pub fn scan(search_path: &[PathBuf]) -> Self {
        let mut names: BTreeSet<String> = BUILTINS.iter().map(|b| b.to_string()).collect();
        let builtin_count = names.len();

        for dir in search_path {
            let entries = match fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(e) => {
                    log::debug!("skipping search path entry {}: {}", dir.display(), e);
                    continue;
                }
            };

            names.extend(
                entries
                    .flatten()
                    .filter(|e| is_executable(&e.path()))
                    .filter_map(|e| e.file_name().into_string().ok()),
            );
        }

        log::info!(
            "registry: {} executables from {} search path entries",
            names.len() - builtin_count,
            search_path.len()
        );
        Self { names }
    }

    /// Builds a registry from exactly the given names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Names starting with `prefix`, in lexicographic order.
    pub fn names_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.names
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .map(String::as_str)
            .take_while(move |name| name.starts_with(prefix))
    }

}

/// Finds the full path of a command by searching `search_path`.
pub fn find_executable(search_path: &[PathBuf], command: &str) -> Option<PathBuf> {
    search_path
        .iter()
        .map(|dir| dir.join(command))
        .find(|full| is_executable(full))
}

fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path).is_ok_and(|m| {
        m.is_file() && {
            #[cfg(unix)]
            {
                m.permissions().mode() & 0o111 != 0
            }
            #[cfg(not(unix))]
            {
                true
            }
        }
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn touch(dir: &Path, name: &str, mode: u32) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[test]
    fn test_scan_lists_executables_only() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "runme", 0o755);
        touch(dir.path(), "readme", 0o644);
        fs::create_dir(dir.path().join("subdir")).unwrap();

        let registry = CommandRegistry::scan(&[dir.path().to_path_buf()]);
        assert!(registry.names.contains("runme"));
        assert!(!registry.names.contains("readme"));
        assert!(!registry.names.contains("subdir"));
        for builtin in BUILTINS {
            assert!(registry.names.contains(*builtin));
        }
    }

    #[test]
    fn test_scan_skips_missing_dirs() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "tool", 0o700);
        let registry = CommandRegistry::scan(&[
            dir.path().join("does-not-exist"),
            dir.path().to_path_buf(),
        ]);
        assert!(registry.names.contains("tool"));
        assert_eq!(registry.names.len(), BUILTINS.len() + 1);
    }

    #[test]
    fn test_find_executable_respects_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        touch(first.path(), "dup", 0o644);
        let expected = touch(second.path(), "dup", 0o755);
        let later = touch(first.path(), "solo", 0o755);

        let search_path = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(find_executable(&search_path, "dup"), Some(expected));
        assert_eq!(find_executable(&search_path, "solo"), Some(later));
        assert_eq!(find_executable(&search_path, "absent"), None);
    }

    #[test]
    fn test_names_with_prefix() {
        let registry = CommandRegistry::from_names(["cat", "car", "cap", "dog", "c"]);
        let found: Vec<_> = registry.names_with_prefix("ca").collect();
        assert_eq!(found, vec!["cap", "car", "cat"]);
        assert_eq!(registry.names_with_prefix("z").count(), 0);
        assert_eq!(registry.names_with_prefix("").count(), 5);
        assert_eq!(registry.names_with_prefix("dog").collect::<Vec<_>>(), vec!["dog"]);
    }
}
