use anyhow::{Context, Result};
use std::{
    env,
    path::{Path, PathBuf},
};

use crate::paths;

pub const CONFIG_FILE: &str = ".gh-review-bot.toml";

/// Find the config file to use
///
/// Searches in:
/// 1. Current working directory as .gh-review-bot.toml
/// 2. Home directory as .gh-review-bot.toml
/// 3. The XDG config directory as gh-review-bot/config.toml
///
/// Returns the first path that exists, None otherwise.
pub fn find_config_file() -> Option<PathBuf> {
    let candidates = [
        Some(PathBuf::from(CONFIG_FILE)),
        get_home_config_path(),
        paths::bot_config_path().ok(),
    ];

    candidates.into_iter().flatten().find(|path| path.is_file())
}

/// Load config file content
///
/// An explicit path must exist. Without one, the search order of
/// [`find_config_file`] applies.
///
/// Returns the path that was read together with its content.
pub fn load_config_file(explicit: Option<&Path>) -> Result<(PathBuf, String)> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => find_config_file().with_context(|| {
            format!(
                "No config file found. Create {} in the current or home directory, \
                 or pass --config",
                CONFIG_FILE
            )
        })?,
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());

    Ok((path, content))
}

/// Get the path to the config file in the home directory
///
/// Returns ~/.gh-review-bot.toml if HOME environment variable is set.
fn get_home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot.toml");
        std::fs::write(&path, "owner = \"acme\"\n").unwrap();

        let (loaded_from, content) = load_config_file(Some(&path)).unwrap();
        assert_eq!(loaded_from, path);
        assert_eq!(content, "owner = \"acme\"\n");
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = load_config_file(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
