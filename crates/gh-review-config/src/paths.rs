//! Configuration directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/gh-review-bot/`
//! - macOS: `~/Library/Application Support/gh-review-bot/`
//! - Windows: `%APPDATA%\gh-review-bot\`

use anyhow::{Context, Result};
use std::path::PathBuf;

pub const APP_NAME: &str = "gh-review-bot";

/// Get the application config directory
/// Returns ~/.config/gh-review-bot/ on Linux, ~/Library/Application Support/gh-review-bot/ on macOS
///
/// The directory is not created; the bot only ever reads from it.
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_NAME))
}

/// Get path to the global bot config file
pub fn bot_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_ends_with_app_name() {
        if let Ok(dir) = config_dir() {
            assert!(dir.ends_with(APP_NAME));
        }
    }

    #[test]
    fn test_bot_config_path() {
        if let Ok(path) = bot_config_path() {
            assert!(path.ends_with("config.toml"));
            assert!(path.parent().unwrap().ends_with(APP_NAME));
        }
    }
}
