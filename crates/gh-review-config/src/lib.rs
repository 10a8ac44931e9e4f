//! Configuration for gh-review-bot
//!
//! This crate provides:
//! - File path utilities for the config directory
//! - Configuration file discovery (TOML)
//! - Bot configuration (BotConfig) with defaults and validation

pub mod bot_config;
pub mod config_file;
pub mod paths;

pub use bot_config::{BasicAuthConfig, BotConfig, LabelTransition, OAuthConfig};
pub use config_file::{find_config_file, load_config_file};
