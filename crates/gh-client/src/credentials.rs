//! Bot credentials and token resolution
//!
//! Credentials are a plain value handed to every mutating call. There is
//! no global "authenticated" client state to reconfigure.

use crate::DEFAULT_HOST;
use anyhow::{Context, Result};
use log::debug;
use std::fmt;

/// Credentials the bot authenticates its writes with
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// OAuth application key and secret
    OAuth { key: String, secret: String },
    /// Username and password (or username and token)
    Basic { username: String, password: String },
    /// Personal access token
    Token(String),
}

impl Credentials {
    /// Lower rank wins when several credential sets are configured
    fn rank(&self) -> u8 {
        match self {
            Credentials::OAuth { .. } => 0,
            Credentials::Basic { .. } => 1,
            Credentials::Token(_) => 2,
        }
    }

    /// Pick the preferred credential set
    ///
    /// OAuth beats basic, basic beats a plain token. Returns `None` when
    /// no candidate is given.
    pub fn preferred(candidates: impl IntoIterator<Item = Credentials>) -> Option<Credentials> {
        candidates.into_iter().min_by_key(Credentials::rank)
    }

    /// Short name of the credential kind, safe to log
    pub fn kind(&self) -> &'static str {
        match self {
            Credentials::OAuth { .. } => "oauth",
            Credentials::Basic { .. } => "basic",
            Credentials::Token(_) => "token",
        }
    }
}

// Secrets never end up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::OAuth { key, .. } => f
                .debug_struct("OAuth")
                .field("key", key)
                .field("secret", &"***")
                .finish(),
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Credentials::Token(_) => f.debug_tuple("Token").field(&"***").finish(),
        }
    }
}

/// Resolves GitHub tokens for different hosts
///
/// Tries multiple sources in order:
/// 1. Host-specific env var (e.g., `GITHUB_TOKEN_GHE_EXAMPLE_COM`)
/// 2. `gh auth token --hostname {host}` command
/// 3. Generic `GITHUB_TOKEN` or `GH_TOKEN` (github.com only)
#[derive(Debug, Clone)]
pub struct TokenResolver {
    /// Cached default token from GITHUB_TOKEN/GH_TOKEN
    default_token: Option<String>,
}

impl Default for TokenResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenResolver {
    /// Create a new token resolver
    pub fn new() -> Self {
        let default_token = std::env::var("GITHUB_TOKEN")
            .or_else(|_| std::env::var("GH_TOKEN"))
            .ok()
            .filter(|token| !token.trim().is_empty());

        Self { default_token }
    }

    /// Name of the host-specific token variable
    pub fn env_key(host: &str) -> String {
        format!(
            "GITHUB_TOKEN_{}",
            host.replace(['.', '-'], "_").to_uppercase()
        )
    }

    /// Get a token for the given host
    ///
    /// # Arguments
    ///
    /// * `host` - The GitHub host (None = github.com)
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no source yields a token. Only a broken `gh`
    /// installation is reported as an error.
    pub async fn get_token(&self, host: Option<&str>) -> Result<Option<String>> {
        let host = host.unwrap_or(DEFAULT_HOST);

        // Try host-specific env var
        let env_key = Self::env_key(host);
        if let Ok(token) = std::env::var(&env_key) {
            debug!("Using token from env var {} for host {}", env_key, host);
            return Ok(Some(token));
        }

        // Try gh CLI with hostname
        debug!("Trying gh auth token for host {}", host);
        match tokio::process::Command::new("gh")
            .args(["auth", "token", "--hostname", host])
            .output()
            .await
        {
            Ok(output) if output.status.success() => {
                let token = String::from_utf8(output.stdout)
                    .context("Invalid UTF-8 in gh auth token output")?
                    .trim()
                    .to_string();
                if !token.is_empty() {
                    debug!("Using token from gh CLI for host {}", host);
                    return Ok(Some(token));
                }
            }
            Ok(_) => debug!("gh CLI has no token for host {}", host),
            Err(e) => debug!("gh CLI not available: {}", e),
        }

        // Fallback to default token (for github.com only)
        if host == DEFAULT_HOST {
            if let Some(ref token) = self.default_token {
                debug!("Using default token (GITHUB_TOKEN/GH_TOKEN) for github.com");
                return Ok(Some(token.clone()));
            }
        }

        Ok(None)
    }
}
