//! Bot configuration
//!
//! Configuration loaded from .gh-review-bot.toml.

use anyhow::{bail, Context, Result};
use gh_client::{Credentials, MergeMethod, Repository};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How label changes are derived from the review status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelTransition {
    /// Reach the target label state in a single edit
    #[default]
    Atomic,
    /// At most one label change per pair and cycle: a PR moving from
    /// needs-review to reviewed first loses needs-review, and gains
    /// reviewed on the next cycle
    Stepwise,
}

/// OAuth application credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthConfig {
    pub key: String,
    pub secret: String,
}

/// Basic auth credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuthConfig {
    pub username: String,
    pub password: String,
}

/// Bot configuration loaded from .gh-review-bot.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BotConfig {
    /// Repository owner (user or organization)
    #[serde(default)]
    pub owner: String,

    /// Repository name
    #[serde(default)]
    pub repo: String,

    /// GitHub Enterprise host, github.com when unset
    #[serde(default)]
    pub host: Option<String>,

    /// Number of approval comments that mark a PR as reviewed
    #[serde(default = "default_reviews_needed")]
    pub reviews_needed: usize,

    /// Label for PRs still waiting on reviews
    #[serde(default = "default_needs_review_label")]
    pub needs_review_label: String,

    /// Label for PRs with enough approvals
    #[serde(default = "default_reviewed_label")]
    pub reviewed_label: String,

    /// Body of the comment posted once on every PR
    #[serde(default = "default_instructions_comment")]
    pub instructions_comment: String,

    /// Regex a comment body must match to count as an approval
    #[serde(default = "default_approval_pattern")]
    pub approval_pattern: String,

    #[serde(default)]
    pub label_transition: LabelTransition,

    /// Post the instructions comment on PRs that lack it
    #[serde(default = "default_true")]
    pub post_instructions: bool,

    /// Merge PRs once they are reviewed
    #[serde(default)]
    pub auto_merge: bool,

    #[serde(default)]
    pub merge_method: MergeMethod,

    /// Seconds between two review cycles
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default)]
    pub oauth: Option<OAuthConfig>,

    #[serde(default)]
    pub basic: Option<BasicAuthConfig>,
}

fn default_reviews_needed() -> usize {
    2
}

fn default_needs_review_label() -> String {
    "needs-review".to_string()
}

fn default_reviewed_label() -> String {
    "reviewed".to_string()
}

fn default_instructions_comment() -> String {
    // Must not contain an approval phrase, or it counts as a review.
    "Thanks for the pull request! A maintainer will take a look soon.\n\n\
     Reviewers: leave an approving comment once you are happy with the \
     change. When enough reviewers have signed off, the `needs-review` \
     label is replaced by `reviewed`."
        .to_string()
}

fn default_approval_pattern() -> String {
    "LGTM|Looks good to me!".to_string()
}

fn default_true() -> bool {
    true
}

fn default_poll_interval_secs() -> u64 {
    60
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            host: None,
            reviews_needed: default_reviews_needed(),
            needs_review_label: default_needs_review_label(),
            reviewed_label: default_reviewed_label(),
            instructions_comment: default_instructions_comment(),
            approval_pattern: default_approval_pattern(),
            label_transition: LabelTransition::default(),
            post_instructions: default_true(),
            auto_merge: false,
            merge_method: MergeMethod::default(),
            poll_interval_secs: default_poll_interval_secs(),
            oauth: None,
            basic: None,
        }
    }
}

impl BotConfig {
    /// Load and validate the config
    ///
    /// Uses `explicit` when given, otherwise the first config file found
    /// in CWD, home directory or XDG config directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = Self::load_unchecked(explicit)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config without validating it
    ///
    /// For callers that override fields before calling [`validate`].
    ///
    /// [`validate`]: BotConfig::validate
    pub fn load_unchecked(explicit: Option<&Path>) -> Result<Self> {
        let (path, content) = crate::load_config_file(explicit)?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::info!("Loaded bot config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = Self::parse(content)?;
        config.validate()?;
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Check the invariants the bot relies on
    pub fn validate(&self) -> Result<()> {
        if self.owner.trim().is_empty() || self.repo.trim().is_empty() {
            bail!("Both `owner` and `repo` must be set");
        }
        if self.reviews_needed == 0 {
            bail!("`reviews_needed` must be at least 1");
        }
        if self.needs_review_label.is_empty() || self.reviewed_label.is_empty() {
            bail!("Label names must not be empty");
        }
        if self.needs_review_label == self.reviewed_label {
            bail!(
                "`needs_review_label` and `reviewed_label` must differ (both are '{}')",
                self.reviewed_label
            );
        }
        if self.post_instructions && self.instructions_comment.trim().is_empty() {
            bail!("`instructions_comment` must not be empty when `post_instructions` is on");
        }
        if self.poll_interval_secs == 0 {
            bail!("`poll_interval_secs` must be at least 1");
        }
        let approval = regex::Regex::new(&self.approval_pattern).with_context(|| {
            format!("Invalid `approval_pattern` '{}'", self.approval_pattern)
        })?;
        if self.post_instructions && approval.is_match(&self.instructions_comment) {
            bail!(
                "`instructions_comment` matches `approval_pattern` '{}', \
                 the bot's own comment would count as an approval",
                self.approval_pattern
            );
        }
        Ok(())
    }

    /// The repository the bot watches
    pub fn repository(&self) -> Repository {
        Repository::new(self.owner.trim(), self.repo.trim())
    }

    /// Credentials for mutating calls
    ///
    /// OAuth is preferred over basic auth, and both over a resolved
    /// personal `token`.
    pub fn credentials(&self, token: Option<String>) -> Option<Credentials> {
        let oauth = self.oauth.as_ref().map(|c| Credentials::OAuth {
            key: c.key.clone(),
            secret: c.secret.clone(),
        });
        let basic = self.basic.as_ref().map(|c| Credentials::Basic {
            username: c.username.clone(),
            password: c.password.clone(),
        });

        Credentials::preferred(
            oauth
                .into_iter()
                .chain(basic)
                .chain(token.map(Credentials::Token)),
        )
    }
}
