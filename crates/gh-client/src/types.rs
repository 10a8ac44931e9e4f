//! GitHub API data transfer objects
//!
//! These types represent the data returned from the GitHub API.
//! They are intentionally separate from octocrab's models so the bot's
//! decision logic can be tested without the network.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of a repository (`owner/name`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repository {
    /// User or organization owning the repository
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for Repository {
    type Err = anyhow::Error;

    /// Parse `owner/name`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(anyhow::anyhow!(
                "Invalid repository '{}', expected 'owner/name'",
                s
            )),
        }
    }
}

/// State of a pull request
///
/// When used as a listing filter, `Merged` lists closed pull requests
/// (GitHub has no separate filter for merged ones).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestState {
    /// Open for review
    #[default]
    Open,
    /// Closed without merge
    Closed,
    /// Closed by merging
    Merged,
}

/// A pull request from the GitHub API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number (e.g., 123)
    pub number: u64,

    /// Open, closed or merged
    pub state: PullRequestState,

    /// PR title
    pub title: String,

    /// Author's GitHub username
    pub author: String,
}

/// A label attached to an issue or pull request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    /// The name of the label
    pub name: String,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An issue comment on a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// GitHub comment ID
    pub id: u64,
    /// Comment body text (empty when GitHub returns none)
    pub body: String,
    /// Author's GitHub username
    pub author: String,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
}

/// Merge method for pull requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMethod {
    /// Create a merge commit
    #[default]
    Merge,
    /// Squash all commits into one
    Squash,
    /// Rebase commits onto the base branch
    Rebase,
}

/// Result of a merge operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeResult {
    /// Whether the merge was successful
    pub merged: bool,
    /// Commit SHA of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge operation
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_from_str() {
        let repo: Repository = "rust-lang/rust".parse().unwrap();
        assert_eq!(repo, Repository::new("rust-lang", "rust"));
        assert_eq!(repo.to_string(), "rust-lang/rust");
    }

    #[test]
    fn test_repository_from_str_rejects_malformed() {
        for input in ["", "rust", "/rust", "rust-lang/", "a/b/c"] {
            assert!(
                input.parse::<Repository>().is_err(),
                "'{}' should not parse",
                input
            );
        }
    }

    #[test]
    fn test_pull_request_state_default() {
        assert_eq!(PullRequestState::default(), PullRequestState::Open);
    }

    #[test]
    fn test_merge_method_serde() {
        let methods = vec![
            (MergeMethod::Merge, "\"merge\""),
            (MergeMethod::Squash, "\"squash\""),
            (MergeMethod::Rebase, "\"rebase\""),
        ];

        for (method, expected_json) in methods {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, expected_json);

            let deserialized: MergeMethod = serde_json::from_str(&json).unwrap();
            assert_eq!(deserialized, method);
        }
    }

    #[test]
    fn test_comment_serialization() {
        let comment = Comment {
            id: 7,
            body: "LGTM".to_string(),
            author: "reviewer".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&comment).unwrap();
        let deserialized: Comment = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, comment);
    }
}
