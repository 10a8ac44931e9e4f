//! GitHub API client for the review bot
//!
//! This crate provides a trait-based GitHub API client covering exactly
//! what the review bot needs from the forge: listing pull requests,
//! reading issue labels and comments, and the three mutations (replace
//! labels, create comment, merge).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  reads:  fetch_pull_requests()                   │
//! │          fetch_issue_labels()                    │
//! │          fetch_issue_comments()                  │
//! │  writes: replace_issue_labels(&Credentials, ..)  │
//! │          create_issue_comment(&Credentials, ..)  │
//! │          merge_pull_request(&Credentials, ..)    │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//!              ┌─────────────────┐
//!              │ OctocrabClient  │
//!              │ (direct API)    │
//!              └─────────────────┘
//! ```
//!
//! Mutating calls take the credentials explicitly. The client never
//! holds a mutable "current login"; every write builds its own
//! authenticated octocrab instance.
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{Credentials, GitHubClient, OctocrabClient, PullRequestState, Repository};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let credentials = Credentials::Token("token".to_string());
//! let client = OctocrabClient::connect(None, Some(&credentials))?;
//! let repo = Repository::new("rust-lang", "rust");
//!
//! let prs = client.fetch_pull_requests(&repo, PullRequestState::Open).await?;
//! for pr in prs {
//!     let labels = client.fetch_issue_labels(&repo, pr.number).await?;
//!     println!("#{} has {} labels", pr.number, labels.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod credentials;
pub mod octocrab_client;
pub mod types;

/// Default GitHub host (public GitHub)
pub const DEFAULT_HOST: &str = "github.com";

pub use client::GitHubClient;
pub use credentials::{Credentials, TokenResolver};
pub use octocrab_client::OctocrabClient;
pub use types::{
    Comment, Label, MergeMethod, MergeResult, PullRequest, PullRequestState, Repository,
};

// Re-export octocrab so consumers don't need to depend on it directly
pub use octocrab;
