//! GitHub client trait
//!
//! This module defines the core `GitHubClient` trait that all client
//! implementations must satisfy.

use crate::credentials::Credentials;
use crate::types::{
    Comment, Label, MergeMethod, MergeResult, PullRequest, PullRequestState, Repository,
};
use async_trait::async_trait;

/// GitHub API client trait
///
/// Defines the interface for interacting with the GitHub API.
/// Read operations use whatever access the implementation was built
/// with. Write operations receive the credentials to authenticate with
/// on every call.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::{GitHubClient, PullRequest, PullRequestState, Repository};
///
/// async fn list_prs(client: &dyn GitHubClient) -> anyhow::Result<Vec<PullRequest>> {
///     let repo = Repository::new("rust-lang", "rust");
///     client.fetch_pull_requests(&repo, PullRequestState::Open).await
/// }
/// ```
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Fetch pull requests for a repository
    ///
    /// # Arguments
    ///
    /// * `repo` - Repository identity
    /// * `state` - Which pull requests to list (open, closed or all)
    ///
    /// # Returns
    ///
    /// Every pull request in the requested state, across all pages.
    async fn fetch_pull_requests(
        &self,
        repo: &Repository,
        state: PullRequestState,
    ) -> anyhow::Result<Vec<PullRequest>>;

    /// Fetch the labels attached to an issue or pull request
    ///
    /// # Arguments
    ///
    /// * `repo` - Repository identity
    /// * `number` - Issue or pull request number
    async fn fetch_issue_labels(
        &self,
        repo: &Repository,
        number: u64,
    ) -> anyhow::Result<Vec<Label>>;

    /// Fetch issue comments of a pull request in chronological order
    ///
    /// # Arguments
    ///
    /// * `repo` - Repository identity
    /// * `number` - Issue or pull request number
    /// * `page_size` - `Some(n)` fetches only the first page of `n`
    ///   comments, `None` walks every page
    async fn fetch_issue_comments(
        &self,
        repo: &Repository,
        number: u64,
        page_size: Option<u8>,
    ) -> anyhow::Result<Vec<Comment>>;

    // === Mutations ===

    /// Replace the complete label set of an issue or pull request
    ///
    /// This is replace-all, not a patch: labels missing from `labels`
    /// are removed.
    ///
    /// # Returns
    ///
    /// The label set as reported back by GitHub.
    async fn replace_issue_labels(
        &self,
        credentials: &Credentials,
        repo: &Repository,
        number: u64,
        labels: &[String],
    ) -> anyhow::Result<Vec<Label>>;

    /// Create an issue comment on a pull request
    ///
    /// # Returns
    ///
    /// The created comment.
    async fn create_issue_comment(
        &self,
        credentials: &Credentials,
        repo: &Repository,
        number: u64,
        body: &str,
    ) -> anyhow::Result<Comment>;

    /// Merge a pull request
    ///
    /// # Arguments
    ///
    /// * `merge_method` - How to merge (merge commit, squash, or rebase)
    ///
    /// # Returns
    ///
    /// Result of the merge operation. GitHub may answer without error
    /// and still report `merged == false`.
    async fn merge_pull_request(
        &self,
        credentials: &Credentials,
        repo: &Repository,
        number: u64,
        merge_method: MergeMethod,
    ) -> anyhow::Result<MergeResult>;
}
