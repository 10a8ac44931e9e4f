//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab library.
//! This client makes real API calls without any caching.

use crate::client::GitHubClient;
use crate::credentials::Credentials;
use crate::types::{
    Comment, Label, MergeMethod, MergeResult, PullRequest, PullRequestState, Repository,
};
use crate::DEFAULT_HOST;
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use octocrab::Octocrab;
use std::sync::Arc;

/// Page size used when walking paginated listings
const PER_PAGE: u8 = 100;

/// Direct GitHub API client using octocrab
///
/// Reads go through the octocrab instance the client was built with.
/// Writes build a fresh instance from the credentials passed to each
/// call, against the same base URI.
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
    base_uri: Option<String>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    ///
    /// Writes will target public GitHub.
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self {
            octocrab,
            base_uri: None,
        }
    }

    /// Create a new client for the given host
    ///
    /// # Arguments
    ///
    /// * `host` - The GitHub host (None = github.com)
    /// * `read_credentials` - Credentials for read requests; `None` reads
    ///   anonymously (subject to low rate limits)
    pub fn connect(host: Option<&str>, read_credentials: Option<&Credentials>) -> Result<Self> {
        let base_uri = enterprise_base_uri(host);
        let octocrab = build_octocrab(base_uri.as_deref(), read_credentials)?;
        debug!(
            "GitHub client created for host: {}",
            host.unwrap_or(DEFAULT_HOST)
        );

        Ok(Self {
            octocrab: Arc::new(octocrab),
            base_uri,
        })
    }

    /// Get a reference to the underlying octocrab instance
    pub fn octocrab(&self) -> &Octocrab {
        &self.octocrab
    }

    /// Build an octocrab instance authenticated for a single write
    fn authenticated(&self, credentials: &Credentials) -> Result<Octocrab> {
        debug!("Authenticating write with {} credentials", credentials.kind());
        build_octocrab(self.base_uri.as_deref(), Some(credentials))
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn fetch_pull_requests(
        &self,
        repo: &Repository,
        state: PullRequestState,
    ) -> anyhow::Result<Vec<PullRequest>> {
        debug!("Fetching {:?} PRs for {}", state, repo);

        let filter = match state {
            PullRequestState::Open => octocrab::params::State::Open,
            PullRequestState::Closed | PullRequestState::Merged => {
                octocrab::params::State::Closed
            }
        };

        let first_page = self
            .octocrab
            .pulls(&repo.owner, &repo.name)
            .list()
            .state(filter)
            .per_page(PER_PAGE)
            .page(1u32)
            .send()
            .await
            .with_context(|| format!("Failed to list pull requests of {}", repo))?;

        let mut prs: Vec<PullRequest> = self
            .octocrab
            .all_pages(first_page)
            .await?
            .iter()
            .map(convert_pull_request)
            .collect();

        if state == PullRequestState::Merged {
            prs.retain(|pr| pr.state == PullRequestState::Merged);
        }

        debug!("Fetched {} PRs for {}", prs.len(), repo);
        Ok(prs)
    }

    async fn fetch_issue_labels(
        &self,
        repo: &Repository,
        number: u64,
    ) -> anyhow::Result<Vec<Label>> {
        debug!("Fetching labels for {}#{}", repo, number);

        let first_page = self
            .octocrab
            .issues(&repo.owner, &repo.name)
            .list_labels_for_issue(number)
            .per_page(PER_PAGE)
            .send()
            .await
            .with_context(|| format!("Failed to fetch labels of {}#{}", repo, number))?;

        let labels = self
            .octocrab
            .all_pages(first_page)
            .await?
            .into_iter()
            .map(|label| Label::new(label.name))
            .collect();

        Ok(labels)
    }

    async fn fetch_issue_comments(
        &self,
        repo: &Repository,
        number: u64,
        page_size: Option<u8>,
    ) -> anyhow::Result<Vec<Comment>> {
        debug!(
            "Fetching comments for {}#{} (page size {:?})",
            repo, number, page_size
        );

        let first_page = self
            .octocrab
            .issues(&repo.owner, &repo.name)
            .list_comments(number)
            .per_page(page_size.unwrap_or(PER_PAGE))
            .send()
            .await
            .with_context(|| format!("Failed to fetch comments of {}#{}", repo, number))?;

        let comments = match page_size {
            Some(_) => first_page.items,
            None => self.octocrab.all_pages(first_page).await?,
        };

        Ok(comments.into_iter().map(convert_comment).collect())
    }

    async fn replace_issue_labels(
        &self,
        credentials: &Credentials,
        repo: &Repository,
        number: u64,
        labels: &[String],
    ) -> anyhow::Result<Vec<Label>> {
        debug!("Replacing labels of {}#{} with {:?}", repo, number, labels);

        let labels = self
            .authenticated(credentials)?
            .issues(&repo.owner, &repo.name)
            .replace_all_labels(number, labels)
            .await
            .with_context(|| format!("Failed to edit labels of {}#{}", repo, number))?;

        Ok(labels.into_iter().map(|label| Label::new(label.name)).collect())
    }

    async fn create_issue_comment(
        &self,
        credentials: &Credentials,
        repo: &Repository,
        number: u64,
        body: &str,
    ) -> anyhow::Result<Comment> {
        debug!("Creating comment on {}#{}", repo, number);

        let comment = self
            .authenticated(credentials)?
            .issues(&repo.owner, &repo.name)
            .create_comment(number, body)
            .await
            .with_context(|| format!("Failed to comment on {}#{}", repo, number))?;

        Ok(convert_comment(comment))
    }

    async fn merge_pull_request(
        &self,
        credentials: &Credentials,
        repo: &Repository,
        number: u64,
        merge_method: MergeMethod,
    ) -> anyhow::Result<MergeResult> {
        debug!("Merging {}#{} ({:?})", repo, number, merge_method);

        let method = match merge_method {
            MergeMethod::Merge => octocrab::params::pulls::MergeMethod::Merge,
            MergeMethod::Squash => octocrab::params::pulls::MergeMethod::Squash,
            MergeMethod::Rebase => octocrab::params::pulls::MergeMethod::Rebase,
        };

        let merge = self
            .authenticated(credentials)?
            .pulls(&repo.owner, &repo.name)
            .merge(number)
            .method(method)
            .send()
            .await
            .with_context(|| format!("Failed to merge {}#{}", repo, number))?;

        Ok(MergeResult {
            merged: merge.merged,
            sha: merge.sha,
            message: merge.message.unwrap_or_default(),
        })
    }
}

/// API base URI for GitHub Enterprise hosts, `None` for github.com
fn enterprise_base_uri(host: Option<&str>) -> Option<String> {
    host.filter(|h| *h != DEFAULT_HOST)
        .map(|h| format!("https://{}/api/v3", h))
}

/// Build an octocrab instance, optionally authenticated
///
/// OAuth application key/secret pairs are sent as basic auth, which is
/// how GitHub accepts client credentials on the REST API.
fn build_octocrab(base_uri: Option<&str>, credentials: Option<&Credentials>) -> Result<Octocrab> {
    let mut builder = Octocrab::builder();

    builder = match credentials {
        Some(Credentials::Token(token)) => builder.personal_token(token.clone()),
        Some(Credentials::Basic { username, password }) => {
            builder.basic_auth(username.clone(), password.clone())
        }
        Some(Credentials::OAuth { key, secret }) => builder.basic_auth(key.clone(), secret.clone()),
        None => builder,
    };

    if let Some(uri) = base_uri {
        builder = builder.base_uri(uri).context("Failed to set base URI")?;
    }

    builder.build().context("Failed to build Octocrab client")
}

/// Convert octocrab PullRequest to our PullRequest type
fn convert_pull_request(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        state: convert_pull_request_state(pr.state.as_ref(), pr.merged_at.is_some()),
        title: pr.title.clone().unwrap_or_default(),
        author: pr
            .user
            .as_ref()
            .map(|u| u.login.clone())
            .unwrap_or_else(|| "unknown".to_string()),
    }
}

/// Derive our three-valued state from GitHub's open/closed + merged_at
fn convert_pull_request_state(
    state: Option<&octocrab::models::IssueState>,
    merged: bool,
) -> PullRequestState {
    use octocrab::models::IssueState;
    if merged {
        return PullRequestState::Merged;
    }
    match state {
        Some(IssueState::Closed) => PullRequestState::Closed,
        _ => PullRequestState::Open,
    }
}

/// Convert octocrab issue Comment to our Comment type
fn convert_comment(comment: octocrab::models::issues::Comment) -> Comment {
    Comment {
        id: comment.id.0,
        body: comment.body.unwrap_or_default(),
        author: comment.user.login,
        created_at: comment.created_at,
    }
}
