//! Review-state evaluation for a single repository
//!
//! Each operation fetches what it needs through the [`GitHubClient`],
//! makes its decision with the pure helpers in the submodules and
//! performs at most one mutating call. Nothing is remembered between
//! calls.

pub mod approval;
pub mod instructions;
pub mod labels;
pub mod transition;

use anyhow::Context;
use gh_client::{
    Comment, Credentials, GitHubClient, Label, MergeMethod, MergeResult, PullRequest,
    PullRequestState, Repository,
};
use gh_review_config::{BotConfig, LabelTransition};
use log::{debug, info};

use crate::error::{require_pr_number, Result, ReviewError};
pub use approval::{ApprovalMatcher, ReviewStatus};
pub use labels::{LabelCheck, TrackedLabels};
pub use transition::{compute_delta, LabelDelta};

/// Comments inspected when counting approvals
pub const APPROVAL_PAGE_SIZE: u8 = 100;

/// Decision parameters taken from the bot config
#[derive(Debug, Clone)]
pub struct ReviewSettings {
    pub tracked: TrackedLabels,
    pub reviews_needed: usize,
    pub approval: ApprovalMatcher,
    pub instructions_comment: String,
    pub transition: LabelTransition,
    pub merge_method: MergeMethod,
}

impl ReviewSettings {
    pub fn from_config(config: &BotConfig) -> anyhow::Result<Self> {
        Ok(Self {
            tracked: TrackedLabels {
                needs_review: config.needs_review_label.clone(),
                reviewed: config.reviewed_label.clone(),
            },
            reviews_needed: config.reviews_needed,
            approval: ApprovalMatcher::new(&config.approval_pattern)
                .context("Failed to build approval matcher")?,
            instructions_comment: config.instructions_comment.clone(),
            transition: config.label_transition,
            merge_method: config.merge_method,
        })
    }
}

/// Evaluates and updates the review state of PRs in one repository
#[derive(Debug)]
pub struct Evaluator<C: GitHubClient> {
    client: C,
    repo: Repository,
    settings: ReviewSettings,
}

impl<C: GitHubClient> Evaluator<C> {
    pub fn new(client: C, repo: Repository, settings: ReviewSettings) -> Self {
        Self {
            client,
            repo,
            settings,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    pub fn settings(&self) -> &ReviewSettings {
        &self.settings
    }

    /// List the open pull requests of the repository
    ///
    /// An empty listing is not an error.
    pub async fn list_pull_requests(&self) -> Result<Vec<PullRequest>> {
        let prs = self
            .client
            .fetch_pull_requests(&self.repo, PullRequestState::Open)
            .await?;

        if prs.is_empty() {
            info!("No open pull requests in {}", self.repo);
        } else {
            debug!("{} open pull requests in {}", prs.len(), self.repo);
        }
        Ok(prs)
    }

    /// Which tracked labels a PR carries
    pub async fn check_labels(&self, number: u64) -> Result<LabelCheck> {
        let number = require_pr_number(number)?;
        let labels = self.client.fetch_issue_labels(&self.repo, number).await?;
        let check = LabelCheck::scan(labels, &self.settings.tracked);

        debug!(
            "#{}: needs-review={} reviewed={} ({} labels)",
            number,
            check.labeled_needs_review,
            check.labeled_reviewed,
            check.labels.len()
        );
        Ok(check)
    }

    /// Count approval comments against the threshold
    ///
    /// Only the first [`APPROVAL_PAGE_SIZE`] comments are inspected.
    pub async fn check_approval_comments(&self, number: u64) -> Result<ReviewStatus> {
        let number = require_pr_number(number)?;
        let comments = self
            .client
            .fetch_issue_comments(&self.repo, number, Some(APPROVAL_PAGE_SIZE))
            .await?;
        let status = ReviewStatus::evaluate(
            &comments,
            &self.settings.approval,
            self.settings.reviews_needed,
        );

        debug!(
            "#{}: {}/{} approvals, approved={}",
            number, status.approvals, self.settings.reviews_needed, status.approved
        );
        Ok(status)
    }

    /// Whether the instructions comment is already on the PR
    ///
    /// A failed fetch is an error, never a `false`.
    pub async fn check_instructions_comment(&self, number: u64) -> Result<bool> {
        let number = require_pr_number(number)?;
        let comments = self
            .client
            .fetch_issue_comments(&self.repo, number, None)
            .await?;
        let posted =
            instructions::instructions_posted(&comments, &self.settings.instructions_comment);

        debug!("#{}: instructions comment posted={}", number, posted);
        Ok(posted)
    }

    /// Label change for `approved` given the PR's current label names
    pub fn plan_labels(&self, approved: bool, labels: &[String]) -> LabelDelta {
        compute_delta(
            self.settings.transition,
            approved,
            labels,
            &self.settings.tracked,
        )
    }

    /// Bring the PR's labels in line with `approved`
    ///
    /// Sends the full new label set (replace-all) only when something
    /// changes. Returns the labels reported back by GitHub, or `None`
    /// when no request was needed.
    pub async fn update_labels(
        &self,
        credentials: &Credentials,
        number: u64,
        approved: bool,
        labels: &[String],
    ) -> Result<Option<Vec<Label>>> {
        let number = require_pr_number(number)?;
        let delta = self.plan_labels(approved, labels);
        if delta.is_empty() {
            debug!("#{}: labels already up to date", number);
            return Ok(None);
        }

        let next = delta.apply(labels);
        info!(
            "#{}: adding {:?}, removing {:?}",
            number, delta.add, delta.remove
        );
        let updated = self
            .client
            .replace_issue_labels(credentials, &self.repo, number, &next)
            .await?;
        Ok(Some(updated))
    }

    /// Post the instructions comment
    pub async fn post_instructions_comment(
        &self,
        credentials: &Credentials,
        number: u64,
    ) -> Result<Comment> {
        let number = require_pr_number(number)?;
        let comment = self
            .client
            .create_issue_comment(
                credentials,
                &self.repo,
                number,
                &self.settings.instructions_comment,
            )
            .await?;

        info!("#{}: posted instructions comment {}", number, comment.id);
        Ok(comment)
    }

    /// Merge the PR with the configured merge method
    pub async fn merge(&self, credentials: &Credentials, number: u64) -> Result<MergeResult> {
        let number = require_pr_number(number)?;
        let result = self
            .client
            .merge_pull_request(credentials, &self.repo, number, self.settings.merge_method)
            .await?;

        if !result.merged {
            return Err(ReviewError::MergeRejected {
                number,
                message: result.message,
            });
        }

        info!(
            "#{}: merged as {}",
            number,
            result.sha.as_deref().unwrap_or("<unknown sha>")
        );
        Ok(result)
    }
}
