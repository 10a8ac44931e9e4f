//! One review cycle over every open pull request
//!
//! This is where errors stop: a failure on one PR is logged and the
//! cycle moves on to the next PR.

use std::fmt;

use gh_client::{Credentials, GitHubClient, PullRequest, PullRequestState};
use log::{error, info, warn};

use crate::error::Result;
use crate::evaluator::Evaluator;

/// What a cycle is allowed to do besides labelling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleOptions {
    /// Post the instructions comment where it is missing
    pub post_instructions: bool,
    /// Merge PRs once they are approved
    pub auto_merge: bool,
    /// Log decisions without sending any mutating request
    pub dry_run: bool,
}

/// What happened to a single PR
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrOutcome {
    pub commented: bool,
    pub relabeled: bool,
    pub merged: bool,
}

/// Counters for one cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub processed: usize,
    pub commented: usize,
    pub relabeled: usize,
    pub merged: usize,
    pub failed: usize,
}

impl CycleReport {
    fn record(&mut self, outcome: PrOutcome) {
        self.processed += 1;
        self.commented += usize::from(outcome.commented);
        self.relabeled += usize::from(outcome.relabeled);
        self.merged += usize::from(outcome.merged);
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} PRs processed: {} commented, {} relabeled, {} merged, {} failed",
            self.processed, self.commented, self.relabeled, self.merged, self.failed
        )
    }
}

pub struct ReviewBot<C: GitHubClient> {
    evaluator: Evaluator<C>,
    credentials: Option<Credentials>,
    options: CycleOptions,
}

impl<C: GitHubClient> ReviewBot<C> {
    /// Credentials may only be missing in a dry run
    pub fn new(
        evaluator: Evaluator<C>,
        credentials: Option<Credentials>,
        options: CycleOptions,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            options.dry_run || credentials.is_some(),
            "No credentials configured. Set [oauth] or [basic] in the config, \
             or provide GITHUB_TOKEN"
        );
        Ok(Self {
            evaluator,
            credentials,
            options,
        })
    }

    pub fn evaluator(&self) -> &Evaluator<C> {
        &self.evaluator
    }

    /// Credentials for a write, `None` in a dry run
    fn writer(&self) -> Option<&Credentials> {
        if self.options.dry_run {
            None
        } else {
            self.credentials.as_ref()
        }
    }

    /// Review every open PR once
    ///
    /// Only a failure to list the PRs fails the cycle.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let prs = self.evaluator.list_pull_requests().await?;

        let mut report = CycleReport::default();
        for pr in &prs {
            match self.review(pr).await {
                Ok(outcome) => report.record(outcome),
                Err(e) => {
                    warn!("#{} ({}): {}", pr.number, pr.title, e);
                    report.failed += 1;
                }
            }
        }

        info!("{}: {}", self.evaluator.repository(), report);
        Ok(report)
    }

    /// Bring one PR up to date
    pub async fn review(&self, pr: &PullRequest) -> Result<PrOutcome> {
        let mut outcome = PrOutcome::default();
        if pr.state != PullRequestState::Open {
            info!("#{}: skipping {:?} pull request", pr.number, pr.state);
            return Ok(outcome);
        }

        if self.options.post_instructions
            && !self.evaluator.check_instructions_comment(pr.number).await?
        {
            match self.writer() {
                Some(credentials) => {
                    self.evaluator
                        .post_instructions_comment(credentials, pr.number)
                        .await?;
                    outcome.commented = true;
                }
                None => info!("#{}: [dry-run] would post instructions", pr.number),
            }
        }

        let labels = self.evaluator.check_labels(pr.number).await?;
        let status = self.evaluator.check_approval_comments(pr.number).await?;
        let names = labels.names();

        match self.writer() {
            Some(credentials) => {
                outcome.relabeled = self
                    .evaluator
                    .update_labels(credentials, pr.number, status.approved, &names)
                    .await?
                    .is_some();
            }
            None => {
                let delta = self.evaluator.plan_labels(status.approved, &names);
                if !delta.is_empty() {
                    info!(
                        "#{}: [dry-run] would add {:?}, remove {:?}",
                        pr.number, delta.add, delta.remove
                    );
                }
            }
        }

        if status.approved && self.options.auto_merge {
            match self.writer() {
                Some(credentials) => {
                    self.evaluator.merge(credentials, pr.number).await?;
                    outcome.merged = true;
                }
                None => info!("#{}: [dry-run] would merge", pr.number),
            }
        }

        Ok(outcome)
    }

    /// Run a cycle, logging instead of returning its error
    pub async fn run_cycle_logged(&self) -> Option<CycleReport> {
        match self.run_cycle().await {
            Ok(report) => Some(report),
            Err(e) => {
                error!(
                    "Review cycle for {} failed: {}",
                    self.evaluator.repository(),
                    e
                );
                None
            }
        }
    }
}
