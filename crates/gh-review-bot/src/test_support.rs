//! In-memory `GitHubClient` for tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use gh_client::{
    Comment, Credentials, GitHubClient, Label, MergeMethod, MergeResult, PullRequest,
    PullRequestState, Repository,
};
use gh_review_config::{BotConfig, LabelTransition};

use crate::evaluator::{Evaluator, ReviewSettings};

/// A request the fake received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchPullRequests,
    FetchLabels(u64),
    FetchComments(u64, Option<u8>),
    ReplaceLabels {
        number: u64,
        labels: Vec<String>,
        auth: &'static str,
    },
    CreateComment {
        number: u64,
        auth: &'static str,
    },
    Merge {
        number: u64,
        method: MergeMethod,
        auth: &'static str,
    },
}

#[derive(Debug, Default)]
struct FakeState {
    prs: Vec<PullRequest>,
    labels: HashMap<u64, Vec<Label>>,
    comments: HashMap<u64, Vec<Comment>>,
    calls: Vec<Call>,
    next_comment_id: u64,
}

/// Records every call and serves canned data
///
/// Writes update the stored labels and comments, so a later read sees
/// them.
#[derive(Debug, Default)]
pub struct FakeGitHubClient {
    state: Mutex<FakeState>,
    fail_reads: bool,
    fail_labels_for: Option<u64>,
    reject_merges: bool,
}

impl FakeGitHubClient {
    pub fn with_open_prs(self, numbers: &[u64]) -> Self {
        self.state.lock().unwrap().prs = numbers
            .iter()
            .map(|number| PullRequest {
                number: *number,
                state: PullRequestState::Open,
                title: format!("PR {}", number),
                author: "contributor".to_string(),
            })
            .collect();
        self
    }

    pub fn with_labels(self, number: u64, names: &[&str]) -> Self {
        self.state
            .lock()
            .unwrap()
            .labels
            .insert(number, names.iter().map(|name| Label::new(*name)).collect());
        self
    }

    pub fn with_comments(self, number: u64, bodies: &[&str]) -> Self {
        self.state
            .lock()
            .unwrap()
            .comments
            .insert(number, comments(bodies));
        self
    }

    /// Every read fails with a transport error
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Label reads of one PR fail
    pub fn failing_labels_for(mut self, number: u64) -> Self {
        self.fail_labels_for = Some(number);
        self
    }

    /// Merges answer `merged: false`
    pub fn rejecting_merges(mut self) -> Self {
        self.reject_merges = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Only the mutating calls, in order
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| {
                matches!(
                    call,
                    Call::ReplaceLabels { .. } | Call::CreateComment { .. } | Call::Merge { .. }
                )
            })
            .collect()
    }

    pub fn labels_of(&self, number: u64) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .labels
            .get(&number)
            .map(|labels| labels.iter().map(|l| l.name.clone()).collect())
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn check_reads(&self) -> anyhow::Result<()> {
        if self.fail_reads {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait]
impl GitHubClient for FakeGitHubClient {
    async fn fetch_pull_requests(
        &self,
        _repo: &Repository,
        state: PullRequestState,
    ) -> anyhow::Result<Vec<PullRequest>> {
        self.record(Call::FetchPullRequests);
        self.check_reads()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .prs
            .iter()
            .filter(|pr| pr.state == state)
            .cloned()
            .collect())
    }

    async fn fetch_issue_labels(
        &self,
        _repo: &Repository,
        number: u64,
    ) -> anyhow::Result<Vec<Label>> {
        self.record(Call::FetchLabels(number));
        self.check_reads()?;
        if self.fail_labels_for == Some(number) {
            anyhow::bail!("labels of #{} unavailable", number);
        }
        Ok(self
            .state
            .lock()
            .unwrap()
            .labels
            .get(&number)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_issue_comments(
        &self,
        _repo: &Repository,
        number: u64,
        page_size: Option<u8>,
    ) -> anyhow::Result<Vec<Comment>> {
        self.record(Call::FetchComments(number, page_size));
        self.check_reads()?;
        let mut comments = self
            .state
            .lock()
            .unwrap()
            .comments
            .get(&number)
            .cloned()
            .unwrap_or_default();
        if let Some(size) = page_size {
            comments.truncate(size as usize);
        }
        Ok(comments)
    }

    async fn replace_issue_labels(
        &self,
        credentials: &Credentials,
        _repo: &Repository,
        number: u64,
        labels: &[String],
    ) -> anyhow::Result<Vec<Label>> {
        self.record(Call::ReplaceLabels {
            number,
            labels: labels.to_vec(),
            auth: credentials.kind(),
        });
        let labels: Vec<Label> = labels.iter().map(Label::new).collect();
        self.state
            .lock()
            .unwrap()
            .labels
            .insert(number, labels.clone());
        Ok(labels)
    }

    async fn create_issue_comment(
        &self,
        credentials: &Credentials,
        _repo: &Repository,
        number: u64,
        body: &str,
    ) -> anyhow::Result<Comment> {
        self.record(Call::CreateComment {
            number,
            auth: credentials.kind(),
        });
        let mut state = self.state.lock().unwrap();
        state.next_comment_id += 1;
        let comment = Comment {
            id: state.next_comment_id,
            body: body.to_string(),
            author: "review-bot".to_string(),
            created_at: Utc::now(),
        };
        state
            .comments
            .entry(number)
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }

    async fn merge_pull_request(
        &self,
        credentials: &Credentials,
        _repo: &Repository,
        number: u64,
        merge_method: MergeMethod,
    ) -> anyhow::Result<MergeResult> {
        self.record(Call::Merge {
            number,
            method: merge_method,
            auth: credentials.kind(),
        });
        if self.reject_merges {
            return Ok(MergeResult {
                merged: false,
                sha: None,
                message: "Pull Request is not mergeable".to_string(),
            });
        }
        Ok(MergeResult {
            merged: true,
            sha: Some(format!("{:040x}", number)),
            message: "Pull Request successfully merged".to_string(),
        })
    }
}

pub fn comments(bodies: &[&str]) -> Vec<Comment> {
    bodies
        .iter()
        .enumerate()
        .map(|(idx, body)| Comment {
            id: idx as u64 + 1,
            body: body.to_string(),
            author: format!("reviewer-{}", idx),
            created_at: Utc::now(),
        })
        .collect()
}

pub fn token() -> Credentials {
    Credentials::Token("ghp_test".to_string())
}

pub fn config(transition: LabelTransition) -> BotConfig {
    BotConfig {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        label_transition: transition,
        ..BotConfig::default()
    }
}

pub fn evaluator(
    client: FakeGitHubClient,
    transition: LabelTransition,
) -> Evaluator<FakeGitHubClient> {
    let config = config(transition);
    let settings = ReviewSettings::from_config(&config).unwrap();
    Evaluator::new(client, config.repository(), settings)
}
