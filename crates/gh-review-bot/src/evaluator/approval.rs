//! Counting approval comments

use anyhow::Context;
use gh_client::Comment;
use regex::Regex;

/// Matches comment bodies that sign off on a PR
///
/// Matching is case-sensitive unless the pattern says otherwise and
/// looks anywhere in the body.
#[derive(Debug, Clone)]
pub struct ApprovalMatcher {
    pattern: Regex,
}

impl ApprovalMatcher {
    pub fn new(pattern: &str) -> anyhow::Result<Self> {
        let pattern = Regex::new(pattern)
            .with_context(|| format!("Invalid approval pattern '{}'", pattern))?;
        Ok(Self { pattern })
    }

    pub fn is_approval(&self, body: &str) -> bool {
        !body.is_empty() && self.pattern.is_match(body)
    }

    pub fn count(&self, comments: &[Comment]) -> usize {
        comments
            .iter()
            .filter(|comment| self.is_approval(&comment.body))
            .count()
    }
}

/// Derived review status of a PR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewStatus {
    pub approved: bool,
    pub approvals: usize,
}

impl ReviewStatus {
    pub fn evaluate(
        comments: &[Comment],
        matcher: &ApprovalMatcher,
        reviews_needed: usize,
    ) -> Self {
        let approvals = matcher.count(comments);
        Self {
            approved: approvals >= reviews_needed,
            approvals,
        }
    }
}
