//! Error type returned by every review operation

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReviewError>;

#[derive(Debug, Error)]
pub enum ReviewError {
    /// Rejected before any request was sent
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// GitHub answered 404 (unknown repository, PR or missing access)
    #[error("not found: {0:#}")]
    NotFound(anyhow::Error),

    /// Any other failure talking to GitHub
    #[error("GitHub request failed: {0:#}")]
    Transport(anyhow::Error),

    /// The merge endpoint answered but did not merge
    #[error("PR #{number} was not merged: {message}")]
    MergeRejected { number: u64, message: String },
}

impl From<anyhow::Error> for ReviewError {
    fn from(err: anyhow::Error) -> Self {
        if is_not_found(&err) {
            ReviewError::NotFound(err)
        } else {
            ReviewError::Transport(err)
        }
    }
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<gh_client::octocrab::Error>(),
            Some(gh_client::octocrab::Error::GitHub { source, .. })
                if source.status_code.as_u16() == 404
        )
    })
}

/// Reject the PR number `0`, which GitHub never assigns
pub fn require_pr_number(number: u64) -> Result<u64> {
    if number == 0 {
        return Err(ReviewError::InvalidInput(
            "pull request number is required".to_string(),
        ));
    }
    Ok(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use bytes::Bytes;
    use gh_client::octocrab;
    use http_body_util::{BodyExt, Full};

    /// An octocrab error as produced for a failed GitHub response
    async fn github_error(status: u16, message: &str) -> octocrab::Error {
        let body = Full::new(Bytes::from(format!(r#"{{"message":"{}"}}"#, message)))
            .map_err(|never| -> octocrab::Error { match never {} })
            .boxed();
        let response = http::Response::builder()
            .status(status)
            .body(body)
            .unwrap();
        match octocrab::map_github_error(response).await {
            Err(err) => err,
            Ok(_) => panic!("status {} should be mapped to an error", status),
        }
    }

    #[tokio::test]
    async fn test_github_404_is_not_found() {
        let err: ReviewError = Err::<(), _>(github_error(404, "Not Found").await)
            .context("Failed to fetch labels of acme/widgets#3")
            .unwrap_err()
            .into();
        assert!(matches!(err, ReviewError::NotFound(_)), "got {:?}", err);
        assert!(err.to_string().starts_with("not found: Failed to fetch labels"));
    }

    #[tokio::test]
    async fn test_other_github_status_is_transport() {
        let err: ReviewError = Err::<(), _>(github_error(502, "Bad Gateway").await)
            .context("Failed to list pull requests")
            .unwrap_err()
            .into();
        assert!(matches!(err, ReviewError::Transport(_)), "got {:?}", err);
    }

    #[test]
    fn test_plain_errors_are_transport() {
        let err: ReviewError = anyhow::anyhow!("connection reset").into();
        assert!(matches!(err, ReviewError::Transport(_)));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_context_is_rendered() {
        let err: ReviewError = anyhow::anyhow!("timeout")
            .context("Failed to fetch labels of acme/widgets#3")
            .into();
        assert_eq!(
            err.to_string(),
            "GitHub request failed: Failed to fetch labels of acme/widgets#3: timeout"
        );
    }

    #[test]
    fn test_require_pr_number() {
        assert_eq!(require_pr_number(12).unwrap(), 12);
        assert!(matches!(
            require_pr_number(0),
            Err(ReviewError::InvalidInput(_))
        ));
    }
}
