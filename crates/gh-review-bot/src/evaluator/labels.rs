//! Review labels currently on a pull request

use gh_client::Label;

/// Names of the two labels the bot manages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedLabels {
    pub needs_review: String,
    pub reviewed: String,
}

/// Which tracked labels a PR carries, plus everything it carries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelCheck {
    pub labeled_needs_review: bool,
    pub labeled_reviewed: bool,
    pub labels: Vec<Label>,
}

impl LabelCheck {
    /// Single pass over `labels`; duplicates of a name are harmless
    pub fn scan(labels: Vec<Label>, tracked: &TrackedLabels) -> Self {
        let mut check = LabelCheck::default();
        for label in &labels {
            if label.name == tracked.needs_review {
                check.labeled_needs_review = true;
            } else if label.name == tracked.reviewed {
                check.labeled_reviewed = true;
            }
        }
        check.labels = labels;
        check
    }

    /// Label names in the order GitHub returned them
    pub fn names(&self) -> Vec<String> {
        self.labels.iter().map(|label| label.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tracked() -> TrackedLabels {
        TrackedLabels {
            needs_review: "needs-review".to_string(),
            reviewed: "reviewed".to_string(),
        }
    }

    fn labels(names: &[&str]) -> Vec<Label> {
        names.iter().map(|name| Label::new(*name)).collect()
    }

    #[test]
    fn test_scan_empty() {
        assert_eq!(
            LabelCheck::scan(Vec::new(), &tracked()),
            LabelCheck::default()
        );
    }

    #[test]
    fn test_scan_is_order_independent() {
        let a = LabelCheck::scan(
            labels(&["bug", "reviewed", "needs-review"]),
            &tracked(),
        );
        let b = LabelCheck::scan(
            labels(&["needs-review", "bug", "reviewed"]),
            &tracked(),
        );

        assert!(a.labeled_needs_review && a.labeled_reviewed);
        assert_eq!(
            (a.labeled_needs_review, a.labeled_reviewed),
            (b.labeled_needs_review, b.labeled_reviewed)
        );
    }

    #[test]
    fn test_scan_tolerates_duplicates() {
        let check = LabelCheck::scan(labels(&["reviewed", "reviewed"]), &tracked());
        assert!(check.labeled_reviewed);
        assert!(!check.labeled_needs_review);
        assert_eq!(check.names(), vec!["reviewed", "reviewed"]);
    }

    #[test]
    fn test_scan_matches_exact_names_only() {
        let check = LabelCheck::scan(
            labels(&["Reviewed", "needs-review-later"]),
            &tracked(),
        );
        assert!(!check.labeled_reviewed);
        assert!(!check.labeled_needs_review);
    }
}
