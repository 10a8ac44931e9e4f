//! Label changes implied by a review status

use gh_review_config::LabelTransition;

use super::labels::TrackedLabels;

/// Labels to add and remove to reach the target state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelDelta {
    pub add: Vec<String>,
    pub remove: Vec<String>,
}

impl LabelDelta {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }

    /// The complete label set after the change
    ///
    /// Untracked labels keep their order; added labels go last.
    pub fn apply(&self, labels: &[String]) -> Vec<String> {
        let mut next: Vec<String> = labels
            .iter()
            .filter(|name| !self.remove.contains(name))
            .cloned()
            .collect();
        for name in &self.add {
            if !next.contains(name) {
                next.push(name.clone());
            }
        }
        next
    }
}

/// Compute the label change for a PR
///
/// The target label is `reviewed` when approved and `needs-review`
/// otherwise; the other tracked label is the stale one.
///
/// | mode     | stale present | target present | delta                       |
/// |----------|---------------|----------------|-----------------------------|
/// | atomic   | yes           | no             | remove stale, add target    |
/// | atomic   | yes           | yes            | remove stale                |
/// | atomic   | no            | no             | add target                  |
/// | stepwise | yes           | any            | remove stale                |
/// | stepwise | no            | no             | add target                  |
/// | any      | no            | yes            | nothing                     |
pub fn compute_delta(
    mode: LabelTransition,
    approved: bool,
    labels: &[String],
    tracked: &TrackedLabels,
) -> LabelDelta {
    let (target, stale) = if approved {
        (&tracked.reviewed, &tracked.needs_review)
    } else {
        (&tracked.needs_review, &tracked.reviewed)
    };
    let has_stale = labels.contains(stale);
    let has_target = labels.contains(target);

    let mut delta = LabelDelta::default();
    if has_stale {
        delta.remove.push(stale.clone());
    }
    let add_target = match mode {
        LabelTransition::Atomic => !has_target,
        LabelTransition::Stepwise => !has_stale && !has_target,
    };
    if add_target {
        delta.add.push(target.clone());
    }
    delta
}
