//! Pull request review bot
//!
//! Watches one repository, derives each open PR's review status from
//! its approval comments and keeps the `needs-review` / `reviewed`
//! labels in sync. Optionally posts an instructions comment and merges
//! reviewed PRs.

pub mod bot;
pub mod error;
pub mod evaluator;
pub mod logger;

#[cfg(test)]
pub(crate) mod test_support;

pub use bot::{CycleOptions, CycleReport, PrOutcome, ReviewBot};
pub use error::{Result, ReviewError};
pub use evaluator::{Evaluator, ReviewSettings};
