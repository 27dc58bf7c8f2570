//! Progress reporting for validation runs, using the indicatif crate.

use indicatif::{ProgressBar, ProgressStyle};

/// Style for the rule progress bar
pub const RULE_PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} rules {msg}";

/// Create a progress bar over `rules` rules
///
/// The bar is hidden unless `visible` is set, so callers can tick it
/// unconditionally.
#[must_use]
pub fn create_rule_progress_bar(rules: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(u64::try_from(rules).unwrap_or(u64::MAX));
    if let Ok(style) = ProgressStyle::default_bar().template(RULE_PROGRESS_TEMPLATE) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message("validating");
    pb
}
