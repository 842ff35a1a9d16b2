//! Wait progress indicator
//!
//! The spinner redraws on its own timer, independent of the poll loop, and
//! always writes to stderr.

use super::StatusIcon;
use crate::domain::waiter::WaitOutcome;
use crate::infrastructure::constants::PROGRESS_TICK_MILLIS;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

pub struct WaitProgress {
    bar: ProgressBar,
    what: String,
}

impl WaitProgress {
    pub fn start(visible: bool, what: &str) -> Self {
        if !visible {
            return Self {
                bar: ProgressBar::hidden(),
                what: what.to_string(),
            };
        }

        let bar = ProgressBar::new_spinner();
        bar.set_draw_target(ProgressDrawTarget::stderr());
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} Waiting for {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(what.to_string());
        bar.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MILLIS));

        Self {
            bar,
            what: what.to_string(),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    pub fn finish(&self, outcome: &WaitOutcome) {
        let text = StatusIcon::get_outcome_text(outcome);
        let suffix = if outcome.is_success() {
            text.green()
        } else {
            text.red()
        };
        self.bar
            .finish_with_message(format!("{} ... {}", self.what, suffix));
    }
}
