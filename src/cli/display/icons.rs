//! Status icons for CLI output

use crate::domain::waiter::{LifecycleState, WaitOutcome};

/// Status icons for different states
pub struct StatusIcon;

impl StatusIcon {
    /// Success icon (resource available)
    pub const SUCCESS: &'static str = "✓";

    /// Error icon (resource failed)
    pub const ERROR: &'static str = "✗";

    /// Pending icon (provisioning)
    pub const PENDING: &'static str = "⏳";

    /// Unknown icon (no state reported)
    pub const UNKNOWN: &'static str = "?";

    /// Get status icon for a lifecycle state
    pub fn get_state_icon(state: Option<LifecycleState>) -> &'static str {
        match state {
            None => Self::UNKNOWN,
            Some(LifecycleState::Succeeded) => Self::SUCCESS,
            Some(LifecycleState::Pending) => Self::PENDING,
            Some(LifecycleState::Failed) => Self::ERROR,
        }
    }

    /// Suffix printed when a wait ends
    pub fn get_outcome_text(outcome: &WaitOutcome) -> &'static str {
        if outcome.is_success() {
            "DONE"
        } else {
            "FAILED"
        }
    }
}
