//! Color theme for CLI output

use crate::domain::waiter::LifecycleState;
use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub pending: TableColor,
    pub error: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            pending: TableColor::Yellow,
            error: TableColor::Red,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Get color for a classified lifecycle state; `None` means the
    /// document carried no state at all
    pub fn get_state_color(&self, state: Option<LifecycleState>) -> TableColor {
        match state {
            None => self.muted,
            Some(LifecycleState::Succeeded) => self.success,
            Some(LifecycleState::Pending) => self.pending,
            Some(LifecycleState::Failed) => self.error,
        }
    }
}
