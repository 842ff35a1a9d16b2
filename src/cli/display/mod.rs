//! Display module for formatted CLI output

pub mod colors;
pub mod icons;
pub mod output;
pub mod progress;
pub mod table;

pub use colors::ColorTheme;
pub use icons::StatusIcon;
pub use output::OutputFormat;
pub use progress::WaitProgress;
pub use table::TableRenderer;
