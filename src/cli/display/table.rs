//! Table rendering for CLI output

use super::{ColorTheme, StatusIcon};
use crate::domain::waiter::state::raw_state;
use crate::domain::waiter::LifecycleState;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use serde_json::Value;

/// One resource, flattened for display
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRow {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub state: Option<String>,
    pub href: String,
}

impl ResourceRow {
    pub fn from_document(document: &Value) -> Self {
        let text = |value: Option<&Value>| {
            value
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            id: text(document.get("id")),
            kind: text(document.get("type")),
            name: text(document.get("properties").and_then(|p| p.get("name"))),
            state: raw_state(document).map(str::to_string),
            href: text(document.get("href")),
        }
    }

    pub fn lifecycle(&self) -> Option<LifecycleState> {
        self.state.as_deref().map(LifecycleState::from_raw)
    }
}

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render a response document. Collections get one row per item.
    pub fn render_document(&self, document: &Value) -> String {
        match document.get("items").and_then(Value::as_array) {
            Some(items) => {
                let rows: Vec<ResourceRow> = items.iter().map(ResourceRow::from_document).collect();
                self.render_resources(&rows)
            }
            None if document.is_object() => {
                self.render_resources(&[ResourceRow::from_document(document)])
            }
            None => document.to_string(),
        }
    }

    /// Render resources as a formatted table
    pub fn render_resources(&self, rows: &[ResourceRow]) -> String {
        if rows.is_empty() {
            return "No resources found".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("ID").set_alignment(CellAlignment::Left),
                Cell::new("TYPE").set_alignment(CellAlignment::Left),
                Cell::new("NAME").set_alignment(CellAlignment::Left),
                Cell::new("STATE").set_alignment(CellAlignment::Center),
                Cell::new("HREF").set_alignment(CellAlignment::Left),
            ]);

        for row in rows {
            let lifecycle = row.lifecycle();
            let icon = StatusIcon::get_state_icon(lifecycle);
            let color = self.theme.get_state_color(lifecycle);

            table.add_row(vec![
                Cell::new(&row.id),
                Cell::new(&row.kind),
                Cell::new(&row.name),
                Cell::new(format!("{} {}", icon, row.state.as_deref().unwrap_or("-"))).fg(color),
                Cell::new(&row.href).fg(self.theme.muted),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Resources {} ─╮\n",
            format!("[{}]", rows.len()).bright_black()
        ));
        output.push_str(&table.to_string());
        output.push('\n');
        output.push_str(&format!(
            "Legend: {} Available  {} In progress  {} Failed\n",
            StatusIcon::SUCCESS.green(),
            StatusIcon::PENDING.yellow(),
            StatusIcon::ERROR.red()
        ));

        output
    }
}
