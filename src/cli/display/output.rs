//! Machine-readable and human-readable command output

use super::TableRenderer;
use serde_json::Value;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    #[default]
    Table,
}

impl OutputFormat {
    /// Progress text goes to stderr only for human-readable output.
    pub fn shows_progress(&self) -> bool {
        matches!(self, OutputFormat::Table)
    }

    /// Render a response body for stdout. `None` for an empty body.
    pub fn render(&self, document: &Value) -> serde_json::Result<Option<String>> {
        if document.is_null() {
            return Ok(None);
        }
        match self {
            OutputFormat::Json => serde_json::to_string_pretty(document).map(Some),
            OutputFormat::Table => Ok(Some(TableRenderer::new().render_document(document))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_renders_nothing() {
        assert_eq!(OutputFormat::Json.render(&Value::Null).unwrap(), None);
        assert_eq!(OutputFormat::Table.render(&Value::Null).unwrap(), None);
    }

    #[test]
    fn test_json_output_is_parseable() {
        let doc = json!({"id": "1", "metadata": {"state": "BUSY"}});
        let rendered = OutputFormat::Json.render(&doc).unwrap().unwrap();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_progress_only_for_tables() {
        assert!(OutputFormat::Table.shows_progress());
        assert!(!OutputFormat::Json.shows_progress());
    }
}
