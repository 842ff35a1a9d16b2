// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Self-reference extraction from mutation responses

use crate::infrastructure::constants::{FIELD_HREF, FIELD_ITEMS};
use serde_json::Value;
use std::fmt;

/// Locator for exactly one remote resource: an absolute URL or a
/// server-relative path, kept as the server sent it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceReference(String);

impl ResourceReference {
    /// Returns `None` for an empty (or whitespace-only) locator.
    pub fn new(href: impl Into<String>) -> Option<Self> {
        let href = href.into();
        if href.trim().is_empty() {
            None
        } else {
            Some(Self(href))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_absolute(&self) -> bool {
        let lower = self.0.to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }
}

impl fmt::Display for ResourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the self-reference of a single-resource document.
///
/// Collections (anything carrying an `items` array) are never wait targets,
/// even when they also expose a top-level `href`.
pub fn extract_reference(document: &Value) -> Option<ResourceReference> {
    let object = document.as_object()?;

    if object.get(FIELD_ITEMS).is_some_and(Value::is_array) {
        return None;
    }

    object
        .get(FIELD_HREF)
        .and_then(Value::as_str)
        .and_then(ResourceReference::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_top_level_href() {
        let doc = json!({
            "id": "3f1c",
            "href": "https://api.cloud.example.com/cloudapi/v6/datacenters/3f1c",
            "metadata": {"state": "BUSY"}
        });
        let reference = extract_reference(&doc).unwrap();
        assert_eq!(
            reference.as_str(),
            "https://api.cloud.example.com/cloudapi/v6/datacenters/3f1c"
        );
        assert!(reference.is_absolute());
    }

    #[test]
    fn test_relative_href_is_preserved() {
        let doc = json!({"href": "/datacenters/3f1c/servers/77"});
        let reference = extract_reference(&doc).unwrap();
        assert_eq!(reference.as_str(), "/datacenters/3f1c/servers/77");
        assert!(!reference.is_absolute());
    }

    #[test]
    fn test_collection_is_rejected_even_with_href() {
        let docs = [
            json!({"href": "/datacenters", "items": []}),
            json!({"href": "/datacenters", "items": [{"href": "/datacenters/1"}]}),
            json!({"items": [{"id": "a"}], "href": "https://x/y", "metadata": {}}),
        ];
        for doc in docs {
            assert!(extract_reference(&doc).is_none(), "{doc}");
        }
    }

    #[test]
    fn test_non_array_items_field_is_not_a_collection() {
        let doc = json!({"href": "/volumes/1", "items": "not-an-array"});
        assert!(extract_reference(&doc).is_some());
    }

    #[test]
    fn test_missing_or_malformed_href_yields_none() {
        let docs = [
            json!({}),
            json!({"href": ""}),
            json!({"href": "   "}),
            json!({"href": 42}),
            json!({"properties": {"href": "/nested/is/ignored"}}),
            json!(null),
            json!("just a string"),
            json!([{"href": "/in/array"}]),
        ];
        for doc in docs {
            assert!(extract_reference(&doc).is_none(), "{doc}");
        }
    }
}
