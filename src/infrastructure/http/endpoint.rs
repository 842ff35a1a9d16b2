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

//! URL resolution for references returned by the API

use crate::domain::waiter::ResourceReference;
use crate::infrastructure::constants::{DEPTH_DEFAULT_VALUE, DEPTH_PARAM};
use crate::shared::error::{CloudError, Result};
use url::Url;

/// Join a server-relative path onto the API base address.
pub fn join_path(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Turn a captured reference into an absolute URL. Absolute references are
/// kept as-is; relative ones are prefixed with `base`.
pub fn resolve_url(base: &str, reference: &ResourceReference) -> Result<String> {
    let raw = if reference.is_absolute() {
        reference.as_str().to_string()
    } else {
        join_path(base, reference.as_str())
    };
    Url::parse(&raw)
        .map(String::from)
        .map_err(|e| CloudError::invalid_url(raw, e))
}

/// Append `depth=1` unless the URL already asks for a specific depth.
pub fn ensure_depth(url: &str) -> Result<String> {
    with_depth(url, None)
}

/// Set the depth query parameter. An explicit `depth` replaces whatever the
/// URL carries; `None` keeps an existing value and otherwise uses the default.
pub fn with_depth(url: &str, depth: Option<u32>) -> Result<String> {
    let mut parsed = Url::parse(url).map_err(|e| CloudError::invalid_url(url, e))?;
    let has_depth = parsed.query_pairs().any(|(key, _)| key == DEPTH_PARAM);

    match depth {
        None if has_depth => {}
        None => {
            parsed
                .query_pairs_mut()
                .append_pair(DEPTH_PARAM, DEPTH_DEFAULT_VALUE);
        }
        Some(depth) => {
            let kept: Vec<(String, String)> = parsed
                .query_pairs()
                .filter(|(key, _)| key != DEPTH_PARAM)
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            parsed
                .query_pairs_mut()
                .clear()
                .extend_pairs(kept)
                .append_pair(DEPTH_PARAM, &depth.to_string());
        }
    }

    Ok(parsed.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.cloud.example.com/cloudapi/v6";

    fn reference(raw: &str) -> ResourceReference {
        ResourceReference::new(raw).unwrap()
    }

    #[test]
    fn test_join_path_slashes() {
        assert_eq!(join_path(BASE, "/datacenters/1"), format!("{}/datacenters/1", BASE));
        assert_eq!(join_path(&format!("{}/", BASE), "datacenters/1"), format!("{}/datacenters/1", BASE));
        assert_eq!(join_path(&format!("{}/", BASE), "/datacenters/1"), format!("{}/datacenters/1", BASE));
    }

    #[test]
    fn test_resolve_relative_reference() {
        let url = resolve_url(BASE, &reference("/datacenters/1/servers/2")).unwrap();
        assert_eq!(url, format!("{}/datacenters/1/servers/2", BASE));
    }

    #[test]
    fn test_resolve_absolute_reference_is_kept() {
        let url = resolve_url(BASE, &reference("https://other.example.com/v6/volumes/9")).unwrap();
        assert_eq!(url, "https://other.example.com/v6/volumes/9");
    }

    #[test]
    fn test_resolve_rejects_garbage_base() {
        assert!(resolve_url("not a url", &reference("/x")).is_err());
    }

    #[test]
    fn test_ensure_depth_appends_default() {
        assert_eq!(
            ensure_depth("https://api/v6/volumes/9").unwrap(),
            "https://api/v6/volumes/9?depth=1"
        );
        assert_eq!(
            ensure_depth("https://api/v6/volumes?pretty=true").unwrap(),
            "https://api/v6/volumes?pretty=true&depth=1"
        );
    }

    #[test]
    fn test_ensure_depth_keeps_explicit_depth() {
        assert_eq!(
            ensure_depth("https://api/v6/volumes/9?depth=3").unwrap(),
            "https://api/v6/volumes/9?depth=3"
        );
    }

    #[test]
    fn test_with_depth_overrides() {
        assert_eq!(
            with_depth("https://api/v6/volumes/9?depth=3&pretty=true", Some(5)).unwrap(),
            "https://api/v6/volumes/9?pretty=true&depth=5"
        );
    }
}
