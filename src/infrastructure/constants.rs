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

/// API endpoint
pub const DEFAULT_API_URL: &str = "https://api.cloud.example.com/cloudapi/v6";

/// Environment variables
pub const ENV_API_URL: &str = "CLOUDCTL_API_URL";
pub const ENV_TOKEN: &str = "CLOUDCTL_TOKEN";
pub const ENV_USERNAME: &str = "CLOUDCTL_USERNAME";
pub const ENV_PASSWORD: &str = "CLOUDCTL_PASSWORD";
pub const ENV_CONFIG_FILE: &str = "CLOUDCTL_CONFIG";

/// Config file location, relative to $HOME
pub const CONFIG_DIR: &str = ".config/cloudctl";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// User agent
pub const USER_AGENT_NAME: &str = "cloudctl";

/// HTTP request settings
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Wait settings
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 3600;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
pub const PROGRESS_TICK_MILLIS: u64 = 100;

/// Query parameter asking for nested sub-objects to be expanded
pub const DEPTH_PARAM: &str = "depth";
pub const DEPTH_DEFAULT_VALUE: &str = "1";

/// Response document keys
pub const FIELD_HREF: &str = "href";
pub const FIELD_ITEMS: &str = "items";
pub const FIELD_METADATA: &str = "metadata";
pub const FIELD_STATE: &str = "state";
pub const FIELD_STATUS: &str = "status";

/// Metadata keys that may carry a failure description, in priority order
pub const FAILURE_DETAIL_FIELDS: [&str; 3] = ["message", "statusMessage", "failureMessage"];
