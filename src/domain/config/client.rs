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

use super::credentials::Credentials;
use crate::infrastructure::constants::{
    CONFIG_DIR, CONFIG_FILE_NAME, DEFAULT_API_URL, DEFAULT_POLL_INTERVAL_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS, ENV_API_URL, ENV_CONFIG_FILE, ENV_PASSWORD, ENV_TOKEN,
    ENV_USERNAME,
};
use crate::shared::error::{CloudError, Result};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// On-disk configuration (TOML). Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub poll_interval_secs: Option<u64>,
    pub user_agent_product: Option<String>,
}

impl ConfigFile {
    pub fn from<T: AsRef<str>>(path: T) -> Result<Self> {
        let content = read_to_string(path.as_ref()).map_err(|e| {
            CloudError::config_error(format!(
                "Failed to read config file {}: {}",
                path.as_ref(),
                e
            ))
        })?;
        let conf: Self = toml::from_str(&content)?;
        Ok(conf)
    }

    /// `$HOME/.config/cloudctl/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_DIR).join(CONFIG_FILE_NAME))
    }
}

/// Values given on the command line. They win over everything else.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub config_file: Option<String>,
}

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub credentials: Credentials,
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    pub user_agent_product: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            credentials: Credentials::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            user_agent_product: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment and the config file.
    ///
    /// An explicitly named config file must exist; the default location is
    /// only read when present.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let explicit = overrides
            .config_file
            .clone()
            .or_else(|| std::env::var(ENV_CONFIG_FILE).ok());

        let file = match explicit {
            Some(path) => Some(ConfigFile::from(&path)?),
            None => match ConfigFile::default_path() {
                Some(path) if path.is_file() => {
                    debug!(path = %path.display(), "loading default config file");
                    Some(ConfigFile::from(path.to_string_lossy())?)
                }
                _ => None,
            },
        };

        Self::resolve(file.as_ref(), |key| std::env::var(key).ok(), overrides)
    }

    /// Merge layers: defaults < file < environment < command line.
    pub fn resolve<F>(file: Option<&ConfigFile>, env: F, overrides: &ConfigOverrides) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(file) = file {
            if let Some(url) = &file.api_url {
                config.api_url = url.clone();
            }
            if let Some(token) = &file.token {
                config.credentials.token = token.clone();
            }
            if let Some(username) = &file.username {
                config.credentials.username = username.clone();
            }
            if let Some(password) = &file.password {
                config.credentials.password = password.clone();
            }
            if let Some(secs) = file.request_timeout_secs {
                config.request_timeout = Duration::from_secs(secs);
            }
            if let Some(secs) = file.poll_interval_secs {
                config.poll_interval = Duration::from_secs(secs);
            }
            config.user_agent_product = file.user_agent_product.clone();
        }

        let layer = |current: &mut String, env_key: &str, flag: &Option<String>| {
            if let Some(value) = env(env_key).filter(|v| !v.is_empty()) {
                *current = value;
            }
            if let Some(value) = flag {
                *current = value.clone();
            }
        };
        layer(&mut config.api_url, ENV_API_URL, &overrides.api_url);
        layer(&mut config.credentials.token, ENV_TOKEN, &overrides.token);
        layer(&mut config.credentials.username, ENV_USERNAME, &overrides.username);
        layer(&mut config.credentials.password, ENV_PASSWORD, &overrides.password);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api_url).map_err(|e| CloudError::invalid_url(&self.api_url, e))?;
        if self.request_timeout.is_zero() {
            return Err(CloudError::config_error("request_timeout_secs must be positive"));
        }
        if self.poll_interval.is_zero() {
            return Err(CloudError::config_error("poll_interval_secs must be positive"));
        }
        Ok(())
    }
}
