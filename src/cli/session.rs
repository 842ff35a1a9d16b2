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

//! Everything a command needs to talk to the API

use super::display::OutputFormat;
use super::wait::Waiter;
use super::GlobalArgs;
use crate::domain::config::{ClientConfig, ConfigOverrides};
use crate::domain::waiter::ResourceReference;
use crate::infrastructure::http::{resolve_url, CloudHttpClient};
use crate::shared::error::{CloudError, Result};
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;

pub struct Session {
    pub config: ClientConfig,
    pub client: Arc<CloudHttpClient>,
    pub waiter: Waiter,
    pub output: OutputFormat,
    pub quiet: bool,
}

impl Session {
    pub fn connect(global: &GlobalArgs) -> Result<Self> {
        let overrides = ConfigOverrides {
            api_url: global.api_url.clone(),
            token: global.token.clone(),
            username: global.username.clone(),
            password: global.password.clone(),
            config_file: global.config.clone(),
        };
        let config = ClientConfig::load(&overrides)?;
        Self::new(config, global.output, global.quiet)
    }

    pub fn new(config: ClientConfig, output: OutputFormat, quiet: bool) -> Result<Self> {
        let client = Arc::new(CloudHttpClient::new(&config)?);
        let waiter =
            Waiter::new(client.clone(), &config).with_progress(!quiet && output.shows_progress());
        Ok(Self {
            config,
            client,
            waiter,
            output,
            quiet,
        })
    }

    /// Absolute URL for a path given on the command line.
    pub fn url_for(&self, path: &str) -> Result<String> {
        let reference = ResourceReference::new(path)
            .ok_or_else(|| CloudError::invalid_url(path, "empty resource path"))?;
        resolve_url(&self.config.api_url, &reference)
    }

    /// Print a response body to stdout.
    pub fn print(&self, document: &Value) -> Result<()> {
        if let Some(rendered) = self.output.render(document)? {
            println!("{}", rendered);
        }
        Ok(())
    }

    /// Print an informational line to stderr, unless output is
    /// machine-readable or quiet. Stdout carries response bodies only.
    pub fn note(&self, message: &str) {
        let _ = self.write_note(&mut std::io::stderr(), message);
    }

    fn write_note(&self, out: &mut impl Write, message: &str) -> std::io::Result<()> {
        if self.quiet || !self.output.shows_progress() {
            return Ok(());
        }
        writeln!(out, "{}", message)
    }
}
