// Copyright 2026 The studyhub developers
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

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use studyhub_core::error::ErrorReport;
use studyhub_core::error::Fallible;

pub const DEFAULT_CONTENT_URL: &str = "http://localhost:8080/content.json";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_STATE_FILE: &str = "studyhub.db";

/// Timeout for a single content fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Defaults for the `serve` command, optionally loaded from a TOML file.
/// Command-line flags take precedence over file values.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServeDefaults {
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Seconds between scheduled content re-checks. Zero disables polling.
    pub poll_interval_secs: Option<u64>,
    pub state_file: Option<String>,
}

impl ServeDefaults {
    pub fn from_file(path: &Path) -> Fallible<Self> {
        let text = std::fs::read_to_string(path)?;
        let defaults: ServeDefaults = toml::from_str(&text)
            .map_err(|e| ErrorReport::new(format!("Failed to parse config file: {e}")))?;
        Ok(defaults)
    }
}
