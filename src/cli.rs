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

use std::path::PathBuf;
use std::process::exit;
use std::time::Duration;

use clap::Parser;
use tokio::spawn;

use studyhub_core::error::Fallible;

use crate::cmd::check::check_document;
use crate::cmd::render::render_document;
use crate::cmd::serve::server::ServerConfig;
use crate::cmd::serve::server::start_server;
use crate::config::DEFAULT_CONTENT_URL;
use crate::config::DEFAULT_HOST;
use crate::config::DEFAULT_POLL_INTERVAL_SECS;
use crate::config::DEFAULT_PORT;
use crate::config::DEFAULT_STATE_FILE;
use crate::config::ServeDefaults;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Serve the study document through a web interface.
    Serve {
        /// URL of the remote content document. Default is http://localhost:8080/content.json.
        #[arg(long)]
        url: Option<String>,
        /// Path to a TOML file providing defaults for the other options.
        #[arg(long)]
        config: Option<PathBuf>,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long)]
        host: Option<String>,
        /// The port to use for the web server. Default is 8000.
        #[arg(long)]
        port: Option<u16>,
        /// Seconds between background re-checks of the remote document. Zero disables polling. Default is 10.
        #[arg(long)]
        poll_interval: Option<u64>,
        /// Path to the file holding the theme and topic selection. Default is studyhub.db.
        #[arg(long)]
        state_file: Option<PathBuf>,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
    },
    /// Render a local content document to a standalone HTML page.
    Render {
        /// Path to the JSON content document.
        file: PathBuf,
        /// Render only this topic instead of the topic grid.
        #[arg(long)]
        topic: Option<String>,
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Check a content document for problems.
    Check {
        /// Path to the JSON content document.
        file: PathBuf,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            url,
            config,
            host,
            port,
            poll_interval,
            state_file,
            open_browser,
        } => {
            let defaults = match config {
                Some(path) => ServeDefaults::from_file(&path)?,
                None => ServeDefaults::default(),
            };
            let url = url
                .or(defaults.url)
                .unwrap_or_else(|| DEFAULT_CONTENT_URL.to_string());
            let host = host
                .or(defaults.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string());
            let port = port.or(defaults.port).unwrap_or(DEFAULT_PORT);
            let poll_interval = poll_interval
                .or(defaults.poll_interval_secs)
                .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);
            let state_file = state_file
                .or(defaults.state_file.map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                content_url: url,
                host,
                port,
                poll_interval: Duration::from_secs(poll_interval),
                state_file: Some(state_file),
            };
            start_server(config).await
        }
        Command::Render {
            file,
            topic,
            output,
        } => render_document(&file, topic.as_deref(), output.as_deref()),
        Command::Check { file } => check_document(&file),
    }
}
