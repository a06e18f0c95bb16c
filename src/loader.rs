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

//! Fetches the remote study document, decides whether it is new, and swaps
//! it into the hub. A fixed-interval poll keeps the document current after
//! the first successful load; every failed fetch installs the compiled-in
//! fallback instead.

use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use reqwest::header::LAST_MODIFIED;
use tokio::spawn;
use tokio::sync::watch;
use tokio::time::interval;

use studyhub_core::curation;
use studyhub_core::document::ContentDocument;
use studyhub_core::document::fallback_document;
use studyhub_core::document::parse_document;
use studyhub_core::error::ErrorReport;
use studyhub_core::error::Fallible;
use studyhub_core::hub::DocumentSource;
use studyhub_core::hub::HubSnapshot;
use studyhub_core::hub::HubState;
use studyhub_core::hub::SelectError;
use studyhub_core::token::FreshnessToken;

use crate::config::DEFAULT_CONTENT_URL;
use crate::config::DEFAULT_POLL_INTERVAL_SECS;
use crate::config::FETCH_TIMEOUT;
use crate::store::StateStore;

/// How the loader reaches the remote document.
pub struct LoaderConfig {
    pub url: String,
    /// Zero disables polling entirely.
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            url: DEFAULT_CONTENT_URL.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            timeout: FETCH_TIMEOUT,
        }
    }
}

/// Outcome of a single refresh attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new document version was fetched and installed.
    Fresh,
    /// The remote document matches the version already installed.
    Unchanged,
    /// The fetch failed; the fallback document is installed.
    Failed,
    /// A newer refresh was issued while this one was in flight, so its
    /// result was discarded.
    Stale,
}

/// Broadcast on every install, whatever the source.
#[derive(Clone)]
pub struct DocumentEvent {
    pub document: Arc<ContentDocument>,
    pub source: DocumentSource,
    /// Starts at zero for the boot-time fallback and increments with each
    /// install.
    pub generation: u64,
}

enum FetchError {
    Http(u16),
    Network(String),
    Malformed(String),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            FetchError::Http(status) => write!(f, "remote returned HTTP {status}"),
            FetchError::Network(message) => write!(f, "network error: {message}"),
            FetchError::Malformed(message) => write!(f, "malformed document: {message}"),
        }
    }
}

struct LoaderShared {
    hub: HubState,
    /// Token of the last installed remote document. Cleared whenever the
    /// fallback goes in, so recovery always registers as fresh.
    last_token: Option<FreshnessToken>,
    polling_started: bool,
    /// Id of the most recently issued refresh. A refresh whose id is no
    /// longer the newest when its fetch resolves is discarded.
    last_issued: u64,
    generation: u64,
}

/// Owns the document lifecycle for one running viewer.
pub struct ContentLoader {
    client: reqwest::Client,
    config: LoaderConfig,
    store: StateStore,
    shared: Mutex<LoaderShared>,
    events: watch::Sender<DocumentEvent>,
}

impl ContentLoader {
    /// Starts out holding the fallback document. Nothing is fetched until
    /// the first [`ContentLoader::refresh`] call.
    pub fn new(config: LoaderConfig, store: StateStore) -> Fallible<Arc<ContentLoader>> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("studyhub/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ErrorReport::new(format!("Failed to build HTTP client: {e}")))?;
        let hub = HubState::new(fallback_document(), DocumentSource::Fallback);
        let initial = DocumentEvent {
            document: hub.snapshot().document,
            source: DocumentSource::Fallback,
            generation: 0,
        };
        let (events, _) = watch::channel(initial);
        Ok(Arc::new(ContentLoader {
            client,
            config,
            store,
            shared: Mutex::new(LoaderShared {
                hub,
                last_token: None,
                polling_started: false,
                last_issued: 0,
                generation: 0,
            }),
            events,
        }))
    }

    /// Fetches the remote document and installs it if it is new. The first
    /// successful refresh arms the background poll.
    pub async fn refresh(self: &Arc<Self>) -> RefreshOutcome {
        let request_id = {
            let mut shared = self.shared.lock().unwrap();
            shared.last_issued += 1;
            shared.last_issued
        };
        // The fetch happens without holding the lock, so a later refresh
        // can overtake this one.
        let result = self.fetch_remote().await;
        let mut shared = self.shared.lock().unwrap();
        if request_id != shared.last_issued {
            log::info!("Discarding refresh #{request_id}: a newer refresh was issued");
            return RefreshOutcome::Stale;
        }
        match result {
            Ok((token, document)) => {
                if shared.last_token.as_ref() == Some(&token) {
                    return RefreshOutcome::Unchanged;
                }
                let report = shared.hub.install_document(document, DocumentSource::Remote);
                shared.last_token = Some(token);
                shared.generation += 1;
                let generation = shared.generation;
                let event = DocumentEvent {
                    document: shared.hub.snapshot().document,
                    source: DocumentSource::Remote,
                    generation,
                };
                let arm_poll =
                    !shared.polling_started && self.config.poll_interval > Duration::ZERO;
                if arm_poll {
                    shared.polling_started = true;
                }
                drop(shared);
                if !report.removed_topics.is_empty() {
                    log::info!(
                        "Dropped excluded topics: {}",
                        report.removed_topics.join(", ")
                    );
                }
                if report.cleared_selection {
                    if let Err(e) = self.store.clear_current_topic() {
                        log::warn!("Failed to clear persisted topic: {e}");
                    }
                }
                self.events.send_replace(event);
                log::info!("Installed remote document (generation {generation})");
                if arm_poll {
                    self.arm_poll_task();
                }
                RefreshOutcome::Fresh
            }
            Err(err) => {
                log::warn!("Fetch failed, using fallback content: {err}");
                shared
                    .hub
                    .install_document(fallback_document(), DocumentSource::Fallback);
                shared.last_token = None;
                shared.generation += 1;
                let event = DocumentEvent {
                    document: shared.hub.snapshot().document,
                    source: DocumentSource::Fallback,
                    generation: shared.generation,
                };
                drop(shared);
                self.events.send_replace(event);
                RefreshOutcome::Failed
            }
        }
    }

    async fn fetch_remote(&self) -> Result<(FreshnessToken, ContentDocument), FetchError> {
        // Cache-busting query parameter, so intermediaries cannot serve a
        // stale copy.
        let url = format!("{}?t={}", self.config.url, Utc::now().timestamp_millis());
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(status.as_u16()));
        }
        let token = response
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|value| value.to_str().ok())
            .map(FreshnessToken::new)
            .unwrap_or_else(|| FreshnessToken::new(Utc::now().to_rfc3339()));
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let document = parse_document(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;
        Ok((token, document))
    }

    fn arm_poll_task(self: &Arc<Self>) {
        let loader = Arc::clone(self);
        spawn(async move {
            let mut ticker = interval(loader.config.poll_interval);
            // The first tick fires immediately; the refresh that armed the
            // poll already covered it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                loader.refresh().await;
            }
        });
    }

    /// Observers see the latest install immediately and every later one.
    pub fn subscribe(&self) -> watch::Receiver<DocumentEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> HubSnapshot {
        self.shared.lock().unwrap().hub.snapshot()
    }

    /// Selects a topic and persists the choice.
    pub fn select_topic(&self, key: &str) -> Result<(), SelectError> {
        {
            let mut shared = self.shared.lock().unwrap();
            shared.hub.select_topic(key)?;
        }
        if let Err(e) = self.store.set_current_topic(key) {
            log::warn!("Failed to persist topic selection: {e}");
        }
        Ok(())
    }

    pub fn clear_topic(&self) {
        {
            let mut shared = self.shared.lock().unwrap();
            shared.hub.clear_topic();
        }
        if let Err(e) = self.store.clear_current_topic() {
            log::warn!("Failed to clear persisted topic: {e}");
        }
    }

    /// Restores a selection persisted by an earlier run. An excluded key is
    /// refused and scrubbed from the store as well.
    pub fn restore_selection(&self, key: &str) -> bool {
        let restored = {
            let mut shared = self.shared.lock().unwrap();
            shared.hub.restore_topic(key)
        };
        if !restored && curation::is_excluded(key) {
            if let Err(e) = self.store.clear_current_topic() {
                log::warn!("Failed to clear persisted topic: {e}");
            }
        }
        restored
    }
}
