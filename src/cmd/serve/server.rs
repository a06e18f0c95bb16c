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
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::Form;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::response::Redirect;
use axum::routing::get;
use axum::routing::post;
use maud::Markup;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::spawn;

use studyhub_core::error::Fallible;
use studyhub_core::hub::DocumentSource;
use studyhub_core::hub::SelectError;

use crate::cmd::serve::pages::Notice;
use crate::cmd::serve::pages::PageContext;
use crate::cmd::serve::pages::not_found_page;
use crate::cmd::serve::pages::topic_page;
use crate::cmd::serve::pages::topic_path;
use crate::cmd::serve::pages::welcome_page;
use crate::cmd::serve::template::page_template;
use crate::loader::ContentLoader;
use crate::loader::LoaderConfig;
use crate::loader::RefreshOutcome;
use crate::store::StateStore;
use crate::store::Theme;
use crate::utils::CACHE_CONTROL_IMMUTABLE;

pub struct ServerConfig {
    pub content_url: String,
    pub host: String,
    pub port: u16,
    pub poll_interval: Duration,
    /// `None` keeps theme and selection in memory only.
    pub state_file: Option<PathBuf>,
}

#[derive(Clone)]
struct ServerState {
    loader: Arc<ContentLoader>,
    store: StateStore,
}

pub async fn start_server(config: ServerConfig) -> Fallible<()> {
    let store = match &config.state_file {
        Some(path) => StateStore::open(path)?,
        None => StateStore::open_in_memory()?,
    };
    let loader = ContentLoader::new(
        LoaderConfig {
            url: config.content_url.clone(),
            poll_interval: config.poll_interval,
            ..LoaderConfig::default()
        },
        store.clone(),
    )?;

    // Log every install, whichever task triggered it. Subscribing before
    // the first refresh catches the initial install too.
    let mut events = loader.subscribe();
    spawn(async move {
        while events.changed().await.is_ok() {
            let (source, topics) = {
                let event = events.borrow_and_update();
                (event.source, event.document.topics.len())
            };
            match source {
                DocumentSource::Remote => {
                    log::info!("Serving remote document with {topics} topics");
                }
                DocumentSource::Fallback => {
                    log::warn!("Serving fallback document with {topics} topics");
                }
            }
        }
    });

    loader.refresh().await;

    match store.current_topic() {
        Ok(Some(key)) => {
            if loader.restore_selection(&key) {
                log::info!("Restored topic selection: {key}");
            }
        }
        Ok(None) => {}
        Err(e) => log::warn!("Failed to read persisted topic: {e}"),
    }

    let state = ServerState { loader, store };
    let app = Router::new();
    let app = app.route("/", get(home_handler));
    let app = app.route("/topics", get(topics_handler));
    let app = app.route("/topic/{key}", get(topic_handler));
    let app = app.route("/select", post(select_handler));
    let app = app.route("/refresh", post(refresh_handler));
    let app = app.route("/theme", post(theme_handler));
    let app = app.route("/style.css", get(style_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("{}:{}", config.host, config.port);

    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn home_handler(State(state): State<ServerState>) -> Redirect {
    match state.loader.snapshot().active_topic {
        Some(key) => Redirect::to(&topic_path(&key)),
        None => Redirect::to("/topics"),
    }
}

#[derive(Deserialize)]
struct NoticeQuery {
    notice: Option<String>,
}

async fn topics_handler(
    State(state): State<ServerState>,
    Query(query): Query<NoticeQuery>,
) -> (StatusCode, Html<String>) {
    let snapshot = state.loader.snapshot();
    let theme = load_theme(&state.store);
    let context = PageContext {
        document: &snapshot.document,
        source: snapshot.source,
        theme,
        notice: query.notice.as_deref().and_then(Notice::from_query),
        active_topic: snapshot.active_topic.as_deref(),
    };
    (StatusCode::OK, page(theme, welcome_page(&context)))
}

/// Viewing a topic also makes it the active selection.
async fn topic_handler(
    State(state): State<ServerState>,
    Path(key): Path<String>,
    Query(query): Query<NoticeQuery>,
) -> (StatusCode, Html<String>) {
    if let Err(SelectError::TopicNotFound) = state.loader.select_topic(&key) {
        let snapshot = state.loader.snapshot();
        let theme = load_theme(&state.store);
        let context = PageContext {
            document: &snapshot.document,
            source: snapshot.source,
            theme,
            notice: None,
            active_topic: snapshot.active_topic.as_deref(),
        };
        return (
            StatusCode::NOT_FOUND,
            page(theme, not_found_page(&context, &key)),
        );
    }
    let snapshot = state.loader.snapshot();
    let theme = load_theme(&state.store);
    let context = PageContext {
        document: &snapshot.document,
        source: snapshot.source,
        theme,
        notice: query.notice.as_deref().and_then(Notice::from_query),
        active_topic: Some(key.as_str()),
    };
    match snapshot.document.topics.get(&key) {
        Some(topic) => (StatusCode::OK, page(theme, topic_page(&context, topic))),
        // The document was swapped out between selection and render.
        None => (
            StatusCode::NOT_FOUND,
            page(theme, not_found_page(&context, &key)),
        ),
    }
}

#[derive(Deserialize)]
struct SelectForm {
    topic: String,
}

async fn select_handler(
    State(state): State<ServerState>,
    Form(form): Form<SelectForm>,
) -> Redirect {
    if form.topic.is_empty() {
        state.loader.clear_topic();
        Redirect::to("/topics")
    } else {
        Redirect::to(&topic_path(&form.topic))
    }
}

async fn refresh_handler(State(state): State<ServerState>) -> Redirect {
    let outcome = state.loader.refresh().await;
    let notice = match outcome {
        RefreshOutcome::Fresh => Some(Notice::Loaded),
        RefreshOutcome::Unchanged => Some(Notice::Unchanged),
        // A failure shows up through the fallback banner instead.
        RefreshOutcome::Failed => None,
        RefreshOutcome::Stale => None,
    };
    let base = match state.loader.snapshot().active_topic {
        Some(key) => topic_path(&key),
        None => "/topics".to_string(),
    };
    match notice {
        Some(notice) => Redirect::to(&format!("{base}?notice={}", notice.query_key())),
        None => Redirect::to(&base),
    }
}

async fn theme_handler(State(state): State<ServerState>) -> Redirect {
    let theme = load_theme(&state.store).toggled();
    if let Err(e) = state.store.set_theme(theme) {
        log::warn!("Failed to persist theme: {e}");
    }
    Redirect::to("/")
}

async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

fn page(theme: Theme, body: Markup) -> Html<String> {
    Html(page_template(theme, body).into_string())
}

fn load_theme(store: &StateStore) -> Theme {
    match store.theme() {
        Ok(theme) => theme,
        Err(e) => {
            log::warn!("Failed to load theme: {e}");
            Theme::Light
        }
    }
}

async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    log::debug!("Received Ctrl+C, shutting down gracefully");
}
