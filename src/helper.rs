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

//! Shared test fixtures: a scripted remote content server and canned
//! study documents.

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header::LAST_MODIFIED;
use axum::routing::get;
use portpicker::pick_unused_port;
use tokio::net::TcpListener;
use tokio::spawn;
use tokio::time::sleep;

use studyhub_core::error::Fallible;

use crate::utils::wait_for_server;

/// One scripted answer from the stub content server.
#[derive(Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: String,
    pub last_modified: Option<String>,
    pub delay: Option<Duration>,
}

impl StubResponse {
    pub fn ok(body: String, last_modified: &str) -> StubResponse {
        StubResponse {
            status: 200,
            body,
            last_modified: Some(last_modified.to_string()),
            delay: None,
        }
    }

    pub fn error(status: u16) -> StubResponse {
        StubResponse {
            status,
            body: String::new(),
            last_modified: None,
            delay: None,
        }
    }
}

#[derive(Clone)]
struct StubState {
    script: Arc<Mutex<StubScript>>,
}

struct StubScript {
    hits: usize,
    responses: Vec<StubResponse>,
}

/// Serves `/content.json`, answering the nth request with the nth scripted
/// response. The final response repeats once the script runs out. Returns
/// the port the server is listening on.
pub async fn spawn_content_server(responses: Vec<StubResponse>) -> Fallible<u16> {
    let port = pick_unused_port().unwrap();
    let state = StubState {
        script: Arc::new(Mutex::new(StubScript { hits: 0, responses })),
    };
    let app = Router::new()
        .route("/content.json", get(content_handler))
        .with_state(state);
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    spawn(async move { axum::serve(listener, app).await });
    wait_for_server("127.0.0.1", port).await?;
    Ok(port)
}

async fn content_handler(State(state): State<StubState>) -> (StatusCode, HeaderMap, String) {
    let response = {
        let mut script = state.script.lock().unwrap();
        let index = script.hits.min(script.responses.len() - 1);
        script.hits += 1;
        script.responses[index].clone()
    };
    if let Some(delay) = response.delay {
        sleep(delay).await;
    }
    let mut headers = HeaderMap::new();
    if let Some(value) = &response.last_modified {
        headers.insert(LAST_MODIFIED, HeaderValue::from_str(value).unwrap());
    }
    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, headers, response.body)
}

/// A study document with a single `java-basics` topic whose section
/// exercises headings, emphasis, tables, and lists.
pub fn sample_document_json() -> String {
    document_json("Study guide for Java developers", false)
}

/// Like [`sample_document_json`], with a custom metadata description so
/// tests can tell two fetched versions apart.
pub fn sample_document_labeled(description: &str) -> String {
    document_json(description, false)
}

/// A study document that also carries a `dsa-patterns` topic, which the
/// viewer is expected to drop.
pub fn sample_document_with_excluded_json() -> String {
    document_json("Study guide for Java developers", true)
}

fn document_json(description: &str, include_excluded: bool) -> String {
    let mut document = serde_json::json!({
        "metadata": {
            "version": "2.1.0",
            "lastUpdated": "2025-03-10",
            "description": description,
        },
        "topics": {
            "java-basics": {
                "title": "Java Basics",
                "description": "Syntax, types, and control flow.",
                "icon": "☕",
                "difficulty": "beginner",
                "estimatedTime": "2 hours",
                "tags": ["java", "fundamentals"],
                "sections": [
                    {
                        "id": "java-overview",
                        "number": 1,
                        "title": "Overview",
                        "icon": "📖",
                        "content": "## Overview\nJava is a **general purpose** language.\n\n| Feature | Notes |\n| JVM | Write once, run anywhere |\n\n- Objects\n- Classes",
                    }
                ],
            },
        },
    });
    if include_excluded {
        document["topics"]["dsa-patterns"] = serde_json::json!({
            "title": "DSA Patterns",
            "description": "Sliding windows and friends.",
            "icon": "🧩",
            "difficulty": "advanced",
            "estimatedTime": "6 hours",
            "tags": ["dsa"],
            "sections": [
                {
                    "id": "dsa-overview",
                    "number": 1,
                    "title": "Overview",
                    "icon": "📖",
                    "content": "Pattern catalog.",
                }
            ],
        });
    }
    document.to_string()
}
