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

pub mod pages;
pub mod server;
pub mod template;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use portpicker::pick_unused_port;
    use reqwest::StatusCode;
    use tempfile::tempdir;
    use tokio::spawn;

    use studyhub_core::error::Fallible;

    use crate::cmd::serve::server::ServerConfig;
    use crate::cmd::serve::server::start_server;
    use crate::helper::StubResponse;
    use crate::helper::sample_document_json;
    use crate::helper::spawn_content_server;
    use crate::store::StateStore;
    use crate::utils::wait_for_server;

    const TEST_HOST: &str = "127.0.0.1";

    #[tokio::test]
    async fn test_start_server_with_unwritable_state_file() -> Fallible<()> {
        let config = ServerConfig {
            content_url: format!("http://{TEST_HOST}:1/content.json"),
            host: TEST_HOST.to_string(),
            port: pick_unused_port().unwrap(),
            poll_interval: Duration::ZERO,
            state_file: Some(PathBuf::from("./derpherp/state.db")),
        };
        let result = start_server(config).await;
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert!(err.to_string().contains("State store error"));
        Ok(())
    }

    #[tokio::test]
    async fn test_e2e() -> Result<(), Box<dyn std::error::Error>> {
        let content_port = spawn_content_server(vec![StubResponse::ok(
            sample_document_json(),
            "Wed, 01 Jan 2025 00:00:00 GMT",
        )])
        .await?;
        let port = pick_unused_port().unwrap();
        let config = ServerConfig {
            content_url: format!("http://{TEST_HOST}:{content_port}/content.json"),
            host: TEST_HOST.to_string(),
            port,
            poll_interval: Duration::ZERO,
            state_file: None,
        };
        spawn(async move { start_server(config).await });
        wait_for_server(TEST_HOST, port).await?;

        // Hit the `style.css` endpoint.
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/style.css")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        // Hit an unknown path.
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/herp-derp")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // With nothing selected, the root lands on the topic grid.
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/")).await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("Welcome to studyhub"));
        assert!(html.contains("Java Basics"));
        assert!(!html.contains("Using fallback content"));

        // Viewing a topic renders its formatted sections.
        let response =
            reqwest::get(format!("http://{TEST_HOST}:{port}/topic/java-basics")).await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("<h3 class=\"content-h3\">Overview</h3>"));
        assert!(html.contains("<strong>general purpose</strong>"));
        assert!(html.contains("<th>Feature</th>"));
        assert!(html.contains("<li>Objects</li>"));

        // The selection sticks: the root now lands on the topic page.
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/")).await?;
        let html = response.text().await?;
        assert!(html.contains("1. Overview"));

        // An unknown topic is a 404 with a readable page.
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/topic/nope")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = response.text().await?;
        assert!(html.contains("Topic not found: nope"));

        // A manual refresh sees the unchanged document and says so.
        let response = reqwest::Client::new()
            .post(format!("http://{TEST_HOST}:{port}/refresh"))
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("Content unchanged"));
        assert!(html.contains("1. Overview"));

        // The notice does not stick to the next page load.
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/")).await?;
        let html = response.text().await?;
        assert!(!html.contains("Content unchanged"));

        // Toggle the theme.
        let response = reqwest::Client::new()
            .post(format!("http://{TEST_HOST}:{port}/theme"))
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("data-theme=\"dark\""));

        // Picking "All topics" in the header clears the selection.
        let response = reqwest::Client::new()
            .post(format!("http://{TEST_HOST}:{port}/select"))
            .form(&[("topic", "")])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("Welcome to studyhub"));

        // Selecting through the form navigates to the topic.
        let response = reqwest::Client::new()
            .post(format!("http://{TEST_HOST}:{port}/select"))
            .form(&[("topic", "java-basics")])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("1. Overview"));

        Ok(())
    }

    #[tokio::test]
    async fn test_fallback_when_remote_is_unreachable() -> Result<(), Box<dyn std::error::Error>> {
        let dead_port = pick_unused_port().unwrap();
        let port = pick_unused_port().unwrap();
        let config = ServerConfig {
            content_url: format!("http://{TEST_HOST}:{dead_port}/content.json"),
            host: TEST_HOST.to_string(),
            port,
            poll_interval: Duration::ZERO,
            state_file: None,
        };
        spawn(async move { start_server(config).await });
        wait_for_server(TEST_HOST, port).await?;

        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/")).await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("Using fallback content - remote document not accessible"));
        assert!(html.contains("Fallback Content"));

        // The fallback document's own topic is viewable.
        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/topic/fallback")).await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("Remote Document Not Found"));

        Ok(())
    }

    #[tokio::test]
    async fn test_persisted_selection_is_restored_on_startup() -> Result<(), Box<dyn std::error::Error>>
    {
        let content_port = spawn_content_server(vec![StubResponse::ok(
            sample_document_json(),
            "Wed, 01 Jan 2025 00:00:00 GMT",
        )])
        .await?;
        let dir = tempdir()?;
        let state_file = dir.path().join("state.db");
        {
            let store = StateStore::open(&state_file)?;
            store.set_current_topic("java-basics")?;
        }
        let port = pick_unused_port().unwrap();
        let config = ServerConfig {
            content_url: format!("http://{TEST_HOST}:{content_port}/content.json"),
            host: TEST_HOST.to_string(),
            port,
            poll_interval: Duration::ZERO,
            state_file: Some(state_file),
        };
        spawn(async move { start_server(config).await });
        wait_for_server(TEST_HOST, port).await?;

        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.url().path(), "/topic/java-basics");
        let html = response.text().await?;
        assert!(html.contains("1. Overview"));

        Ok(())
    }
}
