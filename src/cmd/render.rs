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

//! Renders a study document from a local file to a standalone HTML page,
//! without starting the server.

use std::fs;
use std::path::Path;

use studyhub_core::curation::apply_exclusions;
use studyhub_core::document::parse_document;
use studyhub_core::error::ErrorReport;
use studyhub_core::error::Fallible;
use studyhub_core::hub::DocumentSource;

use crate::cmd::serve::pages::PageContext;
use crate::cmd::serve::pages::topic_page;
use crate::cmd::serve::pages::welcome_page;
use crate::cmd::serve::template::page_template;
use crate::store::Theme;

/// Renders the topic grid, or a single topic when `topic` is given. The
/// page goes to `output`, or to stdout when no output path is given.
pub fn render_document(file: &Path, topic: Option<&str>, output: Option<&Path>) -> Fallible<()> {
    let text = fs::read_to_string(file)?;
    let mut document = parse_document(&text)?;
    apply_exclusions(&mut document);
    let context = PageContext {
        document: &document,
        source: DocumentSource::Remote,
        theme: Theme::Light,
        notice: None,
        active_topic: topic,
    };
    let body = match topic {
        Some(key) => match document.topics.get(key) {
            Some(topic) => topic_page(&context, topic),
            None => {
                return Err(ErrorReport::new(format!("Topic not found: {key}")));
            }
        },
        None => welcome_page(&context),
    };
    let html = page_template(Theme::Light, body).into_string();
    match output {
        Some(path) => fs::write(path, html)?,
        None => println!("{html}"),
    }
    Ok(())
}
