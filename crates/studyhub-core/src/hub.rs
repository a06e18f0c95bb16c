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

//! Viewer state: which document is installed, where it came from, and which
//! topic is active. All mutation goes through the transition methods here;
//! nothing else touches the fields.

use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::Arc;

use crate::curation;
use crate::document::ContentDocument;

/// Where the currently installed document came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentSource {
    /// Fetched from the configured URL.
    Remote,
    /// The compiled-in fallback document.
    Fallback,
}

/// What [`HubState::install_document`] did.
#[derive(Clone, Debug, PartialEq)]
pub struct InstallReport {
    /// Topic keys stripped by curation.
    pub removed_topics: Vec<String>,
    /// Whether the active topic was dropped because it is excluded.
    pub cleared_selection: bool,
}

#[derive(Debug, PartialEq)]
pub enum SelectError {
    /// The key does not name a topic in the installed document.
    TopicNotFound,
}

impl Display for SelectError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            SelectError::TopicNotFound => write!(f, "Topic not found"),
        }
    }
}

/// The viewer's document and selection state.
///
/// The document is held behind an `Arc` and replaced wholesale on install,
/// so a snapshot taken before an install keeps rendering a consistent
/// document even while a newer one is being swapped in.
#[derive(Debug)]
pub struct HubState {
    document: Arc<ContentDocument>,
    source: DocumentSource,
    active_topic: Option<String>,
}

/// A cheap, immutable view of [`HubState`] for renderers.
#[derive(Clone, Debug)]
pub struct HubSnapshot {
    pub document: Arc<ContentDocument>,
    pub source: DocumentSource,
    pub active_topic: Option<String>,
}

impl HubState {
    /// Creates the state with an initial document. The document is curated
    /// on the way in; no selection is active.
    pub fn new(mut document: ContentDocument, source: DocumentSource) -> Self {
        curation::apply_exclusions(&mut document);
        HubState {
            document: Arc::new(document),
            source,
            active_topic: None,
        }
    }

    /// Replaces the installed document. The incoming document is curated,
    /// and the active topic is cleared if it is on the exclusion list.
    /// A selection naming a topic that merely vanished from the new
    /// document is kept: the viewer reports it missing instead.
    pub fn install_document(
        &mut self,
        mut document: ContentDocument,
        source: DocumentSource,
    ) -> InstallReport {
        let removed_topics = curation::apply_exclusions(&mut document);
        self.document = Arc::new(document);
        self.source = source;
        let cleared_selection = match &self.active_topic {
            Some(key) if curation::is_excluded(key) => {
                self.active_topic = None;
                true
            }
            _ => false,
        };
        InstallReport {
            removed_topics,
            cleared_selection,
        }
    }

    /// Makes a topic active. Fails if the installed document has no topic
    /// with the given key, leaving the previous selection in place.
    pub fn select_topic(&mut self, key: &str) -> Result<(), SelectError> {
        if !self.document.topics.contains_key(key) {
            return Err(SelectError::TopicNotFound);
        }
        self.active_topic = Some(key.to_string());
        Ok(())
    }

    /// Restores a previously persisted selection. Excluded keys are refused
    /// even if a stale document were to contain them; missing keys are
    /// refused quietly. Returns whether the selection was restored.
    pub fn restore_topic(&mut self, key: &str) -> bool {
        if curation::is_excluded(key) {
            return false;
        }
        self.select_topic(key).is_ok()
    }

    pub fn clear_topic(&mut self) {
        self.active_topic = None;
    }

    pub fn document(&self) -> &ContentDocument {
        &self.document
    }

    pub fn source(&self) -> DocumentSource {
        self.source
    }

    pub fn active_topic(&self) -> Option<&str> {
        self.active_topic.as_deref()
    }

    pub fn snapshot(&self) -> HubSnapshot {
        HubSnapshot {
            document: Arc::clone(&self.document),
            source: self.source,
            active_topic: self.active_topic.clone(),
        }
    }
}
