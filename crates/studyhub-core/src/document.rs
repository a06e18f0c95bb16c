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

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;

/// A complete content document: everything the viewer can show.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentDocument {
    pub metadata: Metadata,
    /// Topics keyed by their stable identifier, e.g. `java-collections`.
    /// A `BTreeMap` so that topic listings have a deterministic order.
    pub topics: BTreeMap<String, Topic>,
}

/// Document-level metadata, shown in the viewer footer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub version: String,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    pub description: String,
}

/// A single study topic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub title: String,
    pub description: String,
    /// Decorative icon, usually an emoji.
    pub icon: String,
    pub difficulty: Difficulty,
    /// Free-form reading time estimate, e.g. `"2-3 hours"`.
    #[serde(rename = "estimatedTime")]
    pub estimated_time: String,
    pub tags: Vec<String>,
    /// Sections in display order.
    pub sections: Vec<Section>,
}

/// The difficulty label attached to a topic.
///
/// Unrecognized labels deserialize to [`Difficulty::Other`] rather than
/// rejecting the whole document. `studyhub check` reports them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    #[serde(rename = "beginner-advanced")]
    BeginnerAdvanced,
    #[serde(other)]
    Other,
}

impl Difficulty {
    /// CSS class for the difficulty badge. Unknown difficulties get the
    /// middle-of-the-road styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "difficulty-beginner",
            Difficulty::Intermediate => "difficulty-intermediate",
            Difficulty::Advanced => "difficulty-advanced",
            Difficulty::BeginnerAdvanced => "difficulty-mixed",
            Difficulty::Other => "difficulty-intermediate",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let label: &str = match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::BeginnerAdvanced => "beginner-advanced",
            Difficulty::Other => "unknown",
        };
        write!(f, "{label}")
    }
}

/// One section of a topic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Stable identifier, used as the HTML anchor for the section.
    pub id: String,
    /// Display ordinal. Not required to be contiguous.
    pub number: u32,
    pub title: String,
    pub icon: String,
    /// Section body in the studyhub markup dialect. Rendered to HTML by
    /// [`crate::format::format_content`].
    pub content: String,
}

/// Parses a JSON content document.
pub fn parse_document(text: &str) -> Fallible<ContentDocument> {
    let document: ContentDocument = serde_json::from_str(text)?;
    Ok(document)
}

/// The document shown when no remote document can be loaded. Built in code
/// so a viewer binary is always able to render something.
pub fn fallback_document() -> ContentDocument {
    let section = Section {
        id: "fallback-section".to_string(),
        number: 1,
        title: "Remote Document Not Found".to_string(),
        icon: "⚠️".to_string(),
        content: "The remote content document could not be loaded. Please ensure the file \
                  exists and is accessible."
            .to_string(),
    };
    let topic = Topic {
        title: "Fallback Content".to_string(),
        description: "This is fallback content displayed when the remote document cannot be \
                      loaded."
            .to_string(),
        icon: "⚠️".to_string(),
        difficulty: Difficulty::Beginner,
        estimated_time: "5 minutes".to_string(),
        tags: vec!["fallback".to_string(), "error".to_string()],
        sections: vec![section],
    };
    let mut topics: BTreeMap<String, Topic> = BTreeMap::new();
    topics.insert("fallback".to_string(), topic);
    ContentDocument {
        metadata: Metadata {
            version: "1.0.0".to_string(),
            last_updated: "2025-01-20".to_string(),
            description: "Fallback content shown when the remote document is not accessible."
                .to_string(),
        },
        topics,
    }
}
