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

//! Topic curation. Some topics ship in the content document but are not yet
//! ready to be shown, so every loaded document is filtered against a fixed
//! exclusion list before it reaches the viewer.

use crate::document::ContentDocument;

/// Topic keys hidden from the viewer. An editorial decision baked into the
/// binary, not user configuration.
pub const EXCLUDED_TOPICS: [&str; 2] = ["dsa-patterns", "dynamic-programming"];

/// Whether a topic key is on the exclusion list.
pub fn is_excluded(key: &str) -> bool {
    EXCLUDED_TOPICS.contains(&key)
}

/// Removes excluded topics from the document. Returns the keys that were
/// actually removed.
pub fn apply_exclusions(document: &mut ContentDocument) -> Vec<String> {
    let mut removed: Vec<String> = Vec::new();
    for key in EXCLUDED_TOPICS {
        if document.topics.remove(key).is_some() {
            removed.push(key.to_string());
        }
    }
    removed
}
