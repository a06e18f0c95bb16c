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

//! Lints a study document before it is published: structural problems a
//! parse alone does not catch.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use studyhub_core::curation;
use studyhub_core::document::ContentDocument;
use studyhub_core::document::Difficulty;
use studyhub_core::document::parse_document;
use studyhub_core::error::Fallible;
use studyhub_core::error::fail;

/// Parses the document and reports problems. Fails if any are found, so
/// the exit code can gate a publish step.
pub fn check_document(file: &Path) -> Fallible<()> {
    let text = fs::read_to_string(file)?;
    let document = parse_document(&text)?;
    let problems = collect_problems(&document);
    if problems.is_empty() {
        println!("No problems found.");
        return Ok(());
    }
    for problem in &problems {
        println!("{problem}");
    }
    fail(format!("{} problem(s) found.", problems.len()))
}

fn collect_problems(document: &ContentDocument) -> Vec<String> {
    let mut problems: Vec<String> = Vec::new();
    for (key, topic) in &document.topics {
        if curation::is_excluded(key) {
            problems.push(format!(
                "topic '{key}' is on the exclusion list and will not be shown"
            ));
        }
        if topic.difficulty == Difficulty::Other {
            problems.push(format!("topic '{key}' has an unrecognized difficulty"));
        }
        if topic.sections.is_empty() {
            problems.push(format!("topic '{key}' has no sections"));
            continue;
        }
        let mut seen_ids: HashSet<&str> = HashSet::new();
        for section in &topic.sections {
            if !seen_ids.insert(section.id.as_str()) {
                problems.push(format!(
                    "topic '{key}' repeats section id '{}'",
                    section.id
                ));
            }
            if section.content.trim().is_empty() {
                problems.push(format!(
                    "section '{}' in topic '{key}' has no content",
                    section.id
                ));
            }
        }
    }
    problems
}
