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

//! Inline rewrite stages: emphasis, emoji badges, and inline code.

use std::sync::LazyLock;

use regex::Regex;

use crate::format::tag_lines;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Emoji that carry semantic weight in the dialect, with the badge class
/// each one gets.
const EMOJI_CLASSES: [(&str, &str); 8] = [
    ("✅", "success"),
    ("❌", "error"),
    ("⚠️", "warning"),
    ("🔍", "info"),
    ("🔸", "info"),
    ("🔹", "info"),
    ("🔗", "info"),
    ("🧪", "warning"),
];

/// `**strong**` and `*emphasized*` spans. The double-star pattern must run
/// first so single stars never eat half of a bold marker.
pub fn emphasis(text: &str) -> String {
    let text = BOLD.replace_all(text, "<strong>$1</strong>");
    let text = ITALIC.replace_all(&text, "<em>$1</em>");
    text.into_owned()
}

/// Wraps known emoji in a badge span so they can be styled. Later stages
/// match against this markup, so the badge format is part of the pipeline
/// contract, not just presentation.
pub fn emoji_spans(text: &str) -> String {
    let mut text: String = text.to_string();
    for (emoji, class) in EMOJI_CLASSES {
        text = text.replace(emoji, &badge(emoji, class));
    }
    text
}

/// The badge markup for one emoji.
pub(crate) fn badge(emoji: &str, class: &str) -> String {
    format!("<span class=\"emoji {class}\">{emoji}</span>")
}

/// Backtick spans become inline code. Spans are matched within a single
/// line, and lines inside a rendered code container are skipped: their
/// backticks are code, not markup.
pub fn inline_code(text: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    for line in tag_lines(text) {
        if line.protected {
            result.push(line.text.to_string());
        } else {
            result.push(
                INLINE_CODE
                    .replace_all(line.text, "<code class=\"inline-code\">$1</code>")
                    .into_owned(),
            );
        }
    }
    result.join("\n")
}
