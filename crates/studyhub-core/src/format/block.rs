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

//! Block rewrite stages: headings and fenced code blocks.

use std::sync::LazyLock;

use regex::Captures;
use regex::Regex;

use crate::format::escape_html;

static H4: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^### (.*)$").unwrap());
static H3: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (.*)$").unwrap());
static CODE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[CODE_START\](.*?)\[CODE_END\]").unwrap());

/// A code block shorter than this many characters (after trimming) is
/// treated as a stray marker pair and left alone.
const MIN_CODE_LENGTH: usize = 10;

/// `### ` and `## ` heading lines. The deeper level runs first: once every
/// `### ` line is an `<h4>`, the `## ` pattern cannot mistake the leftover
/// for a shallower heading.
pub fn headings(text: &str) -> String {
    let text = H4.replace_all(text, "<h4 class=\"content-h4\">$1</h4>");
    let text = H3.replace_all(&text, "<h3 class=\"content-h3\">$1</h3>");
    text.into_owned()
}

/// `[CODE_START]`/`[CODE_END]` fences become a code container with the
/// body HTML-escaped. A single non-greedy pattern handles inline fences,
/// multi-line fences, and multiple blocks in one section.
pub fn code_blocks(text: &str) -> String {
    CODE_BLOCK
        .replace_all(text, |caps: &Captures| {
            let code: &str = caps[1].trim();
            if code.chars().count() > MIN_CODE_LENGTH {
                render_code_block(code)
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

fn render_code_block(code: &str) -> String {
    format!(
        "<div class=\"code-block\">\n\
         <div class=\"code-header\"><span class=\"code-label\">Code</span></div>\n\
         <pre><code>{}</code></pre>\n\
         </div>\n\n",
        escape_html(code)
    )
}
