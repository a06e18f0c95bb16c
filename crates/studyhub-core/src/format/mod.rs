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

//! The markup formatter: turns section content written in the studyhub
//! dialect into HTML.
//!
//! The dialect is a loose, Markdown-adjacent notation: `**bold**`, `## `
//! headings, `[CODE_START]`/`[CODE_END]` code fences, bullet and numbered
//! lists, pipe tables, colored callout markers, and a handful of emoji with
//! semantic meaning.
//!
//! Formatting is a fixed sequence of rewrite passes, each a plain
//! `fn(&str) -> String`. The order is load-bearing: later stages match
//! against the output of earlier ones (the practice-link stage, for
//! example, recognizes the badge markup the emoji stage emits). Text a
//! stage does not recognize passes through unchanged.

mod block;
mod escape;
mod group;
mod inline;

pub use block::code_blocks;
pub use block::headings;
pub use escape::escape_html;
pub use group::callouts;
pub use group::lists;
pub use group::paragraphs;
pub use group::practice_links;
pub use group::tables;
pub use inline::emoji_spans;
pub use inline::emphasis;
pub use inline::inline_code;

/// The rewrite stages, in application order.
const PIPELINE: [fn(&str) -> String; 10] = [
    emphasis,
    emoji_spans,
    headings,
    code_blocks,
    inline_code,
    lists,
    tables,
    callouts,
    practice_links,
    paragraphs,
];

/// Renders section content to HTML.
pub fn format_content(content: &str) -> String {
    let mut text: String = content.to_string();
    for stage in PIPELINE {
        text = stage(&text);
    }
    text
}

/// A line of intermediate output, tagged with whether it sits inside a
/// rendered code container. Once the code-block stage has emitted
/// `<pre><code>` markup, no later stage may regroup or rewrite the lines
/// inside it: the content there is escaped code, not dialect text.
pub(crate) struct TaggedLine<'a> {
    pub protected: bool,
    pub text: &'a str,
}

/// Splits `text` on `\n` and tags each line. The split deliberately keeps
/// a trailing empty line so that rejoining with `\n` round-trips the input.
pub(crate) fn tag_lines(text: &str) -> Vec<TaggedLine<'_>> {
    let mut tagged: Vec<TaggedLine> = Vec::new();
    let mut in_code: bool = false;
    for line in text.split('\n') {
        if in_code {
            tagged.push(TaggedLine {
                protected: true,
                text: line,
            });
            if line.contains("</code></pre>") {
                in_code = false;
            }
        } else if line.contains("<pre><code>") {
            tagged.push(TaggedLine {
                protected: true,
                text: line,
            });
            in_code = !line.contains("</code></pre>");
        } else {
            tagged.push(TaggedLine {
                protected: false,
                text: line,
            });
        }
    }
    tagged
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A realistic section body run through the whole pipeline.
    #[test]
    fn test_format_full_section() {
        let content = "## Overview\nThis is **important**.\n\n- one\n- two\n";
        let expected = "<h3 class=\"content-h3\">Overview</h3>\n\
                        <p class=\"content-paragraph\">This is <strong>important</strong>.</p>\n\
                        \n\
                        <ul class=\"content-list\">\n\
                        <li>one</li>\n\
                        <li>two</li>\n\
                        </ul>\n";
        assert_eq!(format_content(content), expected);
    }

    #[test]
    fn test_format_code_and_table() {
        let content = "### Example\n[CODE_START]\nint x = 5;\nint y = 6;\n[CODE_END]\n\n|A|B|\n|1|2|\n";
        let html = format_content(content);
        assert!(html.contains("<h4 class=\"content-h4\">Example</h4>"));
        assert!(html.contains("<pre><code>int x = 5;\nint y = 6;</code></pre>"));
        assert!(html.contains("<th>A</th><th>B</th>"));
        assert!(html.contains("<td>1</td><td>2</td>"));
        // Code lines must not be re-wrapped by the paragraph stage.
        assert!(!html.contains("<p class=\"content-paragraph\">int x = 5;"));
    }

    /// A code block whose body looks like list items and backtick spans
    /// renders as code, not as markup.
    #[test]
    fn test_code_interior_is_left_alone() {
        let content = "[CODE_START]\n- not a list\n1. also not\nuse `raw` text\n[CODE_END]";
        let html = format_content(content);
        assert!(html.contains("- not a list\n1. also not\nuse `raw` text"));
        assert!(!html.contains("<li>"));
        assert!(!html.contains("inline-code"));
    }

    #[test]
    fn test_format_emoji_and_callout() {
        let content = "✅ Done\n\n🟢 Valid Example\nIt compiles.\n";
        let html = format_content(content);
        assert!(html.contains("<span class=\"emoji success\">✅</span>"));
        assert!(html.contains("<div class=\"example-box success\">"));
        assert!(html.contains("<div class=\"example-title\">🟢 Valid Example</div>"));
        assert!(html.contains("<div class=\"example-content\">It compiles.</div>"));
    }

    /// The practice stage runs after the emoji and list stages and must
    /// recognize their output.
    #[test]
    fn test_format_practice_section() {
        let content = "🔗 Practice:\n* Two Sum on Leetcode\n* Reverse a String on GFG\n";
        let html = format_content(content);
        assert!(html.contains("<h4 class=\"practice-title\">🔗 Practice Problems:</h4>"));
        assert!(html.contains("<li class=\"practice-link\">🎯 Two Sum on Leetcode</li>"));
        assert!(html.contains("<li class=\"practice-link\">🎯 Reverse a String on GFG</li>"));
        // The items end up in the practice list, not a leftover plain list.
        assert!(!html.contains("<ul class=\"content-list\">"));
    }

    #[test]
    fn test_plain_text_is_wrapped_only_in_paragraphs() {
        let html = format_content("just a line of prose");
        assert_eq!(html, "<p class=\"content-paragraph\">just a line of prose</p>");
    }

    #[test]
    fn test_tag_lines_protects_code_interiors() {
        let text = "before\n<pre><code>a\nb</code></pre>\nafter";
        let tagged = tag_lines(text);
        let flags: Vec<bool> = tagged.iter().map(|l| l.protected).collect();
        assert_eq!(flags, vec![false, true, true, false]);
    }

    #[test]
    fn test_tag_lines_single_line_block() {
        let text = "x\n<pre><code>let a = 1;</code></pre>\ny";
        let tagged = tag_lines(text);
        let flags: Vec<bool> = tagged.iter().map(|l| l.protected).collect();
        assert_eq!(flags, vec![false, true, false]);
    }
}
