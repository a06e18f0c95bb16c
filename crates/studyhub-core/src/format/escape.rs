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

/// Escapes text for embedding in a code container. Ampersands must go
/// first, or the entities produced for `<` and `>` would themselves be
/// re-escaped.
///
/// Only code-block content is escaped. Everywhere else the dialect is
/// trusted and passed through, which is what lets authors mix raw HTML
/// into their sections.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_angle_brackets_and_ampersands() {
        assert_eq!(
            escape_html("List<String> a = new ArrayList<>();"),
            "List&lt;String&gt; a = new ArrayList&lt;&gt;();"
        );
        assert_eq!(escape_html("a && b"), "a &amp;&amp; b");
    }

    /// Escaped output must never contain a bare `<` or `>` from the input,
    /// and pre-existing entities must not be double-escaped into garbage
    /// that still renders as markup.
    #[test]
    fn test_escape_round_trip_safety() {
        let input = "if (a < b && b > c) { return \"<script>\"; }";
        let escaped = escape_html(input);
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        assert_eq!(
            escaped,
            "if (a &lt; b &amp;&amp; b &gt; c) { return \"&lt;script&gt;\"; }"
        );
        // Ampersand-first ordering: entities stay inert, not re-interpretable.
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        assert_eq!(escape_html("int x = 5;"), "int x = 5;");
        assert_eq!(escape_html(""), "");
    }
}
