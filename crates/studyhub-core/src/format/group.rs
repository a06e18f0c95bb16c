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

//! Line-grouping rewrite stages: lists, tables, callout boxes, practice
//! sections, and the final paragraph pass. Each walks the text line by
//! line, grouping runs of related lines into a single HTML block.

use std::sync::LazyLock;

use regex::Regex;

use crate::format::inline::badge;
use crate::format::tag_lines;

static UNORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-•*]\s").unwrap());
static ORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s").unwrap());
static TABLE_ROW: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\|.+\|$").unwrap());
static PRACTICE_BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\*\s*").unwrap());
static HEADING_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#+\s").unwrap());

/// Callout markers and the semantic class each maps to.
const CALLOUT_CLASSES: [(&str, &str); 4] = [
    ("🟢", "success"),
    ("🔵", "info"),
    ("🔴", "error"),
    ("🟡", "warning"),
];

/// Groups runs of bullet (`-`, `•`, `*`) and numbered (`1.`) lines into
/// list elements. The first line of a run decides whether the list is
/// ordered; mixing markers mid-run does not start a new list. A run ends
/// at the first line that is not an item, blank lines included.
pub fn lists(text: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    let mut open: Option<&'static str> = None;
    for line in tag_lines(text) {
        let item = if line.protected {
            None
        } else {
            list_item(line.text.trim())
        };
        match item {
            Some((tag, content)) => {
                if open.is_none() {
                    result.push(format!("<{tag} class=\"content-list\">"));
                    open = Some(tag);
                }
                result.push(format!("<li>{content}</li>"));
            }
            None => {
                close_list(&mut result, &mut open);
                result.push(line.text.to_string());
            }
        }
    }
    close_list(&mut result, &mut open);
    result.join("\n")
}

fn list_item(trimmed: &str) -> Option<(&'static str, &str)> {
    if let Some(found) = UNORDERED_ITEM.find(trimmed) {
        return Some(("ul", &trimmed[found.end()..]));
    }
    if let Some(found) = ORDERED_ITEM.find(trimmed) {
        return Some(("ol", &trimmed[found.end()..]));
    }
    None
}

fn close_list(result: &mut Vec<String>, open: &mut Option<&'static str>) {
    if let Some(tag) = open.take() {
        result.push(format!("</{tag}>"));
    }
}

/// Groups contiguous runs of `|cell|cell|` lines into a table. The first
/// row of a run is the header row; cells are trimmed, and the empty cells
/// produced by the leading and trailing pipes are dropped.
pub fn tables(text: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    let mut rows: Vec<&str> = Vec::new();
    for line in tag_lines(text) {
        let trimmed = line.text.trim();
        if !line.protected && TABLE_ROW.is_match(trimmed) {
            rows.push(trimmed);
            continue;
        }
        flush_table(&mut result, &mut rows);
        result.push(line.text.to_string());
    }
    flush_table(&mut result, &mut rows);
    result.join("\n")
}

fn flush_table(result: &mut Vec<String>, rows: &mut Vec<&str>) {
    if rows.is_empty() {
        return;
    }
    let mut html = String::from("<div class=\"table-container\"><table class=\"content-table\">");
    for (index, row) in rows.iter().enumerate() {
        let tag: &str = if index == 0 { "th" } else { "td" };
        html.push_str("<tr>");
        for cell in row.split('|').map(str::trim).filter(|cell| !cell.is_empty()) {
            html.push_str(&format!("<{tag}>{cell}</{tag}>"));
        }
        html.push_str("</tr>");
    }
    html.push_str("</table></div>");
    result.push(html);
    rows.clear();
}

/// Colored-dot callouts. A line starting with one of the four markers
/// opens a box; the rest of that line is the title, and following lines
/// up to a blank line, the next marker, or a code container become the
/// body, joined with `<br>`.
pub fn callouts(text: &str) -> String {
    let tagged = tag_lines(text);
    let mut result: Vec<String> = Vec::new();
    let mut index: usize = 0;
    while index < tagged.len() {
        let line = &tagged[index];
        if line.protected {
            result.push(line.text.to_string());
            index += 1;
            continue;
        }
        let Some((marker, class, title)) = callout_start(line.text) else {
            result.push(line.text.to_string());
            index += 1;
            continue;
        };
        let mut body: Vec<&str> = Vec::new();
        let mut next = index + 1;
        while next < tagged.len() {
            let candidate = &tagged[next];
            if candidate.protected
                || candidate.text.trim().is_empty()
                || callout_start(candidate.text).is_some()
            {
                break;
            }
            body.push(candidate.text);
            next += 1;
        }
        result.push(format!("<div class=\"example-box {class}\">"));
        result.push(format!("<div class=\"example-title\">{marker} {title}</div>"));
        if !body.is_empty() {
            result.push(format!(
                "<div class=\"example-content\">{}</div>",
                body.join("<br>")
            ));
        }
        result.push("</div>".to_string());
        index = next;
    }
    result.join("\n")
}

/// Recognizes a callout opener: a marker, at least one whitespace
/// character, and a non-empty title. Bare markers are ordinary text.
fn callout_start(line: &str) -> Option<(&'static str, &'static str, &str)> {
    let trimmed = line.trim_start();
    for (marker, class) in CALLOUT_CLASSES {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            let title = rest.trim_start();
            if rest.starts_with(char::is_whitespace) && !title.is_empty() {
                return Some((marker, class, title));
            }
        }
    }
    None
}

/// `🔗 Practice:` sections. The header line is followed by link lines,
/// which are collected up to a blank line or the next bullet-point
/// marker. By the time this stage runs, the emoji stage has wrapped the
/// markers in badge spans and the list stage may have turned the links
/// into a list; both forms are recognized.
pub fn practice_links(text: &str) -> String {
    let tagged = tag_lines(text);
    let mut result: Vec<String> = Vec::new();
    let mut index: usize = 0;
    while index < tagged.len() {
        let line = &tagged[index];
        if line.protected || !is_practice_header(line.text) {
            result.push(line.text.to_string());
            index += 1;
            continue;
        }
        let mut links: Vec<String> = Vec::new();
        let mut next = index + 1;
        while next < tagged.len() {
            let candidate = &tagged[next];
            let trimmed = candidate.text.trim();
            if candidate.protected || trimmed.is_empty() || is_practice_terminator(candidate.text) {
                break;
            }
            if is_list_delimiter(trimmed) {
                next += 1;
                continue;
            }
            if let Some(item) = trimmed
                .strip_prefix("<li>")
                .and_then(|rest| rest.strip_suffix("</li>"))
            {
                links.push(item.to_string());
                next += 1;
                continue;
            }
            if trimmed.starts_with('<') {
                // some other rendered block; it is not part of the links
                break;
            }
            links.push(PRACTICE_BULLET.replace(trimmed, "").into_owned());
            next += 1;
        }
        let items: String = links
            .iter()
            .filter(|link| !link.is_empty())
            .map(|link| format_practice_link(link))
            .collect();
        result.push("<div class=\"practice-section\">".to_string());
        result.push("<h4 class=\"practice-title\">🔗 Practice Problems:</h4>".to_string());
        result.push(format!("<ul class=\"practice-list\">{items}</ul>"));
        result.push("</div>".to_string());
        index = next;
    }
    result.join("\n")
}

fn is_practice_header(line: &str) -> bool {
    let trimmed = line.trim();
    let badged = format!("{} Practice:", badge("🔗", "info"));
    for prefix in ["🔗 Practice:", badged.as_str()] {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            if rest.trim().is_empty() {
                return true;
            }
        }
    }
    false
}

/// Markers that end a practice section even without a blank line, in raw
/// or badged form.
fn is_practice_terminator(line: &str) -> bool {
    let trimmed = line.trim_start();
    for (emoji, class) in [("🔸", "info"), ("🔹", "info"), ("✅", "success")] {
        if trimmed.starts_with(emoji) || trimmed.starts_with(&badge(emoji, class)) {
            return true;
        }
    }
    false
}

/// Open and close tags emitted by the list stage.
fn is_list_delimiter(trimmed: &str) -> bool {
    trimmed == "<ul class=\"content-list\">"
        || trimmed == "<ol class=\"content-list\">"
        || trimmed == "</ul>"
        || trimmed == "</ol>"
}

/// Links naming a known practice site get a target marker in front.
fn format_practice_link(link: &str) -> String {
    if link.contains("Leetcode") || link.contains("GFG") {
        format!("<li class=\"practice-link\">🎯 {link}</li>")
    } else {
        format!("<li class=\"practice-link\">{link}</li>")
    }
}

/// The final pass: consecutive plain-text lines are folded into a single
/// paragraph element. Lines that are already HTML, heading lines (at any
/// level, converted or not), and list items pass through untouched, and a
/// blank line ends the current paragraph.
pub fn paragraphs(text: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in tag_lines(text) {
        let trimmed = line.text.trim();
        if line.protected || trimmed.starts_with('<') || is_grouping_marker(trimmed) {
            flush_paragraph(&mut result, &mut current);
            result.push(line.text.to_string());
        } else if trimmed.is_empty() {
            flush_paragraph(&mut result, &mut current);
            result.push(String::new());
        } else {
            current.push(line.text);
        }
    }
    flush_paragraph(&mut result, &mut current);
    result.join("\n")
}

fn is_grouping_marker(trimmed: &str) -> bool {
    HEADING_MARKER.is_match(trimmed)
        || UNORDERED_ITEM.is_match(trimmed)
        || ORDERED_ITEM.is_match(trimmed)
}

fn flush_paragraph(result: &mut Vec<String>, current: &mut Vec<&str>) {
    if current.is_empty() {
        return;
    }
    let text: String = current.join(" ").trim().to_string();
    if !text.is_empty() {
        result.push(format!("<p class=\"content-paragraph\">{text}</p>"));
    }
    current.clear();
}
