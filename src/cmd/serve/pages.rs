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

//! Page bodies for the viewer. Every page shares the header bar (topic
//! picker, refresh, theme toggle) and the notification banners; the
//! fallback warning stays up as long as the fallback document is
//! installed.

use maud::Markup;
use maud::PreEscaped;
use maud::html;
use percent_encoding::AsciiSet;
use percent_encoding::CONTROLS;
use percent_encoding::utf8_percent_encode;

use studyhub_core::document::ContentDocument;
use studyhub_core::document::Topic;
use studyhub_core::format::format_content;
use studyhub_core::hub::DocumentSource;

use crate::store::Theme;

/// Characters that cannot appear raw in a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub fn topic_path(key: &str) -> String {
    format!("/topic/{}", utf8_percent_encode(key, PATH_SEGMENT))
}

/// One-shot banner carried across the post-refresh redirect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    Loaded,
    Unchanged,
}

impl Notice {
    pub fn query_key(&self) -> &'static str {
        match self {
            Notice::Loaded => "loaded",
            Notice::Unchanged => "unchanged",
        }
    }

    pub fn from_query(value: &str) -> Option<Notice> {
        match value {
            "loaded" => Some(Notice::Loaded),
            "unchanged" => Some(Notice::Unchanged),
            _ => None,
        }
    }
}

/// Everything a page body needs besides its own content.
pub struct PageContext<'a> {
    pub document: &'a ContentDocument,
    pub source: DocumentSource,
    pub theme: Theme,
    pub notice: Option<Notice>,
    pub active_topic: Option<&'a str>,
}

pub fn welcome_page(context: &PageContext) -> Markup {
    html! {
        (header_bar(context))
        main.page {
            (banners(context))
            section.welcome {
                h1 { "Welcome to studyhub" }
                p { "Pick a topic to start studying." }
            }
            div.topic-grid {
                @for (key, topic) in &context.document.topics {
                    (topic_card(key, topic))
                }
            }
            (footer_bar(context))
        }
    }
}

pub fn topic_page(context: &PageContext, topic: &Topic) -> Markup {
    html! {
        (header_bar(context))
        main.page {
            (banners(context))
            section.topic-header {
                h1 { (topic.icon) " " (topic.title) }
                div.topic-meta {
                    span class=(format!("difficulty-badge {}", topic.difficulty.css_class())) {
                        (topic.difficulty)
                    }
                    span { "⏱️ " (topic.estimated_time) }
                }
                p.topic-description { (topic.description) }
            }
            nav.toc {
                h2 { "Contents" }
                ul.toc-list {
                    @for section in &topic.sections {
                        li {
                            a href=(format!("#{}", section.id)) {
                                span.toc-number { (section.number) "." }
                                " " (section.title)
                            }
                        }
                    }
                }
            }
            @for section in &topic.sections {
                section.topic-section id=(section.id) {
                    h2.section-header {
                        (section.icon) " " (section.number) ". " (section.title)
                    }
                    div.section-content {
                        (PreEscaped(format_content(&section.content)))
                    }
                }
            }
        }
    }
}

pub fn not_found_page(context: &PageContext, key: &str) -> Markup {
    html! {
        (header_bar(context))
        main.page {
            (banners(context))
            div.notification.error { "❌ Topic not found: " (key) }
            p { a href="/topics" { "← All topics" } }
        }
    }
}

fn topic_card(key: &str, topic: &Topic) -> Markup {
    html! {
        a.topic-card href=(topic_path(key)) {
            div.topic-card-header {
                span.topic-icon { (topic.icon) }
                span class=(format!("difficulty-badge {}", topic.difficulty.css_class())) {
                    (topic.difficulty)
                }
            }
            h2.topic-title { (topic.title) }
            p.topic-description { (topic.description) }
            div.topic-meta {
                span { "⏱️ " (topic.estimated_time) }
                span { "📄 " (topic.sections.len()) " sections" }
            }
            div.topic-tags {
                @for tag in &topic.tags {
                    span.tag { (tag) }
                }
            }
        }
    }
}

fn header_bar(context: &PageContext) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/topics" { "📚 studyhub" }
            form.topic-select action="/select" method="post" {
                select name="topic" {
                    option value="" selected[context.active_topic.is_none()] {
                        "All topics"
                    }
                    @for (key, topic) in &context.document.topics {
                        option value=(key) selected[context.active_topic == Some(key.as_str())] {
                            (topic.icon) " " (topic.title)
                        }
                    }
                }
                button type="submit" { "View" }
            }
            form.header-action action="/refresh" method="post" {
                button type="submit" title="Reload the remote document" { "🔄 Refresh" }
            }
            form.header-action action="/theme" method="post" {
                button type="submit" { (theme_label(context.theme)) }
            }
        }
    }
}

fn theme_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "🌙 Dark Mode",
        Theme::Dark => "☀️ Light Mode",
    }
}

fn banners(context: &PageContext) -> Markup {
    html! {
        @if context.source == DocumentSource::Fallback {
            div.notification.warning {
                "⚠️ Using fallback content - remote document not accessible"
            }
        }
        @match context.notice {
            Some(Notice::Loaded) => {
                div.notification.success { "✅ Content loaded from remote document" }
            }
            Some(Notice::Unchanged) => {
                div.notification.info { "Content unchanged" }
            }
            None => {}
        }
    }
}

fn footer_bar(context: &PageContext) -> Markup {
    let metadata = &context.document.metadata;
    html! {
        footer.site-footer {
            p { (metadata.description) }
            p.footer-meta { "Version " (metadata.version) " · Updated " (metadata.last_updated) }
        }
    }
}

#[cfg(test)]
mod tests {
    use studyhub_core::document::parse_document;

    use crate::helper::sample_document_json;

    use super::*;

    fn sample_document() -> ContentDocument {
        parse_document(&sample_document_json()).unwrap()
    }

    fn context(document: &ContentDocument) -> PageContext {
        PageContext {
            document,
            source: DocumentSource::Remote,
            theme: Theme::Light,
            notice: None,
            active_topic: None,
        }
    }

    #[test]
    fn test_topic_path_percent_encodes() {
        assert_eq!(topic_path("java-basics"), "/topic/java-basics");
        assert_eq!(topic_path("spring boot/mvc"), "/topic/spring%20boot%2Fmvc");
    }

    #[test]
    fn test_notice_query_round_trip() {
        assert_eq!(Notice::from_query("loaded"), Some(Notice::Loaded));
        assert_eq!(Notice::from_query("unchanged"), Some(Notice::Unchanged));
        assert_eq!(Notice::from_query("nonsense"), None);
        assert_eq!(Notice::Loaded.query_key(), "loaded");
    }

    #[test]
    fn test_welcome_page_lists_topics() {
        let document = sample_document();
        let html = welcome_page(&context(&document)).into_string();
        assert!(html.contains("Java Basics"));
        assert!(html.contains("href=\"/topic/java-basics\""));
        assert!(html.contains("difficulty-badge difficulty-beginner"));
        assert!(html.contains("2 hours"));
        assert!(!html.contains("Using fallback content"));
        // Footer carries the document metadata.
        assert!(html.contains("Version 2.1.0"));
    }

    #[test]
    fn test_welcome_page_shows_fallback_banner() {
        let document = sample_document();
        let mut context = context(&document);
        context.source = DocumentSource::Fallback;
        let html = welcome_page(&context).into_string();
        assert!(html.contains("Using fallback content - remote document not accessible"));
    }

    #[test]
    fn test_notice_banners() {
        let document = sample_document();
        let mut context = context(&document);
        context.notice = Some(Notice::Loaded);
        let html = welcome_page(&context).into_string();
        assert!(html.contains("Content loaded from remote document"));
        context.notice = Some(Notice::Unchanged);
        let html = welcome_page(&context).into_string();
        assert!(html.contains("Content unchanged"));
    }

    #[test]
    fn test_topic_page_renders_formatted_sections() {
        let document = sample_document();
        let mut context = context(&document);
        context.active_topic = Some("java-basics");
        let topic = &document.topics["java-basics"];
        let html = topic_page(&context, topic).into_string();
        // Section content went through the formatter, not the escaper.
        assert!(html.contains("<h3 class=\"content-h3\">Overview</h3>"));
        assert!(html.contains("<strong>general purpose</strong>"));
        assert!(html.contains("<th>Feature</th>"));
        // Table of contents links to the section anchor.
        assert!(html.contains("href=\"#java-overview\""));
        assert!(html.contains("id=\"java-overview\""));
        // The active topic is preselected in the picker.
        assert!(html.contains("selected"));
    }

    #[test]
    fn test_not_found_page_names_the_key() {
        let document = sample_document();
        let html = not_found_page(&context(&document), "ghost").into_string();
        assert!(html.contains("Topic not found: ghost"));
        assert!(html.contains("href=\"/topics\""));
    }
}
