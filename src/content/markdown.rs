//! Markdown rendering with heading anchors and optional TOC injection

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};

use super::document::TocEntry;
use crate::error::Result;

/// Options gating the rendering pipeline
///
/// Serialized (via serde_json) into the cache fingerprint, so two loads of the
/// same file with different options occupy different cache entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Enable GFM extensions: tables and strikethrough
    ///
    /// pulldown-cmark has no GFM bare-autolink extension, so only CommonMark
    /// `<...>` autolinks are recognized either way.
    pub gfm: bool,
    /// Escape raw embedded HTML instead of passing it through
    pub sanitize: bool,
    /// Compute the heading outline and inject a TOC block
    pub toc: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            sanitize: false,
            toc: false,
        }
    }
}

/// Output of a render call
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    /// Serialized HTML
    pub html: String,
    /// Heading outline, present when TOC was requested
    pub toc: Option<Vec<TocEntry>>,
}

/// Markdown renderer
///
/// Stage order is fixed: parse (GFM extensions gated by options), assign
/// heading anchors and collect the outline, inject the TOC block if requested,
/// then serialize. Anchors are assigned before serialization so the ids on
/// headings always match the links in the injected TOC.
#[derive(Debug, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render a markdown body to HTML
    pub fn render(&self, body: &str, options: &RenderOptions) -> Result<Rendered> {
        let mut md_options = Options::empty();
        if options.gfm {
            md_options.insert(Options::ENABLE_TABLES);
            md_options.insert(Options::ENABLE_STRIKETHROUGH);
            md_options.insert(Options::ENABLE_GFM);
        }

        let parser = Parser::new_ext(body, md_options);
        let mut events: Vec<Event> = if options.sanitize {
            // Downgrade raw HTML to text; push_html escapes text on serialization
            parser
                .map(|event| match event {
                    Event::Html(raw) => Event::Text(raw),
                    Event::InlineHtml(raw) => Event::Text(raw),
                    other => other,
                })
                .collect()
        } else {
            parser.collect()
        };

        let toc = assign_heading_anchors(&mut events);

        if options.toc && !toc.is_empty() {
            events.insert(0, Event::Html(CowStr::from(toc_block(&toc))));
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(Rendered {
            html: html_output,
            toc: if options.toc { Some(toc) } else { None },
        })
    }
}

/// Give every heading an id derived from its text and collect the outline
///
/// Identically-worded headings get identical anchors; no de-duplication.
fn assign_heading_anchors(events: &mut [Event]) -> Vec<TocEntry> {
    let mut toc = Vec::new();
    let mut i = 0;

    while i < events.len() {
        if let Event::Start(Tag::Heading { level, .. }) = &events[i] {
            let level = *level as u32;

            // Flatten the heading's inline text up to the matching end tag
            let mut text = String::new();
            let mut j = i + 1;
            while j < events.len() {
                match &events[j] {
                    Event::End(TagEnd::Heading(_)) => break,
                    Event::Text(t) | Event::Code(t) => text.push_str(t),
                    Event::SoftBreak | Event::HardBreak => text.push(' '),
                    _ => {}
                }
                j += 1;
            }

            let anchor = heading_anchor(&text);
            if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                *id = Some(CowStr::from(anchor.clone()));
            }
            toc.push(TocEntry {
                level,
                text,
                anchor,
            });
            i = j;
        }
        i += 1;
    }

    toc
}

/// Slugify heading text: lowercase, strip non-word characters, collapse
/// whitespace to hyphens
pub fn heading_anchor(text: &str) -> String {
    let lowered = text.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '-'))
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Render the injected TOC block
fn toc_block(entries: &[TocEntry]) -> String {
    let mut out = String::from("<nav class=\"toc\">\n<ul>\n");
    for entry in entries {
        out.push_str(&format!(
            "<li class=\"toc-level-{}\"><a href=\"#{}\">{}</a></li>\n",
            entry.level,
            entry.anchor,
            html_escape(&entry.text)
        ));
    }
    out.push_str("</ul>\n</nav>\n");
    out
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
