//! Assistant Markdown
//!
//! Renders assistant answers with pulldown-cmark. The text comes from a
//! language model, so raw HTML is shown as text, images are reduced to their
//! alt text and only http(s) and mailto links survive.

use pulldown_cmark::{html::push_html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

/// Render markdown to sanitized HTML
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

// State for the event transformer
enum State {
    Normal,
    InCodeBlock { lang: Option<String>, content: String },
    /// Dropped link: keep its text, skip its end tag
    InUnsafeLink { depth: usize },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(l) if !l.is_empty() => Some(l.to_string()),
                        _ => None,
                    };
                    state = State::InCodeBlock {
                        lang,
                        content: String::new(),
                    };
                }

                // Alt text is emitted as plain text between Start and End
                Event::Start(Tag::Image { .. }) | Event::End(TagEnd::Image) => {}

                Event::Start(Tag::Link { ref dest_url, .. }) if !is_safe_url(dest_url) => {
                    state = State::InUnsafeLink { depth: 0 };
                }

                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),

                other => events.push(other),
            },

            State::InCodeBlock {
                ref mut lang,
                ref mut content,
            } => match event {
                Event::Text(t) => content.push_str(&t),
                Event::End(TagEnd::CodeBlock) => {
                    let html = code_block_html(content, lang.as_deref());
                    events.push(Event::Html(CowStr::from(html)));
                    state = State::Normal;
                }
                _ => {}
            },

            State::InUnsafeLink { ref mut depth } => match event {
                Event::End(TagEnd::Link) if *depth == 0 => state = State::Normal,
                Event::Start(Tag::Link { .. }) => *depth += 1,
                Event::End(TagEnd::Link) => *depth -= 1,
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                other => events.push(other),
            },
        }
    }

    events
}

fn code_block_html(code: &str, lang: Option<&str>) -> String {
    match lang {
        Some(lang) => format!(
            "<pre><code class=\"language-{}\">{}</code></pre>\n",
            escape_html(lang),
            escape_html(code)
        ),
        None => format!("<pre><code>{}</code></pre>\n", escape_html(code)),
    }
}

fn is_safe_url(url: &str) -> bool {
    let lower = url.trim().to_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://") || lower.starts_with("mailto:")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
