use std::cmp::Reverse;
use std::fmt::Write as _;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use pulldown_cmark::{html, Event, Options, Parser};
use scribe_core::{AppViewModel, Notification, PreviewView, Severity};

use super::constants::*;
use super::layout;

/// Math delimiters kept away from the markdown parser, longest opener first on ties.
const MATH_DELIMITERS: [(&str, &str); 4] = [("$$", "$$"), ("\\[", "\\]"), ("\\(", "\\)"), ("$", "$")];
const PLACEHOLDER_MARK: char = '\u{E000}';

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub render_math: bool,
}

/// Renders the whole page for one view model.
pub fn render(view: &AppViewModel, options: RenderOptions) -> String {
    let mut body = String::new();

    for notification in &view.notifications {
        push_alert(&mut body, notification);
    }

    if view.files.is_empty() {
        if let Some(info) = &view.info {
            push_alert(&mut body, &Notification::info(info.clone()));
        }
        return layout::page(&body, options.render_math);
    }

    render_selector(&mut body, view);
    render_preview(&mut body, view);

    if let Some(warning) = &view.warning {
        push_alert(&mut body, &Notification::warning(warning.clone()));
    }

    if view.show_extract_button {
        render_extract_form(&mut body, view);
    }

    if let Some(text) = &view.extracted_text {
        render_result(&mut body, text);
    }

    layout::page(&body, options.render_math)
}

fn render_selector(out: &mut String, view: &AppViewModel) {
    let _ = write!(
        out,
        r#"<form method="get" action="{action}">
<label for="{file}">{label}</label>
<select id="{file}" name="{file}" onchange="this.form.submit()">"#,
        action = ROUTE_INDEX,
        file = FIELD_FILE,
        label = html_escape(SELECT_LABEL),
    );
    for name in &view.files {
        let selected = if view.selected.as_deref() == Some(name.as_str()) {
            " selected"
        } else {
            ""
        };
        let escaped = html_escape(name);
        let _ = write!(out, r#"<option value="{escaped}"{selected}>{escaped}</option>"#);
    }
    out.push_str("</select>\n");

    if view.show_force_checkbox {
        let checked = if view.force_extraction { " checked" } else { "" };
        let _ = write!(
            out,
            r#"<label class="check"><input type="checkbox" name="{FIELD_FORCE}" onchange="this.form.submit()"{checked}> {}</label>"#,
            html_escape(FORCE_LABEL)
        );
    }
    out.push_str("<noscript><button type=\"submit\">Show</button></noscript>\n</form>\n");
}

fn render_preview(out: &mut String, view: &AppViewModel) {
    let name = view.selected.as_deref().unwrap_or_default();
    match &view.preview {
        PreviewView::Image { mime, bytes } => {
            let _ = writeln!(
                out,
                r#"<img class="preview" alt="{}" src="data:{mime};base64,{}">"#,
                html_escape(name),
                STANDARD.encode(bytes)
            );
        }
        PreviewView::NotAnImage { byte_len } => {
            let _ = writeln!(
                out,
                r#"<p class="caption">No image preview for {} ({byte_len} bytes).</p>"#,
                html_escape(name)
            );
        }
        PreviewView::None | PreviewView::Failed { .. } => {}
    }
}

fn render_extract_form(out: &mut String, view: &AppViewModel) {
    let file = html_escape(view.selected.as_deref().unwrap_or_default());
    let force = if view.force_extraction {
        format!(r#"<input type="hidden" name="{FIELD_FORCE}" value="on">"#)
    } else {
        String::new()
    };
    let _ = writeln!(
        out,
        r#"<form method="post" action="{ROUTE_EXTRACT}" onsubmit="this.querySelector('.spinner').hidden = false; this.querySelector('button').disabled = true;">
<input type="hidden" name="{FIELD_FILE}" value="{file}">{force}
<button type="submit">{button}</button>
<div class="spinner"{hidden}>{spinner}</div>
</form>"#,
        button = html_escape(EXTRACT_BUTTON),
        hidden = if view.busy { "" } else { " hidden" },
        spinner = html_escape(&view.spinner_label),
    );
}

fn render_result(out: &mut String, text: &str) {
    let _ = writeln!(
        out,
        r#"<h3>{heading}</h3>
<div class="markdown">{markdown}</div>
<label for="copy">{copy}</label>
<textarea id="copy" style="height: {COPY_AREA_HEIGHT_PX}px">{raw}</textarea>"#,
        heading = html_escape(RESULT_HEADING),
        markdown = render_markdown(text),
        copy = html_escape(COPY_LABEL),
        raw = html_escape(text),
    );
}

fn push_alert(out: &mut String, notification: &Notification) {
    let class = match notification.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "info",
    };
    let _ = writeln!(
        out,
        r#"<div class="alert {class}">{}</div>"#,
        html_escape(&notification.text)
    );
}

/// Markdown to HTML with raw HTML escaped and math spans passed through untouched.
pub fn render_markdown(text: &str) -> String {
    let (protected, segments) = protect_math(text);

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(&protected, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut rendered = String::new();
    html::push_html(&mut rendered, parser);

    for (index, segment) in segments.iter().enumerate() {
        rendered = rendered.replace(&placeholder(index), &html_escape(segment));
    }
    rendered
}

fn protect_math(text: &str) -> (String, Vec<String>) {
    let mut protected = String::with_capacity(text.len());
    let mut segments = Vec::new();
    let mut rest = text;

    while let Some((start, open, close)) = next_math_opener(rest) {
        let body_start = start + open.len();
        let Some(body_len) = rest[body_start..].find(close) else {
            break;
        };
        let end = body_start + body_len + close.len();
        protected.push_str(&rest[..start]);
        protected.push_str(&placeholder(segments.len()));
        segments.push(rest[start..end].to_string());
        rest = &rest[end..];
    }
    protected.push_str(rest);
    (protected, segments)
}

fn next_math_opener(text: &str) -> Option<(usize, &'static str, &'static str)> {
    MATH_DELIMITERS
        .iter()
        .filter_map(|&(open, close)| text.find(open).map(|at| (at, open, close)))
        .min_by_key(|&(at, open, _)| (at, Reverse(open.len())))
}

fn placeholder(index: usize) -> String {
    format!("{PLACEHOLDER_MARK}math{index}{PLACEHOLDER_MARK}")
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
