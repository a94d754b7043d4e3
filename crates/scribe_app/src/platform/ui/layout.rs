use super::constants::{KATEX_VERSION, PAGE_TITLE};
use super::render::html_escape;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; color: #262730; }
h1 { font-size: 2rem; margin-bottom: 1.5rem; }
label { display: block; margin: 0.75rem 0 0.25rem; font-size: 0.9rem; }
label.check { display: flex; gap: 0.5rem; align-items: center; }
select, textarea { width: 100%; box-sizing: border-box; font: inherit; padding: 0.4rem; }
textarea { font-family: ui-monospace, monospace; }
button { margin-top: 1rem; padding: 0.5rem 1rem; font: inherit; cursor: pointer; }
img.preview { max-width: 100%; margin-top: 1rem; }
.caption { color: #6b6d76; font-size: 0.85rem; }
.alert { border-radius: 6px; padding: 0.75rem 1rem; margin: 0.75rem 0; }
.alert.error { background: #ffe6e6; color: #7d1a1a; }
.alert.warning { background: #fff6d6; color: #6b5200; }
.alert.info { background: #e6f0ff; color: #1a3d7d; }
.spinner { margin-top: 0.75rem; color: #6b6d76; }
.spinner::before { content: ""; display: inline-block; width: 0.9em; height: 0.9em; margin-right: 0.5em;
  border: 2px solid #c0c2c9; border-top-color: #ff4b4b; border-radius: 50%; animation: spin 0.8s linear infinite; vertical-align: -0.1em; }
@keyframes spin { to { transform: rotate(360deg); } }
.markdown { line-height: 1.5; }
"#;

/// Wraps rendered page content in the document shell.
///
/// With `render_math`, KaTeX's auto-render turns `$...$`, `$$...$$`, `\(...\)` and `\[...\]`
/// in the page into formulas.
pub fn page(body: &str, render_math: bool) -> String {
    let math_head = if render_math {
        format!(
            r#"<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/katex@{v}/dist/katex.min.css">
<script defer src="https://cdn.jsdelivr.net/npm/katex@{v}/dist/katex.min.js"></script>
<script defer src="https://cdn.jsdelivr.net/npm/katex@{v}/dist/contrib/auto-render.min.js"
  onload="renderMathInElement(document.querySelector('.markdown') || document.body, {{delimiters: [
    {{left: '$$', right: '$$', display: true}}, {{left: '\\[', right: '\\]', display: true}},
    {{left: '$', right: '$', display: false}}, {{left: '\\(', right: '\\)', display: false}}]}});"></script>"#,
            v = KATEX_VERSION
        )
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
{math_head}
</head>
<body>
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = html_escape(PAGE_TITLE),
        style = STYLE,
        math_head = math_head,
        body = body,
    )
}
