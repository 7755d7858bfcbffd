// Learnify Page - Server-side HTML
// Copyright (c) 2026 Xing_The_Creator | Learnify

use crate::lesson::{LessonOutcome, Severity};
use crate::media::video_mime;

const STYLE: &str = r#"
    body { font-family: sans-serif; background-color: #f0f2f6; margin: 0; }
    .main { max-width: 730px; margin: 0 auto; padding: 3rem 1rem; }
    input[type=text] { width: 100%; padding: 8px; font-size: 16px; box-sizing: border-box; }
    button {
        background-color: #4CAF50;
        color: white;
        border: none;
        border-radius: 12px;
        padding: 10px 24px;
        font-size: 16px;
        margin: 5px 2px;
        cursor: pointer;
    }
    button:hover { background-color: #45a049; }
    .alert { padding: 12px 16px; border-radius: 8px; margin-top: 1rem; }
    .warning { background: #fffce7; color: #926c05; }
    .error { background: #ffecec; color: #7d353b; }
    video { width: 100%; margin-top: 1rem; }
"#;

/// Escape text for HTML body and attribute contexts.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Player URL for a resolved asset.
pub fn stream_url(asset: &std::path::Path) -> String {
    let raw = asset.to_string_lossy();
    let encoded: String = url::form_urlencoded::byte_serialize(raw.as_bytes()).collect();
    format!("/api/stream?path={}", encoded)
}

/// Render the lesson page. `query` is what the user typed, `outcome` the
/// result of pressing Generate (absent on first load).
pub fn render(query: &str, outcome: Option<&LessonOutcome>) -> String {
    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Python Learnify 🐍</title>
<style>{style}</style>
</head>
<body>
<div class="main">
<h1>Python Learnify 🐍📚</h1>
<h3>🔍 Discover Python Concepts Visually with Ease!</h3>
<p><strong>Ask a question or specify a topic to learn about Python:</strong> 🎓</p>
<p>This platform is dedicated to Python beginners. Feel free to explore basic topics like <strong>variables, loops, conditional statements, and more</strong>!</p>
<form method="get" action="/">
<label for="topic"><strong>📝 Enter your question or topic:</strong></label>
<input type="text" id="topic" name="topic" value="{query}">
<button type="submit">🚀 Generate</button>
</form>
"#,
        style = STYLE,
        query = escape_html(query),
    );

    if let Some(outcome) = outcome {
        html.push_str(&render_outcome(outcome));
    }

    html.push_str(
        r#"<hr>
<p><strong>Created with ❤️ for Python Learners</strong></p>
</div>
</body>
</html>
"#,
    );
    html
}

fn render_outcome(outcome: &LessonOutcome) -> String {
    match (outcome.playable_asset(), outcome.severity()) {
        (Some(asset), _) => format!(
            "<video controls autoplay>\n<source src=\"{}\" type=\"{}\">\n</video>\n",
            escape_html(&stream_url(asset)),
            video_mime(asset)
        ),
        (None, severity) => {
            let class = match severity {
                Severity::Warning => "warning",
                _ => "error",
            };
            format!(
                "<div class=\"alert {}\">{}</div>\n",
                class,
                escape_html(&outcome.message())
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_first_load_has_form_and_no_alert() {
        let html = render("", None);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("background-color: #f0f2f6"));
        assert!(html.contains("Python Learnify 🐍📚"));
        assert!(html.contains("🚀 Generate"));
        assert!(html.contains("Created with ❤️ for Python Learners"));
        assert!(!html.contains("class=\"alert"));
        assert!(!html.contains("<video"));
    }

    #[test]
    fn test_query_is_escaped() {
        let html = render("<script>alert('x')</script>", None);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_play_renders_video() {
        let outcome = LessonOutcome::Play {
            asset: PathBuf::from("videos").join("if-else.mp4"),
        };
        let html = render("if-else", Some(&outcome));
        assert!(html.contains("<video controls"));
        assert!(html.contains("/api/stream?path=videos%2Fif-else.mp4"));
        assert!(html.contains("video/mp4"));
    }

    #[test]
    fn test_warning_and_error_classes() {
        let html = render("", Some(&LessonOutcome::EmptyQuery));
        assert!(html.contains("alert warning"));

        let html = render("recursion", Some(&LessonOutcome::TopicUnavailable));
        assert!(html.contains("alert error"));
        assert!(html.contains("not available here"));
    }
}
