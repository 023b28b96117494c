//! Textual HTML minification applied before a document is sent to the generator.
//!
//! This is a fixed pipeline of regex substitutions, not an HTML parser. Each
//! step runs on the output of the previous one, in declaration order.
//!
//! # Limitations
//!
//! - A line starting with `//` is dropped even when it sits inside a
//!   `<script>` or `<style>` block.
//! - Text that looks like `<!-- ... -->` is removed wherever it appears,
//!   including inside string literals.
//! - Leading spaces at the very start of the document collapse to a single
//!   space rather than disappearing.

use std::sync::LazyLock;

use regex::Regex;

/// Leading spaces (a run) or a single tab at the start of a line.
#[allow(clippy::expect_used)]
static LINE_INDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\n|^)( +|\t)").expect("line indent regex is valid"));

/// A whole line starting with `//`, including its terminating newline.
#[allow(clippy::expect_used)]
static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\n|^)//(.*?)(\n|$)").expect("line comment regex is valid")
});

#[allow(clippy::expect_used)]
static NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n").expect("newline regex is valid"));

#[allow(clippy::expect_used)]
static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--.*?-->").expect("HTML comment regex is valid"));

/// Run of spaces or a single tab (newlines are already gone at this point).
#[allow(clippy::expect_used)]
static INLINE_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"( +|\t)").expect("inline space regex is valid"));

// Whitespace classes below are ASCII only; U+00A0 and friends are content.
#[allow(clippy::expect_used)]
static BETWEEN_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">[\t\n\x0B\x0C\r ]+<").expect("between tags regex is valid"));

#[allow(clippy::expect_used)]
static QUOTE_BEFORE_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(["'])[\t\n\x0B\x0C\r ]+>"#).expect("quote before close regex is valid")
});

#[allow(clippy::expect_used)]
static EQUALS_BEFORE_QUOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"=[\t\n\x0B\x0C\r ]+(["'])"#).expect("equals before quote regex is valid")
});

/// Minifies an HTML document for transmission.
///
/// # Examples
///
/// ```
/// use html_to_pdf::minify_html;
///
/// let html = "<div>\n  <!-- hi -->\n  <p>a</p>\n</div>";
/// assert_eq!(minify_html(html), "<div><p>a</p></div>");
/// ```
#[must_use]
pub fn minify_html(html: &str) -> String {
    let steps: [(&Regex, &str); 8] = [
        (&LINE_INDENT, "\n"),
        (&LINE_COMMENT, "\n"),
        (&NEWLINE, " "),
        (&HTML_COMMENT, ""),
        (&INLINE_SPACE, " "),
        (&BETWEEN_TAGS, "><"),
        (&QUOTE_BEFORE_CLOSE, "${1}>"),
        (&EQUALS_BEFORE_QUOTE, "=${1}"),
    ];

    steps
        .iter()
        .fold(html.to_string(), |text, (pattern, replacement)| {
            pattern.replace_all(&text, *replacement).into_owned()
        })
}
