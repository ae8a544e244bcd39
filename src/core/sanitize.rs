//! HTML sanitization for text embedded in the confirmation email.
//!
//! The pipeline runs in a fixed order: strip tags (keeping `<br>`), then escape
//! the reserved characters. Escaping is always the last step.

use regex::Regex;
use std::sync::OnceLock;

pub const LINE_BREAK: &str = "<br>";

/// 依序替換：`&` 必須最先處理，否則會把後面產生的實體再次跳脫
const RESERVED: [(char, &str); 5] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&#39;"),
];

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    // 只把真正的標記當成標籤：元素、註解與 `<!...>` 宣告
    TAG.get_or_init(|| {
        Regex::new(r"(?s)<!--.*?-->|<![^<>]*>|</?[A-Za-z][^<>]*>")
            .expect("tag pattern is a valid regex")
    })
}

fn line_break_pattern() -> &'static Regex {
    static BR: OnceLock<Regex> = OnceLock::new();
    BR.get_or_init(|| Regex::new(r"(?i)^<br\s*/?>$").expect("br pattern is a valid regex"))
}

pub fn sanitize_html(input: &str) -> String {
    let stripped = strip_tags(input);
    escape_reserved(&stripped)
}

/// Removes every tag except the line break, which is normalized to `<br>`.
/// Text between tags is kept.
pub fn strip_tags(input: &str) -> String {
    tag_pattern()
        .replace_all(input, |caps: &regex::Captures| {
            if line_break_pattern().is_match(&caps[0]) {
                LINE_BREAK.to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

/// Escapes the reserved characters in the text between `<br>` tags.
pub fn escape_reserved(input: &str) -> String {
    input
        .split(LINE_BREAK)
        .map(escape_segment)
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

fn escape_segment(segment: &str) -> String {
    RESERVED
        .iter()
        .fold(segment.to_string(), |text, (reserved, entity)| {
            text.replace(*reserved, entity)
        })
}
