use crate::core::sanitize::{sanitize_html, LINE_BREAK};
use crate::domain::model::LeadSubmission;

pub fn build_prompt(lead: &LeadSubmission) -> String {
    format!(
        "Write a short, friendly confirmation email body for {name}, who just signed up \
         for our newsletter and works in the {industry} industry. Thank them by name, \
         mention one or two ways our insights can help {industry} teams, and keep it under \
         120 words. Return plain text only, with no subject line and no HTML.",
        name = lead.name(),
        industry = lead.industry(),
    )
}

/// 不依賴網路的預設內容，一定同時提到姓名與產業
pub fn fallback_content(name: &str, industry: &str) -> String {
    format!(
        "Hi {name},\n\n\
         Thanks for signing up! We're excited to share insights tailored to the {industry} \
         industry with you.\n\n\
         Keep an eye on your inbox for practical tips, trends, and stories from other \
         {industry} teams.\n\n\
         Talk soon,\nThe Team"
    )
}

/// Returns the generated text when it is usable, otherwise the fallback template.
pub fn select_content(primary: Option<String>, name: &str, industry: &str) -> String {
    match primary {
        Some(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => fallback_content(name, industry),
    }
}

/// Sanitized HTML fragment for the given text; newlines become `<br>` first.
pub fn render_fragment(text: &str) -> String {
    let with_breaks = text.replace("\r\n", "\n").replace('\n', LINE_BREAK);
    sanitize_html(&with_breaks)
}

pub fn render_html_body(text: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>",
            "<html><body style=\"font-family: Arial, sans-serif; line-height: 1.5; color: #1f2933;\">",
            "<div style=\"max-width: 600px; margin: 0 auto; padding: 24px;\">",
            "<p>{}</p>",
            "</div></body></html>"
        ),
        render_fragment(text)
    )
}
