//! Copy-ready embed snippets for a normalized image record.
//!
//! The formatters are pure; putting the string on the clipboard is the UI's
//! job. Attribute values are escaped, so a description containing quotes
//! still yields well-formed markup.

use crate::search::ImageRecord;

/// Default sizing/rounding classes stamped onto component snippets
const COMPONENT_CLASSES: &str = "w-full h-auto rounded-lg";

/// Plain HTML `<img>` fragment
pub fn format_as_markup(record: &ImageRecord) -> String {
    format!(
        r#"<img src="{}" alt="{}" />"#,
        escape_attr(&record.url),
        escape_attr(&record.alt_text)
    )
}

/// JSX `<img>` fragment with the default responsive classes
pub fn format_as_component(record: &ImageRecord) -> String {
    format!(
        r#"<img src="{}" alt="{}" className="{}" />"#,
        escape_attr(&record.url),
        escape_attr(&record.alt_text),
        COMPONENT_CLASSES
    )
}

/// The image URL, verbatim
pub fn format_as_url(record: &ImageRecord) -> String {
    record.url.clone()
}

/// Escape a string for use inside a double-quoted attribute value.
/// Ampersand must go first or the entities below get re-escaped.
fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ImageRecord {
        ImageRecord {
            id: "abc".to_string(),
            url: "https://images.test/abc.jpg".to_string(),
            alt_text: "a red fox".to_string(),
            attribution: "Jane Doe".to_string(),
            original_url: "https://images.test/abc".to_string(),
            source_name: "Unsplash".to_string(),
        }
    }

    #[test]
    fn test_markup_snippet() {
        assert_eq!(
            format_as_markup(&record()),
            r#"<img src="https://images.test/abc.jpg" alt="a red fox" />"#
        );
    }

    #[test]
    fn test_component_snippet_carries_classes() {
        let snippet = format_as_component(&record());
        assert!(snippet.contains(r#"className="w-full h-auto rounded-lg""#));
        assert!(snippet.starts_with(r#"<img src="https://images.test/abc.jpg""#));
    }

    #[test]
    fn test_url_is_verbatim() {
        let rec = record();
        assert_eq!(format_as_url(&rec), rec.url);
    }

    #[test]
    fn test_quotes_in_alt_are_escaped() {
        let mut rec = record();
        rec.alt_text = r#"the "quick" fox & friends"#.to_string();
        assert_eq!(
            format_as_markup(&rec),
            r#"<img src="https://images.test/abc.jpg" alt="the &quot;quick&quot; fox &amp; friends" />"#
        );
    }
}
