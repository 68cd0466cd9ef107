//! Text sanitizing and escaping helpers
//!
//! Labels are sanitized when a crumb is collected and escaped when the
//! trail is rendered. URLs are checked against an allow-list of schemes.

use url::Url;

/// Schemes a crumb URL may carry
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp", "ftps", "mailto"];

/// Escape text for use inside an HTML element
///
/// Entities that are already encoded (`&amp;`, `&#8250;`, `&rsaquo;`) are
/// left alone.
pub fn esc_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (idx, ch) in text.char_indices() {
        match ch {
            '&' if is_entity(&text[idx..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Check whether `text` starts with a complete character reference
fn is_entity(text: &str) -> bool {
    let Some(end) = text.find(';') else {
        return false;
    };
    let body = &text[1..end];

    if let Some(num) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        !num.is_empty() && num.chars().all(|c| c.is_ascii_hexdigit())
    } else if let Some(num) = body.strip_prefix('#') {
        !num.is_empty() && num.chars().all(|c| c.is_ascii_digit())
    } else {
        body.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && body.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

/// Escape text for use inside an HTML attribute
pub fn esc_attr(text: &str) -> String {
    esc_html(text)
}

/// Clean a URL for an `href` attribute
///
/// Returns an empty string when the URL uses a scheme outside the allow-list.
/// Relative URLs are kept. Control characters are dropped and spaces encoded.
pub fn esc_url(url: &str) -> String {
    let cleaned: String = url
        .trim()
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .replace(' ', "%20");

    if cleaned.is_empty() {
        return cleaned;
    }

    if let Ok(parsed) = Url::parse(&cleaned) {
        if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
            return String::new();
        }
    }

    esc_attr(&cleaned).replace("&amp;", "&#038;")
}

/// Sanitize a user supplied text field
///
/// Drops `script` and `style` elements with their contents, strips the
/// remaining tags, folds line breaks, tabs and runs of spaces into single
/// spaces and trims the result.
pub fn sanitize_text_field(text: &str) -> String {
    let stripped = strip_tags(&strip_elements(text, &["script", "style"]));
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove whole elements, contents included
///
/// An element without a closing tag is left for [`strip_tags`].
fn strip_elements(text: &str, names: &[&str]) -> String {
    names
        .iter()
        .fold(text.to_string(), |text, name| strip_element(&text, name))
}

fn strip_element(text: &str, name: &str) -> String {
    // ASCII lowercasing keeps byte offsets aligned with `text`
    let lower = text.to_ascii_lowercase();
    let open = format!("<{}", name);
    let close = format!("</{}>", name);

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(found) = lower[pos..].find(&open) {
        let start = pos + found;
        let after = start + open.len();
        let is_tag = lower[after..]
            .chars()
            .next()
            .is_some_and(|c| c == '>' || c == '/' || c.is_whitespace());
        let end = if is_tag {
            lower[after..].find(&close).map(|i| after + i + close.len())
        } else {
            None
        };

        match end {
            Some(end) => {
                out.push_str(&text[pos..start]);
                pos = end;
            }
            None => {
                out.push_str(&text[pos..after]);
                pos = after;
            }
        }
    }

    out.push_str(&text[pos..]);
    out
}

/// Remove anything that looks like an HTML tag
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_tag = false;

    while let Some(ch) = chars.next() {
        if in_tag {
            if ch == '>' {
                in_tag = false;
            }
            continue;
        }

        if ch == '<' {
            let opens_tag = chars
                .peek()
                .map(|next| next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?'))
                .unwrap_or(false);
            if opens_tag {
                in_tag = true;
                continue;
            }
        }

        out.push(ch);
    }

    out
}

/// Percent-encode a value for a query string
pub fn encode_query_value(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esc_html() {
        assert_eq!(
            esc_html(r#"Tom & "Jerry" <b>"#),
            "Tom &amp; &quot;Jerry&quot; &lt;b&gt;"
        );
        assert_eq!(esc_html("It's"), "It&#039;s");
    }

    #[test]
    fn test_existing_entities_are_kept() {
        assert_eq!(esc_attr("&rsaquo;"), "&rsaquo;");
        assert_eq!(esc_html("a &amp; b &#8250; &#x203A;"), "a &amp; b &#8250; &#x203A;");
        assert_eq!(esc_html("Fish & Chips; Peas"), "Fish &amp; Chips; Peas");
        assert_eq!(esc_html("&;"), "&amp;;");
    }

    #[test]
    fn test_esc_url() {
        assert_eq!(esc_url("http://my.site/?a=1&b=2"), "http://my.site/?a=1&#038;b=2");
        assert_eq!(esc_url(" /relative/path "), "/relative/path");
        assert_eq!(esc_url("javascript:alert(1)"), "");
        assert_eq!(esc_url("mailto:me@my.site"), "mailto:me@my.site");
        assert_eq!(esc_url("http://my.site/my page/"), "http://my.site/my%20page/");
        assert_eq!(esc_url("http://my.site/a\tb/\n"), "http://my.site/ab/");
        assert_eq!(esc_url(""), "");
    }

    #[test]
    fn test_sanitize_text_field() {
        assert_eq!(sanitize_text_field("  Hello\n\tWorld  "), "Hello World");
        assert_eq!(sanitize_text_field("<b>Bold</b> move"), "Bold move");
        assert_eq!(sanitize_text_field("1 < 2"), "1 < 2");
        assert_eq!(sanitize_text_field("<script>x"), "x");
    }

    #[test]
    fn test_sanitize_drops_script_and_style_bodies() {
        assert_eq!(sanitize_text_field("<script>alert(1)</script>Hi"), "Hi");
        assert_eq!(
            sanitize_text_field(r#"A <STYLE type="text/css">p { color: red }</STYLE>B"#),
            "A B"
        );
        assert_eq!(sanitize_text_field("<scripts>kept</scripts>"), "kept");
    }

    #[test]
    fn test_encode_query_value() {
        assert_eq!(encode_query_value("search query"), "search+query");
        assert_eq!(encode_query_value("a&b"), "a%26b");
    }
}
