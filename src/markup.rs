//! Markup helpers shared by the renderers.

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(
            escape_html(r#"<b onclick="x('y')">A&B</b>"#),
            "&lt;b onclick=&quot;x(&#039;y&#039;)&quot;&gt;A&amp;B&lt;/b&gt;"
        );
    }

    #[test]
    fn test_escape_does_not_double_encode_plain_text() {
        assert_eq!(escape_html("Ch 1 · L/R — 48V"), "Ch 1 · L/R — 48V");
    }
}
