//! HTML message pages
//!
//! Every human-facing confirmation or failure body goes through the
//! same small template: a title, a message, and a return link.

/// Render a message page
///
/// Empty `title` and `back_url` fall back to a generic title and the
/// site root.
pub fn message_page(title: &str, message: &str, back_url: &str) -> String {
    let title = if title.is_empty() {
        "backend message"
    } else {
        title
    };
    let back_url = if back_url.is_empty() { "/" } else { back_url };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{title}</title>
  </head>
  <body>
    <h1>{title}</h1>
    <h2>{message}</h2>
    <p><a href="{back_url}">Return</a></p>
  </body>
</html>
"#,
        title = text_to_html(title),
        message = text_to_html(message),
        back_url = back_url,
    )
}

/// Escape HTML metacharacters and convert newlines to `<br />`
pub fn text_to_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("<br />"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_contains_title_message_and_link() {
        let page = message_page("Uploaded", "file stored", "/");
        assert!(page.contains("<title>Uploaded</title>"));
        assert!(page.contains("<h2>file stored</h2>"));
        assert!(page.contains("<a href=\"/\">Return</a>"));
    }

    #[test]
    fn test_empty_title_and_back_url_defaults() {
        let page = message_page("", "msg", "");
        assert!(page.contains("backend message"));
        assert!(page.contains("<a href=\"/\">"));
    }

    #[test]
    fn test_message_is_escaped() {
        let page = message_page("t", "<script>alert(1)</script>", "/");
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_newlines_become_breaks() {
        assert_eq!(text_to_html("a\r\nb"), "a<br />b");
    }
}
