//! Documentation comment extraction
//!
//! Only the `<summary>` content is carried over. Text is split into
//! trimmed lines; inline elements such as `<para/>` or `<see cref="X"/>`
//! become entries of their own.

const SUMMARY_OPEN: &str = "<summary>";
const SUMMARY_CLOSE: &str = "</summary>";

/// Extract the summary lines of a raw `///` documentation comment
pub fn extract_comments(doc: Option<&str>) -> Vec<String> {
    let Some(doc) = doc else {
        return Vec::new();
    };

    let text = strip_comment_markers(doc);
    let mut lines = Vec::new();
    let mut rest = text.as_str();

    while let Some(start) = rest.find(SUMMARY_OPEN) {
        let content = &rest[start + SUMMARY_OPEN.len()..];
        let (summary, remaining) = match content.find(SUMMARY_CLOSE) {
            Some(end) => (&content[..end], &content[end + SUMMARY_CLOSE.len()..]),
            None => (content, ""),
        };
        split_content(summary, &mut lines);
        rest = remaining;
    }

    lines
}

/// Drop the leading `///` of every line
fn strip_comment_markers(doc: &str) -> String {
    doc.lines()
        .map(|line| {
            let line = line.trim_start();
            line.strip_prefix("///").unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn split_content(content: &str, lines: &mut Vec<String>) {
    let mut rest = content;

    while !rest.is_empty() {
        match rest.find('<') {
            Some(0) => {
                let element_end = element_end(rest);
                push_line(&rest[..element_end], lines);
                rest = &rest[element_end..];
            }
            Some(next) => {
                push_text(&rest[..next], lines);
                rest = &rest[next..];
            }
            None => {
                push_text(rest, lines);
                rest = "";
            }
        }
    }
}

/// Length of the element starting at the beginning of `text`: a self-closing
/// tag, or an opening tag through its matching close (`<c>x</c>`)
fn element_end(text: &str) -> usize {
    let Some(tag_end) = text.find('>').map(|i| i + 1) else {
        return text.len();
    };

    let tag = &text[..tag_end];
    if tag.ends_with("/>") || tag.starts_with("</") {
        return tag_end;
    }

    let name: String = tag[1..]
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == ':')
        .collect();
    let close = format!("</{}>", name);
    match text[tag_end..].find(&close) {
        Some(offset) => tag_end + offset + close.len(),
        None => tag_end,
    }
}

fn push_text(text: &str, lines: &mut Vec<String>) {
    for line in text.lines() {
        push_line(line, lines);
    }
}

fn push_line(line: &str, lines: &mut Vec<String>) {
    let line = line.trim_matches(|c: char| c.is_whitespace() || c == '/');
    if !line.is_empty() {
        lines.push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_tags_become_entries() {
        let doc = "/// <summary>\n/// Comment Line 1<para/>\n/// Comment Line 2\n/// </summary>";
        assert_eq!(
            extract_comments(Some(doc)),
            vec!["Comment Line 1", "<para/>", "Comment Line 2"]
        );
    }

    #[test]
    fn test_missing_doc_is_empty() {
        assert!(extract_comments(None).is_empty());
        assert!(extract_comments(Some("// plain comment")).is_empty());
    }

    #[test]
    fn test_only_summary_is_kept() {
        let doc = "/// <summary>The count</summary>\n/// <remarks>Ignored</remarks>";
        assert_eq!(extract_comments(Some(doc)), vec!["The count"]);
    }

    #[test]
    fn test_paired_elements_stay_whole() {
        let doc = "/// <summary>\n/// Uses <c>null</c> and <see cref=\"Foo\"/>\n/// </summary>";
        assert_eq!(
            extract_comments(Some(doc)),
            vec!["Uses", "<c>null</c>", "and", "<see cref=\"Foo\"/>"]
        );
    }

    #[test]
    fn test_unterminated_summary() {
        let doc = "/// <summary>\n/// Dangling";
        assert_eq!(extract_comments(Some(doc)), vec!["Dangling"]);
    }
}
