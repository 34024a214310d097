//! Error blocks rendered in place of card content.

/// First `max` characters of `text`.
pub fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// `Invalid <kind> on card: <message>\n<detail>`, each part cut to `max`
/// characters, newlines rendered as `<br>`.
pub fn render_error(kind: &str, message: &str, detail: &str, max: usize) -> String {
    format!(
        "Invalid {kind} on card: {}\n{}",
        truncate(message, max),
        truncate(detail, max)
    )
    .replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
        assert_eq!(truncate("", 3), "");
    }

    #[test]
    fn test_render_error_format() {
        let block = render_error("HTML", "bad tag", "at byte 3", 2000);
        assert_eq!(block, "Invalid HTML on card: bad tag<br>at byte 3");
    }

    #[test]
    fn test_render_error_truncates_each_part() {
        let long = "x".repeat(2500);
        let block = render_error("MathJax", &long, &long, 2000);
        let kept = "x".repeat(2000);
        let expected = format!("Invalid MathJax on card: {kept}<br>{kept}");
        assert_eq!(block, expected);
    }
}
