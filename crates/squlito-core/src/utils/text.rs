use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Longest title shown for an ad-hoc query.
pub const TITLE_MAX_CHARS: usize = 60;

/// Longest prefix of `text` whose display width fits in `max_width`.
fn take_width(text: &str, max_width: usize) -> &str {
    let mut current_width = 0;
    for (idx, ch) in text.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > max_width {
            return &text[..idx];
        }
        current_width += ch_width;
    }
    text
}

/// Cut `text` to at most `max_width` columns.
///
/// Text that needs cutting ends in `...` when `max_width` is above 3 and is
/// hard-cut otherwise. A wide character that would straddle the cut is
/// replaced by a space so the ellipsis stays last.
///
/// # Examples
/// ```
/// use squlito_core::utils::text::truncate_to_width;
/// assert_eq!(truncate_to_width("Hello World!", 8), "Hello...");
/// assert_eq!(truncate_to_width("Hello", 3), "Hel");
/// ```
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= ELLIPSIS.len() {
        return take_width(text, max_width).to_string();
    }

    let keep = max_width - ELLIPSIS.len();
    let mut result = pad_to_width(take_width(text, keep), keep);
    result.push_str(ELLIPSIS);
    result
}

/// Right-pad `text` with spaces to `width` columns. Wider text is returned as is.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - text_width))
    }
}

/// Cut a status or message line to `max_width` columns.
pub fn truncate_line(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    truncate_to_width(text, max_width)
}

/// Single-line title for a query: newlines collapse to spaces, blank text
/// becomes `Query`, and long text is capped at [`TITLE_MAX_CHARS`].
pub fn truncate_title(sql: &str) -> String {
    let collapsed = sql.replace(['\r', '\n'], " ");
    let trimmed = collapsed.trim();
    if trimmed.is_empty() {
        return "Query".to_string();
    }
    truncate_to_width(trimmed, TITLE_MAX_CHARS)
}

/// Width of the widest line in `text`.
pub fn measure_message_width(text: &str) -> usize {
    text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0)
}

/// Lay out `left` and a right-aligned `right` in exactly `width` columns
/// when they fit, truncating `left` first and then `right`.
pub fn render_status_line(width: usize, left: &str, right: &str) -> String {
    if width == 0 {
        return String::new();
    }
    if right.is_empty() {
        return truncate_line(left, width);
    }

    let right_width = right.width();
    if right_width + 1 > width {
        return truncate_line(right, width);
    }

    let left = if left.width() + right_width + 1 > width {
        truncate_line(left, width - right_width - 1)
    } else {
        left.to_string()
    };

    let padding = width.saturating_sub(left.width() + right_width).max(1);
    format!("{}{}{}", left, " ".repeat(padding), right)
}

/// Pretty-print `raw` with four-space indentation when it is a JSON object
/// or array; anything else comes back unchanged.
pub fn maybe_indent_json(raw: &str) -> String {
    let trimmed = raw.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return raw.to_string();
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
        return raw.to_string();
    };

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    if serde::Serialize::serialize(&value, &mut serializer).is_err() {
        return raw.to_string();
    }
    String::from_utf8(out).unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Hello", 10), "Hello");
        assert_eq!(truncate_to_width("Hello World!", 8), "Hello...");
        assert_eq!(truncate_to_width("Hello", 5), "Hello");
        assert_eq!(truncate_to_width("Hello", 3), "Hel");
        assert_eq!(truncate_to_width("Hello", 0), "");
        assert_eq!(truncate_to_width("", 5), "");
    }

    #[test]
    fn test_truncate_to_width_long_name() {
        let out = truncate_to_width("This is a very long name that should be truncated", 15);
        assert_eq!(out, "This is a ve...");
        assert_eq!(out.width(), 15);
    }

    #[test]
    fn test_truncate_to_width_wide_characters() {
        // Each character is two columns wide
        let out = truncate_to_width("東京タワー", 7);
        assert_eq!(out, "東京...");
        assert!(out.width() <= 7);

        // Odd budget: the half column left over is filled before the ellipsis
        let out = truncate_to_width("東京タワー", 8);
        assert_eq!(out, "東京 ...");
        assert_eq!(out.width(), 8);
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("Hello", 10), "Hello     ");
        assert_eq!(pad_to_width("Hello World", 5), "Hello World");
        assert_eq!(pad_to_width("東京", 6), "東京  ");
    }

    #[test]
    fn test_truncate_line() {
        assert_eq!(truncate_line("anything", 0), "");
        assert_eq!(truncate_line("abcdef", 4), "a...");
        assert_eq!(truncate_line("abc", 4), "abc");
    }

    #[test]
    fn test_truncate_title() {
        assert_eq!(truncate_title("  \n "), "Query");
        assert_eq!(
            truncate_title("SELECT *\nFROM users\n"),
            "SELECT * FROM users"
        );

        let long = format!("SELECT {} FROM t", "x, ".repeat(40));
        let title = truncate_title(&long);
        assert_eq!(title.width(), TITLE_MAX_CHARS);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn test_measure_message_width() {
        assert_eq!(measure_message_width(""), 0);
        assert_eq!(measure_message_width("one\nthree\nfo"), 5);
    }

    #[test]
    fn test_render_status_line() {
        assert_eq!(render_status_line(0, "left", "right"), "");
        assert_eq!(render_status_line(12, "left", ""), "left");
        assert_eq!(render_status_line(12, "left", "right"), "left   right");

        // Left side gives way first
        let line = render_status_line(16, "Rows 1000  Showing 1-20", "q quit");
        assert_eq!(line, "Rows 1... q quit");
        assert_eq!(line.width(), 16);

        // Right side alone when there is no room for both
        assert_eq!(render_status_line(4, "left", "right"), "r...");
    }

    #[test]
    fn test_maybe_indent_json() {
        assert_eq!(maybe_indent_json("plain text"), "plain text");
        assert_eq!(maybe_indent_json("{not json"), "{not json");
        assert_eq!(maybe_indent_json("42"), "42");
        assert_eq!(
            maybe_indent_json(r#"{"a":1}"#),
            "{\n    \"a\": 1\n}"
        );
        assert_eq!(maybe_indent_json(" [1,2] "), "[\n    1,\n    2\n]");
    }
}
