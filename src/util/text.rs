use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Length of a string in rendered characters (grapheme clusters).
pub fn char_len(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Hard-truncate a string to at most `max` rendered characters. No ellipsis,
/// no word-boundary awareness; the cut lands on a grapheme boundary.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.grapheme_indices(true).nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Left-justify a string by space-padding it to `width` rendered characters.
/// Strings already at or past `width` are returned unchanged.
pub fn pad_right(s: &str, width: usize) -> String {
    let len = char_len(s);
    if len >= width {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + (width - len));
    out.push_str(s);
    for _ in len..width {
        out.push(' ');
    }
    out
}

/// Display width in terminal cells, for fitting text into a panel.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}
