//! Cleanup of generator output into display-ready plain text.
//!
//! The steps run in a fixed order: markup characters first, then `mailto:`
//! prefixes, then line normalization. Line normalization assumes the markup
//! is already gone, so a line holding only `**` or `#` ends up empty and is
//! dropped.

/// Characters removed wherever they appear.
pub const MARKUP_CHARS: [char; 7] = ['*', '#', '+', '[', ']', '(', ')'];

/// Substring removed wherever it appears.
pub const MAILTO_PREFIX: &str = "mailto:";

/// Run the full cleanup pipeline.
pub fn sanitize(raw: &str) -> String {
    let stripped = strip_markup(raw);
    let stripped = stripped.replace(MAILTO_PREFIX, "");
    normalize_lines(&stripped)
}

fn strip_markup(text: &str) -> String {
    text.chars().filter(|c| !MARKUP_CHARS.contains(c)).collect()
}

/// Trim every line, drop the blank ones, and join the rest with `\n`.
fn normalize_lines(text: &str) -> String {
    text.split(is_line_break)
        .map(|line| line.trim_matches(is_strippable))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whitespace plus the ASCII separator controls `\u{1c}`..=`\u{1f}`.
fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}'..='\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
