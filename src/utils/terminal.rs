//! Terminal output sanitization
//!
//! Item content is arbitrary user text and may arrive from pipes or editors
//! with embedded escape sequences. Anything printed to the terminal by the
//! human-readable formatters goes through [`strip_ansi_codes`] first; JSON
//! output is left untouched.

/// Removes ANSI CSI escape sequences and control characters other than tab,
/// newline and carriage return
///
/// # Examples
///
/// ```
/// use contextkeeper::utils::terminal::strip_ansi_codes;
///
/// assert_eq!(strip_ansi_codes("\x1b[31mred\x1b[0m note"), "red note");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // CSI sequences end at the first letter
            for next_ch in chars.by_ref() {
                if next_ch.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }

        if ch.is_control() && ch != '\t' && ch != '\n' && ch != '\r' {
            continue;
        }

        result.push(ch);
    }

    result
}

/// Sanitized content collapsed onto one line, for list rows and previews
pub fn single_line(text: &str) -> String {
    strip_ansi_codes(text).split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_colors() {
        assert_eq!(strip_ansi_codes("\x1b[1m\x1b[31mBold Red\x1b[0m"), "Bold Red");
    }

    #[test]
    fn test_strip_cursor_movement() {
        assert_eq!(strip_ansi_codes("\x1b[2J\x1b[H note"), " note");
    }

    #[test]
    fn test_strip_bell_and_backspace() {
        assert_eq!(strip_ansi_codes("ping\x07\x08"), "ping");
    }

    #[test]
    fn test_keeps_markdown_and_unicode() {
        let text = "# Title\n- [ ] task 👋\ttabbed";
        assert_eq!(strip_ansi_codes(text), text);
    }

    #[test]
    fn test_single_line_collapses_whitespace() {
        assert_eq!(single_line("first line\n\n  second\tline "), "first line second line");
        assert_eq!(single_line(""), "");
    }
}
