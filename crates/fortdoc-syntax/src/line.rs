//! Single-line classification.
//!
//! Everything here looks at one raw line at a time. Lines come from splitting
//! the source on `\n`, so a CRLF file leaves a trailing `\r` on each line; the
//! classifiers ignore it but it stays part of the line for reconstruction.

/// Starts a comment; a line whose first non-blank character is this is a doc line.
pub const COMMENT_MARKER: char = '!';

/// Trailing marker meaning the statement continues on the next line.
pub const CONTINUATION_MARKER: char = '&';

/// Terminator used to split and rejoin lines.
pub const LINE_FEED: &str = "\n";

/// Split source text into lines, keeping a trailing empty segment after a
/// final newline so that [`join_lines`] reproduces the input exactly.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Rejoin lines with [`LINE_FEED`].
pub fn join_lines(lines: &[&str]) -> String {
    lines.join(LINE_FEED)
}

/// The line without a trailing carriage return.
fn content(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// True if the line is empty or whitespace only.
pub fn is_blank(line: &str) -> bool {
    content(line).trim().is_empty()
}

/// Text before the first comment marker that is not inside a character literal.
///
/// Both quote styles are tracked; a doubled quote inside a literal toggles
/// twice and so leaves the state unchanged.
pub fn strip_comment(line: &str) -> &str {
    let line = content(line);
    let mut in_single = false;
    let mut in_double = false;

    for (i, ch) in line.char_indices() {
        match ch {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            COMMENT_MARKER if !in_single && !in_double => return &line[..i],
            _ => {}
        }
    }
    line
}

/// True if the code part of the line ends with [`CONTINUATION_MARKER`].
///
/// Blank and comment-only lines are never continuations.
pub fn is_continuation(line: &str) -> bool {
    strip_comment(line).trim_end().ends_with(CONTINUATION_MARKER)
}

/// Number of leading space characters.
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|&c| c == ' ').count()
}

/// True if the first non-blank character is [`COMMENT_MARKER`].
pub fn is_doc_line(line: &str) -> bool {
    content(line).trim_start().starts_with(COMMENT_MARKER)
}

/// Terminator to use when writing new lines next to `line`.
pub fn line_ending_of(line: &str) -> &'static str {
    if line.ends_with('\r') {
        "\r\n"
    } else {
        LINE_FEED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_trailing_segment() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b", ""]);
        assert_eq!(split_lines(""), vec![""]);
        assert_eq!(join_lines(&split_lines("a\n\nb\n")), "a\n\nb\n");
    }

    #[test]
    fn strip_comment_cuts_at_marker() {
        assert_eq!(strip_comment("x = 1 ! set x"), "x = 1 ");
        assert_eq!(strip_comment("! whole line"), "");
        assert_eq!(strip_comment("no comment"), "no comment");
    }

    #[test]
    fn strip_comment_ignores_marker_in_literals() {
        assert_eq!(strip_comment("print *, 'hi!' ! greet"), "print *, 'hi!' ");
        assert_eq!(strip_comment(r#"s = "a!b""#), r#"s = "a!b""#);
        assert_eq!(strip_comment("s = 'it''s!' ! c"), "s = 'it''s!' ");
    }

    #[test]
    fn continuation_detected_before_comment() {
        assert!(is_continuation("subroutine foo(a, &"));
        assert!(is_continuation("subroutine foo(a, &   ! more args"));
        assert!(is_continuation("  call bar(x, &\r"));
        assert!(!is_continuation("subroutine foo(a, b)"));
    }

    #[test]
    fn continuation_on_empty_lines_is_false() {
        assert!(!is_continuation(""));
        assert!(!is_continuation("    "));
        assert!(!is_continuation("! only & a comment &"));
    }

    #[test]
    fn ampersand_inside_literal_is_not_continuation() {
        assert!(!is_continuation("print *, 'a & b' ! note"));
        assert!(is_continuation("print *, 'a', &"));
    }

    #[test]
    fn indent_counts_spaces_only() {
        assert_eq!(indent_width("    integer :: i"), 4);
        assert_eq!(indent_width("x"), 0);
        assert_eq!(indent_width("\tx"), 0);
    }

    #[test]
    fn doc_lines() {
        assert!(is_doc_line("! doc"));
        assert!(is_doc_line("    !! doc"));
        assert!(!is_doc_line("x = 1 ! trailing"));
        assert!(!is_doc_line(""));
    }

    #[test]
    fn blank_lines() {
        assert!(is_blank(""));
        assert!(is_blank("   \t"));
        assert!(is_blank("\r"));
        assert!(!is_blank(" x"));
    }

    #[test]
    fn line_endings() {
        assert_eq!(line_ending_of("module m\r"), "\r\n");
        assert_eq!(line_ending_of("module m"), "\n");
    }
}
