//! vCard line folding.

use vcard3_core::constants::MAX_LINE_CHARS;

/// Folds a content line (without its CRLF) at 75 characters.
///
/// Counts `char`s, not octets or display columns, so a line of wide or
/// multi-byte characters can exceed 75 octets. Continuation lines start
/// with a single space followed by at most 74 characters.
#[must_use]
pub fn fold_line(line: &str) -> String {
    let mut chars = line.chars();
    let head: String = chars.by_ref().take(MAX_LINE_CHARS).collect();

    let mut result = String::with_capacity(line.len() + line.len() / MAX_LINE_CHARS * 3);
    result.push_str(&head);

    loop {
        let segment: String = chars.by_ref().take(MAX_LINE_CHARS - 1).collect();
        if segment.is_empty() {
            break;
        }
        result.push_str("\r\n ");
        result.push_str(&segment);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unfold(folded: &str) -> String {
        folded.replace("\r\n ", "")
    }

    #[test]
    fn short_line_unchanged() {
        let line = "FN:John Doe";
        assert_eq!(fold_line(line), line);
        assert_eq!(fold_line(&"X".repeat(75)), "X".repeat(75));
    }

    #[test]
    fn fold_at_75_chars() {
        let line = "X".repeat(80);
        let folded = fold_line(&line);

        let parts: Vec<&str> = folded.split("\r\n").collect();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].len(), 75);
        assert_eq!(parts[1], format!(" {}", "X".repeat(5)));
    }

    #[test]
    fn fold_counts_chars_not_octets() {
        let line = format!("NOTE:{}", "日".repeat(100));
        let folded = fold_line(&line);

        for part in folded.split("\r\n") {
            assert!(part.chars().count() <= 75);
        }
        assert_eq!(folded.split("\r\n").next().unwrap().chars().count(), 75);
        assert_eq!(unfold(&folded), line);
    }

    #[test]
    fn fold_multiple_times() {
        let line = "X".repeat(75 + 74 * 2 + 1);
        let folded = fold_line(&line);

        assert_eq!(folded.matches("\r\n ").count(), 3);
        assert_eq!(unfold(&folded), line);
    }

    #[test]
    fn unfold_inverts_fold_for_spaces_at_boundaries() {
        let line = format!("NOTE:{} {}", "a".repeat(69), " b".repeat(60));
        assert_eq!(unfold(&fold_line(&line)), line);
    }
}
