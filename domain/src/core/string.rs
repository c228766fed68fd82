//! String utilities for the domain layer.

/// Truncate a string to a maximum byte length with ellipsis (UTF-8 safe).
///
/// Used to keep generated question text readable in log lines.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3).min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_is_unchanged() {
        assert_eq!(truncate("Which planet?", 40), "Which planet?");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate("Which planet is largest?", 12), "Which pla...");
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        // Each Arabic letter is 2 bytes; cutting at an odd byte must back up.
        let s = "سؤال طويل جدا";
        let out = truncate(s, 8);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 8);
    }
}
