pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Width of plain (unstyled) text in terminal columns.
pub fn display_width(s: &str) -> usize {
    s.chars().count()
}

pub fn pad_right(s: &str, styled: String, width: usize) -> String {
    let padding = width.saturating_sub(display_width(s));
    format!("{}{}", styled, " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("admin", 10), "admin");
        assert_eq!(truncate("engineering", 8), "engin...");
        assert_eq!(truncate("ünïcödé-team", 6), "ünï...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_pad_right_ignores_styling_width() {
        let padded = pad_right("ab", "\x1b[1mab\x1b[0m".to_string(), 5);
        assert!(padded.ends_with("   "));
        assert_eq!(padded.len(), "\x1b[1mab\x1b[0m".len() + 3);
    }
}
