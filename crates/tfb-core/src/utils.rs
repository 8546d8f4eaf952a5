//! Small text helpers shared by the pipeline stages.

/// Lowercase the text and collapse all whitespace runs to single spaces.
///
/// Every pipeline stage works on text in this form, so normalization happens
/// exactly once, at the pipeline entry.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cut a string down to at most `max_chars` characters.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_collapses() {
        assert_eq!(
            normalize_text("  Потратил\t500   РУБ \n на продукты "),
            "потратил 500 руб на продукты"
        );
    }

    #[test]
    fn normalize_handles_nbsp() {
        assert_eq!(normalize_text("1\u{a0}500 руб"), "1 500 руб");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_chars("пятьсот", 4), "пять");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
