//! Small string helpers shared by prompt builders and log output.

/// Truncate to at most `max_bytes` without splitting a UTF-8 character.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// One-line preview of at most `max_chars` characters, `...` marking a cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let cut: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

/// Render items as `- item` lines, or `empty` when there are none.
pub fn bullets<S: AsRef<str>>(items: &[S], empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    items
        .iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundary() {
        assert_eq!(truncate_str("hello world", 5), "hello");
        assert_eq!(truncate_str("hi", 10), "hi");
        // 'é' is two bytes
        assert_eq!(truncate_str("café", 4), "caf");
        assert_eq!(truncate_str("", 3), "");
    }

    #[test]
    fn preview_flattens_and_cuts() {
        assert_eq!(preview("a\n  b", 10), "a b");
        assert_eq!(preview("abcdefghij", 6), "abc...");
    }

    #[test]
    fn bullets_or_placeholder() {
        assert_eq!(bullets::<&str>(&[], "None yet"), "None yet");
        assert_eq!(bullets(&["a", "b"], "None"), "- a\n- b");
    }
}
