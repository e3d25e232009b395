//! Individual recovery strategies for [`extract`](super::extract).
//!
//! Each strategy is a pure function from text to an optional JSON object.
//! A strategy that finds a candidate which fails to parse returns `None`
//! and the chain moves on.

use super::JsonObject;
use serde_json::Value;

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// Which strategy produced an extracted object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    LabeledFence,
    AnyFence,
    WholeText,
    SentinelKey,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::LabeledFence => "labeled_fence",
            Strategy::AnyFence => "any_fence",
            Strategy::WholeText => "whole_text",
            Strategy::SentinelKey => "sentinel_key",
        }
    }
}

/// Parse `s` as JSON and keep it only if it is an object.
pub fn parse_object(s: &str) -> Option<JsonObject> {
    match serde_json::from_str::<Value>(s.trim()) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Strategy 1: the first ` ```json ` block.
///
/// An unterminated block runs to the end of the text.
pub fn labeled_fence(text: &str) -> Option<JsonObject> {
    let start = text.find(JSON_FENCE)? + JSON_FENCE.len();
    let rest = &text[start..];
    let end = rest.find(FENCE).unwrap_or(rest.len());
    parse_object(&rest[..end])
}

/// Strategy 2: the first fenced block of any label.
pub fn any_fence(text: &str) -> Option<JsonObject> {
    let start = text.find(FENCE)? + FENCE.len();
    let rest = &text[start..];
    let end = rest.find(FENCE).unwrap_or(rest.len());
    parse_object(strip_fence_label(&rest[..end]))
}

/// Strategy 3: the whole text is JSON.
pub fn whole_text(text: &str) -> Option<JsonObject> {
    parse_object(text)
}

/// Strategy 4: locate `"key"` for each expected key in order and parse the
/// innermost object that encloses it.
///
/// Candidate `{` positions are tried from the key backwards; the first whose
/// string-aware match closes after the key and parses wins.
pub fn sentinel_key(text: &str, expected_keys: &[&str]) -> Option<JsonObject> {
    expected_keys.iter().find_map(|key| {
        let needle = format!("\"{key}\"");
        let key_pos = text.find(&needle)?;
        text[..key_pos]
            .rmatch_indices('{')
            .find_map(|(start, _)| {
                let end = matching_close_brace(text, start)?;
                if end <= key_pos {
                    return None;
                }
                parse_object(&text[start..=end])
            })
    })
}

/// Drop a language label line (` ```python `, ` ```text `) from a fence interior.
fn strip_fence_label(block: &str) -> &str {
    match block.split_once('\n') {
        Some((first, body)) => {
            let label = first.trim();
            if !label.is_empty()
                && !label.starts_with(['{', '['])
                && !label.contains(char::is_whitespace)
            {
                body
            } else {
                block
            }
        }
        None => block,
    }
}

/// Scan forward from the `{` at `start` to its matching `}`.
///
/// Braces inside string literals are ignored.
fn matching_close_brace(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_fence_ignores_prose() {
        let text = "Sure! Here you go:\n```json\n{\"task\": \"parse CSV\"}\n```\nGood luck.";
        let obj = labeled_fence(text).unwrap();
        assert_eq!(obj["task"], "parse CSV");
    }

    #[test]
    fn test_labeled_fence_unterminated() {
        let text = "```json\n{\"verdict\": \"ship_it\"}";
        assert_eq!(labeled_fence(text).unwrap()["verdict"], "ship_it");
    }

    #[test]
    fn test_labeled_fence_invalid_json_is_none() {
        assert!(labeled_fence("```json\n{not json}\n```").is_none());
    }

    #[test]
    fn test_any_fence_strips_label() {
        let text = "```text\n{\"a\": 1}\n```";
        assert_eq!(any_fence(text).unwrap()["a"], 1);
    }

    #[test]
    fn test_any_fence_without_label() {
        let text = "Result:\n```\n{\"a\": 2}\n```";
        assert_eq!(any_fence(text).unwrap()["a"], 2);
    }

    #[test]
    fn test_any_fence_only_first_block() {
        let text = "```\nnot json\n```\n```\n{\"a\": 3}\n```";
        assert!(any_fence(text).is_none());
    }

    #[test]
    fn test_whole_text_rejects_arrays() {
        assert!(whole_text("[1, 2, 3]").is_none());
        assert!(whole_text("  {\"k\": true}  ").is_some());
    }

    #[test]
    fn test_sentinel_key_in_prose() {
        let text = "I think {this} is fine. {\"task\": \"Build a parser\", \"includes\": [\"errors\"]} Done.";
        let obj = sentinel_key(text, &["task"]).unwrap();
        assert_eq!(obj["task"], "Build a parser");
    }

    #[test]
    fn test_sentinel_key_skips_closed_sibling_object() {
        let text = r#"Note {"meta": {"x": 1}, "verdict": "needs_work"} end"#;
        let obj = sentinel_key(text, &["verdict"]).unwrap();
        assert_eq!(obj["verdict"], "needs_work");
        assert_eq!(obj["meta"]["x"], 1);
    }

    #[test]
    fn test_sentinel_key_braces_inside_strings() {
        let text = r#"prefix {"task": "use {} in format!", "n": 1} suffix"#;
        let obj = sentinel_key(text, &["task"]).unwrap();
        assert_eq!(obj["task"], "use {} in format!");
    }

    #[test]
    fn test_sentinel_key_close_brace_inside_earlier_string() {
        let text = r#"My review: {"must_fix": ["stray } in format string"], "verdict": "needs_work"} thanks"#;
        let obj = sentinel_key(text, &["verdict"]).unwrap();
        assert_eq!(obj["verdict"], "needs_work");
        assert_eq!(obj["must_fix"][0], "stray } in format string");
    }

    #[test]
    fn test_sentinel_key_open_brace_inside_earlier_string() {
        let text = r#"ok {"note": "dict literal {", "verdict": "ship_it"} bye"#;
        let obj = sentinel_key(text, &["verdict"]).unwrap();
        assert_eq!(obj["verdict"], "ship_it");
        assert_eq!(obj["note"], "dict literal {");
    }

    #[test]
    fn test_sentinel_key_tries_later_keys() {
        let text = r#"{"task": broken "#.to_string() + r#" and {"verdict": "ship_it"}"#;
        let obj = sentinel_key(&text, &["task", "verdict"]).unwrap();
        assert_eq!(obj["verdict"], "ship_it");
    }

    #[test]
    fn test_sentinel_key_missing() {
        assert!(sentinel_key("no keys here", &["task"]).is_none());
    }
}
