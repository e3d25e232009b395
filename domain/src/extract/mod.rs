//! Response extraction: recover a JSON object from free-form model text.
//!
//! Models are asked for JSON but routinely wrap it in markdown, prepend
//! chatter, or emit something that is not JSON at all. [`extract`] runs an
//! ordered chain of pure strategies and returns the first object found:
//!
//! | # | Strategy | Looks at |
//! |---|----------|----------|
//! | 1 | [`labeled_fence`] | first ` ```json ` block |
//! | 2 | [`any_fence`] | first fenced block of any label |
//! | 3 | [`whole_text`] | the entire text |
//! | 4 | [`sentinel_key`] | innermost `{...}` around an expected key |
//!
//! When nothing parses, the caller receives a [`RawFallback`] holding the
//! text verbatim. Extraction never panics and never errors otherwise.
//!
//! Only the first candidate per strategy is considered; nested fences or
//! several JSON-looking substrings are not disambiguated further.

pub mod payload;
pub mod strategies;

pub use strategies::{Strategy, any_fence, labeled_fence, sentinel_key, whole_text};

use serde_json::Value;

/// A parsed JSON object
pub type JsonObject = serde_json::Map<String, Value>;

/// Key under which [`RawFallback::into_object`] stores the unparsed text
pub const RAW_KEY: &str = "raw";

/// Sentinel keys for task-setter output
pub const TASK_KEYS: &[&str] = &["task"];
/// Sentinel keys for reviewer output
pub const REVIEW_KEYS: &[&str] = &["verdict"];
/// Sentinel keys for planner output
pub const PLANNER_KEYS: &[&str] = &["status", "next_action", "current_project"];
/// Sentinel keys for coach output
pub const COACH_KEYS: &[&str] = &["recommendation"];
/// Sentinel keys for issue attribution output
pub const ISSUE_KEYS: &[&str] = &["directives", "fault"];

/// Text that could not be turned into a JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFallback {
    pub raw: String,
}

impl RawFallback {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The fallback mapping: `{"raw": <original text>}`
    pub fn into_object(self) -> JsonObject {
        let mut map = JsonObject::new();
        map.insert(RAW_KEY.to_string(), Value::String(self.raw));
        map
    }
}

/// Run the strategy chain and report which strategy succeeded.
pub fn extract_with_strategy(text: &str, expected_keys: &[&str]) -> Option<(Strategy, JsonObject)> {
    if let Some(obj) = labeled_fence(text) {
        return Some((Strategy::LabeledFence, obj));
    }
    if let Some(obj) = any_fence(text) {
        return Some((Strategy::AnyFence, obj));
    }
    if let Some(obj) = whole_text(text) {
        return Some((Strategy::WholeText, obj));
    }
    sentinel_key(text, expected_keys).map(|obj| (Strategy::SentinelKey, obj))
}

/// Extract a JSON object from model output.
pub fn extract(text: &str, expected_keys: &[&str]) -> Result<JsonObject, RawFallback> {
    extract_with_strategy(text, expected_keys)
        .map(|(_, obj)| obj)
        .ok_or_else(|| RawFallback::new(text))
}

/// Like [`extract`], but folds the fallback into the returned mapping.
pub fn extract_or_raw(text: &str, expected_keys: &[&str]) -> JsonObject {
    extract(text, expected_keys).unwrap_or_else(RawFallback::into_object)
}

/// Whether `obj` is the shape produced by [`RawFallback::into_object`].
pub fn is_raw_fallback(obj: &JsonObject) -> bool {
    obj.len() == 1 && obj.get(RAW_KEY).is_some_and(Value::is_string)
}
