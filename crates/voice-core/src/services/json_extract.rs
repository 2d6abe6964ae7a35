//! Lenient extraction of a JSON object from free-form model output.
//!
//! Model replies are untrusted text: the object may be wrapped in prose or
//! code fences, truncated, or preceded by brace-like noise.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Find the first balanced `{...}` region that parses as a JSON object.
///
/// Regions that are unbalanced or fail to parse are skipped and scanning
/// resumes at the next `{`.
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;

        if let Some(len) = balanced_len(&text[start..]) {
            if let Ok(Value::Object(map)) = serde_json::from_str(&text[start..start + len]) {
                return Some(map);
            }
        }

        search_from = start + 1;
    }

    None
}

/// Like [`extract_json_object`], then deserialize the object into `T`.
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Option<T> {
    extract_json_object(text).and_then(|map| serde_json::from_value(Value::Object(map)).ok())
}

/// Byte length of the brace region starting at `s[0] == '{'`, if it closes.
///
/// Braces inside string literals do not count. All delimiters are ASCII, so
/// scanning bytes is safe on UTF-8 input.
fn balanced_len(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in s.bytes().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}
