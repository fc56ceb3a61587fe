//! Tolerant parsing of translation replies.
//!
//! LLMs wrap their JSON in prose, fence it in code blocks, rename keys, or
//! cut the array short at the token limit. [`parse_reply`] recovers a usable
//! `id → translation` map from all of those shapes, in order of preference:
//!
//! 1. Contents of a fenced code block (```json or bare ```).
//! 2. Else the slice from the first `[` to the last `]`.
//! 3. Structured parse; on failure, one repair pass that restores a missing
//!    opening/closing bracket, then a reparse.
//!
//! Key spelling is tolerant (`id`/`ID`/`Id`, `vietnamese`/`Vietnamese`/
//! `vi`/`translation`) and numeric-string ids coerce to integers.

use std::collections::HashMap;

use serde_json::Value;

use super::TranslateError;

// ---------------------------------------------------------------------------
// Payload extraction
// ---------------------------------------------------------------------------

/// Return the contents of the first fenced code block, if any.
fn fenced_block(reply: &str) -> Option<&str> {
    let start = if let Some(pos) = reply.find("```json") {
        pos + "```json".len()
    } else if let Some(pos) = reply.find("```") {
        pos + "```".len()
    } else {
        return None;
    };

    let rest = &reply[start..];
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}

/// Slice the part of the reply most likely to be the JSON array.
fn extract_payload(reply: &str) -> &str {
    if let Some(inner) = fenced_block(reply) {
        return inner;
    }
    match (reply.find('['), reply.rfind(']')) {
        (Some(start), Some(end)) if end > start => &reply[start..=end],
        _ => reply.trim(),
    }
}

/// Parse `payload` as a JSON value, repairing a missing bracket on failure.
fn parse_with_repair(payload: &str) -> Result<Value, TranslateError> {
    let payload = payload.trim();
    if let Ok(value) = serde_json::from_str(payload) {
        return Ok(value);
    }

    // Truncated replies commonly lose the surrounding brackets — restore
    // them once and retry before giving up.
    let mut repaired = String::with_capacity(payload.len() + 2);
    if !payload.starts_with('[') {
        repaired.push('[');
    }
    repaired.push_str(payload);
    if !payload.ends_with(']') {
        repaired.push(']');
    }

    serde_json::from_str(&repaired).map_err(|e| TranslateError::Parse(e.to_string()))
}

// ---------------------------------------------------------------------------
// Map building
// ---------------------------------------------------------------------------

fn item_id(item: &Value) -> Option<i64> {
    let raw = ["id", "ID", "Id"].iter().find_map(|k| item.get(*k))?;
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn item_translation(item: &Value) -> Option<&str> {
    ["vietnamese", "Vietnamese", "vi", "translation"]
        .iter()
        .find_map(|k| item.get(*k))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Parse a raw LLM reply into an `id → translation` map.
///
/// Entries with no usable id or an empty translation are skipped. An empty
/// resulting map counts as a parse failure so the caller falls back.
pub fn parse_reply(reply: &str) -> Result<HashMap<i64, String>, TranslateError> {
    let value = parse_with_repair(extract_payload(reply))?;

    let items = value
        .as_array()
        .ok_or_else(|| TranslateError::Parse("reply is not a JSON array".into()))?;

    let mut map = HashMap::new();
    for item in items {
        if let (Some(id), Some(text)) = (item_id(item), item_translation(item)) {
            map.insert(id, text.to_string());
        }
    }

    if map.is_empty() {
        return Err(TranslateError::Parse(
            "no usable {id, translation} entries in reply".into(),
        ));
    }
    Ok(map)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_array_parses() {
        let map = parse_reply(r#"[{"id":1,"vietnamese":"xin chào"}]"#).unwrap();
        assert_eq!(map.get(&1).map(String::as_str), Some("xin chào"));
    }

    #[test]
    fn string_id_coerces_to_integer_key() {
        let map = parse_reply(r#"[{"id":"2","vietnamese":"tạm biệt"}]"#).unwrap();
        assert_eq!(map.get(&2).map(String::as_str), Some("tạm biệt"));
    }

    #[test]
    fn fenced_json_block_extracts_inner_array() {
        let reply = "Here is the translation:\n```json\n[{\"id\":1,\"vietnamese\":\"một\"}]\n```\nHope that helps!";
        let map = parse_reply(reply).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1).map(String::as_str), Some("một"));
    }

    #[test]
    fn bare_fence_extracts_inner_array() {
        let reply = "```\n[{\"id\":3,\"vietnamese\":\"ba\"}]\n```";
        let map = parse_reply(reply).unwrap();
        assert_eq!(map.get(&3).map(String::as_str), Some("ba"));
    }

    #[test]
    fn surrounding_prose_is_sliced_away() {
        let reply = r#"Sure! [{"id":1,"vietnamese":"một"},{"id":2,"vietnamese":"hai"}] Done."#;
        let map = parse_reply(reply).unwrap();
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn missing_closing_bracket_is_repaired() {
        let reply = r#"[{"id":1,"vietnamese":"một"},{"id":2,"vietnamese":"hai"}"#;
        // No trailing `]` — the rfind slice keeps nothing to anchor on, so
        // the repair pass must restore it.
        let map = parse_reply(reply).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&2).map(String::as_str), Some("hai"));
    }

    #[test]
    fn alternate_key_spellings_are_accepted() {
        let reply = r#"[
            {"Id": 1, "Vietnamese": "một"},
            {"ID": 2, "vi": "hai"},
            {"id": 3, "translation": "ba"}
        ]"#;
        let map = parse_reply(reply).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&1).map(String::as_str), Some("một"));
        assert_eq!(map.get(&2).map(String::as_str), Some("hai"));
        assert_eq!(map.get(&3).map(String::as_str), Some("ba"));
    }

    #[test]
    fn empty_translations_are_skipped() {
        let reply = r#"[{"id":1,"vietnamese":""},{"id":2,"vietnamese":"hai"}]"#;
        let map = parse_reply(reply).unwrap();
        assert_eq!(map.len(), 1);
        assert!(!map.contains_key(&1));
    }

    #[test]
    fn entry_without_id_is_skipped() {
        let reply = r#"[{"vietnamese":"mồ côi"},{"id":5,"vietnamese":"năm"}]"#;
        let map = parse_reply(reply).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&5).map(String::as_str), Some("năm"));
    }

    #[test]
    fn garbage_reply_is_a_parse_error() {
        assert!(matches!(
            parse_reply("I could not translate that, sorry."),
            Err(TranslateError::Parse(_))
        ));
    }

    #[test]
    fn all_entries_unusable_is_a_parse_error() {
        assert!(parse_reply(r#"[{"note":"nothing useful"}]"#).is_err());
    }
}
