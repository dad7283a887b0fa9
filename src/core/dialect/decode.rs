//! Shape-tolerant response decoding

use serde_json::Value;
use tracing::debug;

/// Text of one streamed payload.
///
/// Shapes are tried in order and the first non-empty match wins: chat delta
/// (content, then reasoning content), completion choice text, chat message leaked into a
/// stream, then top-level `content`, `response` and string `delta`.
pub fn fragment_text(payload: &str) -> String {
    let Some(value) = parse(payload) else {
        return String::new();
    };
    let choice = first_choice(&value);

    first_non_empty([
        choice.and_then(|c| str_at(c, &["delta", "content"])),
        choice.and_then(|c| str_at(c, &["delta", "reasoning_content"])),
        choice.and_then(|c| str_at(c, &["text"])),
        choice.and_then(|c| str_at(c, &["message", "content"])),
        choice.and_then(|c| str_at(c, &["message", "reasoning_content"])),
        str_at(&value, &["content"]),
        str_at(&value, &["response"]),
        str_at(&value, &["delta"]),
    ])
}

/// Text of a one-shot response body: message content or reasoning content of the first
/// choice, then choice text, then top-level `content` and `response`.
pub fn full_response_text(body: &str) -> String {
    let Some(value) = parse(body) else {
        return String::new();
    };
    let choice = first_choice(&value);

    first_non_empty([
        choice.and_then(|c| str_at(c, &["message", "content"])),
        choice.and_then(|c| str_at(c, &["message", "reasoning_content"])),
        choice.and_then(|c| str_at(c, &["text"])),
        str_at(&value, &["content"]),
        str_at(&value, &["response"]),
    ])
}

fn parse(raw: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, "dropping unparseable upstream payload");
            None
        }
    }
}

fn first_choice(value: &Value) -> Option<&Value> {
    value
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
}

fn str_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    path.iter()
        .try_fold(value, |current, key| current.get(*key))
        .and_then(Value::as_str)
}

fn first_non_empty<'a, const N: usize>(candidates: [Option<&'a str>; N]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|text| !text.is_empty())
        .map(str::to_owned)
        .unwrap_or_default()
}
