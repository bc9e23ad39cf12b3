use serde_json::Value;

/// Whether any string in the payload, at any depth, contains `needle`.
pub fn message_contains_text(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(text) => text.contains(needle),
        Value::Array(items) => items.iter().any(|item| message_contains_text(item, needle)),
        Value::Object(map) => map.values().any(|item| message_contains_text(item, needle)),
        _ => needle.is_empty(),
    }
}

/// Content types of a serialized activity's attachments, in order. Placeholders yield `None`.
pub fn attachment_content_types(activity: &Value) -> Vec<Option<String>> {
    activity
        .get("attachments")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    item.get("contentType")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .collect()
        })
        .unwrap_or_default()
}
