use serde_json::Value;

use crate::models::RemoteObject;

/// Result list of a lookup response, `{ "data": [...] }` or a bare array.
///
/// Anything else yields no results; entries without an id are skipped.
pub fn unwrap_results(response: &Value) -> Vec<RemoteObject> {
    let items = match response.get("data") {
        Some(Value::Array(items)) => items,
        _ => match response {
            Value::Array(items) => items,
            _ => {
                tracing::debug!("Lookup response is neither an array nor a data envelope");
                return Vec::new();
            }
        },
    };
    items.iter().filter_map(to_remote_object).collect()
}

fn to_remote_object(item: &Value) -> Option<RemoteObject> {
    let text = |name: &str| -> Option<String> {
        match item.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    };
    let id = text("id").filter(|id| !id.is_empty())?;
    Some(RemoteObject {
        id,
        name: text("name"),
        key: text("key"),
        pkey: text("pkey"),
        description: text("description"),
        new: false,
    })
}
