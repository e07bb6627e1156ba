use urlencoding::encode;

/// Ampersand-joined `name=value` pairs; values are percent-encoded, names are kept as-is
/// since parameter names such as `service:vm:aws:id` are valid query keys.
pub fn build_query_string(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, encode(v)))
        .collect::<Vec<String>>()
        .join("&")
}
