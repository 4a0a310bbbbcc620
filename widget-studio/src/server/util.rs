use std::collections::BTreeMap;

use crate::value::Value;

pub(super) use crate::markup::html_escape;

/// JSON-encode `value` for embedding in an inline `<script>`. `</` becomes
/// `<\/` so the HTML parser cannot close the script block early.
pub(super) fn json_inline<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

/// Field values keyed by name, the shape the page script consumes.
pub(super) fn values_map(values: Vec<(&'static str, Value)>) -> BTreeMap<&'static str, Value> {
    values.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_close_is_escaped() {
        let json = json_inline("<div></div><script></script>");
        assert!(!json.contains("</"));
        assert!(json.contains(r"<\/script>"));
    }

    #[test]
    fn values_serialize_as_object() {
        let map = values_map(vec![("title", Value::from("Hi")), ("dismissible", Value::from(true))]);
        assert_eq!(json_inline(&map), r#"{"dismissible":true,"title":"Hi"}"#);
    }
}
