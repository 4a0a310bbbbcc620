//! Inline CSS serialization.

use std::fmt::Display;

/// An ordered list of camelCase style properties.
///
/// Declarations keep insertion order so the output is stable. A property
/// whose value is absent or empty produces no declaration at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    props: Vec<(&'static str, Option<String>)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property with a value.
    pub fn with(mut self, key: &'static str, value: impl Display) -> Self {
        self.props.push((key, Some(value.to_string())));
        self
    }

    /// Add a property whose value may be absent.
    pub fn maybe<V: Display>(mut self, key: &'static str, value: Option<V>) -> Self {
        self.props.push((key, value.map(|v| v.to_string())));
        self
    }

    /// Serialize to `kebab-key:value;kebab-key:value`.
    pub fn to_css(&self) -> String {
        self.props
            .iter()
            .filter_map(|(key, value)| match value.as_deref() {
                Some(v) if !v.is_empty() => Some(format!("{}:{v}", kebab_case(key))),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// `borderRadius` -> `border-radius`.
pub fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// A pixel length, or `None` when the value is zero.
pub fn px_or_none(n: u32) -> Option<String> {
    (n > 0).then(|| format!("{n}px"))
}

/// The `border` shorthand; zero width collapses to `none`.
pub fn border(width: u32, color: &str) -> String {
    if width > 0 {
        format!("{width}px solid {color}")
    } else {
        "none".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_conversion() {
        assert_eq!(kebab_case("borderRadius"), "border-radius");
        assert_eq!(kebab_case("backdropFilter"), "backdrop-filter");
        assert_eq!(kebab_case("color"), "color");
        assert_eq!(kebab_case("minWidth"), "min-width");
    }

    #[test]
    fn skips_absent_and_empty() {
        let css = Style::new()
            .with("display", "flex")
            .maybe::<&str>("width", None)
            .with("color", "")
            .with("lineHeight", 1)
            .to_css();
        assert_eq!(css, "display:flex;line-height:1");
    }

    #[test]
    fn zero_border_is_none() {
        assert_eq!(border(0, "#000"), "none");
        assert_eq!(border(2, "#0969da"), "2px solid #0969da");
    }

    #[test]
    fn zero_px_suppressed() {
        assert_eq!(px_or_none(0), None);
        assert_eq!(px_or_none(44).as_deref(), Some("44px"));
    }

    #[test]
    fn empty_style() {
        assert_eq!(Style::new().to_css(), "");
    }
}
