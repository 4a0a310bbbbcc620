//! Primitive parameter values shared by every widget snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StudioError};

/// A single parameter value.
///
/// Serialized untagged so a snapshot reads as plain JSON
/// (`"title": "Hi"`, `"borderWidth": 2`, `"dismissible": true`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// The declared primitive type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Text,
    Number,
    Bool,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Text => write!(f, "string"),
            ValueType::Number => write!(f, "number"),
            ValueType::Bool => write!(f, "boolean"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Text(_) => ValueType::Text,
            Value::Number(_) => ValueType::Number,
            Value::Bool(_) => ValueType::Bool,
        }
    }

    pub fn into_text(self, field: &str) -> Result<String> {
        match self {
            Value::Text(s) => Ok(s),
            other => Err(StudioError::type_mismatch(
                field,
                ValueType::Text,
                other.value_type(),
            )),
        }
    }

    pub fn into_bool(self, field: &str) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(b),
            other => Err(StudioError::type_mismatch(
                field,
                ValueType::Bool,
                other.value_type(),
            )),
        }
    }

    /// Read a pixel quantity: a finite, non-negative whole number.
    pub fn into_pixels(self, field: &str) -> Result<u32> {
        let n = match self {
            Value::Number(n) => n,
            other => {
                return Err(StudioError::type_mismatch(
                    field,
                    ValueType::Number,
                    other.value_type(),
                ))
            }
        };
        if !n.is_finite() || n < 0.0 || n.fract() != 0.0 || n > f64::from(u32::MAX) {
            return Err(StudioError::invalid(
                field,
                format!("{n} is not a whole number of pixels"),
            ));
        }
        Ok(n as u32)
    }

    /// Parse a raw string (e.g. from `--set key=value`) as the given type.
    pub fn parse_as(ty: ValueType, field: &str, raw: &str) -> Result<Value> {
        match ty {
            ValueType::Text => Ok(Value::Text(raw.to_string())),
            ValueType::Bool => match raw.trim() {
                "true" | "on" | "yes" | "1" => Ok(Value::Bool(true)),
                "false" | "off" | "no" | "0" => Ok(Value::Bool(false)),
                other => Err(StudioError::invalid(
                    field,
                    format!("'{other}' is not a boolean"),
                )),
            },
            ValueType::Number => raw
                .trim()
                .parse::<f64>()
                .map(Value::Number)
                .map_err(|_| StudioError::invalid(field, format!("'{raw}' is not a number"))),
        }
    }
}

/// Accepts `#rgb`, `#rrggbb` and `#rrggbbaa`.
pub fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

pub(crate) fn into_color(value: Value, field: &str) -> Result<String> {
    let s = value.into_text(field)?;
    if is_hex_color(&s) {
        Ok(s)
    } else {
        Err(StudioError::invalid(
            field,
            format!("'{s}' is not a hex color"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_reject_negative_and_fractional() {
        assert_eq!(Value::Number(4.0).into_pixels("w"), Ok(4));
        assert!(Value::Number(-1.0).into_pixels("w").is_err());
        assert!(Value::Number(1.5).into_pixels("w").is_err());
        assert!(Value::Number(f64::NAN).into_pixels("w").is_err());
        assert!(matches!(
            Value::Text("4".into()).into_pixels("w"),
            Err(StudioError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn hex_colors() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#0969da"));
        assert!(is_hex_color("#0969da80"));
        assert!(!is_hex_color("0969da"));
        assert!(!is_hex_color("#12"));
        assert!(!is_hex_color("#zzzzzz"));
        assert!(!is_hex_color("#fff\" onload=\"x"));
    }

    #[test]
    fn parse_as_declared_type() {
        assert_eq!(
            Value::parse_as(ValueType::Bool, "b", "on").unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            Value::parse_as(ValueType::Number, "n", " 12 ").unwrap(),
            Value::Number(12.0)
        );
        assert_eq!(
            Value::parse_as(ValueType::Text, "t", "12").unwrap(),
            Value::Text("12".into())
        );
        assert!(Value::parse_as(ValueType::Bool, "b", "maybe").is_err());
        assert!(Value::parse_as(ValueType::Number, "n", "wide").is_err());
    }

    #[test]
    fn untagged_json() {
        let v: Value = serde_json::from_str("true").unwrap();
        assert_eq!(v, Value::Bool(true));
        let v: Value = serde_json::from_str("8").unwrap();
        assert_eq!(v, Value::Number(8.0));
        let v: Value = serde_json::from_str("\"note\"").unwrap();
        assert_eq!(v, Value::Text("note".into()));
    }
}
