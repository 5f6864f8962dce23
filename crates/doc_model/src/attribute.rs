//! Typed attribute values and descriptors
//!
//! Shapes expose their editable state as named attributes. Values are a
//! tagged variant so that casting user input to an attribute's expected
//! type is checked in one place ([`AttributeKind::cast`]).

use crate::{DocModelError, Result, ShapeColor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum AttributeValue {
    /// Floating point number
    Number(f64),
    /// Free text
    Text(String),
    /// A color
    Color(ShapeColor),
    /// One of a fixed set of names
    Choice(String),
}

impl AttributeValue {
    /// The numeric value, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text of a text or choice value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) | AttributeValue::Choice(s) => Some(s),
            _ => None,
        }
    }

    /// The color, if this is a color
    pub fn as_color(&self) -> Option<ShapeColor> {
        match self {
            AttributeValue::Color(c) => Some(*c),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::Number(n) => write!(f, "{}", n),
            AttributeValue::Text(s) | AttributeValue::Choice(s) => write!(f, "{}", s),
            AttributeValue::Color(c) => write!(f, "{}", c),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Number(n)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl From<ShapeColor> for AttributeValue {
    fn from(c: ShapeColor) -> Self {
        AttributeValue::Color(c)
    }
}

/// The type an attribute accepts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeKind {
    /// Any finite number
    Number,
    /// A finite number greater than zero
    Positive,
    /// A whole number in `min..=max`
    Count { min: u32, max: u32 },
    /// Any text
    Text,
    /// A color name or hex string
    Color,
    /// One of the listed names
    Choice(&'static [&'static str]),
}

impl AttributeKind {
    /// Human readable name of the expected type
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeKind::Number => "a number",
            AttributeKind::Positive => "a positive number",
            AttributeKind::Count { .. } => "a whole number in range",
            AttributeKind::Text => "text",
            AttributeKind::Color => "a color",
            AttributeKind::Choice(_) => "one of the listed choices",
        }
    }

    /// Convert `value` to this kind, failing with `AttributeCast`
    pub fn cast(&self, attribute: &str, value: &AttributeValue) -> Result<AttributeValue> {
        let fail = || DocModelError::AttributeCast {
            attribute: attribute.to_string(),
            value: value.to_string(),
            expected: self.type_name(),
        };

        match self {
            AttributeKind::Number | AttributeKind::Positive | AttributeKind::Count { .. } => {
                let n = match value {
                    AttributeValue::Number(n) => *n,
                    AttributeValue::Text(s) => s.trim().parse::<f64>().map_err(|_| fail())?,
                    _ => return Err(fail()),
                };
                if !n.is_finite() {
                    return Err(fail());
                }
                match self {
                    AttributeKind::Positive if n <= 0.0 => Err(fail()),
                    AttributeKind::Count { min, max }
                        if n.fract() != 0.0 || n < f64::from(*min) || n > f64::from(*max) =>
                    {
                        Err(fail())
                    }
                    _ => Ok(AttributeValue::Number(n)),
                }
            }
            AttributeKind::Text => match value {
                AttributeValue::Color(_) => Err(fail()),
                other => Ok(AttributeValue::Text(other.to_string())),
            },
            AttributeKind::Color => match value {
                AttributeValue::Color(c) => Ok(AttributeValue::Color(*c)),
                AttributeValue::Text(s) => ShapeColor::parse(s)
                    .map(AttributeValue::Color)
                    .ok_or_else(fail),
                _ => Err(fail()),
            },
            AttributeKind::Choice(options) => {
                let text = value.as_text().ok_or_else(fail)?;
                options
                    .iter()
                    .find(|option| option.eq_ignore_ascii_case(text.trim()))
                    .map(|option| AttributeValue::Choice(option.to_string()))
                    .ok_or_else(fail)
            }
        }
    }
}

/// Describes one editable attribute for help text and validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeDescriptor {
    pub name: &'static str,
    pub kind: AttributeKind,
    pub help: &'static str,
}

impl AttributeDescriptor {
    pub const fn new(name: &'static str, kind: AttributeKind, help: &'static str) -> Self {
        Self { name, kind, help }
    }
}

impl std::fmt::Display for AttributeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            AttributeKind::Choice(options) => {
                write!(f, "{} ({}): {}", self.name, options.join("|"), self.help)
            }
            kind => write!(f, "{} ({}): {}", self.name, kind.type_name(), self.help),
        }
    }
}

/// Flat name to value projection of a shape, consumed by serializers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap(BTreeMap<String, AttributeValue>);

impl AttributeMap {
    /// Key holding the shape's unique name
    pub const NAME: &'static str = "name";
    /// Key holding the shape or decoration type
    pub const TYPE: &'static str = "type";
    /// Key holding the name of the shape a decorator wraps
    pub const WRAPS: &'static str = "wraps";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The shape name stored under [`AttributeMap::NAME`]
    pub fn name(&self) -> Option<&str> {
        self.get(Self::NAME).and_then(AttributeValue::as_text)
    }

    /// The type stored under [`AttributeMap::TYPE`]
    pub fn type_name(&self) -> Option<&str> {
        self.get(Self::TYPE).and_then(AttributeValue::as_text)
    }

    /// The wrapped shape's name for decorator maps
    pub fn wraps(&self) -> Option<&str> {
        self.get(Self::WRAPS).and_then(AttributeValue::as_text)
    }

    /// Attributes other than name, type and wraps
    pub fn editable(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.iter()
            .filter(|(k, _)| !matches!(*k, AttributeMap::NAME | AttributeMap::TYPE | AttributeMap::WRAPS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_cast_from_text() {
        let value = AttributeKind::Number.cast("x", &"12.5".into()).unwrap();
        assert_eq!(value, AttributeValue::Number(12.5));
    }

    #[test]
    fn test_number_cast_rejects_words() {
        let err = AttributeKind::Number.cast("x", &"twelve".into()).unwrap_err();
        assert!(matches!(err, DocModelError::AttributeCast { expected: "a number", .. }));
    }

    #[test]
    fn test_positive_and_count() {
        assert!(AttributeKind::Positive.cast("w", &0.0.into()).is_err());
        assert!(AttributeKind::Positive.cast("w", &0.5.into()).is_ok());
        let sides = AttributeKind::Count { min: 3, max: 64 };
        assert!(sides.cast("sides", &2.0.into()).is_err());
        assert!(sides.cast("sides", &4.5.into()).is_err());
        assert!(sides.cast("sides", &65.0.into()).is_err());
        assert!(sides.cast("sides", &1e10.into()).is_err());
        assert_eq!(sides.cast("sides", &"64".into()).unwrap(), AttributeValue::Number(64.0));
        assert_eq!(sides.cast("sides", &"6".into()).unwrap(), AttributeValue::Number(6.0));
    }

    #[test]
    fn test_color_cast() {
        assert_eq!(
            AttributeKind::Color.cast("fill", &"red".into()).unwrap(),
            AttributeValue::Color(ShapeColor::RED)
        );
        assert!(AttributeKind::Color.cast("fill", &3.0.into()).is_err());
        assert!(AttributeKind::Color.cast("fill", &"reddish".into()).is_err());
    }

    #[test]
    fn test_choice_cast_canonicalizes() {
        let kind = AttributeKind::Choice(&["hatch", "cross"]);
        assert_eq!(
            kind.cast("pattern", &"CROSS".into()).unwrap(),
            AttributeValue::Choice("cross".to_string())
        );
        assert!(kind.cast("pattern", &"plaid".into()).is_err());
    }

    #[test]
    fn test_text_cast_accepts_numbers() {
        assert_eq!(
            AttributeKind::Text.cast("text", &4.0.into()).unwrap(),
            AttributeValue::Text("4".to_string())
        );
    }

    #[test]
    fn test_attribute_map_json_shape() {
        let mut map = AttributeMap::new();
        map.insert(AttributeMap::NAME, "r1");
        map.insert("width", 10.0);
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["width"]["type"], "number");
        assert_eq!(json["name"]["value"], "r1");

        let back: AttributeMap = serde_json::from_value(json).unwrap();
        assert_eq!(back, map);
        assert_eq!(back.editable().count(), 1);
    }
}
