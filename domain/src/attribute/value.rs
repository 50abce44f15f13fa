//! Attribute value

use crate::member::Instrument;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single value of an attribute, used as index key and as answer option
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(i64),
    Instrument(Instrument),
    Text(String),
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(text) => write!(f, "{}", text),
            AttributeValue::Number(number) => write!(f, "{}", number),
            AttributeValue::Instrument(instrument) => write!(f, "{}", instrument),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(text: &str) -> Self {
        AttributeValue::Text(text.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(text: String) -> Self {
        AttributeValue::Text(text)
    }
}

impl From<i64> for AttributeValue {
    fn from(number: i64) -> Self {
        AttributeValue::Number(number)
    }
}

impl From<Instrument> for AttributeValue {
    fn from(instrument: Instrument) -> Self {
        AttributeValue::Instrument(instrument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(AttributeValue::from("Smith").to_string(), "Smith");
        assert_eq!(AttributeValue::from(42).to_string(), "42");
        assert_eq!(AttributeValue::from(Instrument::Horn).to_string(), "Horn");
    }

    #[test]
    fn test_serialize_untagged() {
        let json = serde_json::to_string(&vec![
            AttributeValue::from("Smith"),
            AttributeValue::from(1999),
            AttributeValue::from(Instrument::Tuba),
        ])
        .unwrap();
        assert_eq!(json, r#"["Smith",1999,"tuba"]"#);
    }
}
