//! Typed custom fields: schema ([`FieldDef`]) and values ([`FieldInstance`])

use crate::{Color, Point, Uid};
use serde::{Deserialize, Serialize};

/// The type of a custom field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Int,
    Float,
    String,
    Bool,
    Color,
    Point,
    Vector2,
}

/// Typed field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type", content = "Value")]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Color(Color),
    Point(Point),
    Vector2([f32; 2]),
    Array(Vec<FieldValue>),
}

impl FieldValue {
    /// Scalar type of this value, `None` for arrays
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            FieldValue::Int(_) => Some(FieldType::Int),
            FieldValue::Float(_) => Some(FieldType::Float),
            FieldValue::String(_) => Some(FieldType::String),
            FieldValue::Bool(_) => Some(FieldType::Bool),
            FieldValue::Color(_) => Some(FieldType::Color),
            FieldValue::Point(_) => Some(FieldType::Point),
            FieldValue::Vector2(_) => Some(FieldType::Vector2),
            FieldValue::Array(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            FieldValue::Float(f) => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Zero value for a field type
    pub fn default_for(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Int => FieldValue::Int(0),
            FieldType::Float => FieldValue::Float(0.0),
            FieldType::String => FieldValue::String(String::new()),
            FieldType::Bool => FieldValue::Bool(false),
            FieldType::Color => FieldValue::Color(Color::default()),
            FieldType::Point => FieldValue::Point(Point::ZERO),
            FieldType::Vector2 => FieldValue::Vector2([0.0, 0.0]),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// Schema entry for a custom field on an entity or level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldDef {
    pub uid: Uid,
    pub identifier: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub is_array: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,
}

impl FieldDef {
    pub fn new(uid: Uid, identifier: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            uid,
            identifier: identifier.into(),
            field_type,
            is_array: false,
            default_value: None,
        }
    }

    /// Whether `value` has the shape this definition declares
    pub fn accepts(&self, value: &FieldValue) -> bool {
        match value {
            FieldValue::Array(items) => {
                self.is_array
                    && items
                        .iter()
                        .all(|item| item.field_type() == Some(self.field_type))
            }
            scalar => !self.is_array && scalar.field_type() == Some(self.field_type),
        }
    }

    /// Create an instance holding the default value
    pub fn instantiate(&self) -> FieldInstance {
        let value = match &self.default_value {
            Some(value) => value.clone(),
            None if self.is_array => FieldValue::Array(Vec::new()),
            None => FieldValue::default_for(self.field_type),
        };
        FieldInstance {
            field_def_id: self.uid,
            value,
        }
    }
}

/// A value for a [`FieldDef`], referenced by uid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldInstance {
    pub field_def_id: Uid,
    pub value: FieldValue,
}

impl FieldInstance {
    pub fn new(field_def_id: Uid, value: impl Into<FieldValue>) -> Self {
        Self {
            field_def_id,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_roundtrip() {
        let value = FieldValue::Array(vec![
            FieldValue::Point(Point::new(1, 2)),
            FieldValue::Point(Point::new(3, 4)),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        let parsed: FieldValue = serde_json::from_str(&json).unwrap();
        assert_eq!(value, parsed);
    }

    #[test]
    fn test_accepts() {
        let mut def = FieldDef::new(1, "health", FieldType::Int);
        assert!(def.accepts(&FieldValue::Int(3)));
        assert!(!def.accepts(&FieldValue::Float(3.0)));
        assert!(!def.accepts(&FieldValue::Array(vec![FieldValue::Int(1)])));

        def.is_array = true;
        assert!(def.accepts(&FieldValue::Array(vec![FieldValue::Int(1)])));
        assert!(!def.accepts(&FieldValue::Int(3)));
    }

    #[test]
    fn test_instantiate_uses_default() {
        let mut def = FieldDef::new(7, "label", FieldType::String);
        assert_eq!(def.instantiate().value, FieldValue::String(String::new()));

        def.default_value = Some("door".into());
        let instance = def.instantiate();
        assert_eq!(instance.field_def_id, 7);
        assert_eq!(instance.value.as_string(), Some("door"));
    }
}
