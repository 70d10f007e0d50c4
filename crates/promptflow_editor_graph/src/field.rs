// SPDX-License-Identifier: MIT OR Apache-2.0
//! Field definitions and values carried by workflow nodes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of a node field, used by the rendering layer to pick a widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldType {
    /// Free-form text
    Text {
        /// Rendered as a multi-line text area
        multiline: bool,
    },
    /// One of a fixed set of options
    Choice(Vec<String>),
    /// Text that must be masked when displayed
    Secret,
    /// Whole number
    Integer,
    /// Floating point number with an optional range
    Float {
        /// Lower bound (inclusive)
        min: Option<f64>,
        /// Upper bound (inclusive)
        max: Option<f64>,
        /// Increment used by spinner widgets
        step: Option<f64>,
    },
    /// Text shown to the user but never edited through a widget
    ReadOnlyText,
}

impl FieldType {
    /// Whether the rendering layer should offer an editing widget
    pub fn is_editable(&self) -> bool {
        !matches!(self, Self::ReadOnlyText)
    }

    /// Numeric range declared for this field, if any
    pub fn range(&self) -> Option<(f64, f64)> {
        match self {
            Self::Float {
                min: Some(min),
                max: Some(max),
                ..
            } => Some((*min, *max)),
            _ => None,
        }
    }
}

/// Value stored in a node field.
///
/// Values are not checked against the field's [`FieldType`]: a numeric field
/// may hold raw text exactly as the widget produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Whole number
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Text
    Text(String),
}

impl FieldValue {
    /// Borrow the value as text, if it is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// A single entry of a node kind's field schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Key under which the value is stored in the node data
    pub name: String,
    /// Label shown next to the widget
    pub label: String,
    /// Semantic type
    pub field_type: FieldType,
    /// Value seeded into newly placed nodes
    pub default: FieldValue,
    /// Hint text shown while the widget is empty
    pub placeholder: Option<String>,
}

impl FieldDefinition {
    /// Create a new field definition
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        field_type: FieldType,
        default: impl Into<FieldValue>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field_type,
            default: default.into(),
            placeholder: None,
        }
    }

    /// Set the placeholder text
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

/// Current field values of a node, in schema order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    values: IndexMap<String, FieldValue>,
}

impl NodeData {
    /// Seed data from a schema's defaults
    pub fn from_schema(schema: &[FieldDefinition]) -> Self {
        Self {
            values: schema
                .iter()
                .map(|field| (field.name.clone(), field.default.clone()))
                .collect(),
        }
    }

    /// Get the value of a field
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Whether the field is declared for this node
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Overwrite an existing field.
    ///
    /// Returns `false` without touching the data when the field is not declared.
    pub(crate) fn set(&mut self, field: &str, value: FieldValue) -> bool {
        match self.values.get_mut(field) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Field names in schema order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Field entries in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the node has no fields
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_from_schema_keeps_order() {
        let schema = vec![
            FieldDefinition::new("b", "B", FieldType::Integer, 1i64),
            FieldDefinition::new("a", "A", FieldType::Secret, ""),
        ];
        let data = NodeData::from_schema(&schema);

        assert_eq!(data.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(data.get("b"), Some(&FieldValue::Integer(1)));
        assert_eq!(data.get("a"), Some(&FieldValue::Text(String::new())));
    }

    #[test]
    fn test_set_rejects_undeclared_field() {
        let schema = vec![FieldDefinition::new("query", "Input", FieldType::Secret, "")];
        let mut data = NodeData::from_schema(&schema);

        assert!(!data.set("extra", FieldValue::from("x")));
        assert_eq!(data.len(), 1);
        assert!(data.set("query", FieldValue::from("x")));
        assert_eq!(data.get("query").and_then(FieldValue::as_text), Some("x"));
    }

    #[test]
    fn test_float_range() {
        let ty = FieldType::Float {
            min: Some(0.0),
            max: Some(1.0),
            step: Some(0.1),
        };
        assert_eq!(ty.range(), Some((0.0, 1.0)));
        assert!(ty.is_editable());
        assert!(!FieldType::ReadOnlyText.is_editable());
    }
}
